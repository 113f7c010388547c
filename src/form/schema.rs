use std::collections::{BTreeMap, BTreeSet};

use super::field::{FieldId, FormFieldState};
use crate::model::{FieldError, YearMonth};

/// Read-only view of every field value at one moment, handed to each rule.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a, F> {
    fields: &'a [(F, FormFieldState)],
    today: YearMonth,
}

impl<'a, F: FieldId> Snapshot<'a, F> {
    pub fn new(fields: &'a [(F, FormFieldState)], today: YearMonth) -> Self {
        Self { fields, today }
    }

    /// The value of `field`, or `""` if the form does not have it.
    pub fn value(&self, field: F) -> &'a str {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, state)| state.value.as_str())
            .unwrap_or("")
    }

    /// The current month, for expiry checks.
    pub fn today(&self) -> YearMonth {
        self.today
    }
}

/// A pure check bound to one field: receives the field's own value and the
/// full snapshot for cross-field checks.
pub type Rule<F> = Box<dyn Fn(&str, &Snapshot<'_, F>) -> Result<(), FieldError>>;

/// Boxes a closure as a [`Rule`].
pub fn rule<F, R>(check: R) -> Rule<F>
where
    F: FieldId,
    R: Fn(&str, &Snapshot<'_, F>) -> Result<(), FieldError> + 'static,
{
    Box::new(check)
}

/// Lifts a value-only validator into a [`Rule`], discarding any parsed output.
pub fn check<F, T>(validate: fn(&str) -> Result<T, FieldError>) -> Rule<F>
where
    F: FieldId,
    T: 'static,
{
    Box::new(move |value, _| validate(value).map(|_| ()))
}

/// Ordered rule table for a form.
///
/// Fields keep the order in which they are declared; rules on a field run in
/// order and the first failure wins. A field with no rules always passes.
pub struct Schema<F> {
    fields: Vec<(F, Vec<Rule<F>>)>,
    dependents: BTreeMap<F, BTreeSet<F>>,
}

impl<F: FieldId> Default for Schema<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FieldId> Schema<F> {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            dependents: BTreeMap::new(),
        }
    }

    /// Declares `field` with its rules. Declaring a field again replaces its rules.
    pub fn field(mut self, field: F, rules: Vec<Rule<F>>) -> Self {
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = rules,
            None => self.fields.push((field, rules)),
        }
        self
    }

    /// Records that `field`'s rules read `source`, so editing or blurring
    /// `source` revalidates `field` too.
    pub fn depends_on(mut self, field: F, source: F) -> Self {
        self.dependents.entry(source).or_default().insert(field);
        self
    }

    /// Declared fields, in order.
    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.fields.iter().map(|(f, _)| *f)
    }

    /// Fields whose rules read `source`.
    pub fn dependents(&self, source: F) -> impl Iterator<Item = F> + '_ {
        self.dependents
            .get(&source)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Runs `field`'s rules against the snapshot, returning the first failure.
    pub fn validate(&self, field: F, snapshot: &Snapshot<'_, F>) -> Option<FieldError> {
        let (_, rules) = self.fields.iter().find(|(f, _)| *f == field)?;
        let value = snapshot.value(field);
        rules.iter().find_map(|rule| rule(value, snapshot).err())
    }
}

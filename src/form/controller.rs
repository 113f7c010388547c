use std::rc::Rc;

use super::field::{FieldId, FormFieldState};
use super::focus::{FocusTarget, first_error, focus_first_error};
use super::schema::{Schema, Snapshot};
use crate::config::ValidationMode;
use crate::model::{Clock, FieldError};

/// Field state plus the rules that govern it.
///
/// Knows nothing about records or where they go; the checkout controllers
/// wrap it and decide what a successful submit does.
pub struct FormController<F: FieldId> {
    schema: Schema<F>,
    fields: Vec<(F, FormFieldState)>,
    mode: ValidationMode,
    clock: Rc<dyn Clock>,
    focus: Option<Box<dyn FocusTarget<F>>>,
}

impl<F: FieldId> FormController<F> {
    /// Creates a form with one empty, untouched field per declared schema field.
    pub fn new(schema: Schema<F>, mode: ValidationMode, clock: Rc<dyn Clock>) -> Self {
        let fields = schema
            .fields()
            .map(|f| (f, FormFieldState::default()))
            .collect();
        Self {
            schema,
            fields,
            mode,
            clock,
            focus: None,
        }
    }

    /// Installs the UI handle that receives focus requests on failed submits.
    pub fn set_focus_target(&mut self, target: Box<dyn FocusTarget<F>>) {
        self.focus = Some(target);
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// All fields in declared order.
    pub fn fields(&self) -> &[(F, FormFieldState)] {
        &self.fields
    }

    /// Returns the state of `field`, or `None` if this form does not have it.
    pub fn field(&self, field: F) -> Option<&FormFieldState> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, state)| state)
    }

    /// Returns the value of `field`, or an empty string if the form does not have it.
    pub fn value(&self, field: F) -> &str {
        self.field(field).map(FormFieldState::value).unwrap_or("")
    }

    /// Returns `true` if any field has an error set.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|(_, state)| state.error.is_some())
    }

    /// Sets a field's value.
    ///
    /// Under [`ValidationMode::OnChange`] the field and its dependents are
    /// revalidated; under [`ValidationMode::OnBlur`] only the field's own
    /// error is cleared. Unknown fields are ignored.
    pub fn update_field(&mut self, field: F, value: impl Into<String>) {
        let mode = self.mode;
        let Some(state) = self.state_mut(field) else {
            return;
        };
        state.value = value.into();
        match mode {
            ValidationMode::OnChange => self.validate_with_dependents(field),
            ValidationMode::OnBlur => state.error = None,
        }
    }

    /// Marks a field touched and validates it and its dependents.
    pub fn blur_field(&mut self, field: F) {
        let Some(state) = self.state_mut(field) else {
            return;
        };
        state.touched = true;
        self.validate_with_dependents(field);
    }

    /// Validates every field.
    ///
    /// On failure, marks the erroring fields touched, asks the focus target to
    /// focus the first of them, and returns it.
    pub fn validate_for_submit(&mut self) -> Result<(), F> {
        self.validate_all();
        for (_, state) in &mut self.fields {
            if state.error.is_some() {
                state.touched = true;
            }
        }
        let first = match self.focus.as_deref_mut() {
            Some(target) => focus_first_error(&self.fields, target),
            None => first_error(&self.fields),
        };
        match first {
            Some(field) => Err(field),
            None => Ok(()),
        }
    }

    /// Sets an error directly, marking the field touched so it shows.
    pub fn set_error(&mut self, field: F, error: FieldError) {
        if let Some(state) = self.state_mut(field) {
            state.touched = true;
            state.error = Some(error);
        }
    }

    /// Resets every field to empty, untouched, and valid.
    pub fn reset(&mut self) {
        for (_, state) in &mut self.fields {
            *state = FormFieldState::default();
        }
    }

    fn state_mut(&mut self, field: F) -> Option<&mut FormFieldState> {
        self.fields
            .iter_mut()
            .find(|(f, _)| *f == field)
            .map(|(_, state)| state)
    }

    fn validate_all(&mut self) {
        let today = self.clock.today();
        let snapshot = Snapshot::new(&self.fields, today);
        let errors: Vec<Option<FieldError>> = self
            .fields
            .iter()
            .map(|(f, _)| self.schema.validate(*f, &snapshot))
            .collect();
        for ((_, state), error) in self.fields.iter_mut().zip(errors) {
            state.error = error;
        }
    }

    fn validate_with_dependents(&mut self, field: F) {
        let today = self.clock.today();
        let targets: Vec<F> = std::iter::once(field)
            .chain(self.schema.dependents(field))
            .collect();
        let snapshot = Snapshot::new(&self.fields, today);
        let results: Vec<(F, Option<FieldError>)> = targets
            .into_iter()
            .map(|f| (f, self.schema.validate(f, &snapshot)))
            .collect();
        for (f, error) in results {
            if let Some(state) = self.state_mut(f) {
                state.error = error;
            }
        }
    }
}

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::field::{FieldId, FormFieldState};

/// The UI side of focus handling: scroll `field` into view and give it input focus.
///
/// Implementations must not call back into the controller that invokes them.
pub trait FocusTarget<F> {
    fn focus(&mut self, field: F);
}

impl<F, T: FnMut(F)> FocusTarget<F> for T {
    fn focus(&mut self, field: F) {
        self(field);
    }
}

/// Returns the first field, in declared order, that currently holds an error.
pub fn first_error<F: FieldId>(fields: &[(F, FormFieldState)]) -> Option<F> {
    F::all().iter().copied().find(|field| {
        fields
            .iter()
            .any(|(f, state)| f == field && state.error.is_some())
    })
}

/// Focuses the first erroring field, if any, and returns it.
pub fn focus_first_error<F: FieldId>(
    fields: &[(F, FormFieldState)],
    target: &mut dyn FocusTarget<F>,
) -> Option<F> {
    let field = first_error(fields)?;
    target.focus(field);
    Some(field)
}

/// A [`FocusTarget`] that records the latest request for the UI to pick up
/// on its next frame. Clones share the same slot.
pub struct FocusRequest<F> {
    slot: Rc<Cell<Option<F>>>,
}

impl<F> fmt::Debug for FocusRequest<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusRequest").finish_non_exhaustive()
    }
}

impl<F> Clone for FocusRequest<F> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<F: Copy> Default for FocusRequest<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Copy> FocusRequest<F> {
    pub fn new() -> Self {
        Self {
            slot: Rc::new(Cell::new(None)),
        }
    }

    /// Takes the pending request, leaving none.
    pub fn take(&self) -> Option<F> {
        self.slot.take()
    }
}

impl<F: Copy> FocusTarget<F> for FocusRequest<F> {
    fn focus(&mut self, field: F) {
        self.slot.set(Some(field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::testing::TestField;
    use crate::model::FieldError;

    fn with_errors(errors: &[TestField]) -> Vec<(TestField, FormFieldState)> {
        TestField::all()
            .iter()
            .map(|f| {
                let error = errors.contains(f).then_some(FieldError::Required);
                (
                    *f,
                    FormFieldState {
                        error,
                        ..FormFieldState::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn no_errors_focuses_nothing() {
        let fields = with_errors(&[]);
        let mut calls = Vec::new();
        let focused = focus_first_error(&fields, &mut |f: TestField| calls.push(f));
        assert_eq!(focused, None);
        assert!(calls.is_empty());
    }

    #[test]
    fn picks_first_in_declared_order() {
        let fields = with_errors(&[TestField::Note, TestField::Confirm]);
        assert_eq!(first_error(&fields), Some(TestField::Confirm));
    }

    #[test]
    fn declared_order_wins_over_storage_order() {
        let mut fields = with_errors(&[TestField::Name, TestField::Note]);
        fields.reverse();
        assert_eq!(first_error(&fields), Some(TestField::Name));
    }

    #[test]
    fn focuses_exactly_once() {
        let fields = with_errors(&[TestField::Confirm, TestField::Note]);
        let mut calls = Vec::new();
        let focused = focus_first_error(&fields, &mut |f: TestField| calls.push(f));
        assert_eq!(focused, Some(TestField::Confirm));
        assert_eq!(calls, vec![TestField::Confirm]);
    }

    #[test]
    fn focus_request_is_shared_between_clones() {
        let request = FocusRequest::new();
        let mut target = request.clone();
        target.focus(TestField::Note);
        assert_eq!(request.take(), Some(TestField::Note));
        assert_eq!(request.take(), None);
    }

    #[test]
    fn focus_request_debug_hides_pending_field() {
        let request = FocusRequest::new();
        let mut target = request.clone();
        target.focus(TestField::Note);
        assert_eq!(format!("{request:?}"), "FocusRequest { .. }");
        assert_eq!(request.take(), Some(TestField::Note));
    }
}

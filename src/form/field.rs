use std::fmt::Debug;
use std::hash::Hash;

use crate::model::FieldError;

/// Identifies one input of a form.
///
/// Implementors are small `Copy` enums; [`all`](FieldId::all) fixes the
/// declared order used for rendering and for picking the first error.
pub trait FieldId: Copy + Eq + Ord + Hash + Debug + 'static {
    /// Every field, in declared order.
    fn all() -> &'static [Self];

    /// Stable identifier used in logs.
    fn name(self) -> &'static str;

    /// Human-readable label.
    fn label(self) -> &'static str;

    /// Whether the field must be filled in. Used for the required marker.
    fn required(self) -> bool {
        true
    }
}

/// Value, touched flag, and latest validation error of a single input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFieldState {
    pub(crate) value: String,
    pub(crate) touched: bool,
    pub(crate) error: Option<FieldError>,
}

impl FormFieldState {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// The error from the latest validation run, shown or not.
    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    /// The error to display: only once the field has been touched.
    pub fn visible_error(&self) -> Option<&FieldError> {
        self.error.as_ref().filter(|_| self.touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_untouched_and_valid() {
        let state = FormFieldState::default();
        assert_eq!(state.value(), "");
        assert!(!state.is_touched());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn error_hidden_until_touched() {
        let mut state = FormFieldState {
            error: Some(FieldError::Required),
            ..FormFieldState::default()
        };
        assert_eq!(state.visible_error(), None);
        state.touched = true;
        assert_eq!(state.visible_error(), Some(&FieldError::Required));
    }
}

//! Rendering-agnostic form state: per-field values and errors, declarative
//! rule tables, the submission guard, and first-error focus selection.

mod controller;
mod field;
mod focus;
mod guard;
mod schema;

pub use controller::FormController;
pub use field::{FieldId, FormFieldState};
pub use focus::{FocusRequest, FocusTarget, first_error, focus_first_error};
pub use guard::{SubmissionGuard, SubmissionPermit};
pub use schema::{Rule, Schema, Snapshot, check, rule};

/// Result of a `submit()` call on a checkout controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<F, T> {
    /// All rules passed and the result was dispatched.
    Submitted(T),
    /// At least one field failed; `first_error` is the field that was focused.
    Invalid { first_error: F },
    /// Another submission from the same controller is still in flight.
    Busy,
}

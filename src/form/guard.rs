use std::cell::Cell;

/// Re-entrancy flag that keeps a controller from running two submissions at once.
///
/// Acquiring yields a [`SubmissionPermit`]; dropping the permit releases the
/// guard, so every exit path (success, error, early return, unwinding) frees it.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    in_flight: Cell<bool>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a permit is outstanding.
    pub fn is_held(&self) -> bool {
        self.in_flight.get()
    }

    /// Takes the guard, or returns `None` if a submission is already in flight.
    pub fn try_acquire(&self) -> Option<SubmissionPermit<'_>> {
        if self.in_flight.replace(true) {
            None
        } else {
            Some(SubmissionPermit { guard: self })
        }
    }
}

/// Proof that the holder owns the [`SubmissionGuard`]. Releases it on drop.
#[must_use = "the guard is released as soon as the permit is dropped"]
#[derive(Debug)]
pub struct SubmissionPermit<'a> {
    guard: &'a SubmissionGuard,
}

impl Drop for SubmissionPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.set(false);
    }
}

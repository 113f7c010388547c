use crate::purchase::PurchaseError;

/// Errors from a checkout submission that are not field validation failures.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Payment was submitted before any delivery details were stored.
    #[error("delivery details must be submitted before payment")]
    MissingDelivery,

    /// The purchase call failed; the error is passed through untouched.
    #[error(transparent)]
    Purchase(#[from] PurchaseError),
}

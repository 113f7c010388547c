//! The purchase call: request/response wire types, the [`PurchaseApi`]
//! trait, and an offline implementation.

mod api;
mod error;
mod simulated;

pub use api::{PurchaseApi, PurchaseReceipt, PurchaseRequest};
pub use error::PurchaseError;
pub use simulated::SimulatedCheckout;

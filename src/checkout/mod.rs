//! The two checkout forms: delivery details, then card payment.

mod delivery;
mod error;
mod fields;
mod payment;

pub use delivery::{DeliveryFormController, DeliveryOutcome};
pub use error::CheckoutError;
pub use fields::{DeliveryField, PaymentField, delivery_schema, payment_schema};
pub use payment::{PaymentFormController, PaymentOutcome};

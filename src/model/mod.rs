mod cart;
mod delivery;
mod expiry;
mod payment;
mod validation;

pub use cart::{Product, ProductLine, cart_total, format_price};
pub use delivery::{Address, Contact, DeliveryRecord, InlineCard};
pub use expiry::{
    Clock, FixedClock, SystemClock, YearMonth, validate_not_expired, validate_year_not_past,
};
pub use payment::{Card, Expires, PaymentRecord};
pub use validation::{
    FieldError, card_digits, parse_expiry, validate_card_number, validate_cvv, validate_email,
    validate_house_number, validate_min_len, validate_month, validate_phone,
    validate_postal_code, validate_required, validate_year,
};

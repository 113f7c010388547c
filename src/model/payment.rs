use serde::{Deserialize, Serialize};

/// Card payment for an order.
///
/// Built by the payment form only after every field passes validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub number: String,
    pub code: u16,
    pub expires: Expires,
}

/// Card expiry as typed on the card: month `1..=12`, two-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expires {
    pub month: u8,
    pub year: u8,
}

impl Expires {
    /// Formats as `MM/YY`.
    pub fn to_mm_yy(self) -> String {
        format!("{:02}/{:02}", self.month, self.year)
    }
}

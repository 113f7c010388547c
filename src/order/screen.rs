use std::fmt;
use std::str::FromStr;

/// All screens of the checkout sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    /// Items in the cart and their total.
    #[default]
    Cart,
    /// Receiver and delivery address.
    AddressForm,
    /// Card payment.
    CardForm,
    /// Purchase completed; shows the order id.
    OrderConfirmation,
}

/// Returned when parsing an unknown screen name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown screen: {0}")]
pub struct UnknownScreen(pub String);

impl Screen {
    /// Stable name shared with the order state.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::AddressForm => "address-form",
            Self::CardForm => "card-form",
            Self::OrderConfirmation => "order-confirmation",
        }
    }

    /// Human-readable title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cart => "Cart",
            Self::AddressForm => "Delivery",
            Self::CardForm => "Payment",
            Self::OrderConfirmation => "Order Placed",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Cart,
            Self::AddressForm,
            Self::CardForm,
            Self::OrderConfirmation,
        ]
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Screen {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|screen| screen.name() == s)
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}

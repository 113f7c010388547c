//! Actions returned by screen event handlers.

use crate::order::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// Form submissions that succeed move the order state to the next screen
/// themselves; these actions cover everything the screens cannot do alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Remove the cart item with the given product id.
    RemoveItem(u64),
    /// Delivery details were stored; prepare the card form.
    DeliveryAccepted,
    /// Start the payment submission in the background.
    PlaceOrder,
    /// Clear the finished order and start over.
    FinishOrder,
    /// Quit the application.
    Quit,
}

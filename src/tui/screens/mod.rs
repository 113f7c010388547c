//! TUI screen implementations.

pub mod address_form;
pub mod card_form;
pub mod cart;
pub mod confirmation;

pub use address_form::{AddressFormState, draw_address_form};
pub use card_form::{CardFormState, draw_card_form};
pub use cart::{CartState, draw_cart};
pub use confirmation::{draw_confirmation, handle_confirmation_key};

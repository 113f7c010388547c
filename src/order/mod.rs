//! Shared order state: the port the checkout controllers write to, and its
//! in-memory implementation.

mod memory;
mod port;
mod screen;

pub use memory::InMemoryOrderStore;
pub use port::OrderState;
pub use screen::{Screen, UnknownScreen};

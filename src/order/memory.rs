use std::cell::RefCell;

use tracing::debug;

use super::port::OrderState;
use super::screen::Screen;
use crate::model::{DeliveryRecord, PaymentRecord, Product, ProductLine};

#[derive(Debug, Clone, Default)]
struct OrderData {
    cart: Vec<Product>,
    delivery: Option<DeliveryRecord>,
    payment: Option<PaymentRecord>,
    screen: Screen,
    order_id: Option<String>,
}

/// In-process [`OrderState`] backing the terminal app.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    data: RefCell<OrderData>,
}

impl InMemoryOrderStore {
    /// Creates an empty store on the [`Screen::Cart`] screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose cart holds `items`.
    pub fn with_cart(items: Vec<Product>) -> Self {
        Self {
            data: RefCell::new(OrderData {
                cart: items,
                ..OrderData::default()
            }),
        }
    }

    pub fn add_item(&self, item: Product) {
        self.data.borrow_mut().cart.push(item);
    }

    /// Removes the first cart item with `id`, returning it.
    pub fn remove_item(&self, id: u64) -> Option<Product> {
        let mut data = self.data.borrow_mut();
        let index = data.cart.iter().position(|p| p.id == id)?;
        Some(data.cart.remove(index))
    }

    /// Clears the cart and every order record after a completed purchase,
    /// returning to the cart screen.
    pub fn finish_order(&self) {
        debug!("order finished, clearing cart");
        *self.data.borrow_mut() = OrderData::default();
    }
}

impl OrderState for InMemoryOrderStore {
    fn set_delivery(&self, delivery: DeliveryRecord) {
        self.data.borrow_mut().delivery = Some(delivery);
    }

    fn set_payment(&self, payment: PaymentRecord) {
        self.data.borrow_mut().payment = Some(payment);
    }

    fn change_screen(&self, screen: Screen) {
        debug!(screen = %screen, "screen changed");
        self.data.borrow_mut().screen = screen;
    }

    fn set_order_id(&self, order_id: String) {
        self.data.borrow_mut().order_id = Some(order_id);
    }

    fn cart_items(&self) -> Vec<Product> {
        self.data.borrow().cart.clone()
    }

    fn products(&self) -> Vec<ProductLine> {
        self.data.borrow().cart.iter().map(Product::line).collect()
    }

    fn delivery(&self) -> Option<DeliveryRecord> {
        self.data.borrow().delivery.clone()
    }

    fn payment(&self) -> Option<PaymentRecord> {
        self.data.borrow().payment.clone()
    }

    fn screen(&self) -> Screen {
        self.data.borrow().screen
    }

    fn order_id(&self) -> Option<String> {
        self.data.borrow().order_id.clone()
    }
}

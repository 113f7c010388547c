use crate::model::{DeliveryRecord, PaymentRecord, Product, ProductLine};

use super::screen::Screen;

/// Shared order state the checkout controllers read from and write to.
///
/// Methods take `&self`: implementations are single-threaded and use
/// interior mutability. Controllers hold the port behind an `Rc`.
pub trait OrderState {
    fn set_delivery(&self, delivery: DeliveryRecord);
    fn set_payment(&self, payment: PaymentRecord);
    fn change_screen(&self, screen: Screen);
    /// Stores the order id returned by a successful purchase.
    fn set_order_id(&self, order_id: String);

    fn cart_items(&self) -> Vec<Product>;
    /// Products as sent with a purchase request.
    fn products(&self) -> Vec<ProductLine>;
    fn delivery(&self) -> Option<DeliveryRecord>;
    fn payment(&self) -> Option<PaymentRecord>;
    fn screen(&self) -> Screen;
    fn order_id(&self) -> Option<String>;
}

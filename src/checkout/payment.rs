//! Card payment form controller and the purchase submission.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::error::CheckoutError;
use super::fields::{PaymentField, payment_schema};
use crate::config::CheckoutConfig;
use crate::form::{FieldId, FocusTarget, FormController, SubmissionGuard, SubmitOutcome};
use crate::model::{
    Card, Clock, Expires, FieldError, PaymentRecord, cart_total, validate_cvv, validate_month,
    validate_year,
};
use crate::order::{OrderState, Screen};
use crate::purchase::{PurchaseApi, PurchaseRequest};

/// Outcome of [`PaymentFormController::submit`]; carries the order id on success.
pub type PaymentOutcome = SubmitOutcome<PaymentField, String>;

/// Drives the card form and places the order through a [`PurchaseApi`].
pub struct PaymentFormController<S, P> {
    form: RefCell<FormController<PaymentField>>,
    guard: SubmissionGuard,
    store: Rc<S>,
    api: Rc<P>,
    config: CheckoutConfig,
}

impl<S: OrderState, P: PurchaseApi> PaymentFormController<S, P> {
    pub fn new(config: CheckoutConfig, store: Rc<S>, api: Rc<P>, clock: Rc<dyn Clock>) -> Self {
        Self {
            form: RefCell::new(FormController::new(
                payment_schema(config.rules),
                config.mode,
                clock,
            )),
            guard: SubmissionGuard::new(),
            store,
            api,
            config,
        }
    }

    /// Routes focus requests from failed submits to `target`.
    pub fn with_focus_target(self, target: impl FocusTarget<PaymentField> + 'static) -> Self {
        self.form.borrow_mut().set_focus_target(Box::new(target));
        self
    }

    pub fn form(&self) -> Ref<'_, FormController<PaymentField>> {
        self.form.borrow()
    }

    /// Returns `true` from the start of a submit until its purchase call settles.
    pub fn is_submitting(&self) -> bool {
        self.guard.is_held()
    }

    /// Cart total in cents.
    pub fn amount_due(&self) -> u64 {
        cart_total(&self.store.cart_items())
    }

    pub fn update_field(&self, field: PaymentField, value: impl Into<String>) {
        self.form.borrow_mut().update_field(field, value);
    }

    pub fn blur_field(&self, field: PaymentField) {
        self.form.borrow_mut().blur_field(field);
    }

    pub fn reset(&self) {
        self.form.borrow_mut().reset();
    }

    /// Copies the card captured on the delivery form, if any, into the card
    /// fields. Returns `true` if anything was copied.
    ///
    /// The stored CVV is numeric, so it is padded back to three digits; a
    /// four-digit code with a leading zero (`0123`) comes back as `123`.
    pub fn prefill_from_delivery(&self) -> bool {
        let Some(delivery) = self.store.delivery() else {
            return false;
        };
        let Some(card) = delivery.card else {
            return false;
        };
        let mut form = self.form.borrow_mut();
        form.update_field(PaymentField::HolderName, delivery.receiver);
        form.update_field(PaymentField::CardNumber, card.number);
        form.update_field(PaymentField::Cvv, format!("{:03}", card.code));
        form.update_field(
            PaymentField::ExpiryMonth,
            format!("{:02}", card.expires.month),
        );
        form.update_field(PaymentField::ExpiryYear, format!("{:02}", card.expires.year));
        debug!("card fields prefilled from delivery");
        true
    }

    /// Validates the card, stores it, and places the order.
    ///
    /// The guard stays held until the purchase call settles, so a second
    /// submit in the meantime returns [`SubmitOutcome::Busy`] without calling
    /// the API. On success the order id is stored and the confirmation screen
    /// shown. Purchase failures are returned unchanged with no screen change.
    pub async fn submit(&self) -> Result<PaymentOutcome, CheckoutError> {
        let Some(_permit) = self.guard.try_acquire() else {
            debug!("payment submit ignored, another is in flight");
            return Ok(SubmitOutcome::Busy);
        };

        let payment = {
            let mut form = self.form.borrow_mut();
            if let Err(first_error) = form.validate_for_submit() {
                debug!(field = first_error.name(), "payment form invalid");
                return Ok(SubmitOutcome::Invalid { first_error });
            }
            match build_record(&form, self.config) {
                Ok(payment) => payment,
                Err((field, error)) => {
                    form.set_error(field, error);
                    return Ok(SubmitOutcome::Invalid { first_error: field });
                }
            }
        };

        let Some(delivery) = self.store.delivery() else {
            warn!("payment submitted without delivery details");
            return Err(CheckoutError::MissingDelivery);
        };
        self.store.set_payment(payment.clone());

        let request = PurchaseRequest {
            products: self.store.products(),
            delivery,
            payment,
        };
        let receipt = match self.api.purchase(request).await {
            Ok(receipt) => receipt,
            Err(error) => {
                warn!(%error, "purchase failed");
                return Err(error.into());
            }
        };

        info!(order_id = %receipt.order_id, "order placed");
        self.store.set_order_id(receipt.order_id.clone());
        self.store.change_screen(Screen::OrderConfirmation);
        Ok(SubmitOutcome::Submitted(receipt.order_id))
    }
}

fn build_record(
    form: &FormController<PaymentField>,
    config: CheckoutConfig,
) -> Result<PaymentRecord, (PaymentField, FieldError)> {
    let code = validate_cvv(form.value(PaymentField::Cvv), config.rules)
        .map_err(|e| (PaymentField::Cvv, e))?;
    let month = validate_month(form.value(PaymentField::ExpiryMonth))
        .map_err(|e| (PaymentField::ExpiryMonth, e))?;
    let year = validate_year(form.value(PaymentField::ExpiryYear))
        .map_err(|e| (PaymentField::ExpiryYear, e))?;
    Ok(PaymentRecord {
        card: Card {
            name: form.value(PaymentField::HolderName).to_string(),
            number: form.value(PaymentField::CardNumber).to_string(),
            code,
            expires: Expires { month, year },
        },
    })
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use futures::FutureExt;
    use futures::future::LocalBoxFuture;

    use super::*;
    use crate::config::{RuleSet, ValidationMode};
    use crate::form::FocusRequest;
    use crate::model::{Address, DeliveryRecord, FixedClock, InlineCard, Product, YearMonth};
    use crate::order::testing::{RecordingStore, StoreWrite};
    use crate::purchase::{PurchaseError, PurchaseReceipt};

    /// Answers purchases from a script, yielding once before each answer.
    #[derive(Default)]
    struct ScriptedPurchase {
        answers: RefCell<VecDeque<Result<String, (u16, String)>>>,
        requests: RefCell<Vec<PurchaseRequest>>,
        calls: Cell<usize>,
    }

    impl ScriptedPurchase {
        fn answering(answers: Vec<Result<&str, (u16, &str)>>) -> Self {
            let answers = answers
                .into_iter()
                .map(|a| {
                    a.map(str::to_string)
                        .map_err(|(status, msg)| (status, msg.to_string()))
                })
                .collect();
            Self {
                answers: RefCell::new(answers),
                ..Self::default()
            }
        }
    }

    impl PurchaseApi for ScriptedPurchase {
        fn purchase(
            &self,
            request: PurchaseRequest,
        ) -> LocalBoxFuture<'_, Result<PurchaseReceipt, PurchaseError>> {
            async move {
                self.calls.set(self.calls.get() + 1);
                self.requests.borrow_mut().push(request);
                tokio::task::yield_now().await;
                let answer = self.answers.borrow_mut().pop_front();
                match answer {
                    Some(Ok(order_id)) => Ok(PurchaseReceipt { order_id }),
                    Some(Err((status, message))) => {
                        Err(PurchaseError::Rejected { status, message })
                    }
                    None => Err(PurchaseError::Network("no scripted answer".into())),
                }
            }
            .boxed_local()
        }
    }

    type Controller = PaymentFormController<RecordingStore, ScriptedPurchase>;

    fn delivery(card: Option<InlineCard>) -> DeliveryRecord {
        DeliveryRecord {
            receiver: "Maria Silva".into(),
            address: Address {
                description: "Rua das Flores".into(),
                city: "Curitiba".into(),
                number: 12,
                zip_code: "80010-000".into(),
                complement: None,
            },
            contact: None,
            card,
        }
    }

    fn setup(
        answers: Vec<Result<&str, (u16, &str)>>,
        with_delivery: bool,
    ) -> (Rc<RecordingStore>, Rc<ScriptedPurchase>, Controller) {
        let store = Rc::new(RecordingStore::with_cart(vec![
            Product::new(1, "Cafeteira", 15990),
            Product::new(2, "Filtro", 1250),
        ]));
        if with_delivery {
            store.set_delivery(delivery(None));
        }
        let api = Rc::new(ScriptedPurchase::answering(answers));
        let clock = Rc::new(FixedClock(YearMonth::new(2024, 3).unwrap()));
        let config = CheckoutConfig {
            rules: RuleSet::Relaxed,
            mode: ValidationMode::OnChange,
            delivery: Default::default(),
        };
        let controller =
            PaymentFormController::new(config, Rc::clone(&store), Rc::clone(&api), clock);
        (store, api, controller)
    }

    fn fill_card(controller: &Controller) {
        controller.update_field(PaymentField::HolderName, "Maria Silva");
        controller.update_field(PaymentField::CardNumber, "4111111111111111");
        controller.update_field(PaymentField::Cvv, "123");
        controller.update_field(PaymentField::ExpiryMonth, "04");
        controller.update_field(PaymentField::ExpiryYear, "27");
    }

    fn payment_writes(store: &RecordingStore) -> Vec<StoreWrite> {
        store
            .writes()
            .into_iter()
            .filter(|w| !matches!(w, StoreWrite::Delivery(_)))
            .collect()
    }

    mod success {
        use super::*;

        #[tokio::test]
        async fn stores_order_id_then_shows_confirmation() {
            let (store, api, controller) = setup(vec![Ok("abc123")], true);
            fill_card(&controller);

            let outcome = controller.submit().await.unwrap();

            assert_eq!(outcome, SubmitOutcome::Submitted("abc123".into()));
            let writes = payment_writes(&store);
            assert!(matches!(writes[0], StoreWrite::Payment(_)));
            assert_eq!(
                writes[1..],
                [
                    StoreWrite::OrderId("abc123".into()),
                    StoreWrite::Screen(Screen::OrderConfirmation)
                ]
            );
            assert_eq!(store.order_id().as_deref(), Some("abc123"));
            assert_eq!(store.screen(), Screen::OrderConfirmation);
            assert_eq!(api.calls.get(), 1);
            assert!(!controller.is_submitting());
        }

        #[tokio::test]
        async fn request_carries_cart_delivery_and_payment() {
            let (store, api, controller) = setup(vec![Ok("abc123")], true);
            fill_card(&controller);
            controller.submit().await.unwrap();

            let requests = api.requests.borrow();
            let request = &requests[0];
            assert_eq!(request.products, store.products());
            assert_eq!(request.delivery, delivery(None));
            assert_eq!(
                request.payment.card,
                Card {
                    name: "Maria Silva".into(),
                    number: "4111111111111111".into(),
                    code: 123,
                    expires: Expires { month: 4, year: 27 },
                }
            );
            assert_eq!(store.payment(), Some(request.payment.clone()));
        }

        #[test]
        fn amount_due_sums_cart() {
            let (_store, _api, controller) = setup(vec![], true);
            assert_eq!(controller.amount_due(), 17240);
        }
    }

    mod in_flight {
        use super::*;

        #[tokio::test]
        async fn concurrent_submits_call_api_once() {
            let (_store, api, controller) = setup(vec![Ok("abc123"), Ok("def456")], true);
            fill_card(&controller);

            let (first, second) = tokio::join!(controller.submit(), controller.submit());

            assert_eq!(first.unwrap(), SubmitOutcome::Submitted("abc123".into()));
            assert_eq!(second.unwrap(), SubmitOutcome::Busy);
            assert_eq!(api.calls.get(), 1);
        }

        #[tokio::test]
        async fn submitting_while_pending() {
            let (_store, _api, controller) = setup(vec![Ok("abc123")], true);
            fill_card(&controller);
            assert!(!controller.is_submitting());

            let (result, during) =
                tokio::join!(controller.submit(), async { controller.is_submitting() });

            assert!(result.is_ok());
            assert!(during);
            assert!(!controller.is_submitting());
        }
    }

    mod failure {
        use super::*;

        #[tokio::test]
        async fn rejection_passes_through_and_releases_guard() {
            let (store, api, controller) =
                setup(vec![Err((402, "card declined")), Ok("abc123")], true);
            fill_card(&controller);

            let err = controller.submit().await.unwrap_err();
            assert!(matches!(
                err,
                CheckoutError::Purchase(PurchaseError::Rejected { status: 402, ref message })
                    if message == "card declined"
            ));
            assert_eq!(err.to_string(), "purchase rejected (402): card declined");
            assert!(!controller.is_submitting());
            assert_eq!(store.screen(), Screen::Cart);
            assert_eq!(store.order_id(), None);

            let retry = controller.submit().await.unwrap();
            assert_eq!(retry, SubmitOutcome::Submitted("abc123".into()));
            assert_eq!(api.calls.get(), 2);
        }

        #[tokio::test]
        async fn missing_delivery_is_an_error() {
            let (store, api, controller) = setup(vec![Ok("abc123")], false);
            fill_card(&controller);

            let err = controller.submit().await.unwrap_err();

            assert!(matches!(err, CheckoutError::MissingDelivery));
            assert!(store.writes().is_empty());
            assert_eq!(api.calls.get(), 0);
            assert!(!controller.is_submitting());
        }

        #[tokio::test]
        async fn invalid_form_never_calls_api() {
            let request = FocusRequest::new();
            let (store, api, controller) = setup(vec![Ok("abc123")], true);
            let controller = controller.with_focus_target(request.clone());
            controller.update_field(PaymentField::HolderName, "Maria Silva");

            let outcome = controller.submit().await.unwrap();

            assert_eq!(
                outcome,
                SubmitOutcome::Invalid {
                    first_error: PaymentField::CardNumber
                }
            );
            assert_eq!(request.take(), Some(PaymentField::CardNumber));
            assert!(payment_writes(&store).is_empty());
            assert_eq!(api.calls.get(), 0);
        }
    }

    mod expiry {
        use super::*;

        fn controller_at(year: i32, month: u32) -> Controller {
            let store = Rc::new(RecordingStore::default());
            let api = Rc::new(ScriptedPurchase::default());
            let clock = Rc::new(FixedClock(YearMonth::new(year, month).unwrap()));
            PaymentFormController::new(CheckoutConfig::default(), store, api, clock)
        }

        fn year_error(controller: &Controller) -> Option<FieldError> {
            controller
                .form()
                .field(PaymentField::ExpiryYear)
                .and_then(|s| s.error().cloned())
        }

        #[test]
        fn past_month_is_expired() {
            let controller = controller_at(2024, 3);
            controller.update_field(PaymentField::ExpiryYear, "24");
            controller.update_field(PaymentField::ExpiryMonth, "01");
            assert_eq!(year_error(&controller), Some(FieldError::Expired));
        }

        #[test]
        fn current_month_is_valid() {
            let controller = controller_at(2024, 1);
            controller.update_field(PaymentField::ExpiryYear, "24");
            controller.update_field(PaymentField::ExpiryMonth, "01");
            assert_eq!(year_error(&controller), None);
        }

        #[test]
        fn fixing_month_clears_year_error() {
            let controller = controller_at(2024, 3);
            controller.update_field(PaymentField::ExpiryMonth, "01");
            controller.update_field(PaymentField::ExpiryYear, "24");
            assert_eq!(year_error(&controller), Some(FieldError::Expired));
            controller.update_field(PaymentField::ExpiryMonth, "05");
            assert_eq!(year_error(&controller), None);
        }
    }

    mod prefill {
        use super::*;

        #[test]
        fn copies_inline_card() {
            let (store, _api, controller) = setup(vec![], false);
            store.set_delivery(delivery(Some(InlineCard {
                number: "4111111111111111".into(),
                code: 42,
                expires: Expires { month: 4, year: 27 },
            })));

            assert!(controller.prefill_from_delivery());

            let form = controller.form();
            assert_eq!(form.value(PaymentField::HolderName), "Maria Silva");
            assert_eq!(form.value(PaymentField::CardNumber), "4111111111111111");
            assert_eq!(form.value(PaymentField::Cvv), "042");
            assert_eq!(form.value(PaymentField::ExpiryMonth), "04");
            assert_eq!(form.value(PaymentField::ExpiryYear), "27");
            assert!(!form.has_errors());
        }

        #[test]
        fn four_digit_cvv_loses_leading_zero() {
            let (store, _api, controller) = setup(vec![], false);
            store.set_delivery(delivery(Some(InlineCard {
                number: "4111111111111111".into(),
                code: 123,
                expires: Expires { month: 4, year: 27 },
            })));
            let stored = crate::model::validate_cvv("0123", RuleSet::Relaxed).unwrap();
            assert_eq!(stored, 123);

            assert!(controller.prefill_from_delivery());
            assert_eq!(controller.form().value(PaymentField::Cvv), "123");

            store.set_delivery(delivery(Some(InlineCard {
                number: "4111111111111111".into(),
                code: 4321,
                expires: Expires { month: 4, year: 27 },
            })));
            assert!(controller.prefill_from_delivery());
            assert_eq!(controller.form().value(PaymentField::Cvv), "4321");
        }

        #[test]
        fn nothing_to_copy_without_inline_card() {
            let (_store, _api, controller) = setup(vec![], true);
            assert!(!controller.prefill_from_delivery());
            assert_eq!(controller.form().value(PaymentField::HolderName), "");
        }
    }
}

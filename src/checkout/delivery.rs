//! Delivery form controller: receiver, address, and (extended) contact and
//! inline card details.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::{debug, info};

use super::fields::{DeliveryField, INLINE_CARD_RULES, delivery_schema};
use crate::config::{CheckoutConfig, DeliveryVariant};
use crate::form::{FieldId, FocusTarget, FormController, SubmissionGuard, SubmitOutcome};
use crate::model::{
    Address, Clock, Contact, DeliveryRecord, Expires, FieldError, InlineCard, parse_expiry,
    validate_cvv, validate_house_number,
};
use crate::order::{OrderState, Screen};

/// Outcome of [`DeliveryFormController::submit`].
pub type DeliveryOutcome = SubmitOutcome<DeliveryField, DeliveryRecord>;

/// Drives the delivery form and hands a [`DeliveryRecord`] to the order state.
pub struct DeliveryFormController<S> {
    form: RefCell<FormController<DeliveryField>>,
    guard: SubmissionGuard,
    store: Rc<S>,
    config: CheckoutConfig,
}

impl<S: OrderState> DeliveryFormController<S> {
    /// Creates a controller with empty fields for the configured variant.
    pub fn new(config: CheckoutConfig, store: Rc<S>, clock: Rc<dyn Clock>) -> Self {
        let schema = delivery_schema(config.rules, config.delivery);
        Self {
            form: RefCell::new(FormController::new(schema, config.mode, clock)),
            guard: SubmissionGuard::new(),
            store,
            config,
        }
    }

    /// Routes focus requests from failed submits to `target`.
    pub fn with_focus_target(self, target: impl FocusTarget<DeliveryField> + 'static) -> Self {
        self.form.borrow_mut().set_focus_target(Box::new(target));
        self
    }

    pub fn variant(&self) -> DeliveryVariant {
        self.config.delivery
    }

    /// Read access to the field states for rendering.
    pub fn form(&self) -> Ref<'_, FormController<DeliveryField>> {
        self.form.borrow()
    }

    /// Returns `true` while a submission holds the guard.
    pub fn is_submitting(&self) -> bool {
        self.guard.is_held()
    }

    pub fn update_field(&self, field: DeliveryField, value: impl Into<String>) {
        self.form.borrow_mut().update_field(field, value);
    }

    pub fn blur_field(&self, field: DeliveryField) {
        self.form.borrow_mut().blur_field(field);
    }

    /// Clears every field.
    pub fn reset(&self) {
        self.form.borrow_mut().reset();
    }

    /// Validates every field and, if all pass, stores the delivery record and
    /// moves on to the card form.
    ///
    /// On failure the first erroring field is focused and nothing is written.
    pub fn submit(&self) -> DeliveryOutcome {
        let Some(_permit) = self.guard.try_acquire() else {
            debug!("delivery submit ignored, another is in flight");
            return SubmitOutcome::Busy;
        };

        let record = {
            let mut form = self.form.borrow_mut();
            if let Err(first_error) = form.validate_for_submit() {
                debug!(field = first_error.name(), "delivery form invalid");
                return SubmitOutcome::Invalid { first_error };
            }
            match build_record(&form, self.config) {
                Ok(record) => record,
                Err((field, error)) => {
                    // Unreachable after validation, but keep the form consistent.
                    form.set_error(field, error);
                    return SubmitOutcome::Invalid { first_error: field };
                }
            }
        };

        info!(
            city = %record.address.city,
            extended = record.contact.is_some(),
            "delivery details accepted"
        );
        self.store.set_delivery(record.clone());
        self.store.change_screen(Screen::CardForm);
        SubmitOutcome::Submitted(record)
    }
}

fn build_record(
    form: &FormController<DeliveryField>,
    config: CheckoutConfig,
) -> Result<DeliveryRecord, (DeliveryField, FieldError)> {
    let number = validate_house_number(form.value(DeliveryField::Number))
        .map_err(|e| (DeliveryField::Number, e))?;
    let complement = form.value(DeliveryField::Complement);

    let (contact, card) = match config.delivery {
        DeliveryVariant::Basic => (None, None),
        DeliveryVariant::Extended => {
            let (month, year) = parse_expiry(form.value(DeliveryField::CardExpiry))
                .map_err(|e| (DeliveryField::CardExpiry, e))?;
            let code = validate_cvv(form.value(DeliveryField::CardCvv), INLINE_CARD_RULES)
                .map_err(|e| (DeliveryField::CardCvv, e))?;
            let contact = Contact {
                email: form.value(DeliveryField::Email).to_string(),
                phone: form.value(DeliveryField::Phone).to_string(),
            };
            let card = InlineCard {
                number: form.value(DeliveryField::CardNumber).to_string(),
                code,
                expires: Expires { month, year },
            };
            (Some(contact), Some(card))
        }
    };

    Ok(DeliveryRecord {
        receiver: form.value(DeliveryField::ReceiverName).to_string(),
        address: Address {
            description: form.value(DeliveryField::Address).to_string(),
            city: form.value(DeliveryField::City).to_string(),
            number,
            zip_code: form.value(DeliveryField::PostalCode).to_string(),
            complement: (!complement.is_empty()).then(|| complement.to_string()),
        },
        contact,
        card,
    })
}

//! Field sets and rule tables for the delivery and payment forms.

use crate::config::{DeliveryVariant, RuleSet};
use crate::form::{FieldId, Rule, Schema, check, rule};
use crate::model::{
    FieldError, YearMonth, parse_expiry, validate_card_number, validate_cvv, validate_email,
    validate_house_number, validate_min_len, validate_month, validate_not_expired,
    validate_phone, validate_postal_code, validate_required, validate_year,
    validate_year_not_past,
};

/// Inputs of the delivery form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeliveryField {
    ReceiverName,
    Address,
    City,
    PostalCode,
    Number,
    Complement,
    Email,
    Phone,
    CardNumber,
    CardExpiry,
    CardCvv,
}

impl FieldId for DeliveryField {
    fn all() -> &'static [Self] {
        &[
            Self::ReceiverName,
            Self::Address,
            Self::City,
            Self::PostalCode,
            Self::Number,
            Self::Complement,
            Self::Email,
            Self::Phone,
            Self::CardNumber,
            Self::CardExpiry,
            Self::CardCvv,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            Self::ReceiverName => "receiver_name",
            Self::Address => "address",
            Self::City => "city",
            Self::PostalCode => "postal_code",
            Self::Number => "number",
            Self::Complement => "complement",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CardNumber => "card_number",
            Self::CardExpiry => "card_expiry",
            Self::CardCvv => "card_cvv",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ReceiverName => "Receiver",
            Self::Address => "Address",
            Self::City => "City",
            Self::PostalCode => "Postal Code (99999-999)",
            Self::Number => "Number",
            Self::Complement => "Complement (optional)",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::CardNumber => "Card Number",
            Self::CardExpiry => "Expiry (MM/YY)",
            Self::CardCvv => "CVV",
        }
    }

    fn required(self) -> bool {
        self != Self::Complement
    }
}

/// Inputs of the card payment form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentField {
    HolderName,
    CardNumber,
    Cvv,
    ExpiryMonth,
    ExpiryYear,
}

impl FieldId for PaymentField {
    fn all() -> &'static [Self] {
        &[
            Self::HolderName,
            Self::CardNumber,
            Self::Cvv,
            Self::ExpiryMonth,
            Self::ExpiryYear,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            Self::HolderName => "holder_name",
            Self::CardNumber => "card_number",
            Self::Cvv => "cvv",
            Self::ExpiryMonth => "expiry_month",
            Self::ExpiryYear => "expiry_year",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::HolderName => "Name on Card",
            Self::CardNumber => "Card Number",
            Self::Cvv => "CVV",
            Self::ExpiryMonth => "Expiry Month (MM)",
            Self::ExpiryYear => "Expiry Year (YY)",
        }
    }
}

fn required_min_len<F: FieldId>(min: usize) -> Vec<Rule<F>> {
    vec![
        check(validate_required),
        rule(move |value, _| validate_min_len(value, min)),
    ]
}

fn card_number_rules<F: FieldId>(rules: RuleSet) -> Vec<Rule<F>> {
    vec![
        check(validate_required),
        rule(move |value, _| validate_card_number(value, rules)),
    ]
}

fn cvv_rules<F: FieldId>(rules: RuleSet) -> Vec<Rule<F>> {
    vec![
        check(validate_required),
        rule(move |value, _| validate_cvv(value, rules).map(|_| ())),
    ]
}

/// The inline card on the extended delivery form always takes 13 to 19 digits
/// and a three- or four-digit CVV, whatever the configured [`RuleSet`].
pub(crate) const INLINE_CARD_RULES: RuleSet = RuleSet::Relaxed;

/// Rule table for the delivery form.
pub fn delivery_schema(rules: RuleSet, variant: DeliveryVariant) -> Schema<DeliveryField> {
    let schema = Schema::new()
        .field(DeliveryField::ReceiverName, required_min_len(5))
        .field(DeliveryField::Address, required_min_len(5))
        .field(DeliveryField::City, required_min_len(5))
        .field(
            DeliveryField::PostalCode,
            vec![
                check(validate_required),
                rule(move |value, _| validate_postal_code(value, rules)),
            ],
        )
        .field(
            DeliveryField::Number,
            vec![check(validate_required), check(validate_house_number)],
        )
        .field(DeliveryField::Complement, vec![]);

    match variant {
        DeliveryVariant::Basic => schema,
        DeliveryVariant::Extended => schema
            .field(
                DeliveryField::Email,
                vec![check(validate_required), check(validate_email)],
            )
            .field(
                DeliveryField::Phone,
                vec![check(validate_required), check(validate_phone)],
            )
            .field(
                DeliveryField::CardNumber,
                card_number_rules(INLINE_CARD_RULES),
            )
            .field(
                DeliveryField::CardExpiry,
                vec![
                    check(validate_required),
                    rule(|value, snapshot| {
                        let (month, year) = parse_expiry(value)?;
                        let expires =
                            YearMonth::from_card(year, month).ok_or(FieldError::InvalidExpiry)?;
                        validate_not_expired(expires, snapshot.today())
                    }),
                ],
            )
            .field(DeliveryField::CardCvv, cvv_rules(INLINE_CARD_RULES)),
    }
}

/// Rule table for the card payment form.
///
/// The expiry year rule reads the month: with a valid month the pair must not
/// be in the past; otherwise only the year is checked.
pub fn payment_schema(rules: RuleSet) -> Schema<PaymentField> {
    Schema::new()
        .field(PaymentField::HolderName, required_min_len(3))
        .field(PaymentField::CardNumber, card_number_rules(rules))
        .field(PaymentField::Cvv, cvv_rules(rules))
        .field(
            PaymentField::ExpiryMonth,
            vec![check(validate_required), check(validate_month)],
        )
        .field(
            PaymentField::ExpiryYear,
            vec![
                check(validate_required),
                rule(|value, snapshot| {
                    let year = validate_year(value)?;
                    match validate_month(snapshot.value(PaymentField::ExpiryMonth)) {
                        Ok(month) => {
                            let expires = YearMonth::from_card(year, month)
                                .ok_or(FieldError::InvalidMonth)?;
                            validate_not_expired(expires, snapshot.today())
                        }
                        Err(_) => validate_year_not_past(year, snapshot.today()),
                    }
                }),
            ],
        )
        .depends_on(PaymentField::ExpiryYear, PaymentField::ExpiryMonth)
}

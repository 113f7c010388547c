//! Checkout configuration: which rule generation, when to validate, and
//! which delivery form to show.

use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the [`RuleSet`].
pub const RULES_VAR: &str = "CHECKOUT_RULES";
/// Environment variable selecting the [`ValidationMode`].
pub const VALIDATE_VAR: &str = "CHECKOUT_VALIDATE";
/// Environment variable selecting the [`DeliveryVariant`].
pub const DELIVERY_VAR: &str = "CHECKOUT_DELIVERY";

/// Errors produced while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A configuration key held a value outside its allowed set.
    #[error("invalid value {value:?} for {key} (expected one of: {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Generation of field rules.
///
/// `Strict` is the earliest generation: CEP hyphen required, card number in
/// four groups of four, three-digit CVV. `Relaxed` makes the CEP hyphen
/// optional, accepts 13 to 19 card digits and a three- or four-digit CVV.
/// Card rules only apply to the payment form; the inline card on the
/// extended delivery form always uses the `Relaxed` card checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuleSet {
    Strict,
    #[default]
    Relaxed,
}

/// When edits are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationMode {
    /// Revalidate a field on every change.
    #[default]
    OnChange,
    /// Clear a field's error on change and validate it on blur.
    OnBlur,
}

/// Which fields the delivery form collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeliveryVariant {
    /// Receiver and address only.
    #[default]
    Basic,
    /// Adds email, phone, and inline card capture.
    Extended,
}

macro_rules! config_enum_names {
    ($ty:ident, $key:expr, $expected:expr, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(ConfigError::InvalidValue {
                        key: $key,
                        value: s.to_string(),
                        expected: $expected,
                    }),
                }
            }
        }
    };
}

config_enum_names!(RuleSet, RULES_VAR, "strict, relaxed", {
    Strict => "strict",
    Relaxed => "relaxed",
});

config_enum_names!(ValidationMode, VALIDATE_VAR, "change, blur", {
    OnChange => "change",
    OnBlur => "blur",
});

config_enum_names!(DeliveryVariant, DELIVERY_VAR, "basic, extended", {
    Basic => "basic",
    Extended => "extended",
});

/// Settings shared by both checkout forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckoutConfig {
    pub rules: RuleSet,
    pub mode: ValidationMode,
    pub delivery: DeliveryVariant,
}

impl CheckoutConfig {
    /// Reads configuration from the process environment. Unset keys keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(RULES_VAR) {
            config.rules = value.parse()?;
        }
        if let Some(value) = lookup(VALIDATE_VAR) {
            config.mode = value.parse()?;
        }
        if let Some(value) = lookup(DELIVERY_VAR) {
            config.delivery = value.parse()?;
        }
        Ok(config)
    }
}

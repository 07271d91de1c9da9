//! Checkout Data Model
//!
//! Field identities, per-field flags, the submission outcome, and the
//! payment values passed between the collaborators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tracked checkout field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    CardNumber,
    CardExpiry,
    CardCvc,
    Email,
}

impl Field {
    /// Every tracked field, in display order
    pub const ALL: [Self; 4] = [Self::CardNumber, Self::CardExpiry, Self::CardCvc, Self::Email];

    /// The hosted card widgets, without email
    pub const CARD: [Self; 3] = [Self::CardNumber, Self::CardExpiry, Self::CardCvc];

    /// Wire name, matching the payment SDK's `elementType`
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CardNumber => "cardNumber",
            Self::CardExpiry => "cardExpiry",
            Self::CardCvc => "cardCvc",
            Self::Email => "email",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "cardNumber" => Ok(Self::CardNumber),
            "cardExpiry" => Ok(Self::CardExpiry),
            "cardCvc" => Ok(Self::CardCvc),
            "email" => Ok(Self::Email),
            other => Err(format!("unknown field: {other}")),
        }
    }
}

/// One boolean per tracked field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFlags {
    pub card_number: bool,
    pub card_expiry: bool,
    pub card_cvc: bool,
    pub email: bool,
}

impl FieldFlags {
    pub const fn get(&self, field: Field) -> bool {
        match field {
            Field::CardNumber => self.card_number,
            Field::CardExpiry => self.card_expiry,
            Field::CardCvc => self.card_cvc,
            Field::Email => self.email,
        }
    }

    /// Set a flag, returning whether it changed
    pub fn set(&mut self, field: Field, value: bool) -> bool {
        let slot = match field {
            Field::CardNumber => &mut self.card_number,
            Field::CardExpiry => &mut self.card_expiry,
            Field::CardCvc => &mut self.card_cvc,
            Field::Email => &mut self.email,
        };
        std::mem::replace(slot, value) != value
    }

    pub const fn all(&self) -> bool {
        self.card_number && self.card_expiry && self.card_cvc && self.email
    }
}

/// Per-field "holds a valid value" flags
pub type FieldCompletion = FieldFlags;

/// Per-field "currently focused" flags (presentational only)
pub type FocusState = FieldFlags;

/// Where the current checkout attempt stands
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed(String),
}

impl SubmissionOutcome {
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Error message of a failed attempt
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// Raw email input plus its derived validity
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    raw: String,
    valid: bool,
}

impl EmailAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let valid = crate::email::is_valid_email(&raw);
        Self { raw, valid }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Snapshot rendered by the presentation layer
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutState {
    pub email: EmailAddress,
    pub completion: FieldCompletion,
    pub focus: FocusState,
    pub outcome: SubmissionOutcome,
}

impl CheckoutState {
    /// All four fields complete
    pub const fn is_form_valid(&self) -> bool {
        self.completion.all()
    }

    /// Whether the submit control should be enabled
    pub const fn can_submit(&self) -> bool {
        self.is_form_valid() && !self.outcome.is_in_flight()
    }
}

/// Opaque payment-method token produced by the payment SDK
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
}

impl PaymentMethod {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Client secret of a server-issued payment intent
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClientSecret(..)")
    }
}

/// Payment intent status as reported by the confirm step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntentStatus {
    Succeeded,
    Processing,
    RequiresAction,
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresCapture,
    Canceled,
    Other(String),
}

impl IntentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Processing => "processing",
            Self::RequiresAction => "requires_action",
            Self::RequiresPaymentMethod => "requires_payment_method",
            Self::RequiresConfirmation => "requires_confirmation",
            Self::RequiresCapture => "requires_capture",
            Self::Canceled => "canceled",
            Self::Other(s) => s,
        }
    }

    /// Message shown when a confirmation ends in this non-succeeded status
    pub fn failure_message(&self) -> String {
        match self {
            Self::Succeeded => String::new(),
            Self::Processing => {
                "Your payment is still processing. Please check back before trying again.".into()
            }
            Self::RequiresAction => {
                "Additional authentication is required to complete this payment.".into()
            }
            Self::RequiresPaymentMethod => {
                "Your payment method was declined. Please try another card.".into()
            }
            Self::Canceled => "The payment was canceled.".into(),
            other => format!("The payment did not complete (status: {}).", other.as_str()),
        }
    }
}

impl From<String> for IntentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "succeeded" => Self::Succeeded,
            "processing" => Self::Processing,
            "requires_action" => Self::RequiresAction,
            "requires_payment_method" => Self::RequiresPaymentMethod,
            "requires_confirmation" => Self::RequiresConfirmation,
            "requires_capture" => Self::RequiresCapture,
            "canceled" => Self::Canceled,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for IntentStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<IntentStatus> for String {
    fn from(status: IntentStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Result of confirming a payment intent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub status: IntentStatus,
}

impl PaymentIntent {
    pub fn new(status: impl Into<IntentStatus>) -> Self {
        Self { status: status.into() }
    }
}

/// Fixed order total, in minor currency units
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotal {
    pub label: String,
    pub amount: i64,
    pub currency: String,
}

impl OrderTotal {
    pub fn new(label: impl Into<String>, amount: i64, currency: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount,
            currency: currency.into().to_lowercase(),
        }
    }

    /// Major-unit amount (two decimal places)
    pub fn major_units(&self) -> Decimal {
        Decimal::new(self.amount, 2)
    }

    /// Human-readable amount, e.g. `$666.00`
    pub fn display(&self) -> String {
        let symbol = match self.currency.as_str() {
            "usd" | "cad" | "aud" => "$",
            "eur" => "€",
            "gbp" => "£",
            _ => "",
        };
        if symbol.is_empty() {
            format!("{:.2} {}", self.major_units(), self.currency.to_uppercase())
        } else {
            format!("{symbol}{:.2}", self.major_units())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
        assert!("iban".parse::<Field>().is_err());
    }

    #[test]
    fn test_flags_set_reports_change() {
        let mut flags = FieldFlags::default();
        assert!(flags.set(Field::CardCvc, true));
        assert!(!flags.set(Field::CardCvc, true));
        assert!(flags.get(Field::CardCvc));
        assert!(!flags.all());
    }

    #[test]
    fn test_intent_status_parsing() {
        assert_eq!(IntentStatus::from("succeeded"), IntentStatus::Succeeded);
        assert_eq!(IntentStatus::from("requires_action"), IntentStatus::RequiresAction);
        assert_eq!(
            IntentStatus::from("something_new"),
            IntentStatus::Other("something_new".into())
        );
        assert!(IntentStatus::from("weird").failure_message().contains("status: weird"));
    }

    #[test]
    fn test_total_display() {
        assert_eq!(OrderTotal::new("Total", 66600, "USD").display(), "$666.00");
        assert_eq!(OrderTotal::new("Total", 1, "usd").display(), "$0.01");
        assert_eq!(OrderTotal::new("Total", 1050, "sek").display(), "10.50 SEK");
    }

    #[test]
    fn test_client_secret_debug_is_redacted() {
        let secret = ClientSecret::new("pi_1_secret_abc");
        assert_eq!(format!("{secret:?}"), "ClientSecret(..)");
        assert_eq!(secret.expose(), "pi_1_secret_abc");
    }
}

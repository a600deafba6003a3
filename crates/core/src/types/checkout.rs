//! Checkout intent types.
//!
//! A checkout intent describes one requested payment attempt before the
//! external processor has confirmed it. Intents are created per submission
//! and never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payment method selected at checkout.
///
/// The serialized form is the payment collaborator's wire encoding:
/// `"card"`, `"upi"`, `"cod"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit/debit card, tokenized by the external payment-field widget.
    Card,
    /// UPI transfer, identified by the customer's UPI id.
    Upi,
    /// Cash on delivery.
    #[serde(rename = "cod")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// The wire encoding used by the payment collaborator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Upi => "upi",
            Self::CashOnDelivery => "cod",
        }
    }

    /// Human-readable label for UI display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::Upi => "UPI Payment",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a payment method from its wire encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method: {0}")]
pub struct ParsePaymentMethodError(String);

impl std::str::FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            "cod" | "cash_on_delivery" => Ok(Self::CashOnDelivery),
            other => Err(ParsePaymentMethodError(other.to_string())),
        }
    }
}

/// A validated request for one payment attempt.
///
/// Only `order_id`, `amount`, and `method` travel to the payment
/// collaborator; the auxiliary UPI id is kept for display and verification
/// flows but is not part of the initialize payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutIntent {
    /// Order the payment is for.
    pub order_id: String,
    /// Amount to collect; always positive.
    pub amount: Decimal,
    /// Selected payment method.
    pub method: PaymentMethod,
    /// Customer UPI id, present only when `method` is [`PaymentMethod::Upi`].
    pub upi_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_encoding() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Card).expect("serialize"),
            "\"card\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Upi).expect("serialize"),
            "\"upi\""
        );
        // Cash on delivery shortens to "cod" on the wire.
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).expect("serialize"),
            "\"cod\""
        );
    }

    #[test]
    fn test_payment_method_from_str() {
        assert_eq!("card".parse::<PaymentMethod>(), Ok(PaymentMethod::Card));
        assert_eq!("upi".parse::<PaymentMethod>(), Ok(PaymentMethod::Upi));
        assert_eq!(
            "cod".parse::<PaymentMethod>(),
            Ok(PaymentMethod::CashOnDelivery)
        );
        assert!("paypal".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_roundtrip() {
        for method in [
            PaymentMethod::Card,
            PaymentMethod::Upi,
            PaymentMethod::CashOnDelivery,
        ] {
            let json = serde_json::to_string(&method).expect("serialize");
            let back: PaymentMethod = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, method);
            assert_eq!(json, format!("\"{}\"", method.as_str()));
        }
    }
}

//! Checkout intent submission.
//!
//! A submission attempt moves through a small state machine:
//!
//! ```text
//! Idle -> Validating -> Failed            (method preconditions not met)
//!                    -> Submitting -> Failed     (collaborator error)
//!                                  -> Succeeded  (navigate to order success)
//! ```
//!
//! Exactly one submission may be in flight per order. A second submit while
//! one is being processed is rejected before any collaborator call: duplicate
//! intents could create duplicate payment attempts, so the guard lives here
//! and not in a disabled submit button.
//!
//! Failures are terminal but recoverable: the user re-submits. There is no
//! automatic retry.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::watch;
use tracing::instrument;

use stark_core::{CheckoutIntent, PaymentMethod};

use crate::api::{ApiError, PaymentClient, PaymentReceipt};

/// Errors from a checkout submission.
///
/// Every variant is reported to the user in place; none are swallowed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A method precondition failed. User-fixable before re-submitting.
    #[error("{0}")]
    Validation(String),

    /// The payment collaborator declined the intent. The message is the
    /// collaborator's, verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The collaborator could not be reached or answered garbage. Transient;
    /// the user may re-submit.
    #[error("network error: {0}")]
    Network(String),

    /// Another submission for this order is already in flight.
    #[error("a payment for this order is already being processed")]
    InFlight,
}

impl From<ApiError> for CheckoutError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http(_) | ApiError::Parse(_) => Self::Network(err.to_string()),
            ApiError::Rejected(message) => Self::Rejected(message),
            ApiError::NotFound(_) => Self::Rejected(err.to_string()),
        }
    }
}

/// Observable state of the most recent submission attempt on this form.
///
/// The UI uses this to disable the submit control while an attempt is in
/// Validating or Submitting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// No attempt yet, or the previous one finished and was acknowledged.
    #[default]
    Idle,
    /// Checking method preconditions.
    Validating,
    /// Waiting on the payment collaborator.
    Submitting,
    /// Terminal: the collaborator accepted the intent.
    Succeeded { order_id: String },
    /// Terminal but recoverable by re-submitting.
    Failed { reason: String },
}

impl SubmissionState {
    /// Whether a submit trigger must be ignored right now.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }
}

/// Raw checkout form input, before validation.
#[derive(Debug, Clone)]
pub struct CheckoutSubmission {
    /// Order the payment is for.
    pub order_id: String,
    /// Amount shown to and confirmed by the customer.
    pub amount: Decimal,
    /// Selected payment method.
    pub method: PaymentMethod,
    /// UPI id entered by the customer (UPI method only).
    pub upi_id: Option<String>,
    /// Token minted by the external card-field widget (card method only).
    pub card_token: Option<String>,
}

impl CheckoutSubmission {
    /// Check method preconditions and produce a validated intent.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Validation`] with a user-facing reason when a
    /// precondition fails.
    pub fn validate(&self) -> Result<CheckoutIntent, CheckoutError> {
        if self.order_id.trim().is_empty() {
            return Err(CheckoutError::Validation("Missing order id".to_string()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(CheckoutError::Validation(
                "Payment amount must be greater than zero".to_string(),
            ));
        }

        let upi_id = match self.method {
            PaymentMethod::Card => {
                if self
                    .card_token
                    .as_deref()
                    .is_none_or(|token| token.trim().is_empty())
                {
                    return Err(CheckoutError::Validation(
                        "Card details are incomplete".to_string(),
                    ));
                }
                None
            }
            PaymentMethod::Upi => {
                let upi_id = self
                    .upi_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| {
                        CheckoutError::Validation("Please enter UPI ID".to_string())
                    })?;
                Some(upi_id.to_string())
            }
            PaymentMethod::CashOnDelivery => None,
        };

        Ok(CheckoutIntent {
            order_id: self.order_id.clone(),
            amount: self.amount,
            method: self.method,
            upi_id,
        })
    }
}

/// Submits checkout intents to the payment collaborator.
///
/// Cheaply cloneable; all clones share the in-flight set and the state
/// channel.
#[derive(Clone)]
pub struct CheckoutSubmitter {
    inner: Arc<CheckoutSubmitterInner>,
}

struct CheckoutSubmitterInner {
    payments: PaymentClient,
    in_flight: Mutex<HashSet<String>>,
    state_tx: watch::Sender<SubmissionState>,
}

impl CheckoutSubmitter {
    /// Create a submitter backed by the given payment client.
    #[must_use]
    pub fn new(payments: PaymentClient) -> Self {
        let (state_tx, _) = watch::channel(SubmissionState::Idle);
        Self {
            inner: Arc::new(CheckoutSubmitterInner {
                payments,
                in_flight: Mutex::new(HashSet::new()),
                state_tx,
            }),
        }
    }

    /// Subscribe to submission state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.inner.state_tx.subscribe()
    }

    /// Whether a submission for the given order is currently in flight.
    #[must_use]
    pub fn is_in_flight(&self, order_id: &str) -> bool {
        self.lock_in_flight().contains(order_id)
    }

    /// Run one submission attempt to completion.
    ///
    /// On success the caller performs the navigation side effect (redirect to
    /// the order-success view) and clears the cart.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InFlight`] when a submission for this order is
    ///   already being processed; the collaborator is not called
    /// - [`CheckoutError::Validation`] when method preconditions fail; the
    ///   collaborator is not called
    /// - [`CheckoutError::Rejected`] / [`CheckoutError::Network`] when the
    ///   collaborator call fails
    #[instrument(skip(self, submission), fields(order_id = %submission.order_id, method = %submission.method))]
    pub async fn submit(
        &self,
        submission: &CheckoutSubmission,
    ) -> Result<PaymentReceipt, CheckoutError> {
        let _guard = self.acquire(&submission.order_id)?;

        self.transition(SubmissionState::Validating);
        let intent = match submission.validate() {
            Ok(intent) => intent,
            Err(err) => {
                self.transition(SubmissionState::Failed {
                    reason: err.to_string(),
                });
                return Err(err);
            }
        };

        self.transition(SubmissionState::Submitting);
        match self.inner.payments.initialize_payment(&intent).await {
            Ok(receipt) => {
                self.transition(SubmissionState::Succeeded {
                    order_id: intent.order_id,
                });
                Ok(receipt)
            }
            Err(err) => {
                let err = CheckoutError::from(err);
                self.transition(SubmissionState::Failed {
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Reserve the order id, rejecting overlapping submissions.
    fn acquire(&self, order_id: &str) -> Result<InFlightGuard<'_>, CheckoutError> {
        let mut in_flight = self.lock_in_flight();
        if !in_flight.insert(order_id.to_string()) {
            return Err(CheckoutError::InFlight);
        }
        drop(in_flight);
        Ok(InFlightGuard {
            submitter: &self.inner,
            order_id: order_id.to_string(),
        })
    }

    fn transition(&self, state: SubmissionState) {
        tracing::debug!(state = ?state, "checkout submission state");
        self.inner.state_tx.send_replace(state);
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, HashSet<String>> {
        match self.inner.in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Releases the order's in-flight reservation when the attempt finishes,
/// whatever the outcome.
struct InFlightGuard<'a> {
    submitter: &'a CheckoutSubmitterInner,
    order_id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = match self.submitter.in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        in_flight.remove(&self.order_id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use rust_decimal::dec;

    use crate::config::ApiConfig;

    use super::*;

    fn submitter() -> CheckoutSubmitter {
        // Points at a closed port; validation failures never reach the wire.
        let api = ApiConfig::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        CheckoutSubmitter::new(PaymentClient::new(&api).unwrap())
    }

    fn submission(method: PaymentMethod) -> CheckoutSubmission {
        CheckoutSubmission {
            order_id: "order-1".to_string(),
            amount: dec!(25.00),
            method,
            upi_id: None,
            card_token: None,
        }
    }

    #[test]
    fn test_upi_requires_id() {
        let mut s = submission(PaymentMethod::Upi);
        let err = s.validate().unwrap_err();
        assert!(matches!(err, CheckoutError::Validation(_)));
        assert_eq!(err.to_string(), "Please enter UPI ID");

        s.upi_id = Some("   ".to_string());
        assert!(s.validate().is_err());

        s.upi_id = Some("user@bank".to_string());
        let intent = s.validate().unwrap();
        assert_eq!(intent.upi_id.as_deref(), Some("user@bank"));
    }

    #[test]
    fn test_card_requires_token() {
        let mut s = submission(PaymentMethod::Card);
        assert!(s.validate().is_err());

        s.card_token = Some("tok_visa".to_string());
        let intent = s.validate().unwrap();
        assert_eq!(intent.method, PaymentMethod::Card);
        assert_eq!(intent.upi_id, None);
    }

    #[test]
    fn test_cod_requires_nothing_extra() {
        let intent = submission(PaymentMethod::CashOnDelivery).validate().unwrap();
        assert_eq!(intent.method, PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn test_amount_must_be_positive() {
        let mut s = submission(PaymentMethod::CashOnDelivery);
        s.amount = Decimal::ZERO;
        assert!(matches!(
            s.validate().unwrap_err(),
            CheckoutError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_validation_failure_transitions_to_failed() {
        let submitter = submitter();
        let mut states = submitter.subscribe();

        let err = submitter
            .submit(&submission(PaymentMethod::Upi))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Validation(_)));
        assert_eq!(err.to_string(), "Please enter UPI ID");

        // Terminal state reports the reason; the in-flight slot is released.
        assert_eq!(
            *states.borrow_and_update(),
            SubmissionState::Failed {
                reason: "Please enter UPI ID".to_string()
            }
        );
        assert!(!submitter.is_in_flight("order-1"));
    }

    #[tokio::test]
    async fn test_second_submit_rejected_while_in_flight() {
        let submitter = submitter();

        // Hold the reservation as a concurrent attempt would.
        let _guard = submitter.acquire("order-1").unwrap();

        let err = submitter
            .submit(&submission(PaymentMethod::CashOnDelivery))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InFlight));
    }

    #[tokio::test]
    async fn test_reservation_released_after_drop() {
        let submitter = submitter();
        {
            let _guard = submitter.acquire("order-1").unwrap();
            assert!(submitter.is_in_flight("order-1"));
        }
        assert!(!submitter.is_in_flight("order-1"));
    }
}

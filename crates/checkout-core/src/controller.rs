//! Checkout Controller
//!
//! Single source of truth for the checkout form: field completion and focus,
//! the email input, and the outcome of the current submission. Drives the
//! ordered payment protocol:
//!
//! ```text
//! submit()
//!   │  guard: form valid && not in flight        → Rejected
//!   ├─ PaymentMethodProvider::create_payment_method  → Failed on error
//!   ├─ PaymentBackend::create_payment_intent         → Failed on error
//!   ├─ PaymentConfirmer::confirm_payment             → Failed on error
//!   └─ status == succeeded ? Succeeded : Failed
//! ```
//!
//! State is published through a `tokio::sync::watch` channel so the
//! presentation layer can re-render on every change.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{CheckoutState, EmailAddress, Field, IntentStatus, SubmissionOutcome};
use crate::provider::{
    FieldCompletionObserver, PaymentBackend, PaymentConfirmer, PaymentMethodProvider,
};

const INTERRUPTED_MESSAGE: &str = "The payment was interrupted. Please try again.";

/// Why a submission was not started
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// At least one field is not complete
    FormIncomplete,
    /// Another submission is still running
    AlreadyInFlight,
}

/// Result of calling [`CheckoutController::submit`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The sequence ran; carries the final outcome
    Completed(SubmissionOutcome),
    /// The guard refused to start a sequence
    Rejected(RejectReason),
}

impl Submission {
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Completed(SubmissionOutcome::Succeeded))
    }
}

/// Resets the in-flight outcome when a submission future is dropped or
/// unwinds before reaching its final state.
struct InFlightGuard<'a> {
    state: &'a watch::Sender<CheckoutState>,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn finish(mut self, outcome: SubmissionOutcome) {
        self.armed = false;
        self.state.send_modify(|s| s.outcome = outcome);
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("Submission ended before completing");
            self.state
                .send_modify(|s| s.outcome = SubmissionOutcome::Failed(INTERRUPTED_MESSAGE.into()));
        }
    }
}

/// The checkout state machine
pub struct CheckoutController {
    methods: Arc<dyn PaymentMethodProvider>,
    backend: Arc<dyn PaymentBackend>,
    confirmer: Arc<dyn PaymentConfirmer>,
    state: watch::Sender<CheckoutState>,
}

impl CheckoutController {
    /// Create a controller with its collaborators; all fields start incomplete
    pub fn new(
        methods: Arc<dyn PaymentMethodProvider>,
        backend: Arc<dyn PaymentBackend>,
        confirmer: Arc<dyn PaymentConfirmer>,
    ) -> Self {
        Self {
            methods,
            backend,
            confirmer,
            state: watch::Sender::new(CheckoutState::default()),
        }
    }

    /// Current snapshot
    pub fn state(&self) -> CheckoutState {
        self.state.borrow().clone()
    }

    /// Receive a new snapshot after every change
    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state.subscribe()
    }

    pub fn outcome(&self) -> SubmissionOutcome {
        self.state.borrow().outcome.clone()
    }

    pub fn is_form_valid(&self) -> bool {
        self.state.borrow().is_form_valid()
    }

    pub fn on_field_focus(&self, field: Field) {
        self.state.send_if_modified(|s| s.focus.set(field, true));
    }

    pub fn on_field_blur(&self, field: Field) {
        self.state.send_if_modified(|s| s.focus.set(field, false));
    }

    /// Record the payment SDK's verdict for one field
    pub fn on_field_completion_changed(&self, field: Field, is_complete: bool) {
        let changed = self
            .state
            .send_if_modified(|s| s.completion.set(field, is_complete));
        if changed {
            tracing::trace!(field = %field, complete = is_complete, "Field completion changed");
        }
    }

    /// Store the raw email and recompute its completion flag
    pub fn on_email_changed(&self, raw: impl Into<String>) {
        let email = EmailAddress::new(raw);
        self.state.send_if_modified(|s| {
            if s.email == email {
                return false;
            }
            s.completion.set(Field::Email, email.is_valid());
            s.email = email;
            true
        });
    }

    /// Clear a finished outcome (e.g. when the user dismisses an error)
    pub fn dismiss_outcome(&self) {
        self.state.send_if_modified(|s| {
            let finished = matches!(
                s.outcome,
                SubmissionOutcome::Succeeded | SubmissionOutcome::Failed(_)
            );
            if finished {
                s.outcome = SubmissionOutcome::Idle;
            }
            finished
        });
    }

    /// Pay with the card fields
    ///
    /// Rejected without side effects when the form is incomplete or another
    /// submission is running. Every failure is folded into
    /// [`SubmissionOutcome::Failed`]; nothing is returned as an error.
    pub async fn submit(&self) -> Submission {
        let (guard, email) = match self.begin(true) {
            Ok(started) => started,
            Err(reason) => {
                tracing::debug!(?reason, "Submission rejected");
                return Submission::Rejected(reason);
            }
        };

        let span = tracing::info_span!("checkout_attempt", attempt = %Uuid::new_v4(), kind = "card");
        let result = self.pay_with_card(&email).instrument(span.clone()).await;
        let outcome = span.in_scope(|| Self::settle(result));

        guard.finish(outcome.clone());
        Submission::Completed(outcome)
    }

    /// Pay with a payment method supplied by a one-click wallet
    ///
    /// Skips payment-method creation and the field guard, but shares the
    /// in-flight guard and outcome with [`submit`](Self::submit).
    pub async fn submit_one_click(&self, payer_email: &str, payment_method_id: &str) -> Submission {
        let guard = match self.begin(false) {
            Ok((guard, _)) => guard,
            Err(reason) => {
                tracing::debug!(?reason, "One-click submission rejected");
                return Submission::Rejected(reason);
            }
        };

        let span =
            tracing::info_span!("checkout_attempt", attempt = %Uuid::new_v4(), kind = "one_click");
        let result = self
            .confirm_with(payer_email, payment_method_id)
            .instrument(span.clone())
            .await;
        let outcome = span.in_scope(|| Self::settle(result));

        guard.finish(outcome.clone());
        Submission::Completed(outcome)
    }

    /// Atomically check the guard and enter `InFlight`
    fn begin(
        &self,
        require_valid_form: bool,
    ) -> std::result::Result<(InFlightGuard<'_>, String), RejectReason> {
        let mut verdict = Err(RejectReason::AlreadyInFlight);
        self.state.send_if_modified(|s| {
            if s.outcome.is_in_flight() {
                return false;
            }
            if require_valid_form && !s.is_form_valid() {
                verdict = Err(RejectReason::FormIncomplete);
                return false;
            }
            s.outcome = SubmissionOutcome::InFlight;
            verdict = Ok(s.email.as_str().to_string());
            true
        });

        verdict.map(|email| {
            (
                InFlightGuard {
                    state: &self.state,
                    armed: true,
                },
                email,
            )
        })
    }

    async fn pay_with_card(&self, email: &str) -> Result<IntentStatus> {
        let method = self.methods.create_payment_method(email).await?;
        tracing::debug!(payment_method = %method.id, "Payment method created");
        self.confirm_with(email, &method.id).await
    }

    async fn confirm_with(&self, email: &str, payment_method_id: &str) -> Result<IntentStatus> {
        let secret = self.backend.create_payment_intent(email).await?;
        tracing::debug!("Payment intent created");

        let intent = self
            .confirmer
            .confirm_payment(&secret, payment_method_id)
            .await?;
        Ok(intent.status)
    }

    fn settle(result: Result<IntentStatus>) -> SubmissionOutcome {
        match result {
            Ok(IntentStatus::Succeeded) => {
                tracing::info!("Payment succeeded");
                SubmissionOutcome::Succeeded
            }
            Ok(status) => {
                tracing::warn!(status = status.as_str(), "Payment did not succeed");
                SubmissionOutcome::Failed(status.failure_message())
            }
            Err(e) => {
                tracing::warn!(error = %e, retryable = e.is_retryable(), "Payment failed");
                SubmissionOutcome::Failed(e.message().to_string())
            }
        }
    }
}

impl FieldCompletionObserver for CheckoutController {
    fn on_completion_changed(&self, field: Field, is_complete: bool) {
        self.on_field_completion_changed(field, is_complete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckoutError;
    use crate::testing::{Harness, StubBackend, StubConfirmer, StubMethods};

    fn fill_form(controller: &CheckoutController) {
        for field in Field::CARD {
            controller.on_field_completion_changed(field, true);
        }
        controller.on_email_changed("mail@example.com");
    }

    #[test]
    fn test_completion_and_validity() {
        let h = Harness::happy();
        let c = &h.controller;
        assert!(!c.is_form_valid());

        for field in Field::CARD {
            c.on_field_completion_changed(field, true);
            assert!(c.state().completion.get(field));
        }
        assert!(!c.is_form_valid());

        c.on_email_changed("mail@example.com");
        assert!(c.state().email.is_valid());
        assert!(c.is_form_valid());

        c.on_field_completion_changed(Field::CardCvc, false);
        assert!(!c.is_form_valid());
    }

    #[test]
    fn test_email_change_recomputes_completion() {
        let h = Harness::happy();
        h.controller.on_email_changed("mail@");
        assert!(!h.controller.state().completion.email);
        h.controller.on_email_changed("a@b.co");
        assert!(h.controller.state().completion.email);
        assert_eq!(h.controller.state().email.as_str(), "a@b.co");
    }

    #[test]
    fn test_focus_and_blur() {
        let h = Harness::happy();
        h.controller.on_field_focus(Field::CardExpiry);
        assert!(h.controller.state().focus.card_expiry);
        h.controller.on_field_blur(Field::CardExpiry);
        assert!(!h.controller.state().focus.card_expiry);
    }

    #[test]
    fn test_observer_forwards_completion() {
        let h = Harness::happy();
        let observer: &dyn FieldCompletionObserver = &*h.controller;
        observer.on_completion_changed(Field::CardNumber, true);
        assert!(h.controller.state().completion.card_number);
    }

    #[tokio::test]
    async fn test_incomplete_form_is_rejected() {
        let h = Harness::happy();
        h.controller.on_email_changed("mail@example.com");

        let submission = h.controller.submit().await;
        assert_eq!(submission, Submission::Rejected(RejectReason::FormIncomplete));
        assert_eq!(h.methods.calls(), 0);
        assert_eq!(h.controller.outcome(), SubmissionOutcome::Idle);
    }

    #[tokio::test]
    async fn test_successful_payment() {
        let h = Harness::happy();
        fill_form(&h.controller);

        let submission = h.controller.submit().await;
        assert!(submission.is_succeeded());
        assert_eq!(h.controller.outcome(), SubmissionOutcome::Succeeded);
        assert!(!h.controller.outcome().is_in_flight());

        assert_eq!(h.methods.emails(), vec!["mail@example.com".to_string()]);
        assert_eq!(h.backend.emails(), vec!["mail@example.com".to_string()]);
        assert_eq!(
            h.confirmer.confirmations(),
            vec![("cs_1".to_string(), "pm_1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_validation_error_stops_sequence() {
        let h = Harness::new(
            StubMethods::failing(CheckoutError::Validation("Your card number is incorrect.".into())),
            StubBackend::ok("cs_1"),
            StubConfirmer::status("succeeded"),
        );
        fill_form(&h.controller);

        h.controller.submit().await;
        assert_eq!(
            h.controller.outcome(),
            SubmissionOutcome::Failed("Your card number is incorrect.".into())
        );
        assert_eq!(h.backend.calls(), 0);
        assert_eq!(h.confirmer.calls(), 0);
    }

    #[tokio::test]
    async fn test_backend_error_stops_sequence() {
        let h = Harness::new(
            StubMethods::ok("pm_1"),
            StubBackend::failing(CheckoutError::Backend("error sending request".into())),
            StubConfirmer::status("succeeded"),
        );
        fill_form(&h.controller);

        h.controller.submit().await;
        assert_eq!(
            h.controller.outcome(),
            SubmissionOutcome::Failed("error sending request".into())
        );
        assert_eq!(h.confirmer.calls(), 0);
    }

    #[tokio::test]
    async fn test_confirmation_error() {
        let h = Harness::new(
            StubMethods::ok("pm_1"),
            StubBackend::ok("cs_1"),
            StubConfirmer::failing(CheckoutError::Confirmation("Your card was declined.".into())),
        );
        fill_form(&h.controller);

        h.controller.submit().await;
        assert_eq!(h.controller.outcome().error(), Some("Your card was declined."));
    }

    #[tokio::test]
    async fn test_non_succeeded_status_fails() {
        let h = Harness::new(
            StubMethods::ok("pm_1"),
            StubBackend::ok("cs_1"),
            StubConfirmer::status("requires_action"),
        );
        fill_form(&h.controller);

        h.controller.submit().await;
        assert_eq!(
            h.controller.outcome().error(),
            Some(IntentStatus::RequiresAction.failure_message().as_str())
        );
    }

    #[tokio::test]
    async fn test_retry_after_failure_clears_error() {
        let h = Harness::new(
            StubMethods::ok("pm_1"),
            StubBackend::ok("cs_1"),
            StubConfirmer::status("succeeded"),
        );
        h.methods
            .fail_next(CheckoutError::Validation("Your card's expiration date is incomplete.".into()));
        fill_form(&h.controller);

        h.controller.submit().await;
        assert!(h.controller.outcome().error().is_some());

        let submission = h.controller.submit().await;
        assert!(submission.is_succeeded());
        assert_eq!(h.controller.outcome(), SubmissionOutcome::Succeeded);
        assert_eq!(h.controller.outcome().error(), None);
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_ignored() {
        let h = Harness::gated();
        fill_form(&h.controller);

        let (first, second) = futures::join!(h.controller.submit(), async {
            assert!(h.controller.outcome().is_in_flight());
            assert!(!h.controller.state().can_submit());
            let second = h.controller.submit().await;
            h.backend.release();
            second
        });

        assert!(first.is_succeeded());
        assert_eq!(second, Submission::Rejected(RejectReason::AlreadyInFlight));
        assert_eq!(h.backend.calls(), 1);
        assert_eq!(h.methods.calls(), 1);
    }

    #[tokio::test]
    async fn test_dropped_submission_leaves_controller_retryable() {
        let h = Harness::gated();
        fill_form(&h.controller);

        {
            let pending = h.controller.submit();
            futures::pin_mut!(pending);
            assert!(futures::poll!(pending.as_mut()).is_pending());
            assert!(h.controller.outcome().is_in_flight());
        }

        assert_eq!(
            h.controller.outcome(),
            SubmissionOutcome::Failed(INTERRUPTED_MESSAGE.into())
        );
        assert!(h.controller.state().can_submit());
    }

    #[tokio::test]
    async fn test_subscribers_see_final_state() {
        let h = Harness::happy();
        let mut rx = h.controller.subscribe();
        fill_form(&h.controller);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        h.controller.submit().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().outcome, SubmissionOutcome::Succeeded);
    }

    #[tokio::test]
    async fn test_dismiss_outcome() {
        let h = Harness::happy();
        fill_form(&h.controller);
        h.controller.submit().await;

        h.controller.dismiss_outcome();
        assert_eq!(h.controller.outcome(), SubmissionOutcome::Idle);
    }
}

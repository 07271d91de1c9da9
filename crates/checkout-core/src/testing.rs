//! Stub collaborators shared by the unit tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::controller::CheckoutController;
use crate::error::{CheckoutError, Result};
use crate::model::{ClientSecret, PaymentIntent, PaymentMethod};
use crate::provider::{PaymentBackend, PaymentConfirmer, PaymentMethodProvider};

pub struct StubMethods {
    result: Result<PaymentMethod>,
    next_failure: Mutex<Option<CheckoutError>>,
    emails: Mutex<Vec<String>>,
}

impl StubMethods {
    pub fn ok(id: &str) -> Self {
        Self::with(Ok(PaymentMethod::new(id)))
    }

    pub fn failing(err: CheckoutError) -> Self {
        Self::with(Err(err))
    }

    fn with(result: Result<PaymentMethod>) -> Self {
        Self {
            result,
            next_failure: Mutex::new(None),
            emails: Mutex::new(Vec::new()),
        }
    }

    /// Fail only the next call
    pub fn fail_next(&self, err: CheckoutError) {
        *self.next_failure.lock().unwrap() = Some(err);
    }

    pub fn emails(&self) -> Vec<String> {
        self.emails.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.emails.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl PaymentMethodProvider for StubMethods {
    async fn create_payment_method(&self, billing_email: &str) -> Result<PaymentMethod> {
        self.emails.lock().unwrap().push(billing_email.to_string());
        if let Some(err) = self.next_failure.lock().unwrap().take() {
            return Err(err);
        }
        self.result.clone()
    }
}

pub struct StubBackend {
    result: Result<ClientSecret>,
    gate: Option<Notify>,
    emails: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn ok(secret: &str) -> Self {
        Self {
            result: Ok(ClientSecret::new(secret)),
            gate: None,
            emails: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: CheckoutError) -> Self {
        Self {
            result: Err(err),
            gate: None,
            emails: Mutex::new(Vec::new()),
        }
    }

    /// Suspend every call until [`release`](Self::release)
    pub fn gated(secret: &str) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::ok(secret)
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn emails(&self) -> Vec<String> {
        self.emails.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.emails.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl PaymentBackend for StubBackend {
    async fn create_payment_intent(&self, email: &str) -> Result<ClientSecret> {
        self.emails.lock().unwrap().push(email.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.clone()
    }
}

pub struct StubConfirmer {
    result: Result<PaymentIntent>,
    confirmations: Mutex<Vec<(String, String)>>,
}

impl StubConfirmer {
    pub fn status(status: &str) -> Self {
        Self {
            result: Ok(PaymentIntent::new(status)),
            confirmations: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: CheckoutError) -> Self {
        Self {
            result: Err(err),
            confirmations: Mutex::new(Vec::new()),
        }
    }

    pub fn confirmations(&self) -> Vec<(String, String)> {
        self.confirmations.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.confirmations.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl PaymentConfirmer for StubConfirmer {
    async fn confirm_payment(
        &self,
        client_secret: &ClientSecret,
        payment_method_id: &str,
    ) -> Result<PaymentIntent> {
        self.confirmations.lock().unwrap().push((
            client_secret.expose().to_string(),
            payment_method_id.to_string(),
        ));
        self.result.clone()
    }
}

/// A controller wired to stubs, keeping handles for assertions
pub struct Harness {
    pub methods: Arc<StubMethods>,
    pub backend: Arc<StubBackend>,
    pub confirmer: Arc<StubConfirmer>,
    pub controller: Arc<CheckoutController>,
}

impl Harness {
    pub fn new(methods: StubMethods, backend: StubBackend, confirmer: StubConfirmer) -> Self {
        let methods = Arc::new(methods);
        let backend = Arc::new(backend);
        let confirmer = Arc::new(confirmer);
        let controller = Arc::new(CheckoutController::new(
            methods.clone(),
            backend.clone(),
            confirmer.clone(),
        ));
        Self {
            methods,
            backend,
            confirmer,
            controller,
        }
    }

    /// `pm_1` / `cs_1` / `succeeded`
    pub fn happy() -> Self {
        Self::new(
            StubMethods::ok("pm_1"),
            StubBackend::ok("cs_1"),
            StubConfirmer::status("succeeded"),
        )
    }

    /// Like [`happy`](Self::happy) but the backend waits for a release
    pub fn gated() -> Self {
        Self::new(
            StubMethods::ok("pm_1"),
            StubBackend::gated("cs_1"),
            StubConfirmer::status("succeeded"),
        )
    }
}

//! Stripe.js Payment SDK
//!
//! Implements the checkout collaborators on top of Stripe.js: card fields
//! (`cardNumber`, `cardExpiry`, `cardCvc` elements), payment-method creation,
//! card payment confirmation, and wallet payment requests. Raw card data
//! stays inside Stripe's iframes; only tokens cross into Rust.

mod bindings;
mod wire;

use std::cell::RefCell;
use std::sync::Arc;

use async_trait::async_trait;
use gloo_utils::format::JsValueSerdeExt;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::{Error, Function, Object, Promise, Reflect};

use checkout_core::{
    CheckoutController, CheckoutError, ClientSecret, CompletionStatus, Field,
    FieldCompletionObserver, PaymentConfirmer, PaymentIntent, PaymentMethod, PaymentMethodEvent,
    PaymentMethodProvider, PaymentRequestOptions, PaymentRequestProvider, Result,
};

use bindings::{JsElement, JsElements, JsPaymentMethodEvent, JsPaymentRequest, JsStripe};
use wire::{ConfirmData, ConfirmResult, ElementChange, PaymentMethodResult, WalletPaymentMethod};

/// Card widget styling, matching the dark checkout theme
fn element_style() -> serde_json::Value {
    serde_json::json!({
        "style": {
            "base": {
                "color": "#ffffff",
                "fontFamily": "Arial, sans-serif",
                "fontSmoothing": "antialiased",
                "fontSize": "18px",
                "backgroundColor": "#322f3b",
                "::placeholder": { "color": "#98979e" },
            },
            "invalid": { "color": "#fa755a", "iconColor": "#fa755a" },
        }
    })
}

/// Best-effort message out of a thrown JS value
fn js_message(value: &JsValue) -> String {
    value
        .dyn_ref::<Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "Unknown JavaScript error".into())
}

fn js_error(value: &JsValue) -> CheckoutError {
    CheckoutError::Unexpected(js_message(value))
}

/// Assign a JS handle (element, payment request) into an options object
fn set(target: &Object, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| js_error(&e))
}

async fn settle(promise: std::result::Result<Promise, JsValue>) -> Result<JsValue> {
    let promise = promise.map_err(|e| js_error(&e))?;
    JsFuture::from(promise).await.map_err(|e| js_error(&e))
}

/// Register a Rust handler for an SDK event; the handler lives for the page
fn listen(register: impl FnOnce(&Function), handler: impl FnMut(JsValue) + 'static) {
    let closure = Closure::<dyn FnMut(JsValue)>::new(handler);
    register(closure.as_ref().unchecked_ref());
    closure.forget();
}

/// The hosted payment SDK
pub struct StripeJs {
    stripe: JsStripe,
    elements: JsElements,
    card_number: RefCell<Option<JsElement>>,
}

impl StripeJs {
    /// Initialize Stripe.js with a publishable key
    pub fn new(publishable_key: &str) -> Result<Self> {
        let stripe = bindings::new_stripe(publishable_key).map_err(|e| {
            CheckoutError::Config(format!("Stripe.js failed to initialize: {}", js_message(&e)))
        })?;
        let elements = stripe.elements().map_err(|e| js_error(&e))?;

        Ok(Self {
            stripe,
            elements,
            card_number: RefCell::new(None),
        })
    }

    /// Create and mount one card widget, wiring its events to the controller
    pub fn mount_card_field(
        &self,
        field: Field,
        selector: &str,
        controller: &Arc<CheckoutController>,
    ) -> Result<()> {
        let element = self
            .elements
            .create(field.as_str(), &JsValue::from_serde(&element_style())?)
            .map_err(|e| js_error(&e))?;
        element.mount(selector).map_err(|e| js_error(&e))?;

        let observer: Arc<dyn FieldCompletionObserver> = controller.clone();
        listen(
            |f| element.on("change", f),
            move |ev| match ev.into_serde::<ElementChange>() {
                Ok(change) => change.report(&*observer, field),
                Err(e) => tracing::warn!(field = %field, error = %e, "Unreadable change event"),
            },
        );
        let c = controller.clone();
        listen(|f| element.on("focus", f), move |_| c.on_field_focus(field));
        let c = controller.clone();
        listen(|f| element.on("blur", f), move |_| c.on_field_blur(field));

        if field == Field::CardNumber {
            *self.card_number.borrow_mut() = Some(element);
        }
        tracing::debug!(field = %field, selector, "Mounted card field");
        Ok(())
    }

    /// Create a wallet payment request for these options
    pub fn payment_request(&self, options: &PaymentRequestOptions) -> Result<StripeWallet> {
        let request = self
            .stripe
            .payment_request(&JsValue::from_serde(options)?)
            .map_err(|e| js_error(&e))?;
        Ok(StripeWallet { request })
    }

    /// Mount the platform wallet button for a payment request
    pub fn mount_wallet_button(&self, wallet: &StripeWallet, selector: &str) -> Result<()> {
        let options = Object::new();
        set(&options, "paymentRequest", &wallet.request)?;
        set(
            &options,
            "style",
            &JsValue::from_serde(&serde_json::json!({ "paymentRequestButton": { "height": "57px" } }))?,
        )?;

        let element = self
            .elements
            .create("paymentRequestButton", &options)
            .map_err(|e| js_error(&e))?;
        element.mount(selector).map_err(|e| js_error(&e))
    }
}

#[async_trait(?Send)]
impl PaymentMethodProvider for StripeJs {
    async fn create_payment_method(&self, billing_email: &str) -> Result<PaymentMethod> {
        let card = self
            .card_number
            .borrow()
            .clone()
            .ok_or_else(|| CheckoutError::Unexpected("Card number field is not mounted".into()))?;

        let options = JsValue::from_serde(&serde_json::json!({
            "type": "card",
            "billing_details": { "email": billing_email },
        }))?;
        set(options.unchecked_ref(), "card", &card)?;

        settle(self.stripe.create_payment_method(&options))
            .await?
            .into_serde::<PaymentMethodResult>()?
            .into_payment_method()
    }
}

#[async_trait(?Send)]
impl PaymentConfirmer for StripeJs {
    async fn confirm_payment(
        &self,
        client_secret: &ClientSecret,
        payment_method_id: &str,
    ) -> Result<PaymentIntent> {
        let data = JsValue::from_serde(&ConfirmData {
            payment_method: payment_method_id,
        })?;

        settle(self.stripe.confirm_card_payment(client_secret.expose(), &data))
            .await?
            .into_serde::<ConfirmResult>()?
            .into_intent()
    }
}

/// A Stripe.js payment request (Apple Pay, Google Pay, Link)
pub struct StripeWallet {
    request: JsPaymentRequest,
}

impl StripeWallet {
    /// Deliver `paymentmethod` events from the wallet sheet
    pub fn on_payment_method(&self, mut handler: impl FnMut(PaymentMethodEvent) + 'static) {
        listen(
            |f| self.request.on_event("paymentmethod", f),
            move |ev| {
                let sheet: JsPaymentMethodEvent = ev.clone().unchecked_into();
                let payload = match ev.into_serde::<WalletPaymentMethod>() {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::error!(error = %e, "Unreadable wallet payment method");
                        complete_sheet(&sheet, CompletionStatus::Fail);
                        return;
                    }
                };
                handler(PaymentMethodEvent {
                    payer_email: payload.payer_email.unwrap_or_default(),
                    payment_method_id: payload.payment_method.id,
                    completion: Box::new(move |status: CompletionStatus| {
                        complete_sheet(&sheet, status);
                    }),
                });
            },
        );
    }
}

fn complete_sheet(sheet: &JsPaymentMethodEvent, status: CompletionStatus) {
    if let Err(e) = sheet.complete(status.as_str()) {
        tracing::warn!(error = %js_message(&e), "Failed to complete wallet sheet");
    }
}

#[async_trait(?Send)]
impl PaymentRequestProvider for StripeWallet {
    /// The options were fixed when the request was created
    async fn can_make_payment(&self, _options: &PaymentRequestOptions) -> Result<bool> {
        let result = settle(self.request.can_make_payment()).await?;
        Ok(!result.is_null() && !result.is_undefined())
    }
}

//! wasm-bindgen bindings to the parts of Stripe.js v3 the checkout uses
//!
//! Promise-returning methods hand back a raw `Promise`; the wrappers in
//! `stripe/mod.rs` await them with `JsFuture`.

use wasm_bindgen::prelude::*;
use web_sys::js_sys::{Function, Promise};

#[wasm_bindgen]
extern "C" {
    /// Stripe.js client handle
    #[wasm_bindgen(js_name = Stripe)]
    #[derive(Debug, Clone)]
    pub type JsStripe;

    /// Elements group created by `stripe.elements()`
    #[derive(Debug, Clone)]
    pub type JsElements;

    /// A single hosted widget (`cardNumber`, `paymentRequestButton`, ...)
    #[derive(Debug, Clone)]
    pub type JsElement;

    /// Wallet payment request created by `stripe.paymentRequest()`
    #[derive(Debug, Clone)]
    pub type JsPaymentRequest;

    /// Event delivered to `paymentRequest.on("paymentmethod", ...)`
    #[derive(Debug, Clone)]
    pub type JsPaymentMethodEvent;

    /// `Stripe(publishableKey)`
    #[wasm_bindgen(catch, js_name = Stripe)]
    pub fn new_stripe(publishable_key: &str) -> Result<JsStripe, JsValue>;

    /// `stripe.elements()`
    #[wasm_bindgen(method, catch)]
    pub fn elements(this: &JsStripe) -> Result<JsElements, JsValue>;

    /// `stripe.createPaymentMethod({ type, card, billing_details })`
    #[wasm_bindgen(method, catch, js_name = createPaymentMethod)]
    pub fn create_payment_method(this: &JsStripe, options: &JsValue) -> Result<Promise, JsValue>;

    /// `stripe.confirmCardPayment(clientSecret, { payment_method })`
    #[wasm_bindgen(method, catch, js_name = confirmCardPayment)]
    pub fn confirm_card_payment(
        this: &JsStripe,
        client_secret: &str,
        data: &JsValue,
    ) -> Result<Promise, JsValue>;

    /// `stripe.paymentRequest(options)`
    #[wasm_bindgen(method, catch, js_name = paymentRequest)]
    pub fn payment_request(this: &JsStripe, options: &JsValue) -> Result<JsPaymentRequest, JsValue>;

    /// `elements.create(type, options)`
    #[wasm_bindgen(method, catch, js_name = create)]
    pub fn create(this: &JsElements, element_type: &str, options: &JsValue) -> Result<JsElement, JsValue>;

    /// `element.mount(selector)`
    #[wasm_bindgen(method, catch)]
    pub fn mount(this: &JsElement, selector: &str) -> Result<(), JsValue>;

    /// `element.on(event, handler)`
    #[wasm_bindgen(method, js_name = on)]
    pub fn on(this: &JsElement, event: &str, handler: &Function);

    /// `paymentRequest.canMakePayment()`
    #[wasm_bindgen(method, catch, js_name = canMakePayment)]
    pub fn can_make_payment(this: &JsPaymentRequest) -> Result<Promise, JsValue>;

    /// `paymentRequest.on(event, handler)`
    #[wasm_bindgen(method, js_name = on)]
    pub fn on_event(this: &JsPaymentRequest, event: &str, handler: &Function);

    /// `ev.complete("success" | "fail")`
    #[wasm_bindgen(method, catch)]
    pub fn complete(this: &JsPaymentMethodEvent, status: &str) -> Result<(), JsValue>;
}

//! Main App Component

use std::rc::Rc;
use std::sync::Arc;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use checkout_core::{CheckoutConfig, CheckoutController, Field, PaymentButton, PaymentRequestOptions};
use checkout_payments::HttpPaymentBackend;

use crate::api;
use crate::components::{CardField, StatusMessage, SubmitButton};
use crate::stripe::StripeJs;

const CARD_FIELDS: [(Field, &str); 3] = [
    (Field::CardNumber, "#card-number"),
    (Field::CardExpiry, "#card-expiry"),
    (Field::CardCvc, "#card-cvc"),
];

const WALLET_BUTTON: &str = "#payment-request-button";

const CARD_FORM_UNAVAILABLE: &str = "The card form could not be loaded. Please refresh the page.";

/// Run `f` on the next animation frame, once the current view is in the DOM
fn after_render(f: impl FnOnce() + 'static) -> bool {
    let callback = Closure::once_into_js(f);
    let scheduled = web_sys::window()
        .map(|w| w.request_animation_frame(callback.unchecked_ref()));
    matches!(scheduled, Some(Ok(_)))
}

/// Mount the card widgets and, when a wallet is available, the one-click button
fn mount_sdk_widgets(
    sdk: Arc<StripeJs>,
    controller: Arc<CheckoutController>,
    options: PaymentRequestOptions,
    set_wallet_ready: WriteSignal<bool>,
    set_notice: WriteSignal<Option<String>>,
) {
    let scheduled = after_render(move || {
        for (field, selector) in CARD_FIELDS {
            if let Err(e) = sdk.mount_card_field(field, selector, &controller) {
                tracing::error!(field = %field, error = %e, "Failed to mount card field");
                set_notice.set(Some(CARD_FORM_UNAVAILABLE.into()));
            }
        }

        spawn_local(async move {
            let wallet = match sdk.payment_request(&options) {
                Ok(wallet) => wallet,
                Err(e) => {
                    tracing::warn!(error = %e, "Payment request unavailable");
                    return;
                }
            };

            let Some(button) = PaymentButton::initialize(controller, &wallet, &options).await else {
                return;
            };
            if let Err(e) = sdk.mount_wallet_button(&wallet, WALLET_BUTTON) {
                tracing::warn!(error = %e, "Failed to mount wallet button");
                return;
            }

            let button = Rc::new(button);
            wallet.on_payment_method(move |event| {
                let button = button.clone();
                spawn_local(async move {
                    button.handle_payment_method(event).await;
                });
            });
            set_wallet_ready.set(true);
        });
    });
    if !scheduled {
        tracing::error!("Could not schedule widget mounting");
        set_notice.set(Some(CARD_FORM_UNAVAILABLE.into()));
    }
}

/// Checkout form wired to Stripe.js and the payment backend
#[component]
pub fn CheckoutForm(config: CheckoutConfig) -> impl IntoView {
    let sdk = match StripeJs::new(&config.publishable_key) {
        Ok(sdk) => Arc::new(sdk),
        Err(e) => {
            tracing::error!(error = %e, "Payment SDK unavailable");
            return view! { <p class="status error">{e.user_message()}</p> }.into_any();
        }
    };
    let backend = Arc::new(HttpPaymentBackend::from_config(&config));
    let controller = Arc::new(CheckoutController::new(sdk.clone(), backend, sdk.clone()));

    let (state, set_state) = signal(controller.state());
    let mut updates = controller.subscribe();
    spawn_local(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            set_state.set(snapshot);
        }
    });

    let (wallet_ready, set_wallet_ready) = signal(false);
    let (notice, set_notice) = signal(None::<String>);
    mount_sdk_widgets(
        sdk,
        controller.clone(),
        config.payment_request(),
        set_wallet_ready,
        set_notice,
    );

    let controller = StoredValue::new_local(controller);
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let controller = controller.get_value();
        spawn_local(async move {
            controller.submit().await;
        });
    };

    let heading = format!("{} {}", config.total.label, config.total.display());

    view! {
        <div class="checkout-form">
            <h2 class="total">{heading}</h2>
            {move || notice.get().map(|message| view! { <div class="status error">{message}</div> })}

            <div id="payment-request-button" class:hidden=move || !wallet_ready.get()></div>
            <Show when=move || wallet_ready.get()>
                <div class="divider">
                    <span>"Or pay by card"</span>
                </div>
            </Show>

            <form on:submit=on_submit>
                <CardField id="card-number" label="Card number" field=Field::CardNumber state=state />
                <div class="row">
                    <CardField id="card-expiry" label="Expiry" field=Field::CardExpiry state=state />
                    <CardField id="card-cvc" label="CVC" field=Field::CardCvc state=state />
                </div>

                <label class="field-label">"Email"</label>
                <input
                    type="email"
                    placeholder="mail@example.com"
                    class=move || {
                        if state.with(|s| s.focus.email) { "field focused" } else { "field" }
                    }
                    prop:value=move || state.with(|s| s.email.as_str().to_string())
                    on:input=move |ev| {
                        controller.with_value(|c| c.on_email_changed(event_target_value(&ev)));
                    }
                    on:focus=move |_| controller.with_value(|c| c.on_field_focus(Field::Email))
                    on:blur=move |_| controller.with_value(|c| c.on_field_blur(Field::Email))
                />

                <SubmitButton state=state />
            </form>

            <StatusMessage state=state />
        </div>
    }
    .into_any()
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let (config, set_config) = signal(None::<Result<CheckoutConfig, String>>);
    spawn_local(async move {
        set_config.set(Some(api::fetch_config().await));
    });

    view! {
        <main class="app">
            {move || match config.get() {
                None => view! { <p class="loading">"Loading checkout..."</p> }.into_any(),
                Some(Err(e)) => view! { <p class="status error">{e}</p> }.into_any(),
                Some(Ok(config)) => view! { <CheckoutForm config=config /> }.into_any(),
            }}
        </main>
    }
}

//! UI Components

use leptos::prelude::*;

use checkout_core::{CheckoutState, Field, SubmissionOutcome};

fn field_class(state: &CheckoutState, field: Field) -> &'static str {
    match (state.focus.get(field), state.completion.get(field)) {
        (true, _) => "field focused",
        (false, true) => "field complete",
        (false, false) => "field",
    }
}

fn submit_label(state: &CheckoutState) -> &'static str {
    if state.outcome.is_in_flight() {
        "Processing..."
    } else {
        "Confirm Purchase"
    }
}

/// Container a hosted card widget mounts into
#[component]
pub fn CardField(
    id: &'static str,
    label: &'static str,
    field: Field,
    state: ReadSignal<CheckoutState>,
) -> impl IntoView {
    view! {
        <label class="field-label">{label}</label>
        <div id=id class=move || state.with(|s| field_class(s, field))></div>
    }
}

/// Submit button, disabled until the form is valid and idle
#[component]
pub fn SubmitButton(state: ReadSignal<CheckoutState>) -> impl IntoView {
    view! {
        <button
            type="submit"
            class="btn btn-primary"
            disabled=move || !state.with(CheckoutState::can_submit)
        >
            {move || state.with(submit_label)}
        </button>
    }
}

/// Error or success banner for the last submission
#[component]
pub fn StatusMessage(state: ReadSignal<CheckoutState>) -> impl IntoView {
    move || {
        state.with(|s| match &s.outcome {
            SubmissionOutcome::Failed(message) => {
                Some(view! { <div class="status error">{message.clone()}</div> }.into_any())
            }
            SubmissionOutcome::Succeeded => {
                Some(view! { <div class="status success">"Payment Successful!"</div> }.into_any())
            }
            SubmissionOutcome::Idle | SubmissionOutcome::InFlight => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_class_prefers_focus() {
        let mut state = CheckoutState::default();
        assert_eq!(field_class(&state, Field::CardCvc), "field");

        state.completion.set(Field::CardCvc, true);
        assert_eq!(field_class(&state, Field::CardCvc), "field complete");

        state.focus.set(Field::CardCvc, true);
        assert_eq!(field_class(&state, Field::CardCvc), "field focused");
    }

    #[test]
    fn test_submit_label_while_in_flight() {
        let mut state = CheckoutState::default();
        assert_eq!(submit_label(&state), "Confirm Purchase");
        state.outcome = SubmissionOutcome::InFlight;
        assert_eq!(submit_label(&state), "Processing...");
    }
}

use fpl_shared::Message;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::MESSAGE_ENDPOINT;
use crate::console;

pub async fn fetch_message() -> Result<Message, String> {
    let resp = gloo_net::http::Request::get(MESSAGE_ENDPOINT)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<Message>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

pub async fn post_message(text: &str) -> Result<Message, String> {
    let resp = gloo_net::http::Request::post(MESSAGE_ENDPOINT)
        .json(&Message {
            message: text.to_string(),
        })
        .map_err(|e| format!("encode error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<Message>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// Small round trip against the message endpoint, shown under the table.
#[component]
pub fn MessageDemo() -> impl IntoView {
    let current: RwSignal<String> = RwSignal::new(String::new());
    let draft: RwSignal<String> = RwSignal::new(String::new());
    let sending: RwSignal<bool> = RwSignal::new(false);

    Effect::new(move || {
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_message().await {
                Ok(message) => current.set(message.message),
                Err(e) => console::warn(&format!("message fetch failed: {e}")),
            }
        });
    });

    let on_input = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        draft.set(input.value());
    };

    let on_submit = move |e: leptos::ev::SubmitEvent| {
        e.prevent_default();
        if sending.get_untracked() {
            return;
        }
        let text = draft.get_untracked();
        sending.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match post_message(&text).await {
                Ok(echoed) => {
                    current.set(echoed.message);
                    draft.set(String::new());
                }
                Err(e) => console::warn(&format!("message update failed: {e}")),
            }
            sending.set(false);
        });
    };

    view! {
        <form class="message-demo" on:submit=on_submit>
            <p class="message-current">{move || current.get()}</p>
            <input
                type="text"
                placeholder="New message"
                prop:value=move || draft.get()
                on:input=on_input
            />
            <button type="submit" disabled=move || sending.get()>"Send"</button>
        </form>
    }
}

//! Error toast.

use leptos::prelude::*;

use crate::app::AppContext;

#[component]
pub fn Toast() -> impl IntoView {
    let toast = use_context::<AppContext>()
        .expect("AppContext must be provided")
        .toast;

    move || {
        toast.message.get().map(|message| {
            view! {
                <div class="toast toast-error" role="alert">
                    <span>{message}</span>
                    <button on:click=move |_| toast.dismiss() title="Dismiss">"×"</button>
                </div>
            }
        })
    }
}

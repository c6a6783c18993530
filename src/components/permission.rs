//! Permission-aware rendering.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::config::NO_PERMISSION_MESSAGE;
use crate::core::permissions::has_access;
use crate::models::Action;

/// Memoized permission check against the session user.
///
/// Re-evaluates only when the user, the module or the action changes.
pub fn use_permission(module: Signal<String>, action: Signal<Action>) -> Memo<bool> {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    Memo::new(move |_| {
        let action = action.get();
        ctx.session
            .with(|user| module.with(|module| has_access(user.as_ref(), module, action)))
    })
}

/// Render `children` when the user may perform `action` on `module`.
///
/// Without a `fallback`, an inline "no permission" message is shown instead.
#[component]
pub fn Can(
    #[prop(into)] module: Signal<String>,
    #[prop(optional)] action: Action,
    #[prop(optional, into)] fallback: Option<ViewFn>,
    children: ChildrenFn,
) -> impl IntoView {
    let allowed = use_permission(module, Signal::derive(move || action));

    move || {
        if allowed.get() {
            children()
        } else {
            match &fallback {
                Some(fallback) => fallback.run(),
                None => view! { <NoPermission /> }.into_any(),
            }
        }
    }
}

#[component]
pub fn NoPermission() -> impl IntoView {
    view! { <p class="no-permission">{NO_PERMISSION_MESSAGE}</p> }
}

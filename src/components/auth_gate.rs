//! Client-side route authorization.
//!
//! Wraps the whole shell. Nothing renders until the gate has mounted and
//! evaluated the current location, so protected content never flashes
//! before a redirect.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::core::route_guard::{GuardState, RouteGuard};
use crate::core::session::LocalStorageTokens;

/// Renders `children` only while the current route is allowed.
///
/// Denied routes are replaced with the login route (once per denial).
#[component]
pub fn AuthGate(children: ChildrenFn) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let guard = StoredValue::new(RouteGuard::new());
    let mounted = RwSignal::new(false);
    let state = RwSignal::new(GuardState::Unmounted);

    // Effects only run in the browser after the first render, which is when
    // localStorage becomes safe to read.
    Effect::new(move |_| {
        guard.update_value(|g| g.mount());
        mounted.set(true);
    });

    Effect::new(move |_| {
        let location = ctx.location.get();
        if !mounted.get() {
            return;
        }

        let Some(decision) = guard.try_update_value(|g| g.evaluate(&location, &LocalStorageTokens))
        else {
            return;
        };
        state.set(decision.state);

        if let Some(target) = decision.redirect {
            leptos::logging::log!("{} requires a session, redirecting to {}", location.full_path(), target);
            ctx.replace_location(&target);
        }
    });

    let allowed = Memo::new(move |_| state.get() == GuardState::Allowed);

    move || allowed.get().then(|| children())
}

//! Root application module.
//!
//! Contains the main App component, AppContext definition, ToastState,
//! and application-level setup logic following Leptos conventions.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{AuthGate, Shell};
use crate::config::TOAST_TIMEOUT_MS;
use crate::core::envelope::error_message;
use crate::core::session;
use crate::models::{AppLocation, SessionUser};
use crate::utils::dom;

// ============================================================================
// ToastState
// ============================================================================

/// Error toast shown after a failed API call.
#[derive(Clone, Copy)]
pub struct ToastState {
    /// Message currently displayed, if any.
    pub message: RwSignal<Option<String>>,
    /// Bumped on every new toast so stale timers don't hide a newer one.
    generation: RwSignal<u64>,
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
            generation: RwSignal::new(0),
        }
    }

    /// Show the human-readable message for `err`, hiding it after
    /// `TOAST_TIMEOUT_MS`.
    pub fn show_error(&self, err: &(dyn std::error::Error + 'static)) {
        self.message.set(Some(error_message(err)));
        self.generation.update(|g| *g += 1);

        let state = *self;
        let shown = self.generation.get_untracked();
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
            if state.generation.get_untracked() == shown {
                state.dismiss();
            }
        });
    }

    pub fn dismiss(&self) {
        self.message.set(None);
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed with
/// `use_context::<AppContext>()`. All fields are signals, so the context is
/// `Copy`.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current browser location; the auth gate re-evaluates on every change.
    pub location: RwSignal<AppLocation>,

    /// Authenticated user snapshot (permission map included).
    pub session: RwSignal<Option<SessionUser>>,

    /// Error toast.
    pub toast: ToastState,
}

impl AppContext {
    /// Creates the context from the browser URL and the cached session user.
    pub fn new() -> Self {
        Self::with_state(AppLocation::current(), session::stored_user())
    }

    /// Creates the context from an explicit location and user.
    pub fn with_state(location: AppLocation, user: Option<SessionUser>) -> Self {
        Self {
            location: RwSignal::new(location),
            session: RwSignal::new(user),
            toast: ToastState::new(),
        }
    }

    /// Navigate to `url`, adding a history entry.
    pub fn navigate(&self, url: &str) {
        dom::push_url(url);
        self.location.set(AppLocation::parse(url));
    }

    /// Navigate to `url`, replacing the current history entry.
    pub fn replace_location(&self, url: &str) {
        dom::replace_url(url);
        self.location.set(AppLocation::parse(url));
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Keeps the location signal in sync with browser back/forward
/// - Renders the Shell behind the AuthGate
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::prelude::Closure;

        let location = ctx.location;
        let closure = Closure::wrap(Box::new(move || {
            location.set(AppLocation::current());
        }) as Box<dyn Fn()>);

        if let Some(window) = dom::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div class="fatal-error">
                    <h1>"Something went wrong"</h1>
                    <p>"An unexpected error occurred. Please try reloading the page."</p>
                    <ul>
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button on:click=move |_| dom::reload()>"Reload Page"</button>
                </div>
            }
        >
            <AuthGate>
                <Shell />
            </AuthGate>
        </ErrorBoundary>
    }
}

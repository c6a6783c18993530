//! Dashboard shell: header, navigation, toast and the page area.
//!
//! Each dashboard section is guarded by the permission module configured in
//! [`ROUTE_MODULES`]; paths outside the table (login flows) render unguarded.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::AppContext;
use crate::components::{Can, Toast};
use crate::config::{APP_NAME, ROUTE_MODULES};
use crate::core::session::{LocalStorageTokens, TokenReader};
use crate::models::SessionUser;
use crate::services;

/// A configured dashboard section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub prefix: &'static str,
    pub module: &'static str,
    pub title: &'static str,
}

/// Section whose route prefix matches `path`.
pub fn section_for(path: &str) -> Option<Section> {
    ROUTE_MODULES
        .iter()
        .find(|(prefix, _, _)| {
            path == *prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
        .map(|&(prefix, module, title)| Section {
            prefix,
            module,
            title,
        })
}

#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Refresh the cached user and permission map once per session.
    if LocalStorageTokens.access_token().is_some() {
        spawn_local(async move {
            match services::auth::current_user().await {
                Ok(user) => ctx.session.set(Some(user)),
                Err(err) => ctx.toast.show_error(&err),
            }
        });
    }

    let section = Memo::new(move |_| ctx.location.with(|loc| section_for(&loc.path)));
    let user_name = Signal::derive(move || {
        ctx.session.with(|user| {
            user.as_ref()
                .map(SessionUser::display_name)
                .unwrap_or_else(|| "guest".to_string())
        })
    });

    let nav_links = ROUTE_MODULES
        .iter()
        .map(|&(prefix, module, title)| {
            view! {
                <Can module=module fallback=|| ()>
                    <a
                        href=prefix
                        on:click=move |ev: leptos::ev::MouseEvent| {
                            ev.prevent_default();
                            ctx.navigate(prefix);
                        }
                    >
                        {title}
                    </a>
                </Can>
            }
        })
        .collect_view();

    view! {
        <header class="shell-header">
            <span class="app-name">{APP_NAME}</span>
            <nav>{nav_links}</nav>
            <span class="session">{user_name}</span>
        </header>
        <Toast />
        <main>
            {move || match section.get() {
                Some(section) => view! {
                    <Can module=section.module>
                        <section data-route=section.prefix data-module=section.module>
                            <h1>{section.title}</h1>
                        </section>
                    </Can>
                }
                .into_any(),
                None => view! {
                    <section>
                        <h1>{move || ctx.location.with(|loc| loc.path.clone())}</h1>
                    </section>
                }
                .into_any(),
            }}
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_lookup() {
        assert_eq!(section_for("/resumen").map(|s| s.module), Some("dashboard"));
        assert_eq!(
            section_for("/proyectos/42/editar").map(|s| s.module),
            Some("projects")
        );
        assert_eq!(section_for("/planes").map(|s| s.title), Some("Planes estratégicos"));
        assert_eq!(section_for("/planesx"), None);
        assert_eq!(section_for("/login"), None);
        assert_eq!(section_for("/"), None);
    }
}

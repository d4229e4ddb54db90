//! Auth gate: `LoginPage` until a user is signed in, then `MainLayout`.

use leptos::prelude::*;

use crate::layout::global_context::use_global_context;
use crate::layout::Shell;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::LoginPage;

/// Syncs the current page with `?page=` and renders the shell.
#[component]
fn MainLayout() -> impl IntoView {
    use_global_context().init_router_integration();

    view! { <Shell /> }
}

#[component]
pub fn AppShell() -> impl IntoView {
    view! {
        <RequireAuth fallback=|| view! { <LoginPage /> }>
            <MainLayout />
        </RequireAuth>
    }
}

use leptos::prelude::*;

use super::context::use_auth_store;

/// Renders `children` only for a signed-in user
#[component]
pub fn RequireAuth(#[prop(optional, into)] fallback: ViewFn, children: ChildrenFn) -> impl IntoView {
    let is_authenticated = use_auth_store().is_authenticated();

    view! {
        <Show when=move || is_authenticated.get() fallback=fallback>
            {children()}
        </Show>
    }
}

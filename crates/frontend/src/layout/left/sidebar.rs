//! Collapsible navigation sidebar

use leptos::prelude::*;

use crate::layout::global_context::{use_global_context, Page};
use crate::shared::hooks::use_media_query;
use crate::shared::icons::icon;
use crate::shared::preferences::use_preferences;
use crate::system::auth::use_auth_store;

const MOBILE_QUERY: &str = "(max-width: 768px)";

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();
    let preferences = use_preferences();
    let collapsed = preferences.sidebar_collapsed();
    let user = use_auth_store().user();

    // Narrow screens start collapsed; widening does not force it open
    let is_mobile = use_media_query(MOBILE_QUERY);
    let auto_collapse = preferences.clone();
    Effect::new(move |_| {
        if is_mobile.get() && !collapsed.get_untracked() {
            auto_collapse.set_sidebar_collapsed(true);
        }
    });

    let toggle = preferences.clone();
    let on_navigate = move |page: Page| {
        ctx.navigate(page);
        if is_mobile.get_untracked() {
            preferences.set_sidebar_collapsed(true);
        }
    };

    view! {
        <aside class="app-sidebar" class:app-sidebar--collapsed=move || collapsed.get()>
            <div class="app-sidebar__brand">
                <span class="app-sidebar__logo">{icon("wrench")}</span>
                <Show when=move || !collapsed.get()>
                    <span class="app-sidebar__title">"SOSMachine"</span>
                </Show>
                <button
                    class="app-sidebar__toggle"
                    on:click=move |_| toggle.toggle_sidebar()
                    title=move || if collapsed.get() { "Déplier le menu" } else { "Replier le menu" }
                >
                    {move || if collapsed.get() { icon("chevron-right") } else { icon("chevron-left") }}
                </button>
            </div>

            <nav class="app-sidebar__content">
                {Page::all()
                    .into_iter()
                    .map(|page| {
                        let on_navigate = on_navigate.clone();
                        view! {
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=move || ctx.page.get() == page
                                title=page.title()
                                on:click=move |_| on_navigate(page)
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(page.icon())}
                                    <Show when=move || !collapsed.get()>
                                        <span>{page.title()}</span>
                                    </Show>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </nav>

            <Show when=move || !collapsed.get()>
                <div class="app-sidebar__footer">
                    {move || user.get().map(|u| view! {
                        <div class="app-sidebar__company">{u.company}</div>
                        <div class="muted">{u.role.display_name()}</div>
                    })}
                </div>
            </Show>
        </aside>
    }
}

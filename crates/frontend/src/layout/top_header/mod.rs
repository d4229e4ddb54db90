//! Top bar: menu toggle, global part search, notifications, theme and account.

mod notification_menu;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::{use_global_context, Page};
use crate::shared::icons::icon;
use crate::shared::preferences::use_preferences;
use crate::shared::text_utils::initials;
use crate::shared::theme::ThemeSwitch;
use crate::system::auth::use_auth;
use crate::system::notifications::use_notifications;
use notification_menu::NotificationMenu;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let preferences = use_preferences();
    let auth = use_auth();
    let notifications = use_notifications();
    let user = auth.store.user();

    let on_search_key = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ctx.navigate(Page::SpareParts);
        }
    };

    let logout = move |_| {
        let auth = auth.clone();
        spawn_local(async move {
            if let Err(e) = auth.sign_out().await {
                notifications.show_error("Déconnexion", &e.user_message());
            }
        });
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| preferences.toggle_sidebar()
                    title="Menu"
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">{move || ctx.page.get().title()}</span>
            </div>

            <div class="top-header__search">
                {icon("search")}
                <input
                    type="search"
                    placeholder="Rechercher une pièce..."
                    prop:value=move || ctx.search.get()
                    on:input=move |ev| ctx.search.set(event_target_value(&ev))
                    on:keydown=on_search_key
                />
            </div>

            <div class="top-header__actions">
                <NotificationMenu />
                <ThemeSwitch />
                <div class="top-header__user">
                    <span class="top-header__avatar">
                        {move || user.get().map(|u| initials(&u.first_name, &u.last_name))}
                    </span>
                    <div class="top-header__user-info">
                        <span>{move || user.get().map(|u| u.full_name()).unwrap_or_default()}</span>
                        <span class="muted">{move || user.get().map(|u| u.email).unwrap_or_default()}</span>
                    </div>
                </div>
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.navigate(Page::Settings)
                    title="Paramètres"
                >
                    {icon("settings")}
                </button>
                <button class="top-header__icon-btn" on:click=logout title="Se déconnecter">
                    {icon("log-out")}
                </button>
            </div>
        </header>
    }
}

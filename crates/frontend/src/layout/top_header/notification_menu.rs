use chrono::Utc;
use contracts::domain::a005_notification::Notification;
use leptos::prelude::*;

use crate::shared::date_utils::relative_time_between;
use crate::shared::icons::icon;
use crate::system::notifications::use_notifications;

/// Badge text; large counts are capped
fn badge_label(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        1..=9 => Some(unread.to_string()),
        _ => Some("9+".to_string()),
    }
}

#[component]
pub fn NotificationMenu() -> impl IntoView {
    let store = use_notifications();
    let notifications = store.notifications();
    let unread = store.unread_count();
    let open = RwSignal::new(false);

    view! {
        <div class="notification-menu">
            <button
                class="top-header__icon-btn"
                title="Notifications"
                on:click=move |_| open.update(|o| *o = !*o)
            >
                {icon("bell")}
                {move || badge_label(unread.get()).map(|label| view! {
                    <span class="notification-menu__badge">{label}</span>
                })}
            </button>

            <Show when=move || open.get()>
                <div class="notification-menu__backdrop" on:click=move |_| open.set(false)></div>
                <div class="notification-menu__panel">
                    <div class="notification-menu__header">
                        <strong>"Notifications"</strong>
                        <div class="notification-menu__actions">
                            <button
                                class="link-button"
                                disabled=move || unread.get() == 0
                                on:click=move |_| store.mark_all_as_read()
                            >
                                "Tout marquer comme lu"
                            </button>
                            <button
                                class="link-button"
                                disabled=move || notifications.with(Vec::is_empty)
                                on:click=move |_| store.clear()
                            >
                                {icon("trash")}
                                "Effacer"
                            </button>
                        </div>
                    </div>
                    <div class="notification-menu__list">
                        {move || {
                            let items = notifications.get();
                            if items.is_empty() {
                                return view! {
                                    <p class="empty-state">"Aucune notification"</p>
                                }
                                .into_any();
                            }
                            let now = Utc::now();
                            items
                                .into_iter()
                                .map(|n| view! { <NotificationItem notification=n now=now /> })
                                .collect_view()
                                .into_any()
                        }}
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn NotificationItem(notification: Notification, now: chrono::DateTime<Utc>) -> impl IntoView {
    let store = use_notifications();
    let id = StoredValue::new(notification.id.clone());
    let is_read = notification.is_read;

    view! {
        <div
            class="notification-item"
            class:notification-item--unread=!is_read
            on:click=move |_| {
                if !is_read {
                    store.mark_as_read(&id.get_value());
                }
            }
        >
            <span class="notification-item__icon">{icon(notification.kind.icon())}</span>
            <div class="notification-item__body">
                <div class="notification-item__title">{notification.title.clone()}</div>
                <div class="notification-item__message">{notification.message.clone()}</div>
                <div class="muted">{relative_time_between(notification.created_at, now)}</div>
            </div>
            <button
                class="notification-item__remove"
                title="Supprimer"
                on:click=move |ev| {
                    ev.stop_propagation();
                    store.remove(&id.get_value());
                }
            >
                {icon("x")}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_is_hidden_at_zero_and_capped() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(3).as_deref(), Some("3"));
        assert_eq!(badge_label(42).as_deref(), Some("9+"));
    }
}

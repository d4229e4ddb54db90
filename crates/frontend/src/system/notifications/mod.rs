//! Transient in-app notifications (bell menu).

pub mod state;

use contracts::domain::a005_notification::{NewNotification, Notification};
use leptos::prelude::*;

pub use state::NotificationState;

#[derive(Clone, Copy)]
pub struct NotificationStore {
    state: RwSignal<NotificationState>,
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(NotificationState::default()),
        }
    }

    pub fn notifications(&self) -> Signal<Vec<Notification>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.notifications.clone()))
    }

    pub fn unread_count(&self) -> Signal<usize> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.unread_count))
    }

    pub fn add(&self, new: NewNotification) {
        self.state.update(|s| {
            s.add(new);
        });
    }

    pub fn mark_as_read(&self, id: &str) {
        self.state.update(|s| s.mark_as_read(id));
    }

    pub fn mark_all_as_read(&self) {
        self.state.update(NotificationState::mark_all_as_read);
    }

    pub fn remove(&self, id: &str) {
        self.state.update(|s| s.remove(id));
    }

    pub fn clear(&self) {
        self.state.update(NotificationState::clear);
    }

    pub fn show_success(&self, title: &str, message: &str) {
        self.add(NewNotification::system("", title, message));
    }

    pub fn show_error(&self, title: &str, message: &str) {
        self.add(NewNotification::system("", title, message));
    }

    pub fn show_info(&self, title: &str, message: &str) {
        self.add(NewNotification::system("", title, message));
    }
}

pub fn use_notifications() -> NotificationStore {
    use_context::<NotificationStore>()
        .expect("NotificationStore not provided in context (provide it in App)")
}

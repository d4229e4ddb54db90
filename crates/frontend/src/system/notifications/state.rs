use chrono::{DateTime, Utc};
use contracts::domain::a005_notification::{NewNotification, Notification};
use uuid::Uuid;

/// In-app notifications, most recent first.
///
/// `unread_count` always equals the number of entries with `is_read == false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationState {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

impl NotificationState {
    pub fn add(&mut self, new: NewNotification) -> String {
        self.add_at(new, Uuid::new_v4().to_string(), Utc::now())
    }

    pub fn add_at(&mut self, new: NewNotification, id: String, created_at: DateTime<Utc>) -> String {
        let notification = new.into_notification(id.clone(), created_at);
        if !notification.is_read {
            self.unread_count += 1;
        }
        self.notifications.insert(0, notification);
        id
    }

    pub fn mark_as_read(&mut self, id: &str) {
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id && !n.is_read) {
            n.is_read = true;
            self.unread_count = self.unread_count.saturating_sub(1);
        }
    }

    pub fn mark_all_as_read(&mut self) {
        for n in &mut self.notifications {
            n.is_read = true;
        }
        self.unread_count = 0;
    }

    pub fn remove(&mut self, id: &str) {
        let Some(index) = self.notifications.iter().position(|n| n.id == id) else {
            return;
        };
        let removed = self.notifications.remove(index);
        if !removed.is_read {
            self.unread_count = self.unread_count.saturating_sub(1);
        }
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
        self.unread_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unread(state: &NotificationState) -> usize {
        state.notifications.iter().filter(|n| !n.is_read).count()
    }

    #[test]
    fn test_newest_first_and_counted() {
        let mut state = NotificationState::default();
        for title in ["A", "B", "C"] {
            state.add(NewNotification::system("", title, "message"));
        }
        let titles: Vec<&str> = state.notifications.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["C", "B", "A"]);
        assert_eq!(state.unread_count, 3);

        state.mark_all_as_read();
        assert_eq!(state.unread_count, 0);
        assert!(state.notifications.iter().all(|n| n.is_read));
    }

    #[test]
    fn test_missing_id_and_double_read_are_no_ops() {
        let mut state = NotificationState::default();
        let id = state.add(NewNotification::system("", "Stock", "Roulement SKF bas"));
        state.remove("absent");
        assert_eq!(state.notifications.len(), 1);
        assert_eq!(state.unread_count, 1);

        state.mark_as_read(&id);
        state.mark_as_read(&id);
        assert_eq!(state.unread_count, 0);

        state.remove(&id);
        assert!(state.notifications.is_empty());
        assert_eq!(state.unread_count, 0);
    }

    #[test]
    fn test_read_entry_does_not_bump_count() {
        let mut state = NotificationState::default();
        let mut new = NewNotification::system("", "Info", "déjà lue");
        new.is_read = true;
        state.add(new);
        assert_eq!(state.unread_count, 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add { read: bool },
        MarkRead(usize),
        Remove(usize),
        MarkAll,
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => any::<bool>().prop_map(|read| Op::Add { read }),
            3 => (0usize..8).prop_map(Op::MarkRead),
            3 => (0usize..8).prop_map(Op::Remove),
            1 => Just(Op::MarkAll),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn test_unread_count_matches_entries(ops in prop::collection::vec(op(), 0..60)) {
            let mut state = NotificationState::default();
            for (step, op) in ops.into_iter().enumerate() {
                // indexes past the end target an id that does not exist
                let id_at = |state: &NotificationState, i: usize| {
                    state.notifications.get(i).map(|n| n.id.clone()).unwrap_or_else(|| format!("missing-{i}"))
                };
                match op {
                    Op::Add { read } => {
                        let mut new = NewNotification::system("u1", format!("n{step}"), "m");
                        new.is_read = read;
                        state.add(new);
                    }
                    Op::MarkRead(i) => {
                        let id = id_at(&state, i);
                        state.mark_as_read(&id);
                    }
                    Op::Remove(i) => {
                        let id = id_at(&state, i);
                        state.remove(&id);
                    }
                    Op::MarkAll => state.mark_all_as_read(),
                    Op::Clear => state.clear(),
                }
                prop_assert_eq!(state.unread_count, unread(&state));
            }
        }
    }
}

use chrono::{DateTime, Utc};
use contracts::system::users::{User, UserPatch};

/// Who is signed in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// Set while an auth round-trip is in flight, never persisted
    pub is_loading: bool,
}

impl AuthState {
    pub fn login(&mut self, user: User) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.is_loading = false;
    }

    pub fn logout(&mut self) {
        *self = AuthState::default();
    }

    /// No-op while signed out
    pub fn update_user(&mut self, patch: &UserPatch, now: DateTime<Utc>) {
        if let Some(user) = &mut self.user {
            user.apply_patch(patch, now);
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }
}

#[cfg(test)]
pub(crate) fn sample_user() -> User {
    use contracts::system::users::UserRole;
    User {
        id: "u1".into(),
        email: "jean.dupont@sosmachine.pro".into(),
        first_name: "Jean".into(),
        last_name: "Dupont".into(),
        company: "SOSMachine".into(),
        role: UserRole::Manager,
        avatar: None,
        created_at: "2024-01-01T00:00:00.000Z".into(),
        updated_at: "2024-01-01T00:00:00.000Z".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_then_logout_returns_to_initial() {
        let mut state = AuthState::default();
        state.set_loading(true);
        state.login(sample_user());
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.user, Some(sample_user()));

        state.logout();
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn test_update_user_merges_fields_and_bumps_timestamp() {
        let mut state = AuthState::default();
        let now = DateTime::from_timestamp(1_718_000_000, 0).unwrap();
        let patch = UserPatch {
            company: Some("Atelier Nord".into()),
            ..UserPatch::default()
        };

        state.update_user(&patch, now);
        assert_eq!(state.user, None);

        state.login(sample_user());
        state.update_user(&patch, now);
        let user = state.user.unwrap();
        assert_eq!(user.company, "Atelier Nord");
        assert_eq!(user.first_name, "Jean");
        assert_eq!(user.updated_at, "2024-06-10T06:13:20.000Z");
    }
}

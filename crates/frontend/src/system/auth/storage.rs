//! Auth snapshot kept under `auth-storage`.

use contracts::system::users::User;
use serde::{Deserialize, Serialize};

use super::state::AuthState;
use crate::shared::storage::{load_state, save_state, KeyValueStorage, AUTH_STORAGE_KEY};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedAuth {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    is_authenticated: bool,
}

/// Restores the last session; the flag always follows the user presence
pub fn load_auth(storage: &dyn KeyValueStorage) -> AuthState {
    let Some(saved) = load_state::<PersistedAuth>(storage, AUTH_STORAGE_KEY) else {
        return AuthState::default();
    };
    let is_authenticated = saved.user.is_some();
    if saved.is_authenticated != is_authenticated {
        log::warn!("auth snapshot flag disagreed with user presence, repaired");
    }
    AuthState {
        user: saved.user,
        is_authenticated,
        is_loading: false,
    }
}

pub fn save_auth(storage: &dyn KeyValueStorage, state: &AuthState) {
    save_state(
        storage,
        AUTH_STORAGE_KEY,
        PersistedAuth {
            user: state.user.clone(),
            is_authenticated: state.is_authenticated,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use crate::system::auth::state::sample_user;

    #[test]
    fn test_snapshot_excludes_loading_flag() {
        let storage = MemoryStorage::new();
        let mut state = AuthState::default();
        state.login(sample_user());
        state.set_loading(true);
        save_auth(&storage, &state);

        let raw: serde_json::Value =
            serde_json::from_str(&storage.get(AUTH_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(raw["version"], 0);
        assert_eq!(raw["state"]["isAuthenticated"], true);
        assert_eq!(raw["state"]["user"]["firstName"], "Jean");
        assert!(raw["state"].get("isLoading").is_none());

        let restored = load_auth(&storage);
        assert_eq!(restored.user, Some(sample_user()));
        assert!(restored.is_authenticated);
        assert!(!restored.is_loading);
    }

    #[test]
    fn test_inconsistent_flag_is_repaired() {
        let storage = MemoryStorage::with_entry(
            AUTH_STORAGE_KEY,
            r#"{"state":{"user":null,"isAuthenticated":true},"version":0}"#,
        );
        assert_eq!(load_auth(&storage), AuthState::default());
    }

    #[test]
    fn test_corrupt_snapshot_gives_signed_out_state() {
        let storage = MemoryStorage::with_entry(AUTH_STORAGE_KEY, "[1,2");
        assert_eq!(load_auth(&storage), AuthState::default());
    }
}

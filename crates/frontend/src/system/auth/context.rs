use chrono::Utc;
use contracts::system::auth::SignUpProfile;
use contracts::system::users::{User, UserPatch};
use leptos::prelude::*;
use std::sync::Arc;

use super::state::AuthState;
use super::api;
use super::storage::{load_auth, save_auth};
use crate::shared::backend::{use_backend, Backend};
use crate::shared::error::AppError;
use crate::shared::storage::KeyValueStorage;

/// Auth state plus its persistence; every transition reduces, then saves
#[derive(Clone)]
pub struct AuthStore {
    state: RwSignal<AuthState>,
    storage: Arc<dyn KeyValueStorage>,
}

impl AuthStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let initial = load_auth(storage.as_ref());
        Self {
            state: RwSignal::new(initial),
            storage,
        }
    }

    pub fn user(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }

    pub fn is_authenticated(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_authenticated))
    }

    pub fn is_loading(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_loading))
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.get_untracked()
    }

    fn transition(&self, f: impl FnOnce(&mut AuthState)) {
        self.state.update(f);
        self.state
            .with_untracked(|s| save_auth(self.storage.as_ref(), s));
    }

    pub fn login(&self, user: User) {
        log::info!("auth: signed in as {}", user.email);
        self.transition(|s| s.login(user));
    }

    pub fn logout(&self) {
        log::info!("auth: signed out");
        self.transition(AuthState::logout);
    }

    /// Swaps in a freshly loaded profile for the same session
    pub fn refresh_user(&self, user: User) {
        self.transition(|s| s.login(user));
    }

    pub fn update_user(&self, patch: &UserPatch) {
        let now = Utc::now();
        self.transition(|s| s.update_user(patch, now));
    }

    pub fn set_loading(&self, loading: bool) {
        self.transition(|s| s.set_loading(loading));
    }
}

pub fn use_auth_store() -> AuthStore {
    use_context::<AuthStore>().expect("AuthStore not provided in context (provide it in App)")
}

/// Auth round-trips against the backend, reflected in the store
#[derive(Clone)]
pub struct AuthService {
    pub store: AuthStore,
    backend: Arc<dyn Backend>,
}

impl AuthService {
    pub fn new(store: AuthStore, backend: Arc<dyn Backend>) -> Self {
        Self { store, backend }
    }

    /// Resets loading, logs and hands the error back
    fn fail<T>(&self, context: &str, error: AppError) -> Result<T, AppError> {
        log::error!("{context}: {error}");
        self.store.set_loading(false);
        Err(error)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let auth_user = self.backend.sign_in_with_password(email, password).await?;
        api::fetch_user(self.backend.as_ref(), &auth_user.id).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AppError> {
        self.store.set_loading(true);
        match self.authenticate(email, password).await {
            Ok(user) => {
                self.store.login(user.clone());
                Ok(user)
            }
            Err(e) => self.fail("Erreur de connexion", e),
        }
    }

    /// Creates the account and its `viewer` profile; does not sign in
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: &SignUpProfile,
    ) -> Result<(), AppError> {
        self.store.set_loading(true);
        let result = async {
            if let Some(auth_user) = self.backend.sign_up(email, password).await? {
                api::create_profile(self.backend.as_ref(), &auth_user, email, profile).await?;
            }
            Ok::<_, AppError>(())
        }
        .await;

        match result {
            Ok(()) => {
                self.store.set_loading(false);
                Ok(())
            }
            Err(e) => self.fail("Erreur d'inscription", e),
        }
    }

    pub async fn sign_out(&self) -> Result<(), AppError> {
        self.store.set_loading(true);
        match self.backend.sign_out().await {
            Ok(()) => {
                self.store.logout();
                Ok(())
            }
            Err(e) => self.fail("Erreur de déconnexion", e),
        }
    }

    /// Reloads the signed-in user's row from the backend
    pub async fn reload_profile(&self) -> Result<User, AppError> {
        let Some(current) = self.store.snapshot().user else {
            return Err(AppError::Validation("Aucun utilisateur connecté".into()));
        };
        let user = api::fetch_user(self.backend.as_ref(), &current.id).await?;
        self.store.refresh_user(user.clone());
        Ok(user)
    }

    /// Saves profile changes, then merges them into the signed-in user
    pub async fn update_profile(&self, patch: UserPatch) -> Result<(), AppError> {
        let Some(user) = self.store.snapshot().user else {
            return Err(AppError::Validation("Aucun utilisateur connecté".into()));
        };
        if patch.is_empty() {
            return Ok(());
        }
        api::update_profile(self.backend.as_ref(), &user.id, &patch).await?;
        self.store.update_user(&patch);
        Ok(())
    }
}

pub fn use_auth() -> AuthService {
    AuthService::new(use_auth_store(), use_backend())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::backend::DemoBackend;
    use crate::shared::storage::{MemoryStorage, AUTH_STORAGE_KEY};
    use contracts::demo;

    fn service(owner: &Owner, storage: Arc<MemoryStorage>) -> AuthService {
        owner.with(|| AuthService::new(AuthStore::new(storage), Arc::new(DemoBackend::seeded())))
    }

    #[tokio::test]
    async fn test_sign_in_loads_profile_and_persists() {
        let owner = Owner::new();
        let storage = Arc::new(MemoryStorage::new());
        let auth = service(&owner, storage.clone());

        let user = auth.sign_in(demo::DEMO_EMAIL, demo::DEMO_PASSWORD).await.unwrap();
        assert_eq!(user.full_name(), "Jean Dupont");

        let state = auth.store.snapshot();
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert!(storage.get(AUTH_STORAGE_KEY).unwrap().contains("\"isAuthenticated\":true"));

        let reloaded = owner.with(|| AuthStore::new(storage));
        assert_eq!(reloaded.snapshot().user, Some(user));
    }

    #[tokio::test]
    async fn test_failed_sign_in_resets_loading_and_reraises() {
        let owner = Owner::new();
        let auth = service(&owner, Arc::new(MemoryStorage::new()));

        let err = auth.sign_in(demo::DEMO_EMAIL, "mauvais").await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(auth.store.snapshot(), AuthState::default());
    }

    #[tokio::test]
    async fn test_sign_up_creates_viewer_profile_without_signing_in() {
        let owner = Owner::new();
        let auth = service(&owner, Arc::new(MemoryStorage::new()));
        let profile = SignUpProfile {
            first_name: "Marie".into(),
            last_name: "Martin".into(),
            company: "Atelier Nord".into(),
        };

        auth.sign_up("marie@atelier-nord.fr", "Secret#2024", &profile).await.unwrap();
        assert!(!auth.store.snapshot().is_authenticated);

        let user = auth.sign_in("marie@atelier-nord.fr", "Secret#2024").await.unwrap();
        assert_eq!(user.role, contracts::system::users::UserRole::Viewer);
        assert_eq!(user.company, "Atelier Nord");
    }

    #[tokio::test]
    async fn test_sign_out_clears_state() {
        let owner = Owner::new();
        let storage = Arc::new(MemoryStorage::new());
        let auth = service(&owner, storage.clone());
        auth.sign_in(demo::DEMO_EMAIL, demo::DEMO_PASSWORD).await.unwrap();

        auth.sign_out().await.unwrap();
        assert_eq!(auth.store.snapshot(), AuthState::default());
        let reloaded = owner.with(|| AuthStore::new(storage));
        assert_eq!(reloaded.snapshot(), AuthState::default());
    }

    #[tokio::test]
    async fn test_profile_update_reaches_backend_and_store() {
        let owner = Owner::new();
        let auth = service(&owner, Arc::new(MemoryStorage::new()));
        auth.sign_in(demo::DEMO_EMAIL, demo::DEMO_PASSWORD).await.unwrap();

        let patch = UserPatch {
            last_name: Some("Durand".into()),
            ..UserPatch::default()
        };
        auth.update_profile(patch).await.unwrap();
        assert_eq!(auth.store.snapshot().user.unwrap().last_name, "Durand");

        let fresh = api::fetch_user(auth.backend.as_ref(), demo::DEMO_USER_ID).await.unwrap();
        assert_eq!(fresh.last_name, "Durand");
    }

    #[tokio::test]
    async fn test_reload_profile_picks_up_backend_changes() {
        let owner = Owner::new();
        let auth = service(&owner, Arc::new(MemoryStorage::new()));
        assert!(auth.reload_profile().await.is_err());

        auth.sign_in(demo::DEMO_EMAIL, demo::DEMO_PASSWORD).await.unwrap();
        api::update_profile(
            auth.backend.as_ref(),
            demo::DEMO_USER_ID,
            &UserPatch {
                company: Some("SOS Machine Lyon".into()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap();

        let user = auth.reload_profile().await.unwrap();
        assert_eq!(user.company, "SOS Machine Lyon");
        assert_eq!(auth.store.snapshot().user, Some(user));
        assert!(auth.store.snapshot().is_authenticated);
    }
}

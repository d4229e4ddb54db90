use async_trait::async_trait;
use contracts::system::auth::{AuthUser, PasswordCredentials, Session, SignUpResponse};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Backend, RowFilter};
use crate::shared::api_utils::build_url;
use crate::shared::config::BackendConfig;
use crate::shared::error::AppError;
use crate::shared::storage::{load_json, save_json, KeyValueStorage, SESSION_STORAGE_KEY};

/// REST client for a Supabase project (GoTrue auth + PostgREST tables)
pub struct SupabaseClient {
    config: BackendConfig,
    storage: Arc<dyn KeyValueStorage>,
    session: Mutex<Option<Session>>,
}

impl SupabaseClient {
    /// Restores the session saved by a previous visit, if any
    pub fn new(config: BackendConfig, storage: Arc<dyn KeyValueStorage>) -> Self {
        let session = load_json::<Session>(storage.as_ref(), SESSION_STORAGE_KEY);
        Self {
            config,
            storage,
            session: Mutex::new(session),
        }
    }

    fn session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn store_session(&self, session: Option<Session>) {
        match &session {
            Some(s) => save_json(self.storage.as_ref(), SESSION_STORAGE_KEY, s),
            None => self.storage.remove(SESSION_STORAGE_KEY),
        }
        *self.session() = session;
    }

    fn base(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base(), path)
    }

    fn rest_url(&self, table: &str, filters: &[RowFilter]) -> String {
        let pairs: Vec<(&str, String)> = filters.iter().map(RowFilter::query_pair).collect();
        let params: Vec<(&str, Option<&str>)> =
            pairs.iter().map(|(k, v)| (*k, Some(v.as_str()))).collect();
        build_url(&format!("{}/rest/v1/{}", self.base(), table), &params)
    }

    /// `apikey` plus the user's token, or the anon key before sign-in
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self
            .session()
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.config.anon_key.clone());
        builder
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {}", token))
    }

    async fn send_json(&self, builder: RequestBuilder, body: &impl serde::Serialize) -> Result<Response, AppError> {
        let response = self
            .authorize(builder)
            .header("Content-Type", "application/json")
            .json(body)?
            .send()
            .await?;
        ensure_ok(response).await
    }
}

/// Turns a non-2xx response into `AppError::Backend`
async fn ensure_ok(response: Response) -> Result<Response, AppError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(error_from_body(status, &body))
}

/// Picks the human message out of a GoTrue or PostgREST error body
pub(crate) fn error_from_body(status: u16, body: &str) -> AppError {
    let value: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let message = ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Erreur HTTP {status}"));
    AppError::backend(Some(status), message)
}

#[async_trait(?Send)]
impl Backend for SupabaseClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        let credentials = PasswordCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let url = self.auth_url("token?grant_type=password");
        let session: Session = self
            .send_json(Request::post(&url), &credentials)
            .await?
            .json()
            .await?;
        let user = session.user.clone();
        self.store_session(Some(session));
        log::info!("supabase: signed in {}", user.id);
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthUser>, AppError> {
        let credentials = PasswordCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: SignUpResponse = self
            .send_json(Request::post(&self.auth_url("signup")), &credentials)
            .await?
            .json()
            .await?;
        let user = response.user().clone();
        if let SignUpResponse::Session(session) = response {
            self.store_session(Some(session));
        }
        Ok(Some(user))
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        if self.session().is_none() {
            return Ok(());
        }
        let response = self
            .authorize(Request::post(&self.auth_url("logout")))
            .send()
            .await?;
        ensure_ok(response).await?;
        self.store_session(None);
        Ok(())
    }

    async fn select_rows(&self, table: &str, filters: &[RowFilter]) -> Result<Vec<Value>, AppError> {
        let url = build_url(&self.rest_url(table, filters), &[("select", Some("*"))]);
        let response = self.authorize(Request::get(&url)).send().await?;
        Ok(ensure_ok(response).await?.json().await?)
    }

    async fn insert_row(&self, table: &str, row: Value) -> Result<(), AppError> {
        let builder = Request::post(&self.rest_url(table, &[])).header("Prefer", "return=minimal");
        self.send_json(builder, &row).await?;
        Ok(())
    }

    async fn update_rows(&self, table: &str, filters: &[RowFilter], patch: Value) -> Result<(), AppError> {
        let builder = Request::patch(&self.rest_url(table, filters)).header("Prefer", "return=minimal");
        self.send_json(builder, &patch).await?;
        Ok(())
    }
}

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use contracts::demo;
use contracts::system::auth::AuthUser;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use super::{tables, Backend, RowFilter};
use crate::shared::error::AppError;

#[derive(Debug, Clone)]
struct Account {
    id: String,
    email: String,
    password: String,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<String, Vec<Value>>,
    accounts: Vec<Account>,
    signed_in: Option<String>,
}

/// In-memory backend; nothing survives a reload
pub struct DemoBackend {
    inner: Mutex<Inner>,
}

fn to_rows<T: Serialize>(items: Vec<T>) -> Vec<Value> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::to_value(item) {
            Ok(row) => Some(row),
            Err(e) => {
                log::warn!("demo row skipped: {e}");
                None
            }
        })
        .collect()
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn invalid_credentials() -> AppError {
    AppError::backend(Some(400), "Identifiants de connexion invalides")
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoBackend {
    /// Empty tables, no accounts
    pub fn new() -> Self {
        let tables = tables::ALL
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();
        Self {
            inner: Mutex::new(Inner {
                tables,
                ..Inner::default()
            }),
        }
    }

    /// Sample data and the demo account
    pub fn seeded() -> Self {
        let backend = Self::new();
        {
            let mut inner = backend.lock();
            inner.accounts.push(Account {
                id: demo::DEMO_USER_ID.to_string(),
                email: demo::DEMO_EMAIL.to_string(),
                password: demo::DEMO_PASSWORD.to_string(),
            });
            let seed = [
                (tables::USERS, to_rows(vec![demo::demo_user_row()])),
                (tables::SPARE_PARTS, to_rows(demo::spare_parts())),
                (tables::SUPPLIERS, to_rows(demo::suppliers())),
                (tables::PURCHASE_ORDERS, to_rows(demo::purchase_orders())),
                (tables::MAINTENANCE_REQUESTS, to_rows(demo::maintenance_requests())),
            ];
            for (name, rows) in seed {
                inner.tables.insert(name.to_string(), rows);
            }
        }
        backend
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn signed_in_user(&self) -> Option<String> {
        self.lock().signed_in.clone()
    }
}

fn unknown_table(table: &str) -> AppError {
    AppError::backend(Some(404), format!("Table inconnue : {table}"))
}

/// Column defaults a database would fill in
fn fill_defaults(row: &mut Map<String, Value>) {
    let now = now_iso();
    row.entry("id")
        .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
    row.entry("created_at")
        .or_insert_with(|| Value::String(now.clone()));
    row.entry("updated_at").or_insert_with(|| Value::String(now));
}

#[async_trait(?Send)]
impl Backend for DemoBackend {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        let mut inner = self.lock();
        let email = email.trim().to_lowercase();
        let account = inner
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .cloned()
            .ok_or_else(invalid_credentials)?;
        inner.signed_in = Some(account.id.clone());
        Ok(AuthUser {
            id: account.id,
            email: Some(account.email),
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthUser>, AppError> {
        let mut inner = self.lock();
        let email = email.trim().to_lowercase();
        if inner.accounts.iter().any(|a| a.email == email) {
            return Err(AppError::backend(
                Some(422),
                "Un compte existe déjà pour cette adresse",
            ));
        }
        let account = Account {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            password: password.to_string(),
        };
        let user = AuthUser {
            id: account.id.clone(),
            email: Some(email),
        };
        inner.accounts.push(account);
        Ok(Some(user))
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        self.lock().signed_in = None;
        Ok(())
    }

    async fn select_rows(&self, table: &str, filters: &[RowFilter]) -> Result<Vec<Value>, AppError> {
        let inner = self.lock();
        let rows = inner.tables.get(table).ok_or_else(|| unknown_table(table))?;
        Ok(rows
            .iter()
            .filter(|row| filters.iter().all(|f| f.matches(row)))
            .cloned()
            .collect())
    }

    async fn insert_row(&self, table: &str, row: Value) -> Result<(), AppError> {
        let Value::Object(mut row) = row else {
            return Err(AppError::backend(Some(400), "Ligne invalide : objet attendu"));
        };
        fill_defaults(&mut row);

        let mut inner = self.lock();
        let rows = inner.tables.get_mut(table).ok_or_else(|| unknown_table(table))?;
        let id = row.get("id").cloned();
        if rows.iter().any(|existing| existing.get("id") == id.as_ref()) {
            return Err(AppError::backend(Some(409), "Cette ligne existe déjà"));
        }
        rows.push(Value::Object(row));
        Ok(())
    }

    async fn update_rows(&self, table: &str, filters: &[RowFilter], patch: Value) -> Result<(), AppError> {
        let Value::Object(patch) = patch else {
            return Err(AppError::backend(Some(400), "Modification invalide : objet attendu"));
        };
        let now = now_iso();

        let mut inner = self.lock();
        let rows = inner.tables.get_mut(table).ok_or_else(|| unknown_table(table))?;
        for row in rows.iter_mut().filter(|row| filters.iter().all(|f| f.matches(row))) {
            if let Value::Object(fields) = row {
                for (key, value) in &patch {
                    fields.insert(key.clone(), value.clone());
                }
                fields.insert("updated_at".to_string(), Value::String(now.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::backend::{insert_as, select_as, select_one};
    use contracts::domain::a001_spare_part::SparePart;
    use contracts::system::users::{NewUserRow, UserRole, UserRow};
    use serde_json::json;

    #[tokio::test]
    async fn test_demo_account_signs_in() {
        let backend = DemoBackend::seeded();
        let user = backend
            .sign_in_with_password(" Jean.Dupont@sosmachine.pro", demo::DEMO_PASSWORD)
            .await
            .unwrap();
        assert_eq!(user.id, demo::DEMO_USER_ID);
        assert_eq!(backend.signed_in_user().as_deref(), Some(demo::DEMO_USER_ID));

        backend.sign_out().await.unwrap();
        assert_eq!(backend.signed_in_user(), None);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let backend = DemoBackend::seeded();
        let err = backend
            .sign_in_with_password(demo::DEMO_EMAIL, "nope")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_seeded_tables_decode_and_filter() {
        let backend = DemoBackend::seeded();
        let parts: Vec<SparePart> = select_as(&backend, tables::SPARE_PARTS, &[]).await.unwrap();
        assert_eq!(parts, demo::spare_parts());

        let me: UserRow = select_one(
            &backend,
            tables::USERS,
            &[RowFilter::eq("id", demo::DEMO_USER_ID)],
        )
        .await
        .unwrap();
        assert_eq!(me.first_name, "Jean");

        let missing = select_one::<UserRow>(&backend, tables::USERS, &[RowFilter::eq("id", "x")]).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_sign_up_then_profile_insert_fills_timestamps() {
        let backend = DemoBackend::seeded();
        let user = backend
            .sign_up("marie@atelier.fr", "Secret#123")
            .await
            .unwrap()
            .unwrap();
        insert_as(
            &backend,
            tables::USERS,
            &NewUserRow {
                id: user.id.clone(),
                email: "marie@atelier.fr".into(),
                first_name: "Marie".into(),
                last_name: "Curie".into(),
                company: "Atelier".into(),
                role: UserRole::Viewer,
            },
        )
        .await
        .unwrap();

        let row: UserRow = select_one(&backend, tables::USERS, &[RowFilter::eq("id", &user.id)])
            .await
            .unwrap();
        assert_eq!(row.role, UserRole::Viewer);
        assert!(!row.created_at.is_empty());

        let again = backend.sign_up("MARIE@atelier.fr", "x").await;
        assert_eq!(again.unwrap_err().status(), Some(422));
    }

    #[tokio::test]
    async fn test_update_merges_matching_rows_only() {
        let backend = DemoBackend::new();
        backend.insert_row(tables::USERS, json!({"id": "a", "company": "A"})).await.unwrap();
        backend.insert_row(tables::USERS, json!({"id": "b", "company": "B"})).await.unwrap();

        backend
            .update_rows(tables::USERS, &[RowFilter::eq("id", "a")], json!({"company": "Z"}))
            .await
            .unwrap();

        let rows = backend.select_rows(tables::USERS, &[]).await.unwrap();
        assert_eq!(rows[0]["company"], "Z");
        assert_eq!(rows[1]["company"], "B");
    }

    #[tokio::test]
    async fn test_unknown_table_and_duplicate_id_fail() {
        let backend = DemoBackend::new();
        assert!(backend.select_rows("nope", &[]).await.is_err());
        backend.insert_row(tables::USERS, json!({"id": "a"})).await.unwrap();
        let dup = backend.insert_row(tables::USERS, json!({"id": "a"})).await;
        assert_eq!(dup.unwrap_err().status(), Some(409));
    }
}

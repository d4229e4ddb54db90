//! Access to the hosted backend (auth + tables).
//!
//! Pages and stores only see `dyn Backend`; `SupabaseClient` talks to a real
//! project, `DemoBackend` serves the sample data from memory.

pub mod demo;
pub mod supabase;

use async_trait::async_trait;
use contracts::system::auth::AuthUser;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::shared::error::AppError;

pub use demo::DemoBackend;
pub use supabase::SupabaseClient;

pub mod tables {
    pub const USERS: &str = "users";
    pub const SPARE_PARTS: &str = "spare_parts";
    pub const SUPPLIERS: &str = "suppliers";
    pub const PURCHASE_ORDERS: &str = "purchase_orders";
    pub const MAINTENANCE_REQUESTS: &str = "maintenance_requests";

    pub const ALL: [&str; 5] = [
        USERS,
        SPARE_PARTS,
        SUPPLIERS,
        PURCHASE_ORDERS,
        MAINTENANCE_REQUESTS,
    ];
}

/// Equality filter on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    pub column: String,
    pub value: String,
}

impl RowFilter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// PostgREST query parameter, e.g. `("id", "eq.42")`
    pub fn query_pair(&self) -> (&str, String) {
        (self.column.as_str(), format!("eq.{}", self.value))
    }

    pub fn matches(&self, row: &Value) -> bool {
        match row.get(&self.column) {
            Some(Value::String(s)) => *s == self.value,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}

#[async_trait(?Send)]
pub trait Backend: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str)
        -> Result<AuthUser, AppError>;

    /// `None` when the service accepted the request without returning a user
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthUser>, AppError>;

    async fn sign_out(&self) -> Result<(), AppError>;

    async fn select_rows(&self, table: &str, filters: &[RowFilter])
        -> Result<Vec<Value>, AppError>;

    async fn insert_row(&self, table: &str, row: Value) -> Result<(), AppError>;

    async fn update_rows(
        &self,
        table: &str,
        filters: &[RowFilter],
        patch: Value,
    ) -> Result<(), AppError>;
}

pub async fn select_as<T: DeserializeOwned>(
    backend: &dyn Backend,
    table: &str,
    filters: &[RowFilter],
) -> Result<Vec<T>, AppError> {
    backend
        .select_rows(table, filters)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(AppError::from))
        .collect()
}

/// Exactly one row is expected; none is `NotFound`
pub async fn select_one<T: DeserializeOwned>(
    backend: &dyn Backend,
    table: &str,
    filters: &[RowFilter],
) -> Result<T, AppError> {
    let mut rows = select_as::<T>(backend, table, filters).await?;
    match rows.len() {
        1 => Ok(rows.remove(0)),
        0 => Err(AppError::NotFound(format!("Aucune ligne dans {table}"))),
        n => Err(AppError::backend(
            Some(406),
            format!("{n} lignes dans {table}, une seule attendue"),
        )),
    }
}

pub async fn insert_as<T: Serialize>(backend: &dyn Backend, table: &str, row: &T) -> Result<(), AppError> {
    let row = serde_json::to_value(row)?;
    backend.insert_row(table, row).await
}

pub async fn update_as<T: Serialize>(
    backend: &dyn Backend,
    table: &str,
    filters: &[RowFilter],
    patch: &T,
) -> Result<(), AppError> {
    let patch = serde_json::to_value(patch)?;
    backend.update_rows(table, filters, patch).await
}

pub fn use_backend() -> Arc<dyn Backend> {
    use_context::<Arc<dyn Backend>>().expect("Backend not provided in context (provide it in App)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_matches_strings_and_numbers() {
        let row = json!({ "id": "p1", "current_stock": 5, "avatar": null });
        assert!(RowFilter::eq("id", "p1").matches(&row));
        assert!(RowFilter::eq("current_stock", "5").matches(&row));
        assert!(!RowFilter::eq("avatar", "null").matches(&row));
        assert!(!RowFilter::eq("missing", "x").matches(&row));
    }

    #[test]
    fn test_filter_query_pair() {
        assert_eq!(RowFilter::eq("id", "u1").query_pair(), ("id", "eq.u1".to_string()));
    }
}

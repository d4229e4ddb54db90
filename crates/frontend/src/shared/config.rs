//! Build-time configuration.
//!
//! Values come from environment variables captured at compile time:
//! `SUPABASE_URL`, `SUPABASE_ANON_KEY` and the optional `SOSMACHINE_STALE_TIME_MS`.

use leptos::prelude::*;

use crate::shared::error::AppError;
use crate::shared::hooks::QueryOptions;

pub const DEFAULT_STALE_TIME_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMode {
    Supabase(BackendConfig),
    /// In-memory backend seeded with sample data
    Demo,
}

impl BackendMode {
    pub fn label(&self) -> &'static str {
        match self {
            BackendMode::Supabase(_) => "Supabase",
            BackendMode::Demo => "Démonstration (hors ligne)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: BackendMode,
    pub stale_time_ms: i64,
}

impl AppConfig {
    pub fn from_build_env() -> Result<Self, AppError> {
        Self::resolve(
            option_env!("SUPABASE_URL"),
            option_env!("SUPABASE_ANON_KEY"),
            option_env!("SOSMACHINE_STALE_TIME_MS"),
        )
    }

    pub fn resolve(
        url: Option<&str>,
        anon_key: Option<&str>,
        stale_time: Option<&str>,
    ) -> Result<Self, AppError> {
        let stale_time_ms = match stale_time.map(str::trim).filter(|s| !s.is_empty()) {
            None => DEFAULT_STALE_TIME_MS,
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|ms| *ms >= 0)
                .ok_or_else(|| {
                    AppError::Config(format!("SOSMACHINE_STALE_TIME_MS invalide : {raw}"))
                })?,
        };

        let url = url.map(str::trim).filter(|s| !s.is_empty());
        let anon_key = anon_key.map(str::trim).filter(|s| !s.is_empty());

        let backend = match (url, anon_key) {
            (None, None) => {
                log::warn!("SUPABASE_URL / SUPABASE_ANON_KEY not set, running in demo mode");
                BackendMode::Demo
            }
            (Some(url), Some(anon_key)) => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(AppError::Config(format!(
                        "SUPABASE_URL doit commencer par http:// ou https:// ({url})"
                    )));
                }
                BackendMode::Supabase(BackendConfig {
                    url: url.trim_end_matches('/').to_string(),
                    anon_key: anon_key.to_string(),
                })
            }
            (Some(_), None) => {
                return Err(AppError::Config("SUPABASE_ANON_KEY manquante".into()));
            }
            (None, Some(_)) => {
                return Err(AppError::Config("SUPABASE_URL manquante".into()));
            }
        };

        Ok(Self {
            backend,
            stale_time_ms,
        })
    }

    /// Query options with the configured staleness window
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions::default().stale_time(self.stale_time_ms)
    }
}

pub fn use_app_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig not provided in context (provide it in App)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_variables_select_demo() {
        let config = AppConfig::resolve(None, None, None).unwrap();
        assert_eq!(config.backend, BackendMode::Demo);
        assert_eq!(config.stale_time_ms, DEFAULT_STALE_TIME_MS);
    }

    #[test]
    fn test_empty_variables_count_as_absent() {
        let config = AppConfig::resolve(Some(" "), Some(""), Some("")).unwrap();
        assert_eq!(config.backend, BackendMode::Demo);
    }

    #[test]
    fn test_valid_variables_select_supabase() {
        let config =
            AppConfig::resolve(Some("https://abc.supabase.co/"), Some("key"), Some("1000")).unwrap();
        assert_eq!(
            config.backend,
            BackendMode::Supabase(BackendConfig {
                url: "https://abc.supabase.co".into(),
                anon_key: "key".into(),
            })
        );
        assert_eq!(config.stale_time_ms, 1000);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        assert!(matches!(
            AppConfig::resolve(Some("abc.supabase.co"), Some("key"), None),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::resolve(Some("https://abc.supabase.co"), None, None),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::resolve(None, None, Some("-5")),
            Err(AppError::Config(_))
        ));
    }
}

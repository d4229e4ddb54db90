//! Application-wide error type.

use thiserror::Error;

pub const FALLBACK_MESSAGE: &str = "Une erreur inattendue s'est produite";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// The backend answered with an error payload
    #[error("{message}")]
    Backend { status: Option<u16>, message: String },

    #[error("Erreur réseau : {0}")]
    Network(String),

    #[error("Réponse invalide : {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration invalide : {0}")]
    Config(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unknown(String),
}

impl AppError {
    pub fn backend(status: Option<u16>, message: impl Into<String>) -> Self {
        AppError::Backend {
            status,
            message: message.into(),
        }
    }

    /// Normalizes any foreign message, empty ones get the generic text
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            AppError::Unknown(FALLBACK_MESSAGE.to_string())
        } else {
            AppError::Unknown(message)
        }
    }

    /// Text shown to the user
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            text
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Backend { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<String> for AppError {
    fn from(message: String) -> Self {
        AppError::unknown(message)
    }
}

impl From<&str> for AppError {
    fn from(message: &str) -> Self {
        AppError::unknown(message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<gloo_net::Error> for AppError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => AppError::Decode(e.to_string()),
            other => AppError::Network(other.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strings_become_unknown() {
        assert_eq!(
            AppError::from("boom"),
            AppError::Unknown("boom".to_string())
        );
        assert_eq!(
            AppError::from(String::new()).user_message(),
            FALLBACK_MESSAGE
        );
    }

    #[test]
    fn test_backend_message_is_shown_verbatim() {
        let err = AppError::backend(Some(400), "Invalid login credentials");
        assert_eq!(err.user_message(), "Invalid login credentials");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_empty_backend_message_falls_back() {
        assert_eq!(AppError::backend(None, "").user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_json_errors_are_decode_errors() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(AppError::from(err), AppError::Decode(_)));
    }
}

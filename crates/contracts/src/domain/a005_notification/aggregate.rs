use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::NotificationType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    #[serde(default)]
    pub action_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Notification before the store assigns its id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub action_url: Option<String>,
}

impl NewNotification {
    /// Unread system notification addressed to `user_id`
    pub fn system(user_id: impl Into<String>, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind: NotificationType::SystemUpdate,
            title: title.into(),
            message: message.into(),
            is_read: false,
            action_url: None,
        }
    }

    pub fn with_kind(mut self, kind: NotificationType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    pub fn into_notification(self, id: String, created_at: DateTime<Utc>) -> Notification {
        Notification {
            id,
            user_id: self.user_id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            is_read: self.is_read,
            action_url: self.action_url,
            created_at,
        }
    }
}

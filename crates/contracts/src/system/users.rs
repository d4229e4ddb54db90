use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Technician,
    Viewer,
}

impl UserRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrateur",
            UserRole::Manager => "Responsable",
            UserRole::Technician => "Technicien",
            UserRole::Viewer => "Lecteur",
        }
    }
}

/// Signed-in user as held by the client (camelCase when persisted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Merges the present fields of `patch` and bumps `updated_at`
    pub fn apply_patch(&mut self, patch: &UserPatch, now: DateTime<Utc>) {
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(first_name) = &patch.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(company) = &patch.company {
            self.company = company.clone();
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(avatar) = &patch.avatar {
            self.avatar = Some(avatar.clone());
        }
        self.updated_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    }
}

/// Partial update of a user. Serialized snake_case so it doubles as a row patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        *self == UserPatch::default()
    }
}

// ============================================================================
// Backend rows
// ============================================================================

/// Row of the `users` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    pub role: UserRole,
    #[serde(default)]
    pub avatar: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            company: row.company,
            role: row.role,
            avatar: row.avatar,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row inserted after sign-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserRow {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
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

    #[test]
    fn test_persisted_user_is_camel_case() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["firstName"], "Jean");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00.000Z");
        assert!(json.get("avatar").is_none());
    }

    #[test]
    fn test_row_maps_from_snake_case() {
        let row: UserRow = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "email": "jean.dupont@sosmachine.pro",
            "first_name": "Jean",
            "last_name": "Dupont",
            "company": "SOSMachine",
            "role": "manager",
            "created_at": "2024-01-01T00:00:00.000Z",
            "updated_at": "2024-01-01T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(User::from(row), sample_user());
    }

    #[test]
    fn test_patch_merges_present_fields_only() {
        let mut user = sample_user();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        user.apply_patch(
            &UserPatch {
                company: Some("ACME".into()),
                ..Default::default()
            },
            now,
        );
        assert_eq!(user.company, "ACME");
        assert_eq!(user.first_name, "Jean");
        assert_eq!(user.updated_at, "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = UserPatch {
            last_name: Some("Martin".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "last_name": "Martin" })
        );
        assert!(UserPatch::default().is_empty());
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordCredentials {
    pub email: String,
    pub password: String,
}

/// Identity returned by the auth service, without profile data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Token grant returned by the auth service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

/// Profile fields collected on the sign-up form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignUpProfile {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
}

/// Sign-up response: a session when confirmation is off, otherwise the bare user
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    User(AuthUser),
}

impl SignUpResponse {
    pub fn user(&self) -> &AuthUser {
        match self {
            SignUpResponse::Session(s) => &s.user,
            SignUpResponse::User(u) => u,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_response_accepts_both_shapes() {
        let with_session: SignUpResponse = serde_json::from_str(
            r#"{"access_token":"t","user":{"id":"u1","email":"a@b.fr"}}"#,
        )
        .unwrap();
        assert_eq!(with_session.user().id, "u1");

        let bare: SignUpResponse = serde_json::from_str(r#"{"id":"u2","email":null}"#).unwrap();
        assert_eq!(bare.user().id, "u2");
    }
}

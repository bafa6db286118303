use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// Request body for token issuance.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful token issuance.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Request body for PATCH /user/me. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_serializes_without_secrets() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            name: "Alice".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice@example.com"));
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }

    #[test]
    fn create_user_request_ignores_owner_fields() {
        // Client-supplied ids/owner fields must have no effect anywhere; serde
        // drops unknown fields on the floor.
        let body = r#"{"email":"a@b.com","password":"longenough","id":"evil","user_id":"evil"}"#;
        let req: CreateUserRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.email, "a@b.com");
        assert_eq!(req.name, "");
    }
}

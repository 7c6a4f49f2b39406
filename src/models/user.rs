use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

lazy_static! {
    // Usernames: alphanumeric, underscores, hyphens
    pub static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// The role a user acts under.
/// Corresponds to the `user_role` SQL enum.
///
/// `SystemAdmin` provisions companies and users across all tenants and belongs
/// to no company itself; `Manager` and `Worker` are scoped to one company.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SystemAdmin,
    Manager,
    Worker,
}

/// A user row as stored in the database.
///
/// The bcrypt hash never leaves the database layer: it is skipped during
/// serialization, so a `User` can be returned from a handler without leaking it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    /// Tenant the user belongs to. `None` for system administrators.
    pub company_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Payload for provisioning a user (system admin only).
#[derive(Debug, Deserialize, Validate)]
pub struct NewUserRequest {
    /// Must be between 3 and 32 characters, alphanumeric plus underscores or hyphens.
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    /// Defaults to `worker` when omitted. `system_admin` is rejected here;
    /// the only path to an admin account is the first-run setup endpoint.
    pub role: Option<Role>,
    /// Company the user is provisioned into. Required for managers and workers.
    pub company_id: Option<i32>,
}

/// Public projection of a user, returned by the listing endpoints.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub company_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_request_validation() {
        let input = NewUserRequest {
            username: "dana_levi".to_string(),
            password: "password123".to_string(),
            full_name: "Dana Levi".to_string(),
            role: Some(Role::Worker),
            company_id: Some(1),
        };
        assert!(input.validate().is_ok());

        let input = NewUserRequest {
            username: "dana levi!".to_string(),
            password: "password123".to_string(),
            full_name: "Dana Levi".to_string(),
            role: None,
            company_id: Some(1),
        };
        assert!(input.validate().is_err(), "spaces and punctuation are not allowed in usernames");

        let input = NewUserRequest {
            username: "dl".to_string(),
            password: "password123".to_string(),
            full_name: "Dana Levi".to_string(),
            role: None,
            company_id: Some(1),
        };
        assert!(input.validate().is_err(), "username too short");

        let input = NewUserRequest {
            username: "dana_levi".to_string(),
            password: "123".to_string(),
            full_name: "Dana Levi".to_string(),
            role: None,
            company_id: Some(1),
        };
        assert!(input.validate().is_err(), "password too short");

        let input = NewUserRequest {
            username: "dana_levi".to_string(),
            password: "password123".to_string(),
            full_name: "".to_string(),
            role: None,
            company_id: Some(1),
        };
        assert!(input.validate().is_err(), "full name must not be empty");
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: 7,
            username: "dana_levi".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            full_name: "Dana Levi".to_string(),
            role: Role::Manager,
            company_id: Some(3),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$12$secret"));
        assert!(json.contains("dana_levi"));
    }
}

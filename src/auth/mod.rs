pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{User, USERNAME_REGEX};
use crate::models::Role;

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Payload for a login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Must be between 3 and 32 characters, alphanumeric, underscores or hyphens.
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
}

/// Payload for the first-run setup request that creates the initial
/// system administrator. Only honored while no system admin exists.
#[derive(Debug, Deserialize, Validate)]
pub struct SetupRequest {
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
}

/// The authenticated identity as sent back to clients: the token payload
/// minus anything secret.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub company_id: Option<i32>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            company_id: user.company_id,
        }
    }
}

/// Response structure after successful authentication.
/// Contains the JWT access token and the authenticated user.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT for session authentication.
    pub token: String,
    pub user: SessionUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            username: "dana_levi".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_username_login = LoginRequest {
            username: "dana levi!".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_username_login.validate().is_err());

        let short_password_login = LoginRequest {
            username: "dana_levi".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_login.validate().is_err());
    }

    #[test]
    fn test_setup_request_validation() {
        let valid_setup = SetupRequest {
            username: "root-admin".to_string(),
            password: "password123".to_string(),
            full_name: "System Administrator".to_string(),
        };
        assert!(valid_setup.validate().is_ok());

        let short_username = SetupRequest {
            username: "ra".to_string(),
            password: "password123".to_string(),
            full_name: "System Administrator".to_string(),
        };
        assert!(short_username.validate().is_err());

        let empty_name = SetupRequest {
            username: "root-admin".to_string(),
            password: "password123".to_string(),
            full_name: "".to_string(),
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_session_user_from_user() {
        let user = User {
            id: 5,
            username: "dana_levi".to_string(),
            password_hash: "hash".to_string(),
            full_name: "Dana Levi".to_string(),
            role: Role::Worker,
            company_id: Some(2),
            created_at: chrono::Utc::now(),
        };
        let session: SessionUser = (&user).into();
        assert_eq!(session.id, 5);
        assert_eq!(session.company_id, Some(2));
        assert!(!serde_json::to_string(&session).unwrap().contains("hash"));
    }
}

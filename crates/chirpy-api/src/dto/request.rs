//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use chirpy_core::error::AppError;
use chirpy_core::types::UserId;

/// Registration and credential update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Login email.
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Requested access token lifetime. Capped server-side.
    #[serde(default)]
    pub expires_in_seconds: Option<u64>,
}

/// New chirp body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChirpRequest {
    /// Post text.
    pub body: String,
}

/// Query string for listing chirps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListChirpsQuery {
    /// Only chirps by this author.
    pub author_id: Option<String>,
    /// `asc` (default) or `desc` by creation time.
    pub sort: Option<String>,
}

/// Billing webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRequest {
    /// Event name, e.g. `user.upgraded`.
    pub event: String,
    /// Event payload.
    pub data: WebhookData,
}

/// Billing webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookData {
    /// Affected account.
    pub user_id: UserId,
}

/// Runs `validator` rules and turns failures into a validation error.
pub fn validate<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        let ok = CredentialsRequest {
            email: "walt@breakingbad.com".into(),
            password: "04234".into(),
        };
        assert!(validate(&ok).is_ok());

        let bad_email = CredentialsRequest {
            email: "walt".into(),
            password: "04234".into(),
        };
        assert!(validate(&bad_email).is_err());

        let no_password = CredentialsRequest {
            email: "walt@breakingbad.com".into(),
            password: String::new(),
        };
        assert!(validate(&no_password).is_err());
    }

    #[test]
    fn test_login_ttl_optional() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.com","password":"x"}"#).unwrap();
        assert!(req.expires_in_seconds.is_none());
    }
}

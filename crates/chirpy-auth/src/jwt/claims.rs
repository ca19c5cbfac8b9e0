//! Access token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims payload of every access token. Field names on the wire are the
/// registered JWT claim names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account identifier as a string.
    #[serde(rename = "sub")]
    pub subject: String,
    /// Issuing service.
    #[serde(rename = "iss")]
    pub issuer: String,
    /// Issue time, seconds since the epoch.
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiry time, seconds since the epoch.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    /// Whether the token has expired at `now`. A token is still valid at
    /// the exact second of its expiry.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.expires_at
    }

    /// Returns the expiry as a `DateTime<Utc>`.
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let claims = Claims {
            subject: "abc".into(),
            issuer: "chirpy".into(),
            issued_at: 10,
            expires_at: 20,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], "abc");
        assert_eq!(json["iss"], "chirpy");
        assert_eq!(json["iat"], 10);
        assert_eq!(json["exp"], 20);
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = Claims {
            subject: "abc".into(),
            issuer: "chirpy".into(),
            issued_at: 10,
            expires_at: 20,
        };
        let at = |s| DateTime::from_timestamp(s, 0).unwrap();
        assert!(!claims.is_expired_at(at(20)));
        assert!(claims.is_expired_at(at(21)));
    }
}

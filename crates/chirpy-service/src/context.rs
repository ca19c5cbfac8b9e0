//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};

use chirpy_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the API layer only after an access token has validated, so
/// `user_id` is always a verified identity.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated caller.
    pub user_id: UserId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, request_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            request_time,
        }
    }
}

//! Request context carrying the authenticated user and client details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use authsvc_auth::jwt::Claims;
use authsvc_core::types::{TokenId, UserId};
use authsvc_entity::login_history::ClientInfo;

/// Context for the current authenticated request.
///
/// Built from the claims of an authorized access token so that every
/// operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// ID of the access token the request was made with.
    pub token_id: TokenId,
    /// Client details of the request.
    pub client: ClientInfo,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context from authorized access token claims.
    pub fn from_claims(claims: &Claims, client: ClientInfo) -> Self {
        Self {
            user_id: claims.sub,
            token_id: claims.jti,
            client,
            request_time: Utc::now(),
        }
    }
}

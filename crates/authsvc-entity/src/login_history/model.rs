//! Login history entity model.

use authsvc_core::types::{LoginHistoryId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest textual IPv6 address.
const MAX_IP_LEN: usize = 45;

/// One successful login of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginHistory {
    /// Unique entry identifier.
    pub id: LoginHistoryId,
    /// The user who logged in.
    pub user_id: UserId,
    /// User-Agent header of the client, if any.
    pub user_agent: Option<String>,
    /// Remote address of the client, if known.
    pub ip_address: Option<String>,
    /// When the login happened.
    pub login_at: DateTime<Utc>,
}

impl LoginHistory {
    /// Build a stored entry from creation data.
    pub fn from_create(data: CreateLoginHistory) -> Self {
        Self {
            id: LoginHistoryId::new(),
            user_id: data.user_id,
            user_agent: data.client.user_agent,
            ip_address: data.client.ip_address,
            login_at: Utc::now(),
        }
    }
}

/// Client details captured at login time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInfo {
    /// User-Agent header.
    pub user_agent: Option<String>,
    /// Remote IP address.
    pub ip_address: Option<String>,
}

impl ClientInfo {
    /// Create client info, truncating the IP to the storable length.
    pub fn new(user_agent: Option<String>, ip_address: Option<String>) -> Self {
        Self {
            user_agent,
            ip_address: ip_address.map(|ip| ip.chars().take(MAX_IP_LEN).collect()),
        }
    }
}

/// Data required to record a login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoginHistory {
    /// The user who logged in.
    pub user_id: UserId,
    /// Client details.
    pub client: ClientInfo,
}

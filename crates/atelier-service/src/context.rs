//! Context for admin requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated admin performing a write.
///
/// Passed into every mutating service method so that writes are logged
/// with who made them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminContext {
    /// Admin username from the access token.
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl AdminContext {
    /// Create a context for `username`, stamped now.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            request_time: Utc::now(),
        }
    }
}

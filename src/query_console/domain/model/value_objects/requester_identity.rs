use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Explicit request-scoped identity threaded through submission, approval and streaming.
#[derive(Clone, Debug)]
pub struct RequesterIdentity {
    pub user_id: Uuid,
    pub username: String,
    pub is_admin: bool,
    pub mfa_enabled: bool,
    pub last_auth_at: DateTime<Utc>,
    pub last_mfa_at: Option<DateTime<Utc>>,
}

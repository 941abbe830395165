use chrono::{DateTime, Utc};

use crate::iam_integration::domain::model::value_objects::authenticated_user_id::AuthenticatedUserId;

/// Request-scoped identity resolved from a bearer token.
#[derive(Clone, Debug)]
pub struct AuthenticatedSession {
    pub user_id: AuthenticatedUserId,
    pub username: String,
    pub is_admin: bool,
    pub mfa_enabled: bool,
    pub last_auth_at: DateTime<Utc>,
    pub last_mfa_at: Option<DateTime<Utc>>,
}

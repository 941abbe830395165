use chrono::{DateTime, Duration, Utc};

use crate::query_console::domain::model::{
    enums::query_console_domain_error::QueryConsoleDomainError,
    value_objects::requester_identity::RequesterIdentity,
};

/// Requires a recent primary authentication and, for MFA users, a recent MFA event.
pub fn ensure_recent_authentication(
    identity: &RequesterIdentity,
    now: DateTime<Utc>,
    max_age: Duration,
) -> Result<(), QueryConsoleDomainError> {
    if now - identity.last_auth_at > max_age {
        return Err(QueryConsoleDomainError::StepUpRequired);
    }

    if identity.mfa_enabled {
        match identity.last_mfa_at {
            Some(last_mfa_at) if now - last_mfa_at <= max_age => {}
            _ => return Err(QueryConsoleDomainError::MfaStepUpRequired),
        }
    }

    Ok(())
}

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::access_control::domain::model::value_objects::policy_constraints::PolicyConstraints;

/// One authorizer verdict, including the constraints it handed out.
#[derive(Clone, Debug)]
pub struct AuthorizationDecisionAuditedEvent {
    pub principal_id: Uuid,
    pub request_id: Option<String>,
    pub resource_name: String,
    pub action_name: String,
    pub environment: String,
    pub allowed: bool,
    pub reason: String,
    pub constraints: PolicyConstraints,
    pub occurred_at: DateTime<Utc>,
}

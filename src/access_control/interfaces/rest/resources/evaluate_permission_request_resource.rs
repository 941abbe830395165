use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatePermissionRequestResource {
    #[validate(length(min = 1))]
    pub principal_id: String,
    #[serde(default)]
    pub is_admin: bool,
    #[validate(length(min = 1))]
    pub action_name: String,
    #[validate(length(min = 1))]
    pub resource_name: String,
    #[serde(default)]
    pub environment: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EvaluatePermissionResponseResource {
    pub allowed: bool,
    pub reason: String,
    pub constraints: PolicyConstraintsResource,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConstraintsResource {
    pub require_where: bool,
    pub read_only: bool,
    pub max_rows: u32,
    pub timeout_ms: u64,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Exactly one of `principalId` or `groupName` must be set.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequestResource {
    pub principal_id: Option<String>,
    pub group_name: Option<String>,
    #[validate(length(min = 1))]
    pub role_name: String,
}

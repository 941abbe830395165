use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpsertPolicyDocumentRequestResource {
    #[serde(default)]
    pub version: String,
    #[validate(length(max = 512))]
    pub rules: Vec<PolicyRuleResource>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PolicyRuleResource {
    /// `allow` or `deny`. Only allow rules grant access.
    pub effect: String,
    pub actions: Vec<String>,
    pub resources: Vec<String>,
    #[serde(default)]
    pub conditions: PolicyRuleConditionsResource,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRuleConditionsResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_where: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<String>,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQueryRequestResource {
    #[validate(length(min = 1))]
    pub statement: String,
    pub approval_id: Option<String>,
    pub max_rows: Option<u32>,
    pub timeout_ms: Option<u64>,
}

/// `ready` carries `queryId`; `pending_approval` carries `approvalId`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQueryResponseResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_id: Option<String>,
}

impl SubmitQueryResponseResource {
    pub fn ready(query_id: String) -> Self {
        Self {
            query_id: Some(query_id),
            status: "ready".to_string(),
            approval_id: None,
        }
    }

    pub fn pending_approval(approval_id: String) -> Self {
        Self {
            query_id: None,
            status: "pending_approval".to_string(),
            approval_id: Some(approval_id),
        }
    }
}

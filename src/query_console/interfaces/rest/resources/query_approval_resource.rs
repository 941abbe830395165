use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::query_console::domain::model::entities::query_approval::QueryApproval;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryApprovalResource {
    pub id: Uuid,
    pub connection_id: Uuid,
    pub user_id: Uuid,
    pub statement: String,
    pub status: String,
    pub environment: String,
    pub created_at: DateTime<Utc>,
    pub decided_by: Option<Uuid>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl From<QueryApproval> for QueryApprovalResource {
    fn from(approval: QueryApproval) -> Self {
        Self {
            id: approval.id,
            connection_id: approval.connection_id.value(),
            user_id: approval.user_id,
            statement: approval.statement,
            status: approval.status.as_str().to_string(),
            environment: approval.environment,
            created_at: approval.created_at,
            decided_by: approval.decided_by,
            decided_at: approval.decided_at,
        }
    }
}

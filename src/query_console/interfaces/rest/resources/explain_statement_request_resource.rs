use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ExplainStatementRequestResource {
    #[validate(length(min = 1))]
    pub statement: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ExplainStatementResponseResource {
    #[schema(value_type = Object)]
    pub plan: Value,
}

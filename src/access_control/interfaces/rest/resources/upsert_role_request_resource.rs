use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpsertRoleRequestResource {
    #[validate(length(max = 256))]
    pub permissions: Vec<String>,
}

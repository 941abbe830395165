use async_trait::async_trait;

use crate::access_control::domain::model::{
    entities::policy_document::PolicyDocument,
    enums::access_control_domain_error::AccessControlDomainError,
};

#[derive(Clone, Debug)]
pub struct PolicyDocumentRecord {
    pub name: String,
    pub document: PolicyDocument,
}

#[async_trait]
pub trait PolicyDocumentRepository: Send + Sync {
    async fn upsert_document(
        &self,
        record: PolicyDocumentRecord,
    ) -> Result<(), AccessControlDomainError>;

    async fn list_documents(&self) -> Result<Vec<PolicyDocumentRecord>, AccessControlDomainError>;
}

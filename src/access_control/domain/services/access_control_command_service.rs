use async_trait::async_trait;

use crate::access_control::domain::model::{
    commands::{
        assign_role_to_principal_command::AssignRoleToPrincipalCommand,
        upsert_policy_document_command::UpsertPolicyDocumentCommand,
        upsert_role_command::UpsertRoleCommand,
    },
    enums::access_control_domain_error::AccessControlDomainError,
};

#[async_trait]
pub trait AccessControlCommandService: Send + Sync {
    async fn handle_assign_role(
        &self,
        command: AssignRoleToPrincipalCommand,
    ) -> Result<(), AccessControlDomainError>;

    async fn handle_upsert_role(&self, command: UpsertRoleCommand)
    -> Result<(), AccessControlDomainError>;

    async fn handle_upsert_policy_document(
        &self,
        command: UpsertPolicyDocumentCommand,
    ) -> Result<(), AccessControlDomainError>;
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::access_control::{
    application::snapshots::policy_engine_snapshot::PolicyEngineSnapshot,
    domain::{
        model::{
            commands::{
                assign_role_to_principal_command::AssignRoleToPrincipalCommand,
                upsert_policy_document_command::UpsertPolicyDocumentCommand,
                upsert_role_command::UpsertRoleCommand,
            },
            entities::role_definition::RoleDefinition,
            enums::access_control_domain_error::AccessControlDomainError,
        },
        services::access_control_command_service::AccessControlCommandService,
    },
    infrastructure::persistence::repositories::{
        policy_document_repository::{PolicyDocumentRecord, PolicyDocumentRepository},
        role_assignment_repository::RoleAssignmentRepository,
    },
};

pub struct AccessControlCommandServiceImpl {
    role_assignment_repository: Arc<dyn RoleAssignmentRepository>,
    policy_document_repository: Arc<dyn PolicyDocumentRepository>,
    policy_snapshot: Arc<PolicyEngineSnapshot>,
}

impl AccessControlCommandServiceImpl {
    pub fn new(
        role_assignment_repository: Arc<dyn RoleAssignmentRepository>,
        policy_document_repository: Arc<dyn PolicyDocumentRepository>,
        policy_snapshot: Arc<PolicyEngineSnapshot>,
    ) -> Self {
        Self {
            role_assignment_repository,
            policy_document_repository,
            policy_snapshot,
        }
    }
}

#[async_trait]
impl AccessControlCommandService for AccessControlCommandServiceImpl {
    async fn handle_assign_role(
        &self,
        command: AssignRoleToPrincipalCommand,
    ) -> Result<(), AccessControlDomainError> {
        self.role_assignment_repository
            .assign_role(command.target(), command.role_name())
            .await
    }

    async fn handle_upsert_role(&self, command: UpsertRoleCommand) -> Result<(), AccessControlDomainError> {
        self.role_assignment_repository
            .upsert_role(RoleDefinition {
                name: command.role_name().value().to_string(),
                permissions: command
                    .permissions()
                    .iter()
                    .map(|p| p.value().to_string())
                    .collect(),
            })
            .await
    }

    async fn handle_upsert_policy_document(
        &self,
        command: UpsertPolicyDocumentCommand,
    ) -> Result<(), AccessControlDomainError> {
        self.policy_document_repository
            .upsert_document(PolicyDocumentRecord {
                name: command.name().to_string(),
                document: command.document().clone(),
            })
            .await?;

        if let Err(e) = self.policy_snapshot.refresh().await {
            tracing::warn!(error = %e, policy = command.name(), "policy refresh after upsert failed");
        }

        Ok(())
    }
}

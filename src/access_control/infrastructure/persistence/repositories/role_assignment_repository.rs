use async_trait::async_trait;

use crate::access_control::domain::model::{
    commands::assign_role_to_principal_command::RoleBindingTarget,
    entities::role_definition::RoleDefinition,
    enums::access_control_domain_error::AccessControlDomainError,
    value_objects::{principal_id::PrincipalId, role_name::RoleName},
};

#[async_trait]
pub trait RoleAssignmentRepository: Send + Sync {
    async fn upsert_role(&self, role: RoleDefinition) -> Result<(), AccessControlDomainError>;

    async fn assign_role(
        &self,
        target: &RoleBindingTarget,
        role_name: &RoleName,
    ) -> Result<(), AccessControlDomainError>;

    /// Effective roles: direct bindings plus bindings inherited through groups.
    async fn find_roles_by_principal(
        &self,
        principal_id: &PrincipalId,
    ) -> Result<Vec<RoleDefinition>, AccessControlDomainError>;
}

use async_trait::async_trait;
use sqlx::PgPool;

use crate::access_control::{
    domain::model::{
        commands::assign_role_to_principal_command::RoleBindingTarget,
        entities::role_definition::RoleDefinition,
        enums::access_control_domain_error::AccessControlDomainError,
        value_objects::{principal_id::PrincipalId, role_name::RoleName},
    },
    infrastructure::persistence::repositories::role_assignment_repository::RoleAssignmentRepository,
};

pub struct SqlxRoleAssignmentRepositoryImpl {
    pool: PgPool,
}

impl SqlxRoleAssignmentRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleAssignmentRepository for SqlxRoleAssignmentRepositoryImpl {
    async fn upsert_role(&self, role: RoleDefinition) -> Result<(), AccessControlDomainError> {
        let statement = r#"
            INSERT INTO access_roles (name, permissions)
            VALUES ($1, $2)
            ON CONFLICT (name)
            DO UPDATE SET permissions = EXCLUDED.permissions
        "#;

        sqlx::query(statement)
            .bind(&role.name)
            .bind(&role.permissions)
            .execute(&self.pool)
            .await
            .map_err(|e| AccessControlDomainError::InfrastructureError(e.to_string()))?;

        Ok(())
    }

    async fn assign_role(
        &self,
        target: &RoleBindingTarget,
        role_name: &RoleName,
    ) -> Result<(), AccessControlDomainError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM access_roles WHERE name = $1)",
        )
        .bind(role_name.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccessControlDomainError::InfrastructureError(e.to_string()))?;

        if !exists {
            return Err(AccessControlDomainError::RoleNotFound);
        }

        let (principal_id, group_name) = match target {
            RoleBindingTarget::Principal(principal_id) => (Some(principal_id.value()), None),
            RoleBindingTarget::Group(group_name) => (None, Some(group_name.as_str())),
        };

        let statement = r#"
            INSERT INTO access_role_bindings (role_name, principal_id, group_name)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
        "#;

        sqlx::query(statement)
            .bind(role_name.value())
            .bind(principal_id)
            .bind(group_name)
            .execute(&self.pool)
            .await
            .map_err(|e| AccessControlDomainError::InfrastructureError(e.to_string()))?;

        Ok(())
    }

    async fn find_roles_by_principal(
        &self,
        principal_id: &PrincipalId,
    ) -> Result<Vec<RoleDefinition>, AccessControlDomainError> {
        let statement = r#"
            SELECT DISTINCT r.name, r.permissions
            FROM access_roles r
            JOIN access_role_bindings rb ON rb.role_name = r.name
            LEFT JOIN access_group_members gm ON gm.group_name = rb.group_name
            WHERE rb.principal_id = $1 OR gm.principal_id = $1
        "#;

        let rows = sqlx::query_as::<_, (String, Vec<String>)>(statement)
            .bind(principal_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AccessControlDomainError::InfrastructureError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(name, permissions)| RoleDefinition { name, permissions })
            .collect())
    }
}

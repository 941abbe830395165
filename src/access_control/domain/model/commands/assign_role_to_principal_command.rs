use uuid::Uuid;

use crate::access_control::domain::model::{
    enums::access_control_domain_error::AccessControlDomainError,
    value_objects::{principal_id::PrincipalId, role_name::RoleName},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoleBindingTarget {
    Principal(PrincipalId),
    Group(String),
}

#[derive(Clone, Debug)]
pub struct AssignRoleToPrincipalCommand {
    target: RoleBindingTarget,
    role_name: RoleName,
}

impl AssignRoleToPrincipalCommand {
    pub fn new(
        principal_id: Option<String>,
        group_name: Option<String>,
        role_name: String,
    ) -> Result<Self, AccessControlDomainError> {
        let group_name = group_name
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());

        let target = match (principal_id, group_name) {
            (Some(principal_id), None) => RoleBindingTarget::Principal(PrincipalId::new(principal_id)?),
            (None, Some(group_name)) => RoleBindingTarget::Group(group_name),
            _ => return Err(AccessControlDomainError::InvalidRoleBinding),
        };

        Ok(Self {
            target,
            role_name: RoleName::new(role_name)?,
        })
    }

    pub fn for_principal(principal_id: Uuid, role_name: String) -> Result<Self, AccessControlDomainError> {
        Ok(Self {
            target: RoleBindingTarget::Principal(PrincipalId::from(principal_id)),
            role_name: RoleName::new(role_name)?,
        })
    }

    pub fn target(&self) -> &RoleBindingTarget {
        &self.target
    }
    pub fn role_name(&self) -> &RoleName {
        &self.role_name
    }
}

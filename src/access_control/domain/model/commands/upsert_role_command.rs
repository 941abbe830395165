use crate::access_control::domain::model::{
    enums::access_control_domain_error::AccessControlDomainError,
    value_objects::{action_name::ActionName, role_name::RoleName},
};

#[derive(Clone, Debug)]
pub struct UpsertRoleCommand {
    role_name: RoleName,
    permissions: Vec<ActionName>,
}

impl UpsertRoleCommand {
    pub fn new(role_name: String, permissions: Vec<String>) -> Result<Self, AccessControlDomainError> {
        Ok(Self {
            role_name: RoleName::new(role_name)?,
            permissions: permissions
                .into_iter()
                .map(ActionName::new)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    pub fn role_name(&self) -> &RoleName {
        &self.role_name
    }
    pub fn permissions(&self) -> &[ActionName] {
        &self.permissions
    }
}

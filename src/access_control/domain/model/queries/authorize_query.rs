use crate::access_control::domain::model::{
    enums::access_control_domain_error::AccessControlDomainError,
    value_objects::{
        action_name::ActionName, environment_name::EnvironmentName, principal_id::PrincipalId,
        resource_name::ResourceName,
    },
};

#[derive(Clone, Debug)]
pub struct AuthorizeQuery {
    principal_id: PrincipalId,
    is_admin: bool,
    action_name: ActionName,
    resource_name: ResourceName,
    environment: EnvironmentName,
    request_id: Option<String>,
}

pub struct AuthorizeQueryParts {
    pub principal_id: String,
    pub is_admin: bool,
    pub action_name: String,
    pub resource_name: String,
    pub environment: String,
    pub request_id: Option<String>,
}

impl AuthorizeQuery {
    pub fn new(parts: AuthorizeQueryParts) -> Result<Self, AccessControlDomainError> {
        Ok(Self {
            principal_id: PrincipalId::new(parts.principal_id)?,
            is_admin: parts.is_admin,
            action_name: ActionName::new(parts.action_name)?,
            resource_name: ResourceName::new(parts.resource_name)?,
            environment: EnvironmentName::new(parts.environment),
            request_id: parts.request_id,
        })
    }

    pub fn principal_id(&self) -> &PrincipalId {
        &self.principal_id
    }
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
    pub fn action_name(&self) -> &ActionName {
        &self.action_name
    }
    pub fn resource_name(&self) -> &ResourceName {
        &self.resource_name
    }
    pub fn environment(&self) -> &EnvironmentName {
        &self.environment
    }
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}

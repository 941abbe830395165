use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessControlDomainError {
    #[error("principal id is invalid")]
    InvalidPrincipalId,

    #[error("role name is invalid")]
    InvalidRoleName,

    #[error("resource name is invalid")]
    InvalidResourceName,

    #[error("action name is invalid")]
    InvalidActionName,

    #[error("policy document is invalid: {0}")]
    InvalidPolicyDocument(String),

    #[error("role binding must target exactly one principal or group")]
    InvalidRoleBinding,

    #[error("access denied")]
    AccessDenied,

    #[error("role not found")]
    RoleNotFound,

    #[error("infrastructure error: {0}")]
    InfrastructureError(String),
}

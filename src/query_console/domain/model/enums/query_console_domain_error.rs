use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryConsoleDomainError {
    #[error("connection id is invalid")]
    InvalidConnectionId,

    #[error("statement must not be empty")]
    InvalidStatement,

    #[error("approval id is invalid")]
    InvalidApprovalId,

    #[error("query id is invalid")]
    InvalidQueryId,

    #[error("namespace or entity name is invalid")]
    InvalidEntityName,

    #[error("invalid authorization request: {0}")]
    InvalidAuthorizationRequest(String),

    #[error("connection not found")]
    ConnectionNotFound,

    #[error("approval not found")]
    ApprovalNotFound,

    #[error("query not found or expired")]
    JobNotFound,

    #[error("access denied")]
    AccessDenied,

    #[error("read-only policy forbids write statements")]
    ReadOnlyViolation,

    #[error("where clause required for write statements")]
    WhereClauseRequired,

    #[error("dangerous statement requires admin")]
    DangerousStatement,

    #[error("step up required")]
    StepUpRequired,

    #[error("mfa step up required")]
    MfaStepUpRequired,

    #[error("approval is not approved")]
    ApprovalNotApproved,

    #[error("approval does not match this request")]
    ApprovalMismatch,

    #[error("approval already decided")]
    ApprovalAlreadyDecided,

    #[error("query approval is disabled")]
    ApprovalDisabled,

    #[error("unsupported backend: {0}")]
    UnsupportedBackend(String),

    #[error("adapter error: {0}")]
    AdapterError(String),

    #[error("infrastructure error: {0}")]
    InfrastructureError(String),
}

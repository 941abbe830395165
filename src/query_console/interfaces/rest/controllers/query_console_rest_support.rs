use axum::{Json, http::StatusCode};
use validator::Validate;

use crate::{
    iam_integration::{
        domain::model::entities::authenticated_session::AuthenticatedSession,
        interfaces::acl::iam_authentication_facade::{IamAuthenticationFacade, IamIntegrationError},
    },
    query_console::{
        domain::model::{
            enums::query_console_domain_error::QueryConsoleDomainError,
            value_objects::requester_identity::RequesterIdentity,
        },
        interfaces::rest::resources::query_console_error_response_resource::QueryConsoleErrorResponseResource,
    },
    shared::interfaces::rest::error_correlation::record_internal_error,
};

pub type ErrorResponse = (StatusCode, Json<QueryConsoleErrorResponseResource>);

pub async fn resolve_identity(
    iam_authentication_facade: &dyn IamAuthenticationFacade,
    token: &str,
) -> Result<RequesterIdentity, ErrorResponse> {
    let session = iam_authentication_facade
        .resolve_session(token)
        .await
        .map_err(map_iam_error)?;

    Ok(requester_identity(session))
}

fn requester_identity(session: AuthenticatedSession) -> RequesterIdentity {
    RequesterIdentity {
        user_id: session.user_id.value(),
        username: session.username,
        is_admin: session.is_admin,
        mfa_enabled: session.mfa_enabled,
        last_auth_at: session.last_auth_at,
        last_mfa_at: session.last_mfa_at,
    }
}

pub fn validate<T: Validate>(request: &T) -> Result<(), ErrorResponse> {
    request.validate().map_err(|validation_error| {
        error_response(StatusCode::BAD_REQUEST, validation_error.to_string())
    })
}

pub fn map_iam_error(error: IamIntegrationError) -> ErrorResponse {
    match error {
        IamIntegrationError::MissingToken | IamIntegrationError::InvalidToken(_) => {
            error_response(StatusCode::UNAUTHORIZED, "authentication required".to_string())
        }
        IamIntegrationError::Unavailable(detail) => internal_error(&detail),
    }
}

pub fn map_domain_error(error: QueryConsoleDomainError) -> ErrorResponse {
    let status = match &error {
        QueryConsoleDomainError::InvalidConnectionId
        | QueryConsoleDomainError::InvalidStatement
        | QueryConsoleDomainError::InvalidApprovalId
        | QueryConsoleDomainError::InvalidQueryId
        | QueryConsoleDomainError::InvalidEntityName
        | QueryConsoleDomainError::InvalidAuthorizationRequest(_)
        | QueryConsoleDomainError::UnsupportedBackend(_) => StatusCode::BAD_REQUEST,
        QueryConsoleDomainError::StepUpRequired | QueryConsoleDomainError::MfaStepUpRequired => {
            StatusCode::UNAUTHORIZED
        }
        QueryConsoleDomainError::AccessDenied
        | QueryConsoleDomainError::ReadOnlyViolation
        | QueryConsoleDomainError::WhereClauseRequired
        | QueryConsoleDomainError::DangerousStatement
        | QueryConsoleDomainError::ApprovalNotApproved
        | QueryConsoleDomainError::ApprovalMismatch => StatusCode::FORBIDDEN,
        QueryConsoleDomainError::ConnectionNotFound
        | QueryConsoleDomainError::ApprovalNotFound
        | QueryConsoleDomainError::JobNotFound
        | QueryConsoleDomainError::ApprovalDisabled => StatusCode::NOT_FOUND,
        QueryConsoleDomainError::ApprovalAlreadyDecided => StatusCode::CONFLICT,
        QueryConsoleDomainError::AdapterError(detail)
        | QueryConsoleDomainError::InfrastructureError(detail) => return internal_error(detail),
    };

    error_response(status, error.to_string())
}

fn error_response(status: StatusCode, message: String) -> ErrorResponse {
    (
        status,
        Json(QueryConsoleErrorResponseResource {
            message,
            error_id: None,
        }),
    )
}

fn internal_error(detail: &str) -> ErrorResponse {
    let error_id = record_internal_error("query_console", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(QueryConsoleErrorResponseResource {
            message: "internal error".to_string(),
            error_id: Some(error_id),
        }),
    )
}

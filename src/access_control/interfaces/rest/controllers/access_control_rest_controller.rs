use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{post, put},
};
use validator::Validate;

use crate::{
    access_control::{
        domain::{
            model::{
                commands::{
                    assign_role_to_principal_command::AssignRoleToPrincipalCommand,
                    upsert_policy_document_command::UpsertPolicyDocumentCommand,
                    upsert_role_command::UpsertRoleCommand,
                },
                enums::access_control_domain_error::AccessControlDomainError,
                queries::authorize_query::{AuthorizeQuery, AuthorizeQueryParts},
            },
            services::{
                access_control_command_service::AccessControlCommandService,
                access_control_query_service::AccessControlQueryService,
            },
        },
        interfaces::rest::resources::{
            access_control_error_response_resource::AccessControlErrorResponseResource,
            assign_role_request_resource::AssignRoleRequestResource,
            evaluate_permission_request_resource::{
                EvaluatePermissionRequestResource, EvaluatePermissionResponseResource,
                PolicyConstraintsResource,
            },
            upsert_policy_document_request_resource::UpsertPolicyDocumentRequestResource,
            upsert_role_request_resource::UpsertRoleRequestResource,
        },
    },
    iam_integration::interfaces::acl::iam_authentication_facade::{
        IamAuthenticationFacade, IamIntegrationError, bearer_token,
    },
    shared::interfaces::rest::error_correlation::record_internal_error,
};

type ErrorResponse = (StatusCode, Json<AccessControlErrorResponseResource>);

#[derive(Clone)]
pub struct AccessControlRestControllerState {
    pub command_service: Arc<dyn AccessControlCommandService>,
    pub query_service: Arc<dyn AccessControlQueryService>,
    pub iam_authentication_facade: Arc<dyn IamAuthenticationFacade>,
}

pub fn router(state: AccessControlRestControllerState) -> Router {
    Router::new()
        .route("/access-control/policies/:name", put(upsert_policy_document))
        .route("/access-control/roles/:name", put(upsert_role))
        .route(
            "/access-control/roles/assign",
            post(assign_role_to_principal),
        )
        .route(
            "/access-control/permissions/evaluate",
            post(evaluate_permission),
        )
        .with_state(state)
}

#[utoipa::path(
    put,
    path = "/access-control/policies/{name}",
    tag = "access-control",
    params(("name" = String, Path, description = "Policy document name")),
    request_body = UpsertPolicyDocumentRequestResource,
    responses(
        (status = 204, description = "Policy document stored and snapshot refreshed"),
        (status = 400, description = "Invalid request", body = AccessControlErrorResponseResource),
        (status = 401, description = "Missing or invalid session", body = AccessControlErrorResponseResource),
        (status = 403, description = "Admin session required", body = AccessControlErrorResponseResource),
        (status = 500, description = "Infrastructure error", body = AccessControlErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn upsert_policy_document(
    State(state): State<AccessControlRestControllerState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(request): Json<UpsertPolicyDocumentRequestResource>,
) -> Result<StatusCode, ErrorResponse> {
    require_admin(&state, &headers).await?;
    validate(&request)?;

    let document = serde_json::to_value(&request).map_err(|e| {
        map_domain_error(AccessControlDomainError::InvalidPolicyDocument(e.to_string()))
    })?;
    let command = UpsertPolicyDocumentCommand::new(name, document).map_err(map_domain_error)?;

    state
        .command_service
        .handle_upsert_policy_document(command)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/access-control/roles/{name}",
    tag = "access-control",
    params(("name" = String, Path, description = "Role name")),
    request_body = UpsertRoleRequestResource,
    responses(
        (status = 204, description = "Role stored"),
        (status = 400, description = "Invalid request", body = AccessControlErrorResponseResource),
        (status = 401, description = "Missing or invalid session", body = AccessControlErrorResponseResource),
        (status = 403, description = "Admin session required", body = AccessControlErrorResponseResource),
        (status = 500, description = "Infrastructure error", body = AccessControlErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn upsert_role(
    State(state): State<AccessControlRestControllerState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(request): Json<UpsertRoleRequestResource>,
) -> Result<StatusCode, ErrorResponse> {
    require_admin(&state, &headers).await?;
    validate(&request)?;

    let command = UpsertRoleCommand::new(name, request.permissions).map_err(map_domain_error)?;

    state
        .command_service
        .handle_upsert_role(command)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/access-control/roles/assign",
    tag = "access-control",
    request_body = AssignRoleRequestResource,
    responses(
        (status = 204, description = "Role assigned"),
        (status = 400, description = "Invalid request", body = AccessControlErrorResponseResource),
        (status = 401, description = "Missing or invalid session", body = AccessControlErrorResponseResource),
        (status = 403, description = "Admin session required", body = AccessControlErrorResponseResource),
        (status = 404, description = "Role not found", body = AccessControlErrorResponseResource),
        (status = 500, description = "Infrastructure error", body = AccessControlErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn assign_role_to_principal(
    State(state): State<AccessControlRestControllerState>,
    headers: HeaderMap,
    Json(request): Json<AssignRoleRequestResource>,
) -> Result<StatusCode, ErrorResponse> {
    require_admin(&state, &headers).await?;
    validate(&request)?;

    let command = AssignRoleToPrincipalCommand::new(
        request.principal_id,
        request.group_name,
        request.role_name,
    )
    .map_err(map_domain_error)?;

    state
        .command_service
        .handle_assign_role(command)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/access-control/permissions/evaluate",
    tag = "access-control",
    request_body = EvaluatePermissionRequestResource,
    responses(
        (status = 200, description = "Authorization decision", body = EvaluatePermissionResponseResource),
        (status = 400, description = "Invalid request", body = AccessControlErrorResponseResource),
        (status = 401, description = "Missing or invalid session", body = AccessControlErrorResponseResource),
        (status = 403, description = "Admin session required", body = AccessControlErrorResponseResource),
        (status = 500, description = "Infrastructure error", body = AccessControlErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn evaluate_permission(
    State(state): State<AccessControlRestControllerState>,
    headers: HeaderMap,
    Json(request): Json<EvaluatePermissionRequestResource>,
) -> Result<Json<EvaluatePermissionResponseResource>, ErrorResponse> {
    require_admin(&state, &headers).await?;
    validate(&request)?;

    let query = AuthorizeQuery::new(AuthorizeQueryParts {
        principal_id: request.principal_id,
        is_admin: request.is_admin,
        action_name: request.action_name,
        resource_name: request.resource_name,
        environment: request.environment,
        request_id: request.request_id,
    })
    .map_err(map_domain_error)?;

    let decision = state
        .query_service
        .handle_authorize(query)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(EvaluatePermissionResponseResource {
        allowed: decision.allowed,
        reason: decision.reason,
        constraints: PolicyConstraintsResource {
            require_where: decision.constraints.require_where,
            read_only: decision.constraints.read_only,
            max_rows: decision.constraints.max_rows,
            timeout_ms: decision.constraints.timeout_ms,
        },
    }))
}

async fn require_admin(
    state: &AccessControlRestControllerState,
    headers: &HeaderMap,
) -> Result<(), ErrorResponse> {
    let token = bearer_token(headers).map_err(map_iam_error)?;
    let session = state
        .iam_authentication_facade
        .resolve_session(&token)
        .await
        .map_err(map_iam_error)?;

    if !session.is_admin {
        return Err(map_domain_error(AccessControlDomainError::AccessDenied));
    }

    Ok(())
}

fn validate<T: Validate>(request: &T) -> Result<(), ErrorResponse> {
    request.validate().map_err(|validation_error| {
        (
            StatusCode::BAD_REQUEST,
            Json(AccessControlErrorResponseResource {
                message: validation_error.to_string(),
                error_id: None,
            }),
        )
    })
}

fn map_iam_error(error: IamIntegrationError) -> ErrorResponse {
    match error {
        IamIntegrationError::MissingToken | IamIntegrationError::InvalidToken(_) => (
            StatusCode::UNAUTHORIZED,
            Json(AccessControlErrorResponseResource {
                message: "authentication required".to_string(),
                error_id: None,
            }),
        ),
        IamIntegrationError::Unavailable(detail) => internal_error(&detail),
    }
}

fn map_domain_error(error: AccessControlDomainError) -> ErrorResponse {
    let status = match &error {
        AccessControlDomainError::InvalidPrincipalId
        | AccessControlDomainError::InvalidRoleName
        | AccessControlDomainError::InvalidResourceName
        | AccessControlDomainError::InvalidActionName
        | AccessControlDomainError::InvalidPolicyDocument(_)
        | AccessControlDomainError::InvalidRoleBinding => StatusCode::BAD_REQUEST,
        AccessControlDomainError::AccessDenied => StatusCode::FORBIDDEN,
        AccessControlDomainError::RoleNotFound => StatusCode::NOT_FOUND,
        AccessControlDomainError::InfrastructureError(detail) => return internal_error(detail),
    };

    (
        status,
        Json(AccessControlErrorResponseResource {
            message: error.to_string(),
            error_id: None,
        }),
    )
}

fn internal_error(detail: &str) -> ErrorResponse {
    let error_id = record_internal_error("access_control", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(AccessControlErrorResponseResource {
            message: "internal error".to_string(),
            error_id: Some(error_id),
        }),
    )
}

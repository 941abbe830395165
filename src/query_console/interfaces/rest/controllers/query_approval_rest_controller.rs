use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
};

use crate::{
    iam_integration::interfaces::acl::iam_authentication_facade::{
        IamAuthenticationFacade, bearer_token,
    },
    query_console::{
        domain::{
            model::commands::decide_query_approval_command::{
                ApprovalDecision, DecideQueryApprovalCommand,
            },
            services::{
                query_approval_command_service::QueryApprovalCommandService,
                query_approval_query_service::QueryApprovalQueryService,
            },
        },
        interfaces::rest::{
            controllers::query_console_rest_support::{
                ErrorResponse, map_domain_error, map_iam_error, resolve_identity,
            },
            resources::{
                query_approval_resource::QueryApprovalResource,
                query_console_error_response_resource::QueryConsoleErrorResponseResource,
            },
        },
    },
};

#[derive(Clone)]
pub struct QueryApprovalRestControllerState {
    pub command_service: Arc<dyn QueryApprovalCommandService>,
    pub query_service: Arc<dyn QueryApprovalQueryService>,
    pub iam_authentication_facade: Arc<dyn IamAuthenticationFacade>,
}

pub fn router(state: QueryApprovalRestControllerState) -> Router {
    Router::new()
        .route("/api/approvals", get(list_pending_approvals))
        .route("/api/approvals/:approval_id/approve", post(approve_query))
        .route("/api/approvals/:approval_id/deny", post(deny_query))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/approvals",
    tag = "query-approvals",
    responses(
        (status = 200, description = "Pending approvals, newest first", body = [QueryApprovalResource]),
        (status = 401, description = "Missing or invalid session", body = QueryConsoleErrorResponseResource),
        (status = 403, description = "Approver role required", body = QueryConsoleErrorResponseResource),
        (status = 404, description = "Query approval is disabled", body = QueryConsoleErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn list_pending_approvals(
    State(state): State<QueryApprovalRestControllerState>,
    headers: HeaderMap,
) -> Result<Json<Vec<QueryApprovalResource>>, ErrorResponse> {
    let token = bearer_token(&headers).map_err(map_iam_error)?;
    let identity = resolve_identity(state.iam_authentication_facade.as_ref(), &token).await?;

    let approvals = state
        .query_service
        .handle_list_pending(&identity)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(
        approvals
            .into_iter()
            .map(QueryApprovalResource::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/approvals/{approval_id}/approve",
    tag = "query-approvals",
    params(("approval_id" = String, Path, description = "Approval id")),
    responses(
        (status = 200, description = "Approval granted", body = QueryApprovalResource),
        (status = 400, description = "Invalid approval id", body = QueryConsoleErrorResponseResource),
        (status = 401, description = "Missing or invalid session", body = QueryConsoleErrorResponseResource),
        (status = 403, description = "Approver role required", body = QueryConsoleErrorResponseResource),
        (status = 404, description = "Approval not found or feature disabled", body = QueryConsoleErrorResponseResource),
        (status = 409, description = "Approval already decided", body = QueryConsoleErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn approve_query(
    State(state): State<QueryApprovalRestControllerState>,
    headers: HeaderMap,
    Path(approval_id): Path<String>,
) -> Result<Json<QueryApprovalResource>, ErrorResponse> {
    decide(state, headers, approval_id, ApprovalDecision::Approve).await
}

#[utoipa::path(
    post,
    path = "/api/approvals/{approval_id}/deny",
    tag = "query-approvals",
    params(("approval_id" = String, Path, description = "Approval id")),
    responses(
        (status = 200, description = "Approval denied", body = QueryApprovalResource),
        (status = 400, description = "Invalid approval id", body = QueryConsoleErrorResponseResource),
        (status = 401, description = "Missing or invalid session", body = QueryConsoleErrorResponseResource),
        (status = 403, description = "Approver role required", body = QueryConsoleErrorResponseResource),
        (status = 404, description = "Approval not found or feature disabled", body = QueryConsoleErrorResponseResource),
        (status = 409, description = "Approval already decided", body = QueryConsoleErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn deny_query(
    State(state): State<QueryApprovalRestControllerState>,
    headers: HeaderMap,
    Path(approval_id): Path<String>,
) -> Result<Json<QueryApprovalResource>, ErrorResponse> {
    decide(state, headers, approval_id, ApprovalDecision::Deny).await
}

async fn decide(
    state: QueryApprovalRestControllerState,
    headers: HeaderMap,
    approval_id: String,
    decision: ApprovalDecision,
) -> Result<Json<QueryApprovalResource>, ErrorResponse> {
    let token = bearer_token(&headers).map_err(map_iam_error)?;
    let identity = resolve_identity(state.iam_authentication_facade.as_ref(), &token).await?;

    let command = DecideQueryApprovalCommand::new(approval_id, decision).map_err(map_domain_error)?;
    let approval = state
        .command_service
        .handle_decide(&identity, command)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(QueryApprovalResource::from(approval)))
}

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, WebSocketUpgrade},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    iam_integration::interfaces::acl::iam_authentication_facade::{
        IamAuthenticationFacade, bearer_token,
    },
    query_console::{
        domain::{
            model::{
                commands::submit_query_command::{SubmitQueryCommand, SubmitQueryCommandParts},
                queries::{
                    browse_entity_query::{BrowseEntityQuery, BrowseEntityQueryParts},
                    explain_statement_query::ExplainStatementQuery,
                    stream_query_job_query::StreamQueryJobQuery,
                },
                value_objects::{
                    connection_id::ConnectionId, entity_path::EntityPath,
                    requester_identity::RequesterIdentity,
                },
            },
            services::{
                connection_inspection_query_service::ConnectionInspectionQueryService,
                query_stream_service::QueryStreamService,
                query_submission_service::{QuerySubmissionService, SubmissionOutcome},
            },
        },
        interfaces::rest::{
            controllers::query_console_rest_support::{
                ErrorResponse, map_domain_error, map_iam_error, resolve_identity, validate,
            },
            resources::{
                connection_catalog_resource::{
                    BrowseEntityQueryResource, BrowsePageResource, EntityInfoResource,
                    EntityListResource, NamespaceListResource,
                },
                explain_statement_request_resource::{
                    ExplainStatementRequestResource, ExplainStatementResponseResource,
                },
                query_console_error_response_resource::QueryConsoleErrorResponseResource,
                stream_query_params_resource::StreamQueryParamsResource,
                submit_query_request_resource::{
                    SubmitQueryRequestResource, SubmitQueryResponseResource,
                },
            },
            streaming::websocket_query_stream_sink::WebSocketQueryStreamSink,
        },
    },
};

#[derive(Clone)]
pub struct QueryConsoleRestControllerState {
    pub submission_service: Arc<dyn QuerySubmissionService>,
    pub stream_service: Arc<dyn QueryStreamService>,
    pub inspection_service: Arc<dyn ConnectionInspectionQueryService>,
    pub iam_authentication_facade: Arc<dyn IamAuthenticationFacade>,
}

pub fn router(state: QueryConsoleRestControllerState) -> Router {
    Router::new()
        .route("/api/connections/:connection_id/query", post(submit_query))
        .route(
            "/api/connections/:connection_id/query/:query_id/stream",
            get(stream_query),
        )
        .route("/api/connections/:connection_id/explain", post(explain_statement))
        .route("/api/connections/:connection_id/namespaces", get(list_namespaces))
        .route(
            "/api/connections/:connection_id/namespaces/:namespace/entities",
            get(list_entities),
        )
        .route(
            "/api/connections/:connection_id/namespaces/:namespace/entities/:entity",
            get(get_entity_info),
        )
        .route(
            "/api/connections/:connection_id/namespaces/:namespace/entities/:entity/rows",
            get(browse_entity),
        )
        .with_state(state)
}

async fn identity_from_headers(
    state: &QueryConsoleRestControllerState,
    headers: &HeaderMap,
) -> Result<RequesterIdentity, ErrorResponse> {
    let token = bearer_token(headers).map_err(map_iam_error)?;
    resolve_identity(state.iam_authentication_facade.as_ref(), &token).await
}

#[utoipa::path(
    post,
    path = "/api/connections/{connection_id}/query",
    tag = "query-console",
    params(("connection_id" = String, Path, description = "Connection id")),
    request_body = SubmitQueryRequestResource,
    responses(
        (status = 200, description = "Query accepted; open the stream with the returned id", body = SubmitQueryResponseResource),
        (status = 202, description = "Write deferred until an approver decides", body = SubmitQueryResponseResource),
        (status = 400, description = "Invalid request", body = QueryConsoleErrorResponseResource),
        (status = 401, description = "Missing session or step-up required", body = QueryConsoleErrorResponseResource),
        (status = 403, description = "Denied by policy or constraint", body = QueryConsoleErrorResponseResource),
        (status = 404, description = "Connection or approval not found", body = QueryConsoleErrorResponseResource),
        (status = 500, description = "Infrastructure error", body = QueryConsoleErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn submit_query(
    State(state): State<QueryConsoleRestControllerState>,
    headers: HeaderMap,
    Path(connection_id): Path<String>,
    Json(request): Json<SubmitQueryRequestResource>,
) -> Result<(StatusCode, Json<SubmitQueryResponseResource>), ErrorResponse> {
    let identity = identity_from_headers(&state, &headers).await?;
    validate(&request)?;

    let command = SubmitQueryCommand::new(SubmitQueryCommandParts {
        connection_id,
        statement: request.statement,
        approval_id: request.approval_id,
        max_rows: request.max_rows,
        timeout_ms: request.timeout_ms,
    })
    .map_err(map_domain_error)?;

    let outcome = state
        .submission_service
        .handle_submit(&identity, command)
        .await
        .map_err(map_domain_error)?;

    Ok(match outcome {
        SubmissionOutcome::Ready { query_id } => (
            StatusCode::OK,
            Json(SubmitQueryResponseResource::ready(query_id)),
        ),
        SubmissionOutcome::PendingApproval { approval_id } => (
            StatusCode::ACCEPTED,
            Json(SubmitQueryResponseResource::pending_approval(
                approval_id.to_string(),
            )),
        ),
    })
}

#[utoipa::path(
    get,
    path = "/api/connections/{connection_id}/query/{query_id}/stream",
    tag = "query-console",
    params(
        ("connection_id" = String, Path, description = "Connection id"),
        ("query_id" = String, Path, description = "Query id returned by submission"),
        StreamQueryParamsResource
    ),
    responses(
        (status = 101, description = "WebSocket upgrade; frames are start, schema, rows, end or error"),
        (status = 401, description = "Missing or invalid session", body = QueryConsoleErrorResponseResource),
        (status = 404, description = "Query not found or expired", body = QueryConsoleErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn stream_query(
    State(state): State<QueryConsoleRestControllerState>,
    headers: HeaderMap,
    Path((connection_id, query_id)): Path<(String, String)>,
    Query(params): Query<StreamQueryParamsResource>,
    upgrade: WebSocketUpgrade,
) -> Result<Response, ErrorResponse> {
    let token = match bearer_token(&headers) {
        Ok(token) => token,
        Err(error) => params
            .access_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| map_iam_error(error))?,
    };
    let identity = resolve_identity(state.iam_authentication_facade.as_ref(), &token).await?;

    let query = StreamQueryJobQuery::new(connection_id, query_id).map_err(map_domain_error)?;
    let job = state
        .stream_service
        .handle_open(&identity, query)
        .await
        .map_err(map_domain_error)?;

    let stream_service = state.stream_service.clone();
    Ok(upgrade
        .on_upgrade(move |socket| async move {
            let mut sink = WebSocketQueryStreamSink::new(socket);
            stream_service.handle_stream(job, &mut sink).await;
            sink.close().await;
        })
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/connections/{connection_id}/explain",
    tag = "query-console",
    params(("connection_id" = String, Path, description = "Connection id")),
    request_body = ExplainStatementRequestResource,
    responses(
        (status = 200, description = "Execution plan", body = ExplainStatementResponseResource),
        (status = 400, description = "Invalid request", body = QueryConsoleErrorResponseResource),
        (status = 401, description = "Missing or invalid session", body = QueryConsoleErrorResponseResource),
        (status = 403, description = "Denied by policy", body = QueryConsoleErrorResponseResource),
        (status = 404, description = "Connection not found", body = QueryConsoleErrorResponseResource),
        (status = 500, description = "Adapter or infrastructure error", body = QueryConsoleErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn explain_statement(
    State(state): State<QueryConsoleRestControllerState>,
    headers: HeaderMap,
    Path(connection_id): Path<String>,
    Json(request): Json<ExplainStatementRequestResource>,
) -> Result<Json<ExplainStatementResponseResource>, ErrorResponse> {
    let identity = identity_from_headers(&state, &headers).await?;
    validate(&request)?;

    let query =
        ExplainStatementQuery::new(connection_id, request.statement).map_err(map_domain_error)?;
    let plan = state
        .inspection_service
        .handle_explain(&identity, query)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ExplainStatementResponseResource { plan }))
}

#[utoipa::path(
    get,
    path = "/api/connections/{connection_id}/namespaces",
    tag = "query-console",
    params(("connection_id" = String, Path, description = "Connection id")),
    responses(
        (status = 200, description = "Namespaces visible on the connection", body = NamespaceListResource),
        (status = 401, description = "Missing or invalid session", body = QueryConsoleErrorResponseResource),
        (status = 403, description = "Denied by policy", body = QueryConsoleErrorResponseResource),
        (status = 404, description = "Connection not found", body = QueryConsoleErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn list_namespaces(
    State(state): State<QueryConsoleRestControllerState>,
    headers: HeaderMap,
    Path(connection_id): Path<String>,
) -> Result<Json<NamespaceListResource>, ErrorResponse> {
    let identity = identity_from_headers(&state, &headers).await?;
    let connection_id = ConnectionId::new(connection_id).map_err(map_domain_error)?;

    let namespaces = state
        .inspection_service
        .handle_list_namespaces(&identity, connection_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(NamespaceListResource { namespaces }))
}

#[utoipa::path(
    get,
    path = "/api/connections/{connection_id}/namespaces/{namespace}/entities",
    tag = "query-console",
    params(
        ("connection_id" = String, Path, description = "Connection id"),
        ("namespace" = String, Path, description = "Schema or database name")
    ),
    responses(
        (status = 200, description = "Entities in the namespace", body = EntityListResource),
        (status = 401, description = "Missing or invalid session", body = QueryConsoleErrorResponseResource),
        (status = 403, description = "Denied by policy", body = QueryConsoleErrorResponseResource),
        (status = 404, description = "Connection not found", body = QueryConsoleErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn list_entities(
    State(state): State<QueryConsoleRestControllerState>,
    headers: HeaderMap,
    Path((connection_id, namespace)): Path<(String, String)>,
) -> Result<Json<EntityListResource>, ErrorResponse> {
    let identity = identity_from_headers(&state, &headers).await?;
    let connection_id = ConnectionId::new(connection_id).map_err(map_domain_error)?;
    let path = EntityPath::namespace(namespace).map_err(map_domain_error)?;

    let entities = state
        .inspection_service
        .handle_list_entities(&identity, connection_id, path)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(EntityListResource { entities }))
}

#[utoipa::path(
    get,
    path = "/api/connections/{connection_id}/namespaces/{namespace}/entities/{entity}",
    tag = "query-console",
    params(
        ("connection_id" = String, Path, description = "Connection id"),
        ("namespace" = String, Path, description = "Schema or database name"),
        ("entity" = String, Path, description = "Table or collection name")
    ),
    responses(
        (status = 200, description = "Columns and indexes", body = EntityInfoResource),
        (status = 401, description = "Missing or invalid session", body = QueryConsoleErrorResponseResource),
        (status = 403, description = "Denied by policy", body = QueryConsoleErrorResponseResource),
        (status = 404, description = "Connection not found", body = QueryConsoleErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn get_entity_info(
    State(state): State<QueryConsoleRestControllerState>,
    headers: HeaderMap,
    Path((connection_id, namespace, entity)): Path<(String, String, String)>,
) -> Result<Json<EntityInfoResource>, ErrorResponse> {
    let identity = identity_from_headers(&state, &headers).await?;
    let connection_id = ConnectionId::new(connection_id).map_err(map_domain_error)?;
    let path = EntityPath::entity(namespace, entity).map_err(map_domain_error)?;

    let info = state
        .inspection_service
        .handle_get_entity_info(&identity, connection_id, path)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(EntityInfoResource::from(info)))
}

#[utoipa::path(
    get,
    path = "/api/connections/{connection_id}/namespaces/{namespace}/entities/{entity}/rows",
    tag = "query-console",
    params(
        ("connection_id" = String, Path, description = "Connection id"),
        ("namespace" = String, Path, description = "Schema or database name"),
        ("entity" = String, Path, description = "Table or collection name"),
        BrowseEntityQueryResource
    ),
    responses(
        (status = 200, description = "One page of rows, masked when PII masking is on", body = BrowsePageResource),
        (status = 401, description = "Missing or invalid session", body = QueryConsoleErrorResponseResource),
        (status = 403, description = "Denied by policy", body = QueryConsoleErrorResponseResource),
        (status = 404, description = "Connection not found", body = QueryConsoleErrorResponseResource),
        (status = 500, description = "Adapter or infrastructure error", body = QueryConsoleErrorResponseResource)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn browse_entity(
    State(state): State<QueryConsoleRestControllerState>,
    headers: HeaderMap,
    Path((connection_id, namespace, entity)): Path<(String, String, String)>,
    Query(params): Query<BrowseEntityQueryResource>,
) -> Result<Json<BrowsePageResource>, ErrorResponse> {
    let identity = identity_from_headers(&state, &headers).await?;

    let query = BrowseEntityQuery::new(BrowseEntityQueryParts {
        connection_id,
        namespace,
        entity,
        page: params.page,
        page_size: params.page_size,
        sort: params.sort,
    })
    .map_err(map_domain_error)?;
    let (page, page_size) = (query.page(), query.page_size());

    let result = state
        .inspection_service
        .handle_browse(&identity, query)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(BrowsePageResource::from_page(result, page, page_size)))
}

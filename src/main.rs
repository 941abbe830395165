use axum::Router;
use dotenvy::dotenv;
use query_console_api::{
    access_control::{
        build_access_control_router, build_access_control_services,
        interfaces::rest::resources::{
            access_control_error_response_resource::AccessControlErrorResponseResource,
            assign_role_request_resource::AssignRoleRequestResource,
            evaluate_permission_request_resource::{
                EvaluatePermissionRequestResource, EvaluatePermissionResponseResource,
                PolicyConstraintsResource,
            },
            upsert_policy_document_request_resource::{
                PolicyRuleConditionsResource, PolicyRuleResource,
                UpsertPolicyDocumentRequestResource,
            },
            upsert_role_request_resource::UpsertRoleRequestResource,
        },
    },
    config::app_config::AppConfig,
    iam_integration::build_iam_authentication_facade,
    query_console::{
        build_query_console_router,
        interfaces::rest::resources::{
            connection_catalog_resource::{
                BrowseEntityQueryResource, BrowsePageResource, ColumnResource, EntityInfoResource,
                EntityListResource, NamespaceListResource,
            },
            explain_statement_request_resource::{
                ExplainStatementRequestResource, ExplainStatementResponseResource,
            },
            query_approval_resource::QueryApprovalResource,
            query_console_error_response_resource::QueryConsoleErrorResponseResource,
            submit_query_request_resource::{
                SubmitQueryRequestResource, SubmitQueryResponseResource,
            },
        },
    },
    shared::interfaces::rest::openapi::security::BearerSecurityAddon,
};
use sqlx::{migrate, postgres::PgPoolOptions};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        query_console_api::query_console::interfaces::rest::controllers::query_console_rest_controller::submit_query,
        query_console_api::query_console::interfaces::rest::controllers::query_console_rest_controller::stream_query,
        query_console_api::query_console::interfaces::rest::controllers::query_console_rest_controller::explain_statement,
        query_console_api::query_console::interfaces::rest::controllers::query_console_rest_controller::list_namespaces,
        query_console_api::query_console::interfaces::rest::controllers::query_console_rest_controller::list_entities,
        query_console_api::query_console::interfaces::rest::controllers::query_console_rest_controller::get_entity_info,
        query_console_api::query_console::interfaces::rest::controllers::query_console_rest_controller::browse_entity,
        query_console_api::query_console::interfaces::rest::controllers::query_approval_rest_controller::list_pending_approvals,
        query_console_api::query_console::interfaces::rest::controllers::query_approval_rest_controller::approve_query,
        query_console_api::query_console::interfaces::rest::controllers::query_approval_rest_controller::deny_query,
        query_console_api::access_control::interfaces::rest::controllers::access_control_rest_controller::upsert_policy_document,
        query_console_api::access_control::interfaces::rest::controllers::access_control_rest_controller::upsert_role,
        query_console_api::access_control::interfaces::rest::controllers::access_control_rest_controller::assign_role_to_principal,
        query_console_api::access_control::interfaces::rest::controllers::access_control_rest_controller::evaluate_permission
    ),
    components(
        schemas(
            SubmitQueryRequestResource,
            SubmitQueryResponseResource,
            ExplainStatementRequestResource,
            ExplainStatementResponseResource,
            NamespaceListResource,
            EntityListResource,
            ColumnResource,
            EntityInfoResource,
            BrowseEntityQueryResource,
            BrowsePageResource,
            QueryApprovalResource,
            QueryConsoleErrorResponseResource,
            UpsertPolicyDocumentRequestResource,
            PolicyRuleResource,
            PolicyRuleConditionsResource,
            UpsertRoleRequestResource,
            AssignRoleRequestResource,
            EvaluatePermissionRequestResource,
            EvaluatePermissionResponseResource,
            PolicyConstraintsResource,
            AccessControlErrorResponseResource
        )
    ),
    tags(
        (name = "query-console", description = "Statement submission, result streaming and connection catalog"),
        (name = "query-approvals", description = "Approval workflow for production writes"),
        (name = "access-control", description = "Roles, policy documents and authorization decisions")
    ),
    modifiers(&BearerSecurityAddon)
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.control_plane_database_url())
        .await
        .expect("failed to connect to control-plane database");

    if config.auto_migrate {
        migrate!("./migrations")
            .run(&pool)
            .await
            .expect("failed to run control-plane migrations");
    }

    let iam_authentication_facade = build_iam_authentication_facade(&config, pool.clone());
    let access_control_services = build_access_control_services(&config, pool.clone())
        .await
        .expect("failed to build access control services");

    let access_control_router =
        build_access_control_router(&access_control_services, iam_authentication_facade.clone());
    let query_console_router = build_query_console_router(
        &config,
        pool,
        access_control_services.facade.clone(),
        iam_authentication_facade,
    );

    let app = Router::new()
        .merge(query_console_router)
        .merge(access_control_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind server address");

    tracing::info!(port = config.port, "query console api listening");
    tracing::info!("swagger ui available at http://localhost:{}/swagger-ui", config.port);

    axum::serve(listener, app)
        .await
        .expect("failed to start axum server");
}

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::{
    access_control::{
        application::{
            acl::access_control_facade_impl::AccessControlFacadeImpl,
            command_services::access_control_command_service_impl::AccessControlCommandServiceImpl,
            query_services::access_control_query_service_impl::AccessControlQueryServiceImpl,
            snapshots::policy_engine_snapshot::PolicyEngineSnapshot,
        },
        domain::services::{
            access_control_command_service::AccessControlCommandService,
            access_control_query_service::AccessControlQueryService,
        },
        infrastructure::persistence::repositories::postgres::{
            sqlx_authorization_decision_audit_repository_impl::SqlxAuthorizationDecisionAuditRepositoryImpl,
            sqlx_policy_document_repository_impl::SqlxPolicyDocumentRepositoryImpl,
            sqlx_role_assignment_repository_impl::SqlxRoleAssignmentRepositoryImpl,
        },
        interfaces::{
            acl::access_control_facade::AccessControlFacade,
            rest::controllers::access_control_rest_controller::{
                AccessControlRestControllerState, router,
            },
        },
    },
    config::app_config::AppConfig,
    iam_integration::interfaces::acl::iam_authentication_facade::IamAuthenticationFacade,
};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

/// Wired access-control services shared by the admin router and other contexts.
#[derive(Clone)]
pub struct AccessControlServices {
    pub command_service: Arc<dyn AccessControlCommandService>,
    pub query_service: Arc<dyn AccessControlQueryService>,
    pub facade: Arc<dyn AccessControlFacade>,
    pub policy_snapshot: Arc<PolicyEngineSnapshot>,
}

pub async fn build_access_control_services(
    config: &AppConfig,
    pool: PgPool,
) -> Result<AccessControlServices, String> {
    let policy_document_repository = Arc::new(SqlxPolicyDocumentRepositoryImpl::new(pool.clone()));
    let role_assignment_repository = Arc::new(SqlxRoleAssignmentRepositoryImpl::new(pool.clone()));
    let audit_repository = Arc::new(SqlxAuthorizationDecisionAuditRepositoryImpl::new(pool));

    let policy_snapshot = Arc::new(PolicyEngineSnapshot::new(
        policy_document_repository.clone(),
    ));
    policy_snapshot.refresh().await.map_err(|e| e.to_string())?;
    policy_snapshot.spawn_refresh(config.policy_refresh_interval);

    let command_service = Arc::new(AccessControlCommandServiceImpl::new(
        role_assignment_repository.clone(),
        policy_document_repository,
        policy_snapshot.clone(),
    ));
    let query_service = Arc::new(AccessControlQueryServiceImpl::new(
        policy_snapshot.clone(),
        role_assignment_repository,
        audit_repository,
    ));
    let facade = Arc::new(AccessControlFacadeImpl::new(query_service.clone()));

    Ok(AccessControlServices {
        command_service,
        query_service,
        facade,
        policy_snapshot,
    })
}

pub fn build_access_control_router(
    services: &AccessControlServices,
    iam_authentication_facade: Arc<dyn IamAuthenticationFacade>,
) -> Router {
    router(AccessControlRestControllerState {
        command_service: services.command_service.clone(),
        query_service: services.query_service.clone(),
        iam_authentication_facade,
    })
}

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::{
    access_control::interfaces::acl::access_control_facade::AccessControlFacade as AccessControlBcFacade,
    config::{
        app_config::AppConfig,
        feature_flags::{FeatureFlagProvider, StaticFeatureFlagProvider},
    },
    iam_integration::interfaces::acl::iam_authentication_facade::IamAuthenticationFacade,
    query_console::{
        application::{
            acl::access_control_facade_real_impl::AccessControlFacadeRealImpl,
            command_services::{
                query_approval_command_service_impl::QueryApprovalCommandServiceImpl,
                query_submission_service_impl::{
                    QueryExecutionLimits, QuerySubmissionServiceDependencies,
                    QuerySubmissionServiceImpl,
                },
            },
            query_services::{
                connection_inspection_query_service_impl::ConnectionInspectionQueryServiceImpl,
                query_approval_query_service_impl::QueryApprovalQueryServiceImpl,
                query_stream_service_impl::{QueryStreamServiceDependencies, QueryStreamServiceImpl},
            },
            registries::query_job_registry::QueryJobRegistry,
        },
        infrastructure::{
            adapters::{
                database_adapter::DatabaseAdapterResolver,
                postgres::sqlx_database_adapter_resolver_impl::SqlxDatabaseAdapterResolverImpl,
            },
            persistence::repositories::postgres::{
                sqlx_connection_repository_impl::SqlxConnectionRepositoryImpl,
                sqlx_pii_rule_repository_impl::SqlxPiiRuleRepositoryImpl,
                sqlx_query_approval_repository_impl::SqlxQueryApprovalRepositoryImpl,
                sqlx_query_console_audit_log_repository_impl::SqlxQueryConsoleAuditLogRepositoryImpl,
                sqlx_query_history_repository_impl::SqlxQueryHistoryRepositoryImpl,
            },
        },
        interfaces::{
            acl::access_control_facade::AccessControlFacade,
            rest::controllers::{
                query_approval_rest_controller::{self, QueryApprovalRestControllerState},
                query_console_rest_controller::{self, QueryConsoleRestControllerState},
            },
        },
    },
};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub fn build_query_console_router(
    config: &AppConfig,
    pool: PgPool,
    access_control_facade: Arc<dyn AccessControlBcFacade>,
    iam_authentication_facade: Arc<dyn IamAuthenticationFacade>,
) -> Router {
    let connection_repository = Arc::new(SqlxConnectionRepositoryImpl::new(pool.clone()));
    let approval_repository = Arc::new(SqlxQueryApprovalRepositoryImpl::new(pool.clone()));
    let history_repository = Arc::new(SqlxQueryHistoryRepositoryImpl::new(pool.clone()));
    let pii_rule_repository = Arc::new(SqlxPiiRuleRepositoryImpl::new(pool.clone()));
    let audit_repository = Arc::new(SqlxQueryConsoleAuditLogRepositoryImpl::new(pool));

    let access_control_facade: Arc<dyn AccessControlFacade> =
        Arc::new(AccessControlFacadeRealImpl::new(access_control_facade));
    let feature_flags: Arc<dyn FeatureFlagProvider> =
        Arc::new(StaticFeatureFlagProvider::from_config(config));
    let adapter_resolver: Arc<dyn DatabaseAdapterResolver> =
        Arc::new(SqlxDatabaseAdapterResolverImpl::new());

    let job_registry = Arc::new(QueryJobRegistry::new(config.job_ttl));
    job_registry.spawn_sweeper(config.job_sweep_interval);

    let submission_service = Arc::new(QuerySubmissionServiceImpl::new(
        QuerySubmissionServiceDependencies {
            connection_repository: connection_repository.clone(),
            approval_repository: approval_repository.clone(),
            history_repository: history_repository.clone(),
            audit_repository: audit_repository.clone(),
            access_control_facade: access_control_facade.clone(),
            feature_flags: feature_flags.clone(),
            job_registry: job_registry.clone(),
            limits: QueryExecutionLimits {
                global_max_rows: config.global_max_rows,
                statement_timeout_ms: config.statement_timeout_ms,
                step_up_max_age: config.step_up_max_age,
            },
        },
    ));
    let stream_service = Arc::new(QueryStreamServiceImpl::new(QueryStreamServiceDependencies {
        job_registry,
        connection_repository: connection_repository.clone(),
        adapter_resolver: adapter_resolver.clone(),
        pii_rule_repository: pii_rule_repository.clone(),
        history_repository,
        audit_repository: audit_repository.clone(),
        feature_flags: feature_flags.clone(),
    }));
    let inspection_service = Arc::new(ConnectionInspectionQueryServiceImpl::new(
        connection_repository,
        adapter_resolver,
        pii_rule_repository,
        access_control_facade.clone(),
        feature_flags.clone(),
    ));
    let approval_command_service = Arc::new(QueryApprovalCommandServiceImpl::new(
        approval_repository.clone(),
        audit_repository.clone(),
        access_control_facade.clone(),
        feature_flags.clone(),
    ));
    let approval_query_service = Arc::new(QueryApprovalQueryServiceImpl::new(
        approval_repository,
        access_control_facade,
        audit_repository,
        feature_flags,
    ));

    query_console_rest_controller::router(QueryConsoleRestControllerState {
        submission_service,
        stream_service,
        inspection_service,
        iam_authentication_facade: iam_authentication_facade.clone(),
    })
    .merge(query_approval_rest_controller::router(
        QueryApprovalRestControllerState {
            command_service: approval_command_service,
            query_service: approval_query_service,
            iam_authentication_facade,
        },
    ))
}

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::app_config::AppConfig,
    iam_integration::{
        application::acl::cached_iam_authentication_facade_impl::CachedIamAuthenticationFacadeImpl,
        infrastructure::persistence::repositories::postgres::sqlx_session_lookup_repository_impl::SqlxSessionLookupRepositoryImpl,
        interfaces::acl::iam_authentication_facade::IamAuthenticationFacade,
    },
};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub fn build_iam_authentication_facade(
    config: &AppConfig,
    pool: PgPool,
) -> Arc<dyn IamAuthenticationFacade> {
    Arc::new(CachedIamAuthenticationFacadeImpl::new(
        Arc::new(SqlxSessionLookupRepositoryImpl::new(pool)),
        config.session_cache_ttl,
    ))
}

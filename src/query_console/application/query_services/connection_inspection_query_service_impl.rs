use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    config::feature_flags::FeatureFlagProvider,
    query_console::{
        domain::{
            model::{
                entities::{
                    connection_descriptor::ConnectionDescriptor,
                    entity_info::{BrowsePage, EntityInfo},
                    pii_rule::PiiRule,
                },
                enums::query_console_domain_error::QueryConsoleDomainError,
                queries::{
                    browse_entity_query::BrowseEntityQuery,
                    explain_statement_query::ExplainStatementQuery,
                },
                value_objects::{
                    connection_id::ConnectionId, entity_path::EntityPath,
                    requester_identity::RequesterIdentity,
                },
            },
            services::{
                connection_inspection_query_service::ConnectionInspectionQueryService,
                field_masking,
            },
        },
        infrastructure::{
            adapters::database_adapter::{
                AdapterError, BrowseOptions, DatabaseAdapter, DatabaseAdapterResolver, ResultUnit,
            },
            persistence::repositories::{
                connection_repository::ConnectionRepository,
                pii_rule_repository::PiiRuleRepository,
            },
        },
        interfaces::acl::access_control_facade::{
            AccessControlFacade, QueryConsoleAuthorizationRequest,
        },
    },
};

const CATALOG_ACTION: &str = "connection:read";
const READ_ACTION: &str = "query:read";

pub struct ConnectionInspectionQueryServiceImpl {
    connection_repository: Arc<dyn ConnectionRepository>,
    adapter_resolver: Arc<dyn DatabaseAdapterResolver>,
    pii_rule_repository: Arc<dyn PiiRuleRepository>,
    access_control_facade: Arc<dyn AccessControlFacade>,
    feature_flags: Arc<dyn FeatureFlagProvider>,
}

impl ConnectionInspectionQueryServiceImpl {
    pub fn new(
        connection_repository: Arc<dyn ConnectionRepository>,
        adapter_resolver: Arc<dyn DatabaseAdapterResolver>,
        pii_rule_repository: Arc<dyn PiiRuleRepository>,
        access_control_facade: Arc<dyn AccessControlFacade>,
        feature_flags: Arc<dyn FeatureFlagProvider>,
    ) -> Self {
        Self {
            connection_repository,
            adapter_resolver,
            pii_rule_repository,
            access_control_facade,
            feature_flags,
        }
    }

    /// Loads the connection, authorizes `action` on the resource built from it,
    /// and resolves its adapter.
    async fn open(
        &self,
        identity: &RequesterIdentity,
        connection_id: &ConnectionId,
        action: &str,
        resource: impl Fn(&ConnectionDescriptor) -> String + Send,
    ) -> Result<(ConnectionDescriptor, Arc<dyn DatabaseAdapter>), QueryConsoleDomainError> {
        let connection = self
            .connection_repository
            .find_by_id(connection_id)
            .await?
            .ok_or(QueryConsoleDomainError::ConnectionNotFound)?;

        self.access_control_facade
            .authorize(QueryConsoleAuthorizationRequest {
                principal_id: identity.user_id,
                is_admin: identity.is_admin,
                action_name: action.to_string(),
                resource_name: resource(&connection),
                environment: connection.environment().to_string(),
            })
            .await?;

        let adapter = self
            .adapter_resolver
            .resolve(&connection)
            .await
            .map_err(adapter_error)?;

        Ok((connection, adapter))
    }

    async fn masking_rules(
        &self,
        connection_id: &ConnectionId,
        resource: &str,
    ) -> Result<Vec<PiiRule>, QueryConsoleDomainError> {
        if !self.feature_flags.current().pii_masking {
            return Ok(Vec::new());
        }

        let rules = self
            .pii_rule_repository
            .list_by_connection(connection_id)
            .await?;

        Ok(field_masking::applicable_rules(&rules, resource)
            .into_iter()
            .cloned()
            .collect())
    }
}

fn adapter_error(error: AdapterError) -> QueryConsoleDomainError {
    match error {
        AdapterError::Unsupported(detail) => QueryConsoleDomainError::UnsupportedBackend(detail),
        other => QueryConsoleDomainError::AdapterError(other.to_string()),
    }
}

#[async_trait]
impl ConnectionInspectionQueryService for ConnectionInspectionQueryServiceImpl {
    async fn handle_explain(
        &self,
        identity: &RequesterIdentity,
        query: ExplainStatementQuery,
    ) -> Result<Value, QueryConsoleDomainError> {
        let (_, adapter) = self
            .open(identity, query.connection_id(), READ_ACTION, |c| {
                c.query_resource()
            })
            .await?;

        adapter
            .explain(query.statement().value())
            .await
            .map_err(adapter_error)
    }

    async fn handle_list_namespaces(
        &self,
        identity: &RequesterIdentity,
        connection_id: ConnectionId,
    ) -> Result<Vec<String>, QueryConsoleDomainError> {
        let (_, adapter) = self
            .open(identity, &connection_id, CATALOG_ACTION, |c| {
                c.connection_resource()
            })
            .await?;

        adapter.list_namespaces().await.map_err(adapter_error)
    }

    async fn handle_list_entities(
        &self,
        identity: &RequesterIdentity,
        connection_id: ConnectionId,
        path: EntityPath,
    ) -> Result<Vec<String>, QueryConsoleDomainError> {
        let namespace = path.namespace_name();
        let (_, adapter) = self
            .open(identity, &connection_id, CATALOG_ACTION, |c| {
                c.namespace_resource(namespace)
            })
            .await?;

        adapter
            .list_entities(namespace)
            .await
            .map_err(adapter_error)
    }

    async fn handle_get_entity_info(
        &self,
        identity: &RequesterIdentity,
        connection_id: ConnectionId,
        path: EntityPath,
    ) -> Result<EntityInfo, QueryConsoleDomainError> {
        let namespace = path.namespace_name();
        let entity = path
            .entity_name()
            .ok_or(QueryConsoleDomainError::InvalidEntityName)?;
        let (_, adapter) = self
            .open(identity, &connection_id, CATALOG_ACTION, |c| {
                c.entity_resource(namespace, entity)
            })
            .await?;

        adapter
            .get_entity_info(namespace, entity)
            .await
            .map_err(adapter_error)
    }

    async fn handle_browse(
        &self,
        identity: &RequesterIdentity,
        query: BrowseEntityQuery,
    ) -> Result<BrowsePage, QueryConsoleDomainError> {
        let namespace = query.path().namespace_name();
        let entity = query
            .path()
            .entity_name()
            .ok_or(QueryConsoleDomainError::InvalidEntityName)?;
        let (connection, adapter) = self
            .open(identity, query.connection_id(), READ_ACTION, |c| {
                c.entity_resource(namespace, entity)
            })
            .await?;

        let owned_rules = self
            .masking_rules(&connection.id, &connection.entity_resource(namespace, entity))
            .await?;
        let rules: Vec<&PiiRule> = owned_rules.iter().collect();

        let mut results = adapter
            .browse(
                namespace,
                entity,
                BrowseOptions {
                    page: query.page(),
                    page_size: query.page_size(),
                    sort: query.sort().map(str::to_string),
                },
            )
            .await
            .map_err(adapter_error)?;

        let column_names: Vec<String> = results.columns.iter().map(|c| c.name.clone()).collect();
        let mut rows = Vec::new();
        while let Some(unit) = results.units.recv().await {
            rows.push(match unit {
                ResultUnit::Row(mut row) => {
                    field_masking::mask_row(&column_names, &mut row, &rules);
                    Value::Array(row)
                }
                ResultUnit::Document(mut document) => {
                    field_masking::mask_document(&mut document, &rules);
                    Value::Object(document)
                }
            });
        }

        match results.completion.await {
            Ok(Ok(())) => Ok(BrowsePage {
                columns: results.columns,
                rows,
            }),
            Ok(Err(error)) => Err(adapter_error(error)),
            Err(_) => Err(QueryConsoleDomainError::AdapterError(
                "adapter stopped without reporting completion".to_string(),
            )),
        }
    }
}

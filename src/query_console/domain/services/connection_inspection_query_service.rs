use async_trait::async_trait;
use serde_json::Value;

use crate::query_console::domain::model::{
    entities::entity_info::{BrowsePage, EntityInfo},
    enums::query_console_domain_error::QueryConsoleDomainError,
    queries::{browse_entity_query::BrowseEntityQuery, explain_statement_query::ExplainStatementQuery},
    value_objects::{
        connection_id::ConnectionId, entity_path::EntityPath,
        requester_identity::RequesterIdentity,
    },
};

/// Read-only surfaces over a connection that bypass the job pipeline.
#[async_trait]
pub trait ConnectionInspectionQueryService: Send + Sync {
    async fn handle_explain(
        &self,
        identity: &RequesterIdentity,
        query: ExplainStatementQuery,
    ) -> Result<Value, QueryConsoleDomainError>;

    async fn handle_list_namespaces(
        &self,
        identity: &RequesterIdentity,
        connection_id: ConnectionId,
    ) -> Result<Vec<String>, QueryConsoleDomainError>;

    async fn handle_list_entities(
        &self,
        identity: &RequesterIdentity,
        connection_id: ConnectionId,
        path: EntityPath,
    ) -> Result<Vec<String>, QueryConsoleDomainError>;

    async fn handle_get_entity_info(
        &self,
        identity: &RequesterIdentity,
        connection_id: ConnectionId,
        path: EntityPath,
    ) -> Result<EntityInfo, QueryConsoleDomainError>;

    async fn handle_browse(
        &self,
        identity: &RequesterIdentity,
        query: BrowseEntityQuery,
    ) -> Result<BrowsePage, QueryConsoleDomainError>;
}

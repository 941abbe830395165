use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use query_console_api::access_control::{
    domain::model::enums::access_control_domain_error::AccessControlDomainError,
    interfaces::acl::access_control_facade::{
        AccessControlAuthorizationDecision, AccessControlAuthorizationRequest,
        AccessControlFacade as AccessControlBcFacade,
    },
};
use query_console_api::query_console::{
    domain::{
        model::{
            entities::{
                connection_descriptor::ConnectionDescriptor,
                entity_info::EntityInfo,
                pii_rule::PiiRule,
                query_approval::QueryApproval,
                query_history_entry::{QueryHistoryCompletion, QueryHistoryEntry},
            },
            enums::{
                approval_status::ApprovalStatus,
                query_console_domain_error::QueryConsoleDomainError,
            },
            events::{query_audited_event::QueryAuditedEvent, query_stream_event::QueryStreamEvent},
            value_objects::{
                column_descriptor::ColumnDescriptor, connection_id::ConnectionId,
                query_constraints::QueryConstraints,
            },
        },
        services::query_stream_service::{QueryStreamEventSink, StreamTransportError},
    },
    infrastructure::{
        adapters::database_adapter::{
            AdapterError, AdapterQueryOptions, BrowseOptions, DatabaseAdapter,
            DatabaseAdapterResolver, ResultStream, ResultUnit,
        },
        persistence::repositories::{
            connection_repository::ConnectionRepository, pii_rule_repository::PiiRuleRepository,
            query_approval_repository::QueryApprovalRepository,
            query_console_audit_log_repository::QueryConsoleAuditLogRepository,
            query_history_repository::QueryHistoryRepository,
        },
    },
    interfaces::acl::access_control_facade::{
        AccessControlFacade, QueryConsoleAuthorizationRequest,
    },
};
use serde_json::{Value, json};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

pub struct FakeConnectionRepository {
    connections: Mutex<Vec<ConnectionDescriptor>>,
}

impl FakeConnectionRepository {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Vec::new()),
        }
    }

    pub fn set_connection(&self, connection: ConnectionDescriptor) {
        let mut connections = self.connections.lock().expect("mutex poisoned");
        connections.retain(|c| c.id != connection.id);
        connections.push(connection);
    }
}

#[async_trait]
impl ConnectionRepository for FakeConnectionRepository {
    async fn find_by_id(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<ConnectionDescriptor>, QueryConsoleDomainError> {
        Ok(self
            .connections
            .lock()
            .expect("mutex poisoned")
            .iter()
            .find(|c| c.id == *connection_id)
            .cloned())
    }
}

pub struct FakeQueryApprovalRepository {
    approvals: Mutex<HashMap<Uuid, QueryApproval>>,
}

impl FakeQueryApprovalRepository {
    pub fn new() -> Self {
        Self {
            approvals: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, approval_id: Uuid) -> Option<QueryApproval> {
        self.approvals
            .lock()
            .expect("mutex poisoned")
            .get(&approval_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.approvals.lock().expect("mutex poisoned").len()
    }
}

#[async_trait]
impl QueryApprovalRepository for FakeQueryApprovalRepository {
    async fn save(&self, approval: &QueryApproval) -> Result<(), QueryConsoleDomainError> {
        self.approvals
            .lock()
            .expect("mutex poisoned")
            .insert(approval.id, approval.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        approval_id: Uuid,
    ) -> Result<Option<QueryApproval>, QueryConsoleDomainError> {
        Ok(self.get(approval_id))
    }

    async fn list_pending(&self) -> Result<Vec<QueryApproval>, QueryConsoleDomainError> {
        let mut pending: Vec<QueryApproval> = self
            .approvals
            .lock()
            .expect("mutex poisoned")
            .values()
            .filter(|a| a.status == ApprovalStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pending)
    }

    async fn save_decision(&self, approval: &QueryApproval) -> Result<bool, QueryConsoleDomainError> {
        let mut approvals = self.approvals.lock().expect("mutex poisoned");
        match approvals.get(&approval.id) {
            Some(stored) if stored.status == ApprovalStatus::Pending => {
                approvals.insert(approval.id, approval.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

pub struct FakeQueryHistoryRepository {
    entries: Mutex<Vec<QueryHistoryEntry>>,
    completions: Mutex<Vec<(Uuid, QueryHistoryCompletion)>>,
}

impl FakeQueryHistoryRepository {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            completions: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<QueryHistoryEntry> {
        self.entries.lock().expect("mutex poisoned").clone()
    }

    pub fn completions(&self) -> Vec<(Uuid, QueryHistoryCompletion)> {
        self.completions.lock().expect("mutex poisoned").clone()
    }
}

#[async_trait]
impl QueryHistoryRepository for FakeQueryHistoryRepository {
    async fn create(&self, entry: &QueryHistoryEntry) -> Result<(), QueryConsoleDomainError> {
        self.entries
            .lock()
            .expect("mutex poisoned")
            .push(entry.clone());
        Ok(())
    }

    async fn complete(
        &self,
        history_id: Uuid,
        completion: &QueryHistoryCompletion,
    ) -> Result<(), QueryConsoleDomainError> {
        self.completions
            .lock()
            .expect("mutex poisoned")
            .push((history_id, completion.clone()));
        Ok(())
    }
}

pub struct FakePiiRuleRepository {
    rules: Mutex<Vec<PiiRule>>,
}

impl FakePiiRuleRepository {
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
        }
    }

    pub fn set_rules(&self, rules: Vec<PiiRule>) {
        *self.rules.lock().expect("mutex poisoned") = rules;
    }
}

#[async_trait]
impl PiiRuleRepository for FakePiiRuleRepository {
    async fn list_by_connection(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Vec<PiiRule>, QueryConsoleDomainError> {
        Ok(self
            .rules
            .lock()
            .expect("mutex poisoned")
            .iter()
            .filter(|rule| rule.connection_id == *connection_id)
            .cloned()
            .collect())
    }
}

pub struct FakeQueryConsoleAuditLogRepository {
    events: Mutex<Vec<QueryAuditedEvent>>,
}

impl FakeQueryConsoleAuditLogRepository {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<QueryAuditedEvent> {
        self.events.lock().expect("mutex poisoned").clone()
    }
}

#[async_trait]
impl QueryConsoleAuditLogRepository for FakeQueryConsoleAuditLogRepository {
    async fn save_event(&self, event: &QueryAuditedEvent) -> Result<(), QueryConsoleDomainError> {
        self.events
            .lock()
            .expect("mutex poisoned")
            .push(event.clone());
        Ok(())
    }
}

#[derive(Default)]
struct FakeAccessControlState {
    deny: bool,
    constraints: QueryConstraints,
    requests: Vec<QueryConsoleAuthorizationRequest>,
}

pub struct FakeAccessControlFacade {
    state: Mutex<FakeAccessControlState>,
}

impl FakeAccessControlFacade {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeAccessControlState::default()),
        }
    }

    pub fn deny_all(&self) {
        self.state.lock().expect("mutex poisoned").deny = true;
    }

    pub fn set_constraints(&self, constraints: QueryConstraints) {
        self.state.lock().expect("mutex poisoned").constraints = constraints;
    }

    pub fn requests(&self) -> Vec<QueryConsoleAuthorizationRequest> {
        self.state.lock().expect("mutex poisoned").requests.clone()
    }
}

#[async_trait]
impl AccessControlFacade for FakeAccessControlFacade {
    async fn authorize(
        &self,
        request: QueryConsoleAuthorizationRequest,
    ) -> Result<QueryConstraints, QueryConsoleDomainError> {
        let mut state = self.state.lock().expect("mutex poisoned");
        state.requests.push(request);
        if state.deny {
            return Err(QueryConsoleDomainError::AccessDenied);
        }
        Ok(state.constraints)
    }
}

#[derive(Default)]
struct FakeAdapterState {
    columns: Vec<ColumnDescriptor>,
    units: Vec<ResultUnit>,
    completion: Option<AdapterError>,
    query_error: Option<AdapterError>,
    statements: Vec<String>,
    options: Vec<AdapterQueryOptions>,
    browse_options: Vec<BrowseOptions>,
}

/// Replays a scripted result set on every query or browse.
pub struct FakeDatabaseAdapter {
    state: Mutex<FakeAdapterState>,
}

impl FakeDatabaseAdapter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeAdapterState::default()),
        }
    }

    pub fn set_results(&self, columns: Vec<ColumnDescriptor>, units: Vec<ResultUnit>) {
        let mut state = self.state.lock().expect("mutex poisoned");
        state.columns = columns;
        state.units = units;
    }

    pub fn fail_completion(&self, error: AdapterError) {
        self.state.lock().expect("mutex poisoned").completion = Some(error);
    }

    pub fn fail_query(&self, error: AdapterError) {
        self.state.lock().expect("mutex poisoned").query_error = Some(error);
    }

    pub fn statements(&self) -> Vec<String> {
        self.state.lock().expect("mutex poisoned").statements.clone()
    }

    pub fn options(&self) -> Vec<AdapterQueryOptions> {
        self.state.lock().expect("mutex poisoned").options.clone()
    }

    pub fn browse_options(&self) -> Vec<BrowseOptions> {
        self.state
            .lock()
            .expect("mutex poisoned")
            .browse_options
            .clone()
    }

    fn replay(&self) -> ResultStream {
        let state = self.state.lock().expect("mutex poisoned");
        let (unit_tx, units) = mpsc::channel(state.units.len().max(1));
        for unit in &state.units {
            let _ = unit_tx.try_send(unit.clone());
        }
        drop(unit_tx);

        let (completion_tx, completion) = oneshot::channel();
        let _ = completion_tx.send(match &state.completion {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        });

        ResultStream {
            columns: state.columns.clone(),
            units,
            completion,
        }
    }
}

#[async_trait]
impl DatabaseAdapter for FakeDatabaseAdapter {
    async fn query(
        &self,
        statement: &str,
        options: AdapterQueryOptions,
    ) -> Result<ResultStream, AdapterError> {
        {
            let mut state = self.state.lock().expect("mutex poisoned");
            state.statements.push(statement.to_string());
            state.options.push(options);
            if let Some(error) = state.query_error.clone() {
                return Err(error);
            }
        }
        Ok(self.replay())
    }

    async fn browse(
        &self,
        _namespace: &str,
        _entity: &str,
        options: BrowseOptions,
    ) -> Result<ResultStream, AdapterError> {
        self.state
            .lock()
            .expect("mutex poisoned")
            .browse_options
            .push(options);
        Ok(self.replay())
    }

    async fn explain(&self, statement: &str) -> Result<Value, AdapterError> {
        Ok(json!([{ "Plan": { "Node Type": "Seq Scan" }, "statement": statement }]))
    }

    async fn list_namespaces(&self) -> Result<Vec<String>, AdapterError> {
        Ok(vec!["public".to_string(), "audit".to_string()])
    }

    async fn list_entities(&self, namespace: &str) -> Result<Vec<String>, AdapterError> {
        Ok(vec![format!("{namespace}_users")])
    }

    async fn get_entity_info(
        &self,
        _namespace: &str,
        _entity: &str,
    ) -> Result<EntityInfo, AdapterError> {
        let columns = self.state.lock().expect("mutex poisoned").columns.clone();
        Ok(EntityInfo {
            columns,
            indexes: vec!["users_pkey".to_string()],
        })
    }
}

pub struct FakeDatabaseAdapterResolver {
    adapter: Arc<FakeDatabaseAdapter>,
}

impl FakeDatabaseAdapterResolver {
    pub fn new(adapter: Arc<FakeDatabaseAdapter>) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl DatabaseAdapterResolver for FakeDatabaseAdapterResolver {
    async fn resolve(
        &self,
        _connection: &ConnectionDescriptor,
    ) -> Result<Arc<dyn DatabaseAdapter>, AdapterError> {
        Ok(self.adapter.clone())
    }
}

/// Collects every delivered frame.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<QueryStreamEvent>,
}

#[async_trait]
impl QueryStreamEventSink for RecordingSink {
    async fn send_event(&mut self, event: QueryStreamEvent) -> Result<(), StreamTransportError> {
        self.events.push(event);
        Ok(())
    }
}

/// Accepts `accept` frames, then behaves like a disconnected peer.
pub struct FailingSink {
    accept: usize,
    pub events: Vec<QueryStreamEvent>,
}

impl FailingSink {
    pub fn after(accept: usize) -> Self {
        Self {
            accept,
            events: Vec::new(),
        }
    }
}

#[async_trait]
impl QueryStreamEventSink for FailingSink {
    async fn send_event(&mut self, event: QueryStreamEvent) -> Result<(), StreamTransportError> {
        if self.events.len() >= self.accept {
            return Err(StreamTransportError("peer closed".to_string()));
        }
        self.events.push(event);
        Ok(())
    }
}

/// Access-control side of the ACL; fails with a fixed error when one is set.
pub struct FakeAccessControlBcFacade {
    failure: Mutex<Option<AccessControlDomainError>>,
    requests: Mutex<Vec<AccessControlAuthorizationRequest>>,
}

impl FakeAccessControlBcFacade {
    pub fn new() -> Self {
        Self {
            failure: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_with(&self, error: AccessControlDomainError) {
        *self.failure.lock().expect("mutex poisoned") = Some(error);
    }

    pub fn requests(&self) -> Vec<AccessControlAuthorizationRequest> {
        self.requests.lock().expect("mutex poisoned").clone()
    }
}

#[async_trait]
impl AccessControlBcFacade for FakeAccessControlBcFacade {
    async fn authorize(
        &self,
        request: AccessControlAuthorizationRequest,
    ) -> Result<AccessControlAuthorizationDecision, AccessControlDomainError> {
        self.requests
            .lock()
            .expect("mutex poisoned")
            .push(request);

        if let Some(error) = self.failure.lock().expect("mutex poisoned").take() {
            return Err(error);
        }

        Ok(AccessControlAuthorizationDecision {
            allowed: true,
            reason: "allow rule matched".to_string(),
            require_where: false,
            read_only: false,
            max_rows: 0,
            timeout_ms: 0,
        })
    }
}

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    config::feature_flags::FeatureFlagProvider,
    query_console::{
        application::registries::query_job_registry::QueryJobRegistry,
        domain::{
            model::{
                entities::{
                    pii_rule::PiiRule,
                    query_history_entry::{QueryHistoryCompletion, QueryHistoryEntry},
                    query_job::QueryJob,
                },
                enums::{
                    backend_kind::BackendKind, query_audit_action::QueryAuditAction,
                    query_console_domain_error::QueryConsoleDomainError,
                    query_history_status::QueryHistoryStatus,
                },
                events::{
                    query_audited_event::QueryAuditedEvent, query_stream_event::QueryStreamEvent,
                },
                queries::stream_query_job_query::StreamQueryJobQuery,
                value_objects::requester_identity::RequesterIdentity,
            },
            services::{
                field_masking,
                query_stream_service::{QueryStreamEventSink, QueryStreamService},
                statement_classifier,
            },
        },
        infrastructure::{
            adapters::database_adapter::{AdapterQueryOptions, DatabaseAdapterResolver, ResultUnit},
            persistence::repositories::{
                connection_repository::ConnectionRepository,
                pii_rule_repository::PiiRuleRepository,
                query_console_audit_log_repository::QueryConsoleAuditLogRepository,
                query_history_repository::QueryHistoryRepository,
            },
        },
    },
    shared::interfaces::rest::error_correlation::record_internal_error,
};

pub const STREAM_FAILURE_MESSAGE: &str = "query execution failed";

enum StreamFailure {
    Execution(String),
    Transport(String),
}

pub struct QueryStreamServiceDependencies {
    pub job_registry: Arc<QueryJobRegistry>,
    pub connection_repository: Arc<dyn ConnectionRepository>,
    pub adapter_resolver: Arc<dyn DatabaseAdapterResolver>,
    pub pii_rule_repository: Arc<dyn PiiRuleRepository>,
    pub history_repository: Arc<dyn QueryHistoryRepository>,
    pub audit_repository: Arc<dyn QueryConsoleAuditLogRepository>,
    pub feature_flags: Arc<dyn FeatureFlagProvider>,
}

pub struct QueryStreamServiceImpl {
    job_registry: Arc<QueryJobRegistry>,
    connection_repository: Arc<dyn ConnectionRepository>,
    adapter_resolver: Arc<dyn DatabaseAdapterResolver>,
    pii_rule_repository: Arc<dyn PiiRuleRepository>,
    history_repository: Arc<dyn QueryHistoryRepository>,
    audit_repository: Arc<dyn QueryConsoleAuditLogRepository>,
    feature_flags: Arc<dyn FeatureFlagProvider>,
}

impl QueryStreamServiceImpl {
    pub fn new(dependencies: QueryStreamServiceDependencies) -> Self {
        Self {
            job_registry: dependencies.job_registry,
            connection_repository: dependencies.connection_repository,
            adapter_resolver: dependencies.adapter_resolver,
            pii_rule_repository: dependencies.pii_rule_repository,
            history_repository: dependencies.history_repository,
            audit_repository: dependencies.audit_repository,
            feature_flags: dependencies.feature_flags,
        }
    }

    async fn load_masking_rules(&self, job: &QueryJob) -> Result<Vec<PiiRule>, StreamFailure> {
        if !self.feature_flags.current().pii_masking {
            return Ok(Vec::new());
        }

        let rules = self
            .pii_rule_repository
            .list_by_connection(&job.connection_id)
            .await
            .map_err(|e| StreamFailure::Execution(format!("loading masking rules: {e}")))?;

        Ok(field_masking::applicable_rules(&rules, &job.resource)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Runs the statement and forwards every unit, counting delivered units in `delivered`.
    async fn execute(
        &self,
        job: &QueryJob,
        sink: &mut dyn QueryStreamEventSink,
        delivered: &mut u64,
    ) -> Result<(), StreamFailure> {
        let connection = self
            .connection_repository
            .find_by_id(&job.connection_id)
            .await
            .map_err(|e| StreamFailure::Execution(e.to_string()))?
            .ok_or_else(|| StreamFailure::Execution("connection not found".to_string()))?;

        let adapter = self
            .adapter_resolver
            .resolve(&connection)
            .await
            .map_err(|e| StreamFailure::Execution(e.to_string()))?;

        let owned_rules = self.load_masking_rules(job).await?;
        let rules: Vec<&PiiRule> = owned_rules.iter().collect();

        let is_write = statement_classifier::classify(job.backend, &job.statement).is_write;
        let statement = match job.backend {
            BackendKind::Relational if !is_write => {
                statement_classifier::enforce_limit(&job.statement, job.options.max_rows)
            }
            _ => job.statement.clone(),
        };

        let mut results = adapter
            .query(
                &statement,
                AdapterQueryOptions {
                    max_rows: job.options.max_rows,
                    timeout: Duration::from_millis(job.options.timeout_ms),
                },
            )
            .await
            .map_err(|e| StreamFailure::Execution(e.to_string()))?;

        let column_names: Vec<String> = results.columns.iter().map(|c| c.name.clone()).collect();
        if job.backend == BackendKind::Relational && !results.columns.is_empty() {
            send(sink, QueryStreamEvent::columns(results.columns.clone())).await?;
        }

        let mut fields_announced = false;
        while let Some(unit) = results.units.recv().await {
            let value = match unit {
                ResultUnit::Row(mut row) => {
                    if !rules.is_empty() {
                        field_masking::mask_row(&column_names, &mut row, &rules);
                    }
                    Value::Array(row)
                }
                ResultUnit::Document(mut document) => {
                    if !fields_announced {
                        let fields = document.keys().cloned().collect();
                        send(sink, QueryStreamEvent::fields(fields)).await?;
                        fields_announced = true;
                    }
                    if !rules.is_empty() {
                        field_masking::mask_document(&mut document, &rules);
                    }
                    Value::Object(document)
                }
            };

            send(sink, QueryStreamEvent::Rows { rows: vec![value] }).await?;
            *delivered += 1;
        }

        match results.completion.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(error)) => Err(StreamFailure::Execution(error.to_string())),
            Err(_) => Err(StreamFailure::Execution(
                "adapter stopped without reporting completion".to_string(),
            )),
        }
    }

    async fn start_history(&self, job: &QueryJob) -> Option<Uuid> {
        let entry = QueryHistoryEntry {
            id: Uuid::new_v4(),
            user_id: job.user_id,
            connection_id: job.connection_id,
            statement_hash: statement_classifier::statement_hash(&job.statement),
            status: QueryHistoryStatus::Running,
            approval_id: job.approval_id,
            started_at: Utc::now(),
        };

        match self.history_repository.create(&entry).await {
            Ok(()) => Some(entry.id),
            Err(error) => {
                tracing::warn!(query_id = %job.id, %error, "failed to record query history");
                None
            }
        }
    }

    async fn finish_history(&self, history_id: Option<Uuid>, completion: QueryHistoryCompletion) {
        let Some(history_id) = history_id else {
            return;
        };

        if let Err(error) = self.history_repository.complete(history_id, &completion).await {
            tracing::warn!(%history_id, %error, "failed to complete query history");
        }
    }

    async fn audit(&self, job: &QueryJob, action: QueryAuditAction, details: Option<Value>) {
        let _ = self
            .audit_repository
            .save_event(&QueryAuditedEvent {
                query_id: Some(job.id.clone()),
                approval_id: job.approval_id,
                statement_hash: Some(statement_classifier::statement_hash(&job.statement)),
                details,
                ..QueryAuditedEvent::new(action, job.user_id, job.connection_id.value())
            })
            .await;
    }

    async fn run(&self, job: &QueryJob, sink: &mut dyn QueryStreamEventSink) {
        let started = Instant::now();
        let start = QueryStreamEvent::Start {
            query_id: job.id.clone(),
            started_at: Utc::now(),
        };
        if let Err(error) = sink.send_event(start).await {
            tracing::warn!(query_id = %job.id, %error, "stream closed before start");
            return;
        }

        let history_id = self.start_history(job).await;
        self.audit(job, QueryAuditAction::QueryStart, None).await;

        let mut row_count: u64 = 0;
        let outcome = self.execute(job, sink, &mut row_count).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok(()) => {
                let _ = sink
                    .send_event(QueryStreamEvent::End {
                        row_count,
                        duration_ms,
                    })
                    .await;

                self.finish_history(
                    history_id,
                    QueryHistoryCompletion {
                        status: QueryHistoryStatus::Completed,
                        row_count,
                        duration_ms,
                        ended_at: Utc::now(),
                        error_id: None,
                    },
                )
                .await;
                self.audit(
                    job,
                    QueryAuditAction::QueryEnd,
                    Some(json!({ "rowCount": row_count, "durationMs": duration_ms })),
                )
                .await;

                tracing::info!(query_id = %job.id, row_count, duration_ms, "query stream completed");
            }
            Err(StreamFailure::Execution(detail)) => {
                let error_id = record_internal_error("query_console.stream", &detail);
                let _ = sink
                    .send_event(QueryStreamEvent::Error {
                        message: STREAM_FAILURE_MESSAGE.to_string(),
                        error_id: error_id.clone(),
                    })
                    .await;

                self.finish_history(
                    history_id,
                    QueryHistoryCompletion {
                        status: QueryHistoryStatus::Failed,
                        row_count,
                        duration_ms,
                        ended_at: Utc::now(),
                        error_id: Some(error_id.clone()),
                    },
                )
                .await;
                self.audit(
                    job,
                    QueryAuditAction::QueryFailed,
                    Some(json!({ "errorId": error_id, "durationMs": duration_ms })),
                )
                .await;
            }
            Err(StreamFailure::Transport(detail)) => {
                tracing::warn!(query_id = %job.id, detail = %detail, "client disconnected mid-stream");

                self.finish_history(
                    history_id,
                    QueryHistoryCompletion {
                        status: QueryHistoryStatus::Failed,
                        row_count,
                        duration_ms,
                        ended_at: Utc::now(),
                        error_id: None,
                    },
                )
                .await;
                self.audit(
                    job,
                    QueryAuditAction::QueryFailed,
                    Some(json!({ "reason": "client disconnected", "durationMs": duration_ms })),
                )
                .await;
            }
        }
    }
}

async fn send(
    sink: &mut dyn QueryStreamEventSink,
    event: QueryStreamEvent,
) -> Result<(), StreamFailure> {
    sink.send_event(event)
        .await
        .map_err(|e| StreamFailure::Transport(e.to_string()))
}

#[async_trait]
impl QueryStreamService for QueryStreamServiceImpl {
    async fn handle_open(
        &self,
        identity: &RequesterIdentity,
        query: StreamQueryJobQuery,
    ) -> Result<QueryJob, QueryConsoleDomainError> {
        let job = self
            .job_registry
            .get(query.query_id())
            .await
            .ok_or(QueryConsoleDomainError::JobNotFound)?;

        if job.user_id != identity.user_id || job.connection_id != *query.connection_id() {
            return Err(QueryConsoleDomainError::JobNotFound);
        }

        Ok(job)
    }

    async fn handle_stream(&self, job: QueryJob, sink: &mut dyn QueryStreamEventSink) {
        self.run(&job, sink).await;
        self.job_registry.delete(&job.id).await;
    }
}

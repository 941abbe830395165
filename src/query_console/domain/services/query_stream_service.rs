use async_trait::async_trait;

use crate::query_console::domain::model::{
    entities::query_job::QueryJob,
    enums::query_console_domain_error::QueryConsoleDomainError,
    events::query_stream_event::QueryStreamEvent,
    queries::stream_query_job_query::StreamQueryJobQuery,
    value_objects::requester_identity::RequesterIdentity,
};

/// The peer went away; nothing more can be delivered.
#[derive(Debug, thiserror::Error)]
#[error("stream transport closed: {0}")]
pub struct StreamTransportError(pub String);

/// Ordered, one-way delivery of stream frames to a connected client.
#[async_trait]
pub trait QueryStreamEventSink: Send {
    async fn send_event(&mut self, event: QueryStreamEvent) -> Result<(), StreamTransportError>;
}

#[async_trait]
pub trait QueryStreamService: Send + Sync {
    /// Looks up a job for the requester before any transport is opened.
    async fn handle_open(
        &self,
        identity: &RequesterIdentity,
        query: StreamQueryJobQuery,
    ) -> Result<QueryJob, QueryConsoleDomainError>;

    /// Runs the job and emits its full event sequence. The job is always released afterwards.
    async fn handle_stream(&self, job: QueryJob, sink: &mut dyn QueryStreamEventSink);
}

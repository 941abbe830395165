pub mod query_audited_event;
pub mod query_stream_event;

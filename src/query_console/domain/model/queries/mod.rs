pub mod browse_entity_query;
pub mod explain_statement_query;
pub mod stream_query_job_query;

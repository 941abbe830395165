pub mod connection_inspection_query_service;
pub mod field_masking;
pub mod query_approval_command_service;
pub mod query_approval_query_service;
pub mod query_stream_service;
pub mod query_submission_service;
pub mod statement_classifier;
pub mod step_up_policy;

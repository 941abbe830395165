pub mod column_descriptor;
pub mod connection_id;
pub mod entity_path;
pub mod query_constraints;
pub mod query_execution_options;
pub mod requester_identity;
pub mod statement_classification;
pub mod statement_text;

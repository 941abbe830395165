pub mod connection_descriptor;
pub mod entity_info;
pub mod pii_rule;
pub mod query_approval;
pub mod query_history_entry;
pub mod query_job;

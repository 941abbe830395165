pub mod connection_repository;
pub mod pii_rule_repository;
pub mod postgres;
pub mod query_approval_repository;
pub mod query_console_audit_log_repository;
pub mod query_history_repository;

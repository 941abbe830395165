pub mod approval_status;
pub mod backend_kind;
pub mod query_audit_action;
pub mod query_console_domain_error;
pub mod query_history_status;

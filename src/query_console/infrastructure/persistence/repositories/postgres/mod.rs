pub mod sqlx_connection_repository_impl;
pub mod sqlx_pii_rule_repository_impl;
pub mod sqlx_query_approval_repository_impl;
pub mod sqlx_query_console_audit_log_repository_impl;
pub mod sqlx_query_history_repository_impl;

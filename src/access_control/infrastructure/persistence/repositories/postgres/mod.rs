pub mod sqlx_authorization_decision_audit_repository_impl;
pub mod sqlx_policy_document_repository_impl;
pub mod sqlx_role_assignment_repository_impl;

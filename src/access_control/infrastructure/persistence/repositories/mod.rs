pub mod authorization_decision_audit_repository;
pub mod policy_document_repository;
pub mod postgres;
pub mod role_assignment_repository;

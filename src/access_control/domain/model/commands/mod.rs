pub mod assign_role_to_principal_command;
pub mod upsert_policy_document_command;
pub mod upsert_role_command;

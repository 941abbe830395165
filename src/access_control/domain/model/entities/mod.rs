pub mod policy_document;
pub mod role_definition;

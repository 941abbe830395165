pub mod query_approval_command_service_impl;
pub mod query_submission_service_impl;

pub mod access_control_error_response_resource;
pub mod assign_role_request_resource;
pub mod evaluate_permission_request_resource;
pub mod upsert_policy_document_request_resource;
pub mod upsert_role_request_resource;

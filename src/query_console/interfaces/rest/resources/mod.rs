pub mod connection_catalog_resource;
pub mod explain_statement_request_resource;
pub mod query_approval_resource;
pub mod query_console_error_response_resource;
pub mod stream_query_params_resource;
pub mod submit_query_request_resource;

pub mod query_approval_rest_controller;
pub mod query_console_rest_controller;
pub mod query_console_rest_support;

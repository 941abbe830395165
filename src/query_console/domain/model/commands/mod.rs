pub mod decide_query_approval_command;
pub mod submit_query_command;

pub mod access_control;
pub mod config;
pub mod iam_integration;
pub mod query_console;
pub mod shared;

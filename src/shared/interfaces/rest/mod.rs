pub mod error_correlation;
pub mod openapi;

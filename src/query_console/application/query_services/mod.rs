pub mod connection_inspection_query_service_impl;
pub mod query_approval_query_service_impl;
pub mod query_stream_service_impl;

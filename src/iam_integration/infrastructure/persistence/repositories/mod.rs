pub mod postgres;
pub mod session_lookup_repository;

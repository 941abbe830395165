pub mod database_adapter;
pub mod postgres;

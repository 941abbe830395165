pub mod pg_row_json;
pub mod sqlx_database_adapter_resolver_impl;
pub mod sqlx_postgres_adapter_impl;

pub mod query_job_registry;

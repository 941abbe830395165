mod command_service_tests;
mod policy_engine_tests;
mod policy_snapshot_tests;
mod query_service_tests;

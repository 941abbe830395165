pub mod policy_engine_snapshot;

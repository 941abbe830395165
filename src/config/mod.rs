pub mod app_config;
pub mod feature_flags;

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_user: String,
    pub postgres_password: String,
    pub postgres_database: String,
    pub auto_migrate: bool,
    pub job_ttl: Duration,
    pub job_sweep_interval: Duration,
    pub global_max_rows: u32,
    pub statement_timeout_ms: u64,
    pub step_up_max_age: Duration,
    pub policy_refresh_interval: Duration,
    pub session_cache_ttl: Duration,
    pub enable_query_approval: bool,
    pub enable_pii_masking: bool,
    pub enable_step_up_auth: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", 8081),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|value| !value.trim().is_empty()),
            postgres_host: std::env::var("POSTGRES_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            postgres_port: env_parse("POSTGRES_PORT", 5432),
            postgres_user: std::env::var("POSTGRES_USER")
                .unwrap_or_else(|_| "postgres".to_string()),
            postgres_password: std::env::var("POSTGRES_PASSWORD")
                .unwrap_or_else(|_| "admin".to_string()),
            postgres_database: std::env::var("POSTGRES_DATABASE")
                .unwrap_or_else(|_| "query_console".to_string()),
            auto_migrate: env_bool("AUTO_MIGRATE", true),
            job_ttl: Duration::from_secs(env_parse("JOB_TTL_SECONDS", 300)),
            job_sweep_interval: Duration::from_secs(env_parse("JOB_SWEEP_INTERVAL_SECONDS", 60)),
            global_max_rows: env_parse("GLOBAL_MAX_ROWS", 1000),
            statement_timeout_ms: env_parse("STATEMENT_TIMEOUT_MS", 30_000),
            step_up_max_age: Duration::from_secs(env_parse("STEP_UP_MAX_AGE_SECONDS", 600)),
            policy_refresh_interval: Duration::from_secs(env_parse("POLICY_REFRESH_SECONDS", 10)),
            session_cache_ttl: Duration::from_secs(env_parse("SESSION_CACHE_TTL_SECONDS", 30)),
            enable_query_approval: env_bool("ENABLE_QUERY_APPROVAL", false),
            enable_pii_masking: env_bool("ENABLE_PII_MASKING", false),
            enable_step_up_auth: env_bool("ENABLE_STEP_UP_AUTH", false),
        }
    }

    pub fn control_plane_database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.postgres_user,
            self.postgres_password,
            self.postgres_host,
            self.postgres_port,
            self.postgres_database
        )
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

use super::app_config::AppConfig;

/// Immutable view of the runtime switches consulted by the query pipeline.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FeatureFlags {
    pub query_approval: bool,
    pub pii_masking: bool,
    pub step_up_auth: bool,
}

pub trait FeatureFlagProvider: Send + Sync {
    fn current(&self) -> FeatureFlags;
}

pub struct StaticFeatureFlagProvider {
    flags: FeatureFlags,
}

impl StaticFeatureFlagProvider {
    pub fn new(flags: FeatureFlags) -> Self {
        Self { flags }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(FeatureFlags {
            query_approval: config.enable_query_approval,
            pii_masking: config.enable_pii_masking,
            step_up_auth: config.enable_step_up_auth,
        })
    }
}

impl FeatureFlagProvider for StaticFeatureFlagProvider {
    fn current(&self) -> FeatureFlags {
        self.flags
    }
}

//! Live-pricing configuration.
//!
//! Whether live pricing is available for a provider is decided once, when the
//! configuration is loaded, and never re-evaluated per call. A provider whose
//! adapter is disabled here is priced from the static rate card for the whole
//! process lifetime.

use core_config::{env_flag, ConfigError, FromEnv};

#[derive(Debug, Clone, Default)]
pub struct AwsPricingConfig {
    /// Optional API key for the instance catalog service
    pub catalog_api_key: Option<String>,
    /// Enable AWS live price lookups
    pub enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AzurePricingConfig {
    /// Enable Azure live price lookups (the Retail Prices API is anonymous)
    pub enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GcpPricingConfig {
    /// GCP project ID, reserved for the authenticated Billing API
    pub project_id: Option<String>,
    /// Enable GCP price lookups
    pub enabled: bool,
}

/// Aggregated live-pricing configuration for all providers.
///
/// Oracle has no live adapter and therefore no configuration entry; it is
/// always priced statically.
#[derive(Debug, Clone, Default)]
pub struct PricingConfig {
    pub aws: AwsPricingConfig,
    pub azure: AzurePricingConfig,
    pub gcp: GcpPricingConfig,
}

impl PricingConfig {
    /// Configuration with every live adapter disabled (static-only pricing).
    pub fn static_only() -> Self {
        Self::default()
    }

    /// True if at least one provider has live pricing enabled.
    pub fn live_pricing_enabled(&self) -> bool {
        self.aws.enabled || self.azure.enabled || self.gcp.enabled
    }
}

impl FromEnv for PricingConfig {
    /// Load from environment variables.
    ///
    /// `LIVE_PRICING_ENABLED=false` turns every adapter off at once;
    /// `AWS_PRICING_ENABLED` / `AZURE_PRICING_ENABLED` / `GCP_PRICING_ENABLED`
    /// toggle individual providers (default: enabled, since all three sources
    /// work without credentials).
    fn from_env() -> Result<Self, ConfigError> {
        let live = env_flag("LIVE_PRICING_ENABLED", true);

        Ok(Self {
            aws: AwsPricingConfig {
                catalog_api_key: std::env::var("VANTAGE_API_KEY").ok(),
                enabled: live && env_flag("AWS_PRICING_ENABLED", true),
            },
            azure: AzurePricingConfig {
                enabled: live && env_flag("AZURE_PRICING_ENABLED", true),
            },
            gcp: GcpPricingConfig {
                project_id: std::env::var("GCP_PROJECT_ID").ok(),
                enabled: live && env_flag("GCP_PRICING_ENABLED", true),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_only_disables_everything() {
        let config = PricingConfig::static_only();
        assert!(!config.aws.enabled);
        assert!(!config.azure.enabled);
        assert!(!config.gcp.enabled);
        assert!(!config.live_pricing_enabled());
    }

    #[test]
    fn test_from_env_defaults_to_enabled() {
        temp_env::with_vars_unset(
            [
                "LIVE_PRICING_ENABLED",
                "AWS_PRICING_ENABLED",
                "AZURE_PRICING_ENABLED",
                "GCP_PRICING_ENABLED",
            ],
            || {
                let config = PricingConfig::from_env().unwrap();
                assert!(config.aws.enabled);
                assert!(config.azure.enabled);
                assert!(config.gcp.enabled);
            },
        );
    }

    #[test]
    fn test_global_flag_overrides_providers() {
        temp_env::with_vars(
            [
                ("LIVE_PRICING_ENABLED", Some("false")),
                ("AZURE_PRICING_ENABLED", Some("true")),
            ],
            || {
                let config = PricingConfig::from_env().unwrap();
                assert!(!config.live_pricing_enabled());
            },
        );
    }

    #[test]
    fn test_per_provider_flag() {
        temp_env::with_vars(
            [
                ("LIVE_PRICING_ENABLED", None::<&str>),
                ("AWS_PRICING_ENABLED", Some("false")),
            ],
            || {
                let config = PricingConfig::from_env().unwrap();
                assert!(!config.aws.enabled);
                assert!(config.azure.enabled);
            },
        );
    }
}

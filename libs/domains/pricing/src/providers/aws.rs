//! AWS pricing adapter.
//!
//! Resolves EC2 on-demand pricing from the public instance catalog
//! (instances.vantage.sh). Storage and database categories have no anonymous
//! live source on AWS and report "no data", leaving them to the static rate
//! card.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::PricingAdapter;
use crate::config::AwsPricingConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::models::{CloudProvider, CostCategory, PriceQuotation};

/// Public EC2 instance catalog with per-region on-demand pricing
const AWS_INSTANCE_CATALOG_URL: &str = "https://instances.vantage.sh/instances.json";

/// Region whose pricing is used when the catalog has no entry for the
/// requested one
const AWS_FALLBACK_REGION: &str = "us-east-1";

/// AWS pricing adapter
pub struct AwsPricingAdapter {
    config: AwsPricingConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct CatalogInstance {
    instance_type: String,
    #[serde(default)]
    pricing: HashMap<String, CatalogRegionPricing>,
}

#[derive(Debug, Deserialize)]
struct CatalogRegionPricing {
    #[serde(default)]
    linux: Option<CatalogPlatformPricing>,
}

#[derive(Debug, Deserialize)]
struct CatalogPlatformPricing {
    #[serde(default)]
    ondemand: Option<String>,
}

impl AwsPricingAdapter {
    pub fn new(config: AwsPricingConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn fetch_instance_quote(
        &self,
        instance_type: &str,
        region: &str,
    ) -> ProviderResult<Option<PriceQuotation>> {
        debug!(instance_type, region, "Fetching AWS EC2 price from instance catalog");

        let response = self.client.get(AWS_INSTANCE_CATALOG_URL).send().await?;
        let status = response.status();

        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited(60));
        }
        if !status.is_success() {
            return Err(ProviderError::ApiError(format!(
                "instance catalog returned status {status}"
            )));
        }

        let instances: Vec<CatalogInstance> = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let Some(instance) = instances.iter().find(|i| i.instance_type == instance_type) else {
            debug!(instance_type, "Instance type not present in catalog");
            return Ok(None);
        };

        Self::quote_from_catalog(instance, region)
    }

    fn quote_from_catalog(
        instance: &CatalogInstance,
        region: &str,
    ) -> ProviderResult<Option<PriceQuotation>> {
        // The catalog does not cover every instance type in every region;
        // fall back to the reference region's price like the catalog UI does.
        let Some(region_pricing) = instance
            .pricing
            .get(region)
            .or_else(|| instance.pricing.get(AWS_FALLBACK_REGION))
        else {
            return Ok(None);
        };

        let Some(ondemand) = region_pricing.linux.as_ref().and_then(|l| l.ondemand.as_deref())
        else {
            return Ok(None);
        };

        let hourly: f64 = ondemand.parse().map_err(|_| {
            ProviderError::ParseError(format!(
                "non-numeric on-demand price '{ondemand}' for {}",
                instance.instance_type
            ))
        })?;

        if hourly <= 0.0 {
            return Ok(None);
        }

        Ok(Some(PriceQuotation::from_hourly(
            CloudProvider::Aws,
            "Amazon EC2",
            region,
            &instance.instance_type,
            hourly,
        )))
    }
}

#[async_trait]
impl PricingAdapter for AwsPricingAdapter {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Aws
    }

    fn name(&self) -> &'static str {
        "AWS"
    }

    fn is_configured(&self) -> bool {
        self.config.enabled
    }

    async fn lookup(
        &self,
        category: CostCategory,
        provider_specific_id: &str,
        region: &str,
    ) -> ProviderResult<Option<PriceQuotation>> {
        match category {
            CostCategory::Compute => self.fetch_instance_quote(provider_specific_id, region).await,
            CostCategory::Storage | CostCategory::Database => {
                // The AWS Pricing API for these services requires signed
                // requests; without credentials they stay static.
                debug!(
                    category = %category,
                    "No anonymous AWS price source for category"
                );
                Ok(None)
            }
            CostCategory::Networking => {
                warn!("Networking has no live price source on any provider");
                Ok(None)
            }
        }
    }
}

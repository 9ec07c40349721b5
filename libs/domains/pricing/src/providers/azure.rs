//! Azure pricing adapter.
//!
//! Fetches from the Azure Retail Prices API, which is anonymous:
//! https://learn.microsoft.com/en-us/rest/api/cost-management/retail-prices/azure-retail-prices

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::PricingAdapter;
use crate::config::AzurePricingConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::models::{CloudProvider, CostCategory, PriceQuotation};

/// Azure Retail Prices API endpoint
const AZURE_PRICING_API: &str = "https://prices.azure.com/api/retail/prices";

/// Azure pricing adapter
pub struct AzurePricingAdapter {
    config: AzurePricingConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct AzurePriceResponse {
    #[serde(rename = "Items")]
    items: Vec<AzurePriceItem>,
}

#[derive(Debug, Deserialize)]
struct AzurePriceItem {
    #[serde(rename = "retailPrice")]
    retail_price: f64,
    #[serde(rename = "armRegionName")]
    arm_region_name: String,
    #[serde(rename = "meterName")]
    meter_name: String,
    #[serde(rename = "productName")]
    product_name: String,
    #[serde(rename = "skuName")]
    sku_name: String,
    #[serde(rename = "serviceName")]
    service_name: String,
    #[serde(rename = "armSkuName")]
    arm_sku_name: Option<String>,
}

impl AzurePricingAdapter {
    pub fn new(config: AzurePricingConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn fetch_items(&self, filter: &str) -> ProviderResult<Vec<AzurePriceItem>> {
        let url = format!("{}?$filter={}", AZURE_PRICING_API, urlencoding::encode(filter));

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited(60));
        }
        if !status.is_success() {
            return Err(ProviderError::ApiError(format!(
                "Azure API returned status {status}"
            )));
        }

        let data: AzurePriceResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(data.items)
    }

    /// First consumption item that is not a spot / low-priority / Windows
    /// meter (the retail API returns all of them under one SKU filter)
    fn pick_on_demand(items: Vec<AzurePriceItem>) -> Option<AzurePriceItem> {
        items.into_iter().find(|item| {
            item.retail_price > 0.0
                && !item.meter_name.contains("Spot")
                && !item.meter_name.contains("Low Priority")
                && !item.sku_name.contains("Spot")
                && !item.product_name.contains("Windows")
        })
    }

    async fn fetch_vm_quote(
        &self,
        vm_size: &str,
        region: &str,
    ) -> ProviderResult<Option<PriceQuotation>> {
        debug!(vm_size, region, "Fetching Azure VM price");

        let filter = format!(
            "serviceName eq 'Virtual Machines' and armSkuName eq '{vm_size}' \
             and armRegionName eq '{region}' and priceType eq 'Consumption'"
        );

        let items = self.fetch_items(&filter).await?;
        let Some(item) = Self::pick_on_demand(items) else {
            debug!(vm_size, region, "No Azure VM pricing returned");
            return Ok(None);
        };

        Ok(Some(PriceQuotation::from_hourly(
            CloudProvider::Azure,
            &item.service_name,
            &item.arm_region_name,
            item.arm_sku_name.as_deref().unwrap_or(vm_size),
            item.retail_price,
        )))
    }

    async fn fetch_storage_quote(
        &self,
        sku: &str,
        region: &str,
    ) -> ProviderResult<Option<PriceQuotation>> {
        debug!(sku, region, "Fetching Azure storage price");

        let filter = format!(
            "serviceName eq 'Storage' and skuName eq '{sku}' \
             and armRegionName eq '{region}' and priceType eq 'Consumption'"
        );

        let items = self.fetch_items(&filter).await?;
        let Some(item) = Self::pick_on_demand(items) else {
            debug!(sku, region, "No Azure storage pricing returned");
            return Ok(None);
        };

        Ok(Some(PriceQuotation::from_per_gb_month(
            CloudProvider::Azure,
            &item.service_name,
            &item.arm_region_name,
            &item.sku_name,
            item.retail_price,
        )))
    }

    async fn fetch_database_quote(
        &self,
        tier: &str,
        region: &str,
    ) -> ProviderResult<Option<PriceQuotation>> {
        debug!(tier, region, "Fetching Azure SQL Database price");

        let filter = format!(
            "serviceName eq 'SQL Database' and skuName eq '{tier}' \
             and armRegionName eq '{region}' and priceType eq 'Consumption'"
        );

        let items = self.fetch_items(&filter).await?;
        let Some(item) = Self::pick_on_demand(items) else {
            debug!(tier, region, "No Azure SQL pricing returned");
            return Ok(None);
        };

        Ok(Some(PriceQuotation::from_hourly(
            CloudProvider::Azure,
            &item.service_name,
            &item.arm_region_name,
            &item.sku_name,
            item.retail_price,
        )))
    }
}

#[async_trait]
impl PricingAdapter for AzurePricingAdapter {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Azure
    }

    fn name(&self) -> &'static str {
        "Azure"
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
            CostCategory::Compute => self.fetch_vm_quote(provider_specific_id, region).await,
            CostCategory::Storage => self.fetch_storage_quote(provider_specific_id, region).await,
            CostCategory::Database => self.fetch_database_quote(provider_specific_id, region).await,
            CostCategory::Networking => Ok(None),
        }
    }
}

//! GCP pricing adapter.
//!
//! The authenticated Cloud Billing API is out of scope; prices resolve from
//! an embedded Compute Engine / Cloud SQL / Cloud Storage catalog (list
//! prices for us-central1) scaled by GCP region multipliers. The catalog goes
//! through the same adapter contract as the network-backed providers, so
//! lookups are cached and fall back identically.

use async_trait::async_trait;
use tracing::debug;

use super::PricingAdapter;
use crate::config::GcpPricingConfig;
use crate::error::ProviderResult;
use crate::models::{CloudProvider, CostCategory, PriceQuotation};

/// GCP pricing adapter
pub struct GcpPricingAdapter {
    config: GcpPricingConfig,
}

impl GcpPricingAdapter {
    pub fn new(config: GcpPricingConfig) -> Self {
        Self { config }
    }

    /// Compute Engine hourly list prices (us-central1)
    fn machine_hourly(machine_type: &str) -> Option<f64> {
        let hourly = match machine_type {
            "e2-micro" => 0.0084,
            "e2-small" => 0.0168,
            "e2-medium" => 0.0335,
            "e2-standard-2" => 0.0670,
            "e2-standard-4" => 0.1340,
            "n1-standard-1" => 0.0475,
            "n1-standard-2" => 0.0950,
            "n1-standard-4" => 0.1900,
            "n1-standard-8" => 0.3800,
            "n2-standard-2" => 0.0971,
            "n2-standard-4" => 0.1942,
            "n2-standard-8" => 0.3884,
            "n2-highmem-2" => 0.1310,
            "n2-highmem-4" => 0.2620,
            "n2-highmem-8" => 0.5241,
            "c2-standard-4" => 0.2088,
            "c2-standard-8" => 0.4176,
            _ => return None,
        };
        Some(hourly)
    }

    /// Cloud SQL hourly list prices (us-central1)
    fn cloudsql_hourly(instance_type: &str) -> Option<f64> {
        let hourly = match instance_type {
            "db-f1-micro" => 0.0150,
            "db-g1-small" => 0.0475,
            "db-n1-standard-1" => 0.0825,
            "db-n1-standard-2" => 0.1650,
            "db-n1-standard-4" => 0.3300,
            "db-n1-standard-8" => 0.6600,
            "db-n1-highmem-2" => 0.2210,
            "db-n1-highmem-4" => 0.4420,
            "db-n1-highmem-8" => 0.8840,
            _ => return None,
        };
        Some(hourly)
    }

    /// Storage per GB-month list prices
    fn storage_per_gb_month(sku: &str) -> Option<f64> {
        let per_gb = match sku {
            "STANDARD" => 0.020,
            "NEARLINE" => 0.010,
            "COLDLINE" => 0.004,
            "ARCHIVE" => 0.0012,
            "pd-ssd" => 0.17,
            "pd-standard" => 0.04,
            _ => return None,
        };
        Some(per_gb)
    }

    /// GCP region price multiplier relative to us-central1
    fn region_multiplier(region: &str) -> f64 {
        match region {
            "us-central1" | "us-east1" | "us-east4" | "us-west1" | "us-west2" => 1.0,
            "europe-west1" | "europe-west3" | "asia-south1" => 1.10,
            "europe-west2" | "asia-east2" | "asia-northeast1" | "asia-southeast1" => 1.17,
            "europe-west4" | "europe-north1" => 1.06,
            "australia-southeast1" => 1.23,
            "southamerica-east1" => 1.28,
            _ => 1.0,
        }
    }
}

#[async_trait]
impl PricingAdapter for GcpPricingAdapter {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Gcp
    }

    fn name(&self) -> &'static str {
        "GCP"
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
        let multiplier = Self::region_multiplier(region);

        let quotation = match category {
            CostCategory::Compute => Self::machine_hourly(provider_specific_id).map(|hourly| {
                PriceQuotation::from_hourly(
                    CloudProvider::Gcp,
                    "Compute Engine",
                    region,
                    provider_specific_id,
                    hourly * multiplier,
                )
            }),
            CostCategory::Database => Self::cloudsql_hourly(provider_specific_id).map(|hourly| {
                PriceQuotation::from_hourly(
                    CloudProvider::Gcp,
                    "Cloud SQL",
                    region,
                    provider_specific_id,
                    hourly * multiplier,
                )
            }),
            CostCategory::Storage => {
                Self::storage_per_gb_month(provider_specific_id).map(|per_gb| {
                    PriceQuotation::from_per_gb_month(
                        CloudProvider::Gcp,
                        "Cloud Storage",
                        region,
                        provider_specific_id,
                        per_gb * multiplier,
                    )
                })
            }
            CostCategory::Networking => None,
        };

        if quotation.is_none() {
            debug!(
                category = %category,
                sku = provider_specific_id,
                "SKU not present in GCP catalog"
            );
        }

        Ok(quotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceSource;

    fn adapter() -> GcpPricingAdapter {
        GcpPricingAdapter::new(GcpPricingConfig {
            project_id: None,
            enabled: true,
        })
    }

    #[tokio::test]
    async fn test_compute_lookup_in_base_region() {
        let quote = adapter()
            .lookup(CostCategory::Compute, "n2-standard-2", "us-central1")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(quote.hourly, Some(0.0971));
        assert_eq!(quote.source, PriceSource::Live);
    }

    #[tokio::test]
    async fn test_compute_lookup_applies_region_multiplier() {
        let quote = adapter()
            .lookup(CostCategory::Compute, "n2-standard-2", "europe-west2")
            .await
            .unwrap()
            .unwrap();

        assert!((quote.hourly.unwrap() - 0.0971 * 1.17).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_machine_type_is_no_data() {
        let quote = adapter()
            .lookup(CostCategory::Compute, "z9-mega-96", "us-central1")
            .await
            .unwrap();
        assert!(quote.is_none());
    }

    #[tokio::test]
    async fn test_database_lookup() {
        let quote = adapter()
            .lookup(CostCategory::Database, "db-n1-standard-1", "us-central1")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(quote.hourly, Some(0.0825));
        assert!((quote.monthly.unwrap() - 0.0825 * 730.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_storage_lookup_per_gb() {
        let quote = adapter()
            .lookup(CostCategory::Storage, "pd-ssd", "us-central1")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(quote.per_gb_month, Some(0.17));
        assert_eq!(quote.monthly_equivalent(), None);
    }

    #[tokio::test]
    async fn test_networking_has_no_data() {
        let quote = adapter()
            .lookup(CostCategory::Networking, "lb", "us-central1")
            .await
            .unwrap();
        assert!(quote.is_none());
    }
}

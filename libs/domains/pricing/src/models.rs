use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Average hours in a month (365 days x 24 hours / 12 months).
///
/// Hourly rates are converted to monthly figures with this factor everywhere
/// in the engine, so live and static prices stay comparable.
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Cloud provider enumeration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CloudProvider {
    #[default]
    Aws,
    Azure,
    Gcp,
    Oracle,
}

impl CloudProvider {
    /// The fixed provider set every calculation covers, in iteration order.
    pub const ALL: [CloudProvider; 4] = [
        CloudProvider::Aws,
        CloudProvider::Azure,
        CloudProvider::Gcp,
        CloudProvider::Oracle,
    ];

    /// Uppercase display name used in result breakdowns ("AWS", "AZURE", ...)
    pub fn display_name(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "AWS",
            CloudProvider::Azure => "AZURE",
            CloudProvider::Gcp => "GCP",
            CloudProvider::Oracle => "ORACLE",
        }
    }
}

/// Cost category enumeration: the four dimensions tracked per provider
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CostCategory {
    #[default]
    Compute,
    Storage,
    Database,
    Networking,
}

impl CostCategory {
    pub const ALL: [CostCategory; 4] = [
        CostCategory::Compute,
        CostCategory::Storage,
        CostCategory::Database,
        CostCategory::Networking,
    ];
}

/// Generic compute instance class
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum InstanceClass {
    #[default]
    Standard,
    MemoryOptimized,
}

/// Storage class enumeration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageClass {
    #[default]
    Ssd,
    Hdd,
    Object,
    Archive,
}

/// Database engine enumeration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DatabaseEngine {
    #[default]
    Mysql,
    Postgres,
    Mariadb,
    Sqlserver,
}

/// Load balancer tier enumeration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LoadBalancerTier {
    #[default]
    Standard,
    Application,
    Network,
}

/// Which source backed a resolved price
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PriceSource {
    Live,
    #[default]
    Static,
}

/// Provider-neutral description of the resource a price is requested for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum ResourceSpec {
    Compute {
        vcpus: u32,
        ram_gb: f64,
        class: InstanceClass,
    },
    Storage {
        class: StorageClass,
    },
    Database {
        engine: DatabaseEngine,
    },
}

/// A resolved price for one provider/category/region/SKU combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuotation {
    /// Cloud provider
    pub provider: CloudProvider,
    /// Service label (e.g. "Amazon EC2", "Virtual Machines")
    pub service: String,
    /// Provider region code the price applies to
    pub region: String,
    /// Provider-specific instance/SKU identifier, when applicable
    pub instance_id: Option<String>,
    /// Hourly unit price in USD
    pub hourly: Option<f64>,
    /// Monthly unit price in USD
    pub monthly: Option<f64>,
    /// Per GB-month price in USD (storage-style services)
    pub per_gb_month: Option<f64>,
    /// Currency code (always "USD")
    pub currency: String,
    /// Whether the figure came from a live API or the static rate card
    pub source: PriceSource,
    /// When the price was resolved
    pub resolved_at: DateTime<Utc>,
}

impl PriceQuotation {
    /// Build a live quotation from an hourly rate; the monthly figure is
    /// derived with [`HOURS_PER_MONTH`].
    pub fn from_hourly(
        provider: CloudProvider,
        service: &str,
        region: &str,
        instance_id: &str,
        hourly: f64,
    ) -> Self {
        Self {
            provider,
            service: service.to_string(),
            region: region.to_string(),
            instance_id: Some(instance_id.to_string()),
            hourly: Some(hourly),
            monthly: Some(hourly * HOURS_PER_MONTH),
            per_gb_month: None,
            currency: "USD".to_string(),
            source: PriceSource::Live,
            resolved_at: Utc::now(),
        }
    }

    /// Build a live quotation from a per GB-month rate.
    pub fn from_per_gb_month(
        provider: CloudProvider,
        service: &str,
        region: &str,
        sku: &str,
        per_gb_month: f64,
    ) -> Self {
        Self {
            provider,
            service: service.to_string(),
            region: region.to_string(),
            instance_id: Some(sku.to_string()),
            hourly: None,
            monthly: None,
            per_gb_month: Some(per_gb_month),
            currency: "USD".to_string(),
            source: PriceSource::Live,
            resolved_at: Utc::now(),
        }
    }

    /// Monthly figure, derived from the hourly rate when only that is known.
    pub fn monthly_equivalent(&self) -> Option<f64> {
        self.monthly.or(self.hourly.map(|h| h * HOURS_PER_MONTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_wire_format() {
        assert_eq!(CloudProvider::Aws.to_string(), "aws");
        assert_eq!(CloudProvider::Oracle.to_string(), "oracle");
        assert_eq!("azure".parse::<CloudProvider>().unwrap(), CloudProvider::Azure);
        assert_eq!(CloudProvider::Gcp.display_name(), "GCP");
    }

    #[test]
    fn test_instance_class_kebab_case() {
        assert_eq!(InstanceClass::MemoryOptimized.to_string(), "memory-optimized");
        assert_eq!(
            "memory-optimized".parse::<InstanceClass>().unwrap(),
            InstanceClass::MemoryOptimized
        );
    }

    #[test]
    fn test_monthly_equivalent_derived_from_hourly() {
        let quote = PriceQuotation::from_hourly(CloudProvider::Aws, "Amazon EC2", "us-east-1", "t3.medium", 0.0416);
        let monthly = quote.monthly_equivalent().unwrap();
        assert!((monthly - 0.0416 * 730.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_equivalent_prefers_explicit_monthly() {
        let mut quote =
            PriceQuotation::from_hourly(CloudProvider::Gcp, "Compute Engine", "us-central1", "n2-standard-2", 0.1);
        quote.monthly = Some(50.0);
        assert_eq!(quote.monthly_equivalent(), Some(50.0));
    }

    #[test]
    fn test_per_gb_quotation_has_no_monthly() {
        let quote =
            PriceQuotation::from_per_gb_month(CloudProvider::Azure, "Storage", "eastus", "Standard_LRS", 0.018);
        assert_eq!(quote.monthly_equivalent(), None);
        assert_eq!(quote.per_gb_month, Some(0.018));
    }
}

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use domain_pricing::{DatabaseEngine, InstanceClass, LoadBalancerTier, StorageClass};

/// Workload region assumed when a requirement does not name one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Round to 2 decimal places, the precision of every reported dollar figure
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_instance_count() -> u32 {
    1
}

/// One compute configuration of the requirement fleet.
/// A requirement carries one or more of these; each contributes
/// `instance_count x unit cost` independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ComputeSpec {
    #[validate(range(min = 1, max = 128))]
    pub vcpus: u32,
    #[validate(range(min = 0.5, max = 4096.0))]
    pub ram_gb: f64,
    #[serde(default)]
    pub instance_class: InstanceClass,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_instance_count")]
    #[validate(range(min = 1, max = 10_000))]
    pub instance_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StorageSpec {
    #[validate(range(min = 0.0))]
    pub size_gb: f64,
    #[serde(default)]
    pub class: StorageClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DatabaseSpec {
    #[validate(range(min = 0.0))]
    pub size_gb: f64,
    #[serde(default)]
    pub engine: DatabaseEngine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NetworkingSpec {
    #[validate(range(min = 0.0))]
    pub bandwidth_gb: f64,
    #[serde(default)]
    pub load_balancer: LoadBalancerTier,
}

/// Abstract infrastructure requirement the engine prices per provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct InfrastructureRequirements {
    #[validate(length(min = 1), nested)]
    pub compute: Vec<ComputeSpec>,
    #[validate(nested)]
    pub storage: StorageSpec,
    #[validate(nested)]
    pub database: DatabaseSpec,
    #[validate(nested)]
    pub networking: NetworkingSpec,
}

impl InfrastructureRequirements {
    /// Region of the first compute configuration, used for the categories
    /// that carry a single region (storage, database, networking)
    pub fn primary_region(&self) -> &str {
        self.compute
            .first()
            .map(|c| c.region.as_str())
            .unwrap_or(DEFAULT_REGION)
    }
}

/// Which data source backed a provider's figures
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PriceDataSource {
    Live,
    #[default]
    Static,
    Hybrid,
}

/// Monthly cost breakdown for one provider, all figures rounded to 2 dp.
/// `total` is the sum of the four categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudProviderCostBreakdown {
    /// Display name ("AWS", "AZURE", "GCP", "ORACLE")
    pub name: String,
    pub compute: f64,
    pub storage: f64,
    pub database: f64,
    pub networking: f64,
    pub total: f64,
    /// Source annotation for compute/storage/database figures
    /// (networking is static by definition)
    pub pricing_source: PriceDataSource,
}

/// Which provider won each category in the multi-cloud estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MultiCloudBreakdown {
    pub compute: String,
    pub storage: String,
    pub database: String,
    pub networking: String,
}

/// Hypothetical best-of-breed bundle: cheapest provider per category.
///
/// This is an optimistic lower bound for illustration. It models no
/// inter-provider egress or multi-vendor operational overhead and is not a
/// deployable plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MultiCloudOption {
    pub cost: f64,
    pub breakdown: MultiCloudBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub single_cloud: String,
    pub multi_cloud: String,
}

/// Result of pricing a requirement across all four providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCalculationResult {
    /// All provider breakdowns, sorted ascending by total
    pub providers: Vec<CloudProviderCostBreakdown>,
    pub cheapest: CloudProviderCostBreakdown,
    pub most_expensive: CloudProviderCostBreakdown,
    /// `most_expensive.total - cheapest.total`
    pub potential_savings: f64,
    pub multi_cloud_option: MultiCloudOption,
    pub recommendations: Recommendations,
}

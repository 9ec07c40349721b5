//! Static fallback rate card.
//!
//! Fixed per-provider unit rates plus a region cost multiplier. These figures
//! approximate published on-demand list prices and guarantee a cost is always
//! computable when live pricing is unavailable. Rates are unit prices (per
//! vCPU-hour, per GB-RAM-hour, per GB-month); they are not tied to a specific
//! SKU.

use crate::models::{
    CloudProvider, DatabaseEngine, InstanceClass, LoadBalancerTier, StorageClass, HOURS_PER_MONTH,
};

/// Hourly unit rates for a compute instance class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputeRates {
    /// USD per vCPU per hour
    pub vcpu_hourly: f64,
    /// USD per GB of RAM per hour
    pub ram_gb_hourly: f64,
}

/// Always-available static pricing table
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPricingTable;

impl StaticPricingTable {
    pub fn new() -> Self {
        Self
    }

    /// Hourly compute unit rates per provider and instance class.
    ///
    /// Derived from current-generation list prices: e.g. AWS m5.large
    /// (2 vCPU / 8 GB) at $0.096/h decomposes into $0.024 per vCPU-hour and
    /// $0.006 per GB-hour.
    pub fn compute_rates(&self, provider: CloudProvider, class: InstanceClass) -> ComputeRates {
        let (vcpu_hourly, ram_gb_hourly) = match (provider, class) {
            (CloudProvider::Aws, InstanceClass::Standard) => (0.0240, 0.0060),
            (CloudProvider::Aws, InstanceClass::MemoryOptimized) => (0.0210, 0.00525),
            (CloudProvider::Azure, InstanceClass::Standard) => (0.0245, 0.0061),
            (CloudProvider::Azure, InstanceClass::MemoryOptimized) => (0.0215, 0.0054),
            (CloudProvider::Gcp, InstanceClass::Standard) => (0.0243, 0.0060),
            (CloudProvider::Gcp, InstanceClass::MemoryOptimized) => (0.0218, 0.0055),
            // OCI flexible shapes price per OCPU (2 vCPU) and per GB
            (CloudProvider::Oracle, _) => (0.0125, 0.0015),
        };

        ComputeRates {
            vcpu_hourly,
            ram_gb_hourly,
        }
    }

    /// Monthly cost of one instance of the given shape, scaled by the region
    /// multiplier: `(vcpus x vcpu_rate + ram x ram_rate) x 730 x multiplier`.
    pub fn compute_monthly(
        &self,
        provider: CloudProvider,
        vcpus: u32,
        ram_gb: f64,
        class: InstanceClass,
        region: &str,
    ) -> f64 {
        let rates = self.compute_rates(provider, class);
        let hourly = f64::from(vcpus) * rates.vcpu_hourly + ram_gb * rates.ram_gb_hourly;
        hourly * HOURS_PER_MONTH * self.region_multiplier(region)
    }

    /// USD per GB-month for a storage class
    pub fn storage_per_gb_month(&self, provider: CloudProvider, class: StorageClass) -> f64 {
        match (provider, class) {
            (CloudProvider::Aws, StorageClass::Ssd) => 0.08,
            (CloudProvider::Aws, StorageClass::Hdd) => 0.045,
            (CloudProvider::Aws, StorageClass::Object) => 0.023,
            (CloudProvider::Aws, StorageClass::Archive) => 0.004,
            (CloudProvider::Azure, StorageClass::Ssd) => 0.135,
            (CloudProvider::Azure, StorageClass::Hdd) => 0.05,
            (CloudProvider::Azure, StorageClass::Object) => 0.018,
            (CloudProvider::Azure, StorageClass::Archive) => 0.002,
            (CloudProvider::Gcp, StorageClass::Ssd) => 0.17,
            (CloudProvider::Gcp, StorageClass::Hdd) => 0.04,
            (CloudProvider::Gcp, StorageClass::Object) => 0.02,
            (CloudProvider::Gcp, StorageClass::Archive) => 0.0012,
            (CloudProvider::Oracle, StorageClass::Ssd) => 0.0255,
            (CloudProvider::Oracle, StorageClass::Hdd) => 0.0255,
            (CloudProvider::Oracle, StorageClass::Object) => 0.0255,
            (CloudProvider::Oracle, StorageClass::Archive) => 0.0026,
        }
    }

    /// Monthly storage cost (storage rates are region-independent)
    pub fn storage_monthly(
        &self,
        provider: CloudProvider,
        size_gb: f64,
        class: StorageClass,
    ) -> f64 {
        size_gb * self.storage_per_gb_month(provider, class)
    }

    /// USD per GB-month for a managed database engine.
    ///
    /// Amortizes instance plus storage cost into a single per-GB figure, the
    /// granularity the requirement model works at.
    pub fn database_per_gb_month(&self, provider: CloudProvider, engine: DatabaseEngine) -> f64 {
        match (provider, engine) {
            (CloudProvider::Aws, DatabaseEngine::Mysql) => 0.68,
            (CloudProvider::Aws, DatabaseEngine::Postgres) => 0.72,
            (CloudProvider::Aws, DatabaseEngine::Mariadb) => 0.66,
            (CloudProvider::Aws, DatabaseEngine::Sqlserver) => 1.85,
            (CloudProvider::Azure, DatabaseEngine::Mysql) => 0.72,
            (CloudProvider::Azure, DatabaseEngine::Postgres) => 0.75,
            (CloudProvider::Azure, DatabaseEngine::Mariadb) => 0.70,
            (CloudProvider::Azure, DatabaseEngine::Sqlserver) => 1.60,
            (CloudProvider::Gcp, DatabaseEngine::Mysql) => 0.62,
            (CloudProvider::Gcp, DatabaseEngine::Postgres) => 0.65,
            (CloudProvider::Gcp, DatabaseEngine::Mariadb) => 0.60,
            (CloudProvider::Gcp, DatabaseEngine::Sqlserver) => 2.10,
            (CloudProvider::Oracle, DatabaseEngine::Mysql) => 0.55,
            (CloudProvider::Oracle, DatabaseEngine::Postgres) => 0.58,
            (CloudProvider::Oracle, DatabaseEngine::Mariadb) => 0.52,
            (CloudProvider::Oracle, DatabaseEngine::Sqlserver) => 1.20,
        }
    }

    /// Monthly database cost, scaled by the region multiplier
    pub fn database_monthly(
        &self,
        provider: CloudProvider,
        size_gb: f64,
        engine: DatabaseEngine,
        region: &str,
    ) -> f64 {
        size_gb * self.database_per_gb_month(provider, engine) * self.region_multiplier(region)
    }

    /// USD per GB of egress bandwidth
    pub fn bandwidth_per_gb(&self, provider: CloudProvider) -> f64 {
        match provider {
            CloudProvider::Aws => 0.09,
            CloudProvider::Azure => 0.087,
            CloudProvider::Gcp => 0.12,
            CloudProvider::Oracle => 0.0085,
        }
    }

    /// Flat monthly load balancer rate per tier
    pub fn load_balancer_monthly(&self, provider: CloudProvider, tier: LoadBalancerTier) -> f64 {
        match (provider, tier) {
            (CloudProvider::Aws, LoadBalancerTier::Standard) => 16.43,
            (CloudProvider::Aws, LoadBalancerTier::Application) => 22.27,
            (CloudProvider::Aws, LoadBalancerTier::Network) => 16.43,
            (CloudProvider::Azure, LoadBalancerTier::Standard) => 18.25,
            (CloudProvider::Azure, LoadBalancerTier::Application) => 23.36,
            (CloudProvider::Azure, LoadBalancerTier::Network) => 18.25,
            (CloudProvider::Gcp, LoadBalancerTier::Standard) => 18.27,
            (CloudProvider::Gcp, LoadBalancerTier::Application) => 21.90,
            (CloudProvider::Gcp, LoadBalancerTier::Network) => 18.27,
            (CloudProvider::Oracle, LoadBalancerTier::Standard) => 14.60,
            (CloudProvider::Oracle, LoadBalancerTier::Application) => 18.25,
            (CloudProvider::Oracle, LoadBalancerTier::Network) => 14.60,
        }
    }

    /// Monthly networking cost: bandwidth plus load balancer. No live source
    /// exists for this category, so it is always computed here.
    pub fn networking_monthly(
        &self,
        provider: CloudProvider,
        bandwidth_gb: f64,
        tier: LoadBalancerTier,
    ) -> f64 {
        bandwidth_gb * self.bandwidth_per_gb(provider) + self.load_balancer_monthly(provider, tier)
    }

    /// Region cost multiplier, keyed by the workload (AWS-style) region.
    /// Unknown regions fall back to 1.0.
    pub fn region_multiplier(&self, region: &str) -> f64 {
        match region {
            "us-east-1" | "us-east-2" | "us-west-2" => 1.0,
            "us-west-1" => 1.08,
            "ca-central-1" => 1.05,
            "eu-west-1" | "eu-central-1" => 1.10,
            "eu-west-2" => 1.17,
            "ap-south-1" => 0.98,
            "ap-southeast-1" | "ap-northeast-1" => 1.17,
            "sa-east-1" => 1.28,
            _ => 1.0,
        }
    }
}

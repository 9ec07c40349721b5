//! Costing Domain
//!
//! Hybrid multi-cloud cost computation: prices an abstract infrastructure
//! requirement per provider, derives a best-of-breed multi-cloud estimate,
//! and re-prices baselines under running schedules and commitment models.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐     ┌────────────────────┐
//! │ CostCalculator │────▶│   PriceResolver    │  ← live pricing (cache + adapters)
//! └──────┬─────────┘     └────────────────────┘
//!        │ fallback      ┌────────────────────┐
//!        └──────────────▶│ StaticPricingTable │  ← always available
//! ┌────────────────┐     └────────────────────┘
//! │   Optimizer    │  ← pure argmin over computed breakdowns
//! └────────────────┘
//! ┌──────────────────────────┐
//! │ CostCustomizationEngine  │  ← schedule + commitment discounts (no I/O)
//! └──────────────────────────┘
//! ```

pub mod calculator;
pub mod customization;
pub mod models;
pub mod optimizer;
pub mod resolver;

// Re-export commonly used types
pub use calculator::{static_only_breakdown, CostCalculator};
pub use customization::{
    CommitmentTerm, CostCustomization, CostCustomizationEngine, CustomizedCostResult,
    EnvironmentComparison, EnvironmentConfig, EnvironmentType, ExpectedRuntime, PricingModel,
    PricingModelType, RunningSchedule,
};
pub use models::{
    CloudProviderCostBreakdown, ComputeSpec, CostCalculationResult, DatabaseSpec,
    InfrastructureRequirements, MultiCloudBreakdown, MultiCloudOption, NetworkingSpec,
    PriceDataSource, Recommendations, StorageSpec, DEFAULT_REGION,
};
pub use optimizer::optimize;
pub use resolver::PriceResolver;

//! Pricing Domain
//!
//! Provider-neutral price resolution for the cost computation engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │ UnifiedPricingService│  ← cache → live adapter → unavailable
//! └────┬───────────┬────┘
//!      │           │
//! ┌────▼────┐ ┌────▼─────┐
//! │  Cache  │ │ Adapters │  ← AWS / Azure / GCP pricing APIs
//! └─────────┘ └──────────┘
//! ┌─────────────────────┐
//! │ StaticPricingTable  │  ← always-available fallback rate card
//! └─────────────────────┘
//! ```
//!
//! The unified service never consults the static table; falling back is the
//! cost calculator's responsibility, which keeps each layer testable in
//! isolation.

pub mod cache;
pub mod config;
pub mod error;
pub mod mapper;
pub mod models;
pub mod providers;
pub mod statics;
pub mod unified;

// Re-export commonly used types
pub use cache::{CacheKey, PricingCache};
pub use config::{AwsPricingConfig, AzurePricingConfig, GcpPricingConfig, PricingConfig};
pub use error::{ProviderError, ProviderResult};
pub use models::{
    CloudProvider, CostCategory, DatabaseEngine, InstanceClass, LoadBalancerTier, PriceQuotation,
    PriceSource, ResourceSpec, StorageClass, HOURS_PER_MONTH,
};
pub use providers::{AwsPricingAdapter, AzurePricingAdapter, GcpPricingAdapter, PricingAdapter};
pub use statics::{ComputeRates, StaticPricingTable};
pub use unified::{UnifiedPricingService, LIVE_LOOKUP_TIMEOUT, PRICE_CACHE_TTL};

//! Live pricing adapters.
//!
//! One thin client per provider pricing API. An adapter returns either a
//! quotation or "no data"; transport and schema failures surface as
//! [`ProviderError`] and are collapsed to "unavailable" by the unified
//! service and never reach the cost calculator. Adapters perform no
//! retries; retry policy belongs to the caller.

pub mod aws;
pub mod azure;
pub mod gcp;

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::models::{CloudProvider, CostCategory, PriceQuotation};

pub use aws::AwsPricingAdapter;
pub use azure::AzurePricingAdapter;
pub use gcp::GcpPricingAdapter;

/// Trait for live pricing adapters
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PricingAdapter: Send + Sync {
    /// The cloud provider this adapter serves
    fn provider(&self) -> CloudProvider;

    /// Human-readable adapter name for logs
    fn name(&self) -> &'static str;

    /// Whether the adapter was configured at startup. A disabled adapter is
    /// never called; the decision is not re-evaluated per lookup.
    fn is_configured(&self) -> bool;

    /// Look up the price for a provider-specific SKU in a provider region.
    /// `Ok(None)` means the source had no data for the combination.
    async fn lookup(
        &self,
        category: CostCategory,
        provider_specific_id: &str,
        region: &str,
    ) -> ProviderResult<Option<PriceQuotation>>;
}

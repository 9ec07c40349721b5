//! Price resolution seam between the calculator and the pricing domain.
//!
//! The calculator depends on this trait rather than on the concrete unified
//! service, so tests can substitute a mock and assert on lookup behavior
//! (call counts, forced unavailability, panics at the task boundary).

use async_trait::async_trait;

use domain_pricing::{
    CloudProvider, CostCategory, PriceQuotation, ResourceSpec, UnifiedPricingService,
};

/// Resolves live prices; `None` means unavailable (fall back to static)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceResolver: Send + Sync {
    /// Resolve a live price for a generic resource spec, or report it
    /// unavailable. Must never fail.
    async fn resolve(
        &self,
        provider: CloudProvider,
        category: CostCategory,
        spec: &ResourceSpec,
        region: &str,
    ) -> Option<PriceQuotation>;

    /// Drop any cached quotations
    fn clear(&self);
}

#[async_trait]
impl PriceResolver for UnifiedPricingService {
    async fn resolve(
        &self,
        provider: CloudProvider,
        category: CostCategory,
        spec: &ResourceSpec,
        region: &str,
    ) -> Option<PriceQuotation> {
        UnifiedPricingService::resolve(self, provider, category, spec, region).await
    }

    fn clear(&self) {
        self.clear_cache();
    }
}

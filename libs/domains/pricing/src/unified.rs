//! Unified pricing service.
//!
//! Single entry point for live price resolution: cache, then the matching
//! adapter under a bounded timeout. On any failure the lookup reports
//! "unavailable"; static fallback is the caller's responsibility, which
//! keeps this component provider-only.

use std::sync::Arc;
use std::time::{Duration, Instant};

use observability::PricingMetrics;
use tracing::{debug, warn};

use crate::cache::{CacheKey, PricingCache};
use crate::config::PricingConfig;
use crate::mapper;
use crate::models::{CloudProvider, CostCategory, PriceQuotation, ResourceSpec};
use crate::providers::{
    AwsPricingAdapter, AzurePricingAdapter, GcpPricingAdapter, PricingAdapter,
};

/// How long a resolved quotation stays valid in the cache
pub const PRICE_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Upper bound on a single live adapter call
pub const LIVE_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Dispatches price lookups through cache and live adapters
pub struct UnifiedPricingService {
    adapters: Vec<Arc<dyn PricingAdapter>>,
    cache: Arc<PricingCache>,
    lookup_timeout: Duration,
}

impl UnifiedPricingService {
    /// Build the service with the standard adapter set. Oracle has no live
    /// adapter; its lookups always resolve to unavailable here.
    pub fn from_config(config: &PricingConfig) -> Self {
        let adapters: Vec<Arc<dyn PricingAdapter>> = vec![
            Arc::new(AwsPricingAdapter::new(config.aws.clone())),
            Arc::new(AzurePricingAdapter::new(config.azure.clone())),
            Arc::new(GcpPricingAdapter::new(config.gcp.clone())),
        ];
        Self::with_adapters(adapters, Arc::new(PricingCache::new()))
    }

    /// Build the service from explicit adapters and a cache (test seam)
    pub fn with_adapters(
        adapters: Vec<Arc<dyn PricingAdapter>>,
        cache: Arc<PricingCache>,
    ) -> Self {
        Self {
            adapters,
            cache,
            lookup_timeout: LIVE_LOOKUP_TIMEOUT,
        }
    }

    /// Override the live lookup timeout
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// The shared quotation cache
    pub fn cache(&self) -> &Arc<PricingCache> {
        &self.cache
    }

    fn adapter_for(&self, provider: CloudProvider) -> Option<&Arc<dyn PricingAdapter>> {
        self.adapters.iter().find(|a| a.provider() == provider)
    }

    /// Resolve a live price for a generic resource spec.
    ///
    /// `None` covers every unavailability cause: no adapter for the provider,
    /// adapter disabled at startup, no mappable SKU for the category, empty
    /// result set, transport or schema error, and timeout. Errors are logged
    /// and never propagated.
    pub async fn resolve(
        &self,
        provider: CloudProvider,
        category: CostCategory,
        spec: &ResourceSpec,
        region: &str,
    ) -> Option<PriceQuotation> {
        let adapter = self.adapter_for(provider)?;

        if !adapter.is_configured() {
            debug!(provider = adapter.name(), "Live pricing disabled for provider");
            return None;
        }

        let spec_id = mapper::spec_id(provider, category, spec)?;
        let provider_region = mapper::region_for(provider, region);
        let key = CacheKey::new(provider, category, &provider_region, &spec_id);

        let provider_label = provider.to_string();
        let category_label = category.to_string();

        if let Some(hit) = self.cache.get(&key) {
            PricingMetrics::record_cache_hit(&provider_label, &category_label);
            debug!(
                provider = adapter.name(),
                spec_id, region = provider_region, "Price served from cache"
            );
            return Some(hit);
        }
        PricingMetrics::record_cache_miss(&provider_label, &category_label);

        let started = Instant::now();
        let outcome = tokio::time::timeout(
            self.lookup_timeout,
            adapter.lookup(category, &spec_id, &provider_region),
        )
        .await;
        PricingMetrics::record_lookup_duration(&provider_label, started.elapsed().as_secs_f64());

        match outcome {
            Ok(Ok(Some(quotation))) => {
                PricingMetrics::record_live_lookup(&provider_label, &category_label, "ok");
                self.cache.put(key, quotation.clone(), PRICE_CACHE_TTL);
                Some(quotation)
            }
            Ok(Ok(None)) => {
                PricingMetrics::record_live_lookup(&provider_label, &category_label, "empty");
                debug!(
                    provider = adapter.name(),
                    spec_id, region = provider_region, "Live source had no data"
                );
                None
            }
            Ok(Err(e)) => {
                PricingMetrics::record_live_lookup(&provider_label, &category_label, "error");
                warn!(
                    provider = adapter.name(),
                    spec_id,
                    region = provider_region,
                    error = %e,
                    "Live price lookup failed"
                );
                None
            }
            Err(_) => {
                PricingMetrics::record_live_lookup(&provider_label, &category_label, "timeout");
                warn!(
                    provider = adapter.name(),
                    spec_id,
                    region = provider_region,
                    timeout_ms = self.lookup_timeout.as_millis() as u64,
                    "Live price lookup timed out"
                );
                None
            }
        }
    }

    /// Drop every cached quotation
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProviderError, ProviderResult};
    use crate::models::InstanceClass;
    use crate::providers::MockPricingAdapter;
    use async_trait::async_trait;

    fn compute_spec() -> ResourceSpec {
        ResourceSpec::Compute {
            vcpus: 2,
            ram_gb: 4.0,
            class: InstanceClass::Standard,
        }
    }

    fn quote() -> PriceQuotation {
        PriceQuotation::from_hourly(CloudProvider::Aws, "Amazon EC2", "us-east-1", "t3.medium", 0.0416)
    }

    fn service_with(adapter: MockPricingAdapter) -> UnifiedPricingService {
        UnifiedPricingService::with_adapters(vec![Arc::new(adapter)], Arc::new(PricingCache::new()))
    }

    #[tokio::test]
    async fn test_second_lookup_hits_cache_not_adapter() {
        let mut adapter = MockPricingAdapter::new();
        adapter.expect_provider().return_const(CloudProvider::Aws);
        adapter.expect_is_configured().return_const(true);
        adapter
            .expect_lookup()
            .times(1)
            .returning(|_, _, _| Ok(Some(quote())));

        let service = service_with(adapter);

        let first = service
            .resolve(CloudProvider::Aws, CostCategory::Compute, &compute_spec(), "us-east-1")
            .await
            .unwrap();
        let second = service
            .resolve(CloudProvider::Aws, CostCategory::Compute, &compute_spec(), "us-east-1")
            .await
            .unwrap();

        assert_eq!(first.hourly, second.hourly);
        assert_eq!(service.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_adapter_error_collapses_to_unavailable() {
        let mut adapter = MockPricingAdapter::new();
        adapter.expect_provider().return_const(CloudProvider::Aws);
        adapter.expect_is_configured().return_const(true);
        adapter
            .expect_lookup()
            .returning(|_, _, _| Err(ProviderError::ApiError("boom".to_string())));

        let service = service_with(adapter);

        let result = service
            .resolve(CloudProvider::Aws, CostCategory::Compute, &compute_spec(), "us-east-1")
            .await;
        assert!(result.is_none());
        // Errors are not cached
        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_empty_result_is_unavailable() {
        let mut adapter = MockPricingAdapter::new();
        adapter.expect_provider().return_const(CloudProvider::Aws);
        adapter.expect_is_configured().return_const(true);
        adapter.expect_lookup().returning(|_, _, _| Ok(None));

        let service = service_with(adapter);

        let result = service
            .resolve(CloudProvider::Aws, CostCategory::Compute, &compute_spec(), "us-east-1")
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_disabled_adapter_is_never_called() {
        let mut adapter = MockPricingAdapter::new();
        adapter.expect_provider().return_const(CloudProvider::Aws);
        adapter.expect_is_configured().return_const(false);
        adapter.expect_lookup().never();

        let service = service_with(adapter);

        let result = service
            .resolve(CloudProvider::Aws, CostCategory::Compute, &compute_spec(), "us-east-1")
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_provider_without_adapter_is_unavailable() {
        let service =
            UnifiedPricingService::with_adapters(Vec::new(), Arc::new(PricingCache::new()));

        let result = service
            .resolve(CloudProvider::Oracle, CostCategory::Compute, &compute_spec(), "us-east-1")
            .await;
        assert!(result.is_none());
    }

    /// Adapter that sleeps past any reasonable timeout
    struct SlowAdapter;

    #[async_trait]
    impl PricingAdapter for SlowAdapter {
        fn provider(&self) -> CloudProvider {
            CloudProvider::Azure
        }

        fn name(&self) -> &'static str {
            "slow"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn lookup(
            &self,
            _category: CostCategory,
            _id: &str,
            _region: &str,
        ) -> ProviderResult<Option<PriceQuotation>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Some(quote()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_adapter_times_out() {
        let service =
            UnifiedPricingService::with_adapters(vec![Arc::new(SlowAdapter)], Arc::new(PricingCache::new()))
                .with_lookup_timeout(Duration::from_millis(50));

        let result = service
            .resolve(CloudProvider::Azure, CostCategory::Compute, &compute_spec(), "us-east-1")
            .await;
        assert!(result.is_none());
        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let mut adapter = MockPricingAdapter::new();
        adapter.expect_provider().return_const(CloudProvider::Aws);
        adapter.expect_is_configured().return_const(true);
        adapter
            .expect_lookup()
            .times(2)
            .returning(|_, _, _| Ok(Some(quote())));

        let service = service_with(adapter);

        service
            .resolve(CloudProvider::Aws, CostCategory::Compute, &compute_spec(), "us-east-1")
            .await;
        service.clear_cache();
        // Cache cleared, so the adapter is consulted again
        service
            .resolve(CloudProvider::Aws, CostCategory::Compute, &compute_spec(), "us-east-1")
            .await;
    }
}

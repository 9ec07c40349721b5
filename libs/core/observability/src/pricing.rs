//! Metrics for the pricing resolution path (cache, live adapters, fallbacks).

use metrics::{counter, histogram};

/// Pricing lookup metrics recorder
pub struct PricingMetrics;

impl PricingMetrics {
    /// Record a pricing cache hit
    pub fn record_cache_hit(provider: &str, category: &str) {
        counter!(
            "pricing_cache_hits_total",
            "provider" => provider.to_string(),
            "category" => category.to_string()
        )
        .increment(1);
    }

    /// Record a pricing cache miss
    pub fn record_cache_miss(provider: &str, category: &str) {
        counter!(
            "pricing_cache_misses_total",
            "provider" => provider.to_string(),
            "category" => category.to_string()
        )
        .increment(1);
    }

    /// Record a live lookup outcome ("ok", "empty", "error", "timeout")
    pub fn record_live_lookup(provider: &str, category: &str, outcome: &str) {
        counter!(
            "pricing_live_lookups_total",
            "provider" => provider.to_string(),
            "category" => category.to_string(),
            "outcome" => outcome.to_string()
        )
        .increment(1);
    }

    /// Record the duration of a live lookup
    pub fn record_lookup_duration(provider: &str, duration_secs: f64) {
        histogram!(
            "pricing_lookup_duration_seconds",
            "provider" => provider.to_string()
        )
        .record(duration_secs);
    }

    /// Record a fallback to the static rate card
    pub fn record_static_fallback(provider: &str, category: &str) {
        counter!(
            "pricing_static_fallbacks_total",
            "provider" => provider.to_string(),
            "category" => category.to_string()
        )
        .increment(1);
    }
}

//! Observability utilities for the cost computation engine.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Custom metrics for pricing lookups and cost calculations
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, PricingMetrics};
//!
//! // Initialize metrics recorder
//! init_metrics();
//!
//! // Record pricing operations
//! PricingMetrics::record_cache_hit("aws", "compute");
//! PricingMetrics::record_live_lookup("azure", "compute", "ok");
//! ```

pub mod costing;
pub mod pricing;

pub use costing::CostMetrics;
pub use pricing::PricingMetrics;

// Re-export metrics macros for convenience
pub use metrics::{counter, gauge, histogram};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// This should be called once at application startup.
/// Returns the PrometheusHandle for rendering metrics.
pub fn init_metrics() -> &'static PrometheusHandle {
    METRICS_HANDLE.get_or_init(|| {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("Failed to install Prometheus recorder");

        info!("Prometheus metrics recorder initialized");

        register_metric_descriptions();

        handle
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Render the current metrics in Prometheus text exposition format
pub fn render_metrics() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

/// Register metric descriptions for documentation
fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_histogram;

    // Pricing lookup metrics
    describe_counter!(
        "pricing_cache_hits_total",
        "Pricing cache hits by provider and category"
    );
    describe_counter!(
        "pricing_cache_misses_total",
        "Pricing cache misses by provider and category"
    );
    describe_counter!(
        "pricing_live_lookups_total",
        "Live pricing lookups by provider, category and outcome"
    );
    describe_counter!(
        "pricing_static_fallbacks_total",
        "Static rate card fallbacks by provider and category"
    );
    describe_histogram!(
        "pricing_lookup_duration_seconds",
        "Live pricing lookup duration in seconds"
    );

    // Cost calculation metrics
    describe_counter!(
        "cost_calculations_total",
        "Total cost calculation requests"
    );
    describe_histogram!(
        "cost_calculation_duration_seconds",
        "Cost calculation duration in seconds"
    );
    describe_counter!(
        "cost_provider_task_failures_total",
        "Provider tasks replaced by a static-only computation"
    );
    describe_counter!(
        "cost_customizations_total",
        "Total cost customization requests by pricing model"
    );
}

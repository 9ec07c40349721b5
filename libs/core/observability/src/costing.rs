//! Metrics for cost calculations and customizations.

use metrics::{counter, histogram};

/// Cost calculation metrics recorder
pub struct CostMetrics;

impl CostMetrics {
    /// Record a completed cost calculation
    pub fn record_calculation(duration_secs: f64) {
        counter!("cost_calculations_total").increment(1);
        histogram!("cost_calculation_duration_seconds").record(duration_secs);
    }

    /// Record a provider task that was replaced by a static-only computation
    pub fn record_provider_task_failure(provider: &str) {
        counter!(
            "cost_provider_task_failures_total",
            "provider" => provider.to_string()
        )
        .increment(1);
    }

    /// Record a cost customization request
    pub fn record_customization(pricing_model: &str) {
        counter!(
            "cost_customizations_total",
            "pricing_model" => pricing_model.to_string()
        )
        .increment(1);
    }
}

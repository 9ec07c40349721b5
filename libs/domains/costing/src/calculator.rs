//! Cost calculator.
//!
//! Prices a requirement across the four fixed providers with one concurrent
//! task per provider. Within a task the categories are computed sequentially,
//! each trying the live resolver first and falling back to the static rate
//! card. A provider task that fails outright is replaced by a full
//! static-only computation, so the calculator always returns exactly four
//! breakdowns.

use std::sync::Arc;
use std::time::Instant;

use observability::{CostMetrics, PricingMetrics};
use tokio::task::JoinSet;
use tracing::{info, warn};

use domain_pricing::{CloudProvider, CostCategory, ResourceSpec, StaticPricingTable};

use crate::models::{
    round2, CloudProviderCostBreakdown, CostCalculationResult, InfrastructureRequirements,
    PriceDataSource, Recommendations,
};
use crate::optimizer;
use crate::resolver::PriceResolver;

/// Orchestrates per-provider, per-category cost computation
pub struct CostCalculator {
    resolver: Arc<dyn PriceResolver>,
    statics: StaticPricingTable,
}

impl CostCalculator {
    pub fn new(resolver: Arc<dyn PriceResolver>) -> Self {
        Self {
            resolver,
            statics: StaticPricingTable::new(),
        }
    }

    /// Price the requirement for every provider and assemble the comparison.
    ///
    /// Never fails: pricing degradation reduces freshness, not availability
    /// of an answer.
    pub async fn calculate_costs(
        &self,
        requirements: &InfrastructureRequirements,
    ) -> CostCalculationResult {
        let started = Instant::now();
        let requirements = Arc::new(requirements.clone());

        let mut tasks: JoinSet<(CloudProvider, CloudProviderCostBreakdown)> = JoinSet::new();
        for provider in CloudProvider::ALL {
            let resolver = Arc::clone(&self.resolver);
            let statics = self.statics;
            let requirements = Arc::clone(&requirements);
            tasks.spawn(async move {
                let breakdown =
                    provider_breakdown(provider, resolver.as_ref(), &statics, &requirements).await;
                (provider, breakdown)
            });
        }

        let mut completed: Vec<CloudProvider> = Vec::with_capacity(4);
        let mut providers: Vec<CloudProviderCostBreakdown> = Vec::with_capacity(4);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((provider, breakdown)) => {
                    completed.push(provider);
                    providers.push(breakdown);
                }
                Err(e) => {
                    warn!(error = %e, "Provider pricing task failed");
                }
            }
        }

        // A failed task never reports its provider; recompute those from the
        // static rate card so the result always covers all four providers.
        for provider in CloudProvider::ALL {
            if !completed.contains(&provider) {
                CostMetrics::record_provider_task_failure(&provider.to_string());
                providers.push(static_only_breakdown(provider, &self.statics, &requirements));
            }
        }

        providers.sort_by(|a, b| {
            a.total
                .partial_cmp(&b.total)
                .expect("cost totals are finite")
        });

        let cheapest = providers[0].clone();
        let most_expensive = providers[providers.len() - 1].clone();
        let potential_savings = round2(most_expensive.total - cheapest.total);
        let multi_cloud_option = optimizer::optimize(&providers);

        let recommendations = Recommendations {
            single_cloud: format!(
                "{} offers the best overall value at ${}/month with competitive pricing across all services",
                cheapest.name, cheapest.total
            ),
            multi_cloud: format!(
                "Hybrid approach could save an additional ${}/month by optimizing service placement",
                round2(cheapest.total - multi_cloud_option.cost)
            ),
        };

        CostMetrics::record_calculation(started.elapsed().as_secs_f64());
        info!(
            cheapest = %cheapest.name,
            cheapest_total = cheapest.total,
            potential_savings,
            "Cost calculation complete"
        );

        CostCalculationResult {
            providers,
            cheapest,
            most_expensive,
            potential_savings,
            multi_cloud_option,
            recommendations,
        }
    }

    /// Drop all cached price quotations
    pub fn clear_cache(&self) {
        self.resolver.clear();
    }
}

async fn provider_breakdown(
    provider: CloudProvider,
    resolver: &dyn PriceResolver,
    statics: &StaticPricingTable,
    requirements: &InfrastructureRequirements,
) -> CloudProviderCostBreakdown {
    let region = requirements.primary_region();
    let mut used_live = false;
    let mut used_static = false;

    let mut compute = 0.0;
    for spec in &requirements.compute {
        let resource = ResourceSpec::Compute {
            vcpus: spec.vcpus,
            ram_gb: spec.ram_gb,
            class: spec.instance_class,
        };
        let unit_monthly = match resolver
            .resolve(provider, CostCategory::Compute, &resource, &spec.region)
            .await
            .and_then(|q| q.monthly_equivalent())
        {
            Some(monthly) => {
                used_live = true;
                monthly
            }
            None => {
                PricingMetrics::record_static_fallback(&provider.to_string(), "compute");
                used_static = true;
                statics.compute_monthly(
                    provider,
                    spec.vcpus,
                    spec.ram_gb,
                    spec.instance_class,
                    &spec.region,
                )
            }
        };
        compute += unit_monthly * f64::from(spec.instance_count);
    }

    let storage_resource = ResourceSpec::Storage {
        class: requirements.storage.class,
    };
    let storage = match resolver
        .resolve(provider, CostCategory::Storage, &storage_resource, region)
        .await
        .and_then(|q| q.per_gb_month)
    {
        Some(per_gb) => {
            used_live = true;
            requirements.storage.size_gb * per_gb
        }
        None => {
            PricingMetrics::record_static_fallback(&provider.to_string(), "storage");
            used_static = true;
            statics.storage_monthly(provider, requirements.storage.size_gb, requirements.storage.class)
        }
    };

    let database_resource = ResourceSpec::Database {
        engine: requirements.database.engine,
    };
    let database = match resolver
        .resolve(provider, CostCategory::Database, &database_resource, region)
        .await
        .and_then(|q| q.monthly_equivalent())
    {
        Some(monthly) => {
            used_live = true;
            monthly
        }
        None => {
            PricingMetrics::record_static_fallback(&provider.to_string(), "database");
            used_static = true;
            statics.database_monthly(
                provider,
                requirements.database.size_gb,
                requirements.database.engine,
                region,
            )
        }
    };

    // Networking has no live source; always priced from the rate card
    let networking = statics.networking_monthly(
        provider,
        requirements.networking.bandwidth_gb,
        requirements.networking.load_balancer,
    );

    let pricing_source = match (used_live, used_static) {
        (true, false) => PriceDataSource::Live,
        (true, true) => PriceDataSource::Hybrid,
        _ => PriceDataSource::Static,
    };

    CloudProviderCostBreakdown {
        name: provider.display_name().to_string(),
        compute: round2(compute),
        storage: round2(storage),
        database: round2(database),
        networking: round2(networking),
        total: round2(compute + storage + database + networking),
        pricing_source,
    }
}

/// Full static-only computation for one provider: the substitute when a
/// provider task fails, and the reference the live path degrades to.
pub fn static_only_breakdown(
    provider: CloudProvider,
    statics: &StaticPricingTable,
    requirements: &InfrastructureRequirements,
) -> CloudProviderCostBreakdown {
    let region = requirements.primary_region();

    let mut compute = 0.0;
    for spec in &requirements.compute {
        let unit_monthly = statics.compute_monthly(
            provider,
            spec.vcpus,
            spec.ram_gb,
            spec.instance_class,
            &spec.region,
        );
        compute += unit_monthly * f64::from(spec.instance_count);
    }

    let storage =
        statics.storage_monthly(provider, requirements.storage.size_gb, requirements.storage.class);
    let database = statics.database_monthly(
        provider,
        requirements.database.size_gb,
        requirements.database.engine,
        region,
    );
    let networking = statics.networking_monthly(
        provider,
        requirements.networking.bandwidth_gb,
        requirements.networking.load_balancer,
    );

    CloudProviderCostBreakdown {
        name: provider.display_name().to_string(),
        compute: round2(compute),
        storage: round2(storage),
        database: round2(database),
        networking: round2(networking),
        total: round2(compute + storage + database + networking),
        pricing_source: PriceDataSource::Static,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComputeSpec, DatabaseSpec, NetworkingSpec, StorageSpec};
    use crate::resolver::MockPriceResolver;
    use async_trait::async_trait;
    use domain_pricing::{
        DatabaseEngine, InstanceClass, LoadBalancerTier, PriceQuotation, StorageClass,
    };

    fn requirements() -> InfrastructureRequirements {
        InfrastructureRequirements {
            compute: vec![ComputeSpec {
                vcpus: 2,
                ram_gb: 8.0,
                instance_class: InstanceClass::Standard,
                region: "us-east-1".to_string(),
                instance_count: 1,
            }],
            storage: StorageSpec {
                size_gb: 500.0,
                class: StorageClass::Ssd,
            },
            database: DatabaseSpec {
                size_gb: 100.0,
                engine: DatabaseEngine::Postgres,
            },
            networking: NetworkingSpec {
                bandwidth_gb: 1000.0,
                load_balancer: LoadBalancerTier::Application,
            },
        }
    }

    fn static_only_calculator() -> CostCalculator {
        let mut resolver = MockPriceResolver::new();
        resolver.expect_resolve().returning(|_, _, _, _| None);
        resolver.expect_clear().return_const(());
        CostCalculator::new(Arc::new(resolver))
    }

    #[tokio::test]
    async fn test_returns_exactly_four_breakdowns() {
        let result = static_only_calculator().calculate_costs(&requirements()).await;

        assert_eq!(result.providers.len(), 4);
        let mut names: Vec<&str> = result.providers.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["AWS", "AZURE", "GCP", "ORACLE"]);
    }

    #[tokio::test]
    async fn test_totals_are_category_sums() {
        let result = static_only_calculator().calculate_costs(&requirements()).await;

        for provider in &result.providers {
            let sum = provider.compute + provider.storage + provider.database + provider.networking;
            assert!(
                (provider.total - sum).abs() <= 0.011,
                "{}: total {} vs sum {}",
                provider.name,
                provider.total,
                sum
            );
        }
    }

    #[tokio::test]
    async fn test_providers_sorted_and_savings_non_negative() {
        let result = static_only_calculator().calculate_costs(&requirements()).await;

        for pair in result.providers.windows(2) {
            assert!(pair[0].total <= pair[1].total);
        }
        assert_eq!(result.cheapest, result.providers[0]);
        assert_eq!(result.most_expensive, result.providers[3]);
        assert!(result.potential_savings >= 0.0);
        assert_eq!(
            result.potential_savings,
            round2(result.most_expensive.total - result.cheapest.total)
        );
    }

    #[tokio::test]
    async fn test_multi_cloud_cost_bounded_by_cheapest() {
        let result = static_only_calculator().calculate_costs(&requirements()).await;

        assert!(result.multi_cloud_option.cost <= result.cheapest.total + 0.011);
        let expected: f64 = [
            result.providers.iter().map(|p| p.compute).fold(f64::INFINITY, f64::min),
            result.providers.iter().map(|p| p.storage).fold(f64::INFINITY, f64::min),
            result.providers.iter().map(|p| p.database).fold(f64::INFINITY, f64::min),
            result.providers.iter().map(|p| p.networking).fold(f64::INFINITY, f64::min),
        ]
        .iter()
        .sum();
        assert!((result.multi_cloud_option.cost - round2(expected)).abs() <= 0.011);
    }

    #[tokio::test]
    async fn test_all_live_failures_match_pure_static_computation() {
        let result = static_only_calculator().calculate_costs(&requirements()).await;
        let statics = StaticPricingTable::new();
        let req = requirements();

        for provider in CloudProvider::ALL {
            let expected = static_only_breakdown(provider, &statics, &req);
            let actual = result
                .providers
                .iter()
                .find(|p| p.name == provider.display_name())
                .unwrap();
            assert_eq!(actual.total, expected.total, "{}", expected.name);
            assert_eq!(actual.pricing_source, PriceDataSource::Static);
        }
    }

    #[tokio::test]
    async fn test_live_compute_quote_is_used_and_scaled_by_count() {
        let mut resolver = MockPriceResolver::new();
        resolver.expect_resolve().returning(|provider, category, _, _| {
            if provider == CloudProvider::Aws && category == CostCategory::Compute {
                let mut quote = PriceQuotation::from_hourly(
                    CloudProvider::Aws,
                    "Amazon EC2",
                    "us-east-1",
                    "t3.large",
                    0.0832,
                );
                quote.monthly = Some(100.0);
                Some(quote)
            } else {
                None
            }
        });
        resolver.expect_clear().return_const(());

        let mut req = requirements();
        req.compute[0].instance_count = 3;

        let result = CostCalculator::new(Arc::new(resolver)).calculate_costs(&req).await;
        let aws = result.providers.iter().find(|p| p.name == "AWS").unwrap();

        assert_eq!(aws.compute, 300.0);
        assert_eq!(aws.pricing_source, PriceDataSource::Hybrid);
    }

    #[tokio::test]
    async fn test_fleet_accumulates_across_compute_specs() {
        let mut req = requirements();
        req.compute.push(ComputeSpec {
            vcpus: 4,
            ram_gb: 32.0,
            instance_class: InstanceClass::MemoryOptimized,
            region: "us-east-1".to_string(),
            instance_count: 2,
        });

        let result = static_only_calculator().calculate_costs(&req).await;
        let statics = StaticPricingTable::new();
        let aws = result.providers.iter().find(|p| p.name == "AWS").unwrap();

        let expected = statics.compute_monthly(CloudProvider::Aws, 2, 8.0, InstanceClass::Standard, "us-east-1")
            + 2.0 * statics.compute_monthly(
                CloudProvider::Aws,
                4,
                32.0,
                InstanceClass::MemoryOptimized,
                "us-east-1",
            );
        assert!((aws.compute - round2(expected)).abs() < 0.011);
    }

    /// Resolver that panics for one provider, exercising task-boundary
    /// failure isolation
    struct PanickyResolver {
        panics_for: CloudProvider,
    }

    #[async_trait]
    impl PriceResolver for PanickyResolver {
        async fn resolve(
            &self,
            provider: CloudProvider,
            _category: CostCategory,
            _spec: &ResourceSpec,
            _region: &str,
        ) -> Option<PriceQuotation> {
            if provider == self.panics_for {
                panic!("synthetic provider failure");
            }
            None
        }

        fn clear(&self) {}
    }

    #[tokio::test]
    async fn test_panicking_provider_task_is_replaced_with_static() {
        let calculator = CostCalculator::new(Arc::new(PanickyResolver {
            panics_for: CloudProvider::Azure,
        }));
        let req = requirements();

        let result = calculator.calculate_costs(&req).await;
        assert_eq!(result.providers.len(), 4);

        let statics = StaticPricingTable::new();
        let expected = static_only_breakdown(CloudProvider::Azure, &statics, &req);
        let azure = result.providers.iter().find(|p| p.name == "AZURE").unwrap();
        assert_eq!(azure.total, expected.total);
        assert_eq!(azure.pricing_source, PriceDataSource::Static);
    }

    #[tokio::test]
    async fn test_recommendations_reference_cheapest_provider() {
        let result = static_only_calculator().calculate_costs(&requirements()).await;

        assert!(result.recommendations.single_cloud.contains(&result.cheapest.name));
        assert!(result.recommendations.multi_cloud.contains("Hybrid"));
    }
}

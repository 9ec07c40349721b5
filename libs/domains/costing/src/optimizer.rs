//! Multi-cloud optimizer.
//!
//! Pure function over already-computed provider breakdowns: picks the
//! cheapest provider per category and sums the minimums. Ties go to the
//! first provider seen. No I/O.
//!
//! The estimate is an optimistic lower bound: it ignores inter-provider
//! data egress and the operational overhead of running across vendors.

use crate::models::{round2, CloudProviderCostBreakdown, MultiCloudBreakdown, MultiCloudOption};

fn cheapest_by<'a>(
    providers: &'a [CloudProviderCostBreakdown],
    category: impl Fn(&CloudProviderCostBreakdown) -> f64,
) -> &'a CloudProviderCostBreakdown {
    let mut min = &providers[0];
    for provider in &providers[1..] {
        if category(provider) < category(min) {
            min = provider;
        }
    }
    min
}

/// Select the cheapest provider per category and sum the minimums
pub fn optimize(providers: &[CloudProviderCostBreakdown]) -> MultiCloudOption {
    if providers.is_empty() {
        return MultiCloudOption::default();
    }

    let compute = cheapest_by(providers, |p| p.compute);
    let storage = cheapest_by(providers, |p| p.storage);
    let database = cheapest_by(providers, |p| p.database);
    let networking = cheapest_by(providers, |p| p.networking);

    MultiCloudOption {
        cost: round2(compute.compute + storage.storage + database.database + networking.networking),
        breakdown: MultiCloudBreakdown {
            compute: compute.name.clone(),
            storage: storage.name.clone(),
            database: database.name.clone(),
            networking: networking.name.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceDataSource;

    fn breakdown(name: &str, compute: f64, storage: f64, database: f64, networking: f64) -> CloudProviderCostBreakdown {
        CloudProviderCostBreakdown {
            name: name.to_string(),
            compute,
            storage,
            database,
            networking,
            total: compute + storage + database + networking,
            pricing_source: PriceDataSource::Static,
        }
    }

    #[test]
    fn test_picks_minimum_per_category() {
        let providers = vec![
            breakdown("AWS", 100.0, 20.0, 50.0, 10.0),
            breakdown("AZURE", 90.0, 30.0, 60.0, 12.0),
            breakdown("GCP", 110.0, 15.0, 40.0, 14.0),
            breakdown("ORACLE", 120.0, 25.0, 55.0, 8.0),
        ];

        let option = optimize(&providers);

        assert_eq!(option.breakdown.compute, "AZURE");
        assert_eq!(option.breakdown.storage, "GCP");
        assert_eq!(option.breakdown.database, "GCP");
        assert_eq!(option.breakdown.networking, "ORACLE");
        assert_eq!(option.cost, 90.0 + 15.0 + 40.0 + 8.0);
    }

    #[test]
    fn test_cost_never_exceeds_cheapest_total() {
        let providers = vec![
            breakdown("AWS", 100.0, 20.0, 50.0, 10.0),
            breakdown("AZURE", 90.0, 30.0, 60.0, 12.0),
        ];

        let option = optimize(&providers);
        let cheapest_total = providers
            .iter()
            .map(|p| p.total)
            .fold(f64::INFINITY, f64::min);
        assert!(option.cost <= cheapest_total);
    }

    #[test]
    fn test_ties_break_to_first_seen() {
        let providers = vec![
            breakdown("AWS", 100.0, 20.0, 50.0, 10.0),
            breakdown("AZURE", 100.0, 20.0, 50.0, 10.0),
        ];

        let option = optimize(&providers);
        assert_eq!(option.breakdown.compute, "AWS");
        assert_eq!(option.breakdown.networking, "AWS");
    }

    #[test]
    fn test_empty_input_yields_default() {
        let option = optimize(&[]);
        assert_eq!(option.cost, 0.0);
    }
}

//! Cost customization engine.
//!
//! Re-prices a baseline (24/7 on-demand) monthly cost under a running
//! schedule and a commitment/pricing model. Two sequential discount stages:
//! running-hours proration first, then the pricing-model percentage applied
//! to the already-prorated cost, so the two discounts never double-count.
//!
//! Inputs are clamped into their valid ranges rather than rejected; the
//! engine always returns a numeric result.

use std::collections::HashMap;

use observability::CostMetrics;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use domain_pricing::HOURS_PER_MONTH;

/// Deployment environment type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum EnvironmentType {
    #[default]
    Production,
    Staging,
    Development,
    Testing,
    Qa,
    Demo,
    DisasterRecovery,
}

impl EnvironmentType {
    /// Dev and test environments qualify for an extra discount and relaxed
    /// commitment recommendations
    pub fn is_dev_test(&self) -> bool {
        matches!(self, EnvironmentType::Development | EnvironmentType::Testing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub env_type: EnvironmentType,
    #[serde(default)]
    pub description: Option<String>,
}

/// When the workload actually runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningSchedule {
    /// 1-24 hours per day
    pub hours_per_day: f64,
    /// 1-7 days per week
    pub days_per_week: f64,
    /// Alternative: total hours per month, overriding the daily/weekly fields
    #[serde(default)]
    pub hours_per_month: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    /// Free-form label, e.g. "9am-5pm Mon-Fri"
    #[serde(default)]
    pub schedule: Option<String>,
}

/// Commitment/pricing model selection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
pub enum PricingModelType {
    #[default]
    #[serde(rename = "on-demand")]
    #[strum(serialize = "on-demand")]
    OnDemand,
    #[serde(rename = "reserved-1yr")]
    #[strum(serialize = "reserved-1yr")]
    Reserved1Yr,
    #[serde(rename = "reserved-3yr")]
    #[strum(serialize = "reserved-3yr")]
    Reserved3Yr,
    #[serde(rename = "savings-plan")]
    #[strum(serialize = "savings-plan")]
    SavingsPlan,
    #[serde(rename = "spot")]
    #[strum(serialize = "spot")]
    Spot,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum CommitmentTerm {
    #[default]
    NoUpfront,
    PartialUpfront,
    AllUpfront,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingModel {
    #[serde(rename = "type")]
    pub model_type: PricingModelType,
    #[serde(default)]
    pub commitment: Option<CommitmentTerm>,
    /// Percentage of compute spend covered by a savings plan (0-100)
    #[serde(default)]
    pub compute_savings_plan_pct: Option<f64>,
    /// Maximum spot price willing to pay (informational)
    #[serde(default)]
    pub spot_max_price: Option<f64>,
}

impl PricingModel {
    pub fn on_demand() -> Self {
        Self {
            model_type: PricingModelType::OnDemand,
            commitment: None,
            compute_savings_plan_pct: None,
            spot_max_price: None,
        }
    }
}

/// Full customization input: environment, schedule and pricing model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCustomization {
    pub environment: EnvironmentConfig,
    pub running_schedule: RunningSchedule,
    pub pricing_model: PricingModel,
    /// Cost-allocation tags, passed through untouched
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountBreakdown {
    pub running_hours_discount: f64,
    pub pricing_model_discount: f64,
    pub total_discount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationDetails {
    pub hours_per_month: f64,
    pub utilization_percentage: f64,
    pub effective_hourly_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizedCostResult {
    /// Full on-demand cost (24/7)
    pub base_cost: f64,
    /// Cost with both discount stages applied
    pub customized_cost: f64,
    pub savings: f64,
    pub savings_percentage: f64,
    pub breakdown: DiscountBreakdown,
    pub details: UtilizationDetails,
}

/// How the workload is expected to run, for model recommendations
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExpectedRuntime {
    #[default]
    Continuous,
    Scheduled,
    Sporadic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentComparison {
    pub environment: String,
    pub result: CustomizedCostResult,
}

/// Applies running-schedule and pricing-model discounts to a baseline cost
#[derive(Debug, Clone, Copy, Default)]
pub struct CostCustomizationEngine;

impl CostCustomizationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Re-price a baseline monthly cost under the given customization
    pub fn calculate_customized_cost(
        &self,
        base_monthly_cost: f64,
        customization: &CostCustomization,
    ) -> CustomizedCostResult {
        // Stage 1: prorate the 24/7 baseline down to the scheduled runtime
        let hours_per_month = Self::running_hours_per_month(&customization.running_schedule);
        let utilization_percentage = (hours_per_month / HOURS_PER_MONTH) * 100.0;
        let stage1_cost = base_monthly_cost * hours_per_month / HOURS_PER_MONTH;
        let running_hours_discount = base_monthly_cost - stage1_cost;

        // Stage 2: commitment discount on the already-prorated cost
        let discount_percentage = Self::discount_percentage(
            &customization.pricing_model,
            customization.environment.env_type,
        );
        let pricing_model_discount = stage1_cost * discount_percentage / 100.0;

        let total_discount = running_hours_discount + pricing_model_discount;
        let customized_cost = (base_monthly_cost - total_discount).max(0.0);
        let savings = base_monthly_cost - customized_cost;
        let savings_percentage = if base_monthly_cost > 0.0 {
            (savings / base_monthly_cost) * 100.0
        } else {
            0.0
        };
        let effective_hourly_rate = if hours_per_month > 0.0 {
            customized_cost / hours_per_month
        } else {
            0.0
        };

        CostMetrics::record_customization(&customization.pricing_model.model_type.to_string());

        CustomizedCostResult {
            base_cost: base_monthly_cost,
            customized_cost,
            savings,
            savings_percentage,
            breakdown: DiscountBreakdown {
                running_hours_discount,
                pricing_model_discount,
                total_discount,
            },
            details: UtilizationDetails {
                hours_per_month,
                utilization_percentage,
                effective_hourly_rate,
            },
        }
    }

    /// Actual running hours per month, clamped to the 730-hour full month.
    ///
    /// A directly specified `hours_per_month` wins; otherwise the figure is
    /// derived from the daily/weekly schedule over an approximate 30-day
    /// month: `hours_per_day x (days_per_week / 7) x 30`.
    fn running_hours_per_month(schedule: &RunningSchedule) -> f64 {
        let hours = match schedule.hours_per_month {
            Some(hours) if hours > 0.0 => hours,
            _ => {
                let hours_per_day = schedule.hours_per_day.clamp(1.0, 24.0);
                let days_per_week = schedule.days_per_week.clamp(1.0, 7.0);
                // A 24x7 schedule is the full month by definition; the 30-day
                // approximation would otherwise undercount it as 720 hours.
                if hours_per_day >= 24.0 && days_per_week >= 7.0 {
                    HOURS_PER_MONTH
                } else {
                    hours_per_day * (days_per_week / 7.0) * 30.0
                }
            }
        };

        hours.min(HOURS_PER_MONTH)
    }

    /// Discount percentage for a pricing model, with the dev/test bonus
    fn discount_percentage(model: &PricingModel, environment: EnvironmentType) -> f64 {
        let base = match model.model_type {
            PricingModelType::OnDemand => 0.0,
            PricingModelType::Reserved1Yr => {
                match model.commitment.unwrap_or_default() {
                    CommitmentTerm::NoUpfront => 30.0,
                    CommitmentTerm::PartialUpfront => 35.0,
                    CommitmentTerm::AllUpfront => 40.0,
                }
            }
            PricingModelType::Reserved3Yr => {
                match model.commitment.unwrap_or_default() {
                    CommitmentTerm::NoUpfront => 50.0,
                    CommitmentTerm::PartialUpfront => 55.0,
                    CommitmentTerm::AllUpfront => 60.0,
                }
            }
            PricingModelType::SavingsPlan => {
                let coverage = model
                    .compute_savings_plan_pct
                    .unwrap_or(100.0)
                    .clamp(0.0, 100.0);
                45.0 * coverage / 100.0
            }
            // Conservative estimate; actual spot prices vary greatly
            PricingModelType::Spot => 70.0,
        };

        let with_env_bonus = if environment.is_dev_test() {
            base + 5.0
        } else {
            base
        };

        with_env_bonus.min(100.0)
    }

    /// Recommended pricing model for an environment and expected runtime
    pub fn recommended_pricing_model(
        environment: EnvironmentType,
        runtime: ExpectedRuntime,
    ) -> PricingModel {
        match environment {
            EnvironmentType::Production => {
                if runtime == ExpectedRuntime::Continuous {
                    PricingModel {
                        model_type: PricingModelType::Reserved3Yr,
                        commitment: Some(CommitmentTerm::PartialUpfront),
                        compute_savings_plan_pct: None,
                        spot_max_price: None,
                    }
                } else {
                    PricingModel {
                        model_type: PricingModelType::SavingsPlan,
                        commitment: None,
                        compute_savings_plan_pct: Some(80.0),
                        spot_max_price: None,
                    }
                }
            }
            EnvironmentType::Staging => PricingModel {
                model_type: PricingModelType::Reserved1Yr,
                commitment: Some(CommitmentTerm::NoUpfront),
                compute_savings_plan_pct: None,
                spot_max_price: None,
            },
            EnvironmentType::Development | EnvironmentType::Testing | EnvironmentType::Qa => {
                if runtime == ExpectedRuntime::Sporadic {
                    PricingModel {
                        model_type: PricingModelType::Spot,
                        commitment: None,
                        compute_savings_plan_pct: None,
                        spot_max_price: None,
                    }
                } else {
                    PricingModel::on_demand()
                }
            }
            EnvironmentType::Demo => PricingModel::on_demand(),
            // Lowest cost for standby resources
            EnvironmentType::DisasterRecovery => PricingModel {
                model_type: PricingModelType::Reserved1Yr,
                commitment: Some(CommitmentTerm::AllUpfront),
                compute_savings_plan_pct: None,
                spot_max_price: None,
            },
        }
    }

    /// Common running-schedule presets
    pub fn schedule_templates() -> Vec<(&'static str, RunningSchedule)> {
        vec![
            (
                "always-on",
                RunningSchedule {
                    hours_per_day: 24.0,
                    days_per_week: 7.0,
                    hours_per_month: Some(730.0),
                    timezone: None,
                    schedule: Some("24/7".to_string()),
                },
            ),
            (
                "business-hours",
                RunningSchedule {
                    hours_per_day: 8.0,
                    days_per_week: 5.0,
                    hours_per_month: Some(173.0),
                    timezone: None,
                    schedule: Some("9am-5pm Mon-Fri".to_string()),
                },
            ),
            (
                "extended-business",
                RunningSchedule {
                    hours_per_day: 12.0,
                    days_per_week: 5.0,
                    hours_per_month: Some(260.0),
                    timezone: None,
                    schedule: Some("8am-8pm Mon-Fri".to_string()),
                },
            ),
            (
                "weekdays-only",
                RunningSchedule {
                    hours_per_day: 24.0,
                    days_per_week: 5.0,
                    hours_per_month: Some(520.0),
                    timezone: None,
                    schedule: Some("24 hours Mon-Fri".to_string()),
                },
            ),
            (
                "nights-weekends",
                RunningSchedule {
                    hours_per_day: 16.0,
                    days_per_week: 2.0,
                    hours_per_month: Some(139.0),
                    timezone: None,
                    schedule: Some("Sat-Sun + nights".to_string()),
                },
            ),
            (
                "development",
                RunningSchedule {
                    hours_per_day: 10.0,
                    days_per_week: 5.0,
                    hours_per_month: Some(217.0),
                    timezone: None,
                    schedule: Some("8am-6pm Mon-Fri".to_string()),
                },
            ),
        ]
    }

    /// Evaluate the same baseline under several environment customizations
    pub fn compare_environments(
        &self,
        base_monthly_cost: f64,
        environments: &[CostCustomization],
    ) -> Vec<EnvironmentComparison> {
        environments
            .iter()
            .map(|customization| EnvironmentComparison {
                environment: customization.environment.name.clone(),
                result: self.calculate_customized_cost(base_monthly_cost, customization),
            })
            .collect()
    }

    /// Heuristic, non-authoritative optimization hints for a customization
    pub fn generate_recommendations(
        &self,
        base_monthly_cost: f64,
        customization: &CostCustomization,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();
        let current = self.calculate_customized_cost(base_monthly_cost, customization);
        let utilization = current.details.utilization_percentage;
        let model = customization.pricing_model.model_type;
        let env_type = customization.environment.env_type;

        if utilization < 50.0 {
            recommendations.push(format!(
                "Low utilization detected ({utilization:.1}%). Consider using spot instances or \
                 on-demand pricing instead of reserved instances."
            ));
        }

        if model == PricingModelType::OnDemand && utilization > 70.0 {
            recommendations.push(
                "High utilization detected. Consider switching to reserved instances or savings \
                 plans for up to 60% cost savings."
                    .to_string(),
            );
        }

        if env_type == EnvironmentType::Production && model == PricingModelType::Spot {
            recommendations.push(
                "Using spot instances for production. Consider reserved instances for better \
                 reliability and predictable costs."
                    .to_string(),
            );
        }

        if env_type.is_dev_test() && model == PricingModelType::Reserved3Yr {
            recommendations.push(
                "Dev/test environment using 3-year reserved instances may be over-committed. \
                 Consider on-demand or spot instances for flexibility."
                    .to_string(),
            );
        }

        if env_type.is_dev_test()
            && customization.running_schedule.hours_per_day >= 24.0
            && customization.running_schedule.days_per_week >= 7.0
        {
            recommendations.push(
                "Dev/test environment running 24/7. Consider scheduled shutdowns during \
                 non-business hours to save up to 75% on compute costs."
                    .to_string(),
            );
        }

        recommendations
    }
}

//! Cost Engine
//!
//! CLI for the hybrid multi-cloud cost computation engine. Prices an
//! infrastructure requirement across AWS, Azure, GCP and Oracle, and
//! re-prices baselines under running schedules and commitment models.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use eyre::{Result, WrapErr};
use tracing::info;
use validator::Validate;

use domain_costing::{
    CommitmentTerm, CostCalculator, CostCustomization, CostCustomizationEngine, EnvironmentConfig,
    EnvironmentType, InfrastructureRequirements, PricingModel, PricingModelType, RunningSchedule,
};
use domain_pricing::{PricingConfig, UnifiedPricingService};

#[derive(Parser)]
#[command(name = "cost-engine")]
#[command(about = "Compare monthly infrastructure costs across AWS, Azure, GCP and Oracle")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a requirements document across all four providers
    Calculate {
        /// Path to a requirements JSON file. Reads stdin when omitted.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Skip live pricing APIs and use the static rate card only
        #[arg(long)]
        static_only: bool,
    },

    /// Re-price a baseline monthly cost under a schedule and pricing model
    Customize {
        /// Baseline monthly cost (24/7 on-demand), USD
        #[arg(long)]
        base_cost: f64,

        /// Scheduled hours per day (1-24)
        #[arg(long, default_value_t = 24.0)]
        hours_per_day: f64,

        /// Scheduled days per week (1-7)
        #[arg(long, default_value_t = 7.0)]
        days_per_week: f64,

        /// Total hours per month, overriding the daily/weekly schedule
        #[arg(long)]
        hours_per_month: Option<f64>,

        /// Pricing model: on-demand, reserved-1yr, reserved-3yr, savings-plan, spot
        #[arg(long, default_value = "on-demand")]
        model: String,

        /// Commitment term: no-upfront, partial-upfront, all-upfront
        #[arg(long)]
        commitment: Option<String>,

        /// Environment type: production, staging, development, testing, qa, demo,
        /// disaster-recovery
        #[arg(long, default_value = "production")]
        environment: String,

        /// Savings-plan compute coverage percentage (0-100)
        #[arg(long)]
        coverage: Option<f64>,

        /// Include optimization recommendations in the output
        #[arg(long)]
        recommend: bool,
    },

    /// List the built-in running-schedule templates
    Templates,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);
    observability::init_metrics();

    let cli = Cli::parse();

    match cli.command {
        Commands::Calculate { file, static_only } => {
            let raw = read_input(file)?;
            let requirements: InfrastructureRequirements =
                serde_json::from_str(&raw).wrap_err("Failed to parse requirements JSON")?;
            requirements
                .validate()
                .wrap_err("Requirements failed validation")?;

            let config = if static_only {
                PricingConfig::static_only()
            } else {
                PricingConfig::from_env()?
            };
            if !config.live_pricing_enabled() {
                info!("Live pricing disabled; every figure comes from the static rate card");
            }

            let resolver = Arc::new(UnifiedPricingService::from_config(&config));
            let calculator = CostCalculator::new(resolver);

            let result = calculator.calculate_costs(&requirements).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Customize {
            base_cost,
            hours_per_day,
            days_per_week,
            hours_per_month,
            model,
            commitment,
            environment,
            coverage,
            recommend,
        } => {
            let model_type: PricingModelType = model
                .parse()
                .map_err(|_| eyre::eyre!("Unknown pricing model '{model}'"))?;
            let commitment: Option<CommitmentTerm> = commitment
                .map(|c| {
                    c.parse()
                        .map_err(|_| eyre::eyre!("Unknown commitment term '{c}'"))
                })
                .transpose()?;
            let env_type: EnvironmentType = environment
                .parse()
                .map_err(|_| eyre::eyre!("Unknown environment type '{environment}'"))?;

            let customization = CostCustomization {
                environment: EnvironmentConfig {
                    name: env_type.to_string(),
                    env_type,
                    description: None,
                },
                running_schedule: RunningSchedule {
                    hours_per_day,
                    days_per_week,
                    hours_per_month,
                    timezone: None,
                    schedule: None,
                },
                pricing_model: PricingModel {
                    model_type,
                    commitment,
                    compute_savings_plan_pct: coverage,
                    spot_max_price: None,
                },
                tags: Default::default(),
            };

            let engine = CostCustomizationEngine::new();
            let result = engine.calculate_customized_cost(base_cost, &customization);

            let output = if recommend {
                serde_json::json!({
                    "result": result,
                    "recommendations": engine.generate_recommendations(base_cost, &customization),
                })
            } else {
                serde_json::to_value(&result)?
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Templates => {
            let templates: Vec<serde_json::Value> = CostCustomizationEngine::schedule_templates()
                .into_iter()
                .map(|(name, schedule)| {
                    serde_json::json!({ "name": name, "schedule": schedule })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&templates)?);
        }
    }

    Ok(())
}

fn read_input(path: Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("Failed to read requirements from stdin")?;
            Ok(buffer)
        }
    }
}

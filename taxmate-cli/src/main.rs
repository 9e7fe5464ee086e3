mod deductions;
mod logging;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use taxmate_core::calculations::{TaxEstimator, estimate_withholding};
use taxmate_core::report::{format_currency, render_summary};
use taxmate_core::{DbConfig, EstimateStore, NewSavedEstimate, StoreRegistry, TaxInputs};
use taxmate_db_sqlite::SqliteStoreFactory;
use tracing::info;

/// Estimate your Australian income tax refund or amount owing.
///
/// The estimate covers the resident rate bands, the Low Income Tax Offset,
/// the Medicare levy and HECS-HELP compulsory repayments for one tax year.
/// It is a planning figure, not a lodgment.
#[derive(Parser, Debug)]
#[command(name = "taxmate")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Database file for saved estimates
    #[arg(long, global = true, default_value = "taxmate.db")]
    database: String,

    /// Storage backend for saved estimates
    #[arg(long, global = true, default_value = "sqlite")]
    backend: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an estimate and print the itemized result
    Estimate(EstimateArgs),

    /// List saved estimates, newest first
    List {
        /// Only show estimates for this tax year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Show a saved estimate
    Show { id: i64 },

    /// Rename a saved estimate
    Rename { id: i64, name: String },

    /// Delete a saved estimate
    Delete { id: i64 },
}

#[derive(Args, Debug)]
struct EstimateArgs {
    /// Gross income for one job; repeat the flag for multiple jobs
    #[arg(long = "income", value_name = "AMOUNT", required_unless_present = "inputs_file")]
    incomes: Vec<Decimal>,

    /// Read the complete input record from a JSON file instead of flags
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with_all = [
            "incomes", "business", "withheld", "deductions", "wfh_hours",
            "hecs", "medicare_exempt", "dependents",
        ]
    )]
    inputs_file: Option<PathBuf>,

    /// Self-employment / contractor income
    #[arg(long, value_name = "AMOUNT", default_value = "0")]
    business: Decimal,

    /// PAYG tax already withheld. Omit to pre-fill from a coarse
    /// withholding estimate (clearly advisory, not part of the result).
    #[arg(long, value_name = "AMOUNT")]
    withheld: Option<Decimal>,

    /// Deduction claim, e.g. --deduction work_related.vehicle=150
    #[arg(long = "deduction", value_name = "CATEGORY.SUBCATEGORY=AMOUNT")]
    deductions: Vec<String>,

    /// Hours worked from home (fixed-rate shortcut method)
    #[arg(long, value_name = "HOURS", default_value = "0")]
    wfh_hours: Decimal,

    /// Taxpayer has an outstanding HECS-HELP debt
    #[arg(long)]
    hecs: bool,

    /// Taxpayer holds a Medicare levy exemption
    #[arg(long)]
    medicare_exempt: bool,

    /// Number of dependants
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    dependents: u32,

    /// Tax year, as the calendar year the financial year ends in
    #[arg(long, default_value_t = 2023)]
    year: i32,

    /// Persist the inputs and result under this name
    #[arg(long, value_name = "NAME")]
    save: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_default_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Estimate(args) => run_estimate(&cli.backend, &cli.database, args).await,
        Command::List { year } => list_estimates(&cli.backend, &cli.database, year).await,
        Command::Show { id } => show_estimate(&cli.backend, &cli.database, id).await,
        Command::Rename { id, name } => rename_estimate(&cli.backend, &cli.database, id, &name).await,
        Command::Delete { id } => delete_estimate(&cli.backend, &cli.database, id).await,
    }
}

async fn open_store(
    backend: &str,
    database: &str,
) -> Result<Box<dyn EstimateStore>> {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));

    let config = DbConfig {
        backend: backend.to_string(),
        connection_string: database.to_string(),
    };
    registry
        .create(&config)
        .await
        .with_context(|| format!("failed to open {backend} store at '{database}'"))
}

async fn run_estimate(
    backend: &str,
    database: &str,
    args: EstimateArgs,
) -> Result<()> {
    let config = taxmate_data::config_for_year(args.year).with_context(|| {
        format!(
            "no rule set for tax year {}; available: {:?}",
            args.year,
            taxmate_data::builtin_years()
        )
    })?;
    config.validate()?;

    let inputs = match &args.inputs_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read inputs file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse inputs file {}", path.display()))?
        }
        None => {
            let deductions = deductions::parse_deductions(&args.deductions)?;

            let tax_withheld = match args.withheld {
                Some(withheld) => withheld,
                None => {
                    let gross: Decimal =
                        args.incomes.iter().copied().sum::<Decimal>() + args.business;
                    let estimate = estimate_withholding(&config, gross)?;
                    println!(
                        "No withheld amount given; pre-filled with the advisory estimate {} \
                         (replace with the figure from your payment summary if you have it).",
                        format_currency(estimate)
                    );
                    estimate
                }
            };

            TaxInputs {
                employment_incomes: args.incomes,
                business_income: args.business,
                tax_withheld,
                deductions,
                work_from_home_hours: args.wfh_hours,
                has_hecs_debt: args.hecs,
                is_medicare_exempt: args.medicare_exempt,
                dependent_count: args.dependents,
            }
        }
    };

    check_inputs(&inputs)?;

    let estimator = TaxEstimator::new(&config);
    let result = estimator.estimate(&inputs)?;

    println!("{}", render_summary(&result, &config.year_label));

    if let Some(name) = args.save {
        let store = open_store(backend, database).await?;
        let saved = store
            .save_estimate(NewSavedEstimate {
                name: name.clone(),
                tax_year: config.tax_year,
                inputs,
                result,
            })
            .await?;
        info!(id = saved.id, name = %name, "estimate saved");
        println!("Saved as '{}' (id {}).", saved.name, saved.id);
    }

    Ok(())
}

async fn list_estimates(
    backend: &str,
    database: &str,
    year: Option<i32>,
) -> Result<()> {
    let store = open_store(backend, database).await?;
    let estimates = store.list_estimates(year).await?;

    if estimates.is_empty() {
        println!("No saved estimates.");
        return Ok(());
    }

    println!("{:>5}  {:<24}{:<10}{:<16}{}", "id", "name", "year", "outcome", "updated");
    for estimate in estimates {
        let outcome = if estimate.result.refund_or_owing >= Decimal::ZERO {
            format!("{} refund", format_currency(estimate.result.refund_or_owing))
        } else {
            format!("{} owing", format_currency(-estimate.result.refund_or_owing))
        };
        println!(
            "{:>5}  {:<24}{:<10}{:<16}{}",
            estimate.id,
            estimate.name,
            year_label(estimate.tax_year),
            outcome,
            estimate.updated_at.format("%Y-%m-%d %H:%M"),
        );
    }

    Ok(())
}

async fn show_estimate(
    backend: &str,
    database: &str,
    id: i64,
) -> Result<()> {
    let store = open_store(backend, database).await?;
    let estimate = store
        .get_estimate(id)
        .await
        .with_context(|| format!("no saved estimate with id {id}"))?;

    println!("{} (saved {})", estimate.name, estimate.created_at.format("%Y-%m-%d"));
    println!("{}", render_summary(&estimate.result, &year_label(estimate.tax_year)));

    Ok(())
}

async fn rename_estimate(
    backend: &str,
    database: &str,
    id: i64,
    name: &str,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("name must not be empty");
    }

    let store = open_store(backend, database).await?;
    store
        .rename_estimate(id, name)
        .await
        .with_context(|| format!("no saved estimate with id {id}"))?;
    println!("Renamed estimate {id} to '{name}'.");

    Ok(())
}

async fn delete_estimate(
    backend: &str,
    database: &str,
    id: i64,
) -> Result<()> {
    let store = open_store(backend, database).await?;
    store
        .delete_estimate(id)
        .await
        .with_context(|| format!("no saved estimate with id {id}"))?;
    println!("Deleted estimate {id}.");

    Ok(())
}

/// Negative amounts are rejected here, not in the engine. Deduction
/// claims are checked leaf by leaf, since a summed total could hide a
/// negative claim behind a larger positive one.
fn check_inputs(inputs: &TaxInputs) -> Result<()> {
    ensure!(
        inputs.employment_incomes.iter().all(|i| *i >= Decimal::ZERO),
        "employment incomes must not be negative"
    );
    ensure!(
        inputs.business_income >= Decimal::ZERO,
        "business income must not be negative"
    );
    ensure!(
        inputs.tax_withheld >= Decimal::ZERO,
        "tax withheld must not be negative"
    );
    ensure!(
        inputs.work_from_home_hours >= Decimal::ZERO,
        "work-from-home hours must not be negative"
    );
    ensure!(
        inputs
            .deductions
            .claimed_amounts()
            .iter()
            .all(|a| *a >= Decimal::ZERO),
        "deduction amounts must not be negative"
    );
    Ok(())
}

/// "2023" renders as "2022-23".
fn year_label(tax_year: i32) -> String {
    format!("{}-{:02}", tax_year - 1, tax_year % 100)
}

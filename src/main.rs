use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{
    DEFAULT_WORKING_DAYS, PayrollOptions, PayrollSources, compute_payroll,
};
use payroll_engine::config::ConfigLoader;
use payroll_engine::export::{export_report, round_money};

/// Compute attendance-based salaries and export them for accounting import
#[derive(Parser)]
#[command(name = "payroll-engine")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve {
        /// Service configuration file
        #[arg(short, long, default_value = "config/payroll.yaml")]
        config: PathBuf,
    },
    /// Compute one payroll from local workbooks
    Run {
        /// Base salary roster workbook
        #[arg(long)]
        base_salary: PathBuf,

        /// Attendance log workbook
        #[arg(long)]
        attendance: PathBuf,

        /// Deduction ledger workbook
        #[arg(long)]
        deductions: PathBuf,

        /// Working days in the period
        #[arg(long, default_value_t = DEFAULT_WORKING_DAYS, allow_negative_numbers = true)]
        working_days: i64,

        /// First day of the attendance window (YYYY-MM-DD)
        #[arg(long, requires = "end_date")]
        start_date: Option<String>,

        /// Last day of the attendance window (YYYY-MM-DD)
        #[arg(long, requires = "start_date")]
        end_date: Option<String>,

        /// Where to write the report
        #[arg(short, long, default_value = "salary_tally_import.xlsx")]
        output: PathBuf,
    },
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("payroll_engine=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("payroll_engine=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Serve { config } => serve(config).await,
        Commands::Run {
            base_salary,
            attendance,
            deductions,
            working_days,
            start_date,
            end_date,
            output,
        } => {
            let sources = PayrollSources {
                roster: base_salary,
                attendance,
                deductions,
            };
            let options = PayrollOptions {
                working_days,
                window: start_date.zip(end_date),
            };
            run(&sources, &options, &output)
        }
    }
}

async fn serve(config_path: PathBuf) -> anyhow::Result<()> {
    let config = ConfigLoader::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?
        .into_config();

    std::fs::create_dir_all(&config.upload_dir)
        .with_context(|| format!("creating {}", config.upload_dir.display()))?;
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let bind_address = config.bind_address.clone();
    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {}", bind_address))?;

    info!(address = %bind_address, "Payroll service listening");
    axum::serve(listener, router).await?;
    Ok(())
}

fn run(sources: &PayrollSources, options: &PayrollOptions, output: &Path) -> anyhow::Result<()> {
    let results = compute_payroll(sources, options)?;
    export_report(&results, output)?;

    println!(
        "{:<12} {:<24} {:>5} {:>12} {:>12} {:>12}",
        "Employee", "Name", "Days", "Gross", "Deductions", "Net"
    );
    for result in &results {
        println!(
            "{:<12} {:<24} {:>5} {:>12} {:>12} {:>12}",
            result.employee_id.as_str(),
            result.employee_name,
            result.days_present,
            round_money(result.gross_salary).to_string(),
            round_money(result.total_deductions).to_string(),
            round_money(result.net_salary).to_string(),
        );
    }
    println!(
        "Computed {} salaries; report saved to {}",
        results.len(),
        output.display()
    );
    Ok(())
}

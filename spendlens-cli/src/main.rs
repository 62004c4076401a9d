use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use spendlens_analysis::{analyze, AnalysisConfig, AnalysisReport, FixedMerchantRegistry};
use spendlens_core::DateOrder;
use spendlens_ingest::load_statement_csv;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod auth;
mod config;
mod llm;
mod narrate;
mod report;
mod state;

use llm::{LlmClient, Provider};
use narrate::Narrator;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SPENDLENS_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "spendlens",
    version,
    long_version = LONG_VERSION,
    about = "Bank statement savings feasibility analysis"
)]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a statement CSV against a monthly savings target
    Analyze {
        /// Statement CSV with date, debit_amount, credit_amount, balance, description
        #[arg(long)]
        csv: PathBuf,

        /// Monthly savings target (default: config analysis.target_savings)
        #[arg(long)]
        target: Option<f64>,

        /// Monthly income; estimated from credits when omitted
        #[arg(long)]
        income: Option<f64>,

        /// Distinct months of debits for a merchant to count as recurring
        #[arg(long)]
        min_months: Option<usize>,

        /// Fixed-obligation merchant label; repeat to replace the configured list
        #[arg(long = "fixed-merchant")]
        fixed_merchants: Vec<String>,

        /// Numeric date layout, mdy or dmy (default: config analysis.date_order)
        #[arg(long)]
        date_order: Option<DateOrder>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Ask the configured LLM for a plain-language explanation
        #[arg(long)]
        explain: bool,
    },

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Store LLM credentials in ~/.spendlens/auth.json
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Paste an API key for openai or anthropic
    PasteKey {
        #[arg(long, default_value = "openai")]
        provider: Provider,
    },
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<&'a str>,
}

fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Analyze {
            csv,
            target,
            income,
            min_months,
            fixed_merchants,
            date_order,
            json,
            explain,
        } => {
            let cfg = config::load_config()?;

            let mut analysis = cfg.analysis_config();
            if let Some(t) = target {
                analysis.target_savings = t;
            }
            if let Some(k) = min_months {
                analysis.min_months = k;
            }
            if !fixed_merchants.is_empty() {
                analysis.fixed_merchants = FixedMerchantRegistry::from_labels(fixed_merchants);
            }
            analysis.monthly_income = income;
            let date_order = date_order.unwrap_or(cfg.analysis.date_order);

            run_analyze(&cfg, &analysis, csv, date_order, json, explain).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },

        Command::Auth { command } => match command {
            AuthCommand::PasteKey { provider } => auth::paste_api_key(provider)?,
        },
    }

    Ok(())
}

async fn run_analyze(
    cfg: &config::Config,
    analysis: &AnalysisConfig,
    csv_path: PathBuf,
    date_order: DateOrder,
    json: bool,
    explain: bool,
) -> Result<()> {
    if !csv_path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv_path.display());
    }

    let txns = load_statement_csv(&csv_path, date_order)
        .with_context(|| format!("parsing {}", csv_path.display()))?;
    info!(rows = txns.len(), path = %csv_path.display(), "parsed statement");

    let report = analyze(&txns, analysis).context("analysis failed")?;

    if !report.balance.is_clean() {
        warn!(
            inconsistent = report.balance.inconsistent,
            checked = report.balance.checked,
            "statement balances do not fully reconcile"
        );
    }
    if report.recurring_merchants.is_empty() {
        warn!(
            min_months = analysis.min_months,
            "no recurring merchants found; fixed and habitual spend are 0"
        );
    }

    // Narration only ever sees a completed result.
    let explanation = if explain {
        let auth = auth::load_auth()?;
        let client = LlmClient::from_config(&cfg.llm, &auth)?;
        info!(provider = %client.provider(), model = client.model(), "requesting explanation");
        let narrator = Narrator::new(&client, cfg.report.currency_symbol.as_str());
        Some(
            narrator
                .explain(&report.feasibility)
                .await
                .context("generating explanation")?,
        )
    } else {
        None
    };

    if json {
        let out = JsonOutput {
            report: &report,
            explanation: explanation.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Parsed {} transactions from {}\n", txns.len(), csv_path.display());
    print!("{}", report::render_text(&report, &cfg.report.currency_symbol));

    if let Some(text) = explanation {
        println!("\n## Insights\n");
        println!("{}", text.trim());
    }

    Ok(())
}

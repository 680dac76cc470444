//! Dashboard CLI - Compute dashboard metrics from a JSON document.
//!
//! Prints an `ApiResponse` as pretty JSON so the dashboards can consume it.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dashboard_core::{
    document::{
        AcademicDocument, FactoryDocument, InventoryDocument, OrganizationDocument,
        PortfolioDocument, WarehouseDocument,
    },
    evaluate_academic, evaluate_factory, evaluate_inventory, evaluate_organization,
    evaluate_portfolio, evaluate_warehouse, load_document,
    portfolio::high_conviction_holdings,
    ApiResponse, MetricsConfig, PortfolioSummary,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Dashboard metrics CLI - portfolio, factory, warehouse and more")]
#[command(version)]
struct Cli {
    /// Metrics config file (defaults to DASHBOARD_CONFIG_FILE or the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Holding P/L, returns and Sharpe ratio
    Portfolio {
        /// Portfolio document
        #[arg(short, long)]
        file: PathBuf,
        /// Only report holdings above the high-conviction weight
        #[arg(long)]
        high_conviction: bool,
    },
    /// Material shortfall, production cost and bottleneck capacity
    Factory {
        /// Factory document
        #[arg(short, long)]
        file: PathBuf,
        /// Reference date for due dates (YYYY-MM-DD)
        #[arg(short, long)]
        today: Option<NaiveDate>,
    },
    /// Order totals, tax and profit margin
    Warehouse {
        /// Warehouse document
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Discounted variant prices and stock badges
    Inventory {
        /// Inventory document
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Department head counts and budget utilization
    Organization {
        /// Organization document
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Course enrollment fill and status
    Academic {
        /// Academic records document
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let (response, code) = match run(cli) {
        Ok(data) => (ApiResponse::ok(data), ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!("{:#}", e);
            (ApiResponse::err(format!("{:#}", e)), ExitCode::FAILURE)
        }
    };

    match serde_json::to_string_pretty(&response) {
        Ok(output) => {
            println!("{}", output);
            code
        }
        Err(e) => {
            eprintln!("Failed to serialize response: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Value> {
    let config = match &cli.config {
        Some(path) => MetricsConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MetricsConfig::load().context("Failed to load config")?,
    };

    match cli.command {
        Commands::Portfolio {
            file,
            high_conviction,
        } => handle_portfolio(&file, high_conviction, &config),
        Commands::Factory { file, today } => handle_factory(&file, today, &config),
        Commands::Warehouse { file } => {
            let doc: WarehouseDocument = load(&file)?;
            let orders = evaluate_warehouse(&doc.warehouse, &config.warehouse);
            Ok(json!({ "orders": orders }))
        }
        Commands::Inventory { file } => {
            let doc: InventoryDocument = load(&file)?;
            let products = evaluate_inventory(&doc.inventory, &config.inventory);
            Ok(json!({ "products": products }))
        }
        Commands::Organization { file } => {
            let doc: OrganizationDocument = load(&file)?;
            let departments = evaluate_organization(&doc.organization, &config.organization);
            Ok(json!({ "departments": departments }))
        }
        Commands::Academic { file } => {
            let doc: AcademicDocument = load(&file)?;
            let courses = evaluate_academic(&doc.academic_records, &config.academic);
            Ok(json!({ "courses": courses }))
        }
    }
}

fn load<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    load_document(path).with_context(|| format!("Failed to load document {}", path.display()))
}

fn handle_portfolio(
    file: &Path,
    high_conviction: bool,
    config: &MetricsConfig,
) -> anyhow::Result<Value> {
    let doc: PortfolioDocument = load(file)?;
    let metrics = evaluate_portfolio(&doc.portfolio);
    let summary = PortfolioSummary::from_metrics(&metrics, &config.portfolio);

    let holdings = if high_conviction {
        high_conviction_holdings(&metrics, &config.portfolio)
    } else {
        metrics
    };

    Ok(json!({
        "investor_id": doc.portfolio.investor_id,
        "holdings": holdings,
        "summary": summary,
    }))
}

fn handle_factory(
    file: &Path,
    today: Option<NaiveDate>,
    config: &MetricsConfig,
) -> anyhow::Result<Value> {
    let doc: FactoryDocument = load(file)?;
    let today = today
        .or_else(|| doc.current_date())
        .unwrap_or_else(|| Local::now().date_naive());

    let products = evaluate_factory(&doc.factory, today, &config.factory)?;
    let shortfall: Vec<&str> = products
        .values()
        .filter(|p| p.has_shortfall())
        .map(|p| p.product_id.as_str())
        .collect();

    Ok(json!({
        "today": today,
        "products": products,
        "products_with_shortfall": shortfall,
    }))
}

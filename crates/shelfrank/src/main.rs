use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use shelfrank::state::DashboardState;
use shelfrank_core::ranking;
use shelfrank_core::types::{CleanConfig, RankMetric, DEFAULT_TOP_N};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Snack sales ranking dashboard CLI and API server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the ranking API server
    Serve(ServeArgs),
    /// Print the top products for one subcategory
    Rank(RankArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Path to the sales export; falls back to SHELFRANK_SOURCE
    #[arg(long)]
    source: Option<PathBuf>,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0:3000")]
    addr: SocketAddr,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Path to the sales export; falls back to SHELFRANK_SOURCE
    #[arg(long)]
    source: Option<PathBuf>,

    /// Subcategory to rank (exact match)
    #[arg(long)]
    subcategory: String,

    /// Ranking metric: velocity or sales_strength
    #[arg(long, default_value = "velocity")]
    metric: String,

    /// How many products to show
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    n: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before building the filter so RUST_LOG set there is seen.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Rank(args) => rank(args),
    }
}

fn resolve_source(arg: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path);
    }
    std::env::var("SHELFRANK_SOURCE")
        .map(PathBuf::from)
        .context("--source (or SHELFRANK_SOURCE) must be set")
}

async fn serve(args: ServeArgs) -> Result<()> {
    let source = resolve_source(args.source)?;
    let state = Arc::new(DashboardState::load(&source, CleanConfig::default())?);
    info!(
        rows = state.working_set.height(),
        subcategories = state.subcategories.len(),
        "working set ready"
    );

    let router = shelfrank::router(state);
    let listener = TcpListener::bind(args.addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}

fn rank(args: RankArgs) -> Result<()> {
    let metric: RankMetric = args.metric.parse().map_err(anyhow::Error::msg)?;
    let source = resolve_source(args.source)?;
    let state = DashboardState::load(&source, CleanConfig::default())?;

    let top = ranking::top_n(&state.working_set, &args.subcategory, metric, args.n)?;
    let products = ranking::ranked_products(&top, metric)?;

    if products.is_empty() {
        println!("no products matched subcategory '{}'", args.subcategory);
        return Ok(());
    }

    println!(
        "Top {} products in {} by {}",
        products.len(),
        args.subcategory,
        metric.label()
    );

    let mut table = Table::new();
    table.set_header(["Brand", "Description", metric.label(), "Distribution %"]);
    for product in &products {
        table.add_row([
            product.brand.clone().unwrap_or_default(),
            product.description.clone().unwrap_or_default(),
            product
                .metric_value
                .map(|value| format!("{value:.2}"))
                .unwrap_or_default(),
            product
                .distribution_pct
                .map(|value| value.to_string())
                .unwrap_or_default(),
        ]);
    }
    println!("{table}");

    let best = &products[0];
    println!(
        "Best performer: {} - {}",
        best.brand.as_deref().unwrap_or("(no brand)"),
        best.description.as_deref().unwrap_or("(no description)")
    );
    println!(
        "{}: {}",
        metric.label(),
        best.metric_value
            .map(|value| format!("{value:.2}"))
            .unwrap_or_else(|| "n/a".to_string())
    );
    println!(
        "Distribution: {}%",
        best.distribution_pct
            .map(|value| value.to_string())
            .unwrap_or_else(|| "n/a".to_string())
    );

    Ok(())
}

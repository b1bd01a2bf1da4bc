use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use configuration::Config;
use portfolio::{AnalyticsSource, PortfolioModel};
use risk::{ConfidenceScenario, ScenarioGrid, VarReport, VarReportRow};
use rust_decimal::Decimal;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the varcube application.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = configuration::load_config(&cli.config)
        .with_context(|| format!("loading configuration from '{}'", cli.config.display()))?;

    match cli.command {
        Commands::Report(args) => handle_report(args, &config),
        Commands::Validate => handle_validate(&config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Historical-simulation Value at Risk over a trading-book hierarchy.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the scenario grid and print a VaR table per scenario cell.
    Report(ReportArgs),

    /// Load all stores and check referential integrity, without computing VaR.
    Validate,
}

#[derive(Parser)]
struct ReportArgs {
    /// Only print hierarchy nodes down to this depth (1 = business units,
    /// 4 = books; the portfolio total is always printed).
    #[arg(long)]
    depth: Option<usize>,

    /// Only print this analytics scenario (matched by name).
    #[arg(long)]
    scenario: Option<String>,

    /// Also write the full report to this file as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads the four stores, builds the joined model and the analytics sources.
fn load_model(config: &Config) -> Result<(PortfolioModel, Vec<AnalyticsSource>)> {
    let instruments = stores::read_instruments(&config.data.instruments)
        .with_context(|| format!("reading '{}'", config.data.instruments.display()))?;
    let positions = stores::read_positions(&config.data.positions)
        .with_context(|| format!("reading '{}'", config.data.positions.display()))?;
    let desks = stores::read_trading_desks(&config.data.trading_desks)
        .with_context(|| format!("reading '{}'", config.data.trading_desks.display()))?;

    let model = PortfolioModel::build(instruments, positions, desks)
        .context("joining positions with instruments and trading desks")?;

    let mut sources = Vec::with_capacity(config.data.analytics.len());
    for setting in &config.data.analytics {
        let rows = stores::read_analytics(&setting.path)
            .with_context(|| format!("reading '{}'", setting.path.display()))?;
        sources.push(AnalyticsSource::new(setting.name.clone(), rows));
    }

    Ok((model, sources))
}

fn handle_validate(config: &Config) -> Result<()> {
    let (model, sources) = load_model(config)?;
    for source in &sources {
        model
            .check_source(source)
            .with_context(|| format!("validating analytics source '{}'", source.name()))?;
        println!(
            "analytics source '{}': {} instruments, OK",
            source.name(),
            source.len()
        );
    }
    println!(
        "model OK: {} hierarchy nodes, {} analytics source(s)",
        model.tree().paths().len(),
        sources.len()
    );
    Ok(())
}

fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let (model, sources) = load_model(config)?;

    let sources: Vec<AnalyticsSource> = match &args.scenario {
        Some(name) => {
            let selected: Vec<AnalyticsSource> = sources
                .into_iter()
                .filter(|s| s.name() == name.as_str())
                .collect();
            if selected.is_empty() {
                anyhow::bail!("no analytics scenario named '{name}' is configured");
            }
            selected
        }
        None => sources,
    };

    let grid = ScenarioGrid::new(
        config
            .risk
            .confidence_levels
            .iter()
            .map(|c| ConfidenceScenario::new(c.name.clone(), c.level))
            .collect(),
    )?;
    let report = grid.evaluate(&model, &sources)?;

    if let Some(path) = &args.json {
        let file = File::create(path)
            .with_context(|| format!("creating report file '{}'", path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
        println!("report written to '{}'", path.display());
    }

    for (source, confidence) in report.scenario_cells() {
        print_scenario_table(&report, &source, &confidence, args.depth);
    }
    Ok(())
}

// ==============================================================================
// Table Output
// ==============================================================================

fn print_scenario_table(
    report: &VarReport,
    source: &str,
    confidence: &str,
    max_depth: Option<usize>,
) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Node",
            "Level",
            "Quantity",
            "Previous-day PnL",
            "VaR",
            "Marginal VaR",
        ]);

    for row in report.rows_for(source, confidence) {
        if let Some(max_depth) = max_depth {
            if row.path.depth() > max_depth {
                continue;
            }
        }
        table.add_row(report_cells(row));
    }

    println!("\nScenario: {source} @ {confidence}");
    println!("{table}");
}

fn report_cells(row: &VarReportRow) -> Vec<Cell> {
    let indent = "  ".repeat(row.path.depth());
    let level = row
        .level
        .map(|l| l.to_string())
        .unwrap_or_else(|| "Portfolio".to_string());
    vec![
        Cell::new(format!("{indent}{}", row.path.name())),
        Cell::new(level),
        money_cell(row.quantity),
        money_cell(row.previous_day_pnl),
        money_cell(row.var),
        row.marginal_var.map_or_else(|| Cell::new("-"), money_cell),
    ]
}

fn money_cell(value: Decimal) -> Cell {
    Cell::new(value.round_dp(2)).set_alignment(CellAlignment::Right)
}

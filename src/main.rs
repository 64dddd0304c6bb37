use clap::{Parser, Subcommand};
use configuration::{init_tracing, load_config, load_config_from, DiagonalDisplayMode, Timeframe};
use engine::Dashboard;
use navigator::{CustomSelection, Level, NavigationEvent};
use std::path::PathBuf;

mod render;

/// The main entry point for the correlation dashboard.
fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(timeframe) = cli.timeframe {
        config.correlation.timeframe = timeframe;
    }
    if let Some(mode) = cli.diagonal {
        config.correlation.diagonal_mode = mode;
    }
    if cli.seed.is_some() {
        config.correlation.seed = cli.seed;
    }

    // Keep the guard alive so the file appender flushes on exit.
    let _log_guard = init_tracing(&config.logging)?;

    let mut dashboard = Dashboard::from_config(&config, cli.universe.as_deref())?;
    navigate(&mut dashboard, cli.command)?;

    let view = dashboard.current_view()?;
    if cli.json {
        print_json(&dashboard, view.as_deref())?;
    } else {
        print_tables(&dashboard, view.as_deref());
    }
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Multi-level correlation heatmaps for a stock universe.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file. Defaults to ./config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON stock universe. Overrides `universe.path` from the config.
    #[arg(long, global = true)]
    universe: Option<PathBuf>,

    #[arg(long, global = true, value_enum)]
    timeframe: Option<Timeframe>,

    /// How self-correlation cells are shown.
    #[arg(long, global = true, value_enum)]
    diagonal: Option<DiagonalDisplayMode>,

    /// Fixed RNG seed for a reproducible matrix.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print the computed view as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Correlate all sectors.
    Sectors,
    /// Correlate the industries of one sector.
    Industries {
        #[arg(long)]
        sector: String,
    },
    /// Correlate the best and worst performers of one industry.
    Stocks {
        #[arg(long)]
        sector: String,
        #[arg(long)]
        industry: String,
    },
    /// Correlate a hand-picked set of stocks by id.
    Custom {
        #[arg(long = "stock", required = true)]
        stocks: Vec<String>,
    },
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn navigate(dashboard: &mut Dashboard, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Sectors => {}
        Commands::Industries { sector } => {
            dashboard.apply(NavigationEvent::SelectSector { sector })?;
        }
        Commands::Stocks { sector, industry } => {
            dashboard.apply(NavigationEvent::SelectSector { sector })?;
            dashboard.apply(NavigationEvent::SelectIndustry { industry })?;
        }
        Commands::Custom { stocks } => {
            for stock_id in stocks {
                match dashboard.select_custom_stock(&stock_id)? {
                    CustomSelection::Added => {}
                    CustomSelection::AlreadySelected => {
                        tracing::warn!(stock_id = %stock_id, "Stock listed twice, ignoring.");
                    }
                    CustomSelection::AtCapacity => {
                        tracing::warn!(stock_id = %stock_id, "Custom selection is full, ignoring.");
                    }
                }
            }
        }
    }
    Ok(())
}

fn print_json(dashboard: &Dashboard, view: Option<&engine::CorrelationView>) -> anyhow::Result<()> {
    let navigator = dashboard.navigator();
    let universe = dashboard.universe();
    let output = serde_json::json!({
        "state": navigator.state().snapshot(),
        "breadcrumbs": dashboard.breadcrumbs(),
        "view": view,
        "topAndWorst": navigator.top_and_worst(universe),
        "industrySummary": navigator.industry_summary(universe),
        "legend": presentation::correlation_legend(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tables(dashboard: &Dashboard, view: Option<&engine::CorrelationView>) {
    let navigator = dashboard.navigator();
    let universe = dashboard.universe();

    println!("{}", render::breadcrumb_line(&dashboard.breadcrumbs()));

    let Some(view) = view else {
        println!("Not enough entities to correlate at this level (need at least 2).");
        return;
    };

    let constituent = matches!(view.level, Level::Stocks | Level::Custom);
    println!("{}", render::matrix_table(view, constituent));
    for line in render::summary_lines(view) {
        println!("{line}");
    }
    println!("Legend: {}", render::legend_line());

    if let Some(summary) = navigator.industry_summary(universe) {
        println!("{}", render::industry_summary_table(&summary));
    }
    if let Some(performers) = navigator.top_and_worst(universe) {
        println!("{}", render::performers_table(&performers));
    }
}

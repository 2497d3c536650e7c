use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use ecovision_schemas::{
    city::City,
    selection::{Category, Window},
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod plotting;
mod report;
mod workflow;

/// EcoVision: environmental monitoring dashboard and conservation assistant.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate and display simulated readings for a city
    Dashboard(DashboardArgs),
    /// Ask the conservation assistant
    Chat {
        /// Send a single question instead of starting a session
        #[arg(long)]
        ask: Option<String>,
    },
    /// Print the city and regional conservation comparisons
    Overview {
        /// Directory for the comparison charts
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
    },
}

#[derive(Args, Debug)]
struct DashboardArgs {
    /// City to simulate (Bangalore, Delhi, Mumbai or any other name)
    #[arg(long)]
    city: Option<City>,

    /// Metric family to show: air, water, soil, noise or all
    #[arg(long)]
    category: Option<Category>,

    /// Time window in hours: 24, 48 or 72
    #[arg(long)]
    hours: Option<Window>,

    /// Write the generated data as CSV
    #[arg(long)]
    export: bool,

    /// Directory for exports and charts
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Comma separated fields to chart (empty for none)
    #[arg(long, value_delimiter = ',')]
    fields: Option<Vec<String>>,

    /// Print the raw hourly table under each panel
    #[arg(long)]
    table: bool,

    /// Print the snapshot as JSON instead of text panels
    #[arg(long)]
    json: bool,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,
}

/// Dependencies log warnings only; the workspace crates log at info.
const DEFAULT_LOG_FILTER: &str = "warn,ecovision_core=info,ecovision_app=info";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // A missing .env file is fine; the process environment still applies.
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let app_config = config::AppConfig::load(cli.config.as_deref())?;
    debug!(?app_config, "effective configuration");

    match cli.command {
        Command::Dashboard(args) => {
            let fields = args.fields.map(|names| {
                names
                    .into_iter()
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect::<Vec<_>>()
            });
            let request = workflow::DashboardRequest {
                city: args.city.unwrap_or_else(|| app_config.defaults.city.clone()),
                category: args.category.unwrap_or(app_config.defaults.category),
                window: args.hours.unwrap_or(app_config.defaults.hours),
                export: args.export,
                output_dir: workflow::default_output_dir(&app_config, args.output_dir.as_deref()),
                fields,
                charts: app_config.charts && !args.no_charts && !args.json,
                table: args.table,
                json: args.json,
            };
            workflow::run_dashboard(&request)
        }
        Command::Chat { ask } => workflow::run_chat(&app_config, ask.as_deref()),
        Command::Overview { output_dir, no_charts } => {
            let chart_dir = workflow::default_output_dir(&app_config, output_dir.as_deref());
            let charts = app_config.charts && !no_charts;
            workflow::run_overview(charts.then_some(chart_dir.as_path()))
        }
    }
}

mod pois;
mod weather;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cityguide_core::CategoryFilter;

#[derive(Debug, Parser)]
#[command(name = "cityguide")]
#[command(about = "Swiss city guide data fetcher", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch points of interest for a city
    Pois {
        /// City display name (see `cities`); unknown names are queried as-is
        #[arg(long)]
        city: String,
        /// Source-side category filter, repeatable: food, restaurant, cafe,
        /// toilet, parking, activity, leisure, event, all
        #[arg(long = "filter")]
        filters: Vec<String>,
        /// Record-side refinement applied after fetching, e.g. cafe,
        /// activity-indoor, activity-outdoor
        #[arg(long)]
        category: Option<CategoryFilter>,
        /// Print one JSON record per line instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show current weather or the 7-day forecast for a city
    Weather {
        /// City display name; must be a supported city
        #[arg(long)]
        city: String,
        /// Print the 7-day forecast instead of current conditions
        #[arg(long)]
        forecast: bool,
    },
    /// List the supported cities
    Cities,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = cityguide_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Pois {
            city,
            filters,
            category,
            json,
        } => pois::run(&config, &city, &filters, category, json).await,
        Commands::Weather { city, forecast } => weather::run(&config, &city, forecast).await,
        Commands::Cities => {
            print_cities();
            Ok(())
        }
    }
}

fn print_cities() {
    for city in cityguide_core::cities::CITIES {
        println!(
            "{:<10} {:>8.4} {:>8.4}  queried as {:?}",
            city.name, city.lat, city.lon, city.osm_name
        );
    }
}

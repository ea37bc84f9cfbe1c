use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use citynav_cli::commands::cities::handle_cities_command;
use citynav_cli::commands::distance::{handle_distance_command, DistanceCommandArgs, UnitArg};
use citynav_cli::commands::route::{handle_route_command, RouteCommandArgs};
use citynav_cli::logging::{init_tracing, LogFormat};
use citynav_cli::output::OutputFormat;
use citynav_lib::RouteAlgorithm;

#[derive(Parser, Debug)]
#[command(author, version, about = "Heuristic route planning between cities")]
struct Cli {
    /// Dataset file (.json, .db, .sqlite, .sqlite3) or directory containing cities.json.
    /// Falls back to CITYNAV_DATASET, then the platform data directory.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Output format for command results.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route through one or more destinations.
    Route {
        /// Starting city name.
        #[arg(long = "from")]
        from: String,
        /// Final destination city name.
        #[arg(long = "to")]
        to: String,
        /// Intermediate stop, visited in the order given. May be repeated.
        #[arg(long = "via")]
        via: Vec<String>,
        /// Search engine used for every leg (a-star, ida-star, nba-star).
        #[arg(long, default_value_t = RouteAlgorithm::AStar)]
        algorithm: RouteAlgorithm,
    },
    /// List every city in the dataset alphabetically.
    Cities,
    /// Show the direct road and great-circle distance between two cities.
    Distance {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        #[arg(long, value_enum, default_value_t = UnitArg::Km)]
        unit: UnitArg,
    },
}

fn main() -> Result<()> {
    init_tracing(LogFormat::from_env());
    let cli = Cli::parse();
    let target = cli.data.as_deref();

    match cli.command {
        Command::Route {
            from,
            to,
            via,
            algorithm,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                via,
                algorithm,
            };
            handle_route_command(target, cli.format, &args)
        }
        Command::Cities => handle_cities_command(target, cli.format),
        Command::Distance { from, to, unit } => {
            let args = DistanceCommandArgs { from, to, unit };
            handle_distance_command(target, cli.format, &args)
        }
    }
}

//! planner — command-line front end for the trafcast route engine.
//!
//! ```text
//! planner route --from "NUST University" --to "Bulawayo City Hall" --depart 20
//! planner route --from -20.165,28.612 --to -20.156,28.585 --json
//! planner train "via Cecil Ave" 7 11
//! ```
//!
//! `RUST_LOG=debug` shows discovery and ranking decisions.

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use tc_core::DepartureTime;
use tc_corridor::JsonFileWeightStore;
use tc_engine::{EngineConfig, HttpRouteEngine};
use tc_rank::MAX_OFFSET_MINUTES;

#[derive(Parser)]
#[command(name = "planner", about = "Traffic-aware route planning", version)]
struct Cli {
    /// TOML configuration; built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank routes between two places.
    Route {
        /// "lat,lon" or a place name to geocode.
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Name used for corridor matching; defaults to `--from` when that
        /// is a place name.
        #[arg(long)]
        from_name: Option<String>,
        #[arg(long)]
        to_name: Option<String>,
        /// Minutes from now until departure, up to one day.
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=MAX_OFFSET_MINUTES))]
        depart: i64,
        /// Pretend the search happens at this local time (YYYY-MM-DDTHH:MM).
        #[arg(long)]
        at: Option<DepartureTime>,
        /// Print the raw response as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Record how long a corridor route actually took.
    Train {
        /// Corridor route name, e.g. "via Cecil Ave".
        route: String,
        predicted_minutes: f64,
        actual_minutes: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let store = JsonFileWeightStore::open(&config.weights.path)
        .with_context(|| format!("opening weights at {}", config.weights.path.display()))?;
    let engine = HttpRouteEngine::from_config(&config, store)?;

    match cli.command {
        Command::Route { from, to, from_name, to_name, depart, at, json } => {
            let origin = engine
                .resolve(&from)
                .await
                .ok_or_else(|| anyhow!("could not find {from:?}"))?;
            let destination = engine
                .resolve(&to)
                .await
                .ok_or_else(|| anyhow!("could not find {to:?}"))?;

            let from_name = from_name.or_else(|| place_name(&from));
            let to_name = to_name.or_else(|| place_name(&to));
            let at = at.unwrap_or_else(DepartureTime::now);

            let response = engine
                .get_route_at(at, origin, destination, from_name.as_deref(), to_name.as_deref())
                .await;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                let usual = response.routes.first().and_then(|best| {
                    let route = best.corridor_route.as_deref()?;
                    engine
                        .pipeline()
                        .catalog()
                        .find_corridor(from_name.as_deref()?, to_name.as_deref()?)?
                        .expected_minutes(route, at.plus_minutes(depart))
                });
                report::print(&response, at, depart, usual);
            }
        }
        Command::Train { route, predicted_minutes, actual_minutes } => {
            match engine.train_model_off_feedback(&route, predicted_minutes, actual_minutes).await? {
                Some(weight) => println!(
                    "{route}: multiplier {:.3} after {} observation(s)",
                    weight.multiplier, weight.data_points,
                ),
                None => println!("nothing to train: the route name is blank or a duration is not a positive number"),
            }
        }
    }
    Ok(())
}

/// `place` itself when it is a name rather than coordinates.
fn place_name(place: &str) -> Option<String> {
    match place.parse::<tc_core::GeoPoint>() {
        Ok(_) => None,
        Err(_) => Some(place.to_owned()),
    }
}

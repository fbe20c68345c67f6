use std::process::ExitCode;

use chrono::NaiveDate;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use road_router::graph::RoadGraph;
use road_router::input::{load_roads, load_travel};
use road_router::planner::{Planner, SearchConfig, Selection};

/// Road network file used when none is given.
const DEFAULT_ROADS_PATH: &str = "roads.json";

/// Travel request file used when none is given.
const DEFAULT_TRAVEL_PATH: &str = "input.json";

/// Date a bare departure clock time is anchored to.
const DEFAULT_DATE: (i32, u32, u32) = (2000, 1, 1);

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Routing failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let roads_path = args.next().unwrap_or_else(|| DEFAULT_ROADS_PATH.to_string());
    let travel_path = args.next().unwrap_or_else(|| DEFAULT_TRAVEL_PATH.to_string());

    let selection = match std::env::var("ROAD_ROUTER_SELECTION") {
        Ok(value) => value.parse::<Selection>()?,
        Err(_) => Selection::default(),
    };
    let date = match std::env::var("ROAD_ROUTER_DATE") {
        Ok(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map_err(|e| format!("invalid ROAD_ROUTER_DATE {value:?}: {e}"))?,
        Err(_) => {
            let (y, m, d) = DEFAULT_DATE;
            NaiveDate::from_ymd_opt(y, m, d).ok_or("invalid default date")?
        }
    };

    let roads = load_roads(&roads_path)?;
    let graph = RoadGraph::build(&roads)?;
    let request = load_travel(&travel_path, date)?;

    info!(
        roads = %roads_path,
        travel = %travel_path,
        %selection,
        "Planning trip"
    );

    let config = SearchConfig::new(selection);
    let itinerary = Planner::new(&graph, &config).plan(&request)?;

    println!("{itinerary}");
    Ok(())
}

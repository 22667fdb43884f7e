use std::{collections::HashSet, fs::File, path::PathBuf};

use anyhow::{Context, bail};
use clap::Args;
use comfy_table::Table;
use milkrun_matrix_providers::{
    amap_api::AmapDistanceClient, as_the_crow_flies::AsTheCrowFlies,
    distance_oracle::DistanceOracle,
};
use milkrun_optimizer::{
    problem::location::{Location, START_LOCATION_ID},
    solver::{optimize::optimize, solution::OptimizedRoute},
};
use serde::Deserialize;
use tracing::info;

use crate::parsers;

/// Largest plan the command accepts.
pub const MAX_DESTINATIONS: usize = 20;

#[derive(Args)]
pub struct OptimizePlanArgs {
    /// The delivery plan to optimize (JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Skip the distance provider and estimate every leg as the crow flies
    #[arg(long)]
    crow_flies: bool,

    /// Abort if the optimization takes longer (e.g. "30s", "5m")
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,

    /// Print the optimized route as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Deserialize)]
struct PlanFile {
    start: StartInput,
    destinations: Vec<DestinationInput>,
}

#[derive(Debug, Deserialize)]
struct StartInput {
    lat: f64,
    lng: f64,
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DestinationInput {
    id: String,
    lat: f64,
    lng: f64,
    address: Option<String>,
}

impl PlanFile {
    fn into_locations(self) -> (Location, Vec<Location>) {
        let start = Location::start(
            self.start.lat,
            self.start.lng,
            self.start
                .address
                .unwrap_or_else(|| "Start Location".to_owned()),
        );

        let destinations = self
            .destinations
            .into_iter()
            .map(|destination| {
                let address = destination
                    .address
                    .unwrap_or_else(|| format!("Destination {}", destination.id));
                Location::new(destination.id, destination.lat, destination.lng, address)
            })
            .collect();

        (start, destinations)
    }
}

fn check_destination_ids(destinations: &[DestinationInput]) -> Result<(), anyhow::Error> {
    if destinations.len() > MAX_DESTINATIONS {
        bail!(
            "maximum {MAX_DESTINATIONS} destinations allowed, got {}",
            destinations.len()
        );
    }

    let mut seen = HashSet::new();
    for destination in destinations {
        if destination.id == START_LOCATION_ID {
            bail!(
                "destination id {:?} is reserved for the start location",
                destination.id
            );
        }
        if !seen.insert(destination.id.as_str()) {
            bail!("duplicate destination id {:?}", destination.id);
        }
    }

    Ok(())
}

pub async fn run(args: OptimizePlanArgs) -> Result<(), anyhow::Error> {
    let file =
        File::open(&args.input).with_context(|| format!("could not open plan {:?}", args.input))?;
    let plan: PlanFile = serde_json::from_reader(file)
        .with_context(|| format!("could not parse plan {:?}", args.input))?;

    check_destination_ids(&plan.destinations)?;

    let oracle: Box<dyn DistanceOracle> = if args.crow_flies {
        Box::new(AsTheCrowFlies::default())
    } else {
        Box::new(AmapDistanceClient::from_env()?)
    };

    let (start, destinations) = plan.into_locations();

    info!("Optimizing a plan with {} destinations", destinations.len());

    let optimized = match args.timeout {
        Some(timeout) => {
            let limit = std::time::Duration::from_secs(timeout.as_secs().unsigned_abs());
            tokio::time::timeout(limit, optimize(oracle.as_ref(), &start, &destinations))
                .await
                .context("optimization timed out")??
        }
        None => optimize(oracle.as_ref(), &start, &destinations).await?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&optimized)?);
    } else {
        print_route(&optimized);
    }

    Ok(())
}

fn print_route(optimized: &OptimizedRoute) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Stop", "Address", "Leg distance", "Leg duration"]);

    for (position, stop) in optimized.stops.iter().enumerate() {
        let (leg_distance, leg_duration) = if position == 0 {
            ("-".to_owned(), "-".to_owned())
        } else {
            (
                format!("{:.2} km", optimized.distances[position - 1] / 1000.0),
                format!("{} min", (optimized.durations[position - 1] / 60.0).round()),
            )
        };

        table.add_row(vec![
            position.to_string(),
            stop.id.clone(),
            stop.address.clone(),
            leg_distance,
            leg_duration,
        ]);
    }

    println!("{table}");
    println!(
        "Total: {:.2} km, {} min for {} stops",
        optimized.total_distance / 1000.0,
        (optimized.total_duration / 60.0).round(),
        optimized.stops.len() - 1
    );
}

use std::{process::ExitCode, sync::Arc};

use clap::{Parser, Subcommand};
use discovery::{
    client::{Client, Services},
    config::{DiscoveryConfig, Endpoints},
    navigator::Navigator,
    presentation::PoiMarker,
    services::MemorySavedLocations,
    DiscoveryError,
};
use model::{
    location::{LocationSelection, PositionSample, Role},
    route::TravelMode,
    Coordinate,
};
use nominatim::NominatimClient;
use osrm::client::OsrmClient;
use overpass::client::OverpassClient;
use tokio::task::JoinHandle;

#[derive(Parser)]
#[command(
    name = "poi-route",
    about = "Find points of interest along a route or around a position"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute a route and list POIs along it
    Route {
        /// Start as "LAT,LNG"
        #[arg(long, value_parser = parse_coordinate)]
        from: Coordinate,
        /// Destination as "LAT,LNG"
        #[arg(long, value_parser = parse_coordinate)]
        to: Coordinate,
        #[arg(long, default_value_t = TravelMode::Driving)]
        mode: TravelMode,
        /// Search this category instead of the common ones
        #[arg(long)]
        category: Option<String>,
        /// Maximum distance to the route in meters
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// List POIs of one category around a position
    Nearby {
        /// Position as "LAT,LNG"
        #[arg(long, value_parser = parse_coordinate)]
        at: Coordinate,
        #[arg(long)]
        category: String,
        /// Search radius in meters
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Print geocoder suggestions for a free text query
    Suggest { query: String },
}

fn parse_coordinate(text: &str) -> Result<Coordinate, String> {
    let (latitude, longitude) = text
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG but got '{}'", text))?;
    let latitude = latitude
        .trim()
        .parse::<f64>()
        .map_err(|why| format!("latitude: {}", why))?;
    let longitude = longitude
        .trim()
        .parse::<f64>()
        .map_err(|why| format!("longitude: {}", why))?;
    Coordinate::new(latitude, longitude)
        .ok_or_else(|| format!("{},{} is outside the valid range", latitude, longitude))
}

fn navigator(config: DiscoveryConfig) -> Result<Navigator, DiscoveryError> {
    let endpoints = Endpoints::from_env();
    let services = Services {
        features: Arc::new(OverpassClient::new(&endpoints, config.query_timeout)?),
        routing: Arc::new(OsrmClient::new(&endpoints, config.query_timeout)?),
        geocoding: Arc::new(NominatimClient::new(&endpoints, config.query_timeout)?),
        saved: Arc::new(MemorySavedLocations::default()),
    };
    Ok(Navigator::new(Client::new(services, config)))
}

fn print_markers(markers: &[PoiMarker]) {
    for marker in markers {
        let record = &marker.record;
        match &record.distance_text {
            Some(distance) => println!("{:<14} {} ({})", record.category, record.name, distance),
            None => println!("{:<14} {}", record.category, record.name),
        }
        println!("{:<14} {}", "", marker.feature.position);
    }
}

/// Waits for the position feed to end. Returns `false` when its task died.
async fn finish_feed(feed: JoinHandle<()>) -> bool {
    match feed.await {
        Ok(()) => true,
        Err(why) => {
            log::error!("position feed task failed: {}", why);
            false
        }
    }
}

async fn run(command: Command) -> Result<(), DiscoveryError> {
    let mut config = DiscoveryConfig::from_env();
    match command {
        Command::Route {
            from,
            to,
            mode,
            category,
            threshold,
        } => {
            if let Some(threshold) = threshold {
                config.threshold_meters = threshold;
            }
            let navigator = navigator(config)?;
            navigator
                .set_location(LocationSelection::new(Role::Start, from, from.to_string()))
                .await?;
            navigator
                .set_location(LocationSelection::new(Role::End, to, to.to_string()))
                .await?;

            let outcome = navigator.compute_route(mode).await?;
            println!("{}", outcome.route.summary);

            match category {
                Some(category) => print_markers(&navigator.search(&category).await?),
                None => {
                    // the automatic search already logged its failure
                    if let Ok(Ok(_)) = outcome.enrichment.await {
                        print_markers(&navigator.markers().await);
                    }
                }
            }
        }
        Command::Nearby {
            at,
            category,
            radius,
        } => {
            if let Some(radius) = radius {
                config.radius_meters = radius;
            }
            let navigator = navigator(config)?;
            let positions = tokio_stream::iter(vec![PositionSample::now(at, 0.0)]);
            // a finished feed leaves the position in place
            finish_feed(navigator.follow_positions(positions).await).await;
            print_markers(&navigator.search(&category).await?);
        }
        Command::Suggest { query } => {
            let navigator = navigator(config)?;
            for suggestion in navigator.suggest(&query).await? {
                println!("{}  [{}]", suggestion.display_name, suggestion.coordinate);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) if !why.is_failure() => {
            println!("{}", why.user_message());
            ExitCode::SUCCESS
        }
        Err(why) => {
            log::error!("{}", why);
            eprintln!("{}", why.user_message());
            ExitCode::FAILURE
        }
    }
}

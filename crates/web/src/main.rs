use std::{env, error::Error, sync::Arc};

use database::{DatabaseConnectionInfo, PgDatabase};
use discovery::{
    client::{Client, Services},
    config::{DiscoveryConfig, Endpoints},
    services::{MemorySavedLocations, SavedLocationRepo},
};
use nominatim::NominatimClient;
use osrm::client::OsrmClient;
use overpass::client::OverpassClient;
use tracing_subscriber::EnvFilter;
use web::{start_web_server, WebState, DEFAULT_BIND_ADDRESS};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DiscoveryConfig::from_env();
    let endpoints = Endpoints::from_env();

    // saved locations
    let saved: Arc<dyn SavedLocationRepo> = match DatabaseConnectionInfo::from_env() {
        Some(database_connection_info) => {
            Arc::new(PgDatabase::connect(database_connection_info).await?)
        }
        None => {
            log::warn!("no database configured, saved locations are kept in memory");
            Arc::new(MemorySavedLocations::default())
        }
    };

    // external services
    let services = Services {
        features: Arc::new(OverpassClient::new(&endpoints, config.query_timeout)?),
        routing: Arc::new(OsrmClient::new(&endpoints, config.query_timeout)?),
        geocoding: Arc::new(NominatimClient::new(&endpoints, config.query_timeout)?),
        saved,
    };

    // web server
    let bind_address =
        env::var("WEB_BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned());
    start_web_server(
        WebState {
            discovery_client: Client::new(services, config),
        },
        &bind_address,
    )
    .await?;

    Ok(())
}

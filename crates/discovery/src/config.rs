use std::{env, str::FromStr, time::Duration};

use model::DEFAULT_BBOX_PAD_DEGREES;

pub const DEFAULT_THRESHOLD_METERS: f64 = 800.0;
pub const DEFAULT_RADIUS_METERS: f64 = 5000.0;
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(25);
pub const ENRICHMENT_CATEGORIES: [&str; 5] = ["fuel", "atm", "hospital", "restaurant", "cafe"];

/// Tuning of the search pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryConfig {
    /// Maximum distance of a feature to the route.
    pub threshold_meters: f64,
    /// Margin around the route's bounds for the bounding box query.
    pub bbox_pad_degrees: f64,
    /// Radius of the point search used when there is no route.
    pub radius_meters: f64,
    /// Upper bound for every external call.
    pub query_timeout: Duration,
    /// Categories fetched automatically after a route is computed.
    pub enrichment_categories: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            threshold_meters: DEFAULT_THRESHOLD_METERS,
            bbox_pad_degrees: DEFAULT_BBOX_PAD_DEGREES,
            radius_meters: DEFAULT_RADIUS_METERS,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            enrichment_categories: ENRICHMENT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl DiscoveryConfig {
    /// Defaults overridden by `POI_ROUTE_THRESHOLD_M`, `POI_BBOX_PAD_DEG`,
    /// `POI_RADIUS_M` and `POI_QUERY_TIMEOUT_S`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            threshold_meters: var_or("POI_ROUTE_THRESHOLD_M", defaults.threshold_meters),
            bbox_pad_degrees: var_or("POI_BBOX_PAD_DEG", defaults.bbox_pad_degrees),
            radius_meters: var_or("POI_RADIUS_M", defaults.radius_meters),
            query_timeout: Duration::from_secs(var_or(
                "POI_QUERY_TIMEOUT_S",
                defaults.query_timeout.as_secs(),
            )),
            ..defaults
        }
    }
}

/// Base URLs of the external services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub overpass_url: String,
    pub osrm_url: String,
    pub nominatim_url: String,
    pub user_agent: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            overpass_url: "https://overpass-api.de/api/interpreter".to_owned(),
            osrm_url: "https://router.project-osrm.org".to_owned(),
            nominatim_url: "https://nominatim.openstreetmap.org".to_owned(),
            user_agent: concat!("poi-route/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl Endpoints {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            overpass_url: env::var("OVERPASS_URL").unwrap_or(defaults.overpass_url),
            osrm_url: env::var("OSRM_URL").unwrap_or(defaults.osrm_url),
            nominatim_url: env::var("NOMINATIM_URL").unwrap_or(defaults.nominatim_url),
            user_agent: env::var("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }
}

fn var_or<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring invalid value '{}' for {}", value, name);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.threshold_meters, 800.0);
        assert_eq!(config.bbox_pad_degrees, 0.02);
        assert_eq!(config.radius_meters, 5000.0);
        assert_eq!(config.query_timeout, Duration::from_secs(25));
        assert_eq!(
            config.enrichment_categories,
            vec!["fuel", "atm", "hospital", "restaurant", "cafe"]
        );
    }

    #[test]
    fn invalid_values_fall_back() {
        assert_eq!(var_or("POI_TEST_SURELY_UNSET_VARIABLE", 3.5), 3.5);
    }
}

use std::{error, fmt, result, time::Duration};

use actors::actor::ActorError;
use model::location::Role;

pub mod client;
pub mod config;
pub mod navigator;
pub mod presentation;
pub mod proximity;
pub mod results;
pub mod route;
pub mod services;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

#[derive(Debug)]
pub enum DiscoveryError {
    /// The routing service produced fewer than two usable points.
    EmptyRoute,
    /// The search ran fine but nothing matched.
    NoResults { category: String },
    QueryFailure(Box<dyn error::Error + Send + Sync>),
    /// An external call did not answer within the configured time.
    Timeout(Duration),
    /// The operation needs a location for `Role` that is not set.
    InvalidSelection(Role),
    InvalidName,
    NotFound,
    StoreUnavailable,
}

pub type Result<T> = result::Result<T, DiscoveryError>;

impl DiscoveryError {
    pub fn failure<E: error::Error + Send + Sync + 'static>(why: E) -> Self {
        Self::QueryFailure(Box::new(why))
    }

    /// `false` for outcomes that are not an error from the user's view.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::NoResults { .. })
    }

    pub fn is_query_failure(&self) -> bool {
        matches!(self, Self::QueryFailure(_) | Self::Timeout(_))
    }

    /// One line suitable for a status bar or an alert.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyRoute => "No route available to search along.".to_owned(),
            Self::NoResults { category } => format!("No {} found nearby.", category),
            Self::QueryFailure(_) | Self::Timeout(_) => "Failed to fetch data, please try again.".to_owned(),
            Self::InvalidSelection(Role::Current) => "Current location not available.".to_owned(),
            Self::InvalidSelection(role) => format!("Please set the {} location.", role),
            Self::InvalidName => "Please enter a name.".to_owned(),
            Self::NotFound => "Location not found.".to_owned(),
            Self::StoreUnavailable => "Location store is not available.".to_owned(),
        }
    }
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRoute => write!(f, "route has fewer than two valid points"),
            Self::NoResults { category } => write!(f, "no results for category '{}'", category),
            Self::QueryFailure(why) => write!(f, "query failed: {}", why),
            Self::Timeout(after) => write!(f, "query timed out after {:?}", after),
            Self::InvalidSelection(role) => write!(f, "no {} location selected", role),
            Self::InvalidName => write!(f, "location name must not be empty"),
            Self::NotFound => write!(f, "not found"),
            Self::StoreUnavailable => write!(f, "location store is unavailable"),
        }
    }
}

impl error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::QueryFailure(why) => Some(why.as_ref()),
            _ => None,
        }
    }
}

impl From<ActorError> for DiscoveryError {
    fn from(why: ActorError) -> Self {
        log::error!("location store: {}", why);
        Self::StoreUnavailable
    }
}

/// Runs `future` but gives up after `limit`.
pub async fn bounded<T, F>(limit: Duration, future: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    tokio::time::timeout(limit, future)
        .await
        .map_err(|_| DiscoveryError::Timeout(limit))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_results_is_not_a_failure() {
        let nothing = DiscoveryError::NoResults {
            category: "cafe".to_owned(),
        };
        assert!(!nothing.is_failure());
        assert_eq!(nothing.user_message(), "No cafe found nearby.");
        assert!(DiscoveryError::Timeout(Duration::from_secs(25)).is_query_failure());
        assert!(DiscoveryError::EmptyRoute.is_failure());
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_gives_up() {
        let limit = Duration::from_secs(25);
        let result: Result<()> = bounded(limit, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(DiscoveryError::Timeout(after)) if after == limit));
    }
}

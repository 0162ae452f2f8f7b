use discovery::DiscoveryError;

pub mod saved_location;

pub(crate) fn convert_error(why: sqlx::Error) -> DiscoveryError {
    match why {
        sqlx::Error::RowNotFound => DiscoveryError::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            log::error!("database pool unavailable: {}", why);
            DiscoveryError::StoreUnavailable
        }
        _ => DiscoveryError::failure(why),
    }
}

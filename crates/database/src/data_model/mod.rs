pub mod saved_location;

pub type Result<O> = core::result::Result<O, sqlx::Error>;

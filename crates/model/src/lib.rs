pub use serde_with;

pub mod coordinate;
pub mod feature;
pub mod location;
pub mod poi;
pub mod query;
pub mod route;

pub use coordinate::{BoundingBox, Coordinate};

/// Default margin added around a route's tight bounds before querying.
pub const DEFAULT_BBOX_PAD_DEGREES: f64 = 0.02;

pub trait ExampleData {
    fn example_data() -> Self;
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{BoundingBox, Coordinate};

/// A batched feature lookup: one spatial filter applied to every category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum SpatialQuery {
    BoundingBox {
        categories: Vec<String>,
        bbox: BoundingBox,
    },
    Around {
        categories: Vec<String>,
        center: Coordinate,
        radius_meters: f64,
    },
}

impl SpatialQuery {
    pub fn categories(&self) -> &[String] {
        match self {
            Self::BoundingBox { categories, .. } => categories,
            Self::Around { categories, .. } => categories,
        }
    }
}

use std::fmt;

use chrono::{DateTime, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{Coordinate, ExampleData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Current,
    Start,
    End,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// The location currently assigned to a role. There is at most one per role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationSelection {
    pub role: Role,
    pub coordinate: Coordinate,
    pub label: String,
}

impl LocationSelection {
    pub fn new<S: Into<String>>(role: Role, coordinate: Coordinate, label: S) -> Self {
        Self {
            role,
            coordinate,
            label: label.into(),
        }
    }
}

/// What a click on the map means right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum InteractionMode {
    #[default]
    Idle,
    PickingStart,
    PickingEnd,
}

impl InteractionMode {
    pub fn picking(role: Role) -> Self {
        match role {
            Role::Start => Self::PickingStart,
            Role::End => Self::PickingEnd,
            Role::Current => Self::Idle,
        }
    }

    /// The role a map click would set in this mode.
    pub fn picking_role(&self) -> Option<Role> {
        match self {
            Self::Idle => None,
            Self::PickingStart => Some(Role::Start),
            Self::PickingEnd => Some(Role::End),
        }
    }

    /// Transition for pressing the "pick on map" toggle of `role`: the active
    /// toggle switches back to idle, any other toggle takes over directly.
    pub fn toggle(self, role: Role) -> Self {
        let target = Self::picking(role);
        if self == target {
            Self::Idle
        } else {
            target
        }
    }
}

/// A location persisted by the saved-location store. `x` holds the latitude
/// and `y` the longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SavedLocation {
    pub id: Id<SavedLocation>,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl HasId for SavedLocation {
    type IdType = i32;
}

impl SavedLocation {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(self.x, self.y)
    }
}

impl ExampleData for SavedLocation {
    fn example_data() -> Self {
        Self {
            id: Id::new(7),
            name: "Home".to_owned(),
            x: 54.3233,
            y: 10.1228,
        }
    }
}

/// One entry of a geocoding autosuggest list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub display_name: String,
    pub coordinate: Coordinate,
}

impl ExampleData for Suggestion {
    fn example_data() -> Self {
        Self {
            display_name: "Kiel, Schleswig-Holstein, Deutschland".to_owned(),
            coordinate: Coordinate::example_data(),
        }
    }
}

/// A sample of the live position feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PositionSample {
    pub coordinate: Coordinate,
    pub accuracy_meters: f64,
    pub timestamp: DateTime<Local>,
}

impl PositionSample {
    pub fn now(coordinate: Coordinate, accuracy_meters: f64) -> Self {
        Self {
            coordinate,
            accuracy_meters,
            timestamp: Local::now(),
        }
    }
}

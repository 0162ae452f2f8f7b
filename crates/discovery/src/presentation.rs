use model::{
    feature::Feature,
    location::{LocationSelection, Role},
    poi::{DisplayRecord, MarkerColor},
};
use schemars::JsonSchema;
use serde::Serialize;

const ADDRESS_KEYS: [&str; 4] = ["addr:housenumber", "addr:street", "addr:city", "addr:postcode"];
const DETAIL_KEYS: [&str; 3] = ["operator", "brand", "name:en"];

/// One search hit ready to be put on the map.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoiMarker {
    pub feature: Feature,
    pub category: String,
    pub record: DisplayRecord,
}

impl PoiMarker {
    /// `requested` is the category that was searched for and labels features
    /// without any tags.
    pub fn new(feature: Feature, requested: &str) -> Self {
        let category = classify(&feature, requested);
        let record = describe(&feature, feature.source_distance_to_route);
        Self {
            feature,
            category,
            record,
        }
    }

    pub fn color(&self) -> MarkerColor {
        marker_color(&self.category)
    }

    pub fn popup_html(&self) -> String {
        self.record.to_html()
    }
}

/// The `amenity` tag, else the first tag value, else `default`.
pub fn classify(feature: &Feature, default: &str) -> String {
    feature
        .tag("amenity")
        .or_else(|| feature.tags.values().next().map(String::as_str))
        .unwrap_or(default)
        .to_owned()
}

pub fn marker_color(category: &str) -> MarkerColor {
    let category = category.to_lowercase();
    let any = |needles: &[&str]| needles.iter().any(|needle| category.contains(needle));

    if any(&["hospital", "clinic", "doctors"]) {
        MarkerColor::Red
    } else if any(&["fuel", "gas"]) {
        MarkerColor::Orange
    } else if any(&["atm", "bank"]) {
        MarkerColor::Blue
    } else if any(&["restaurant", "cafe", "bar"]) {
        MarkerColor::Violet
    } else if any(&["parking"]) {
        MarkerColor::Black
    } else if any(&["hotel", "lodging"]) {
        MarkerColor::Green
    } else {
        MarkerColor::Grey
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn display_name(feature: &Feature) -> &str {
    feature
        .tag("name")
        .or_else(|| feature.tag("amenity"))
        .unwrap_or("POI")
}

/// Builds the popup content for `feature`. Tag values are escaped here, so
/// the record can be rendered as is.
pub fn describe(feature: &Feature, distance_meters: Option<f64>) -> DisplayRecord {
    let category = classify(feature, "amenity");
    let escaped = |key: &str| feature.tag(key).map(escape_html);

    let address = ADDRESS_KEYS
        .iter()
        .filter_map(|key| escaped(*key))
        .collect::<Vec<_>>();

    DisplayRecord {
        name: escape_html(display_name(feature)),
        marker: marker_color(&category),
        category: escape_html(&category),
        distance_text: distance_meters
            .map(|meters| format!("{:.2} km from route", meters / 1000.0)),
        address: (!address.is_empty()).then(|| address.join(", ")),
        phone: escaped("phone"),
        website: escaped("website"),
        opening_hours: escaped("opening_hours"),
        details: DETAIL_KEYS
            .iter()
            .filter_map(|key| escaped(*key).map(|value| format!("{}: {}", key, value)))
            .collect(),
    }
}

/// Makes a feature the route destination.
pub fn promote_to_end(feature: &Feature) -> LocationSelection {
    let position = feature.position;
    LocationSelection::new(
        Role::End,
        position,
        format!(
            "{} ({:.4}, {:.4})",
            display_name(feature),
            position.latitude(),
            position.longitude()
        ),
    )
}

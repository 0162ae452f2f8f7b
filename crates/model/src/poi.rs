use std::fmt::Write as _;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Orange,
    Blue,
    Violet,
    Black,
    Green,
    Grey,
}

impl MarkerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Black => "black",
            Self::Green => "green",
            Self::Grey => "grey",
        }
    }
}

/// Everything a popup shows for one POI. All text fields are already escaped
/// for HTML.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub name: String,
    pub category: String,
    pub distance_text: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<String>,
    pub details: Vec<String>,
    pub marker: MarkerColor,
}

impl DisplayRecord {
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<div class=\"poi-popup\"><strong>{}</strong><br><em>{}</em>",
            self.name, self.category
        );
        // writing into a String can not fail
        if let Some(distance) = &self.distance_text {
            let _ = write!(html, "<br><small>{}</small>", distance);
        }
        if let Some(address) = &self.address {
            let _ = write!(html, "<br>{}", address);
        }
        if let Some(phone) = &self.phone {
            let _ = write!(html, "<br>☎️ <a href=\"tel:{0}\">{0}</a>", phone);
        }
        if let Some(website) = &self.website {
            let _ = write!(
                html,
                "<br>🔗 <a href=\"{}\" target=\"_blank\" rel=\"noopener\">Website</a>",
                website
            );
        }
        if let Some(hours) = &self.opening_hours {
            let _ = write!(html, "<br>🕒 {}", hours);
        }
        if !self.details.is_empty() {
            let _ = write!(html, "<br><small>{}</small>", self.details.join(" • "));
        }
        html.push_str("</div>");
        html
    }
}

impl ExampleData for DisplayRecord {
    fn example_data() -> Self {
        Self {
            name: "Tankstelle am Hafen".to_owned(),
            category: "fuel".to_owned(),
            distance_text: Some("0.24 km from route".to_owned()),
            address: Some("12, Hafenstraße, Kiel, 24103".to_owned()),
            phone: None,
            website: None,
            opening_hours: Some("24/7".to_owned()),
            details: vec!["brand: Aral".to_owned()],
            marker: MarkerColor::Orange,
        }
    }
}

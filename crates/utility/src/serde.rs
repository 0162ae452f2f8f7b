use serde::de::{self, Visitor};
use serde::Deserializer;
use std::fmt;

/// Deserializes an `f64` that may be encoded either as a JSON number or as a
/// numeric string (`"54.3233"`), as some geocoders do.
pub mod number_or_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumberOrStringVisitor)
    }

    struct NumberOrStringVisitor;

    impl<'de> Visitor<'de> for NumberOrStringVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a string containing a number")
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
            Ok(value as f64)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Point {
        #[serde(with = "super::number_or_string")]
        lat: f64,
    }

    fn parse(json: &str) -> Result<Point, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn accepts_numbers_and_strings() {
        assert_eq!(parse(r#"{"lat": 54.5}"#).unwrap().lat, 54.5);
        assert_eq!(parse(r#"{"lat": 7}"#).unwrap().lat, 7.0);
        assert_eq!(parse(r#"{"lat": "-12.25"}"#).unwrap().lat, -12.25);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse(r#"{"lat": "north"}"#).is_err());
    }
}

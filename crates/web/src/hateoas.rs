use std::{collections::BTreeMap, sync::Arc};

use axum::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::base_url::BaseUrl;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Link {
    #[serde(rename = "rel")]
    pub relation: String,

    #[serde(rename = "href")]
    pub hypertext_reference: String,
}

/// A payload with links to related resources.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Response<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub debug_info: BTreeMap<String, Value>,
    pub links: Vec<Link>,
}

impl<T> Response<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            debug_info: BTreeMap::new(),
            links: vec![],
        }
    }

    pub fn builder(content: T, base_url: Arc<BaseUrl>) -> ResponseBuilder<T> {
        ResponseBuilder::new(content, base_url)
    }

    pub fn json(self) -> Json<Self> {
        Json(self)
    }
}

/// Collects links relative to the request's [`BaseUrl`].
pub struct ResponseBuilder<T> {
    response: Response<T>,
    base_url: Arc<BaseUrl>,
}

impl<T> ResponseBuilder<T> {
    fn new(content: T, base_url: Arc<BaseUrl>) -> Self {
        Self {
            response: Response::new(content),
            base_url,
        }
    }

    pub fn debug_info<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Serialize,
    {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.response.debug_info.insert(key.into(), value);
            }
            Err(why) => log::warn!("dropping debug info: {}", why),
        }
        self
    }

    pub fn link<R, H>(self, relation: R, hypertext_reference: H) -> Self
    where
        R: Into<String>,
        H: Into<String>,
    {
        let url = self.base_url.full_url(hypertext_reference);
        self.link_extern(relation, url)
    }

    pub fn link_extern<R, H>(mut self, relation: R, hypertext_reference: H) -> Self
    where
        R: Into<String>,
        H: Into<String>,
    {
        self.response.links.push(Link {
            relation: relation.into(),
            hypertext_reference: hypertext_reference.into(),
        });
        self
    }

    pub fn build(self) -> Response<T> {
        self.response
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;

    use super::*;

    #[test]
    fn links_are_absolute() {
        let mut headers = HeaderMap::new();
        headers.insert("host", "maps.example.org".parse().unwrap());
        let base_url = Arc::new(BaseUrl::from_headers(&headers));

        let response = Response::builder(42, base_url)
            .link("self", "/api/v1/locations/42")
            .debug_info("elapsedSecs", 0.5)
            .build();

        assert_eq!(response.links.len(), 1);
        assert_eq!(
            response.links[0].hypertext_reference,
            "http://maps.example.org/api/v1/locations/42"
        );
        assert_eq!(response.debug_info["elapsedSecs"], 0.5);
    }
}

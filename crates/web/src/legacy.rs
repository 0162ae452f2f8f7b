//! Form endpoints of the bundled map page. They answer with a
//! `{ success, id?, error? }` envelope and always use status 200 for
//! handled outcomes, the page only looks at `success`.

use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};
use discovery::DiscoveryError;
use model::Coordinate;
use serde::{Deserialize, Serialize};
use utility::{id::Id, serde::number_or_string};

use crate::WebState;

pub fn routes(state: WebState) -> Router {
    Router::new()
        .route("/add_location", post(add_location))
        .route("/delete_location/:id", delete(delete_location))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddLocationBody {
    #[serde(default)]
    name: String,
    #[serde(deserialize_with = "number_or_string::deserialize")]
    x: f64,
    #[serde(deserialize_with = "number_or_string::deserialize")]
    y: f64,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct LegacyResponse {
    success: bool,
    id: Option<i32>,
    error: Option<String>,
}

impl LegacyResponse {
    fn ok(id: Option<i32>) -> Json<Self> {
        Json(Self {
            success: true,
            id,
            error: None,
        })
    }

    fn failed(why: DiscoveryError) -> Json<Self> {
        log::warn!("legacy endpoint: {}", why);
        Json(Self {
            success: false,
            id: None,
            error: Some(why.user_message()),
        })
    }
}

async fn add_location(
    State(WebState { discovery_client }): State<WebState>,
    Json(body): Json<AddLocationBody>,
) -> Json<LegacyResponse> {
    let Some(coordinate) = Coordinate::new(body.x, body.y) else {
        return Json(LegacyResponse {
            success: false,
            id: None,
            error: Some("Invalid coordinates.".to_owned()),
        });
    };
    match discovery_client.save_location(&body.name, coordinate).await {
        Ok(saved) => LegacyResponse::ok(Some(saved.id.raw())),
        Err(why) => LegacyResponse::failed(why),
    }
}

async fn delete_location(
    State(WebState { discovery_client }): State<WebState>,
    Path(id): Path<i32>,
) -> Json<LegacyResponse> {
    match discovery_client.delete_saved_location(Id::new(id)).await {
        Ok(()) => LegacyResponse::ok(None),
        Err(why) => LegacyResponse::failed(why),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::memory_state;

    fn body(json: &str) -> Json<AddLocationBody> {
        Json(serde_json::from_str(json).unwrap())
    }

    #[tokio::test]
    async fn add_then_delete() {
        let state = memory_state();

        let Json(added) = add_location(
            State(state.clone()),
            body(r#"{"name": "Home", "x": 54.3233, "y": "10.1228"}"#),
        )
        .await;
        assert_eq!(added, LegacyResponse { success: true, id: Some(1), error: None });

        let saved = state.discovery_client.saved_locations().await.unwrap();
        assert_eq!(saved[0].x, 54.3233);
        assert_eq!(saved[0].y, 10.1228);

        let Json(deleted) = delete_location(State(state.clone()), Path(1)).await;
        assert!(deleted.success);
        assert!(state.discovery_client.saved_locations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failures_keep_the_envelope() {
        let state = memory_state();

        let Json(unnamed) =
            add_location(State(state.clone()), body(r#"{"name": "  ", "x": 1, "y": 2}"#)).await;
        assert!(!unnamed.success);
        assert_eq!(unnamed.error.as_deref(), Some("Please enter a name."));

        let Json(outside) =
            add_location(State(state.clone()), body(r#"{"name": "Pole", "x": 91, "y": 0}"#)).await;
        assert!(!outside.success);

        let Json(missing) = delete_location(State(state), Path(42)).await;
        assert!(!missing.success);
        assert_eq!(missing.error.as_deref(), Some("Location not found."));
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let json = serde_json::to_value(LegacyResponse {
            success: true,
            id: None,
            error: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));
    }
}

use std::{sync::Arc, time::Instant};

use axum::{
    extract::{OriginalUri, Query, State},
    http::Method,
    routing::{get, on, post},
    Extension, Json, Router,
};
use discovery::{presentation::PoiMarker, route::normalize_route};
use model::route::RawCoordinate;
use serde::Deserialize;

use crate::{
    api::v1::coordinate_param,
    common::{
        route_not_found, schema_no_example, HateoasResult, RouteErrorResponse, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/pois{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema_no_example::<PoiMarker>))
        .route("/nearby", get(nearby))
        .route("/along-route", post(along_route))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Comma separated list, blank entries are ignored.
fn split_categories(categories: &str) -> Vec<String> {
    categories
        .split(',')
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(Deserialize)]
pub(crate) struct NearbyQuery {
    latitude: f64,
    longitude: f64,
    category: String,
    radius: Option<f64>,
}

async fn nearby(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { discovery_client }): State<WebState>,
    Query(params): Query<NearbyQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<PoiMarker>> {
    let center = coordinate_param(params.latitude, params.longitude, "center").map_err(|why| {
        why.with_method(&Method::GET).with_uri(original_uri.path())
    })?;
    let radius = params
        .radius
        .filter(|radius| radius.is_finite() && *radius > 0.0)
        .unwrap_or(discovery_client.config().radius_meters);
    let categories = split_categories(&params.category);

    let now = Instant::now();
    discovery_client
        .search_around(center, &categories, radius)
        .await
        .map(|markers| markers_hateoas(markers, base_url, now).json())
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AlongRouteBody {
    route: Vec<RawCoordinate>,
    categories: Vec<String>,
    threshold_meters: Option<f64>,
}

async fn along_route(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { discovery_client }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(body): Json<AlongRouteBody>,
) -> HateoasResult<VecResponse<PoiMarker>> {
    let threshold = body
        .threshold_meters
        .filter(|threshold| threshold.is_finite() && *threshold >= 0.0)
        .unwrap_or(discovery_client.config().threshold_meters);

    let with_context =
        |why: RouteErrorResponse| why.with_method(&Method::POST).with_uri(original_uri.path());
    let route = normalize_route(&body.route).map_err(|why| {
        with_context(RouteErrorResponse::bad_request(why.user_message()))
    })?;

    let now = Instant::now();
    discovery_client
        .search_along_route(&route, &body.categories, threshold)
        .await
        .map(|markers| markers_hateoas(markers, base_url, now).json())
        .map_err(|why| with_context(RouteErrorResponse::from(why)))
}

fn markers_hateoas(
    markers: Vec<PoiMarker>,
    base_url: Arc<BaseUrl>,
    started: Instant,
) -> hateoas::Response<VecResponse<PoiMarker>> {
    hateoas::Response::builder(VecResponse::new(markers), base_url)
        .link("schema", resource!("/schema"))
        .debug_info("elapsedSecs", started.elapsed().as_secs_f64())
        .build()
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, StatusCode, Uri};

    use super::*;
    use crate::testing::memory_state;

    fn base_url() -> Extension<Arc<BaseUrl>> {
        Extension(Arc::new(BaseUrl::from_headers(&HeaderMap::new())))
    }

    #[tokio::test]
    async fn short_route_is_a_bad_request() {
        let body = serde_json::from_str(r#"{"route": [[54.32, 10.12]], "categories": ["fuel"]}"#)
            .unwrap();
        let Err(response) = along_route(
            OriginalUri(Uri::from_static("/api/v1/pois/along-route")),
            State(memory_state()),
            base_url(),
            Json(body),
        )
        .await
        else {
            panic!("expected an error response");
        };
        assert_eq!(response.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(response.http_method.as_deref(), Some("POST"));
    }

    #[tokio::test]
    async fn unreachable_feature_service_is_a_bad_gateway() {
        let Err(response) = nearby(
            OriginalUri(Uri::from_static("/api/v1/pois/nearby")),
            State(memory_state()),
            Query(NearbyQuery {
                latitude: 54.32,
                longitude: 10.12,
                category: "cafe".to_owned(),
                radius: None,
            }),
            base_url(),
        )
        .await
        else {
            panic!("expected an error response");
        };
        assert_eq!(response.status_code, StatusCode::BAD_GATEWAY);
        assert_eq!(response.requested_uri.as_deref(), Some("/api/v1/pois/nearby"));
    }

    #[tokio::test]
    async fn blank_category_yields_no_markers() {
        let Ok(Json(response)) = nearby(
            OriginalUri(Uri::from_static("/api/v1/pois/nearby")),
            State(memory_state()),
            Query(NearbyQuery {
                latitude: 54.32,
                longitude: 10.12,
                category: " , ".to_owned(),
                radius: Some(500.0),
            }),
            base_url(),
        )
        .await
        else {
            panic!("expected markers");
        };
        assert_eq!(response.content.count, 0);
    }

    #[test]
    fn categories_are_split_and_trimmed() {
        assert_eq!(split_categories("fuel, cafe,,"), vec!["fuel", "cafe"]);
        assert!(split_categories(" ").is_empty());
    }

    #[test]
    fn along_route_body_accepts_both_coordinate_shapes() {
        let body: AlongRouteBody = serde_json::from_str(
            r#"{"route": [[54.32, 10.12], {"lat": 54.33, "lng": 10.13}], "categories": ["fuel"]}"#,
        )
        .unwrap();
        assert_eq!(body.route.len(), 2);
        assert!(matches!(body.route[1], RawCoordinate::Record { .. }));
        assert_eq!(body.threshold_meters, None);
    }
}

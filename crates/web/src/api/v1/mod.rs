use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Query, State},
    http::Method,
    routing::{get, on},
    Extension, Router,
};
use discovery::route::ComputedRoute;
use model::{
    route::{RouteRequest, TravelMode},
    Coordinate,
};
use serde::Deserialize;

use crate::{
    common::{
        route_not_found, schema_no_example, HateoasResult, RouteErrorResponse, METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

mod locations;
mod pois;
mod suggestions;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/v1{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/route", get(route))
        .route("/route/schema", get(schema_no_example::<ComputedRoute>))
        .nest_service("/pois", pois::routes(state.clone()))
        .nest_service("/suggestions", suggestions::routes(state.clone()))
        .nest_service("/locations", locations::routes(state.clone()))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Parses a coordinate given as two query parameters.
pub(crate) fn coordinate_param(
    latitude: f64,
    longitude: f64,
    name: &str,
) -> Result<Coordinate, RouteErrorResponse> {
    Coordinate::new(latitude, longitude).ok_or_else(|| {
        RouteErrorResponse::bad_request(format!("{} is not a valid coordinate.", name))
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteQuery {
    start_latitude: f64,
    start_longitude: f64,
    end_latitude: f64,
    end_longitude: f64,
    #[serde(default)]
    mode: TravelMode,
}

async fn route(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { discovery_client }): State<WebState>,
    Query(params): Query<RouteQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<ComputedRoute> {
    let with_context = |why: RouteErrorResponse| {
        why.with_method(&Method::GET).with_uri(original_uri.path())
    };
    let request = RouteRequest {
        start: coordinate_param(params.start_latitude, params.start_longitude, "start")
            .map_err(with_context)?,
        end: coordinate_param(params.end_latitude, params.end_longitude, "end")
            .map_err(with_context)?,
        mode: params.mode,
    };

    discovery_client
        .route(request)
        .await
        .map(|route| route_hateoas(route, base_url).json())
        .map_err(|why| with_context(RouteErrorResponse::from(why)))
}

fn route_hateoas(route: ComputedRoute, base_url: Arc<BaseUrl>) -> hateoas::Response<ComputedRoute> {
    let summary = route.summary.to_string();
    hateoas::Response::builder(route, base_url)
        .link("poisAlongRoute", pois::resource!("/along-route"))
        .debug_info("summary", summary)
        .build()
}

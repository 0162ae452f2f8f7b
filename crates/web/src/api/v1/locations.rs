use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::{Method, StatusCode},
    routing::{delete, get, on},
    Extension, Json, Router,
};
use model::location::SavedLocation;
use serde::Deserialize;
use utility::{id::Id, let_also::LetAlso};

use crate::{
    api::v1::coordinate_param,
    common::{
        route_not_found, schema, HateoasResult, RouteErrorResponse, RouteResult, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/locations{}", format_args!($($arg)*))
    };
}

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<SavedLocation>))
        .route("/", get(get_locations).post(create_location))
        .route("/:id", delete(delete_location))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_locations(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { discovery_client }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<SavedLocation>>> {
    discovery_client
        .saved_locations()
        .await
        .map(|locations| {
            locations
                .into_iter()
                .map(|location| location_hateoas(location, base_url.clone()))
                .collect::<Vec<_>>()
                .let_owned(|data| VecResponse::new(data).hateoas().json())
        })
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

#[derive(Deserialize)]
pub(crate) struct NewLocation {
    name: String,
    latitude: f64,
    longitude: f64,
}

async fn create_location(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { discovery_client }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    Json(body): Json<NewLocation>,
) -> RouteResult<(StatusCode, Json<hateoas::Response<SavedLocation>>)> {
    let with_context =
        |why: RouteErrorResponse| why.with_method(&Method::POST).with_uri(original_uri.path());
    let coordinate =
        coordinate_param(body.latitude, body.longitude, "location").map_err(with_context)?;

    discovery_client
        .save_location(&body.name, coordinate)
        .await
        .map(|location| (StatusCode::CREATED, location_hateoas(location, base_url).json()))
        .map_err(|why| with_context(RouteErrorResponse::from(why)))
}

async fn delete_location(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<i32>,
    State(WebState { discovery_client }): State<WebState>,
) -> RouteResult<StatusCode> {
    discovery_client
        .delete_saved_location(Id::new(id))
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::DELETE)
                .with_uri(original_uri.path())
        })
}

pub(crate) fn location_hateoas(
    location: SavedLocation,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<SavedLocation> {
    let id = location.id;
    hateoas::Response::builder(location, base_url)
        .link("self", resource!("/{}", id))
        .link("collection", resource!("/"))
        .build()
}

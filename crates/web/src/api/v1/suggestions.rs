use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Query, State},
    http::Method,
    routing::{get, on},
    Extension, Router,
};
use model::location::Suggestion;
use serde::Deserialize;

use crate::{
    common::{
        route_not_found, schema, HateoasResult, RouteErrorResponse, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(suggest))
        .route("/schema", get(schema::<Suggestion>))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Deserialize)]
pub(crate) struct SuggestQuery {
    #[serde(default)]
    q: String,
}

async fn suggest(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { discovery_client }): State<WebState>,
    Query(params): Query<SuggestQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<Suggestion>> {
    discovery_client
        .suggest(&params.q)
        .await
        .map(|suggestions| {
            hateoas::Response::builder(VecResponse::new(suggestions), base_url)
                .link("schema", super::resource!("/suggestions/schema"))
                .build()
                .json()
        })
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

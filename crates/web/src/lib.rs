pub use crate::common::RouteResult;

use axum::{extract::FromRef, routing::get_service, Router};
use discovery::client::Client;
use tokio::net::TcpListener;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod api;
pub mod common;
pub mod hateoas;
pub mod legacy;
pub mod middleware;

#[cfg(test)]
pub(crate) mod testing;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Clone, FromRef)]
pub struct WebState {
    pub discovery_client: Client,
}

pub fn router(state: WebState) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state.clone()))
        .merge(legacy::routes(state))
        .fallback_service(static_content_router())
        .layer(TraceLayer::new_for_http())
}

pub async fn start_web_server(state: WebState, bind_address: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state).into_make_service()).await?;

    Ok(())
}

fn static_content_router() -> Router {
    Router::new().nest_service(
        "/",
        get_service(
            ServeDir::new("./resources/www/")
                .not_found_service(ServeFile::new("./resources/www/error404.html")),
        ),
    )
}

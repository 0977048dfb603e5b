//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, HttpServer, get, web};
use tracing::{info, warn};
use utoipa::OpenApi;

use crate::doc::ApiDoc;
use crate::domain::{CityService, StateService};
use crate::inbound::http::cities::{
    create_city, delete_city, get_city, list_cities, root, search_cities, update_city,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::states::{
    create_state, delete_state, get_state, list_states, update_state,
};
use crate::outbound::persistence::{DieselCityRepository, DieselStateRepository};
use crate::seed;

/// Build the handler state from configuration.
///
/// Uses database-backed repositories when a pool is configured, otherwise
/// falls back to the in-memory store so the server stays usable without a
/// database.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => HttpState::new(
            StateService::new(Arc::new(DieselStateRepository::new(pool.clone()))),
            CityService::new(Arc::new(DieselCityRepository::new(pool.clone()))),
        ),
        None => {
            warn!("no database configured; using in-memory store");
            HttpState::in_memory()
        }
    }
}

/// Serve the generated OpenAPI document for external tooling.
#[get("/api-docs/openapi.json")]
async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Assemble the application with every route registered.
///
/// `search_cities` must be registered ahead of `get_city` so the literal
/// `/cities/search` segment is not captured by the `{id}` path parameter.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .service(list_states)
        .service(get_state)
        .service(create_state)
        .service(update_state)
        .service(delete_state)
        .service(search_cities)
        .service(list_cities)
        .service(get_city)
        .service(create_city)
        .service(update_city)
        .service(delete_city)
        .service(root)
        .service(openapi_json)
}

/// Run the HTTP server until shutdown.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when seeding, binding the socket, or
/// running the server fails.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let http_state = web::Data::new(build_http_state(&config));

    if config.seed {
        seed::load_sample_data(&http_state.states, &http_state.cities)
            .await
            .map_err(|err| std::io::Error::other(format!("seeding failed: {err}")))?;
    }

    info!(addr = %config.bind_addr, "starting server");
    let server_state = http_state.clone();
    HttpServer::new(move || build_app(server_state.clone()))
        .bind(config.bind_addr)?
        .run()
        .await
}

//! Test helpers for inbound HTTP components.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;
use actix_web::web;
use serde_json::{Value, json};

use crate::inbound::http::state::HttpState;
use crate::server;

/// Handler state backed by a fresh in-memory store.
pub fn test_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::in_memory())
}

/// Initialise the full application with the given state.
pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    actix_test::init_service(server::build_app(state)).await
}

/// Create a state through the API and return its id.
pub async fn create_state<S, B>(app: &S, name: &str, abbreviation: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = actix_test::TestRequest::post()
        .uri("/states")
        .set_json(json!({ "state": { "name": name, "abbreviation": abbreviation } }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(app, request).await;
    body["id"].as_i64().expect("state id")
}

/// Create a city through the API and return its id.
pub async fn create_city<S, B>(app: &S, name: &str, state_id: Option<i64>) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = actix_test::TestRequest::post()
        .uri("/cities")
        .set_json(json!({ "city": { "name": name, "state_id": state_id } }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(app, request).await;
    body["id"].as_i64().expect("city id")
}

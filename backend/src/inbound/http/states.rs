//! State resource handlers.
//!
//! ```text
//! GET    /states        List states
//! GET    /states/{id}   Fetch one state
//! POST   /states        Create a state
//! PATCH  /states/{id}   Update a state
//! DELETE /states/{id}   Delete a state
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{State, StateParams};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request envelope: the payload nests under a `state` key.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StateBody {
    pub state: StateFields,
}

/// Permitted state fields. Anything else a client submits is dropped by
/// deserialization and never reaches the entity.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StateFields {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
}

impl From<StateFields> for StateParams {
    fn from(fields: StateFields) -> Self {
        Self {
            name: fields.name,
            abbreviation: fields.abbreviation,
        }
    }
}

/// State resource representation.
#[derive(Debug, Serialize, ToSchema)]
pub struct StateResponse {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
}

impl From<State> for StateResponse {
    fn from(state: State) -> Self {
        Self {
            id: state.id,
            name: state.name,
            abbreviation: state.abbreviation,
        }
    }
}

/// List all states in natural order.
#[utoipa::path(
    get,
    path = "/states",
    responses((status = 200, description = "All states", body = [StateResponse])),
    tags = ["states"],
    operation_id = "listStates"
)]
#[get("/states")]
pub async fn list_states(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let records = state.states.list().await?;
    let body: Vec<StateResponse> = records.into_iter().map(StateResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Fetch a single state by id.
#[utoipa::path(
    get,
    path = "/states/{id}",
    params(("id" = i64, Path, description = "State id")),
    responses(
        (status = 200, description = "Matching state", body = StateResponse),
        (status = 404, description = "No state with this id")
    ),
    tags = ["states"],
    operation_id = "getState"
)]
#[get("/states/{id}")]
pub async fn get_state(state: web::Data<HttpState>, path: web::Path<i64>) -> ApiResult<HttpResponse> {
    let record = state.states.fetch(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StateResponse::from(record)))
}

/// Create a state from the permitted fields.
#[utoipa::path(
    post,
    path = "/states",
    request_body = StateBody,
    responses(
        (status = 201, description = "Created state", body = StateResponse),
        (status = 422, description = "Field violations as a field→messages map")
    ),
    tags = ["states"],
    operation_id = "createState"
)]
#[post("/states")]
pub async fn create_state(
    state: web::Data<HttpState>,
    payload: web::Json<StateBody>,
) -> ApiResult<HttpResponse> {
    let record = state
        .states
        .create(payload.into_inner().state.into())
        .await?;
    Ok(HttpResponse::Created().json(StateResponse::from(record)))
}

/// Update a state; omitted fields keep their stored values.
#[utoipa::path(
    patch,
    path = "/states/{id}",
    params(("id" = i64, Path, description = "State id")),
    request_body = StateBody,
    responses(
        (status = 200, description = "Updated state", body = StateResponse),
        (status = 404, description = "No state with this id"),
        (status = 422, description = "Field violations as a field→messages map")
    ),
    tags = ["states"],
    operation_id = "updateState"
)]
#[patch("/states/{id}")]
pub async fn update_state(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<StateBody>,
) -> ApiResult<HttpResponse> {
    let record = state
        .states
        .update(path.into_inner(), payload.into_inner().state.into())
        .await?;
    Ok(HttpResponse::Ok().json(StateResponse::from(record)))
}

/// Delete a state.
#[utoipa::path(
    delete,
    path = "/states/{id}",
    params(("id" = i64, Path, description = "State id")),
    responses(
        (status = 204, description = "State deleted"),
        (status = 404, description = "No state with this id")
    ),
    tags = ["states"],
    operation_id = "deleteState"
)]
#[delete("/states/{id}")]
pub async fn delete_state(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.states.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

//! City resource handlers, including search.
//!
//! ```text
//! GET    /cities          List cities (also served at /)
//! GET    /cities/search   Filtered listing with the owning state nested
//! GET    /cities/{id}     Fetch one city
//! POST   /cities          Create a city
//! PATCH  /cities/{id}     Update a city
//! DELETE /cities/{id}     Delete a city
//! ```
//!
//! Search renders a listing shape of its own: each entry nests the eagerly
//! loaded owning state instead of the flat `state_id` used elsewhere.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{City, CityParams, CitySearchFilter, CityWithState};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::states::StateResponse;

/// Request envelope: the payload nests under a `city` key.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CityBody {
    pub city: CityFields,
}

/// Permitted city fields. Anything else a client submits is dropped by
/// deserialization and never reaches the entity.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CityFields {
    pub name: Option<String>,
    pub state_id: Option<i64>,
}

impl From<CityFields> for CityParams {
    fn from(fields: CityFields) -> Self {
        Self {
            name: fields.name,
            state_id: fields.state_id,
        }
    }
}

/// City resource representation.
#[derive(Debug, Serialize, ToSchema)]
pub struct CityResponse {
    pub id: i64,
    pub name: String,
    pub state_id: Option<i64>,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            state_id: city.state_id,
        }
    }
}

/// Search query parameters; both fragments are optional and an empty string
/// counts as absent.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CitySearchQuery {
    /// State-name fragment, matched case-insensitively.
    pub state: Option<String>,
    /// City-name fragment, matched case-insensitively.
    pub name: Option<String>,
}

/// One entry of the search listing, with the owning state nested.
#[derive(Debug, Serialize, ToSchema)]
pub struct CityListingEntry {
    pub id: i64,
    pub name: String,
    pub state: Option<StateResponse>,
}

impl From<CityWithState> for CityListingEntry {
    fn from(row: CityWithState) -> Self {
        Self {
            id: row.city.id,
            name: row.city.name,
            state: row.state.map(StateResponse::from),
        }
    }
}

async fn city_index(state: &HttpState) -> ApiResult<HttpResponse> {
    let records = state.cities.list().await?;
    let body: Vec<CityResponse> = records.into_iter().map(CityResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// List all cities in natural order.
#[utoipa::path(
    get,
    path = "/cities",
    responses((status = 200, description = "All cities", body = [CityResponse])),
    tags = ["cities"],
    operation_id = "listCities"
)]
#[get("/cities")]
pub async fn list_cities(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    city_index(&state).await
}

/// Root path serves the city listing.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "All cities", body = [CityResponse])),
    tags = ["cities"],
    operation_id = "rootCities"
)]
#[get("/")]
pub async fn root(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    city_index(&state).await
}

/// Search cities by optional state-name and city-name fragments.
///
/// Filters compose with AND semantics; the result is ordered ascending by
/// city name and an empty listing is a success, never an error.
#[utoipa::path(
    get,
    path = "/cities/search",
    params(CitySearchQuery),
    responses((status = 200, description = "Matching cities with their state", body = [CityListingEntry])),
    tags = ["cities"],
    operation_id = "searchCities"
)]
#[get("/cities/search")]
pub async fn search_cities(
    state: web::Data<HttpState>,
    query: web::Query<CitySearchQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let filter = CitySearchFilter::new(query.state, query.name);
    let rows = state.cities.search(&filter).await?;
    let body: Vec<CityListingEntry> = rows.into_iter().map(CityListingEntry::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Fetch a single city by id.
#[utoipa::path(
    get,
    path = "/cities/{id}",
    params(("id" = i64, Path, description = "City id")),
    responses(
        (status = 200, description = "Matching city", body = CityResponse),
        (status = 404, description = "No city with this id")
    ),
    tags = ["cities"],
    operation_id = "getCity"
)]
#[get("/cities/{id}")]
pub async fn get_city(state: web::Data<HttpState>, path: web::Path<i64>) -> ApiResult<HttpResponse> {
    let record = state.cities.fetch(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CityResponse::from(record)))
}

/// Create a city from the permitted fields.
#[utoipa::path(
    post,
    path = "/cities",
    request_body = CityBody,
    responses(
        (status = 201, description = "Created city", body = CityResponse),
        (status = 422, description = "Field violations as a field→messages map")
    ),
    tags = ["cities"],
    operation_id = "createCity"
)]
#[post("/cities")]
pub async fn create_city(
    state: web::Data<HttpState>,
    payload: web::Json<CityBody>,
) -> ApiResult<HttpResponse> {
    let record = state
        .cities
        .create(payload.into_inner().city.into())
        .await?;
    Ok(HttpResponse::Created().json(CityResponse::from(record)))
}

/// Update a city; omitted fields keep their stored values.
#[utoipa::path(
    patch,
    path = "/cities/{id}",
    params(("id" = i64, Path, description = "City id")),
    request_body = CityBody,
    responses(
        (status = 200, description = "Updated city", body = CityResponse),
        (status = 404, description = "No city with this id"),
        (status = 422, description = "Field violations as a field→messages map")
    ),
    tags = ["cities"],
    operation_id = "updateCity"
)]
#[patch("/cities/{id}")]
pub async fn update_city(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CityBody>,
) -> ApiResult<HttpResponse> {
    let record = state
        .cities
        .update(path.into_inner(), payload.into_inner().city.into())
        .await?;
    Ok(HttpResponse::Ok().json(CityResponse::from(record)))
}

/// Delete a city.
#[utoipa::path(
    delete,
    path = "/cities/{id}",
    params(("id" = i64, Path, description = "City id")),
    responses(
        (status = 204, description = "City deleted"),
        (status = 404, description = "No city with this id")
    ),
    tags = ["cities"],
    operation_id = "deleteCity"
)]
#[delete("/cities/{id}")]
pub async fn delete_city(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.cities.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

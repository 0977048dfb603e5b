//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every state and city endpoint plus the response and
//! request schemas they reference.

use utoipa::OpenApi;

use crate::inbound::http::cities::{
    CityBody, CityFields, CityListingEntry, CityResponse,
};
use crate::inbound::http::states::{StateBody, StateFields, StateResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gazetteer API",
        description = "CRUD and search over states and their cities."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::states::list_states,
        crate::inbound::http::states::get_state,
        crate::inbound::http::states::create_state,
        crate::inbound::http::states::update_state,
        crate::inbound::http::states::delete_state,
        crate::inbound::http::cities::root,
        crate::inbound::http::cities::list_cities,
        crate::inbound::http::cities::search_cities,
        crate::inbound::http::cities::get_city,
        crate::inbound::http::cities::create_city,
        crate::inbound::http::cities::update_city,
        crate::inbound::http::cities::delete_city,
    ),
    components(schemas(
        StateBody,
        StateFields,
        StateResponse,
        CityBody,
        CityFields,
        CityResponse,
        CityListingEntry,
    )),
    tags(
        (name = "states", description = "State resource operations"),
        (name = "cities", description = "City resource operations and search")
    )
)]
pub struct ApiDoc;

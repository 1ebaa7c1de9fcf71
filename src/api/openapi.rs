//! # OpenAPI Document
//!
//! Generated description of the HTTP surface, served at /openapi.json.

use axum::Json;
use utoipa::OpenApi;

use super::errors::ErrorResponse;
use super::handlers::{self, HealthResponse};
use super::schemas::{AddressResponse, CreateAddress, NearbyAddressResponse, UpdateAddress};

/// OpenAPI description of the address book API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geospatial Address Book API",
        description = "A robust API for managing address coordinates and querying nearby locations using geospatial distance calculation.",
        version = "1.0.0"
    ),
    paths(
        handlers::create_handler,
        handlers::get_handler,
        handlers::update_handler,
        handlers::delete_handler,
        handlers::nearby_handler,
        handlers::health_handler,
    ),
    components(schemas(
        CreateAddress,
        UpdateAddress,
        AddressResponse,
        NearbyAddressResponse,
        ErrorResponse,
        HealthResponse,
    ))
)]
pub struct ApiDoc;

/// Serve the generated document as JSON
pub(crate) async fn document_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

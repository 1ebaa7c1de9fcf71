//! # Request Handlers
//!
//! The five address operations plus the health endpoint. Each handler
//! validates its input, performs one logical storage operation and maps
//! the result through a response schema.

use std::sync::Arc;

use axum::extract::{FromRequest, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use super::errors::{ApiError, ApiResult, ErrorResponse};
use super::schemas::{
    AddressResponse, CreateAddress, NearbyAddressResponse, NearbyParams, UpdateAddress,
};
use crate::geodesic;
use crate::storage::Storage;

/// JSON extractor that reports rejections through [`ApiError`], so
/// malformed bodies get the standard error body instead of axum's
/// plain-text defaults.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Create address handler
#[utoipa::path(
    post,
    path = "/addresses/",
    request_body = CreateAddress,
    responses(
        (status = 201, description = "Address created", body = AddressResponse),
        (status = 422, description = "Validation failure", body = ErrorResponse)
    )
)]
pub(crate) async fn create_handler(
    State(storage): State<Arc<Storage>>,
    AppJson(body): AppJson<CreateAddress>,
) -> ApiResult<(StatusCode, Json<AddressResponse>)> {
    body.validate()?;

    let record = storage.insert_address(body.into_record()).await?;
    info!(id = record.id, "created address");

    Ok((StatusCode::CREATED, Json(AddressResponse::from_record(record))))
}

/// Get single address handler
#[utoipa::path(
    get,
    path = "/addresses/{id}",
    params(("id" = i32, Path, description = "Address id")),
    responses(
        (status = 200, description = "The stored address", body = AddressResponse),
        (status = 404, description = "No address with this id", body = ErrorResponse)
    )
)]
pub(crate) async fn get_handler(
    State(storage): State<Arc<Storage>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<AddressResponse>> {
    let record = storage.fetch_address(id).await?.ok_or_else(|| {
        warn!(id, "read of missing address");
        ApiError::AddressNotFound
    })?;

    Ok(Json(AddressResponse::from_record(record)))
}

/// Partial update handler
#[utoipa::path(
    put,
    path = "/addresses/{id}",
    params(("id" = i32, Path, description = "Address id")),
    request_body = UpdateAddress,
    responses(
        (status = 200, description = "The updated address", body = AddressResponse),
        (status = 404, description = "No address with this id", body = ErrorResponse),
        (status = 422, description = "Validation failure", body = ErrorResponse)
    )
)]
pub(crate) async fn update_handler(
    State(storage): State<Arc<Storage>>,
    Path(id): Path<i32>,
    AppJson(body): AppJson<UpdateAddress>,
) -> ApiResult<Json<AddressResponse>> {
    body.validate()?;

    let existing = storage
        .fetch_address(id)
        .await?
        .ok_or(ApiError::AddressNotFound)?;
    let merged = body.merge_into(existing);

    // The row can vanish between fetch and write; that is still a 404.
    let updated = storage
        .update_address(merged)
        .await?
        .ok_or(ApiError::AddressNotFound)?;
    info!(id, "updated address");

    Ok(Json(AddressResponse::from_record(updated)))
}

/// Delete address handler
#[utoipa::path(
    delete,
    path = "/addresses/{id}",
    params(("id" = i32, Path, description = "Address id")),
    responses(
        (status = 204, description = "Deleted, or already absent")
    )
)]
pub(crate) async fn delete_handler(
    State(storage): State<Arc<Storage>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    if storage.delete_address(id).await? {
        info!(id, "deleted address");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Nearby search handler
#[utoipa::path(
    get,
    path = "/addresses/nearby/",
    params(NearbyParams),
    responses(
        (status = 200, description = "Addresses within the radius", body = [NearbyAddressResponse]),
        (status = 400, description = "Non-positive radius", body = ErrorResponse),
        (status = 404, description = "Nothing within the radius", body = ErrorResponse)
    )
)]
pub(crate) async fn nearby_handler(
    State(storage): State<Arc<Storage>>,
    Query(params): Query<NearbyParams>,
) -> ApiResult<Json<Vec<NearbyAddressResponse>>> {
    if params.distance_km <= 0.0 || params.distance_km.is_nan() {
        return Err(ApiError::NonPositiveRadius);
    }

    let center = (params.lat, params.lon);
    let mut nearby = Vec::new();
    for record in storage.list_addresses().await? {
        let distance = geodesic::distance_km(center, (record.latitude, record.longitude));
        if distance <= params.distance_km {
            nearby.push(NearbyAddressResponse::from_record(
                record,
                geodesic::round_km(distance),
            ));
        }
    }

    if nearby.is_empty() {
        info!(
            lat = params.lat,
            lon = params.lon,
            radius_km = params.distance_km,
            "nearby search matched nothing"
        );
        return Err(ApiError::NoNearbyAddresses {
            radius_km: params.distance_km,
        });
    }

    Ok(Json(nearby))
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check handler
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub(crate) async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

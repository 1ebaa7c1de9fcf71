//! # Wire Schemas
//!
//! Request and response shapes crossing the HTTP boundary, kept separate
//! from the persisted record. Explicit mapping functions convert at the
//! edge.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::errors::{ApiError, ApiResult};
use crate::storage::{entity, NewAddress};

/// Default nearby-search radius in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Body for creating an address; every field is required
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    /// Decimal degrees, -90 to 90
    pub latitude: f64,
    /// Decimal degrees, -180 to 180
    pub longitude: f64,
}

impl CreateAddress {
    /// Check the constraints the deserializer cannot express
    pub fn validate(&self) -> ApiResult<()> {
        validate_name(&self.name)?;
        validate_latitude(self.latitude)?;
        validate_longitude(self.longitude)?;
        Ok(())
    }

    /// Map into the record handed to storage
    pub fn into_record(self) -> NewAddress {
        NewAddress {
            name: self.name,
            street: self.street,
            city: self.city,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Body for a partial update; absent fields keep their stored values
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAddress {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl UpdateAddress {
    /// Check constraints for the fields present in the payload
    pub fn validate(&self) -> ApiResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(latitude) = self.latitude {
            validate_latitude(latitude)?;
        }
        if let Some(longitude) = self.longitude {
            validate_longitude(longitude)?;
        }
        Ok(())
    }

    /// Merge present fields over an existing record, producing the full
    /// record to write back. Present values always win, including falsy
    /// ones such as a latitude of 0.0.
    pub fn merge_into(self, existing: entity::Model) -> entity::Model {
        entity::Model {
            id: existing.id,
            name: self.name.unwrap_or(existing.name),
            street: self.street.unwrap_or(existing.street),
            city: self.city.unwrap_or(existing.city),
            latitude: self.latitude.unwrap_or(existing.latitude),
            longitude: self.longitude.unwrap_or(existing.longitude),
        }
    }
}

/// Stored address as returned by the CRUD endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddressResponse {
    pub id: i32,
    pub name: String,
    pub street: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl AddressResponse {
    /// Map a persisted record into the wire shape
    pub fn from_record(record: entity::Model) -> Self {
        Self {
            id: record.id,
            name: record.name,
            street: record.street,
            city: record.city,
            latitude: record.latitude,
            longitude: record.longitude,
        }
    }
}

/// Stored address plus its distance from the query point
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NearbyAddressResponse {
    pub id: i32,
    pub name: String,
    pub street: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Geodesic distance from the query point in km, rounded to 2 decimals
    pub distance_km: f64,
}

impl NearbyAddressResponse {
    /// Map a persisted record and its computed distance into the wire shape
    pub fn from_record(record: entity::Model, distance_km: f64) -> Self {
        Self {
            id: record.id,
            name: record.name,
            street: record.street,
            city: record.city,
            latitude: record.latitude,
            longitude: record.longitude,
            distance_km,
        }
    }
}

/// Query parameters for the nearby search
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyParams {
    /// Latitude of the search center in decimal degrees
    pub lat: f64,
    /// Longitude of the search center in decimal degrees
    pub lon: f64,
    /// Search radius in kilometers (default: 5)
    #[serde(default = "default_radius_km")]
    pub distance_km: f64,
}

fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

fn validate_name(name: &str) -> ApiResult<()> {
    if name.is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_latitude(value: f64) -> ApiResult<()> {
    if (-90.0..=90.0).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "latitude must be between -90 and 90, got {value}"
        )))
    }
}

fn validate_longitude(value: f64) -> ApiResult<()> {
    if (-180.0..=180.0).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "longitude must be between -180 and 180, got {value}"
        )))
    }
}

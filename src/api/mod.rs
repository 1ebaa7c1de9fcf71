//! # HTTP API for the address book
//!
//! Routes, handlers, wire schemas and errors for the service.
//!
//! # Endpoints
//!
//! - `POST /addresses/` - create
//! - `GET /addresses/{id}` - read
//! - `PUT /addresses/{id}` - partial update
//! - `DELETE /addresses/{id}` - delete (idempotent)
//! - `GET /addresses/nearby/` - geodesic radius search
//! - `GET /health`, `GET /openapi.json` - service plumbing

pub mod errors;
pub mod handlers;
pub mod openapi;
pub mod schemas;
pub mod server;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::ApiServer;

//! geobook - A geospatial address book HTTP API
//!
//! CRUD over address records stored in SQLite, plus a nearby search that
//! filters records by geodesic distance from a query point.

pub mod api;
pub mod cli;
pub mod config;
pub mod geodesic;
pub mod logging;
pub mod storage;

//! Pug API layer: endpoint table, parameter builders, HTTP client and
//! response models.

pub mod client;
pub mod endpoints;
pub mod models;
pub mod params;

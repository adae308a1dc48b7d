//! Municipal boundary validation.
//!
//! A submitted location is accepted when its postal code and colonia belong
//! to the municipal catalog and, when a boundary polygon is configured, its
//! coordinates fall inside (or exactly on) that boundary.

pub mod catalog;
pub mod models;
pub mod services;

pub use models::GeoFenceRule;
pub use services::GeoFenceValidator;

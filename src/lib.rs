//! Moderation and geofence reconciliation engine for the Ucú
//! points-of-interest directory.
//!
//! The crate validates submitted locations against the municipal boundary,
//! drives POIs through the moderation lifecycle
//! (pendiente → aprobado/rechazado, with resubmission), reconciles the
//! permission-scoped feeds into one de-duplicated view, and derives facet
//! counts and filtered subsets over it. Transport, authentication, storage,
//! and rendering live behind the `PoiStoreClient` collaborator.

pub mod core;
pub mod features;
pub mod shared;

pub use crate::core::error::{DirectoryError, Result};

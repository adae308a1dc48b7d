pub mod clients;
pub mod dtos;
pub mod models;
pub mod services;

pub use services::{
    FacetService, LifecycleService, PoiService, ReconciliationService,
};

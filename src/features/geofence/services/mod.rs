mod geo_fence_service;

pub use geo_fence_service::GeoFenceValidator;

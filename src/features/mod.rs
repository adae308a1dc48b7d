pub mod geofence;
pub mod pois;

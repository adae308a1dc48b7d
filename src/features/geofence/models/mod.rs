mod geo_fence_rule;

pub use geo_fence_rule::GeoFenceRule;

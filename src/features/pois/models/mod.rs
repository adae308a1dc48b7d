mod actor;
mod poi;

pub use actor::Actor;
pub use poi::{PoiCategory, PoiChanges, PoiDraft, PointOfInterest, ValidationStatus};

mod facet_service;
mod lifecycle_service;
mod poi_service;
mod reconciliation_service;

pub use facet_service::{DirectoryStats, FacetFilter, FacetService};
pub use lifecycle_service::{LifecycleService, TransitionEvent, TransitionPlan};
pub use poi_service::PoiService;
pub use reconciliation_service::{
    FeedSnapshot, FeedSource, ReconciledDirectory, ReconciliationService,
};

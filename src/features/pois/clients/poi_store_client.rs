use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::pois::models::{PoiChanges, PoiDraft, PointOfInterest};
use crate::features::pois::services::TransitionPlan;

/// The opaque persistence/network collaborator behind the directory.
///
/// Read operations return whole permission-scoped feeds; write operations
/// return the persisted record (or unit for delete). Implementations
/// translate transport-level failures into `DirectoryError` before the core
/// sees them: the core never interprets status codes. Records handed out by
/// a feed must satisfy `PointOfInterest::check_consistency`; `PoiService`
/// drops and logs any record that does not.
#[async_trait]
pub trait PoiStoreClient: Send + Sync {
    /// All records awaiting moderation (requires a moderation credential)
    async fn fetch_pending(&self) -> Result<Vec<PointOfInterest>>;

    /// All approved records (no credential)
    async fn fetch_public(&self) -> Result<Vec<PointOfInterest>>;

    /// The account's own records, including rejected ones
    async fn fetch_mine(&self, usuario_id: &str) -> Result<Vec<PointOfInterest>>;

    /// Persist a new record; the store assigns the id and the initial
    /// `pendiente` state
    async fn create(&self, draft: &PoiDraft) -> Result<PointOfInterest>;

    /// Apply partial field changes to an existing record
    async fn update(&self, id: Uuid, changes: &PoiChanges) -> Result<PointOfInterest>;

    /// Commit a validated lifecycle transition
    async fn transition(&self, id: Uuid, plan: &TransitionPlan) -> Result<PointOfInterest>;

    /// Remove a record from the directory (terminal, not a state change)
    async fn delete(&self, id: Uuid) -> Result<()>;
}

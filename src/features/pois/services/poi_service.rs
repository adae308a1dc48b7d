use std::sync::Arc;

use validator::Validate;

use crate::core::error::{DirectoryError, Result};
use crate::features::geofence::services::GeoFenceValidator;
use crate::features::pois::clients::PoiStoreClient;
use crate::features::pois::dtos::{CreatePoiDto, UpdatePoiDto};
use crate::features::pois::models::{Actor, PointOfInterest};
use crate::features::pois::services::{
    FeedSnapshot, FeedSource, LifecycleService, ReconciledDirectory, ReconciliationService,
    TransitionEvent,
};

/// Orchestrates the directory flows around the pure core: geofence-gated
/// submission, moderation, edits with automatic resubmission, deletion, and
/// assembly of the reconciled view.
///
/// All collaborator I/O happens strictly before or after the pure
/// computations. Callers keep the at-most-one-in-flight-mutation discipline
/// per record; a stale snapshot surfaces as `InvalidTransition` rather than
/// a silent double-apply.
pub struct PoiService {
    store: Arc<dyn PoiStoreClient>,
    geofence: GeoFenceValidator,
}

impl PoiService {
    pub fn new(store: Arc<dyn PoiStoreClient>, geofence: GeoFenceValidator) -> Self {
        Self { store, geofence }
    }

    /// Register a new POI. Field validation and the fence check both pass
    /// before the store is contacted; the record is created in `pendiente`.
    pub async fn submit(&self, actor: &Actor, dto: CreatePoiDto) -> Result<PointOfInterest> {
        dto.validate()
            .map_err(|e| DirectoryError::Validation(e.to_string()))?;

        self.geofence.validate_submission(
            &dto.codigo_postal,
            Some(&dto.colonia),
            Some((dto.latitud, dto.longitud)),
        )?;

        let draft = dto.into_draft(&actor.usuario_id);
        let poi = self.store.create(&draft).await?;

        tracing::info!("Created POI {} for user {}", poi.id, poi.usuario_id);
        Ok(poi)
    }

    /// Moderator accepts a pending record into the public directory.
    pub async fn approve(&self, actor: &Actor, poi: &PointOfInterest) -> Result<PointOfInterest> {
        Self::require_moderation_authority(actor)?;

        let plan = LifecycleService::plan(poi.estado_validacion, &TransitionEvent::Approve)?;
        let updated = self.store.transition(poi.id, &plan).await?;

        tracing::info!("POI {} approved by {}", poi.id, actor.usuario_id);
        Ok(updated)
    }

    /// Moderator turns a pending record down. The reason is required and is
    /// validated before any mutation is committed.
    pub async fn reject(
        &self,
        actor: &Actor,
        poi: &PointOfInterest,
        motivo: &str,
    ) -> Result<PointOfInterest> {
        Self::require_moderation_authority(actor)?;

        let event = TransitionEvent::Reject {
            motivo: motivo.to_string(),
        };
        let plan = LifecycleService::plan(poi.estado_validacion, &event)?;
        let updated = self.store.transition(poi.id, &plan).await?;

        tracing::info!(
            "POI {} rejected by {}: {:?}",
            poi.id,
            actor.usuario_id,
            plan.motivo_rechazo
        );
        Ok(updated)
    }

    /// Edit descriptive fields. Owners and moderators only; a coordinate
    /// change must pass the fence check again. Editing a rejected record
    /// sends it back to the moderation queue with its reason cleared.
    pub async fn edit(
        &self,
        actor: &Actor,
        poi: &PointOfInterest,
        dto: UpdatePoiDto,
    ) -> Result<PointOfInterest> {
        dto.validate()
            .map_err(|e| DirectoryError::Validation(e.to_string()))?;

        if !actor.can_manage(poi) {
            return Err(DirectoryError::Forbidden(
                "No tienes permiso para editar este POI".to_string(),
            ));
        }

        if let Some((lat, lon)) = dto.location_change()? {
            if !self.geofence.validate_point(lat, lon) {
                return Err(DirectoryError::InvalidGeography(
                    GeoFenceValidator::point_error_message(),
                ));
            }
        }

        // The edit is planned up front so an invalid lifecycle state fails
        // before any field change is persisted.
        let plan = LifecycleService::plan(poi.estado_validacion, &TransitionEvent::Edit)?;

        let changes = dto.into_changes();
        let updated = self.store.update(poi.id, &changes).await?;

        if plan.estado != poi.estado_validacion {
            let resubmitted = self.store.transition(poi.id, &plan).await?;
            tracing::info!(
                "POI {} resubmitted by {} after edit",
                poi.id,
                actor.usuario_id
            );
            return Ok(resubmitted);
        }

        tracing::info!("POI {} updated by {}", poi.id, actor.usuario_id);
        Ok(updated)
    }

    /// Remove a record from the directory. Owners and moderators only.
    pub async fn delete(&self, actor: &Actor, poi: &PointOfInterest) -> Result<()> {
        if !actor.can_manage(poi) {
            return Err(DirectoryError::Forbidden(
                "No tienes permiso para eliminar este POI".to_string(),
            ));
        }

        self.store.delete(poi.id).await?;
        tracing::info!("POI {} deleted by {}", poi.id, actor.usuario_id);
        Ok(())
    }

    /// Assemble the reconciled directory view for `viewer`.
    ///
    /// The moderation feed is fetched only for moderators. Feed failures
    /// degrade to a partial result; records violating the model invariants
    /// are dropped at this boundary.
    pub async fn load_directory(&self, viewer: &Actor) -> ReconciledDirectory {
        let mut feeds = Vec::with_capacity(3);

        if viewer.moderation_authority {
            feeds.push(Self::snapshot(
                FeedSource::Pending,
                self.store.fetch_pending().await,
            ));
        }
        feeds.push(Self::snapshot(
            FeedSource::Public,
            self.store.fetch_public().await,
        ));
        feeds.push(Self::snapshot(
            FeedSource::Mine,
            self.store.fetch_mine(&viewer.usuario_id).await,
        ));

        ReconciliationService::reconcile(feeds)
    }

    fn snapshot(source: FeedSource, fetched: Result<Vec<PointOfInterest>>) -> FeedSnapshot {
        match fetched {
            Ok(mut records) => {
                records.retain(|poi| match poi.check_consistency() {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!("Dropping inconsistent record from feed: {}", e);
                        false
                    }
                });
                FeedSnapshot::loaded(source, records)
            }
            Err(e) => FeedSnapshot::failed(source, e.to_string()),
        }
    }

    fn require_moderation_authority(actor: &Actor) -> Result<()> {
        if !actor.moderation_authority {
            return Err(DirectoryError::Forbidden(
                "Solo admins y supervisores pueden validar POIs".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::geofence::models::GeoFenceRule;
    use crate::features::pois::models::{PoiCategory, ValidationStatus};
    use crate::shared::test_helpers::{init_tracing, sample_poi, InMemoryPoiStore};

    fn service_with(store: Arc<InMemoryPoiStore>) -> PoiService {
        PoiService::new(store, GeoFenceValidator::new(GeoFenceRule::default()))
    }

    fn create_dto() -> CreatePoiDto {
        CreatePoiDto {
            nombre: "Panadería La Espiga".to_string(),
            categoria: PoiCategory::Tienda,
            direccion: "Calle 22 x 19 y 21, Centro".to_string(),
            descripcion: None,
            codigo_postal: "97357".to_string(),
            colonia: "Centro".to_string(),
            latitud: 21.0317,
            longitud: -89.7464,
            foto_url: None,
        }
    }

    #[tokio::test]
    async fn test_submit_creates_pending_record() {
        let store = Arc::new(InMemoryPoiStore::default());
        let service = service_with(store.clone());
        let owner = Actor::new("owner-1", false);

        let poi = service.submit(&owner, create_dto()).await.unwrap();
        assert_eq!(poi.estado_validacion, ValidationStatus::Pendiente);
        assert_eq!(poi.usuario_id, "owner-1");
        assert_eq!(poi.motivo_rechazo, None);
    }

    #[tokio::test]
    async fn test_submit_rejects_foreign_postal_code_before_store() {
        let store = Arc::new(InMemoryPoiStore::default());
        let service = service_with(store.clone());
        let owner = Actor::new("owner-1", false);

        let mut dto = create_dto();
        dto.codigo_postal = "97000".to_string(); // Mérida, not Ucú

        let err = service.submit(&owner, dto).await.unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidGeography(_)));
        assert!(store.all().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_fields() {
        let store = Arc::new(InMemoryPoiStore::default());
        let service = service_with(store);
        let owner = Actor::new("owner-1", false);

        let mut dto = create_dto();
        dto.nombre = String::new();

        let err = service.submit(&owner, dto).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Validation(_)));
    }

    #[tokio::test]
    async fn test_approve_requires_moderation_authority() {
        let store = Arc::new(InMemoryPoiStore::default());
        let service = service_with(store);
        let poi = sample_poi(ValidationStatus::Pendiente);

        let citizen = Actor::new("user-1", false);
        let err = service.approve(&citizen, &poi).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_reject_without_reason_leaves_record_untouched() {
        let store = Arc::new(InMemoryPoiStore::default());
        let service = service_with(store.clone());
        let moderator = Actor::new("mod-1", true);

        let owner = Actor::new("owner-1", false);
        let poi = service.submit(&owner, create_dto()).await.unwrap();

        let err = service.reject(&moderator, &poi, "   ").await.unwrap_err();
        assert!(matches!(err, DirectoryError::MissingRejectionReason));
        assert_eq!(
            store.get(poi.id).unwrap().estado_validacion,
            ValidationStatus::Pendiente
        );
    }

    #[tokio::test]
    async fn test_stale_snapshot_surfaces_as_invalid_transition() {
        let store = Arc::new(InMemoryPoiStore::default());
        let service = service_with(store.clone());
        let moderator = Actor::new("mod-1", true);

        let owner = Actor::new("owner-1", false);
        let poi = service.submit(&owner, create_dto()).await.unwrap();

        let approved = service.approve(&moderator, &poi).await.unwrap();
        assert_eq!(approved.estado_validacion, ValidationStatus::Aprobado);

        // Second approve against the already-approved snapshot
        let err = service.approve(&moderator, &approved).await.unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_edit_by_stranger_is_forbidden() {
        let store = Arc::new(InMemoryPoiStore::default());
        let service = service_with(store);
        let mut poi = sample_poi(ValidationStatus::Aprobado);
        poi.usuario_id = "owner-1".to_string();

        let stranger = Actor::new("user-9", false);
        let err = service
            .edit(&stranger, &poi, UpdatePoiDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_edit_with_out_of_fence_coordinates_is_rejected() {
        let store = Arc::new(InMemoryPoiStore::default());
        let service = service_with(store.clone());
        let owner = Actor::new("owner-1", false);
        let poi = service.submit(&owner, create_dto()).await.unwrap();

        let dto = UpdatePoiDto {
            latitud: Some(20.9674),
            longitud: Some(-89.5926),
            ..Default::default()
        };
        let err = service.edit(&owner, &poi, dto).await.unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidGeography(_)));
    }

    #[tokio::test]
    async fn test_full_moderation_round_trip() {
        init_tracing();
        let store = Arc::new(InMemoryPoiStore::default());
        let service = service_with(store.clone());
        let owner = Actor::new("owner-1", false);
        let moderator = Actor::new("mod-1", true);

        // Submit with valid Ucú geography
        let poi = service.submit(&owner, create_dto()).await.unwrap();
        assert_eq!(poi.estado_validacion, ValidationStatus::Pendiente);

        // Moderator rejects with a reason
        let rejected = service
            .reject(&moderator, &poi, "Listado duplicado")
            .await
            .unwrap();
        assert_eq!(rejected.estado_validacion, ValidationStatus::Rechazado);
        assert_eq!(rejected.motivo_rechazo.as_deref(), Some("Listado duplicado"));

        // Owner edits; the record returns to the moderation queue
        let dto = UpdatePoiDto {
            descripcion: Some("Horario corrido de 7 a 21".to_string()),
            ..Default::default()
        };
        let resubmitted = service.edit(&owner, &rejected, dto).await.unwrap();
        assert_eq!(resubmitted.estado_validacion, ValidationStatus::Pendiente);
        assert_eq!(resubmitted.motivo_rechazo, None);

        // Moderator approves
        let approved = service.approve(&moderator, &resubmitted).await.unwrap();
        assert_eq!(approved.estado_validacion, ValidationStatus::Aprobado);
        assert_eq!(approved.motivo_rechazo, None);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = Arc::new(InMemoryPoiStore::default());
        let service = service_with(store.clone());
        let owner = Actor::new("owner-1", false);

        let poi = service.submit(&owner, create_dto()).await.unwrap();
        service.delete(&owner, &poi).await.unwrap();
        assert!(store.get(poi.id).is_none());
    }

    #[tokio::test]
    async fn test_load_directory_scopes_feeds_by_viewer() {
        let store = Arc::new(InMemoryPoiStore::default());
        let service = service_with(store.clone());
        let owner = Actor::new("owner-1", false);
        let moderator = Actor::new("mod-1", true);

        let mine = service.submit(&owner, create_dto()).await.unwrap();
        let other = {
            let other_owner = Actor::new("owner-2", false);
            let mut dto = create_dto();
            dto.nombre = "Molino San José".to_string();
            service.submit(&other_owner, dto).await.unwrap()
        };
        service.approve(&moderator, &other).await.unwrap();

        // The owner sees the public record plus their own pending one
        let view = service.load_directory(&owner).await;
        assert!(!view.is_partial());
        let ids: Vec<_> = view.pois.iter().map(|p| p.id).collect();
        assert!(ids.contains(&mine.id));
        assert!(ids.contains(&other.id));

        // A stranger without moderation authority sees only the public feed
        let stranger = Actor::new("user-9", false);
        let view = service.load_directory(&stranger).await;
        let ids: Vec<_> = view.pois.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![other.id]);
    }

    #[tokio::test]
    async fn test_load_directory_degrades_on_feed_failure() {
        init_tracing();
        let store = Arc::new(InMemoryPoiStore::default());
        store.fail_feed(FeedSource::Pending);
        let service = service_with(store.clone());

        let owner = Actor::new("owner-1", false);
        let poi = service.submit(&owner, create_dto()).await.unwrap();

        let moderator = Actor::new("mod-1", true);
        let view = service.load_directory(&moderator).await;
        assert!(view.is_partial());
        assert_eq!(view.failed_sources, vec![FeedSource::Pending]);
        // The pending submission is only reachable through the failed feed
        assert!(!view.pois.iter().any(|p| p.id == poi.id));

        // The owner still sees it through the 'mine' feed
        let owner_view = service.load_directory(&owner).await;
        assert!(owner_view.pois.iter().any(|p| p.id == poi.id));
    }

    #[tokio::test]
    async fn test_load_directory_drops_inconsistent_records() {
        let store = Arc::new(InMemoryPoiStore::default());
        let mut bad = sample_poi(ValidationStatus::Rechazado);
        bad.motivo_rechazo = None; // violates the model invariant
        bad.usuario_id = "owner-1".to_string();
        store.insert_raw(bad.clone());

        let service = service_with(store);
        let owner = Actor::new("owner-1", false);
        let view = service.load_directory(&owner).await;
        assert!(!view.pois.iter().any(|p| p.id == bad.id));
    }
}

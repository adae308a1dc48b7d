use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use fake::faker::company::en::CompanyName;
use fake::Fake;
use uuid::Uuid;

use crate::core::error::{DirectoryError, Result};
use crate::features::pois::clients::PoiStoreClient;
use crate::features::pois::models::{
    PoiCategory, PoiChanges, PoiDraft, PointOfInterest, ValidationStatus,
};
use crate::features::pois::services::{FeedSource, TransitionPlan};

/// Initialize tracing output for a test run; repeated calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Build a consistent record in the requested state, with generated name
/// and id. Rejected fixtures carry a reason so they satisfy
/// `check_consistency` out of the box.
pub fn sample_poi(estado: ValidationStatus) -> PointOfInterest {
    let nombre: String = CompanyName().fake();
    let motivo_rechazo = match estado {
        ValidationStatus::Rechazado => Some("No cumple los requisitos del directorio".to_string()),
        _ => None,
    };
    PointOfInterest {
        id: Uuid::new_v4(),
        nombre,
        categoria: PoiCategory::Otro,
        direccion: format!("Calle {} x 19 y 21, Centro", (18..30).fake::<u8>()),
        descripcion: None,
        latitud: 21.0317,
        longitud: -89.7464,
        foto_url: None,
        usuario_id: "test-user".to_string(),
        estado_validacion: estado,
        motivo_rechazo,
    }
}

/// In-memory `PoiStoreClient` double for service tests. Feeds can be forced
/// to fail to exercise partial reconciliation.
#[derive(Default)]
pub struct InMemoryPoiStore {
    pois: Mutex<Vec<PointOfInterest>>,
    failing_feeds: Mutex<HashSet<FeedSource>>,
}

impl InMemoryPoiStore {
    pub fn all(&self) -> Vec<PointOfInterest> {
        self.pois.lock().unwrap().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<PointOfInterest> {
        self.pois.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    /// Seed a record as-is, bypassing the create flow.
    pub fn insert_raw(&self, poi: PointOfInterest) {
        self.pois.lock().unwrap().push(poi);
    }

    /// Make the given feed return a store failure on fetch.
    pub fn fail_feed(&self, source: FeedSource) {
        self.failing_feeds.lock().unwrap().insert(source);
    }

    fn check_feed(&self, source: FeedSource) -> Result<()> {
        if self.failing_feeds.lock().unwrap().contains(&source) {
            return Err(DirectoryError::Store(format!(
                "feed '{source}' unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PoiStoreClient for InMemoryPoiStore {
    async fn fetch_pending(&self) -> Result<Vec<PointOfInterest>> {
        self.check_feed(FeedSource::Pending)?;
        Ok(self
            .all()
            .into_iter()
            .filter(|p| p.estado_validacion == ValidationStatus::Pendiente)
            .collect())
    }

    async fn fetch_public(&self) -> Result<Vec<PointOfInterest>> {
        self.check_feed(FeedSource::Public)?;
        Ok(self
            .all()
            .into_iter()
            .filter(|p| p.estado_validacion == ValidationStatus::Aprobado)
            .collect())
    }

    async fn fetch_mine(&self, usuario_id: &str) -> Result<Vec<PointOfInterest>> {
        self.check_feed(FeedSource::Mine)?;
        Ok(self
            .all()
            .into_iter()
            .filter(|p| p.usuario_id == usuario_id)
            .collect())
    }

    async fn create(&self, draft: &PoiDraft) -> Result<PointOfInterest> {
        let poi = PointOfInterest {
            id: Uuid::new_v4(),
            nombre: draft.nombre.clone(),
            categoria: draft.categoria,
            direccion: draft.direccion.clone(),
            descripcion: draft.descripcion.clone(),
            latitud: draft.latitud,
            longitud: draft.longitud,
            foto_url: draft.foto_url.clone(),
            usuario_id: draft.usuario_id.clone(),
            estado_validacion: ValidationStatus::Pendiente,
            motivo_rechazo: None,
        };
        self.pois.lock().unwrap().push(poi.clone());
        Ok(poi)
    }

    async fn update(&self, id: Uuid, changes: &PoiChanges) -> Result<PointOfInterest> {
        let mut pois = self.pois.lock().unwrap();
        let poi = pois
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DirectoryError::NotFound(format!("POI {id} not found")))?;

        if let Some(nombre) = &changes.nombre {
            poi.nombre = nombre.clone();
        }
        if let Some(categoria) = changes.categoria {
            poi.categoria = categoria;
        }
        if let Some(direccion) = &changes.direccion {
            poi.direccion = direccion.clone();
        }
        if let Some(descripcion) = &changes.descripcion {
            poi.descripcion = Some(descripcion.clone());
        }
        if let Some(latitud) = changes.latitud {
            poi.latitud = latitud;
        }
        if let Some(longitud) = changes.longitud {
            poi.longitud = longitud;
        }
        if let Some(foto_url) = &changes.foto_url {
            poi.foto_url = Some(foto_url.clone());
        }
        Ok(poi.clone())
    }

    async fn transition(&self, id: Uuid, plan: &TransitionPlan) -> Result<PointOfInterest> {
        let mut pois = self.pois.lock().unwrap();
        let poi = pois
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DirectoryError::NotFound(format!("POI {id} not found")))?;

        poi.estado_validacion = plan.estado;
        poi.motivo_rechazo = plan.motivo_rechazo.clone();
        Ok(poi.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut pois = self.pois.lock().unwrap();
        let before = pois.len();
        pois.retain(|p| p.id != id);
        if pois.len() == before {
            return Err(DirectoryError::NotFound(format!("POI {id} not found")));
        }
        Ok(())
    }
}

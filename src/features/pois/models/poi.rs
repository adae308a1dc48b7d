use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::{DirectoryError, Result};

/// POI category enum matching the directory's closed catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiCategory {
    Restaurante,
    Tienda,
    Servicio,
    Salud,
    Educacion,
    Entretenimiento,
    Otro,
}

impl PoiCategory {
    pub const ALL: [PoiCategory; 7] = [
        PoiCategory::Restaurante,
        PoiCategory::Tienda,
        PoiCategory::Servicio,
        PoiCategory::Salud,
        PoiCategory::Educacion,
        PoiCategory::Entretenimiento,
        PoiCategory::Otro,
    ];

    /// Display label for facet buttons and map popups
    pub fn label(&self) -> &'static str {
        match self {
            PoiCategory::Restaurante => "Restaurante",
            PoiCategory::Tienda => "Tienda",
            PoiCategory::Servicio => "Servicio",
            PoiCategory::Salud => "Salud",
            PoiCategory::Educacion => "Educación",
            PoiCategory::Entretenimiento => "Entretenimiento",
            PoiCategory::Otro => "Otro",
        }
    }

    /// Marker color used by the map collaborator
    pub fn marker_color(&self) -> &'static str {
        match self {
            PoiCategory::Restaurante => "#EF4444",
            PoiCategory::Tienda => "#10B981",
            PoiCategory::Servicio => "#F59E0B",
            PoiCategory::Salud => "#DC2626",
            PoiCategory::Educacion => "#7C3AED",
            PoiCategory::Entretenimiento => "#DB2777",
            PoiCategory::Otro => "#6B7280",
        }
    }
}

impl std::fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoiCategory::Restaurante => write!(f, "restaurante"),
            PoiCategory::Tienda => write!(f, "tienda"),
            PoiCategory::Servicio => write!(f, "servicio"),
            PoiCategory::Salud => write!(f, "salud"),
            PoiCategory::Educacion => write!(f, "educacion"),
            PoiCategory::Entretenimiento => write!(f, "entretenimiento"),
            PoiCategory::Otro => write!(f, "otro"),
        }
    }
}

/// Validation status enum matching the moderation workflow states
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Pendiente,
    Aprobado,
    Rechazado,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationStatus::Pendiente => write!(f, "pendiente"),
            ValidationStatus::Aprobado => write!(f, "aprobado"),
            ValidationStatus::Rechazado => write!(f, "rechazado"),
        }
    }
}

/// A point of interest as persisted by the store collaborator.
///
/// This struct is the at-rest/wire shape: serde rejects unknown `categoria`
/// and `estado_validacion` values at the boundary, and `motivo_rechazo` is
/// omitted from serialized output unless present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: Uuid,
    pub nombre: String,
    pub categoria: PoiCategory,
    pub direccion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub latitud: f64,
    pub longitud: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto_url: Option<String>,
    pub usuario_id: String,
    pub estado_validacion: ValidationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo_rechazo: Option<String>,
}

impl PointOfInterest {
    /// Verify the status/rejection-reason invariants on a record arriving
    /// from a feed. Store adapters call this before records reach the core.
    pub fn check_consistency(&self) -> Result<()> {
        match self.estado_validacion {
            ValidationStatus::Rechazado => {
                let motivo_presente = self
                    .motivo_rechazo
                    .as_deref()
                    .is_some_and(|m| !m.trim().is_empty());
                if !motivo_presente {
                    return Err(DirectoryError::Validation(format!(
                        "POI {} está rechazado sin motivo de rechazo",
                        self.id
                    )));
                }
            }
            ValidationStatus::Pendiente | ValidationStatus::Aprobado => {
                if self.motivo_rechazo.is_some() {
                    return Err(DirectoryError::Validation(format!(
                        "POI {} en estado '{}' conserva un motivo de rechazo",
                        self.id, self.estado_validacion
                    )));
                }
            }
        }
        if !self.latitud.is_finite() || !self.longitud.is_finite() {
            return Err(DirectoryError::Validation(format!(
                "POI {} tiene coordenadas no finitas",
                self.id
            )));
        }
        Ok(())
    }

    /// Case-insensitive substring match over name and address.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.nombre.to_lowercase().contains(&term)
            || self.direccion.to_lowercase().contains(&term)
    }

    pub fn is_owned_by(&self, usuario_id: &str) -> bool {
        self.usuario_id == usuario_id
    }
}

/// Data for creating a new POI. The store assigns the id and the initial
/// `pendiente` state.
#[derive(Debug, Clone, Serialize)]
pub struct PoiDraft {
    pub nombre: String,
    pub categoria: PoiCategory,
    pub direccion: String,
    pub descripcion: Option<String>,
    pub latitud: f64,
    pub longitud: f64,
    pub foto_url: Option<String>,
    pub usuario_id: String,
}

/// Partial field changes for an edit. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PoiChanges {
    pub nombre: Option<String>,
    pub categoria: Option<PoiCategory>,
    pub direccion: Option<String>,
    pub descripcion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub foto_url: Option<String>,
}

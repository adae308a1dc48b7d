use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::error::{DirectoryError, Result};
use crate::features::pois::models::{PoiCategory, PoiChanges, PoiDraft, ValidationStatus};
use crate::features::pois::services::TransitionEvent;
use crate::shared::validation::POSTAL_CODE_REGEX;

/// Request DTO for registering a new POI.
///
/// `codigo_postal` and `colonia` exist to feed the geofence check at
/// creation time; the stored record keeps only the free-text `direccion`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePoiDto {
    #[validate(length(min = 1, max = 200, message = "El nombre es obligatorio"))]
    pub nombre: String,

    pub categoria: PoiCategory,

    #[validate(length(min = 1, max = 500, message = "La dirección es obligatoria"))]
    pub direccion: String,

    #[validate(length(max = 2000))]
    pub descripcion: Option<String>,

    #[validate(regex(
        path = *POSTAL_CODE_REGEX,
        message = "El código postal debe tener 5 dígitos"
    ))]
    pub codigo_postal: String,

    #[validate(length(min = 1, max = 100, message = "La colonia es obligatoria"))]
    pub colonia: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitud fuera de rango"))]
    pub latitud: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitud fuera de rango"))]
    pub longitud: f64,

    #[validate(length(min = 1, max = 500))]
    pub foto_url: Option<String>,
}

impl CreatePoiDto {
    /// Build the store payload once validation and the fence check passed.
    pub fn into_draft(self, usuario_id: &str) -> PoiDraft {
        PoiDraft {
            nombre: self.nombre,
            categoria: self.categoria,
            direccion: self.direccion,
            descripcion: self.descripcion,
            latitud: self.latitud,
            longitud: self.longitud,
            foto_url: self.foto_url,
            usuario_id: usuario_id.to_string(),
        }
    }
}

/// Request DTO for editing descriptive fields. All fields optional; omitted
/// fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePoiDto {
    #[validate(length(min = 1, max = 200))]
    pub nombre: Option<String>,

    pub categoria: Option<PoiCategory>,

    #[validate(length(min = 1, max = 500))]
    pub direccion: Option<String>,

    #[validate(length(max = 2000))]
    pub descripcion: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitud: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitud: Option<f64>,

    #[validate(length(min = 1, max = 500))]
    pub foto_url: Option<String>,
}

impl UpdatePoiDto {
    /// A location change carries both coordinates; the fence precondition
    /// cannot be evaluated on half a coordinate.
    pub fn location_change(&self) -> Result<Option<(f64, f64)>> {
        match (self.latitud, self.longitud) {
            (Some(lat), Some(lon)) => Ok(Some((lat, lon))),
            (None, None) => Ok(None),
            _ => Err(DirectoryError::Validation(
                "Un cambio de ubicación requiere latitud y longitud".to_string(),
            )),
        }
    }

    pub fn into_changes(self) -> PoiChanges {
        PoiChanges {
            nombre: self.nombre,
            categoria: self.categoria,
            direccion: self.direccion,
            descripcion: self.descripcion,
            latitud: self.latitud,
            longitud: self.longitud,
            foto_url: self.foto_url,
        }
    }
}

/// Request DTO for a moderation decision: the target state plus, when
/// rejecting, the reason shown to the owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeratePoiDto {
    pub estado: ValidationStatus,
    pub motivo: Option<String>,
}

impl ModeratePoiDto {
    /// Translate the decision into a lifecycle event. Requesting `pendiente`
    /// is not a moderation decision (only the owner resubmits).
    pub fn into_event(self) -> Result<TransitionEvent> {
        match self.estado {
            ValidationStatus::Aprobado => Ok(TransitionEvent::Approve),
            ValidationStatus::Rechazado => Ok(TransitionEvent::Reject {
                motivo: self.motivo.unwrap_or_default(),
            }),
            ValidationStatus::Pendiente => Err(DirectoryError::Validation(
                "Un POI vuelve a 'pendiente' solo cuando su dueño lo reenvía".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create_dto() -> CreatePoiDto {
        CreatePoiDto {
            nombre: "Cocina Económica Doña Mary".to_string(),
            categoria: PoiCategory::Restaurante,
            direccion: "Calle 20 x 15 y 17, Centro".to_string(),
            descripcion: Some("Comida yucateca casera".to_string()),
            codigo_postal: "97357".to_string(),
            colonia: "Centro".to_string(),
            latitud: 21.0317,
            longitud: -89.7464,
            foto_url: None,
        }
    }

    #[test]
    fn test_create_dto_accepts_valid_input() {
        assert!(valid_create_dto().validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_empty_name() {
        let mut dto = valid_create_dto();
        dto.nombre = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_rejects_malformed_postal_code() {
        for cp in ["9735", "973571", "97-35", "abcde"] {
            let mut dto = valid_create_dto();
            dto.codigo_postal = cp.to_string();
            assert!(dto.validate().is_err(), "expected '{cp}' to be rejected");
        }
    }

    #[test]
    fn test_create_dto_rejects_out_of_range_coordinates() {
        let mut dto = valid_create_dto();
        dto.latitud = 91.0;
        assert!(dto.validate().is_err());

        let mut dto = valid_create_dto();
        dto.longitud = f64::NAN;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_dto_requires_both_coordinates() {
        let dto = UpdatePoiDto {
            latitud: Some(21.03),
            ..Default::default()
        };
        assert!(dto.location_change().is_err());

        let dto = UpdatePoiDto {
            latitud: Some(21.03),
            longitud: Some(-89.74),
            ..Default::default()
        };
        assert_eq!(dto.location_change().unwrap(), Some((21.03, -89.74)));

        assert_eq!(UpdatePoiDto::default().location_change().unwrap(), None);
    }

    #[test]
    fn test_moderate_dto_maps_to_lifecycle_events() {
        let approve = ModeratePoiDto {
            estado: ValidationStatus::Aprobado,
            motivo: None,
        };
        assert_eq!(approve.into_event().unwrap(), TransitionEvent::Approve);

        let reject = ModeratePoiDto {
            estado: ValidationStatus::Rechazado,
            motivo: Some("Listado duplicado".to_string()),
        };
        assert_eq!(
            reject.into_event().unwrap(),
            TransitionEvent::Reject {
                motivo: "Listado duplicado".to_string()
            }
        );

        let pending = ModeratePoiDto {
            estado: ValidationStatus::Pendiente,
            motivo: None,
        };
        assert!(pending.into_event().is_err());
    }
}

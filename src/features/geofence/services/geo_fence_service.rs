use crate::core::error::{DirectoryError, Result};
use crate::features::geofence::models::GeoFenceRule;

/// Tolerance for treating a coordinate as lying on a boundary edge
const BOUNDARY_EPSILON: f64 = 1e-9;

/// Service for validating submitted locations against the municipal boundary.
///
/// All checks are pure functions over the configured `GeoFenceRule`; they
/// return booleans and never fail. The creation flow turns a `false` into a
/// user-facing rejection through `validate_submission`.
pub struct GeoFenceValidator {
    rule: GeoFenceRule,
}

impl GeoFenceValidator {
    pub fn new(rule: GeoFenceRule) -> Self {
        Self { rule }
    }

    /// Membership check against the postal-code catalog.
    ///
    /// Surrounding whitespace is trimmed; no other normalization. Callers
    /// must not rely on prefix or partial matches.
    pub fn validate_postal_code(&self, code: &str) -> bool {
        self.rule.contains_postal_code(code.trim())
    }

    /// Exact, case-sensitive membership check against the colonia catalog.
    ///
    /// No trimming: the catalog is closed and curated, and a false positive
    /// from normalization is worse than forcing exact-match entry.
    pub fn validate_district(&self, name: &str) -> bool {
        self.rule.contains_colonia(name)
    }

    /// Point-in-polygon check against the configured boundary.
    ///
    /// A point exactly on the boundary counts as inside, so edge-of-town
    /// locations are not spuriously rejected. Accepts every point when no
    /// polygon is configured (the administrative catalogs remain the gate).
    pub fn validate_point(&self, lat: f64, lon: f64) -> bool {
        if !lat.is_finite() || !lon.is_finite() {
            return false;
        }
        match self.rule.limite() {
            Some(polygon) => Self::contains_point(polygon, lat, lon),
            None => true,
        }
    }

    /// Full fence check for the creation flow: postal code, colonia when
    /// provided, and coordinates when provided. Returns the deterministic
    /// user-facing message for the first failing check.
    pub fn validate_submission(
        &self,
        codigo_postal: &str,
        colonia: Option<&str>,
        point: Option<(f64, f64)>,
    ) -> Result<()> {
        if !self.validate_postal_code(codigo_postal) {
            return Err(DirectoryError::InvalidGeography(
                self.postal_code_error_message(),
            ));
        }
        if let Some(name) = colonia {
            if !self.validate_district(name) {
                return Err(DirectoryError::InvalidGeography(
                    Self::district_error_message(),
                ));
            }
        }
        if let Some((lat, lon)) = point {
            if !self.validate_point(lat, lon) {
                return Err(DirectoryError::InvalidGeography(
                    Self::point_error_message(),
                ));
            }
        }
        Ok(())
    }

    /// "must be one of {list}" message, with the catalog listed in sorted
    /// order so the text is stable across runs.
    pub fn postal_code_error_message(&self) -> String {
        format!(
            "El código postal debe ser {}",
            self.rule.codigos_postales_ordenados().join(" o ")
        )
    }

    pub fn district_error_message() -> String {
        "Colonia no reconocida para este municipio".to_string()
    }

    pub fn point_error_message() -> String {
        "Las coordenadas no están dentro de los límites del municipio".to_string()
    }

    /// Ray casting over the ordered vertex list, boundary-inclusive.
    fn contains_point(polygon: &[(f64, f64)], lat: f64, lon: f64) -> bool {
        let n = polygon.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (lat_i, lon_i) = polygon[i];
            let (lat_j, lon_j) = polygon[j];

            if Self::on_segment((lat_i, lon_i), (lat_j, lon_j), (lat, lon)) {
                return true;
            }

            // Cast the ray along the latitude axis, crossing edges that
            // straddle the point's longitude.
            let crosses = (lon_i > lon) != (lon_j > lon)
                && lat < (lat_j - lat_i) * (lon - lon_i) / (lon_j - lon_i) + lat_i;
            if crosses {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    fn on_segment(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> bool {
        let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
        if cross.abs() > BOUNDARY_EPSILON {
            return false;
        }
        let within_lat = p.0 >= a.0.min(b.0) - BOUNDARY_EPSILON && p.0 <= a.0.max(b.0) + BOUNDARY_EPSILON;
        let within_lon = p.1 >= a.1.min(b.1) - BOUNDARY_EPSILON && p.1 <= a.1.max(b.1) + BOUNDARY_EPSILON;
        within_lat && within_lon
    }
}

use std::collections::HashSet;

use crate::features::geofence::catalog::{CODIGOS_POSTALES_UCU, COLONIAS_UCU, LIMITE_UCU};

/// Municipal boundary definition: the administrative catalogs a submitted
/// location is checked against, plus an optional boundary polygon for
/// coordinate checks.
#[derive(Debug, Clone)]
pub struct GeoFenceRule {
    codigos_postales_validos: HashSet<String>,
    colonias_validas: HashSet<String>,
    limite: Option<Vec<(f64, f64)>>,
}

impl GeoFenceRule {
    pub fn new<C, D>(codigos_postales: C, colonias: D, limite: Option<Vec<(f64, f64)>>) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            codigos_postales_validos: codigos_postales.into_iter().map(Into::into).collect(),
            colonias_validas: colonias.into_iter().map(Into::into).collect(),
            limite,
        }
    }

    pub fn contains_postal_code(&self, code: &str) -> bool {
        self.codigos_postales_validos.contains(code)
    }

    pub fn contains_colonia(&self, name: &str) -> bool {
        self.colonias_validas.contains(name)
    }

    pub fn limite(&self) -> Option<&[(f64, f64)]> {
        self.limite.as_deref()
    }

    /// Valid postal codes in sorted order, for deterministic user-facing
    /// messages.
    pub fn codigos_postales_ordenados(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .codigos_postales_validos
            .iter()
            .map(String::as_str)
            .collect();
        codes.sort_unstable();
        codes
    }
}

impl Default for GeoFenceRule {
    /// The Ucú catalog (see `catalog`).
    fn default() -> Self {
        Self::new(CODIGOS_POSTALES_UCU, COLONIAS_UCU, Some(LIMITE_UCU.to_vec()))
    }
}

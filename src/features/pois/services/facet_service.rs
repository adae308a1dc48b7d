use std::collections::BTreeMap;

use serde::Serialize;

use crate::features::pois::models::{PoiCategory, PointOfInterest, ValidationStatus};

/// Filter criteria over a reconciled set. Predicates combine with logical
/// AND; an empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct FacetFilter {
    pub estado: Option<ValidationStatus>,
    pub categoria: Option<PoiCategory>,
    /// Case-insensitive substring over nombre and direccion
    pub search: Option<String>,
}

impl FacetFilter {
    fn matches(&self, poi: &PointOfInterest) -> bool {
        if let Some(estado) = self.estado {
            if poi.estado_validacion != estado {
                return false;
            }
        }
        if let Some(categoria) = self.categoria {
            if poi.categoria != categoria {
                return false;
            }
        }
        if let Some(term) = self.search.as_deref() {
            if !poi.matches_search(term) {
                return false;
            }
        }
        true
    }
}

/// Directory summary for the moderation dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryStats {
    pub total: usize,
    pub pendientes: usize,
    pub aprobados: usize,
    pub rechazados: usize,
    pub por_categoria: BTreeMap<PoiCategory, usize>,
}

/// Derives filtered subsets and facet counts over a reconciled set.
///
/// Counts are always computed over the set handed in, so they stay
/// consistent with what the facet buttons filter.
pub struct FacetService;

impl FacetService {
    /// New snapshot containing the records matching `filter`, in the
    /// reconciled order.
    pub fn filter(pois: &[PointOfInterest], filter: &FacetFilter) -> Vec<PointOfInterest> {
        pois.iter()
            .filter(|poi| filter.matches(poi))
            .cloned()
            .collect()
    }

    pub fn category_counts(pois: &[PointOfInterest]) -> BTreeMap<PoiCategory, usize> {
        let mut counts = BTreeMap::new();
        for poi in pois {
            *counts.entry(poi.categoria).or_insert(0) += 1;
        }
        counts
    }

    pub fn status_counts(pois: &[PointOfInterest]) -> BTreeMap<ValidationStatus, usize> {
        let mut counts = BTreeMap::new();
        for poi in pois {
            *counts.entry(poi.estado_validacion).or_insert(0) += 1;
        }
        counts
    }

    pub fn stats(pois: &[PointOfInterest]) -> DirectoryStats {
        let statuses = Self::status_counts(pois);
        let count_of = |estado: ValidationStatus| statuses.get(&estado).copied().unwrap_or(0);
        DirectoryStats {
            total: pois.len(),
            pendientes: count_of(ValidationStatus::Pendiente),
            aprobados: count_of(ValidationStatus::Aprobado),
            rechazados: count_of(ValidationStatus::Rechazado),
            por_categoria: Self::category_counts(pois),
        }
    }
}

//! Default municipal catalog for Ucú, Yucatán.
//!
//! These values seed `GeoFenceRule` when no environment overrides are
//! configured (see `core::config`). The catalogs are closed and curated:
//! postal codes are matched after trimming, colonias are matched exactly.

/// Postal codes assigned to the municipality of Ucú
pub const CODIGOS_POSTALES_UCU: [&str; 4] = [
    "97350", // alternate code shared with neighboring localities
    "97357", // main code of the cabecera
    "97358", // outlying colonias
    "97359", // rural localities
];

/// Curated colonias/localidades of Ucú (case-sensitive display names)
pub const COLONIAS_UCU: [&str; 3] = ["Centro", "Yaxché de Peón", "San Antonio Chel"];

/// Municipal boundary of Ucú as (lat, lon) vertices.
/// The polygon is implicitly closed; the last vertex connects back to the
/// first.
pub const LIMITE_UCU: [(f64, f64); 4] = [
    (21.043611, -89.760833),
    (21.043611, -89.733333),
    (21.020833, -89.733333),
    (21.020833, -89.760833),
];

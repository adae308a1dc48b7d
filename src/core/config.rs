use std::env;

use crate::features::geofence::catalog::{CODIGOS_POSTALES_UCU, COLONIAS_UCU, LIMITE_UCU};
use crate::features::geofence::models::GeoFenceRule;

#[derive(Debug, Clone)]
pub struct Config {
    pub municipality: MunicipalityConfig,
}

/// Geofence catalog configuration. Defaults to the Ucú catalog; every value
/// can be overridden through the environment:
///
/// - `MUNICIPALITY_NAME`: display name
/// - `MUNICIPALITY_POSTAL_CODES`: comma-separated postal codes
/// - `MUNICIPALITY_COLONIAS`: comma-separated colonia names
/// - `MUNICIPALITY_BOUNDARY`: `lat,lon;lat,lon;...` polygon vertices, or
///   `none` to disable the coordinate check
#[derive(Debug, Clone)]
pub struct MunicipalityConfig {
    pub name: String,
    pub codigos_postales: Vec<String>,
    pub colonias: Vec<String>,
    pub boundary: Option<Vec<(f64, f64)>>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            municipality: MunicipalityConfig::from_env()?,
        })
    }
}

impl MunicipalityConfig {
    pub fn from_env() -> Result<Self, String> {
        let name = env::var("MUNICIPALITY_NAME").unwrap_or_else(|_| "Ucú".to_string());

        let codigos_postales = match env::var("MUNICIPALITY_POSTAL_CODES") {
            Ok(raw) => parse_list(&raw),
            Err(_) => CODIGOS_POSTALES_UCU.iter().map(|s| s.to_string()).collect(),
        };
        if codigos_postales.is_empty() {
            return Err("MUNICIPALITY_POSTAL_CODES must not be empty".to_string());
        }

        let colonias = match env::var("MUNICIPALITY_COLONIAS") {
            Ok(raw) => parse_list(&raw),
            Err(_) => COLONIAS_UCU.iter().map(|s| s.to_string()).collect(),
        };
        if colonias.is_empty() {
            return Err("MUNICIPALITY_COLONIAS must not be empty".to_string());
        }

        let boundary = match env::var("MUNICIPALITY_BOUNDARY") {
            Ok(raw) if raw.trim().eq_ignore_ascii_case("none") => None,
            Ok(raw) => Some(parse_boundary(&raw)?),
            Err(_) => Some(LIMITE_UCU.to_vec()),
        };

        Ok(Self {
            name,
            codigos_postales,
            colonias,
            boundary,
        })
    }

    pub fn geofence_rule(&self) -> GeoFenceRule {
        GeoFenceRule::new(
            self.codigos_postales.iter().cloned(),
            self.colonias.iter().cloned(),
            self.boundary.clone(),
        )
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a polygon in `lat,lon;lat,lon;...` form.
fn parse_boundary(raw: &str) -> Result<Vec<(f64, f64)>, String> {
    let vertices: Result<Vec<(f64, f64)>, String> = raw
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (lat, lon) = pair
                .split_once(',')
                .ok_or_else(|| format!("Invalid boundary vertex '{}'", pair))?;
            let lat = lat
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("Invalid latitude in boundary vertex '{}'", pair))?;
            let lon = lon
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("Invalid longitude in boundary vertex '{}'", pair))?;
            Ok((lat, lon))
        })
        .collect();

    let vertices = vertices?;
    if vertices.len() < 3 {
        return Err("MUNICIPALITY_BOUNDARY needs at least 3 vertices".to_string());
    }
    Ok(vertices)
}

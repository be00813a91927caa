//! `GeoJSON` readers for boundary, green space and vulnerability layers

use std::fs;
use std::path::Path;

use geo::{Geometry, MultiPolygon};
use geojson::{Feature, FeatureCollection, GeoJson};
use log::{debug, info, warn};
use serde_json::Value as JsonValue;

use crate::Error;
use crate::model::{
    AreaBoundary, HazardZones, VulnerabilityLevel, VulnerabilityZone, VulnerabilityZones,
};

/// Read a file holding a `FeatureCollection`, a single `Feature` or a bare geometry
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid `GeoJSON`
pub fn read_feature_collection(path: &Path) -> Result<FeatureCollection, Error> {
    let text = fs::read_to_string(path).map_err(|e| {
        Error::DataLoad(format!("Cannot read {}: {e}", path.display()))
    })?;
    feature_collection_from_str(&text)
}

/// # Errors
///
/// Returns an error if `text` is not valid `GeoJSON`
pub fn feature_collection_from_str(text: &str) -> Result<FeatureCollection, Error> {
    let collection = match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(feature) => FeatureCollection {
            features: vec![feature],
            bbox: None,
            foreign_members: None,
        },
        GeoJson::Geometry(geometry) => FeatureCollection {
            features: vec![Feature::from(geometry)],
            bbox: None,
            foreign_members: None,
        },
    };
    Ok(collection)
}

pub(crate) fn feature_geometry(feature: &Feature) -> Option<Geometry<f64>> {
    let geometry = feature.geometry.as_ref()?;
    Geometry::<f64>::try_from(&geometry.value).ok()
}

fn as_multi_polygon(geometry: Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => Some(MultiPolygon::new(vec![polygon])),
        Geometry::MultiPolygon(multi) => Some(multi),
        _ => None,
    }
}

/// Polygonal features of `collection`; everything else is skipped
pub fn polygons_from_collection(collection: &FeatureCollection) -> Vec<MultiPolygon<f64>> {
    collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(idx, feature)| {
            let polygon = feature_geometry(feature).and_then(as_multi_polygon);
            if polygon.is_none() {
                debug!("Skipping non-polygonal feature {idx}");
            }
            polygon
        })
        .collect()
}

/// Load green space polygons as hazard-reducing zones
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load_polygons(path: &Path) -> Result<HazardZones, Error> {
    let collection = read_feature_collection(path)?;
    let polygons = polygons_from_collection(&collection);
    info!(
        "Loaded {} green space polygons from {}",
        polygons.len(),
        path.display()
    );
    Ok(HazardZones::new(polygons))
}

fn number_property(feature: &Feature, key: &str) -> Option<f64> {
    match feature.property(key)? {
        JsonValue::Number(number) => number.as_f64(),
        JsonValue::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn zone_from_feature(feature: &Feature, population_property: &str) -> Option<VulnerabilityZone> {
    let polygon = feature_geometry(feature).and_then(as_multi_polygon)?;

    let explicit = match feature.property("vulnerability_level") {
        Some(JsonValue::String(text)) => text.parse::<VulnerabilityLevel>().ok(),
        _ => None,
    };
    let level = explicit.or_else(|| {
        number_property(feature, population_property).map(VulnerabilityLevel::from_population)
    })?;

    let zone = VulnerabilityZone::new(polygon, level);
    Some(match number_property(feature, "vulnerability_factor") {
        Some(factor) => zone.with_factor(factor),
        None => zone,
    })
}

/// Build vulnerability zones from features carrying either
/// `vulnerability_level` or a population count in `population_property`
pub fn vulnerability_zones_from_collection(
    collection: &FeatureCollection,
    population_property: &str,
) -> VulnerabilityZones {
    let mut zones = Vec::with_capacity(collection.features.len());
    for (idx, feature) in collection.features.iter().enumerate() {
        match zone_from_feature(feature, population_property) {
            Some(zone) => zones.push(zone),
            None => warn!(
                "Skipping vulnerability feature {idx}: no polygon or no level / '{population_property}' property"
            ),
        }
    }
    VulnerabilityZones::new(zones)
}

/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load_vulnerability_zones(
    path: &Path,
    population_property: &str,
) -> Result<VulnerabilityZones, Error> {
    let collection = read_feature_collection(path)?;
    let zones = vulnerability_zones_from_collection(&collection, population_property);
    info!(
        "Loaded {} vulnerability zones from {}",
        zones.len(),
        path.display()
    );
    Ok(zones)
}

/// First polygon or ring in `collection`
///
/// # Errors
///
/// [`Error::DataLoad`] if there is no usable geometry
pub fn boundary_from_collection(collection: &FeatureCollection) -> Result<AreaBoundary, Error> {
    for geometry in collection.features.iter().filter_map(feature_geometry) {
        match geometry {
            Geometry::Polygon(polygon) => return Ok(AreaBoundary::new(polygon)),
            Geometry::MultiPolygon(multi) => {
                if let Some(polygon) = multi.0.into_iter().next() {
                    return Ok(AreaBoundary::new(polygon));
                }
            }
            Geometry::LineString(ring) => return AreaBoundary::from_ring(ring),
            _ => {}
        }
    }
    Err(Error::DataLoad(
        "Boundary layer contains no polygon or ring".to_string(),
    ))
}

/// # Errors
///
/// Returns an error if the file cannot be read or holds no boundary
pub fn load_boundary(path: &Path) -> Result<AreaBoundary, Error> {
    let boundary = boundary_from_collection(&read_feature_collection(path)?)?;
    info!("Loaded operating area boundary from {}", path.display());
    Ok(boundary)
}

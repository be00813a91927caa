//! Street network loading from `GeoJSON` edge layers
//!
//! Edges follow the layout of an osmnx edge export: a `LineString` per edge
//! with `u`, `v`, `key`, `length` and `oneway` properties. Node coordinates
//! are taken from the first and last vertex of the edge geometry.

use std::path::Path;

use geo::{Geometry, Haversine, Length, LineString, Point};
use geojson::{Feature, FeatureCollection};
use hashbrown::HashSet;
use log::{debug, info, warn};
use serde_json::Value as JsonValue;

use super::layers::{feature_collection_from_str, feature_geometry, read_feature_collection};
use crate::Error;
use crate::model::{RoadNetwork, RoadNetworkBuilder};

struct RawEdge {
    u: i64,
    v: i64,
    key: i64,
    length: f64,
    oneway: bool,
    geometry: LineString<f64>,
}

fn id_property(feature: &Feature, key: &str) -> Option<i64> {
    match feature.property(key)? {
        JsonValue::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f as i64)),
        JsonValue::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn oneway_property(feature: &Feature) -> bool {
    match feature.property("oneway") {
        Some(JsonValue::Bool(flag)) => *flag,
        Some(JsonValue::String(text)) => {
            matches!(text.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
        }
        Some(JsonValue::Number(number)) => number.as_i64() == Some(1),
        _ => false,
    }
}

fn raw_edge(feature: &Feature) -> Result<RawEdge, String> {
    let geometry = match feature_geometry(feature) {
        Some(Geometry::LineString(line)) if line.0.len() >= 2 => line,
        Some(Geometry::MultiLineString(multi)) => {
            let line: LineString<f64> = multi.0.into_iter().flat_map(|l| l.0).collect();
            if line.0.len() < 2 {
                return Err("degenerate MultiLineString".to_string());
            }
            line
        }
        _ => return Err("missing LineString geometry".to_string()),
    };
    let u = id_property(feature, "u").ok_or("missing 'u'")?;
    let v = id_property(feature, "v").ok_or("missing 'v'")?;
    let key = id_property(feature, "key").unwrap_or(0);

    let length = match feature.property("length").and_then(JsonValue::as_f64) {
        Some(length) if length.is_finite() && length >= 0.0 => length,
        _ => Haversine.length(&geometry),
    };

    Ok(RawEdge {
        u,
        v,
        key,
        length,
        oneway: oneway_property(feature),
        geometry,
    })
}

/// Build a road network from an edge `FeatureCollection`
///
/// Two-way edges are inserted in both directions. An osmnx export already
/// listing the reverse direction of a two-way edge is not duplicated.
///
/// # Errors
///
/// [`Error::DataLoad`] if no feature yields a usable edge
pub fn road_network_from_collection(collection: &FeatureCollection) -> Result<RoadNetwork, Error> {
    let mut builder = RoadNetworkBuilder::new();
    let mut inserted: HashSet<(i64, i64, i64)> = HashSet::new();
    let mut skipped = 0usize;
    let mut duplicates = 0usize;

    for (idx, feature) in collection.features.iter().enumerate() {
        let edge = match raw_edge(feature) {
            Ok(edge) => edge,
            Err(reason) => {
                debug!("Skipping edge feature {idx}: {reason}");
                skipped += 1;
                continue;
            }
        };

        if !inserted.insert((edge.u, edge.v, edge.key)) {
            duplicates += 1;
            continue;
        }

        let first = edge.geometry.0[0];
        let last = edge.geometry.0[edge.geometry.0.len() - 1];
        let from = builder.add_node(edge.u, Point::from(first));
        let to = builder.add_node(edge.v, Point::from(last));

        if edge.oneway {
            builder.add_edge(from, to, edge.length, Some(edge.geometry));
        } else {
            inserted.insert((edge.v, edge.u, edge.key));
            builder.add_street(from, to, edge.length, Some(edge.geometry));
        }
    }

    if skipped > 0 {
        warn!("Skipped {skipped} edge features without usable geometry or node ids");
    }
    if duplicates > 0 {
        debug!("Ignored {duplicates} edges already inserted as reverse directions");
    }

    let network = builder.build();
    if network.edge_count() == 0 {
        return Err(Error::DataLoad(
            "Street network contains no usable edges".to_string(),
        ));
    }
    Ok(network)
}

/// # Errors
///
/// Returns an error if `text` is not `GeoJSON` or holds no usable edge
pub fn road_network_from_str(text: &str) -> Result<RoadNetwork, Error> {
    road_network_from_collection(&feature_collection_from_str(text)?)
}

/// Load a street network from a `GeoJSON` edge file
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no usable edge
pub fn load_road_network(path: &Path) -> Result<RoadNetwork, Error> {
    let network = road_network_from_collection(&read_feature_collection(path)?)?;
    info!(
        "Loaded street network from {}: {} nodes, {} edges",
        path.display(),
        network.node_count(),
        network.edge_count()
    );
    Ok(network)
}

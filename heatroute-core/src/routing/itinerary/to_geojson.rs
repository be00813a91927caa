use geo::{LineString, Point, line_string};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use petgraph::graph::EdgeIndex;
use serde_json::json;

use crate::{
    Error,
    algo::EdgeAnnotations,
    model::{RoadNetwork, RoutePlan},
};

impl RoutePlan {
    /// Converts the plan to a `GeoJSON` `FeatureCollection`.
    ///
    /// `walk` and `drive` must be the networks the plan was computed on and
    /// `annotations` the table of the same run. The `start` and `end` points
    /// are the snapped ends of the walking path.
    pub fn to_geojson(
        &self,
        walk: &RoadNetwork,
        drive: &RoadNetwork,
        annotations: &EdgeAnnotations,
    ) -> Result<FeatureCollection, Error> {
        annotations.check_network(walk)?;
        let mut features = Vec::with_capacity(self.walking_path.edges.len() + 3);

        for (idx, &edge) in self.walking_path.edges.iter().enumerate() {
            features.push(create_walk_feature(walk, annotations, idx, edge)?);
        }

        if !self.driving_path.is_empty() {
            features.push(create_drive_feature(self, drive)?);
        }

        if let Some(start) = self.walking_path.start() {
            features.push(create_point_feature(start, "start", &self.scenario.to_string())?);
        }
        if let Some(end) = self.walking_path.end() {
            features.push(create_point_feature(end, "end", &self.destination.name)?);
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(
        &self,
        walk: &RoadNetwork,
        drive: &RoadNetwork,
        annotations: &EdgeAnnotations,
    ) -> Result<String, Error> {
        Ok(serde_json::to_string(
            &self.to_geojson(walk, drive, annotations)?,
        )?)
    }
}

fn create_walk_feature(
    walk: &RoadNetwork,
    annotations: &EdgeAnnotations,
    leg_idx: usize,
    edge: EdgeIndex,
) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&edge_geometry(walk, edge)));
    let data = walk.edge(edge);
    let annotation = annotations.get(edge);

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "leg_type": "walk",
            "leg_index": leg_idx,
            "length": data.map(|e| e.length),
            "hazard_value": annotation.map(|a| a.hazard_value),
            "vulnerability_level": annotation.map(|a| a.vulnerability_level.as_str()),
            "vulnerability_factor": annotation.map(|a| a.vulnerability_factor),
            "cost": annotation.map(|a| a.cost),
        }
    });

    Ok(Feature::from_json_value(value)?)
}

fn create_drive_feature(plan: &RoutePlan, drive: &RoadNetwork) -> Result<Feature, Error> {
    let coords: Vec<_> = plan
        .driving_path
        .edges
        .iter()
        .flat_map(|&edge| edge_geometry(drive, edge).0)
        .collect();
    let mut line = LineString::new(coords);
    line.0.dedup();

    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&line)),
        "properties": {
            "leg_type": "drive",
            "length": plan.distance_drive,
            "duration_minutes": plan.time_drive_minutes,
        }
    });

    Ok(Feature::from_json_value(value)?)
}

fn create_point_feature(point: Point<f64>, kind: &str, label: &str) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&point)),
        "properties": {
            "leg_type": kind,
            "label": label,
        }
    });

    Ok(Feature::from_json_value(value)?)
}

/// Stored edge geometry, or a straight line between its endpoints
fn edge_geometry(network: &RoadNetwork, edge: EdgeIndex) -> LineString<f64> {
    if let Some(geometry) = network.edge(edge).and_then(|e| e.geometry.clone()) {
        return geometry;
    }

    match network
        .graph
        .edge_endpoints(edge)
        .and_then(|(a, b)| Some((network.node(a)?.geometry, network.node(b)?.geometry)))
    {
        Some((from, to)) => line_string![
            (x: from.x(), y: from.y()),
            (x: to.x(), y: to.y())
        ],
        None => LineString::new(Vec::new()),
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use heatroute_core::prelude::*;
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use wkt::ToWkt;

use crate::to_py_err;

/// Outcome of one planning request
///
/// Distances are in meters, times in minutes, water in liters.
#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pyclass)]
#[pyclass(name = "PlanResult", frozen)]
pub struct PyPlanResult {
    pub(crate) plan: RoutePlan,
    pub(crate) annotations: EdgeAnnotations,
    pub(crate) model: Arc<RouteModel>,
}

fn lat_lon(path: &RoutePath) -> Vec<(f64, f64)> {
    path.coordinates.iter().map(|p| (p.y(), p.x())).collect()
}

#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pymethods)]
#[pymethods]
impl PyPlanResult {
    #[getter]
    fn scenario(&self) -> &'static str {
        self.plan.scenario.as_str()
    }

    #[getter]
    fn hazard_base(&self) -> f64 {
        self.plan.hazard_base
    }

    #[getter]
    fn shelter_name(&self) -> &str {
        &self.plan.destination.name
    }

    #[getter]
    fn distance_heat(&self) -> f64 {
        self.plan.distance_heat
    }

    #[getter]
    fn distance_shortest_ref(&self) -> f64 {
        self.plan.distance_shortest_ref
    }

    #[getter]
    fn distance_drive(&self) -> f64 {
        self.plan.distance_drive
    }

    #[getter]
    fn time_walk_minutes(&self) -> f64 {
        self.plan.time_walk_minutes
    }

    #[getter]
    fn time_drive_minutes(&self) -> f64 {
        self.plan.time_drive_minutes
    }

    #[getter]
    fn total_cost_heat(&self) -> f64 {
        self.plan.total_cost_heat
    }

    #[getter]
    fn total_risk_heat(&self) -> f64 {
        self.plan.total_risk_heat
    }

    #[getter]
    fn total_risk_ref(&self) -> f64 {
        self.plan.total_risk_ref
    }

    /// Percent of reference risk avoided, None if the reference path has no risk
    #[getter]
    fn risk_reduction_pct(&self) -> Option<f64> {
        self.plan.risk_reduction_pct()
    }

    #[getter]
    fn water_needed_liters(&self) -> f64 {
        self.plan.water_needed_liters
    }

    #[getter]
    fn dominant_vulnerability_level(&self) -> &'static str {
        self.plan.dominant_vulnerability_level.as_str()
    }

    /// Level name -> (length in meters, edge count)
    #[getter]
    fn vulnerability_histogram(&self) -> HashMap<&'static str, (f64, usize)> {
        self.plan
            .vulnerability_histogram
            .iter()
            .map(|(level, summary)| (level.as_str(), (summary.length, summary.edge_count)))
            .collect()
    }

    /// Walking path as (lat, lon) pairs
    #[getter]
    fn walking_path(&self) -> Vec<(f64, f64)> {
        lat_lon(&self.plan.walking_path)
    }

    /// Driving path as (lat, lon) pairs
    #[getter]
    fn driving_path(&self) -> Vec<(f64, f64)> {
        lat_lon(&self.plan.driving_path)
    }

    /// GeoJSON FeatureCollection with per-edge heat attributes
    pub fn to_geojson(&self) -> PyResult<String> {
        self.plan
            .to_geojson_string(
                &self.model.walk_network,
                &self.model.drive_network,
                &self.annotations,
            )
            .map_err(to_py_err)
    }

    /// Walking path as a WKT LINESTRING (lon lat order)
    pub fn walking_path_wkt(&self) -> String {
        self.plan.walking_path.line_string().wkt_string()
    }

    /// All plan fields as a JSON document
    pub fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.plan).map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "PlanResult(scenario={}, shelter='{}', walk={:.0} m / {:.1} min, drive={:.0} m / {:.1} min)",
            self.plan.scenario,
            self.plan.destination.name,
            self.plan.distance_heat,
            self.plan.time_walk_minutes,
            self.plan.distance_drive,
            self.plan.time_drive_minutes
        )
    }
}

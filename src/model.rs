use std::sync::Arc;

use geo::Point;
use heatroute_core::prelude::*;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::routing::PyPlanResult;
use crate::to_py_err;

/// HeatRoutePlanner
///
/// Operating area, walking and driving networks, green space, vulnerability
/// zones and shelters of one district, loaded once from a JSON config.
///
/// Example:
///
/// .. code-block:: python
///
///     planner = HeatRoutePlanner("district/config.json")
///     shelters = planner.nearest_shelters(25.20, 55.27)
///     result = planner.plan_route(25.20, 55.27, 0, "High")
///     print(result.distance_heat, result.water_needed_liters)
#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pyclass)]
#[pyclass(name = "HeatRoutePlanner", frozen)]
pub struct PyHeatRoutePlanner {
    pub(crate) model: Arc<RouteModel>,
}

#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pymethods)]
#[pymethods]
impl PyHeatRoutePlanner {
    /// Load the planner from a JSON config
    ///
    /// Parameters
    /// ----------
    /// config_path : str
    ///     Config file; relative data paths resolve against its directory
    ///
    /// Raises
    /// ------
    /// RuntimeError
    ///     If a data file is missing or cannot be parsed
    #[new]
    pub fn new(py: Python<'_>, config_path: &str) -> PyResult<Self> {
        let path = std::path::PathBuf::from(config_path);
        let model = py
            .detach(move || -> Result<RouteModel, Error> {
                let config = PlannerConfig::from_json_file(&path)?;
                create_route_model(&config)
            })
            .map_err(to_py_err)?;

        Ok(PyHeatRoutePlanner {
            model: Arc::new(model),
        })
    }

    /// Shelters closest to (lat, lon), nearest first
    ///
    /// `k` defaults to the configured number of offered shelters.
    #[pyo3(signature = (lat, lon, k=None))]
    pub fn nearest_shelters(
        &self,
        lat: f64,
        lon: f64,
        k: Option<usize>,
    ) -> Vec<PyShelterCandidate> {
        let origin = Point::new(lon, lat);
        let k = k.unwrap_or(self.model.meta.nearest_shelters);
        self.model
            .shelters
            .nearest(&origin, k)
            .into_iter()
            .map(|inner| PyShelterCandidate { inner })
            .collect()
    }

    /// Plan a heat-aware walk and a driving comparison to a shelter
    ///
    /// Parameters
    /// ----------
    /// lat, lon : float
    ///     Origin, must lie inside the operating area
    /// shelter_index : int
    ///     Position in the list returned by `nearest_shelters(lat, lon)`
    /// scenario : str
    ///     "Low", "Moderate" or "High"
    ///
    /// Raises
    /// ------
    /// OutOfBoundaryError
    ///     Origin outside the operating area
    /// InvalidSelectionError
    ///     `shelter_index` out of range
    /// NoPathFoundError
    ///     No connecting path in one of the networks
    pub fn plan_route(
        &self,
        py: Python<'_>,
        lat: f64,
        lon: f64,
        shelter_index: usize,
        scenario: &str,
    ) -> PyResult<PyPlanResult> {
        let scenario: Scenario = scenario
            .parse()
            .map_err(|e: Error| PyValueError::new_err(e.to_string()))?;
        let origin = Point::new(lon, lat);
        let model = Arc::clone(&self.model);

        py.detach(move || -> Result<PyPlanResult, Error> {
            model.boundary.validate_origin(&origin)?;
            let candidates = model.nearest_shelters(&origin);
            let shelter = select_shelter(&candidates, shelter_index)?;

            let annotations = annotate(
                &model.walk_network,
                scenario,
                &model.hazard_zones,
                &model.vulnerability_zones,
            );
            let plan = plan_with_annotations(&model, &annotations, &origin, shelter)?;
            Ok(PyPlanResult {
                plan,
                annotations,
                model: Arc::clone(&model),
            })
        })
        .map_err(to_py_err)
    }

    pub fn shelter_count(&self) -> usize {
        self.model.shelters.len()
    }

    fn __repr__(&self) -> String {
        format!("HeatRoutePlanner({})", self.model.summary())
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

/// Shelter offered to the user with its distance from the origin
#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pyclass)]
#[pyclass(name = "ShelterCandidate", frozen)]
pub struct PyShelterCandidate {
    pub(crate) inner: ShelterCandidate,
}

#[cfg_attr(feature = "stubgen", pyo3_stub_gen::derive::gen_stub_pymethods)]
#[pymethods]
impl PyShelterCandidate {
    #[getter]
    fn name(&self) -> &str {
        &self.inner.shelter.name
    }

    #[getter]
    fn capacity(&self) -> u32 {
        self.inner.shelter.capacity
    }

    #[getter]
    fn category(&self) -> &str {
        &self.inner.shelter.category
    }

    /// (lat, lon)
    #[getter]
    fn coordinates(&self) -> (f64, f64) {
        (self.inner.shelter.geometry.y(), self.inner.shelter.geometry.x())
    }

    /// Great-circle distance from the origin in meters
    #[getter]
    fn distance(&self) -> f64 {
        self.inner.distance
    }

    fn __repr__(&self) -> String {
        format!(
            "ShelterCandidate(name='{}', distance={:.0} m)",
            self.inner.shelter.name, self.inner.distance
        )
    }
}

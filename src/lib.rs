use heatroute_core::Error;
use pyo3::create_exception;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use model::{PyHeatRoutePlanner, PyShelterCandidate};
use routing::PyPlanResult;

pub mod model;
pub mod routing;

create_exception!(heatroute, OutOfBoundaryError, PyValueError);
create_exception!(heatroute, InvalidSelectionError, PyValueError);
create_exception!(heatroute, NoPathFoundError, PyRuntimeError);

/// Map core errors onto the module's Python exceptions
pub(crate) fn to_py_err(error: Error) -> PyErr {
    match error {
        Error::OutOfBoundary { .. } => OutOfBoundaryError::new_err(error.to_string()),
        Error::InvalidSelection { .. } => InvalidSelectionError::new_err(error.to_string()),
        Error::NoPathFound { .. } => NoPathFoundError::new_err(error.to_string()),
        Error::ScenarioUnavailable(_) => PyValueError::new_err(error.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

/// Heat-aware evacuation routing implemented in Rust.
#[pymodule]
fn heatroute(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyHeatRoutePlanner>()?;
    m.add_class::<PyShelterCandidate>()?;
    m.add_class::<PyPlanResult>()?;

    let py = m.py();
    m.add("OutOfBoundaryError", py.get_type::<OutOfBoundaryError>())?;
    m.add("InvalidSelectionError", py.get_type::<InvalidSelectionError>())?;
    m.add("NoPathFoundError", py.get_type::<NoPathFoundError>())?;
    Ok(())
}

#[cfg(feature = "stubgen")]
pyo3_stub_gen::define_stub_info_gatherer!(stub_info);

//! Heat-aware evacuation routing.
//!
//! Street segments are priced by heat exposure (halved inside green space)
//! and by the vulnerability of the population they cross. A least-cost walking
//! route to a chosen shelter is compared with the distance-shortest walk and
//! with a driving route.
//!
//! ```no_run
//! use geo::point;
//! use heatroute_core::prelude::*;
//!
//! let config = PlannerConfig::from_json_file("district/config.json")?;
//! let model = create_route_model(&config)?;
//! let origin = point!(x: 55.27, y: 25.20);
//! let candidates = model.nearest_shelters(&origin);
//! let shelter = select_shelter(&candidates, 0)?;
//! let plan = plan_route(&model, &origin, shelter, Scenario::High)?;
//! println!("{:.0} m, {:.1} L of water", plan.distance_heat, plan.water_needed_liters);
//! # Ok::<(), heatroute_core::Error>(())
//! ```

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;


pub use error::Error;
pub use loading::{PlannerConfig, create_route_model};
pub use model::{RouteModel, RoutePlan, Scenario, VulnerabilityLevel};
pub use routing::plan_route;

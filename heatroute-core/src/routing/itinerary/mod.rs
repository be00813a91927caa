//! Export of planned routes

mod to_geojson;

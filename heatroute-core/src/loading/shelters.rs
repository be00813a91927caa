use std::fs::File;
use std::io::Read;
use std::path::Path;

use geo::Point;
use log::{info, warn};
use serde::Deserialize;

use crate::Error;
use crate::model::{Shelter, ShelterRegistry};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FeedShelter {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Capacity")]
    capacity: String,
    latitude: String,
    longitude: String,
    #[serde(rename = "Type")]
    category: String,
}

impl FeedShelter {
    fn into_shelter(self) -> Result<Shelter, String> {
        let lat: f64 = self
            .latitude
            .trim()
            .parse()
            .map_err(|_| format!("invalid latitude '{}'", self.latitude))?;
        let lon: f64 = self
            .longitude
            .trim()
            .parse()
            .map_err(|_| format!("invalid longitude '{}'", self.longitude))?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(format!("coordinates out of range ({lat}, {lon})"));
        }

        // Capacities are sometimes exported as floats
        let capacity = self
            .capacity
            .trim()
            .parse::<f64>()
            .map(|c| c.max(0.0) as u32)
            .unwrap_or(0);

        Ok(Shelter {
            name: self.name.trim().to_string(),
            capacity,
            geometry: Point::new(lon, lat),
            category: self.category.trim().to_string(),
        })
    }
}

/// Read shelters from CSV with `Name, Capacity, latitude, longitude, Type`
/// columns; rows with unusable coordinates are skipped
///
/// # Errors
///
/// [`Error::CsvError`] on a malformed header, [`Error::DataLoad`] if no row
/// is usable
pub fn shelters_from_reader(reader: impl Read) -> Result<ShelterRegistry, Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut shelters = Vec::new();
    let mut skipped = 0usize;

    for (row, record) in csv_reader.deserialize::<FeedShelter>().enumerate() {
        match record.map_err(|e| e.to_string()).and_then(FeedShelter::into_shelter) {
            Ok(shelter) => shelters.push(shelter),
            Err(reason) => {
                warn!("Skipping shelter row {}: {reason}", row + 1);
                skipped += 1;
            }
        }
    }

    if shelters.is_empty() {
        return Err(Error::DataLoad(format!(
            "No usable shelters ({skipped} rows skipped)"
        )));
    }
    Ok(ShelterRegistry::new(shelters))
}

/// # Errors
///
/// Returns an error if the file cannot be opened or holds no usable shelter
pub fn load_shelters(path: &Path) -> Result<ShelterRegistry, Error> {
    let file = File::open(path)
        .map_err(|e| Error::DataLoad(format!("Cannot open {}: {e}", path.display())))?;
    let registry = shelters_from_reader(file)?;
    info!("Loaded {} shelters from {}", registry.len(), path.display());
    Ok(registry)
}

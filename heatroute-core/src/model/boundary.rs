use geo::{Contains, LineString, Point, Polygon};

use crate::Error;

/// Operating area of the planner
#[derive(Debug, Clone)]
pub struct AreaBoundary {
    polygon: Polygon<f64>,
}

impl AreaBoundary {
    pub fn new(polygon: Polygon<f64>) -> Self {
        Self { polygon }
    }

    /// Build the area from a boundary line, closing the ring if the source
    /// left it open
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLoad`] if the line has fewer than three distinct
    /// vertices
    pub fn from_ring(line: LineString<f64>) -> Result<Self, Error> {
        let mut coords = line.0;
        coords.dedup();
        if coords.len() > 1 && coords.first() == coords.last() {
            coords.pop();
        }
        if coords.len() < 3 {
            return Err(Error::DataLoad(format!(
                "boundary ring needs at least 3 distinct vertices, got {}",
                coords.len()
            )));
        }
        // Polygon::new closes the exterior ring
        Ok(Self::new(Polygon::new(LineString::new(coords), vec![])))
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Strict containment: points on the boundary line are outside
    pub fn contains(&self, point: &Point<f64>) -> bool {
        self.polygon.contains(point)
    }

    /// # Errors
    ///
    /// Returns [`Error::OutOfBoundary`] when `point` is not inside the area
    pub fn validate_origin(&self, point: &Point<f64>) -> Result<(), Error> {
        if self.contains(point) {
            Ok(())
        } else {
            Err(Error::OutOfBoundary {
                lon: point.x(),
                lat: point.y(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::{line_string, point};

    use super::*;

    #[test]
    fn open_ring_is_closed() {
        let open = line_string![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 0.0, y: 2.0),
        ];
        let boundary = AreaBoundary::from_ring(open).unwrap();
        assert!(boundary.polygon().exterior().is_closed());
        assert!(boundary.contains(&point!(x: 1.0, y: 1.0)));
        assert!(!boundary.contains(&point!(x: 3.0, y: 1.0)));
    }

    #[test]
    fn degenerate_ring_is_rejected() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)];
        assert!(matches!(
            AreaBoundary::from_ring(line),
            Err(Error::DataLoad(_))
        ));
    }

    #[test]
    fn origin_outside_is_recoverable() {
        let boundary = AreaBoundary::from_ring(line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ])
        .unwrap();
        let err = boundary.validate_origin(&point!(x: 5.0, y: 5.0)).unwrap_err();
        assert!(err.is_recoverable());
        assert!(boundary.validate_origin(&point!(x: 0.7, y: 0.2)).is_ok());
    }
}

//! Polygon overlays: hazard-reducing green space and population vulnerability
//!
//! Both sets keep an R-tree over polygon bounding boxes so an edge is only
//! tested exactly against polygons whose envelope it touches.

use geo::{BoundingRect, Intersects, LineString, MultiPolygon, Point, Polygon, Rect};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

use super::vulnerability::VulnerabilityLevel;

type IndexedEnvelope = GeomWithData<Rectangle<Point<f64>>, usize>;

fn envelope_of(rect: Rect<f64>) -> AABB<Point<f64>> {
    AABB::from_corners(rect.min().into(), rect.max().into())
}

fn build_envelope_index<'a>(
    polygons: impl Iterator<Item = &'a MultiPolygon<f64>>,
) -> RTree<IndexedEnvelope> {
    let entries = polygons
        .enumerate()
        .filter_map(|(index, polygon)| {
            polygon.bounding_rect().map(|rect| {
                IndexedEnvelope::new(
                    Rectangle::from_corners(rect.min().into(), rect.max().into()),
                    index,
                )
            })
        })
        .collect();
    RTree::bulk_load(entries)
}

/// Indices of polygons whose envelope touches the envelope of `line`
fn candidates<'a>(
    index: &'a RTree<IndexedEnvelope>,
    line: &LineString<f64>,
) -> impl Iterator<Item = usize> + 'a {
    let envelope = line.bounding_rect().map(envelope_of);
    envelope
        .into_iter()
        .flat_map(move |env| {
            index
                .locate_in_envelope_intersecting(&env)
                .map(|entry| entry.data)
                .collect::<Vec<_>>()
        })
}

/// Green and park space that halves heat hazard on intersecting edges
#[derive(Debug, Clone, Default)]
pub struct HazardZones {
    polygons: Vec<MultiPolygon<f64>>,
    index: RTree<IndexedEnvelope>,
}

impl HazardZones {
    pub fn new(polygons: Vec<MultiPolygon<f64>>) -> Self {
        let index = build_envelope_index(polygons.iter());
        Self { polygons, index }
    }

    pub fn from_polygons(polygons: Vec<Polygon<f64>>) -> Self {
        Self::new(polygons.into_iter().map(MultiPolygon::from).collect())
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn polygons(&self) -> &[MultiPolygon<f64>] {
        &self.polygons
    }

    /// Boundary-inclusive test of `line` against every zone
    pub fn intersects(&self, line: &LineString<f64>) -> bool {
        candidates(&self.index, line).any(|i| self.polygons[i].intersects(line))
    }
}

/// Polygon with a precomputed population-vulnerability rating
#[derive(Debug, Clone)]
pub struct VulnerabilityZone {
    pub polygon: MultiPolygon<f64>,
    pub level: VulnerabilityLevel,
    pub factor: f64,
}

impl VulnerabilityZone {
    /// Zone rated with the level's canonical factor
    pub fn new(polygon: impl Into<MultiPolygon<f64>>, level: VulnerabilityLevel) -> Self {
        Self {
            polygon: polygon.into(),
            level,
            factor: level.factor(),
        }
    }

    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct VulnerabilityZones {
    zones: Vec<VulnerabilityZone>,
    index: RTree<IndexedEnvelope>,
}

impl VulnerabilityZones {
    pub fn new(zones: Vec<VulnerabilityZone>) -> Self {
        let index = build_envelope_index(zones.iter().map(|zone| &zone.polygon));
        Self { zones, index }
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn zones(&self) -> &[VulnerabilityZone] {
        &self.zones
    }

    /// Every zone intersecting `line`, boundary-inclusive
    pub fn matching<'a>(
        &'a self,
        line: &'a LineString<f64>,
    ) -> impl Iterator<Item = &'a VulnerabilityZone> + 'a {
        candidates(&self.index, line)
            .map(|i| &self.zones[i])
            .filter(move |zone| zone.polygon.intersects(line))
    }
}

#[cfg(test)]
mod tests {
    use geo::{line_string, polygon};

    use super::*;

    fn park() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ]
    }

    #[test]
    fn touching_the_boundary_counts_as_intersection() {
        let zones = HazardZones::from_polygons(vec![park()]);
        let touching = line_string![(x: 1.0, y: 0.5), (x: 2.0, y: 0.5)];
        let inside = line_string![(x: 0.2, y: 0.2), (x: 0.4, y: 0.4)];
        let outside = line_string![(x: 1.5, y: 0.5), (x: 2.0, y: 0.5)];
        assert!(zones.intersects(&touching));
        assert!(zones.intersects(&inside));
        assert!(!zones.intersects(&outside));
    }

    #[test]
    fn line_crossing_a_polygon_without_vertices_inside_matches() {
        let zones = HazardZones::from_polygons(vec![park()]);
        let crossing = line_string![(x: -1.0, y: 0.5), (x: 2.0, y: 0.5)];
        assert!(zones.intersects(&crossing));
    }

    #[test]
    fn empty_sets_never_match() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert!(!HazardZones::default().intersects(&line));
        assert_eq!(VulnerabilityZones::default().matching(&line).count(), 0);
    }

    #[test]
    fn vulnerability_zones_return_all_intersecting_polygons() {
        let far = polygon![
            (x: 10.0, y: 10.0),
            (x: 11.0, y: 10.0),
            (x: 11.0, y: 11.0),
        ];
        let zones = VulnerabilityZones::new(vec![
            VulnerabilityZone::new(park(), VulnerabilityLevel::Medium),
            VulnerabilityZone::new(far, VulnerabilityLevel::High),
        ]);
        let line = line_string![(x: 0.5, y: 0.5), (x: 0.6, y: 0.6)];
        let levels: Vec<_> = zones.matching(&line).map(|zone| zone.level).collect();
        assert_eq!(levels, vec![VulnerabilityLevel::Medium]);
    }
}

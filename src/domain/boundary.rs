//! Static reference region shown on the map and used for containment checks

use super::geometry::{Bounds, Geometry, LatLon, ray_cast};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Simplified Tamil Nadu outline, `(lon, lat)` pairs, closed
const TAMIL_NADU_RING: &[(f64, f64)] = &[
    (76.2673, 11.9144),
    (76.7217, 12.3764),
    (77.8203, 12.9092),
    (78.6269, 13.2846),
    (79.4175, 13.4479),
    (80.1755, 13.0827),
    (80.3463, 12.6186),
    (80.2307, 11.8781),
    (80.0367, 11.3275),
    (79.8275, 10.9570),
    (79.6867, 10.5457),
    (79.3156, 10.3074),
    (78.8842, 9.5411),
    (78.4542, 9.1775),
    (77.9380, 8.7322),
    (77.5367, 8.5389),
    (77.0673, 8.2511),
    (76.6733, 8.3892),
    (76.4364, 8.7084),
    (76.2247, 9.0868),
    (76.1175, 9.8735),
    (76.2956, 10.2764),
    (76.2673, 11.9144),
];

static TAMIL_NADU: LazyLock<BoundaryRegion> = LazyLock::new(|| BoundaryRegion {
    name: "Tamil Nadu".to_string(),
    region_code: "TN".to_string(),
    rings: vec![TAMIL_NADU_RING.to_vec()],
});

/// A named region made of one or more rings in `(lon, lat)` order
///
/// Rings are combined with the even-odd rule, so a second ring inside the
/// first is a hole and a ring outside it is a separate part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryRegion {
    pub name: String,
    pub region_code: String,
    pub rings: Vec<Vec<(f64, f64)>>,
}

impl BoundaryRegion {
    /// The supported region, built once and shared read-only
    pub fn tamil_nadu() -> &'static BoundaryRegion {
        &TAMIL_NADU
    }

    /// Ring vertices converted to `LatLon`, closing vertex dropped
    pub fn ring(&self, index: usize) -> Vec<LatLon> {
        let Some(ring) = self.rings.get(index) else {
            return Vec::new();
        };
        let mut points: Vec<LatLon> = ring.iter().copied().map(LatLon::from_lon_lat).collect();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        points
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.rings.iter().flatten().copied().map(LatLon::from_lon_lat))
    }

    pub fn contains(&self, at: LatLon) -> bool {
        (0..self.rings.len())
            .filter(|&i| ray_cast(&self.ring(i), at))
            .count()
            % 2
            == 1
    }

    /// Every vertex of the geometry lies inside the region
    pub fn contains_geometry(&self, geometry: &Geometry) -> bool {
        geometry.open_vertices().iter().all(|v| self.contains(*v))
    }
}

//! Geographic types for map selections
//!
//! Coordinates are decimal degrees. Selections are always stored as
//! `(lat, lon)`; feature data in `(lon, lat)` order is converted on the way in.

use crate::error::GeometryError;

/// A geographic coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from a `(lon, lat)` pair as found in feature collections
    pub const fn from_lon_lat((lon, lat): (f64, f64)) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Axis-aligned bounding box in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Zero-sized bounds around a single coordinate
    pub fn point(at: LatLon) -> Self {
        Self {
            south: at.lat,
            west: at.lon,
            north: at.lat,
            east: at.lon,
        }
    }

    /// Grow the bounds so they cover `at`
    pub fn include(self, at: LatLon) -> Self {
        Self {
            south: self.south.min(at.lat),
            west: self.west.min(at.lon),
            north: self.north.max(at.lat),
            east: self.east.max(at.lon),
        }
    }

    /// Bounds of a sequence of coordinates, `None` when empty
    pub fn from_points(points: impl IntoIterator<Item = LatLon>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Bounds::point(first), Bounds::include))
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Pad every side by the given amounts
    pub fn expand(&self, lat_pad: f64, lon_pad: f64) -> Self {
        Self {
            south: self.south - lat_pad,
            west: self.west - lon_pad,
            north: self.north + lat_pad,
            east: self.east + lon_pad,
        }
    }
}

/// Kind of shape traced in polygon-draw mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Polygon,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Polygon => "Polygon",
        }
    }
}

/// Closed ring of vertices, first vertex repeated as the last
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    vertices: Vec<LatLon>,
}

impl Ring {
    /// Validate a traced vertex sequence and close it
    ///
    /// Consecutive duplicates and an explicit closing vertex are collapsed
    /// before validation.
    pub fn new(vertices: Vec<LatLon>) -> Result<Self, GeometryError> {
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate);
        }

        let mut open: Vec<LatLon> = Vec::with_capacity(vertices.len() + 1);
        for v in vertices {
            if open.last() != Some(&v) {
                open.push(v);
            }
        }
        while open.len() > 1 && open.first() == open.last() {
            open.pop();
        }

        let distinct = count_distinct(&open);
        if distinct < 3 {
            return Err(GeometryError::TooFewVertices { found: distinct });
        }
        if self_intersects(&open) {
            return Err(GeometryError::SelfIntersecting);
        }

        let first = open[0];
        open.push(first);
        Ok(Self { vertices: open })
    }

    /// All vertices including the closing one
    pub fn vertices(&self) -> &[LatLon] {
        &self.vertices
    }

    /// Vertices without the repeated closing vertex
    pub fn open_vertices(&self) -> &[LatLon] {
        &self.vertices[..self.vertices.len() - 1]
    }

    pub fn bounds(&self) -> Bounds {
        let open = self.open_vertices();
        open[1..]
            .iter()
            .copied()
            .fold(Bounds::point(open[0]), Bounds::include)
    }
}

/// What the user selected
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Point(LatLon),
    Polygon { kind: ShapeKind, ring: Ring },
}

/// An immutable selection produced by one user action
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    shape: Shape,
    label: Option<String>,
}

impl Geometry {
    /// Clicked point, labelled with its coordinates
    pub fn point(at: LatLon) -> Self {
        Self {
            shape: Shape::Point(at),
            label: Some(point_label(at)),
        }
    }

    /// Point for a named place
    pub fn named_point(at: LatLon, name: impl Into<String>) -> Self {
        Self {
            shape: Shape::Point(at),
            label: Some(name.into()),
        }
    }

    /// Drawn polygon, labelled after its shape kind
    pub fn polygon(kind: ShapeKind, vertices: Vec<LatLon>) -> Result<Self, GeometryError> {
        let ring = Ring::new(vertices)?;
        Ok(Self {
            shape: Shape::Polygon { kind, ring },
            label: Some(format!("{} Area", kind.name())),
        })
    }

    /// Axis-aligned rectangle from two opposite corners
    pub fn rectangle(a: LatLon, b: LatLon) -> Result<Self, GeometryError> {
        Self::polygon(
            ShapeKind::Rectangle,
            vec![
                LatLon::new(a.lat, a.lon),
                LatLon::new(a.lat, b.lon),
                LatLon::new(b.lat, b.lon),
                LatLon::new(b.lat, a.lon),
            ],
        )
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_point(&self) -> bool {
        matches!(self.shape, Shape::Point(_))
    }

    /// Distinct vertices: the point itself, or the ring without its closing vertex
    pub fn open_vertices(&self) -> &[LatLon] {
        match &self.shape {
            Shape::Point(at) => std::slice::from_ref(at),
            Shape::Polygon { ring, .. } => ring.open_vertices(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match &self.shape {
            Shape::Point(at) => Bounds::point(*at),
            Shape::Polygon { ring, .. } => ring.bounds(),
        }
    }
}

/// `"Location (lat, lon)"` with both coordinates fixed to 4 decimals
pub fn point_label(at: LatLon) -> String {
    format!("Location ({:.4}, {:.4})", at.lat, at.lon)
}

/// Even-odd ray casting over an open vertex list
pub(crate) fn ray_cast(vertices: &[LatLon], at: LatLon) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        if ((vi.lat > at.lat) != (vj.lat > at.lat))
            && (at.lon < (vj.lon - vi.lon) * (at.lat - vi.lat) / (vj.lat - vi.lat) + vi.lon)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn count_distinct(vertices: &[LatLon]) -> usize {
    let mut seen: Vec<LatLon> = Vec::with_capacity(vertices.len());
    for v in vertices {
        if !seen.contains(v) {
            seen.push(*v);
        }
    }
    seen.len()
}

fn orientation(a: LatLon, b: LatLon, c: LatLon) -> f64 {
    (b.lon - a.lon) * (c.lat - a.lat) - (b.lat - a.lat) * (c.lon - a.lon)
}

fn within_segment_box(a: LatLon, b: LatLon, p: LatLon) -> bool {
    p.lon >= a.lon.min(b.lon)
        && p.lon <= a.lon.max(b.lon)
        && p.lat >= a.lat.min(b.lat)
        && p.lat <= a.lat.max(b.lat)
}

fn segments_intersect(p1: LatLon, p2: LatLon, q1: LatLon, q2: LatLon) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_segment_box(q1, q2, p1))
        || (d2 == 0.0 && within_segment_box(q1, q2, p2))
        || (d3 == 0.0 && within_segment_box(p1, p2, q1))
        || (d4 == 0.0 && within_segment_box(p1, p2, q2))
}

/// Any two non-adjacent edges touching, or an edge folding back onto its neighbour
fn self_intersects(vertices: &[LatLon]) -> bool {
    let n = vertices.len();
    let edge = |i: usize| (vertices[i], vertices[(i + 1) % n]);

    for i in 0..n {
        let (a, b) = edge(i);
        let (_, c) = edge((i + 1) % n);
        // Spike: next edge doubles back along this one
        if orientation(a, b, c) == 0.0 && within_segment_box(a, b, c) {
            return true;
        }
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (q1, q2) = edge(j);
            if segments_intersect(a, b, q1, q2) {
                return true;
            }
        }
    }
    false
}

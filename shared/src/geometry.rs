use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees, GeoJSON axis order (`[lng, lat]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(pair: [f64; 2]) -> Self {
        Self {
            lng: pair[0],
            lat: pair[1],
        }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(point: LngLat) -> Self {
        [point.lng, point.lat]
    }
}

/// Geographic bounding box, grown point by point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    /// The degenerate box covering a single point.
    pub const fn of(point: LngLat) -> Self {
        Self {
            west: point.lng,
            south: point.lat,
            east: point.lng,
            north: point.lat,
        }
    }

    pub fn extend(&mut self, point: LngLat) {
        self.west = self.west.min(point.lng);
        self.south = self.south.min(point.lat);
        self.east = self.east.max(point.lng);
        self.north = self.north.max(point.lat);
    }

    pub fn union(&mut self, other: Bounds) {
        self.west = self.west.min(other.west);
        self.south = self.south.min(other.south);
        self.east = self.east.max(other.east);
        self.north = self.north.max(other.north);
    }

    /// Vertex bounds of a ring, or `None` for an empty ring.
    pub fn from_ring(ring: &[LngLat]) -> Option<Self> {
        let (first, rest) = ring.split_first()?;
        let mut bounds = Self::of(*first);
        for point in rest {
            bounds.extend(*point);
        }
        Some(bounds)
    }
}

/// Even-odd crossing-number containment test against a single outer
/// ring. Only correct for simple, non-self-intersecting rings; holes
/// and multi-polygons are not handled. Rings with fewer than three
/// vertices contain nothing.
pub fn point_in_ring(point: LngLat, ring: &[LngLat]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let crossing = (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng;
            if point.lng < crossing {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

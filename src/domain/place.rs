//! Named places offered by the location search

use super::geometry::{Geometry, LatLon};

/// A named location with fixed coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Place {
    pub fn coords(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }

    /// Point selection labelled with the place name
    pub fn to_geometry(&self) -> Geometry {
        Geometry::named_point(self.coords(), self.name)
    }
}

pub const PLACES: &[Place] = &[
    Place {
        name: "Chennai",
        lat: 13.0827,
        lon: 80.2707,
    },
    Place {
        name: "Coimbatore",
        lat: 11.0168,
        lon: 76.9558,
    },
    Place {
        name: "Madurai",
        lat: 9.9252,
        lon: 78.1198,
    },
    Place {
        name: "Salem",
        lat: 11.6643,
        lon: 78.1460,
    },
    Place {
        name: "Tiruchirapalli",
        lat: 10.7905,
        lon: 78.7047,
    },
];

/// Case-insensitive substring match over the place table, table order kept
pub fn search(query: &str) -> Vec<&'static Place> {
    let needle = query.to_lowercase();
    PLACES
        .iter()
        .filter(|place| place.name.to_lowercase().contains(&needle))
        .collect()
}

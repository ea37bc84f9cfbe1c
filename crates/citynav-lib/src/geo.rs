//! Great-circle distance estimation.
//!
//! The haversine distance between two cities is the admissible heuristic used
//! by every search engine in this crate: a road between two cities can never
//! be shorter than the arc joining them on the Earth's surface.

use std::fmt;

use serde::Serialize;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MI: f64 = 3960.0;

/// Unit used when reporting a geodesic distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Earth radius expressed in this unit.
    pub fn earth_radius(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
            DistanceUnit::Miles => EARTH_RADIUS_MI,
        }
    }

    /// Convert a length in kilometres into this unit.
    pub fn from_kilometers(self, km: f64) -> f64 {
        km * self.earth_radius() / EARTH_RADIUS_KM
    }

    /// Short suffix used when printing distances.
    pub fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point, in kilometres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_distance(*self, *other, DistanceUnit::Kilometers)
    }
}

/// Compute the great-circle distance between two points with the haversine
/// formula.
///
/// The result is symmetric and exactly zero for identical inputs.
pub fn haversine_distance(a: Coordinates, b: Coordinates, unit: DistanceUnit) -> f64 {
    if a == b {
        return 0.0;
    }

    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).abs().to_radians();
    let d_lon = (b.longitude - a.longitude).abs().to_radians();

    let half_chord = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());

    unit.earth_radius() * angle
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARAD: Coordinates = Coordinates {
        latitude: 46.1866,
        longitude: 21.3123,
    };
    const BUCHAREST: Coordinates = Coordinates {
        latitude: 44.4268,
        longitude: 26.1025,
    };

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_distance(ARAD, ARAD, DistanceUnit::Kilometers), 0.0);
        assert_eq!(haversine_distance(ARAD, ARAD, DistanceUnit::Miles), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_distance(ARAD, BUCHAREST, DistanceUnit::Kilometers);
        let back = haversine_distance(BUCHAREST, ARAD, DistanceUnit::Kilometers);
        assert_eq!(there, back);
    }

    #[test]
    fn arad_to_bucharest_is_roughly_four_hundred_km() {
        let km = ARAD.distance_to(&BUCHAREST);
        assert!((km - 420.0).abs() < 15.0, "got {km}");
    }

    #[test]
    fn miles_scale_with_earth_radius() {
        let km = haversine_distance(ARAD, BUCHAREST, DistanceUnit::Kilometers);
        let mi = haversine_distance(ARAD, BUCHAREST, DistanceUnit::Miles);
        let expected = km * EARTH_RADIUS_MI / EARTH_RADIUS_KM;
        assert!((mi - expected).abs() < 1e-9);
        assert!((DistanceUnit::Miles.from_kilometers(km) - mi).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        let km = haversine_distance(a, b, DistanceUnit::Kilometers);
        assert!((km - 111.19).abs() < 0.01, "got {km}");
    }

    #[test]
    fn unit_display_uses_suffix() {
        assert_eq!(DistanceUnit::Kilometers.to_string(), "km");
        assert_eq!(DistanceUnit::Miles.to_string(), "mi");
    }
}

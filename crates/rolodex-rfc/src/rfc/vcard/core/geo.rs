//! Geographic position (GEO property and GEO parameter).

use crate::error::{RfcError, RfcResult};

/// Default tolerance of [`GeoCoordinate::is_same_position`] in meters.
///
/// One micro-degree of latitude is about 0.111 m, the resolution left after
/// rounding to six decimals.
pub const DEFAULT_MIN_DISTANCE_METERS: f64 = 0.11;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
const DECIMAL_PLACES_FACTOR: f64 = 1_000_000.0;

/// Latitude/longitude pair in decimal degrees (WGS 84).
///
/// Always normalized to `[-90, 90]` / `[-180, 180]` and rounded to six
/// decimal places.
///
/// Equality is [`GeoCoordinate::is_same_position`] with
/// [`DEFAULT_MIN_DISTANCE_METERS`]. It is not transitive, so the type
/// implements neither `Eq` nor `Hash`; use [`GeoCoordinate::micro_degrees`]
/// as a key for exact lookups.
#[derive(Debug, Clone, Copy)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Creates a coordinate.
    ///
    /// Slightly over-range input is tolerated: a latitude up to 10° past a
    /// pole continues on the other side of it (the longitude moves by 180°),
    /// and a longitude up to 20° past the antimeridian wraps around.
    ///
    /// ## Errors
    /// Returns [`RfcError::ValueOutOfRange`] for non-finite values, latitudes
    /// beyond ±100° or longitudes beyond ±200°.
    pub fn new(latitude: f64, longitude: f64) -> RfcResult<Self> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || latitude.abs() > 100.0
            || longitude.abs() > 200.0
        {
            return Err(RfcError::ValueOutOfRange(format!(
                "geo coordinate {latitude}, {longitude}"
            )));
        }

        let (latitude, longitude) = if latitude > 90.0 {
            (180.0 - latitude, longitude + 180.0)
        } else if latitude < -90.0 {
            (-180.0 - latitude, longitude + 180.0)
        } else {
            (latitude, longitude)
        };

        let longitude = if longitude > 180.0 {
            longitude - 360.0
        } else if longitude < -180.0 {
            longitude + 360.0
        } else {
            longitude
        };

        Ok(Self {
            latitude: round6(latitude),
            longitude: round6(longitude),
        })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude and longitude in whole micro-degrees, the exact stored
    /// position.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "normalized degrees times 1e6 fit in i32"
    )]
    pub fn micro_degrees(&self) -> (i32, i32) {
        (
            (self.latitude * DECIMAL_PLACES_FACTOR).round() as i32,
            (self.longitude * DECIMAL_PLACES_FACTOR).round() as i32,
        )
    }

    /// Approximate distance to `other` in meters.
    ///
    /// Uses the equirectangular projection, which is accurate for the short
    /// distances this type compares.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let d_lon = if d_lon > std::f64::consts::PI {
            d_lon - std::f64::consts::TAU
        } else if d_lon < -std::f64::consts::PI {
            d_lon + std::f64::consts::TAU
        } else {
            d_lon
        };

        let x = d_lon * ((lat1 + lat2) / 2.0).cos();
        let y = lat2 - lat1;
        x.hypot(y) * EARTH_RADIUS_METERS
    }

    /// Returns whether `other` lies within `min_distance_meters`.
    #[must_use]
    pub fn is_same_position(&self, other: &Self, min_distance_meters: f64) -> bool {
        self.distance_to(other) <= min_distance_meters
    }
}

impl PartialEq for GeoCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_position(other, DEFAULT_MIN_DISTANCE_METERS)
    }
}

fn round6(value: f64) -> f64 {
    let rounded = (value * DECIMAL_PLACES_FACTOR).round() / DECIMAL_PLACES_FACTOR;
    // normalize -0.0
    if rounded.abs() < f64::EPSILON { 0.0 } else { rounded }
}

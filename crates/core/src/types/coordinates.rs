//! Geographic coordinate pair.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing [`Coordinates`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CoordinatesError {
    /// Latitude outside the valid range.
    #[error("latitude must be between -90 and 90 (got {0})")]
    LatitudeOutOfRange(Decimal),
    /// Longitude outside the valid range.
    #[error("longitude must be between -180 and 180 (got {0})")]
    LongitudeOutOfRange(Decimal),
}

/// A validated latitude/longitude pair.
///
/// Stored as `Decimal` rather than `f64` so values round-trip through the
/// database's `NUMERIC` columns without drift. Map clients consume these
/// verbatim as GeoJSON-style lat/lng.
///
/// ```
/// use haven_core::Coordinates;
/// use rust_decimal::Decimal;
///
/// let c = Coordinates::new(Decimal::new(-235505199, 7), Decimal::new(-465395699, 7));
/// assert!(c.is_ok());
/// assert!(Coordinates::new(Decimal::from(91), Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: Decimal,
    longitude: Decimal,
}

impl Coordinates {
    /// Create a validated coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns an error when latitude is outside ±90 or longitude outside ±180.
    pub fn new(latitude: Decimal, longitude: Decimal) -> Result<Self, CoordinatesError> {
        let lat_limit = Decimal::from(90);
        let lng_limit = Decimal::from(180);

        if latitude < -lat_limit || latitude > lat_limit {
            return Err(CoordinatesError::LatitudeOutOfRange(latitude));
        }
        if longitude < -lng_limit || longitude > lng_limit {
            return Err(CoordinatesError::LongitudeOutOfRange(longitude));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude component.
    #[must_use]
    pub const fn latitude(&self) -> Decimal {
        self.latitude
    }

    /// Longitude component.
    #[must_use]
    pub const fn longitude(&self) -> Decimal {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let c = Coordinates::new(Decimal::new(-235505199, 7), Decimal::new(-465395699, 7))
            .expect("valid coordinates");
        assert_eq!(c.latitude(), Decimal::new(-235505199, 7));
        assert_eq!(c.longitude(), Decimal::new(-465395699, 7));
    }

    #[test]
    fn test_latitude_out_of_range() {
        let err = Coordinates::new(Decimal::from(91), Decimal::ZERO);
        assert!(matches!(err, Err(CoordinatesError::LatitudeOutOfRange(_))));

        let err = Coordinates::new(Decimal::from(-91), Decimal::ZERO);
        assert!(matches!(err, Err(CoordinatesError::LatitudeOutOfRange(_))));
    }

    #[test]
    fn test_longitude_out_of_range() {
        let err = Coordinates::new(Decimal::ZERO, Decimal::from(181));
        assert!(matches!(err, Err(CoordinatesError::LongitudeOutOfRange(_))));
    }

    #[test]
    fn test_boundary_values_accepted() {
        assert!(Coordinates::new(Decimal::from(90), Decimal::from(180)).is_ok());
        assert!(Coordinates::new(Decimal::from(-90), Decimal::from(-180)).is_ok());
    }
}

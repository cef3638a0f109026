//! Distances measured from coordinates.
//!
//! Uses the Haversine formula, which is accurate to well under a percent at
//! the scale of a city.

use geo::{HaversineDistance, Point};

use crate::distance::Meters;
use crate::error::{LabelError, Result};
use crate::landmark::Landmark;

/// Haversine distance between two points
pub fn haversine_distance(p1: Point, p2: Point) -> Meters {
    Meters(p1.haversine_distance(&p2))
}

/// Reject points outside the valid latitude/longitude ranges.
pub fn validate_point(point: Point) -> Result<Point> {
    let (lon, lat) = (point.x(), point.y());

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(LabelError::InvalidCoordinate { lat, lon });
    }

    Ok(point)
}

/// Distance from `point` to `landmark`.
///
/// [`Landmark::CityCenter`] has no fixed location, so `city_center` is used
/// for it; `None` means there is nothing to measure against.
pub fn distance_to_landmark(
    point: Point,
    landmark: Landmark,
    city_center: Option<Point>,
) -> Option<Meters> {
    let reference = landmark.location().or(city_center)?;
    let distance = haversine_distance(point, reference);

    tracing::debug!(
        landmark = landmark.as_str(),
        meters = distance.value(),
        "measured distance to landmark"
    );

    Some(distance)
}

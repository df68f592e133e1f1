//! Great-circle distance math for guess evaluation.

use crate::constants::EARTH_RADIUS_KM;

/// Haversine great-circle distance between two points, in kilometers.
///
/// Inputs are degrees. Behavior for non-finite input is undefined; callers
/// must validate coordinates before invoking (see `Prompt::coords`).
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FLOAT_EPSILON;

    const PARIS: (f64, f64) = (48.8566, 2.3522);
    const LONDON: (f64, f64) = (51.5074, -0.1278);
    const NEW_YORK: (f64, f64) = (40.7128, -74.0060);

    #[test]
    fn distance_to_self_is_zero() {
        assert!(haversine_km(PARIS.0, PARIS.1, PARIS.0, PARIS.1).abs() < FLOAT_EPSILON);
        assert!(haversine_km(0.0, 0.0, 0.0, 0.0).abs() < FLOAT_EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = haversine_km(PARIS.0, PARIS.1, NEW_YORK.0, NEW_YORK.1);
        let backward = haversine_km(NEW_YORK.0, NEW_YORK.1, PARIS.0, PARIS.1);
        assert!((forward - backward).abs() < FLOAT_EPSILON);
    }

    #[test]
    fn known_city_pairs_match_reference_distances() {
        let paris_london = haversine_km(PARIS.0, PARIS.1, LONDON.0, LONDON.1);
        assert!(
            (paris_london - 344.0).abs() < 5.0,
            "Paris-London should be ~344 km, got {paris_london}"
        );

        let paris_ny = haversine_km(PARIS.0, PARIS.1, NEW_YORK.0, NEW_YORK.1);
        assert!(
            (paris_ny - 5_837.0).abs() < 20.0,
            "Paris-New York should be ~5837 km, got {paris_ny}"
        );
    }

    #[test]
    fn antipodal_points_approach_half_circumference() {
        let half = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!((half - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1.0);
    }
}

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two lat/lon points in kilometers.
///
/// Standard haversine formula. Symmetric in its arguments and zero for
/// identical coordinates.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Lat/lon rectangle used to pre-filter candidates before the exact
/// haversine check
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Box of roughly `radius_km` around a center point.
    /// 1° latitude ≈ 111 km; 1° longitude shrinks by cos(latitude).
    ///
    /// The box must contain every point within the radius, never clip it.
    /// A great circle reaches its widest longitude offset away from the
    /// center latitude, so the delta is computed with the cosine of the
    /// box's most poleward edge rather than the center.
    pub fn around(lat: f64, lon: f64, radius_km: f64) -> Self {
        let lat_delta = radius_km / 111.0;
        let edge_lat = (lat.abs() + lat_delta).min(89.9);
        let lon_delta = radius_km / (111.0 * edge_lat.to_radians().cos());

        Self {
            min_lat: lat - lat_delta,
            max_lat: lat + lat_delta,
            min_lon: lon - lon_delta,
            max_lon: lon + lon_delta,
        }
    }

    #[inline]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // London to Paris is approximately 344 km
        let distance = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
        assert!(
            (distance - 344.0).abs() < 10.0,
            "Distance should be ~344km, got {}",
            distance
        );
    }

    #[test]
    fn test_haversine_symmetric() {
        let ab = haversine_distance(35.6762, 139.6503, -33.8688, 151.2093);
        let ba = haversine_distance(-33.8688, 151.2093, 35.6762, 139.6503);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_identical_points() {
        let distance = haversine_distance(38.7223, -9.1393, 38.7223, -9.1393);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_bounding_box_around() {
        let bbox = BoundingBox::around(40.7128, -74.0060, 10.0);

        assert!(bbox.contains(40.7128, -74.0060));
        assert!(bbox.contains(40.71, -74.0));
        assert!(!bbox.contains(50.0, -80.0));

        // 20km span / 111km per degree ≈ 0.18 degrees of latitude
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.18).abs() < 0.02);
    }

    #[test]
    fn test_bounding_box_covers_radius_at_high_latitude() {
        // East of a 60°N center, a point just inside a 1000 km radius sits
        // at a longitude offset wider than cos(60°) alone would allow
        let bbox = BoundingBox::around(60.0, 0.0, 1000.0);
        let distance = haversine_distance(60.0, 0.0, 61.2, 18.1);

        assert!(distance < 1000.0, "test point should be inside the radius");
        assert!(bbox.contains(61.2, 18.1), "box must not clip points inside the radius");
    }

    #[test]
    fn test_bounding_box_near_pole() {
        let bbox = BoundingBox::around(80.0, 0.0, 500.0);

        // Every point within the radius must be inside the box
        for lon in [-30.0, -15.0, 0.0, 15.0, 30.0] {
            let distance = haversine_distance(80.0, 0.0, 81.0, lon);
            if distance <= 500.0 {
                assert!(bbox.contains(81.0, lon), "clipped point at lon {}", lon);
            }
        }
    }
}

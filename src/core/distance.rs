use crate::models::{BoundingBox, Family, GeoPoint};

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine)
///
/// Inputs are not range checked; out-of-range or non-finite coordinates
/// produce whatever the formula yields, including `NaN`.
#[inline]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculate a bounding box around a center point
///
/// Much cheaper than haversine, used as a pre-filter.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
pub fn bounding_box(center: GeoPoint, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / 111.0;
    let lon_delta = radius_km / (111.0 * center.latitude.to_radians().cos().abs());

    BoundingBox {
        min_lat: center.latitude - lat_delta,
        max_lat: center.latitude + lat_delta,
        min_lon: center.longitude - lon_delta,
        max_lon: center.longitude + lon_delta,
    }
}

/// Bounding box usable as a pre-filter, `None` when a plain min/max box would
/// wrongly reject points (box crosses the antimeridian or spans a pole)
fn prefilter_box(center: GeoPoint, radius_km: f64) -> Option<BoundingBox> {
    let bbox = bounding_box(center, radius_km);
    let lon_span = bbox.max_lon - bbox.min_lon;
    if !lon_span.is_finite() || lon_span >= 360.0 || bbox.min_lon < -180.0 || bbox.max_lon > 180.0 {
        return None;
    }
    Some(bbox)
}

/// Whether `point` lies within `radius_km` of `center` (inclusive)
#[inline]
pub fn within_radius(center: GeoPoint, point: GeoPoint, radius_km: f64) -> bool {
    prefilter_box(center, radius_km).map_or(true, |bbox| bbox.contains(point))
        && distance_km(center, point) <= radius_km
}

/// Keep only the families located within `radius_km` of `center`
pub fn families_within(families: Vec<Family>, center: GeoPoint, radius_km: f64) -> Vec<Family> {
    let bbox = prefilter_box(center, radius_km);
    families
        .into_iter()
        .filter(|f| bbox.map_or(true, |b| b.contains(f.location)))
        .filter(|f| distance_km(center, f.location) <= radius_km)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_london_paris() {
        // Approximately 344 km
        let london = GeoPoint::new(-0.1278, 51.5074);
        let paris = GeoPoint::new(2.3522, 48.8566);

        let distance = distance_km(london, paris);
        assert!((distance - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", distance);
    }

    #[test]
    fn test_distance_zero_and_symmetric() {
        let a = GeoPoint::new(139.6917, 35.6895);
        let b = GeoPoint::new(135.5023, 34.6937);

        assert_eq!(distance_km(a, a), 0.0);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_swapped_axes_give_different_distance() {
        let origin = GeoPoint::new(0.0, 0.0);
        let p = GeoPoint::new(10.0, 60.0);
        let swapped = GeoPoint::new(60.0, 10.0);

        assert!((distance_km(origin, p) - distance_km(origin, swapped)).abs() > 1.0);
    }

    #[test]
    fn test_nan_propagates() {
        let a = GeoPoint::new(f64::NAN, 0.0);
        let b = GeoPoint::new(0.0, 0.0);
        assert!(distance_km(a, b).is_nan());
    }

    #[test]
    fn test_matches_geo_haversine() {
        use geo::{HaversineDistance, Point};

        let a = GeoPoint::new(-74.0060, 40.7128);
        let b = GeoPoint::new(-73.9442, 40.6782);

        let ours = distance_km(a, b);
        // geo uses a mean radius of 6371.0088 km and returns meters
        let theirs = Point::from(a).haversine_distance(&Point::from(b)) / 1000.0;
        assert!((ours - theirs).abs() / theirs < 1e-5);
    }

    #[test]
    fn test_bounding_box() {
        let center = GeoPoint::new(-74.0060, 40.7128);
        let bbox = bounding_box(center, 10.0);

        assert!(bbox.min_lat < 40.7128);
        assert!(bbox.max_lat > 40.7128);
        assert!(bbox.min_lon < -74.0060);
        assert!(bbox.max_lon > -74.0060);

        // 20km / 111km per degree = ~0.18 degrees
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.18).abs() < 0.02, "Lat span should be ~0.18 degrees");
    }

    #[test]
    fn test_within_radius() {
        let center = GeoPoint::new(-74.0060, 40.7128);

        assert!(within_radius(center, center, 5.0));
        assert!(within_radius(center, GeoPoint::new(-74.0, 40.71), 5.0));
        assert!(!within_radius(center, GeoPoint::new(-80.0, 50.0), 5.0));
    }

    #[test]
    fn test_families_within() {
        let center = GeoPoint::new(0.0, 0.0);
        let families = vec![
            Family::new("near", "Near", 2, GeoPoint::new(0.0, 0.01)),
            Family::new("far", "Far", 3, GeoPoint::new(0.0, 1.0)),
        ];

        let kept = families_within(families, center, 5.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "near");
    }

    #[test]
    fn test_radius_across_antimeridian() {
        let center = GeoPoint::new(179.995, 10.0);
        let across = GeoPoint::new(-179.995, 10.0);
        assert!(distance_km(center, across) < 2.0);

        assert!(within_radius(center, across, 5.0));
        assert!(within_radius(across, center, 5.0));

        let kept = families_within(vec![Family::new("across", "Across", 2, across)], center, 5.0);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_radius_near_pole() {
        let center = GeoPoint::new(0.0, 89.999);
        let opposite = GeoPoint::new(180.0, 89.999);

        assert!(within_radius(center, opposite, 5.0));
    }
}

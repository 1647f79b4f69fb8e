use glam::DVec3;

/// A geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    /// Longitude (-180 to 180)
    pub lon: f64,
    /// Latitude (-90 to 90)
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Convert to a unit sphere vector (x toward lon 0, z toward the north pole).
    #[inline(always)]
    pub fn to_unit_vector(self) -> DVec3 {
        let lon_rad = self.lon.to_radians();
        let lat_rad = self.lat.to_radians();
        DVec3::new(
            lat_rad.cos() * lon_rad.cos(),
            lat_rad.cos() * lon_rad.sin(),
            lat_rad.sin(),
        )
    }

    /// Inverse of [`GeoPoint::to_unit_vector`]. The vector need not be normalized.
    #[inline(always)]
    pub fn from_unit_vector(v: DVec3) -> Self {
        let len = v.length();
        let lat = (v.z / len).clamp(-1.0, 1.0).asin().to_degrees();
        let lon = v.y.atan2(v.x).to_degrees();
        Self { lon, lat }
    }
}

/// Wrap an angle in degrees into [-180, 180)
#[inline(always)]
pub fn wrap_degrees(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Great-circle angular distance in radians, in [0, π].
/// Haversine form so that nearby points keep their precision.
pub fn angular_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt())
}

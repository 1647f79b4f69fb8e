use glam::{DMat3, DVec2, DVec3};

use crate::geo::{wrap_degrees, GeoPoint};
use crate::globe::lod::Ring;

/// Globe orientation in degrees, applied as yaw about the polar axis,
/// then pitch, then roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    /// λ
    pub yaw: f64,
    /// φ
    pub pitch: f64,
    /// γ
    pub roll: f64,
}

impl Rotation {
    pub const fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    /// World-to-view rotation matrix. After rotation the view direction is +x,
    /// screen right is +y and screen up is +z.
    fn matrix(self) -> DMat3 {
        DMat3::from_rotation_x(self.roll.to_radians())
            * DMat3::from_rotation_y(-self.pitch.to_radians())
            * DMat3::from_rotation_z(self.yaw.to_radians())
    }
}

/// Screen-space polylines for one set of land outlines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandPath {
    pub subpaths: Vec<Vec<DVec2>>,
}

impl LandPath {
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Number of vertices across all sub-paths
    pub fn vertex_count(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    /// SVG path data (`M x,y L x,y ...`) for surfaces that consume strings.
    pub fn to_svg(&self) -> String {
        use std::fmt::Write;

        let mut d = String::with_capacity(self.vertex_count() * 16);
        for subpath in &self.subpaths {
            for (i, p) in subpath.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{cmd}{:.1},{:.1}", p.x, p.y);
            }
        }
        d
    }
}

/// Orthographic projection state: the single source of truth for rotation,
/// scale and the screen-space origin of the globe.
#[derive(Clone, Copy, Debug)]
pub struct ProjectionState {
    rotation: Rotation,
    matrix: DMat3,
    scale: f64,
    base_scale: f64,
    scale_divisor: f64,
    /// Viewport center, the point the culler inverts
    center: DVec2,
    /// Screen position of the globe's center
    translate: DVec2,
}

/// Smallest base scale, so an empty viewport still has a positive scale
const MIN_BASE_SCALE: f64 = 1e-3;

fn base_scale_for(width: f64, height: f64, scale_divisor: f64) -> f64 {
    // f64::max discards NaN
    (width.min(height) / scale_divisor).max(MIN_BASE_SCALE)
}

impl ProjectionState {
    pub fn new(rotation: Rotation, width: f64, height: f64, scale_divisor: f64) -> Self {
        let base_scale = base_scale_for(width, height, scale_divisor);
        let center = DVec2::new(width / 2.0, height / 2.0);
        let mut state = Self {
            rotation,
            matrix: DMat3::IDENTITY,
            scale: base_scale,
            base_scale,
            scale_divisor,
            center,
            translate: center,
        };
        state.set_rotation(rotation);
        state
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Set the rotation; yaw is wrapped into [-180, 180) and pitch clamped to the poles.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = Rotation {
            yaw: wrap_degrees(rotation.yaw),
            pitch: rotation.pitch.clamp(-90.0, 90.0),
            roll: rotation.roll,
        };
        self.matrix = self.rotation.matrix();
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn base_scale(&self) -> f64 {
        self.base_scale
    }

    /// Current scale relative to the base scale
    pub fn zoom_factor(&self) -> f64 {
        self.scale / self.base_scale
    }

    /// Set scale to `base_scale * factor`. Callers clamp the factor.
    pub fn set_zoom_factor(&mut self, factor: f64) {
        self.scale = self.base_scale * factor;
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn translate(&self) -> DVec2 {
        self.translate
    }

    /// Re-center on a new viewport, keeping the zoom factor.
    pub fn resize(&mut self, width: f64, height: f64) {
        let factor = match self.zoom_factor() {
            f if f.is_finite() && f > 0.0 => f,
            _ => 1.0,
        };
        self.base_scale = base_scale_for(width, height, self.scale_divisor);
        self.scale = self.base_scale * factor;
        self.center = DVec2::new(width / 2.0, height / 2.0);
        self.translate = self.center;
    }

    /// Rotate a world unit vector into view space.
    #[inline(always)]
    fn to_view(&self, v: DVec3) -> DVec3 {
        self.matrix * v
    }

    #[inline(always)]
    fn view_to_screen(&self, v: DVec3) -> DVec2 {
        DVec2::new(self.translate.x + self.scale * v.y, self.translate.y - self.scale * v.z)
    }

    /// Project a geographic point to screen coordinates.
    ///
    /// Total: far-side points land inside the disc as if seen through the globe.
    /// Use the culler to tell them apart.
    pub fn project(&self, p: GeoPoint) -> DVec2 {
        self.view_to_screen(self.to_view(p.to_unit_vector()))
    }

    /// True when `p` lies on the hemisphere facing the viewer.
    #[cfg(test)]
    pub(crate) fn is_front_facing(&self, p: GeoPoint) -> bool {
        self.to_view(p.to_unit_vector()).x >= 0.0
    }

    /// Unit-disc coordinates of a screen point
    #[inline(always)]
    fn screen_to_disc(&self, screen: DVec2) -> DVec2 {
        DVec2::new(
            (screen.x - self.translate.x) / self.scale,
            (self.translate.y - screen.y) / self.scale,
        )
    }

    fn disc_to_geo(&self, disc: DVec2) -> GeoPoint {
        let depth = (1.0 - disc.length_squared()).max(0.0).sqrt();
        let world = self.matrix.transpose() * DVec3::new(depth, disc.x, disc.y);
        GeoPoint::from_unit_vector(world)
    }

    /// Geographic point under a screen position, or `None` outside the projected disc.
    pub fn invert(&self, screen: DVec2) -> Option<GeoPoint> {
        let disc = self.screen_to_disc(screen);
        let r2 = disc.length_squared();
        if !(r2 <= 1.0) {
            return None;
        }
        Some(self.disc_to_geo(disc))
    }

    /// Like [`ProjectionState::invert`], but points outside the disc are pulled
    /// onto its silhouette.
    pub fn invert_clamped(&self, screen: DVec2) -> GeoPoint {
        let disc = self.screen_to_disc(screen);
        let r2 = disc.length_squared();
        if r2 > 1.0 {
            self.disc_to_geo(disc / r2.sqrt())
        } else {
            self.disc_to_geo(disc)
        }
    }

    /// Project rings to screen polylines, clipped at the horizon.
    pub fn path_for(&self, rings: &[Ring]) -> LandPath {
        let mut path = LandPath::default();
        for ring in rings {
            self.clip_ring(ring, &mut path.subpaths);
        }
        path
    }

    fn clip_ring(&self, ring: &Ring, out: &mut Vec<Vec<DVec2>>) {
        let points = ring.points();
        if points.len() < 2 {
            return;
        }

        let first_subpath = out.len();
        let mut current: Vec<DVec2> = Vec::new();
        let mut prev = self.to_view(points[0]);
        if prev.x >= 0.0 {
            current.push(self.view_to_screen(prev));
        }

        for &world in &points[1..] {
            let next = self.to_view(world);
            match (prev.x >= 0.0, next.x >= 0.0) {
                (true, true) => current.push(self.view_to_screen(next)),
                (true, false) => {
                    current.push(self.view_to_screen(horizon_crossing(prev, next)));
                    if current.len() >= 2 {
                        out.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
                (false, true) => {
                    current.push(self.view_to_screen(horizon_crossing(prev, next)));
                    current.push(self.view_to_screen(next));
                }
                (false, false) => {}
            }
            prev = next;
        }

        if current.len() >= 2 {
            // A closed ring that was split at the horizon: join its tail to the
            // head sub-path so the outline has no seam at the start vertex.
            let closed = points.first() == points.last();
            let head_is_ours = out.len() > first_subpath;
            if closed && head_is_ours && self.to_view(points[0]).x >= 0.0 {
                let mut head = out.remove(first_subpath);
                current.extend(head.drain(1..));
                out.insert(first_subpath, current);
            } else {
                out.push(current);
            }
        }
    }
}

/// Point where the great circle through view-space `a` and `b` meets the horizon (x = 0).
#[inline(always)]
fn horizon_crossing(a: DVec3, b: DVec3) -> DVec3 {
    let t = a.x / (a.x - b.x);
    let p = a.lerp(b, t);
    let p = DVec3::new(0.0, p.y, p.z);
    p.try_normalize().unwrap_or(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::angular_distance;

    fn state(rotation: Rotation, zoom: f64) -> ProjectionState {
        let mut s = ProjectionState::new(rotation, 1366.0, 768.0, 2.1);
        s.set_zoom_factor(zoom);
        s
    }

    #[test]
    fn test_project_center() {
        let s = state(Rotation::new(0.0, 0.0, 0.0), 1.0);
        let p = s.project(GeoPoint::new(0.0, 0.0));
        assert!((p - DVec2::new(683.0, 384.0)).length() < 1e-9);
    }

    #[test]
    fn test_yaw_brings_longitude_to_center() {
        // Yaw -L centers longitude L
        let s = state(Rotation::new(-40.0, 0.0, 0.0), 1.0);
        let p = s.project(GeoPoint::new(40.0, 0.0));
        assert!((p - s.center()).length() < 1e-9);
    }

    #[test]
    fn test_pitch_brings_latitude_to_center() {
        let s = state(Rotation::new(0.0, -30.0, 0.0), 1.0);
        let p = s.project(GeoPoint::new(0.0, 30.0));
        assert!((p - s.center()).length() < 1e-9);
        // North stays up
        let north = s.project(GeoPoint::new(0.0, 60.0));
        assert!(north.y < p.y);
    }

    #[test]
    fn test_invert_round_trip_inside_disc() {
        let rotations = [
            Rotation::new(0.0, 0.0, 0.0),
            Rotation::new(-240.0, -15.0, 0.0),
            Rotation::new(73.0, 41.0, 12.0),
            Rotation::new(170.0, -80.0, -30.0),
        ];
        for rotation in rotations {
            for zoom in [1.0, 2.5, 40.0] {
                let mut s = state(rotation, zoom);
                s.set_rotation(rotation);
                let r = s.scale();
                for (fx, fy) in [(0.0, 0.0), (0.5, 0.2), (-0.7, 0.6), (0.1, -0.95), (-0.3, -0.3)] {
                    let screen = s.translate() + DVec2::new(fx * r, fy * r);
                    let geo = s.invert(screen).unwrap();
                    let back = s.project(geo);
                    assert!((back - screen).length() < 1e-6, "{rotation:?} zoom {zoom}: {screen} -> {back}");
                }
            }
        }
    }

    #[test]
    fn test_invert_outside_disc_is_none() {
        let s = state(Rotation::new(0.0, 0.0, 0.0), 1.0);
        let outside = s.translate() + DVec2::new(s.scale() * 1.01, 0.0);
        assert!(s.invert(outside).is_none());
    }

    #[test]
    fn test_invert_clamped_lands_on_horizon() {
        let s = state(Rotation::new(0.0, 0.0, 0.0), 1.0);
        let outside = s.translate() + DVec2::new(s.scale() * 3.0, 0.0);
        let geo = s.invert_clamped(outside);
        let d = angular_distance(geo, GeoPoint::new(0.0, 0.0));
        assert!((d - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((geo.lon - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_rotation_wraps_and_clamps() {
        let mut s = state(Rotation::new(0.0, 0.0, 0.0), 1.0);
        s.set_rotation(Rotation::new(-240.0, 120.0, 5.0));
        assert!((s.rotation().yaw - 120.0).abs() < 1e-12);
        assert_eq!(s.rotation().pitch, 90.0);
        assert_eq!(s.rotation().roll, 5.0);
    }

    #[test]
    fn test_resize_keeps_zoom_factor() {
        let mut s = state(Rotation::new(0.0, 0.0, 0.0), 3.0);
        s.resize(400.0, 200.0);
        assert!((s.zoom_factor() - 3.0).abs() < 1e-12);
        assert!((s.base_scale() - 200.0 / 2.1).abs() < 1e-12);
        assert_eq!(s.center(), DVec2::new(200.0, 100.0));
    }

    #[test]
    fn test_empty_viewport_keeps_scale_positive() {
        let mut s = state(Rotation::new(0.0, 0.0, 0.0), 3.0);
        s.resize(0.0, 0.0);
        assert!(s.base_scale() > 0.0);
        assert!((s.zoom_factor() - 3.0).abs() < 1e-9);
        let p = s.invert_clamped(DVec2::new(5.0, 3.0));
        assert!(p.lon.is_finite() && p.lat.is_finite());

        s.resize(400.0, 200.0);
        assert!((s.zoom_factor() - 3.0).abs() < 1e-9);
        assert!((s.scale() - 3.0 * 200.0 / 2.1).abs() < 1e-9);

        let empty = ProjectionState::new(Rotation::new(0.0, 0.0, 0.0), 0.0, 0.0, 2.1);
        assert!(empty.scale() > 0.0);
        assert_eq!(empty.zoom_factor(), 1.0);
    }

    #[test]
    fn test_path_clips_far_side() {
        let s = state(Rotation::new(0.0, 0.0, 0.0), 1.0);
        // Equator ring from lon -60 to 240 crosses the horizon at lon 90
        let ring = Ring::from_lonlat(&[(-60.0, 0.0), (60.0, 0.0), (120.0, 0.0), (180.0, 0.0)], 2.0);
        let path = s.path_for(&[ring]);
        assert_eq!(path.subpaths.len(), 1);
        for p in &path.subpaths[0] {
            assert!((*p - s.translate()).length() <= s.scale() + 1e-6);
        }
        // Last vertex is on the silhouette
        let last = *path.subpaths[0].last().unwrap();
        assert!(((last - s.translate()).length() - s.scale()).abs() < 1e-6);
    }

    #[test]
    fn test_path_fully_hidden_ring_is_empty() {
        let s = state(Rotation::new(0.0, 0.0, 0.0), 1.0);
        let ring = Ring::from_lonlat(&[(170.0, 10.0), (-170.0, 10.0), (-170.0, -10.0), (170.0, -10.0), (170.0, 10.0)], 2.0);
        assert!(s.path_for(&[ring]).is_empty());
    }

    #[test]
    fn test_path_closed_ring_has_no_seam() {
        let s = state(Rotation::new(0.0, 0.0, 0.0), 1.0);
        // Ring starting on the front, dipping behind the horizon and back
        let ring = Ring::from_lonlat(
            &[(0.0, 0.0), (60.0, 0.0), (120.0, 0.0), (120.0, 20.0), (60.0, 20.0), (0.0, 20.0), (0.0, 0.0)],
            2.0,
        );
        let path = s.path_for(&[ring]);
        assert_eq!(path.subpaths.len(), 1);
    }

    #[test]
    fn test_svg_output() {
        let path = LandPath {
            subpaths: vec![vec![DVec2::new(1.0, 2.0), DVec2::new(3.26, 4.0)]],
        };
        assert_eq!(path.to_svg(), "M1.0,2.0L3.3,4.0");
    }
}

use glam::DVec2;

use crate::braille::BrailleCanvas;
use crate::globe::lod::Lod;
use crate::globe::marker::Marker;
use crate::globe::projection::LandPath;
use crate::globe::render::{DrawSurface, MarkerSprite, WaterDisc};

/// Braille drawing surface with one canvas per layer, so the terminal can
/// color water, land and markers independently.
pub struct BrailleSurface {
    pub water: BrailleCanvas,
    pub land: BrailleCanvas,
    pub markers: BrailleCanvas,
    marker_radius: i32,
}

impl BrailleSurface {
    /// Create a surface of `width` x `height` characters.
    pub fn new(width: usize, height: usize, marker_radius: f64) -> Self {
        Self {
            water: BrailleCanvas::new(width, height),
            land: BrailleCanvas::new(width, height),
            markers: BrailleCanvas::new(width, height),
            marker_radius: marker_radius.round().max(0.0) as i32,
        }
    }

    /// Draw a segment after clipping it to the canvas, so far off-screen
    /// vertices at high zoom cost nothing to rasterize.
    fn segment(canvas: &mut BrailleCanvas, a: DVec2, b: DVec2) {
        let max = DVec2::new(canvas.pixel_width() as f64, canvas.pixel_height() as f64);
        if let Some((a, b)) = clip_segment(a, b, DVec2::splat(-1.0), max) {
            canvas.line(
                a.x.round() as i32,
                a.y.round() as i32,
                b.x.round() as i32,
                b.y.round() as i32,
            );
        }
    }
}

impl DrawSurface for BrailleSurface {
    fn begin_frame(&mut self) {
        self.water.clear();
        self.land.clear();
        self.markers.clear();
    }

    fn water(&mut self, disc: &WaterDisc) {
        self.water.circle(disc.center.x, disc.center.y, disc.radius);
    }

    fn land(&mut self, path: &LandPath, _lod: Lod) {
        for subpath in &path.subpaths {
            for pair in subpath.windows(2) {
                Self::segment(&mut self.land, pair[0], pair[1]);
            }
        }
    }

    fn marker(&mut self, sprite: &MarkerSprite, _marker: &Marker) {
        if !sprite.visible || !sprite.position.is_finite() {
            return;
        }
        self.markers.dot(
            sprite.position.x.round() as i32,
            sprite.position.y.round() as i32,
            self.marker_radius,
        );
    }
}

/// Liang-Barsky clip of segment `a`-`b` to the box [min, max].
fn clip_segment(a: DVec2, b: DVec2, min: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }

    let d = b - a;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((a + d * t0, a + d * t1))
}

use glam::DVec3;
use rayon::prelude::*;

use crate::geo::GeoPoint;
use crate::globe::interaction::InteractionState;

/// A geographic line (sequence of lon/lat coordinates)
pub type LineString = Vec<(f64, f64)>;

/// Level of detail for land outlines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lod {
    /// Cheap outlines drawn while the user drags or zooms
    Coarse,
    /// Full outlines drawn while idle or spinning
    Fine,
}

impl Lod {
    /// Coarse strictly while a drag or zoom gesture is active.
    pub fn select(state: &InteractionState) -> Self {
        if state.is_manipulating {
            Lod::Coarse
        } else {
            Lod::Fine
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lod::Coarse => "coarse",
            Lod::Fine => "fine",
        }
    }
}

/// Land outline stored as unit vectors, densified along great circles so the
/// per-frame pipeline only rotates and clips.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    points: Vec<DVec3>,
}

impl Ring {
    /// Build from lon/lat pairs, inserting vertices so no segment spans more
    /// than `max_step_deg` of arc.
    pub fn from_lonlat(coords: &[(f64, f64)], max_step_deg: f64) -> Self {
        let mut points = Vec::with_capacity(coords.len());
        let mut prev: Option<DVec3> = None;

        for &(lon, lat) in coords {
            let next = GeoPoint::new(lon, lat).to_unit_vector();
            if let Some(a) = prev {
                walk_great_circle(a, next, max_step_deg, |p| points.push(p));
            }
            points.push(next);
            prev = Some(next);
        }

        Self { points }
    }

    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }
}

/// Call `visitor` with the interior vertices of the great-circle arc from `a`
/// to `b` (endpoints excluded), spaced at most `max_step_deg` apart.
#[inline]
fn walk_great_circle(a: DVec3, b: DVec3, max_step_deg: f64, mut visitor: impl FnMut(DVec3)) {
    let dot = a.dot(b).clamp(-1.0, 1.0);
    let angle = dot.acos();
    let steps = (angle.to_degrees() / max_step_deg).ceil() as usize;
    if steps <= 1 {
        return;
    }

    let sin_angle = angle.sin();
    if sin_angle.abs() < 1e-10 {
        // Identical or antipodal endpoints have no unique arc
        return;
    }

    for i in 1..steps {
        let t = i as f64 / steps as f64;
        let sa = ((1.0 - t) * angle).sin() / sin_angle;
        let sb = (t * angle).sin() / sin_angle;
        visitor(a * sa + b * sb);
    }
}

/// Drop vertices that stay within `tolerance_deg` of the simplified outline.
/// Endpoints are always kept, so closed rings stay closed.
pub fn simplify(line: &[(f64, f64)], tolerance_deg: f64) -> LineString {
    if line.len() <= 2 || tolerance_deg <= 0.0 {
        return line.to_vec();
    }

    let vectors: Vec<DVec3> = line
        .iter()
        .map(|&(lon, lat)| GeoPoint::new(lon, lat).to_unit_vector())
        .collect();
    let tolerance = tolerance_deg.to_radians().sin();

    let mut keep = vec![false; line.len()];
    keep[0] = true;
    keep[line.len() - 1] = true;

    let mut stack = vec![(0, line.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let a = vectors[start];
        let b = vectors[end];
        // Closed rings start with a == b, so fall back to distance from the endpoint
        let normal = a.cross(b).try_normalize();

        let mut farthest = start;
        let mut max_dist = 0.0;
        for (offset, p) in vectors[start + 1..end].iter().enumerate() {
            let dist = match normal {
                Some(n) => p.dot(n).abs(),
                None => p.distance(a),
            };
            if dist > max_dist {
                max_dist = dist;
                farthest = start + 1 + offset;
            }
        }

        if max_dist > tolerance {
            keep[farthest] = true;
            stack.push((start, farthest));
            stack.push((farthest, end));
        }
    }

    line.iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}

/// Coarse and fine land outlines, precomputed once and never mutated.
#[derive(Clone, Debug, Default)]
pub struct LandGeometry {
    coarse: Vec<Ring>,
    fine: Vec<Ring>,
}

impl LandGeometry {
    /// Build both variants. When `coarse` is `None` it is derived from `fine`
    /// by simplification.
    pub fn new(
        fine: &[LineString],
        coarse: Option<&[LineString]>,
        tolerance_deg: f64,
        max_step_deg: f64,
    ) -> Self {
        let densify = |lines: &[LineString]| -> Vec<Ring> {
            lines
                .par_iter()
                .map(|line| Ring::from_lonlat(line, max_step_deg))
                .filter(|ring| ring.len() >= 2)
                .collect()
        };

        let fine_rings = densify(fine);
        let coarse_rings = match coarse {
            Some(lines) => densify(lines),
            None => {
                let simplified: Vec<LineString> = fine
                    .par_iter()
                    .map(|line| simplify(line, tolerance_deg))
                    .collect();
                densify(&simplified)
            }
        };

        tracing::info!(
            coarse_rings = coarse_rings.len(),
            coarse_vertices = coarse_rings.iter().map(Ring::len).sum::<usize>(),
            fine_rings = fine_rings.len(),
            fine_vertices = fine_rings.iter().map(Ring::len).sum::<usize>(),
            "land geometry prepared"
        );

        Self {
            coarse: coarse_rings,
            fine: fine_rings,
        }
    }

    /// Rings for a level of detail, falling back to the other variant when empty.
    pub fn get(&self, lod: Lod) -> &[Ring] {
        match lod {
            Lod::Coarse if !self.coarse.is_empty() => &self.coarse,
            Lod::Coarse => &self.fine,
            Lod::Fine if !self.fine.is_empty() => &self.fine,
            Lod::Fine => &self.coarse,
        }
    }

    /// Rings to draw for the current interaction state
    pub fn current(&self, state: &InteractionState) -> &[Ring] {
        self.get(Lod::select(state))
    }

    pub fn has_data(&self) -> bool {
        !self.coarse.is_empty() || !self.fine.is_empty()
    }
}

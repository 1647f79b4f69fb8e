use glam::DVec2;

use crate::globe::cull::is_occluded;
use crate::globe::lod::{Lod, Ring};
use crate::globe::marker::Marker;
use crate::globe::projection::{LandPath, ProjectionState};

/// The ocean disc behind the land outlines.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaterDisc {
    pub center: DVec2,
    pub radius: f64,
}

/// Screen position and visibility of one marker, bound by list index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerSprite {
    pub index: usize,
    pub position: DVec2,
    pub visible: bool,
}

/// Presentation-layer target for a frame. Each frame opens with
/// `begin_frame`, then primitives arrive in the order water, land, markers.
pub trait DrawSurface {
    /// Called once before any primitive of a frame.
    fn begin_frame(&mut self) {}
    fn water(&mut self, disc: &WaterDisc);
    fn land(&mut self, path: &LandPath, lod: Lod);
    fn marker(&mut self, sprite: &MarkerSprite, marker: &Marker);
}

/// All primitives for the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawList {
    pub water: WaterDisc,
    pub land: LandPath,
    pub lod: Lod,
    pub markers: Vec<MarkerSprite>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            water: WaterDisc::default(),
            land: LandPath::default(),
            lod: Lod::Fine,
            markers: Vec::new(),
        }
    }
}

impl DrawList {
    /// Recompute every primitive from one projection snapshot. Nothing is
    /// carried over between frames except the marker slots themselves.
    pub fn redraw(
        &mut self,
        state: ProjectionState,
        land: &[Ring],
        lod: Lod,
        markers: &[Marker],
        occlusion_threshold: f64,
    ) {
        self.lod = lod;
        self.land = state.path_for(land);
        self.water = WaterDisc {
            center: state.translate(),
            radius: state.scale(),
        };

        // Data join by index: update existing slots, add new, drop gone
        self.markers.truncate(markers.len());
        for (index, marker) in markers.iter().enumerate() {
            let point = marker.position();
            let sprite = MarkerSprite {
                index,
                position: state.project(point),
                visible: !is_occluded(point, &state, occlusion_threshold),
            };
            match self.markers.get_mut(index) {
                Some(slot) => *slot = sprite,
                None => self.markers.push(sprite),
            }
        }

        tracing::trace!(
            lod = lod.label(),
            subpaths = self.land.subpaths.len(),
            visible = self.markers.iter().filter(|s| s.visible).count(),
            "redraw"
        );
    }

    /// Replay the frame onto a surface.
    pub fn paint<S: DrawSurface>(&self, surface: &mut S, markers: &[Marker]) {
        surface.begin_frame();
        surface.water(&self.water);
        surface.land(&self.land, self.lod);
        for sprite in &self.markers {
            if let Some(marker) = markers.get(sprite.index) {
                surface.marker(sprite, marker);
            }
        }
    }

    pub fn visible_markers(&self) -> impl Iterator<Item = &MarkerSprite> + '_ {
        self.markers.iter().filter(|s| s.visible)
    }
}

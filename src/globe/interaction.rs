use glam::DVec2;

use crate::geo::{wrap_degrees, GeoPoint};
use crate::globe::projection::{ProjectionState, Rotation};
use crate::globe::spin::{SpinPhase, SpinScheduler};

/// Snapshot of everything the LOD selector and status displays need to know
/// about user interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractionState {
    pub spin: SpinPhase,
    /// True strictly while a drag or zoom gesture is in progress
    pub is_manipulating: bool,
}

#[derive(Clone, Copy, Debug)]
struct DragGesture {
    start_rotation: Rotation,
    start_geo: GeoPoint,
}

#[derive(Clone, Copy, Debug)]
struct ZoomGesture {
    start_factor: f64,
}

/// Drag-to-rotate and zoom-to-scale recognizers sharing one projection.
#[derive(Clone, Debug)]
pub struct InteractionController {
    drag: Option<DragGesture>,
    zoom: Option<ZoomGesture>,
    zoom_range: (f64, f64),
}

impl InteractionController {
    pub fn new(zoom_range: (f64, f64)) -> Self {
        Self {
            drag: None,
            zoom: None,
            zoom_range,
        }
    }

    pub fn is_manipulating(&self) -> bool {
        self.drag.is_some() || self.zoom.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_zooming(&self) -> bool {
        self.zoom.is_some()
    }

    /// Clamp a zoom factor into the configured range
    pub fn clamp_zoom(&self, factor: f64) -> f64 {
        let (min, max) = self.zoom_range;
        if factor.is_nan() {
            return min;
        }
        factor.clamp(min, max)
    }

    /// Begin a drag at `pointer`. Stops the spin for good. A pointer with
    /// no geographic position opens no drag.
    pub fn drag_start(
        &mut self,
        pointer: DVec2,
        state: &ProjectionState,
        spin: &mut SpinScheduler,
        now_ms: f64,
    ) {
        spin.stop(now_ms);
        let start_geo = state.invert_clamped(pointer);
        if !start_geo.is_finite() {
            tracing::debug!(x = pointer.x, y = pointer.y, "drag ignored, pointer not on the globe");
            return;
        }
        let gesture = DragGesture {
            start_rotation: state.rotation(),
            start_geo,
        };
        tracing::debug!(x = pointer.x, y = pointer.y, lon = gesture.start_geo.lon, lat = gesture.start_geo.lat, "drag started");
        self.drag = Some(gesture);
    }

    /// Rotate so the coordinate grabbed at drag start follows `pointer`.
    /// Returns false when nothing moved.
    pub fn drag_move(&mut self, pointer: DVec2, state: &mut ProjectionState) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };

        // Measure against the rotation at drag start so errors do not compound
        let mut reference = *state;
        reference.set_rotation(drag.start_rotation);
        let geo = reference.invert_clamped(pointer);
        if !geo.is_finite() {
            return false;
        }

        let dlon = wrap_degrees(geo.lon - drag.start_geo.lon);
        let dlat = geo.lat - drag.start_geo.lat;
        state.set_rotation(Rotation {
            yaw: drag.start_rotation.yaw + dlon,
            pitch: drag.start_rotation.pitch + dlat,
            roll: drag.start_rotation.roll,
        });
        true
    }

    /// Returns true when a drag was in progress.
    pub fn drag_end(&mut self) -> bool {
        let ended = self.drag.take().is_some();
        if ended {
            tracing::debug!("drag ended");
        }
        ended
    }

    /// Begin a zoom gesture. Stops the spin for good.
    pub fn zoom_start(&mut self, state: &ProjectionState, spin: &mut SpinScheduler, now_ms: f64) {
        spin.stop(now_ms);
        if self.zoom.is_none() {
            self.zoom = Some(ZoomGesture {
                start_factor: state.zoom_factor(),
            });
            tracing::debug!(factor = state.zoom_factor(), "zoom started");
        }
    }

    /// Set scale to `base_scale * factor`, with the factor clamped.
    /// Returns false when no zoom is in progress.
    pub fn zoom_update(&mut self, factor: f64, state: &mut ProjectionState) -> bool {
        if self.zoom.is_none() {
            return false;
        }
        state.set_zoom_factor(self.clamp_zoom(factor));
        true
    }

    /// Pinch-style update: scale relative to the factor at gesture start.
    pub fn zoom_by(&mut self, multiplier: f64, state: &mut ProjectionState) -> bool {
        match self.zoom {
            Some(zoom) => self.zoom_update(zoom.start_factor * multiplier, state),
            None => false,
        }
    }

    /// Returns true when a zoom was in progress.
    pub fn zoom_end(&mut self) -> bool {
        let ended = self.zoom.take().is_some();
        if ended {
            tracing::debug!("zoom ended");
        }
        ended
    }
}

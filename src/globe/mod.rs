//! Interactive orthographic globe: projection, culling, level of detail,
//! automatic spin and drag/zoom handling, tied together by [`Globe`].

pub mod cull;
pub mod interaction;
pub mod lod;
pub mod marker;
pub mod projection;
pub mod render;
pub mod spin;

use glam::DVec2;

use crate::config::GlobeConfig;
use crate::geo::GeoPoint;
use interaction::{InteractionController, InteractionState};
use lod::{LandGeometry, Lod};
use marker::{hit_test, HoverChange, HoverTracker, Marker, TooltipEvent};
use projection::{ProjectionState, Rotation};
use render::DrawList;
use spin::{SpinPhase, SpinScheduler};

/// One globe view. Owns all mutable view state; every input method mutates
/// it and redraws immediately, so [`Globe::frame`] is always current.
///
/// Inputs carry a timestamp in milliseconds from any monotonic origin.
pub struct Globe {
    config: GlobeConfig,
    projection: ProjectionState,
    spin: SpinScheduler,
    interaction: InteractionController,
    land: LandGeometry,
    markers: Vec<Marker>,
    hover: HoverTracker,
    frame: DrawList,
    redraws: u64,
    /// Time of the last wheel notch while a wheel zoom is open
    last_wheel_ms: Option<f64>,
}

impl Globe {
    pub fn new(
        config: GlobeConfig,
        width: f64,
        height: f64,
        land: LandGeometry,
        markers: Vec<Marker>,
        now_ms: f64,
    ) -> Self {
        let spin = SpinScheduler::new(config.spin_speed, config.yaw_offset, now_ms);
        let rotation = Rotation::new(spin.yaw_at(now_ms), config.vertical_tilt, config.horizontal_tilt);
        let projection = ProjectionState::new(rotation, width, height, config.scale_divisor);

        let mut globe = Self {
            interaction: InteractionController::new(config.zoom_range),
            config,
            projection,
            spin,
            land,
            markers,
            hover: HoverTracker::default(),
            frame: DrawList::default(),
            redraws: 0,
            last_wheel_ms: None,
        };
        globe.redraw(false);
        globe
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn projection(&self) -> &ProjectionState {
        &self.projection
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn land(&self) -> &LandGeometry {
        &self.land
    }

    /// The most recent frame
    pub fn frame(&self) -> &DrawList {
        &self.frame
    }

    /// Number of redraws since creation
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    pub fn interaction_state(&self) -> InteractionState {
        InteractionState {
            spin: self.spin.phase(),
            is_manipulating: self.interaction.is_manipulating(),
        }
    }

    pub fn spin_phase(&self) -> SpinPhase {
        self.spin.phase()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover.hovered()
    }

    /// Geographic coordinate at the viewport center
    pub fn center_coordinate(&self) -> Option<GeoPoint> {
        self.projection.invert(self.projection.center())
    }

    /// Recompute the frame. `force_fine` bypasses the LOD selector.
    pub fn redraw(&mut self, force_fine: bool) {
        let lod = if force_fine {
            Lod::Fine
        } else {
            Lod::select(&self.interaction_state())
        };
        let rings = self.land.get(lod);
        self.frame.redraw(
            self.projection,
            rings,
            lod,
            &self.markers,
            self.config.occlusion_threshold,
        );
        self.redraws += 1;
    }

    /// Animation frame. Returns true when the globe was redrawn.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let mut redrawn = false;

        if let Some(last) = self.last_wheel_ms {
            if now_ms - last >= self.config.wheel_idle_ms {
                self.zoom_end();
                redrawn = true;
            }
        }

        if let Some(yaw) = self.spin.tick(now_ms) {
            let rotation = self.projection.rotation();
            self.projection.set_rotation(Rotation { yaw, ..rotation });
            self.redraw(false);
            redrawn = true;
        }

        redrawn
    }

    pub fn drag_start(&mut self, pointer: DVec2, now_ms: f64) {
        self.hide_tooltip();
        self.interaction
            .drag_start(pointer, &self.projection, &mut self.spin, now_ms);
        self.redraw(false);
    }

    pub fn drag_move(&mut self, pointer: DVec2) {
        if self.interaction.drag_move(pointer, &mut self.projection) {
            self.redraw(false);
        }
    }

    pub fn drag_end(&mut self) {
        if self.interaction.drag_end() {
            self.finish_gesture();
        }
    }

    pub fn zoom_start(&mut self, now_ms: f64) {
        self.hide_tooltip();
        self.interaction
            .zoom_start(&self.projection, &mut self.spin, now_ms);
        self.redraw(false);
    }

    /// Set the zoom factor (relative to the base scale) of the open zoom gesture.
    pub fn zoom_update(&mut self, factor: f64) {
        if self.interaction.zoom_update(factor, &mut self.projection) {
            self.redraw(false);
        }
    }

    /// Pinch update relative to the factor at gesture start.
    pub fn zoom_by(&mut self, multiplier: f64) {
        if self.interaction.zoom_by(multiplier, &mut self.projection) {
            self.redraw(false);
        }
    }

    pub fn zoom_end(&mut self) {
        self.last_wheel_ms = None;
        if self.interaction.zoom_end() {
            self.finish_gesture();
        }
    }

    /// One scroll notch; positive zooms in. The wheel gesture stays open
    /// until `wheel_idle_ms` passes without another notch.
    pub fn wheel(&mut self, notches: i32, now_ms: f64) {
        if self.last_wheel_ms.is_none() && !self.interaction.is_zooming() {
            self.zoom_start(now_ms);
        }
        self.last_wheel_ms = Some(now_ms);
        let factor = self.projection.zoom_factor() * self.config.wheel_step.powi(notches);
        self.zoom_update(factor);
    }

    /// Complete zoom gesture to `factor`, as for a keyboard shortcut.
    pub fn zoom_to(&mut self, factor: f64, now_ms: f64) {
        self.zoom_start(now_ms);
        self.zoom_update(factor);
        self.zoom_end();
    }

    /// Pointer moved without a button held. Drives hover pause and tooltips.
    pub fn pointer_move(&mut self, pointer: DVec2, now_ms: f64) -> Vec<TooltipEvent> {
        if self.interaction.is_dragging() {
            return Vec::new();
        }

        let hit = hit_test(&self.frame.markers, pointer, self.config.hover_radius);
        let mut events = Vec::new();
        match self.hover.update(hit) {
            HoverChange::Unchanged => {}
            HoverChange::Entered(index) => {
                self.spin.hover_enter(now_ms);
                events.push(self.show_event(index, pointer));
            }
            HoverChange::Left(index) => {
                self.spin.hover_leave(now_ms);
                events.push(TooltipEvent::Hide { index });
            }
            HoverChange::Moved { from, to } => {
                events.push(TooltipEvent::Hide { index: from });
                events.push(self.show_event(to, pointer));
            }
        }
        events
    }

    /// Pointer left the drawing surface.
    pub fn pointer_leave(&mut self, now_ms: f64) -> Option<TooltipEvent> {
        let index = self.hover.clear()?;
        self.spin.hover_leave(now_ms);
        Some(TooltipEvent::Hide { index })
    }

    /// Viewport changed size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.projection.resize(width, height);
        self.redraw(false);
    }

    fn show_event(&self, index: usize, pointer: DVec2) -> TooltipEvent {
        let marker = &self.markers[index];
        TooltipEvent::Show {
            index,
            label: marker.label.clone(),
            count: marker.count,
            pointer,
        }
    }

    fn hide_tooltip(&mut self) {
        self.hover.clear();
    }

    fn finish_gesture(&mut self) {
        if self.interaction.is_manipulating() {
            // The other gesture is still running; stay coarse
            self.redraw(false);
        } else {
            self.redraw(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lod::LineString;

    const W: f64 = 840.0;
    const H: f64 = 420.0;

    fn square(lon: f64, lat: f64, size: f64, step: f64) -> LineString {
        let mut line = Vec::new();
        let mut t = 0.0;
        while t < size {
            line.push((lon + t, lat));
            t += step;
        }
        line.extend([(lon + size, lat), (lon + size, lat + size), (lon, lat + size), (lon, lat)]);
        line
    }

    fn geometry() -> LandGeometry {
        let lines: Vec<LineString> = (0..6).map(|i| square(i as f64 * 60.0 - 180.0, -20.0, 30.0, 0.5)).collect();
        LandGeometry::new(&lines, None, 2.0, 2.0)
    }

    fn globe_with(config: GlobeConfig, markers: Vec<Marker>) -> Globe {
        Globe::new(config, W, H, geometry(), markers, 0.0)
    }

    fn globe() -> Globe {
        globe_with(GlobeConfig::default(), vec![Marker::new(0.0, 0.0).with_label("origin")])
    }

    /// A config whose rotation puts (0, 0) at the center at t = 0
    fn centered_config() -> GlobeConfig {
        GlobeConfig {
            yaw_offset: 0.0,
            vertical_tilt: 0.0,
            ..GlobeConfig::default()
        }
    }

    fn visible_marker_position(globe: &Globe) -> DVec2 {
        globe.frame().visible_markers().next().unwrap().position
    }

    #[test]
    fn test_initial_rotation_and_scale() {
        let g = globe();
        let r = g.projection().rotation();
        assert!((r.yaw - 120.0).abs() < 1e-9);
        assert_eq!(r.pitch, -15.0);
        assert_eq!(g.projection().base_scale(), H / 2.1);
        assert_eq!(g.redraw_count(), 1);
        assert_eq!(g.spin_phase(), SpinPhase::Spinning);
    }

    #[test]
    fn test_each_tick_redraws_once() {
        let mut g = globe();
        for i in 1..=10 {
            assert!(g.tick(i as f64 * 16.0));
            assert_eq!(g.redraw_count(), 1 + i);
        }
    }

    #[test]
    fn test_origin_marker_visible_then_occluded() {
        let mut g = globe_with(centered_config(), vec![Marker::new(0.0, 0.0)]);
        assert!(g.frame().markers[0].visible);

        // Half a turn of spin at 0.005°/ms
        g.tick(180.0 / 0.005);
        assert!(!g.frame().markers[0].visible);
    }

    #[test]
    fn test_hover_pause_keeps_angle_continuous() {
        let mut g = globe_with(centered_config(), vec![Marker::new(0.0, 0.0).with_label("origin")]);
        g.tick(16.0);
        let pointer = visible_marker_position(&g);

        let events = g.pointer_move(pointer, 16.0);
        assert!(matches!(&events[..], [TooltipEvent::Show { index: 0, label: Some(l), .. }] if l == "origin"));
        assert_eq!(g.spin_phase(), SpinPhase::PausedByHover);
        let paused_yaw = g.projection().rotation().yaw;

        // Frames during the pause do nothing
        assert!(!g.tick(5000.0));
        assert_eq!(g.projection().rotation().yaw, paused_yaw);

        let events = g.pointer_move(pointer + DVec2::new(100.0, 100.0), 5000.0);
        assert_eq!(events, vec![TooltipEvent::Hide { index: 0 }]);
        assert_eq!(g.spin_phase(), SpinPhase::Spinning);

        g.tick(5016.0);
        let resumed_yaw = g.projection().rotation().yaw;
        assert!((resumed_yaw - paused_yaw).abs() <= 0.005 * 16.0 + 1e-9);
    }

    #[test]
    fn test_gesture_stops_spin_forever() {
        let mut g = globe_with(centered_config(), vec![Marker::new(0.0, 0.0)]);
        let c = g.projection().center();
        g.drag_start(c, 10.0);
        g.drag_move(c + DVec2::new(5.0, 0.0));
        g.drag_end();
        assert_eq!(g.spin_phase(), SpinPhase::Stopped);

        let pointer = visible_marker_position(&g);
        g.pointer_move(pointer, 20.0);
        g.pointer_move(pointer + DVec2::new(200.0, 0.0), 30.0);
        g.pointer_move(pointer, 40.0);
        assert_eq!(g.spin_phase(), SpinPhase::Stopped);

        let yaw = g.projection().rotation().yaw;
        assert!(!g.tick(10_000.0));
        assert_eq!(g.projection().rotation().yaw, yaw);
    }

    #[test]
    fn test_lod_coarse_while_dragging_then_fine() {
        let mut g = globe();
        let c = g.projection().center();
        g.drag_start(c, 0.0);
        assert_eq!(g.frame().lod, Lod::Coarse);
        for i in 0..5 {
            g.drag_move(c + DVec2::new(i as f64 * 3.0, 0.0));
            assert_eq!(g.frame().lod, Lod::Coarse);
        }
        let before = g.redraw_count();
        g.drag_end();
        assert_eq!(g.redraw_count(), before + 1);
        assert_eq!(g.frame().lod, Lod::Fine);
    }

    #[test]
    fn test_every_drag_move_redraws() {
        let mut g = globe();
        let c = g.projection().center();
        g.drag_start(c, 0.0);
        let before = g.redraw_count();
        g.drag_move(c + DVec2::new(10.0, 0.0));
        g.drag_move(c + DVec2::new(20.0, 0.0));
        assert_eq!(g.redraw_count(), before + 2);
        // No gesture, no redraw
        g.drag_end();
        let after = g.redraw_count();
        g.drag_move(c);
        assert_eq!(g.redraw_count(), after);
    }

    #[test]
    fn test_zoom_clamped_to_range() {
        let mut g = globe();
        let base = g.projection().base_scale();
        g.zoom_start(0.0);
        g.zoom_update(1000.0);
        assert_eq!(g.projection().scale(), base * 70.0);
        assert_eq!(g.frame().water.radius, base * 70.0);
        assert_eq!(g.frame().lod, Lod::Coarse);
        g.zoom_end();
        assert_eq!(g.frame().lod, Lod::Fine);
        assert_eq!(g.spin_phase(), SpinPhase::Stopped);
    }

    #[test]
    fn test_wheel_gesture_ends_when_idle() {
        let mut g = globe();
        g.wheel(1, 100.0);
        g.wheel(1, 150.0);
        assert!(g.interaction_state().is_manipulating);
        assert!((g.projection().zoom_factor() - 1.25 * 1.25).abs() < 1e-12);
        assert_eq!(g.frame().lod, Lod::Coarse);

        // Still within the idle window
        g.tick(200.0);
        assert!(g.interaction_state().is_manipulating);

        assert!(g.tick(300.0));
        assert!(!g.interaction_state().is_manipulating);
        assert_eq!(g.frame().lod, Lod::Fine);
    }

    #[test]
    fn test_wheel_out_clamps_at_min() {
        let mut g = globe();
        g.wheel(-3, 0.0);
        assert_eq!(g.projection().zoom_factor(), 1.0);
    }

    #[test]
    fn test_zoom_to() {
        let mut g = globe();
        g.zoom_to(5.0, 0.0);
        assert!((g.projection().zoom_factor() - 5.0).abs() < 1e-12);
        assert!(!g.interaction_state().is_manipulating);
        assert_eq!(g.frame().lod, Lod::Fine);
    }

    #[test]
    fn test_hover_ignores_occluded_markers() {
        let mut g = globe_with(centered_config(), vec![Marker::new(180.0, 0.0)]);
        // The far-side marker projects onto the disc center but is hidden
        let c = g.projection().center();
        assert!(!g.frame().markers[0].visible);
        assert!(g.pointer_move(c, 0.0).is_empty());
        assert_eq!(g.spin_phase(), SpinPhase::Spinning);
    }

    #[test]
    fn test_pointer_leave_resumes_spin() {
        let mut g = globe_with(centered_config(), vec![Marker::new(0.0, 0.0)]);
        let pointer = visible_marker_position(&g);
        g.pointer_move(pointer, 0.0);
        assert_eq!(g.spin_phase(), SpinPhase::PausedByHover);
        assert_eq!(g.pointer_leave(10.0), Some(TooltipEvent::Hide { index: 0 }));
        assert_eq!(g.spin_phase(), SpinPhase::Spinning);
        assert_eq!(g.pointer_leave(20.0), None);
    }

    #[test]
    fn test_resize_recenters() {
        let mut g = globe_with(centered_config(), vec![Marker::new(0.0, 0.0)]);
        g.resize(200.0, 100.0);
        assert_eq!(g.frame().water.center, DVec2::new(100.0, 50.0));
        assert_eq!(g.frame().markers[0].position, DVec2::new(100.0, 50.0));
    }

    #[test]
    fn test_zoom_survives_empty_viewport() {
        let mut g = globe_with(centered_config(), vec![Marker::new(0.0, 0.0)]);
        g.zoom_to(3.0, 0.0);
        g.resize(0.0, 0.0);
        g.resize(W, H);
        assert!((g.projection().zoom_factor() - 3.0).abs() < 1e-9);
        assert!((g.frame().water.radius - 3.0 * H / 2.1).abs() < 1e-9);
        assert!(g.frame().markers[0].visible);
    }

    #[test]
    fn test_drag_on_empty_viewport_keeps_rotation_finite() {
        let mut g = globe();
        g.resize(0.0, 0.0);
        g.drag_start(DVec2::ZERO, 0.0);
        g.drag_move(DVec2::new(5.0, 3.0));
        g.drag_end();
        g.resize(W, H);
        let r = g.projection().rotation();
        assert!(r.yaw.is_finite() && r.pitch.is_finite());
        assert!(g.frame().water.radius.is_finite());
    }

    #[test]
    fn test_redraw_without_change_is_stable() {
        let mut g = globe();
        let before = g.frame().clone();
        g.redraw(false);
        assert_eq!(g.frame(), &before);
    }
}

use std::time::Instant;

use glam::DVec2;
use tui_globe::braille::BrailleSurface;
use tui_globe::config::GlobeConfig;
use tui_globe::data::Datasets;
use tui_globe::globe::marker::TooltipEvent;
use tui_globe::globe::Globe;

/// Text shown next to the hovered marker, in map-area character cells
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub col: u16,
    pub row: u16,
}

/// Application state
pub struct App {
    pub globe: Globe,
    pub surface: BrailleSurface,
    pub should_quit: bool,
    started: Instant,
    tooltip: Option<Tooltip>,
    /// Redraw count of the frame last painted onto `surface`
    painted: Option<u64>,
}

/// Character cells available to the map inside the border and above the status bar
fn map_cells(width: usize, height: usize) -> (usize, usize) {
    (width.saturating_sub(2), height.saturating_sub(3))
}

/// Convert terminal coords to braille pixel coords.
/// Each terminal cell is 2 braille pixels wide, 4 tall; the border adds a 1 cell offset.
fn to_pixel(col: u16, row: u16) -> DVec2 {
    DVec2::new(
        (col.saturating_sub(1) as f64) * 2.0,
        (row.saturating_sub(1) as f64) * 4.0,
    )
}

impl App {
    pub fn new(width: usize, height: usize, config: GlobeConfig, data: Datasets) -> Self {
        let (cols, rows) = map_cells(width, height);
        let surface = BrailleSurface::new(cols, rows, config.marker_radius);
        let globe = Globe::new(
            config,
            (cols * 2) as f64,
            (rows * 4) as f64,
            data.land,
            data.markers,
            0.0,
        );

        Self {
            globe,
            surface,
            should_quit: false,
            started: Instant::now(),
            tooltip: None,
            painted: None,
        }
    }

    /// Milliseconds since start, the clock every globe input is stamped with
    pub fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Advance the spin and any idle wheel gesture
    pub fn tick(&mut self) {
        let now = self.now_ms();
        self.globe.tick(now);
    }

    /// Replay the latest frame onto the braille layers if it changed
    pub fn paint(&mut self) {
        let count = self.globe.redraw_count();
        if self.painted == Some(count) {
            return;
        }
        self.globe.frame().paint(&mut self.surface, self.globe.markers());
        self.painted = Some(count);
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let (cols, rows) = map_cells(width, height);
        self.surface = BrailleSurface::new(cols, rows, self.globe.config().marker_radius);
        self.globe.resize((cols * 2) as f64, (rows * 4) as f64);
        self.tooltip = None;
        self.painted = None;
    }

    pub fn drag_start(&mut self, col: u16, row: u16) {
        let now = self.now_ms();
        self.globe.drag_start(to_pixel(col, row), now);
    }

    pub fn drag_move(&mut self, col: u16, row: u16) {
        self.globe.drag_move(to_pixel(col, row));
    }

    pub fn drag_end(&mut self) {
        self.globe.drag_end();
    }

    /// Scroll wheel; positive zooms in
    pub fn wheel(&mut self, notches: i32) {
        let now = self.now_ms();
        self.globe.wheel(notches, now);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_step(1);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_step(-1);
    }

    fn zoom_step(&mut self, notches: i32) {
        let now = self.now_ms();
        let factor = self.globe.projection().zoom_factor() * self.globe.config().wheel_step.powi(notches);
        self.globe.zoom_to(factor, now);
    }

    /// Mouse moved with no button held
    pub fn hover(&mut self, col: u16, row: u16) {
        let now = self.now_ms();
        for event in self.globe.pointer_move(to_pixel(col, row), now) {
            self.apply_tooltip(event);
        }
    }

    /// Replace the globe with a fresh view over the same data, spinning again
    pub fn reset(&mut self) {
        let now = self.now_ms();
        let size = self.globe.projection().center() * 2.0;
        self.globe = Globe::new(
            self.globe.config().clone(),
            size.x,
            size.y,
            self.globe.land().clone(),
            self.globe.markers().to_vec(),
            now,
        );
        self.tooltip = None;
        self.painted = None;
        tracing::debug!("view reset");
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn apply_tooltip(&mut self, event: TooltipEvent) {
        match event {
            TooltipEvent::Show {
                index,
                label,
                count,
                pointer,
            } => {
                let marker = &self.globe.markers()[index];
                let name = label.unwrap_or_else(|| format_coords(marker.latitude, marker.longitude));
                let text = match count {
                    Some(count) => format!(" {} ({}) ", name, count),
                    None => format!(" {} ", name),
                };
                self.tooltip = Some(Tooltip {
                    text,
                    col: (pointer.x / 2.0) as u16 + 1,
                    row: (pointer.y / 4.0) as u16,
                });
            }
            TooltipEvent::Hide { .. } => self.tooltip = None,
        }
    }

    /// The tooltip, while a marker is still hovered
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.globe.hovered().and(self.tooltip.as_ref())
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.globe.projection().zoom_factor())
    }

    pub fn spin_label(&self) -> &'static str {
        self.globe.spin_phase().label()
    }

    pub fn lod_label(&self) -> &'static str {
        self.globe.frame().lod.label()
    }

    /// Get current center coordinates as a string
    pub fn center_coords(&self) -> String {
        match self.globe.center_coordinate() {
            Some(p) => format_coords(p.lat, p.lon),
            None => "-".to_string(),
        }
    }
}

fn format_coords(lat: f64, lon: f64) -> String {
    format!(
        "{:.1}°{}, {:.1}°{}",
        lat.abs(),
        if lat >= 0.0 { "N" } else { "S" },
        lon.abs(),
        if lon >= 0.0 { "E" } else { "W" }
    )
}

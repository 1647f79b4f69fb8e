use glam::DVec2;
use serde::Deserialize;

use crate::geo::GeoPoint;
use crate::globe::render::MarkerSprite;

/// A point of interest on the globe. Identity is its position in the marker list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Marker {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default, alias = "tag", alias = "name")]
    pub label: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl Marker {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            label: None,
            count: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }
}

/// Show or hide a tooltip for a hovered marker.
#[derive(Clone, Debug, PartialEq)]
pub enum TooltipEvent {
    Show {
        index: usize,
        label: Option<String>,
        count: Option<u64>,
        pointer: DVec2,
    },
    Hide {
        index: usize,
    },
}

/// Nearest visible sprite within `radius` of `pointer`.
pub fn hit_test(sprites: &[MarkerSprite], pointer: DVec2, radius: f64) -> Option<usize> {
    let radius2 = radius * radius;
    sprites
        .iter()
        .filter(|s| s.visible)
        .map(|s| (s.index, s.position.distance_squared(pointer)))
        .filter(|&(_, d2)| d2 <= radius2)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// Hover transition produced by a pointer move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverChange {
    Unchanged,
    Entered(usize),
    Left(usize),
    Moved { from: usize, to: usize },
}

/// Tracks which marker, if any, is under the pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverTracker {
    hovered: Option<usize>,
}

impl HoverTracker {
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn update(&mut self, hit: Option<usize>) -> HoverChange {
        let change = match (self.hovered, hit) {
            (None, None) => HoverChange::Unchanged,
            (Some(a), Some(b)) if a == b => HoverChange::Unchanged,
            (None, Some(b)) => HoverChange::Entered(b),
            (Some(a), None) => HoverChange::Left(a),
            (Some(a), Some(b)) => HoverChange::Moved { from: a, to: b },
        };
        self.hovered = hit;
        change
    }

    pub fn clear(&mut self) -> Option<usize> {
        self.hovered.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(index: usize, x: f64, y: f64, visible: bool) -> MarkerSprite {
        MarkerSprite {
            index,
            position: DVec2::new(x, y),
            visible,
        }
    }

    #[test]
    fn test_deserialize_locations() {
        let mut json = br#"[
            {"longitude": 2.35, "latitude": 48.85, "tag": "Paris"},
            {"longitude": -74.0, "latitude": 40.7, "label": "NYC", "count": 12},
            {"longitude": 0.0, "latitude": 0.0}
        ]"#
        .to_vec();
        let markers: Vec<Marker> = simd_json::serde::from_slice(&mut json).unwrap();
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[0].label.as_deref(), Some("Paris"));
        assert_eq!(markers[1].count, Some(12));
        assert_eq!(markers[2], Marker::new(0.0, 0.0));
    }

    #[test]
    fn test_hit_test_prefers_nearest_visible() {
        let sprites = [
            sprite(0, 10.0, 10.0, true),
            sprite(1, 12.0, 10.0, true),
            sprite(2, 11.0, 10.0, false),
        ];
        assert_eq!(hit_test(&sprites, DVec2::new(11.6, 10.0), 3.0), Some(1));
        assert_eq!(hit_test(&sprites, DVec2::new(10.2, 10.0), 3.0), Some(0));
        assert_eq!(hit_test(&sprites, DVec2::new(50.0, 50.0), 3.0), None);
    }

    #[test]
    fn test_hidden_marker_not_hoverable() {
        let sprites = [sprite(0, 10.0, 10.0, false)];
        assert_eq!(hit_test(&sprites, DVec2::new(10.0, 10.0), 3.0), None);
    }

    #[test]
    fn test_hover_transitions() {
        let mut hover = HoverTracker::default();
        assert_eq!(hover.update(None), HoverChange::Unchanged);
        assert_eq!(hover.update(Some(3)), HoverChange::Entered(3));
        assert_eq!(hover.update(Some(3)), HoverChange::Unchanged);
        assert_eq!(hover.update(Some(4)), HoverChange::Moved { from: 3, to: 4 });
        assert_eq!(hover.update(None), HoverChange::Left(4));
        assert_eq!(hover.hovered(), None);
    }
}

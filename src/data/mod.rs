//! Local dataset loading for the terminal front-end. The engine itself only
//! ever sees already-parsed outlines and markers.

mod builtin;

use std::fs;
use std::path::{Path, PathBuf};

use geojson::{GeoJson, Geometry, Value};

use crate::config::GlobeConfig;
use crate::error::DataError;
use crate::globe::lod::{LandGeometry, LineString};
use crate::globe::marker::Marker;

pub use builtin::{builtin_land, builtin_markers};

/// Fine land outlines
pub const FINE_LAND_FILE: &str = "land-50m.geojson";
/// Coarse land outlines, used while dragging or zooming
pub const COARSE_LAND_FILE: &str = "land-110m.geojson";
pub const MARKERS_FILE: &str = "locations.json";

/// Everything the globe needs, loaded from disk or the built-in fallback.
pub struct Datasets {
    pub land: LandGeometry,
    pub markers: Vec<Marker>,
}

/// Load land and markers from `data_dir`, falling back to built-in data for
/// anything missing or unreadable.
pub fn load_datasets(data_dir: &Path, config: &GlobeConfig) -> Datasets {
    let fine = load_optional(&data_dir.join(FINE_LAND_FILE), load_land);
    let coarse = load_optional(&data_dir.join(COARSE_LAND_FILE), load_land);

    let land = match (fine, coarse) {
        (Some(fine), coarse) => LandGeometry::new(
            &fine,
            coarse.as_deref(),
            config.coarse_tolerance_deg,
            config.resample_step_deg,
        ),
        // Only coarse data: draw it at both levels
        (None, Some(coarse)) => LandGeometry::new(
            &coarse,
            Some(coarse.as_slice()),
            config.coarse_tolerance_deg,
            config.resample_step_deg,
        ),
        (None, None) => {
            tracing::info!("no land data found, using built-in outlines");
            LandGeometry::new(
                &builtin_land(),
                None,
                config.coarse_tolerance_deg,
                config.resample_step_deg,
            )
        }
    };

    let markers = load_optional(&data_dir.join(MARKERS_FILE), load_markers).unwrap_or_else(|| {
        tracing::info!("no marker data found, using built-in markers");
        builtin_markers()
    });

    Datasets { land, markers }
}

fn load_optional<T>(path: &Path, load: impl Fn(&Path) -> Result<T, DataError>) -> Option<T> {
    if !path.exists() {
        return None;
    }
    match load(path) {
        Ok(value) => {
            tracing::info!(path = %path.display(), "loaded dataset");
            Some(value)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load dataset");
            None
        }
    }
}

/// Load outlines from a GeoJSON file.
pub fn load_land(path: &Path) -> Result<Vec<LineString>, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = parse_land(&content).map_err(|source| DataError::GeoJson {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    if lines.is_empty() {
        return Err(DataError::EmptyGeometry {
            path: path.to_path_buf(),
        });
    }
    Ok(lines)
}

/// Extract every ring and line from a GeoJSON document.
pub fn parse_land(content: &str) -> Result<Vec<LineString>, geojson::Error> {
    let geojson: GeoJson = content.parse()?;
    let mut lines = Vec::new();
    process_geojson_lines(&geojson, |line| {
        if line.len() >= 2 {
            lines.push(line);
        }
    });
    Ok(lines)
}

/// Load markers from a JSON array of `{longitude, latitude, tag?, count?}`.
pub fn load_markers(path: &Path) -> Result<Vec<Marker>, DataError> {
    let mut bytes = fs::read(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    simd_json::serde::from_slice(&mut bytes).map_err(|source| DataError::Markers {
        path: PathBuf::from(path),
        source,
    })
}

fn process_geojson_lines<F>(geojson: &GeoJson, mut add_line: F)
where
    F: FnMut(LineString),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(ref geometry) = feature.geometry {
                    process_geometry_lines(geometry, &mut add_line);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                process_geometry_lines(geometry, &mut add_line);
            }
        }
        GeoJson::Geometry(geometry) => process_geometry_lines(geometry, &mut add_line),
    }
}

fn process_geometry_lines<F>(geometry: &Geometry, add_line: &mut F)
where
    F: FnMut(LineString),
{
    let to_line = |coords: &Vec<Vec<f64>>| -> LineString {
        coords
            .iter()
            .filter(|c| c.len() >= 2)
            .map(|c| (c[0], c[1]))
            .collect()
    };

    match &geometry.value {
        Value::LineString(coords) => add_line(to_line(coords)),
        Value::MultiLineString(lines) => lines.iter().for_each(|l| add_line(to_line(l))),
        // Holes (lakes, inland seas) are outlines too
        Value::Polygon(rings) => rings.iter().for_each(|r| add_line(to_line(r))),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .flatten()
            .for_each(|r| add_line(to_line(r))),
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                process_geometry_lines(g, add_line);
            }
        }
        Value::Point(_) | Value::MultiPoint(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_polygon_with_hole() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                        [[2, 2], [4, 2], [4, 4], [2, 2]]
                    ]
                }
            }]
        }"#;
        let lines = parse_land(json).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][1], (10.0, 0.0));
    }

    #[test]
    fn test_parse_skips_points_and_degenerate_lines() {
        let json = r#"{
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Point", "coordinates": [1, 2]},
                {"type": "LineString", "coordinates": [[1, 2]]},
                {"type": "MultiLineString", "coordinates": [[[0, 0], [1, 1]], [[2, 2], [3, 3]]]}
            ]
        }"#;
        assert_eq!(parse_land(json).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_land("not geojson").is_err());
    }

    #[test]
    fn test_missing_directory_uses_builtin() {
        let data = load_datasets(Path::new("/nonexistent/globe-data"), &GlobeConfig::default());
        assert!(data.land.has_data());
        assert!(!data.markers.is_empty());
    }

    #[test]
    fn test_missing_marker_file_is_io_error() {
        let err = load_markers(Path::new("/nonexistent/locations.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}

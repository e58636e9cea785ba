use serde_json::Value;

use crate::region::{GeoPoint, RegionCollection, RegionFeature, RegionGeometry};

#[derive(Debug)]
pub enum GeoJsonError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoJsonError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {}

/// Parses a GeoJSON FeatureCollection into region features.
///
/// Only Polygon and MultiPolygon features become regions; features with
/// other geometry kinds are skipped, not rejected.
pub fn regions_from_geojson_str(payload: &str) -> Result<RegionCollection, GeoJsonError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| GeoJsonError::InvalidFeature {
        index: 0,
        reason: format!("JSON parse error: {e}"),
    })?;
    regions_from_geojson_value(&value)
}

pub fn regions_from_geojson_value(value: &Value) -> Result<RegionCollection, GeoJsonError> {
    let obj = value
        .as_object()
        .ok_or(GeoJsonError::NotAFeatureCollection)?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(GeoJsonError::NotAFeatureCollection)?;
    if ty != "FeatureCollection" {
        return Err(GeoJsonError::NotAFeatureCollection);
    }

    let features_val = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(GeoJsonError::NotAFeatureCollection)?;

    let mut features = Vec::with_capacity(features_val.len());
    for (index, feat_val) in features_val.iter().enumerate() {
        let feat_obj = feat_val.as_object().ok_or(GeoJsonError::InvalidFeature {
            index,
            reason: "feature must be an object".to_string(),
        })?;

        let feat_type = feat_obj.get("type").and_then(|v| v.as_str()).ok_or(
            GeoJsonError::InvalidFeature {
                index,
                reason: "feature missing type".to_string(),
            },
        )?;
        if feat_type != "Feature" {
            return Err(GeoJsonError::InvalidFeature {
                index,
                reason: format!("unexpected feature type: {feat_type}"),
            });
        }

        let geometry_val = feat_obj
            .get("geometry")
            .ok_or(GeoJsonError::InvalidFeature {
                index,
                reason: "feature missing geometry".to_string(),
            })?;
        let Some(geometry) = parse_region_geometry(geometry_val)
            .map_err(|reason| GeoJsonError::InvalidFeature { index, reason })?
        else {
            continue;
        };

        features.push(RegionFeature {
            id: feature_id(feat_val),
            name: feature_name(feat_val),
            geometry,
        });
    }

    Ok(RegionCollection { features })
}

pub(crate) fn feature_id(feature: &Value) -> Option<String> {
    match feature.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn feature_name(feature: &Value) -> Option<String> {
    feature
        .get("properties")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .map(str::to_string)
}

/// `Ok(None)` for geometry kinds that are not regions (points, lines).
pub(crate) fn parse_region_geometry(value: &Value) -> Result<Option<RegionGeometry>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;
    if ty != "Polygon" && ty != "MultiPolygon" {
        return Ok(None);
    }

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    if ty == "Polygon" {
        return Ok(Some(RegionGeometry::Polygon(parse_rings(coords)?)));
    }

    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_rings(poly)?);
    }
    Ok(Some(RegionGeometry::MultiPolygon(out)))
}

fn parse_rings(coords: &Value) -> Result<Vec<Vec<GeoPoint>>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_points(ring)?);
    }
    Ok(out)
}

fn parse_points(coords: &Value) -> Result<Vec<GeoPoint>, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_point(item)?);
    }
    Ok(out)
}

fn parse_point(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(GeoPoint::new(lon, lat))
}

#[cfg(test)]
mod tests {
    use super::{GeoJsonError, regions_from_geojson_str};
    use crate::region::RegionGeometry;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 250,
                "properties": { "name": "France" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 42.0], [8.0, 42.0], [8.0, 51.0], [0.0, 42.0]]]
                }
            },
            {
                "type": "Feature",
                "id": "840",
                "properties": { "name": "United States of America" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[-125.0, 32.0], [-66.0, 32.0], [-66.0, 49.0], [-125.0, 32.0]]],
                        [[[-160.0, 18.0], [-154.0, 18.0], [-154.0, 23.0], [-160.0, 18.0]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Null Island Marker" },
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            }
        ]
    }"#;

    #[test]
    fn parses_polygonal_features_and_skips_points() {
        let regions = regions_from_geojson_str(SAMPLE).expect("parse");
        assert_eq!(regions.features.len(), 2);

        let france = &regions.features[0];
        assert_eq!(france.id.as_deref(), Some("250"));
        assert_eq!(france.name.as_deref(), Some("France"));
        assert!(matches!(france.geometry, RegionGeometry::Polygon(_)));

        let usa = &regions.features[1];
        assert_eq!(usa.id.as_deref(), Some("840"));
        assert!(matches!(usa.geometry, RegionGeometry::MultiPolygon(_)));
    }

    #[test]
    fn rejects_non_feature_collection() {
        let err = regions_from_geojson_str(r#"{"type": "Feature"}"#).unwrap_err();
        assert!(matches!(err, GeoJsonError::NotAFeatureCollection));
    }

    #[test]
    fn rejects_malformed_ring() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [[[0.0]]] }
            }]
        }"#;
        let err = regions_from_geojson_str(payload).unwrap_err();
        assert!(matches!(err, GeoJsonError::InvalidFeature { index: 0, .. }));
    }

    #[test]
    fn missing_name_and_id_are_none() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }
            }]
        }"#;
        let regions = regions_from_geojson_str(payload).expect("parse");
        assert_eq!(regions.features[0].id, None);
        assert_eq!(regions.features[0].name, None);
    }
}

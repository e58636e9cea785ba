use serde_json::Value;

use crate::geojson::{feature_id, feature_name};
use crate::region::{GeoPoint, RegionCollection, RegionFeature, RegionGeometry};

#[derive(Debug)]
pub enum TopologyError {
    NotATopology,
    MissingObject { name: String },
    InvalidArc { index: usize, reason: String },
    InvalidGeometry { index: usize, reason: String },
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::NotATopology => write!(f, "expected TopoJSON Topology"),
            TopologyError::MissingObject { name } => {
                write!(f, "topology has no object named {name}")
            }
            TopologyError::InvalidArc { index, reason } => {
                write!(f, "invalid arc at index {index}: {reason}")
            }
            TopologyError::InvalidGeometry { index, reason } => {
                write!(f, "invalid geometry at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for TopologyError {}

/// Extracts the named object of a TopoJSON Topology as region features.
///
/// Quantized topologies (the world-atlas distribution format) are
/// delta-decoded through the topology transform; non-quantized arcs are
/// taken as absolute positions. Shared arcs are stitched back into rings,
/// honoring the ones'-complement convention for reversed arc references.
pub fn regions_from_topojson_str(
    payload: &str,
    object_name: &str,
) -> Result<RegionCollection, TopologyError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| TopologyError::InvalidArc {
        index: 0,
        reason: format!("JSON parse error: {e}"),
    })?;
    regions_from_topojson_value(&value, object_name)
}

pub fn regions_from_topojson_value(
    value: &Value,
    object_name: &str,
) -> Result<RegionCollection, TopologyError> {
    let obj = value.as_object().ok_or(TopologyError::NotATopology)?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(TopologyError::NotATopology)?;
    if ty != "Topology" {
        return Err(TopologyError::NotATopology);
    }

    let transform = parse_transform(obj.get("transform"));
    let arcs = decode_arcs(obj.get("arcs"), transform)?;

    let target = obj
        .get("objects")
        .and_then(|o| o.get(object_name))
        .ok_or_else(|| TopologyError::MissingObject {
            name: object_name.to_string(),
        })?;

    let geometries: Vec<&Value> = match target.get("type").and_then(|v| v.as_str()) {
        Some("GeometryCollection") => target
            .get("geometries")
            .and_then(|g| g.as_array())
            .map(|g| g.iter().collect())
            .unwrap_or_default(),
        Some(_) => vec![target],
        None => {
            return Err(TopologyError::InvalidGeometry {
                index: 0,
                reason: "object missing type".to_string(),
            });
        }
    };

    let mut features = Vec::with_capacity(geometries.len());
    for (index, geom) in geometries.iter().enumerate() {
        let Some(geometry) = geometry_from_arcs(geom, &arcs)
            .map_err(|reason| TopologyError::InvalidGeometry { index, reason })?
        else {
            continue;
        };

        features.push(RegionFeature {
            id: feature_id(geom),
            name: feature_name(geom),
            geometry,
        });
    }

    Ok(RegionCollection { features })
}

#[derive(Debug, Copy, Clone)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

fn parse_transform(value: Option<&Value>) -> Option<Transform> {
    let obj = value?.as_object()?;
    let pair = |key: &str| -> Option<[f64; 2]> {
        let arr = obj.get(key)?.as_array()?;
        Some([arr.first()?.as_f64()?, arr.get(1)?.as_f64()?])
    };
    Some(Transform {
        scale: pair("scale")?,
        translate: pair("translate")?,
    })
}

fn decode_arcs(
    value: Option<&Value>,
    transform: Option<Transform>,
) -> Result<Vec<Vec<GeoPoint>>, TopologyError> {
    let arcs_val = value
        .and_then(|v| v.as_array())
        .ok_or(TopologyError::NotATopology)?;

    let mut arcs = Vec::with_capacity(arcs_val.len());
    for (index, arc_val) in arcs_val.iter().enumerate() {
        let positions = arc_val
            .as_array()
            .ok_or_else(|| TopologyError::InvalidArc {
                index,
                reason: "arc must be an array of positions".to_string(),
            })?;

        let mut points = Vec::with_capacity(positions.len());
        // Quantized topologies delta-encode each arc; the accumulator
        // resets per arc.
        let mut x_acc = 0.0;
        let mut y_acc = 0.0;
        for pos in positions {
            let arr = pos.as_array().ok_or_else(|| TopologyError::InvalidArc {
                index,
                reason: "position must be an array".to_string(),
            })?;
            if arr.len() < 2 {
                return Err(TopologyError::InvalidArc {
                    index,
                    reason: "position must have [x, y]".to_string(),
                });
            }
            let x = arr[0].as_f64().ok_or_else(|| TopologyError::InvalidArc {
                index,
                reason: "x must be a number".to_string(),
            })?;
            let y = arr[1].as_f64().ok_or_else(|| TopologyError::InvalidArc {
                index,
                reason: "y must be a number".to_string(),
            })?;

            let point = match transform {
                Some(t) => {
                    x_acc += x;
                    y_acc += y;
                    GeoPoint::new(
                        x_acc * t.scale[0] + t.translate[0],
                        y_acc * t.scale[1] + t.translate[1],
                    )
                }
                None => GeoPoint::new(x, y),
            };
            points.push(point);
        }
        arcs.push(points);
    }
    Ok(arcs)
}

/// `Ok(None)` for non-polygonal topology geometries.
fn geometry_from_arcs(
    geom: &Value,
    arcs: &[Vec<GeoPoint>],
) -> Result<Option<RegionGeometry>, String> {
    let ty = geom
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;
    if ty != "Polygon" && ty != "MultiPolygon" {
        return Ok(None);
    }

    let arc_lists = geom
        .get("arcs")
        .and_then(|v| v.as_array())
        .ok_or("polygonal geometry missing arcs".to_string())?;

    if ty == "Polygon" {
        return Ok(Some(RegionGeometry::Polygon(build_rings(arc_lists, arcs)?)));
    }

    let mut polys = Vec::with_capacity(arc_lists.len());
    for poly in arc_lists {
        let rings = poly
            .as_array()
            .ok_or("MultiPolygon arcs must be an array of polygons".to_string())?;
        polys.push(build_rings(rings, arcs)?);
    }
    Ok(Some(RegionGeometry::MultiPolygon(polys)))
}

fn build_rings(ring_vals: &[Value], arcs: &[Vec<GeoPoint>]) -> Result<Vec<Vec<GeoPoint>>, String> {
    let mut rings = Vec::with_capacity(ring_vals.len());
    for ring_val in ring_vals {
        let indices = ring_val
            .as_array()
            .ok_or("ring must be an array of arc indices".to_string())?;

        let mut points: Vec<GeoPoint> = Vec::new();
        for idx_val in indices {
            let raw = idx_val
                .as_i64()
                .ok_or("arc index must be an integer".to_string())?;
            let (idx, reversed) = if raw < 0 {
                ((!raw) as usize, true)
            } else {
                (raw as usize, false)
            };
            let arc = arcs
                .get(idx)
                .ok_or_else(|| format!("arc index {raw} out of range"))?;

            // Consecutive arcs share their junction point; drop the
            // duplicate before appending.
            if !points.is_empty() {
                points.pop();
            }
            if reversed {
                points.extend(arc.iter().rev().copied());
            } else {
                points.extend(arc.iter().copied());
            }
        }
        rings.push(points);
    }
    Ok(rings)
}

#[cfg(test)]
mod tests {
    use super::{TopologyError, regions_from_topojson_str};
    use crate::region::{GeoPoint, RegionGeometry};

    // Two unit squares sharing a vertical edge (arc 0). The right square
    // references the shared arc reversed (~0 == -1).
    const TWO_SQUARES: &str = r#"{
        "type": "Topology",
        "objects": {
            "countries": {
                "type": "GeometryCollection",
                "geometries": [
                    {
                        "type": "Polygon",
                        "arcs": [[0, 1]],
                        "id": 1,
                        "properties": { "name": "Leftland" }
                    },
                    {
                        "type": "Polygon",
                        "arcs": [[2, -1]],
                        "properties": { "name": "Rightland" }
                    }
                ]
            }
        },
        "arcs": [
            [[1.0, 0.0], [1.0, 1.0]],
            [[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]],
            [[1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0]]
        ]
    }"#;

    fn ring_of(geom: &RegionGeometry) -> &[GeoPoint] {
        match geom {
            RegionGeometry::Polygon(rings) => &rings[0],
            RegionGeometry::MultiPolygon(_) => panic!("expected Polygon"),
        }
    }

    #[test]
    fn stitches_shared_arcs_into_closed_rings() {
        let regions = regions_from_topojson_str(TWO_SQUARES, "countries").expect("decode");
        assert_eq!(regions.features.len(), 2);

        let left = ring_of(&regions.features[0].geometry);
        assert_eq!(left.first(), left.last());
        assert_eq!(left.len(), 5);

        let right = ring_of(&regions.features[1].geometry);
        assert_eq!(right.first(), right.last());
        assert_eq!(
            right,
            &[
                GeoPoint::new(1.0, 0.0),
                GeoPoint::new(2.0, 0.0),
                GeoPoint::new(2.0, 1.0),
                GeoPoint::new(1.0, 1.0),
                GeoPoint::new(1.0, 0.0),
            ]
        );
    }

    #[test]
    fn carries_id_and_name() {
        let regions = regions_from_topojson_str(TWO_SQUARES, "countries").expect("decode");
        assert_eq!(regions.features[0].id.as_deref(), Some("1"));
        assert_eq!(regions.features[0].name.as_deref(), Some("Leftland"));
        assert_eq!(regions.features[1].id, None);
        assert_eq!(regions.features[1].name.as_deref(), Some("Rightland"));
    }

    #[test]
    fn delta_decodes_quantized_arcs_through_transform() {
        let payload = r#"{
            "type": "Topology",
            "transform": { "scale": [0.5, 2.0], "translate": [10.0, 20.0] },
            "objects": {
                "countries": {
                    "type": "GeometryCollection",
                    "geometries": [
                        { "type": "Polygon", "arcs": [[0]], "properties": { "name": "Quantopia" } }
                    ]
                }
            },
            "arcs": [
                [[2, 1], [1, 1], [-3, 0], [0, -2]]
            ]
        }"#;
        let regions = regions_from_topojson_str(payload, "countries").expect("decode");
        let ring = ring_of(&regions.features[0].geometry);
        assert_eq!(
            ring,
            &[
                GeoPoint::new(11.0, 22.0),
                GeoPoint::new(11.5, 24.0),
                GeoPoint::new(10.0, 24.0),
                GeoPoint::new(10.0, 20.0),
            ]
        );
    }

    #[test]
    fn missing_object_is_an_error() {
        let err = regions_from_topojson_str(TWO_SQUARES, "states").unwrap_err();
        assert!(matches!(err, TopologyError::MissingObject { .. }));
    }

    #[test]
    fn rejects_non_topology() {
        let err =
            regions_from_topojson_str(r#"{"type": "FeatureCollection"}"#, "countries").unwrap_err();
        assert!(matches!(err, TopologyError::NotATopology));
    }

    #[test]
    fn rejects_out_of_range_arc_reference() {
        let payload = r#"{
            "type": "Topology",
            "objects": {
                "countries": {
                    "type": "GeometryCollection",
                    "geometries": [{ "type": "Polygon", "arcs": [[7]] }]
                }
            },
            "arcs": []
        }"#;
        let err = regions_from_topojson_str(payload, "countries").unwrap_err();
        assert!(matches!(err, TopologyError::InvalidGeometry { .. }));
    }
}

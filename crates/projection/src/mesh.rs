use earcutr::earcut;
use foundation::Vec2;
use formats::RegionGeometry;

use crate::engine::Projection;

/// Triangulates a region's projected area for renderers that fill shapes
/// from triangle lists rather than path data.
///
/// Returns a flat list, 3 vertices per triangle, pixel coordinates.
pub fn mesh_for(projection: &Projection, geometry: &RegionGeometry) -> Vec<Vec2> {
    let mut out = Vec::new();
    for rings in geometry.polygons() {
        triangulate_rings(projection, rings, &mut out);
    }
    out
}

fn triangulate_rings(projection: &Projection, rings: &[Vec<formats::GeoPoint>], out: &mut Vec<Vec2>) {
    let mut vertices: Vec<Vec2> = Vec::new();
    let mut coords: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();

    for (ring_i, ring) in rings.iter().enumerate() {
        let mut ring_pts: Vec<Vec2> = ring.iter().map(|&p| projection.project(p)).collect();
        drop_closing_duplicate(&mut ring_pts);
        if ring_pts.len() < 3 {
            continue;
        }

        if ring_i > 0 {
            hole_indices.push(vertices.len());
        }

        for p in ring_pts {
            coords.push(p.x);
            coords.push(p.y);
            vertices.push(p);
        }
    }

    if vertices.len() < 3 {
        return;
    }

    let indices = match earcut(&coords, &hole_indices, 2) {
        Ok(ix) => ix,
        Err(_) => return,
    };

    out.reserve(indices.len());
    for idx in indices {
        if let Some(v) = vertices.get(idx) {
            out.push(*v);
        }
    }
}

fn drop_closing_duplicate(points: &mut Vec<Vec2>) {
    if points.len() >= 2 {
        let first = points[0];
        let last = *points.last().unwrap();
        if (first.x - last.x).abs() < 1e-9 && (first.y - last.y).abs() < 1e-9 {
            points.pop();
        }
    }
}

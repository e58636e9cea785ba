use foundation::{Aabb2, Vec2};
use formats::{GeoPoint, RegionGeometry};

use crate::natural_earth::natural_earth_raw;
use crate::path::{PathBuilder, PathData};

/// Natural Earth projection fitted to a viewport.
///
/// A projection is valid for exactly one viewport size; on resize the
/// caller fits a fresh one and discards this instance, never patches it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    scale: f64,
    translate: Vec2,
}

impl Projection {
    /// Unit projection: raw coordinates, north up, no offset.
    fn unit() -> Self {
        Self {
            scale: 1.0,
            translate: Vec2::ZERO,
        }
    }

    /// Fits the full geometry collection inside `width` x `height`,
    /// preserving aspect and centering the excess on the other axis.
    /// Deterministic for identical inputs. `None` when the collection has
    /// no vertices.
    pub fn fit<'a>(
        geometries: impl IntoIterator<Item = &'a RegionGeometry>,
        width: f64,
        height: f64,
    ) -> Option<Self> {
        let unit = Self::unit();
        let bounds = Aabb2::from_points(
            geometries
                .into_iter()
                .flat_map(|g| g.vertices())
                .map(|p| unit.project(p)),
        )?;

        let bw = bounds.width();
        let bh = bounds.height();
        let scale = if bw > 0.0 && bh > 0.0 {
            (width / bw).min(height / bh)
        } else {
            1.0
        };

        let translate = Vec2::new(
            (width - scale * (bounds.min.x + bounds.max.x)) * 0.5,
            (height - scale * (bounds.min.y + bounds.max.y)) * 0.5,
        );

        // The fitted translate composes with the unit projection's y flip,
        // so the final project() keeps north at smaller pixel y.
        Some(Self { scale, translate })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Geographic degrees to viewport pixels (y grows downward).
    pub fn project(&self, p: GeoPoint) -> Vec2 {
        let (rx, ry) = natural_earth_raw(p.lon_deg.to_radians(), p.lat_deg.to_radians());
        Vec2::new(
            self.translate.x + self.scale * rx,
            self.translate.y - self.scale * ry,
        )
    }

    /// Drawable outline for one region under this projection.
    pub fn path_for(&self, geometry: &RegionGeometry) -> PathData {
        let mut builder = PathBuilder::new();
        for rings in geometry.polygons() {
            for ring in rings {
                let mut points = ring.iter().map(|&p| self.project(p));
                let Some(first) = points.next() else {
                    continue;
                };
                builder.move_to(first);
                for p in points {
                    builder.line_to(p);
                }
                builder.close();
            }
        }
        builder.finish()
    }

    /// Pixel-space bounding box of a region, holes included.
    pub fn bounds_for(&self, geometry: &RegionGeometry) -> Option<Aabb2> {
        Aabb2::from_points(geometry.vertices().map(|p| self.project(p)))
    }
}

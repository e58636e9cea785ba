use foundation::Aabb2;
use gazetteer::{GeographyIndex, RegionKey};
use projection::{PathData, Projection};

/// Container size in pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const ZERO: Viewport = Viewport {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// One region as rendered: outline path plus pixel bounds under the
/// scene's projection.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    pub key: RegionKey,
    pub name: String,
    pub path: PathData,
    pub bounds: Aabb2,
}

/// The rendered map: every region shape under one fitted projection.
///
/// A scene is immutable; re-rendering builds a replacement from scratch
/// rather than patching shapes in place.
#[derive(Debug, Clone)]
pub struct Scene {
    viewport: Viewport,
    projection: Projection,
    shapes: Vec<RegionShape>,
}

impl Scene {
    /// Projects every region into `viewport`. `None` when the viewport has
    /// no area or the geometry has no drawable vertices.
    pub fn build(index: &GeographyIndex, viewport: Viewport) -> Option<Self> {
        if viewport.is_empty() {
            return None;
        }

        let projection = Projection::fit(
            index.regions().iter().map(|r| &r.geometry),
            viewport.width,
            viewport.height,
        )?;

        let shapes = index
            .regions()
            .iter()
            .filter_map(|region| {
                let bounds = projection.bounds_for(&region.geometry)?;
                Some(RegionShape {
                    key: region.key.clone(),
                    name: region.name.clone(),
                    path: projection.path_for(&region.geometry),
                    bounds,
                })
            })
            .collect();

        Some(Self {
            viewport,
            projection,
            shapes,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Shapes in region display order.
    pub fn shapes(&self) -> &[RegionShape] {
        &self.shapes
    }

    pub fn shape(&self, key: &RegionKey) -> Option<&RegionShape> {
        self.shapes.iter().find(|s| &s.key == key)
    }
}

#[cfg(test)]
mod tests {
    use formats::{GeoPoint, RegionCollection, RegionFeature, RegionGeometry};
    use gazetteer::{AliasTable, GeographyIndex, RegionKey};
    use pretty_assertions::assert_eq;

    use super::{Scene, Viewport};

    fn index() -> GeographyIndex {
        let mut features = Vec::new();
        for (id, name, lon) in [
            ("FRA", "France", 0.0),
            ("DEU", "Germany", 20.0),
            ("ESP", "Spain", -20.0),
        ] {
            features.push(RegionFeature {
                id: Some(id.to_string()),
                name: Some(name.to_string()),
                geometry: RegionGeometry::Polygon(vec![vec![
                    GeoPoint::new(lon, 40.0),
                    GeoPoint::new(lon + 8.0, 40.0),
                    GeoPoint::new(lon + 8.0, 50.0),
                    GeoPoint::new(lon, 40.0),
                ]]),
            });
        }
        GeographyIndex::from_features(RegionCollection { features }, AliasTable::default())
            .expect("index")
    }

    #[test]
    fn zero_viewport_builds_nothing() {
        assert!(Scene::build(&index(), Viewport::ZERO).is_none());
        assert!(Scene::build(&index(), Viewport::new(800.0, 0.0)).is_none());
    }

    #[test]
    fn shapes_follow_region_display_order() {
        let scene = Scene::build(&index(), Viewport::new(800.0, 600.0)).expect("scene");
        let names: Vec<&str> = scene.shapes().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["France", "Germany", "Spain"]);
    }

    #[test]
    fn shape_lookup_by_key() {
        let scene = Scene::build(&index(), Viewport::new(800.0, 600.0)).expect("scene");
        let fra = scene.shape(&RegionKey::new("FRA")).expect("shape");
        assert!(!fra.path.is_empty());
        assert!(fra.bounds.width() > 0.0);
        assert!(scene.shape(&RegionKey::new("???")).is_none());
    }

    #[test]
    fn western_region_sits_left_of_eastern() {
        let scene = Scene::build(&index(), Viewport::new(800.0, 600.0)).expect("scene");
        let spain = scene.shape(&RegionKey::new("ESP")).expect("shape");
        let germany = scene.shape(&RegionKey::new("DEU")).expect("shape");
        assert!(spain.bounds.min.x < germany.bounds.min.x);
    }
}

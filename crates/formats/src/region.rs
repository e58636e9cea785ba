/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// Region outline in geographic coordinates. Rings follow the GeoJSON
/// convention: first ring is the exterior, the rest are holes.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    Polygon(Vec<Vec<GeoPoint>>),
    MultiPolygon(Vec<Vec<Vec<GeoPoint>>>),
}

impl RegionGeometry {
    /// All polygons of the geometry, one element per outer ring.
    pub fn polygons(&self) -> Vec<&[Vec<GeoPoint>]> {
        match self {
            RegionGeometry::Polygon(rings) => vec![rings.as_slice()],
            RegionGeometry::MultiPolygon(polys) => polys.iter().map(|p| p.as_slice()).collect(),
        }
    }

    /// Every vertex of every ring, exterior and holes alike.
    pub fn vertices(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        let mut rings: Vec<&[GeoPoint]> = Vec::new();
        match self {
            RegionGeometry::Polygon(rs) => rings.extend(rs.iter().map(|r| r.as_slice())),
            RegionGeometry::MultiPolygon(polys) => {
                for poly in polys {
                    rings.extend(poly.iter().map(|r| r.as_slice()));
                }
            }
        }
        rings.into_iter().flatten().copied()
    }
}

/// One selectable region as parsed from a geography source.
///
/// `id` and `name` are both optional at this layer; key assignment happens
/// when an index is built over the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    pub id: Option<String>,
    pub name: Option<String>,
    pub geometry: RegionGeometry,
}

/// Flat feature list produced by the source parsers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionCollection {
    pub features: Vec<RegionFeature>,
}

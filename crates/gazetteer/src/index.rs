use std::collections::BTreeMap;

use formats::{GeoJsonError, RegionCollection, RegionGeometry, TopologyError};

use crate::alias::AliasTable;
use crate::normalize::normalize;

/// Stable identifier of a region, derived from the source feature's
/// intrinsic id when present.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionKey(String);

impl RegionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One selectable region. Immutable once the index is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub key: RegionKey,
    pub name: String,
    pub geometry: RegionGeometry,
}

#[derive(Debug)]
pub enum GeographyLoadError {
    GeoJson(GeoJsonError),
    Topology(TopologyError),
    Empty,
}

impl std::fmt::Display for GeographyLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeographyLoadError::GeoJson(e) => write!(f, "geography source error: {e}"),
            GeographyLoadError::Topology(e) => write!(f, "geography source error: {e}"),
            GeographyLoadError::Empty => write!(f, "geography source contains no regions"),
        }
    }
}

impl std::error::Error for GeographyLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeographyLoadError::GeoJson(e) => Some(e),
            GeographyLoadError::Topology(e) => Some(e),
            GeographyLoadError::Empty => None,
        }
    }
}

/// Region set plus normalized-name resolution.
///
/// Invariants:
/// - `regions` holds every region exactly once, ordered by display name
///   (case-insensitive).
/// - `name_lookup` maps each region's own normalized name to its key.
/// - Alias resolution goes alias → canonical name → `name_lookup`, so it
///   can only yield keys present in `regions`.
#[derive(Debug, Clone)]
pub struct GeographyIndex {
    regions: Vec<Region>,
    name_lookup: BTreeMap<String, RegionKey>,
    aliases: AliasTable,
}

impl GeographyIndex {
    /// Builds the index over a parsed region collection.
    ///
    /// Key assignment: the feature's intrinsic id when present, else its
    /// display name; nameless features get a positional `Country N` name
    /// first (N in source order).
    pub fn from_features(
        collection: RegionCollection,
        aliases: AliasTable,
    ) -> Result<Self, GeographyLoadError> {
        if collection.features.is_empty() {
            return Err(GeographyLoadError::Empty);
        }

        let mut regions: Vec<Region> = collection
            .features
            .into_iter()
            .enumerate()
            .map(|(index, feat)| {
                let name = feat
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| format!("Country {}", index + 1));
                let key = RegionKey::new(feat.id.unwrap_or_else(|| name.clone()));
                Region {
                    key,
                    name,
                    geometry: feat.geometry,
                }
            })
            .collect();

        regions.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut name_lookup = BTreeMap::new();
        for region in &regions {
            name_lookup.insert(normalize(&region.name), region.key.clone());
        }

        Ok(Self {
            regions,
            name_lookup,
            aliases,
        })
    }

    pub fn from_geojson_str(
        payload: &str,
        aliases: AliasTable,
    ) -> Result<Self, GeographyLoadError> {
        let collection =
            formats::regions_from_geojson_str(payload).map_err(GeographyLoadError::GeoJson)?;
        Self::from_features(collection, aliases)
    }

    pub fn from_topojson_str(
        payload: &str,
        object_name: &str,
        aliases: AliasTable,
    ) -> Result<Self, GeographyLoadError> {
        let collection = formats::regions_from_topojson_str(payload, object_name)
            .map_err(GeographyLoadError::Topology)?;
        Self::from_features(collection, aliases)
    }

    /// Regions in display order (name, case-insensitive).
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, key: &RegionKey) -> Option<&Region> {
        self.regions.iter().find(|r| &r.key == key)
    }

    pub fn display_name(&self, key: &RegionKey) -> Option<&str> {
        self.get(key).map(|r| r.name.as_str())
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Resolves a free-text name to a region key.
    ///
    /// Direct normalized-name matches always win; the alias table is
    /// consulted only on a direct miss.
    pub fn resolve(&self, name: &str) -> Option<&RegionKey> {
        let norm = normalize(name);
        if let Some(key) = self.name_lookup.get(&norm) {
            return Some(key);
        }
        self.aliases
            .canonical(&norm)
            .and_then(|canonical| self.name_lookup.get(canonical))
    }

    /// Resolves a comma-separated country field, skipping segments that do
    /// not match any region. Partial matches are expected, not an error.
    pub fn resolve_country_list(&self, raw: &str) -> Vec<RegionKey> {
        raw.split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| {
                let key = self.resolve(segment);
                if key.is_none() {
                    log::debug!("unresolved country name: {segment:?}");
                }
                key.cloned()
            })
            .collect()
    }

    /// Incremental search: the first region whose name starts with the
    /// query (case-insensitive), else the first whose name contains it.
    pub fn search(&self, query: &str) -> Option<&Region> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.regions
            .iter()
            .find(|r| r.name.to_lowercase().starts_with(&query))
            .or_else(|| {
                self.regions
                    .iter()
                    .find(|r| r.name.to_lowercase().contains(&query))
            })
    }

    /// All regions whose name contains the query (the side-list filter).
    /// An empty query returns every region.
    pub fn filter(&self, query: &str) -> Vec<&Region> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.regions.iter().collect();
        }
        self.regions
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&query))
            .collect()
    }
}

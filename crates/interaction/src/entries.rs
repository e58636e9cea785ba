use std::collections::BTreeMap;

use gazetteer::{GeographyIndex, RegionKey};

/// Entry counts per region, as supplied by the external entry provider.
/// The map core only ever reads this; recomputing highlight state pulls
/// from it on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCounts {
    counts: BTreeMap<RegionKey, usize>,
}

impl EntryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: impl IntoIterator<Item = (RegionKey, usize)>) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    /// Reduces provider records to per-region counts.
    ///
    /// Each record names its region by key, or by a free-text country
    /// field ("USA, France"). Key matches win; otherwise every country
    /// name that resolves contributes one entry. Records that resolve to
    /// nothing are dropped, which is expected for noisy fields.
    pub fn from_records<'a>(
        index: &GeographyIndex,
        records: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut out = Self::new();
        for record in records {
            let as_key = RegionKey::new(record);
            if index.get(&as_key).is_some() {
                out.add(as_key);
                continue;
            }
            for key in index.resolve_country_list(record) {
                out.add(key);
            }
        }
        out
    }

    pub fn add(&mut self, key: RegionKey) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn count(&self, key: &RegionKey) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn has_entries(&self, key: &RegionKey) -> bool {
        self.count(key) > 0
    }

    /// Number of distinct regions with at least one entry.
    pub fn regions_with_entries(&self) -> usize {
        self.counts.values().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|&c| c == 0)
    }
}

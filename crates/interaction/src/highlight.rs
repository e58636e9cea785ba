use gazetteer::RegionKey;

use crate::entries::EntryCounts;
use crate::selection::Selection;

/// Render-time classification of one region.
///
/// Always derived from `EntryCounts` + `Selection` at the moment of the
/// query; never stored, so it cannot drift from either source of truth.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    /// The region has at least one entry.
    pub has_entries: bool,
    /// The region is the current selection.
    pub active: bool,
}

pub fn classify(key: &RegionKey, entries: &EntryCounts, selection: &Selection) -> Highlight {
    Highlight {
        has_entries: entries.has_entries(key),
        active: selection.is_selected(key),
    }
}

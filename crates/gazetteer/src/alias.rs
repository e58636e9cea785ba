use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// Alternate-name table: normalized alias → normalized canonical name.
///
/// The table never maps to region keys directly; resolution always takes
/// one extra step through the index's name lookup, so an alias can only
/// ever surface a region that actually exists.
///
/// The contents are data, not code: callers may load their own table from
/// JSON (`{"usa": "united states of america", ...}`) or extend the built-in
/// default, which carries the handful of mismatches between common country
/// names and the world-atlas display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    aliases: BTreeMap<String, String>,
}

#[derive(Debug)]
pub enum AliasTableError {
    Parse(String),
}

impl std::fmt::Display for AliasTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AliasTableError::Parse(msg) => write!(f, "alias table parse error: {msg}"),
        }
    }
}

impl std::error::Error for AliasTableError {}

impl AliasTable {
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Builds a table from `(alias, canonical)` pairs, normalizing both
    /// sides. Empty aliases are dropped.
    pub fn from_pairs<I, A, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: AsRef<str>,
    {
        let mut table = Self::empty();
        for (alias, canonical) in pairs {
            table.insert(alias.as_ref(), canonical.as_ref());
        }
        table
    }

    /// Parses a JSON object of alias → canonical name entries.
    pub fn from_json_str(payload: &str) -> Result<Self, AliasTableError> {
        let raw: BTreeMap<String, String> =
            serde_json::from_str(payload).map_err(|e| AliasTableError::Parse(e.to_string()))?;
        Ok(Self::from_pairs(raw))
    }

    pub fn insert(&mut self, alias: &str, canonical: &str) {
        let alias = normalize(alias);
        if alias.is_empty() {
            return;
        }
        self.aliases.insert(alias, normalize(canonical));
    }

    /// Canonical form for an already-normalized alias, if known.
    pub fn canonical(&self, normalized_alias: &str) -> Option<&str> {
        self.aliases.get(normalized_alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for AliasTable {
    /// Aliases observed to diverge between everyday country names and the
    /// world-atlas display names.
    fn default() -> Self {
        Self::from_pairs([
            ("usa", "united states of america"),
            ("united states", "united states of america"),
            ("uk", "united kingdom"),
            ("russia", "russian federation"),
            ("south korea", "korea, republic of"),
            ("north korea", "korea, democratic people's republic of"),
            ("iran", "iran, islamic republic of"),
            ("vietnam", "viet nam"),
            ("venezuela", "venezuela, bolivarian republic of"),
        ])
    }
}

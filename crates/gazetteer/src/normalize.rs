/// Canonical name normalization: lower-case, strip periods, trim
/// surrounding whitespace.
///
/// Every name comparison in the workspace goes through this function, so
/// indexing and querying can never disagree on the rule. Total and
/// idempotent for any input.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().replace('.', "").trim().to_string()
}

//! Tiered substring ranking of catalog entries against the add-search query.

use crate::catalog::CatalogEntry;

/// Maximum number of ranked results handed to the dropdown.
pub const MAX_RESULTS: usize = 20;

/// Match specificity. Declaration order is priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    ExactCode,
    ExactId,
    ExactName,
    Partial,
}

impl MatchTier {
    const ALL: [MatchTier; 4] = [
        MatchTier::ExactCode,
        MatchTier::ExactId,
        MatchTier::ExactName,
        MatchTier::Partial,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Tier of `entry` for an already-normalized, non-empty query, or `None` when
/// no field contains the query.
pub fn classify(entry: &CatalogEntry, normalized_query: &str) -> Option<MatchTier> {
    if normalized_query.is_empty() {
        return None;
    }
    let (id, name, code) = (entry.normalized_id(), entry.normalized_name(), entry.normalized_code());
    if code == normalized_query {
        Some(MatchTier::ExactCode)
    } else if id == normalized_query {
        Some(MatchTier::ExactId)
    } else if name == normalized_query {
        Some(MatchTier::ExactName)
    } else if name.contains(normalized_query)
        || code.contains(normalized_query)
        || id.contains(normalized_query)
    {
        Some(MatchTier::Partial)
    } else {
        None
    }
}

/// Rank `catalog` against `query`: tier-major, catalog order within a tier,
/// at most [`MAX_RESULTS`] entries. Pure; an empty query or catalog yields
/// nothing.
pub fn rank<'a>(query: &str, catalog: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
    let normalized = normalize_query(query);
    if normalized.is_empty() || catalog.is_empty() {
        return Vec::new();
    }

    // Only the first MAX_RESULTS of any tier can survive truncation.
    let mut buckets: [Vec<&CatalogEntry>; 4] = Default::default();
    for entry in catalog {
        if let Some(tier) = classify(entry, &normalized) {
            let bucket = &mut buckets[tier.slot()];
            if bucket.len() < MAX_RESULTS {
                bucket.push(entry);
            }
        }
    }

    MatchTier::ALL
        .iter()
        .flat_map(|tier| buckets[tier.slot()].iter().copied())
        .take(MAX_RESULTS)
        .collect()
}

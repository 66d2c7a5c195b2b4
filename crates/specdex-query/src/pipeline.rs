#![forbid(unsafe_code)]

//! The list-processing pipeline: `(entries, query) → ordered sequence`.
//!
//! Pure function of its inputs. Fixed order: filter (type dimension, then
//! search), then one stable sort by the query's sort key. Runs only when
//! the query state changes; scroll events never reach this module.
//!
//! # Invariants
//!
//! 1. Determinism: same `(entries, query)` → bit-identical output order.
//! 2. Stability: entries with equal sort keys keep their input order.
//! 3. Totality: never panics; no matches is an empty (valid) sequence.

use crate::matcher::NameMatch;
use specdex_core::{QueryState, SortKey, Specie};
use tracing::debug;

/// A filtered survivor with the per-entry data the sort step needs.
struct Row<'a> {
    specie: &'a Specie,
    name_lower: String,
    matched: Option<NameMatch>,
}

/// Derive the rendered order/subset from raw entries plus query state.
///
/// Returns references into `entries` (no copies); the output order defines
/// the render order. Cost is O(n log n), dominated by the sort.
#[must_use]
pub fn process<'a>(entries: &'a [Specie], query: &QueryState) -> Vec<&'a Specie> {
    let searching = !query.search.is_empty();
    let search_lower = query.search.to_lowercase();

    let mut rows: Vec<Row<'a>> = entries
        .iter()
        .filter(|specie| {
            query.filters.types.is_empty()
                || specie.types.iter().any(|t| query.filters.types.has(*t))
        })
        .filter_map(|specie| {
            let name_lower = specie.name.to_lowercase();
            let matched = if searching {
                Some(NameMatch::detect(&search_lower, &name_lower)?)
            } else {
                None
            };
            Some(Row {
                specie,
                name_lower,
                matched,
            })
        })
        .collect();

    sort_rows(&mut rows, query.sort, searching);

    debug!(
        total = entries.len(),
        kept = rows.len(),
        sort = %query.sort,
        searching,
        "list pipeline recomputed"
    );

    rows.into_iter().map(|row| row.specie).collect()
}

/// Stable sort of the survivors. Equal keys keep input order so re-renders
/// never jitter.
fn sort_rows(rows: &mut [Row<'_>], sort: SortKey, searching: bool) {
    match sort {
        SortKey::Relevance => {
            if searching {
                // Prefix first, then substring by position, then fuzzy;
                // alphabetical tiebreak.
                rows.sort_by(|a, b| {
                    let ka = a.matched.map(NameMatch::sort_key).unwrap_or_default();
                    let kb = b.matched.map(NameMatch::sort_key).unwrap_or_default();
                    ka.cmp(&kb).then_with(|| a.name_lower.cmp(&b.name_lower))
                });
            } else {
                // No search intent: catalog order.
                rows.sort_by_key(|row| row.specie.number);
            }
        }
        SortKey::Name => {
            rows.sort_by(|a, b| {
                a.name_lower
                    .cmp(&b.name_lower)
                    .then_with(|| a.specie.name.cmp(&b.specie.name))
            });
        }
        SortKey::Number => rows.sort_by_key(|row| row.specie.number),
        SortKey::Stat(key) => {
            // Descending on the stat; ties by catalog number ascending.
            rows.sort_by(|a, b| {
                b.specie
                    .stats
                    .get(key)
                    .cmp(&a.specie.stats.get(key))
                    .then_with(|| a.specie.number.cmp(&b.specie.number))
            });
        }
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{Catalog, PluginRecord};
use crate::facets;
use crate::matcher::{self, RecordMatches};
use crate::query::QueryState;
use crate::sort;

/// One page of query results, plus the totals the pager needs.
#[derive(Debug, Clone)]
pub struct ResultPage {
    pub items: Vec<Arc<PluginRecord>>,
    /// Match spans for the records on this page, keyed by plugin name.
    /// Empty while search is inactive.
    pub matches: HashMap<String, RecordMatches>,
    /// Records surviving filter and search, across all pages.
    pub total_count: usize,
    /// The served page, after clamping.
    pub page: usize,
    pub total_pages: usize,
}

/// Run the full query pipeline: facet filter, then text match on the
/// filtered subset, then a stable sort, then the pagination slice.
///
/// A requested page beyond the last one is clamped rather than served
/// empty, so a filter that shrinks the result set never strands the pager.
#[must_use]
pub fn run_query(catalog: &Catalog, state: &QueryState, page_size: usize) -> ResultPage {
    let page_size = page_size.max(1);
    let search_active = state.search_active();

    let mut survivors: Vec<(&Arc<PluginRecord>, Option<RecordMatches>)> = catalog
        .records()
        .iter()
        .filter(|record| facets::is_included(record, &state.filters))
        .filter_map(|record| {
            if search_active {
                matcher::match_record(record, &state.search_text)
                    .map(|matches| (record, Some(matches)))
            } else {
                Some((record, None))
            }
        })
        .collect();

    survivors.sort_by(|(a, matches_a), (b, matches_b)| {
        sort::compare(
            a,
            b,
            state.sort,
            matches_a.as_ref().map(RecordMatches::quality),
            matches_b.as_ref().map(RecordMatches::quality),
        )
    });

    let total_count = survivors.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = state.page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let slice = survivors
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect::<Vec<_>>();

    let mut matches = HashMap::new();
    let mut items = Vec::with_capacity(slice.len());
    for (record, record_matches) in slice {
        if let Some(record_matches) = record_matches {
            matches.insert(record.name.clone(), record_matches);
        }
        items.push(Arc::clone(record));
    }

    ResultPage {
        items,
        matches,
        total_count,
        page,
        total_pages,
    }
}

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::catalog::PluginRecord;
use crate::matcher::MatchQuality;
use crate::query::SortKey;

/// Order two records under `key`.
///
/// Intended for use with a stable sort so that ties preserve catalog order.
/// `quality_a`/`quality_b` carry the match quality for the Relevance key and
/// are ignored by every other key.
#[must_use]
pub fn compare(
    a: &PluginRecord,
    b: &PluginRecord,
    key: SortKey,
    quality_a: Option<MatchQuality>,
    quality_b: Option<MatchQuality>,
) -> Ordering {
    match key {
        SortKey::Relevance => quality_b
            .cmp(&quality_a)
            .then_with(|| name_order(a, b)),
        SortKey::Name => name_order(a, b),
        SortKey::ReleaseDate => newest_first(a.release_date, b.release_date),
        SortKey::FirstReleased => newest_first(a.first_released, b.first_released),
        SortKey::TotalInstalls => b.total_installs.cmp(&a.total_installs),
    }
}

fn name_order(a: &PluginRecord, b: &PluginRecord) -> Ordering {
    sortable_name(&a.name).cmp(&sortable_name(&b.name))
}

/// Case-fold and strip a leading `napari-`/`napari ` so "napari-foo" sorts
/// as "foo".
fn sortable_name(name: &str) -> String {
    let lower = name.to_lowercase();
    for prefix in ["napari-", "napari "] {
        if let Some(stripped) = lower.strip_prefix(prefix) {
            return stripped.to_string();
        }
    }
    lower
}

/// Descending by date; records without a date order last.
fn newest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_date;

    fn record(name: &str) -> PluginRecord {
        PluginRecord {
            name: name.to_string(),
            ..PluginRecord::default()
        }
    }

    #[test]
    fn name_sort_strips_the_napari_prefix() {
        let prefixed = record("napari-zarr");
        let bare = record("allencell");
        // "zarr" > "allencell" once the prefix is gone.
        assert_eq!(
            compare(&prefixed, &bare, SortKey::Name, None, None),
            Ordering::Greater
        );
        assert_eq!(sortable_name("Napari SVG"), "svg");
        assert_eq!(sortable_name("plain"), "plain");
    }

    #[test]
    fn release_date_sorts_newest_first_with_missing_last() {
        let mut newer = record("a");
        newer.release_date = parse_date("2022-01-01");
        let mut older = record("b");
        older.release_date = parse_date("2021-04-01");
        let undated = record("c");

        assert_eq!(
            compare(&newer, &older, SortKey::ReleaseDate, None, None),
            Ordering::Less
        );
        assert_eq!(
            compare(&older, &undated, SortKey::ReleaseDate, None, None),
            Ordering::Less
        );
        assert_eq!(
            compare(&undated, &newer, SortKey::ReleaseDate, None, None),
            Ordering::Greater
        );
    }

    #[test]
    fn installs_sort_descending_with_missing_as_zero() {
        let mut popular = record("a");
        popular.total_installs = 10_000;
        let unpopular = record("b");

        assert_eq!(
            compare(&popular, &unpopular, SortKey::TotalInstalls, None, None),
            Ordering::Less
        );
        assert_eq!(
            compare(&unpopular, &unpopular, SortKey::TotalInstalls, None, None),
            Ordering::Equal
        );
    }

    #[test]
    fn relevance_prefers_stronger_matches_then_name() {
        let exact = record("napari-b");
        let prefix = record("napari-a");

        assert_eq!(
            compare(
                &exact,
                &prefix,
                SortKey::Relevance,
                Some(MatchQuality::Exact),
                Some(MatchQuality::Prefix),
            ),
            Ordering::Less
        );
        // Equal quality falls back to name ascending.
        assert_eq!(
            compare(
                &exact,
                &prefix,
                SortKey::Relevance,
                Some(MatchQuality::Prefix),
                Some(MatchQuality::Prefix),
            ),
            Ordering::Greater
        );
    }

    #[test]
    fn comparisons_are_antisymmetric() {
        let mut a = record("napari-video");
        a.release_date = parse_date("2021-04-01");
        a.total_installs = 5;
        let mut b = record("napari-svg");
        b.release_date = parse_date("2022-01-01");
        b.total_installs = 9;

        for key in [
            SortKey::Name,
            SortKey::ReleaseDate,
            SortKey::FirstReleased,
            SortKey::TotalInstalls,
        ] {
            let forward = compare(&a, &b, key, None, None);
            let backward = compare(&b, &a, key, None, None);
            assert_eq!(forward, backward.reverse(), "key {key:?}");
        }
    }
}

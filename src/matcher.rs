use serde::Serialize;

use crate::catalog::PluginRecord;

/// A record field the text matcher inspects.
///
/// Each author name counts as its own field, so a record with three authors
/// exposes three `Author` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchField {
    Name,
    Summary,
    Description,
    Author(usize),
}

/// How well a field matched, from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchQuality {
    /// The query occurs somewhere inside the field.
    Substring,
    /// The field starts with the query.
    Prefix,
    /// The field equals the query.
    Exact,
}

/// The first occurrence of the query within one field, in char indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub field: MatchField,
    pub start: usize,
    pub end: usize,
}

/// All field matches for one record, plus the best quality among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordMatches {
    spans: Vec<SearchMatch>,
    quality: MatchQuality,
}

impl RecordMatches {
    /// At most one span per field, in field order.
    #[must_use]
    pub fn spans(&self) -> &[SearchMatch] {
        &self.spans
    }

    /// The span reported for `field`, if that field matched.
    #[must_use]
    pub fn span_for(&self, field: MatchField) -> Option<&SearchMatch> {
        self.spans.iter().find(|span| span.field == field)
    }

    /// The strongest quality across all matched fields.
    #[must_use]
    pub fn quality(&self) -> MatchQuality {
        self.quality
    }
}

/// Match `record` against `query`, reporting per-field spans.
///
/// An empty or whitespace-only query means search is inactive and yields
/// `None` for every record. Matching is case-insensitive substring matching,
/// evaluated independently per field; only the first occurrence per field is
/// reported. Pure: the same inputs always produce the same spans.
#[must_use]
pub fn match_record(record: &PluginRecord, query: &str) -> Option<RecordMatches> {
    let needle = fold_chars(query.trim());
    if needle.is_empty() {
        return None;
    }

    let mut spans = Vec::new();
    let mut quality: Option<MatchQuality> = None;

    let mut consider = |field: MatchField, text: &str| {
        if let Some((span, field_quality)) = find_in_field(text, &needle) {
            spans.push(SearchMatch {
                field,
                start: span.0,
                end: span.1,
            });
            quality = Some(match quality {
                Some(existing) => existing.max(field_quality),
                None => field_quality,
            });
        }
    };

    consider(MatchField::Name, &record.name);
    consider(MatchField::Summary, &record.summary);
    consider(MatchField::Description, &record.description);
    for (index, author) in record.authors.iter().enumerate() {
        consider(MatchField::Author(index), author);
    }

    let quality = quality?;
    Some(RecordMatches { spans, quality })
}

/// Case-fold to one char per input char so span indices stay aligned with
/// the original text.
fn fold_chars(text: &str) -> Vec<char> {
    text.chars()
        .map(|ch| ch.to_lowercase().next().unwrap_or(ch))
        .collect()
}

fn find_in_field(text: &str, needle: &[char]) -> Option<((usize, usize), MatchQuality)> {
    let haystack = fold_chars(text);
    if needle.len() > haystack.len() {
        return None;
    }

    let start = (0..=haystack.len() - needle.len())
        .find(|&offset| haystack[offset..offset + needle.len()] == *needle)?;
    let end = start + needle.len();

    let quality = if start == 0 && end == haystack.len() {
        MatchQuality::Exact
    } else if start == 0 {
        MatchQuality::Prefix
    } else {
        MatchQuality::Substring
    };

    Some(((start, end), quality))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PluginRecord {
        PluginRecord {
            name: "napari-video".into(),
            summary: "Video reading in napari".into(),
            description: "Reads video files frame by frame.".into(),
            authors: vec!["Jane Doe".into(), "Video Fan".into()],
            ..PluginRecord::default()
        }
    }

    #[test]
    fn inactive_query_matches_nothing() {
        assert!(match_record(&record(), "").is_none());
        assert!(match_record(&record(), "   ").is_none());
    }

    #[test]
    fn reports_first_occurrence_per_field() {
        let matches = match_record(&record(), "video").unwrap();
        let name = matches.span_for(MatchField::Name).unwrap();
        assert_eq!((name.start, name.end), (7, 12));

        let summary = matches.span_for(MatchField::Summary).unwrap();
        assert_eq!((summary.start, summary.end), (0, 5));

        let author = matches.span_for(MatchField::Author(1)).unwrap();
        assert_eq!((author.start, author.end), (0, 5));
        assert!(matches.span_for(MatchField::Author(0)).is_none());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let matches = match_record(&record(), "VIDEO").unwrap();
        assert!(matches.span_for(MatchField::Name).is_some());
    }

    #[test]
    fn quality_ranks_exact_over_prefix_over_substring() {
        assert!(MatchQuality::Exact > MatchQuality::Prefix);
        assert!(MatchQuality::Prefix > MatchQuality::Substring);

        let exact = match_record(&record(), "napari-video").unwrap();
        assert_eq!(exact.quality(), MatchQuality::Exact);

        let prefix = match_record(&record(), "napari-").unwrap();
        assert_eq!(prefix.quality(), MatchQuality::Prefix);

        let substring = match_record(&record(), "frame").unwrap();
        assert_eq!(substring.quality(), MatchQuality::Substring);
    }

    #[test]
    fn no_field_match_yields_none() {
        assert!(match_record(&record(), "segmentation").is_none());
    }

    #[test]
    fn query_longer_than_field_is_safe() {
        let mut short = record();
        short.summary = "hi".into();
        let matches = match_record(&short, "frame by frame").unwrap();
        assert!(matches.span_for(MatchField::Summary).is_none());
        assert!(matches.span_for(MatchField::Description).is_some());
    }
}

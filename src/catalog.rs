use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::facets;

/// A categorical axis over which plugin records can be filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    WorkflowStep,
    ImageModality,
    SupportedData,
    PluginType,
    PythonVersion,
    OperatingSystem,
    License,
}

impl Dimension {
    /// Every dimension, in the order facet groups are presented.
    pub const ALL: [Dimension; 7] = [
        Dimension::WorkflowStep,
        Dimension::ImageModality,
        Dimension::SupportedData,
        Dimension::PluginType,
        Dimension::PythonVersion,
        Dimension::OperatingSystem,
        Dimension::License,
    ];

    /// The query-string key carrying this dimension's enabled values.
    #[must_use]
    pub fn query_key(self) -> &'static str {
        match self {
            Self::WorkflowStep => "workflowStep",
            Self::ImageModality => "imageModality",
            Self::SupportedData => "supportedData",
            Self::PluginType => "pluginType",
            Self::PythonVersion => "python",
            Self::OperatingSystem => "operatingSystem",
            Self::License => "license",
        }
    }

    /// Reverse of [`Dimension::query_key`]; unknown keys map to `None`.
    #[must_use]
    pub fn from_query_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dimension| dimension.query_key() == key)
    }
}

/// Immutable metadata for one plugin, as delivered by the catalog fetch.
///
/// The fetch collaborator is responsible for schema validation; the only
/// leniency applied here is on dates, where unparsable values degrade to
/// `None` with a diagnostic instead of failing ingestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginRecord {
    pub name: String,
    pub summary: String,
    pub description: String,
    pub authors: Vec<String>,
    pub license: String,
    /// Raw trove classifier strings, e.g. `Operating System :: POSIX :: Linux`.
    pub operating_systems: Vec<String>,
    /// Raw PEP 440 requirement string, e.g. `>=3.8, <3.12`.
    pub python_version: String,
    pub workflow_steps: Vec<String>,
    pub image_modalities: Vec<String>,
    pub supported_data: Vec<String>,
    pub plugin_types: Vec<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_date")]
    pub first_released: Option<DateTime<Utc>>,
    pub total_installs: u64,
}

impl PluginRecord {
    /// Exact-membership facet values this record exposes for `dimension`.
    ///
    /// `PythonVersion` returns nothing: interpreter facets are decided by
    /// specifier satisfaction, not value membership.
    #[must_use]
    pub fn facet_values(&self, dimension: Dimension) -> Vec<String> {
        match dimension {
            Dimension::WorkflowStep => self.workflow_steps.clone(),
            Dimension::ImageModality => self.image_modalities.clone(),
            Dimension::SupportedData => self.supported_data.clone(),
            Dimension::PluginType => self.plugin_types.clone(),
            Dimension::PythonVersion => Vec::new(),
            Dimension::OperatingSystem => {
                facets::os_families(&self.operating_systems).into_iter().collect()
            }
            Dimension::License => {
                if self.license.is_empty() {
                    Vec::new()
                } else {
                    vec![self.license.clone()]
                }
            }
        }
    }
}

/// The immutable set of plugin records for the current session, together
/// with the facet values observed across them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Arc<PluginRecord>>,
    observed: IndexMap<Dimension, BTreeSet<String>>,
}

impl Catalog {
    /// Index an already-fetched list of records.
    #[must_use]
    pub fn new(records: Vec<PluginRecord>) -> Self {
        let records: Vec<Arc<PluginRecord>> = records.into_iter().map(Arc::new).collect();

        let mut observed: IndexMap<Dimension, BTreeSet<String>> = IndexMap::new();
        for dimension in Dimension::ALL {
            let values: BTreeSet<String> = if dimension == Dimension::PythonVersion {
                facets::INTERPRETER_VERSIONS
                    .iter()
                    .map(|version| (*version).to_string())
                    .collect()
            } else {
                records
                    .iter()
                    .flat_map(|record| record.facet_values(dimension))
                    .collect()
            };
            observed.insert(dimension, values);
        }

        Self { records, observed }
    }

    #[must_use]
    pub fn records(&self) -> &[Arc<PluginRecord>] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Facet values actually observed for `dimension` across the catalog.
    ///
    /// For `PythonVersion` this is the fixed interpreter list rather than
    /// record-derived values.
    #[must_use]
    pub fn observed_values(&self, dimension: Dimension) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.observed.get(&dimension).unwrap_or(&EMPTY)
    }

    /// Whether `value` is a known facet value for `dimension`.
    #[must_use]
    pub fn is_known_value(&self, dimension: Dimension, value: &str) -> bool {
        self.observed_values(dimension).contains(value)
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Parse a catalog date, accepting RFC 3339 stamps and bare `YYYY-MM-DD`.
pub(crate) fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Some(Utc.from_utc_datetime(&midnight));
    }
    tracing::debug!(value = trimmed, "ignoring unparsable catalog date");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> PluginRecord {
        PluginRecord {
            name: name.to_string(),
            ..PluginRecord::default()
        }
    }

    #[test]
    fn query_keys_round_trip() {
        for dimension in Dimension::ALL {
            assert_eq!(
                Dimension::from_query_key(dimension.query_key()),
                Some(dimension)
            );
        }
        assert_eq!(Dimension::from_query_key("colour"), None);
    }

    #[test]
    fn observed_values_cover_all_records() {
        let mut first = record("napari-svg");
        first.workflow_steps = vec!["Image annotation".into()];
        let mut second = record("napari-video");
        second.workflow_steps = vec!["Image segmentation".into()];

        let catalog = Catalog::new(vec![first, second]);
        let steps = catalog.observed_values(Dimension::WorkflowStep);
        assert!(steps.contains("Image annotation"));
        assert!(steps.contains("Image segmentation"));
        assert!(!catalog.is_known_value(Dimension::WorkflowStep, "Image restoration"));
    }

    #[test]
    fn python_versions_use_the_fixed_interpreter_list() {
        let catalog = Catalog::new(vec![record("napari-video")]);
        assert!(catalog.is_known_value(Dimension::PythonVersion, "3.9"));
        assert!(!catalog.is_known_value(Dimension::PythonVersion, "2.7"));
    }

    #[test]
    fn dates_parse_leniently() {
        assert!(parse_date("2021-04-01").is_some());
        assert!(parse_date("2021-04-01T12:30:00+00:00").is_some());
        assert!(parse_date("last tuesday").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn record_deserializes_from_catalog_json() {
        let json = r#"{
            "name": "napari-video",
            "summary": "napari plugin for working with videos",
            "authors": ["Jane Doe"],
            "license": "BSD-3-Clause",
            "operatingSystems": ["Operating System :: OS Independent"],
            "pythonVersion": ">=3.8",
            "workflowSteps": ["Image annotation"],
            "releaseDate": "2021-04-01",
            "firstReleased": "not a date",
            "totalInstalls": 4200
        }"#;

        let record: PluginRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "napari-video");
        assert!(record.release_date.is_some());
        assert!(record.first_released.is_none());
        assert_eq!(record.total_installs, 4200);
        assert!(record.description.is_empty());
    }
}

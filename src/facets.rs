use std::collections::BTreeSet;

use hubfind_specifier::{Specifier, Version};

use crate::catalog::{Dimension, PluginRecord};
use crate::query::FilterState;

/// Collapsed operating-system facet values.
pub const OS_LINUX: &str = "linux";
pub const OS_MAC: &str = "mac";
pub const OS_WINDOWS: &str = "windows";

/// Interpreter versions offered as Python facet values.
pub const INTERPRETER_VERSIONS: [&str; 6] = ["3.8", "3.9", "3.10", "3.11", "3.12", "3.13"];

/// Whether `record` passes every active facet constraint.
///
/// Values are OR-ed within a dimension and AND-ed across dimensions; a
/// dimension with no enabled values is not consulted.
#[must_use]
pub fn is_included(record: &PluginRecord, filters: &FilterState) -> bool {
    filters
        .active_dimensions()
        .all(|(dimension, enabled)| dimension_matches(record, dimension, enabled))
}

fn dimension_matches(
    record: &PluginRecord,
    dimension: Dimension,
    enabled: &BTreeSet<String>,
) -> bool {
    if dimension == Dimension::PythonVersion {
        return python_matches(record, enabled);
    }

    record
        .facet_values(dimension)
        .iter()
        .any(|value| enabled.contains(value))
}

/// A record sits under an interpreter facet value when its requirement
/// specifier is satisfied by that version. Records with unparsable
/// specifiers are excluded from every version facet and logged.
fn python_matches(record: &PluginRecord, enabled: &BTreeSet<String>) -> bool {
    let specifier: Specifier = match record.python_version.parse() {
        Ok(specifier) => specifier,
        Err(error) => {
            tracing::debug!(
                plugin = %record.name,
                specifier = %record.python_version,
                %error,
                "excluding record with unparsable python requirement",
            );
            return false;
        }
    };

    enabled.iter().any(|value| {
        value
            .parse::<Version>()
            .is_ok_and(|version| specifier.satisfied_by(&version))
    })
}

/// Collapse trove classifier strings to the `{linux, mac, windows}` facet
/// values; `OS Independent` expands to all three.
#[must_use]
pub fn os_families(classifiers: &[String]) -> BTreeSet<String> {
    let mut families = BTreeSet::new();
    for classifier in classifiers {
        if classifier.contains("OS Independent") {
            families.insert(OS_LINUX.to_string());
            families.insert(OS_MAC.to_string());
            families.insert(OS_WINDOWS.to_string());
            continue;
        }
        if classifier.contains("Linux") {
            families.insert(OS_LINUX.to_string());
        }
        if classifier.contains("MacOS") || classifier.contains("Mac OS") {
            families.insert(OS_MAC.to_string());
        }
        if classifier.contains("Windows") {
            families.insert(OS_WINDOWS.to_string());
        }
    }
    families
}

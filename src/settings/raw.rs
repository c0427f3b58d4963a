use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::ResolvedSettings;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawSettings {
    engine: EngineSection,
}

/// Engine tuning values as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EngineSection {
    page_size: Option<usize>,
    default_sort: Option<String>,
    debounce_ms: Option<u64>,
}

impl RawSettings {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(page_size) = cli.page_size {
            self.engine.page_size = Some(page_size);
        }
    }

    /// Validate and fill defaults.
    pub(super) fn resolve(self) -> anyhow::Result<ResolvedSettings> {
        ResolvedSettings::from_parts(
            self.engine.page_size,
            self.engine.default_sort.as_deref(),
            self.engine.debounce_ms,
        )
    }
}

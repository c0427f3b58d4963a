use anyhow::{Result, bail, ensure};

use hubfind::SortKey;

pub(crate) const DEFAULT_PAGE_SIZE: usize = 15;
pub(crate) const DEFAULT_SORT: SortKey = SortKey::ReleaseDate;
pub(crate) const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Application-ready configuration derived from user input, config files
/// and sensible defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedSettings {
    pub(crate) page_size: usize,
    pub(crate) default_sort: SortKey,
    pub(crate) debounce_ms: u64,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_sort: DEFAULT_SORT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl ResolvedSettings {
    /// Validate raw values and fill defaults.
    pub(super) fn from_parts(
        page_size: Option<usize>,
        default_sort: Option<&str>,
        debounce_ms: Option<u64>,
    ) -> Result<Self> {
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        ensure!(page_size > 0, "page-size must be greater than zero");

        let default_sort = match default_sort {
            None => DEFAULT_SORT,
            Some(tag) => match SortKey::from_query_value(tag) {
                Some(SortKey::Relevance) => {
                    bail!("default-sort cannot be 'relevance'; it needs an active search")
                }
                Some(key) => key,
                None => bail!("unknown default-sort: {tag}"),
            },
        };

        let debounce_ms = debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS);

        Ok(Self {
            page_size,
            default_sort,
            debounce_ms,
        })
    }

    /// Print a human readable summary of the effective configuration.
    pub(crate) fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Page size: {}", self.page_size);
        println!("  Default sort: {}", self.default_sort.as_query_value());
        println!("  URL debounce: {} ms", self.debounce_ms);
    }
}

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result, bail};

use hubfind::{
    Catalog, Dimension, PluginRecord, QueryState, QueryStore, ResultPage, run_query,
    seed_from_query, write_query_string,
};

use crate::cli::CliArgs;
use crate::settings::ResolvedSettings;

/// One-shot query session: catalog file in, result page out.
pub(crate) struct QueryWorkflow {
    settings: ResolvedSettings,
    store: QueryStore,
}

impl QueryWorkflow {
    /// Load the catalog and build a store reflecting `--url` plus the
    /// explicit CLI mutations, applied through the store so the usual
    /// correction rules hold.
    pub(crate) fn new(cli: &CliArgs, settings: ResolvedSettings) -> Result<Self> {
        let text = fs::read_to_string(&cli.catalog)
            .with_context(|| format!("failed to read catalog file {}", cli.catalog.display()))?;
        let records: Vec<PluginRecord> = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse catalog file {}", cli.catalog.display()))?;
        let catalog = Arc::new(Catalog::new(records));

        let state = match &cli.url {
            Some(url) => seed_from_query(url, &catalog, settings.default_sort),
            None => QueryState::with_defaults(settings.default_sort),
        };
        let mut store = QueryStore::with_state(catalog, settings.default_sort, state);

        if let Some(search) = &cli.search {
            store.set_search_text(search.clone());
        }
        for filter in &cli.filter {
            let (dimension, value) = parse_filter(filter)?;
            store.toggle_facet(dimension, value);
        }
        if let Some(sort) = cli.sort {
            store.set_sort(sort.into());
        }
        if let Some(page) = cli.page {
            store.set_page(page);
        }

        Ok(Self { settings, store })
    }

    /// Run the pipeline against the current state.
    pub(crate) fn run(&self) -> ResultPage {
        run_query(
            self.store.catalog(),
            &self.store.snapshot(),
            self.settings.page_size,
        )
    }

    /// The canonical query string reproducing the current state.
    pub(crate) fn share_query(&self) -> String {
        write_query_string(&self.store.snapshot())
    }
}

fn parse_filter(raw: &str) -> Result<(Dimension, &str)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("filter '{raw}' must look like DIMENSION=VALUE");
    };
    let Some(dimension) = Dimension::from_query_key(key.trim()) else {
        bail!("unknown filter dimension '{key}'");
    };
    Ok((dimension, value.trim()))
}

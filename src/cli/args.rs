use std::path::PathBuf;

use clap::{ArgAction, Parser};

use super::options::{OutputFormat, SortArg};

/// Command-line arguments accepted by the `hubfind` binary.
#[derive(Parser, Debug)]
#[command(
    name = "hubfind",
    version,
    about = "Query a plugin catalog: search, filter, sort and paginate"
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "HUBFIND_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        long,
        value_name = "FILE",
        env = "HUBFIND_CATALOG",
        help = "Catalog JSON file holding the plugin records"
    )]
    pub(crate) catalog: PathBuf,
    #[arg(
        short = 'u',
        long,
        value_name = "QUERY_STRING",
        help = "Seed the query state from a shared URL query string, e.g. '?search=video&sort=relevance'"
    )]
    pub(crate) url: Option<String>,
    #[arg(
        short = 'q',
        long,
        value_name = "TEXT",
        help = "Free-text search over name, summary, description and authors"
    )]
    pub(crate) search: Option<String>,
    #[arg(
        short = 'f',
        long = "filter",
        value_name = "DIMENSION=VALUE",
        action = ArgAction::Append,
        help = "Toggle a facet value, e.g. 'operatingSystem=linux' or 'python=3.9'"
    )]
    pub(crate) filter: Vec<String>,
    #[arg(short, long, value_enum, help = "Sort key for the result list")]
    pub(crate) sort: Option<SortArg>,
    #[arg(short, long, value_name = "N", help = "1-based result page to show")]
    pub(crate) page: Option<usize>,
    #[arg(long, value_name = "N", help = "Results per page (default: 15)")]
    pub(crate) page_size: Option<usize>,
    #[arg(
        short = 'o',
        long,
        value_enum,
        default_value = "plain",
        help = "Output format"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, help = "Also print the canonical shareable query string")]
    pub(crate) show_url: bool,
    #[arg(long, help = "Print the effective configuration before running")]
    pub(crate) print_config: bool,
}

/// Parse process arguments.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

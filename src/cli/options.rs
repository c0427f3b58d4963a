use clap::ValueEnum;

use hubfind::SortKey;

/// Sort keys selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SortArg {
    Relevance,
    Name,
    ReleaseDate,
    FirstReleased,
    TotalInstalls,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Relevance => SortKey::Relevance,
            SortArg::Name => SortKey::Name,
            SortArg::ReleaseDate => SortKey::ReleaseDate,
            SortArg::FirstReleased => SortKey::FirstReleased,
            SortArg::TotalInstalls => SortKey::TotalInstalls,
        }
    }
}

/// How query results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

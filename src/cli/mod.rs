//! Command-line interface for the one-shot query runner.

mod args;
mod options;
mod output;

pub(crate) use args::{CliArgs, parse_cli};
pub(crate) use options::OutputFormat;
pub(crate) use output::{print_json, print_plain};

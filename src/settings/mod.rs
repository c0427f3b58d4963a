//! Configuration loading and resolution for the query runner.
//!
//! `load` is the entry point: it layers default file locations, explicit
//! `--config` files and `HUBFIND__`-prefixed environment variables, applies
//! CLI overrides, and validates the result into a [`ResolvedSettings`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub(crate) use loader::load;
pub(crate) use resolved::ResolvedSettings;

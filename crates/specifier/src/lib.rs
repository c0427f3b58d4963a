//! PEP 440 style version specifiers, reduced to the release-segment grammar
//! that interpreter-requirement strings actually use.
//!
//! A [`Specifier`] is a comma-separated conjunction of clauses such as
//! `>=3.8, <3.12` or `~=3.9`. Parsing is strict: anything outside the
//! supported grammar is a [`SpecifierError`], and it is the caller's job to
//! decide how a malformed requirement degrades.

mod error;
mod specifier;
mod version;

pub use error::SpecifierError;
pub use specifier::{Clause, CompareOp, Specifier};
pub use version::Version;

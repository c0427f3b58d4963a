use thiserror::Error;

/// Errors produced while parsing a version or specifier string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecifierError {
    /// The version text was empty or contained a non-numeric segment.
    #[error("invalid version '{version}'")]
    InvalidVersion { version: String },

    /// A clause did not start with a recognized comparison operator.
    #[error("unrecognized operator in clause '{clause}'")]
    UnknownOperator { clause: String },

    /// A `.*` suffix appeared on an operator other than `==` or `!=`.
    #[error("wildcard is only valid with == and != in clause '{clause}'")]
    WildcardOperator { clause: String },

    /// A compatible-release clause needs a second segment to truncate.
    #[error("compatible-release clause '~={version}' needs at least two segments")]
    CompatibleReleaseTooShort { version: String },
}

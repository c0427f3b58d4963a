use std::fmt;
use std::str::FromStr;

use crate::{SpecifierError, Version};

/// Comparison operators accepted inside a specifier clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    GreaterEqual,
    LessEqual,
    Greater,
    Less,
    /// `~=`, the compatible-release operator.
    Compatible,
}

impl CompareOp {
    fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Compatible => "~=",
        }
    }
}

/// A single `<op><version>` clause, e.g. `>=3.8` or `!=3.0.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub op: CompareOp,
    pub version: Version,
    /// Set when the clause carried a `.*` suffix (`==3.9.*`).
    pub wildcard: bool,
}

impl Clause {
    /// Whether `candidate` satisfies this clause.
    #[must_use]
    pub fn matches(&self, candidate: &Version) -> bool {
        match self.op {
            CompareOp::Equal => {
                if self.wildcard {
                    candidate.starts_with(self.version.segments())
                } else {
                    candidate == &self.version
                }
            }
            CompareOp::NotEqual => {
                if self.wildcard {
                    !candidate.starts_with(self.version.segments())
                } else {
                    candidate != &self.version
                }
            }
            CompareOp::GreaterEqual => candidate >= &self.version,
            CompareOp::LessEqual => candidate <= &self.version,
            CompareOp::Greater => candidate > &self.version,
            CompareOp::Less => candidate < &self.version,
            CompareOp::Compatible => {
                // ~=X.Y(.Z) means >=X.Y(.Z) together with a prefix match on
                // everything but the final segment.
                let segments = self.version.segments();
                let prefix = &segments[..segments.len() - 1];
                candidate >= &self.version && candidate.starts_with(prefix)
            }
        }
    }
}

impl FromStr for Clause {
    type Err = SpecifierError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let (op, rest) = if let Some(rest) = trimmed.strip_prefix("==") {
            (CompareOp::Equal, rest)
        } else if let Some(rest) = trimmed.strip_prefix("!=") {
            (CompareOp::NotEqual, rest)
        } else if let Some(rest) = trimmed.strip_prefix(">=") {
            (CompareOp::GreaterEqual, rest)
        } else if let Some(rest) = trimmed.strip_prefix("<=") {
            (CompareOp::LessEqual, rest)
        } else if let Some(rest) = trimmed.strip_prefix("~=") {
            (CompareOp::Compatible, rest)
        } else if let Some(rest) = trimmed.strip_prefix('>') {
            (CompareOp::Greater, rest)
        } else if let Some(rest) = trimmed.strip_prefix('<') {
            (CompareOp::Less, rest)
        } else {
            return Err(SpecifierError::UnknownOperator {
                clause: trimmed.to_string(),
            });
        };

        let rest = rest.trim();
        let (version_text, wildcard) = match rest.strip_suffix(".*") {
            Some(stripped) => (stripped, true),
            None => (rest, false),
        };

        if wildcard && !matches!(op, CompareOp::Equal | CompareOp::NotEqual) {
            return Err(SpecifierError::WildcardOperator {
                clause: trimmed.to_string(),
            });
        }

        let version: Version = version_text.parse()?;

        if op == CompareOp::Compatible && version.segments().len() < 2 {
            return Err(SpecifierError::CompatibleReleaseTooShort {
                version: version_text.to_string(),
            });
        }

        Ok(Self {
            op,
            version,
            wildcard,
        })
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_str(), self.version)?;
        if self.wildcard {
            write!(f, ".*")?;
        }
        Ok(())
    }
}

/// A comma-separated conjunction of clauses.
///
/// The empty specifier (no clauses) is satisfied by every version, matching
/// how an absent interpreter requirement is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specifier {
    clauses: Vec<Clause>,
}

impl Specifier {
    /// The parsed clauses in source order.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Whether `candidate` satisfies every clause.
    #[must_use]
    pub fn satisfied_by(&self, candidate: &Version) -> bool {
        self.clauses.iter().all(|clause| clause.matches(candidate))
    }
}

impl FromStr for Specifier {
    type Err = SpecifierError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut clauses = Vec::new();
        for part in text.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            clauses.push(part.parse()?);
        }
        Ok(Self { clauses })
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, clause) in self.clauses.iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

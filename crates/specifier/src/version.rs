use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::SpecifierError;

/// A release-segment version such as `3.9` or `3.10.2`.
///
/// Comparison zero-pads the shorter release, so `3.9` and `3.9.0` are equal
/// and `3.10` orders after `3.9`.
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
}

impl Version {
    /// Create a version from explicit release segments.
    #[must_use]
    pub fn new(segments: Vec<u64>) -> Self {
        Self { segments }
    }

    /// The release segments as parsed, without zero-padding.
    #[must_use]
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Segment at `index`, treating absent trailing segments as zero.
    #[must_use]
    pub fn segment_or_zero(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }

    /// Whether the leading segments of `self` equal `prefix` exactly.
    ///
    /// Used for `==X.Y.*` wildcards and the compatible-release operator;
    /// trailing segments beyond the prefix are ignored, absent ones count
    /// as zero.
    #[must_use]
    pub fn starts_with(&self, prefix: &[u64]) -> bool {
        prefix
            .iter()
            .enumerate()
            .all(|(index, &segment)| self.segment_or_zero(index) == segment)
    }
}

// Equality must agree with `Ord`, which zero-pads, so it cannot be derived.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.segments.len().max(other.segments.len());
        for index in 0..width {
            let ordering = self
                .segment_or_zero(index)
                .cmp(&other.segment_or_zero(index));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = SpecifierError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SpecifierError::InvalidVersion {
                version: text.to_string(),
            });
        }

        let mut segments = Vec::new();
        for part in trimmed.split('.') {
            let segment = part.parse::<u64>().map_err(|_| SpecifierError::InvalidVersion {
                version: text.to_string(),
            })?;
            segments.push(segment);
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

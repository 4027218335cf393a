//! Accident severity classes and their display mapping.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal traffic-impact severity of an accident, from 1 (Minor) to 4 (SEVERE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Severity {
    Minor,
    Moderate,
    Major,
    Severe,
}

impl Severity {
    /// Maps a classifier output class to a severity.
    ///
    /// Returns `None` for anything outside 1..=4; callers must treat that as
    /// an unmapped-output error rather than displaying the raw class.
    #[must_use]
    pub const fn from_class(class: u32) -> Option<Self> {
        match class {
            1 => Some(Self::Minor),
            2 => Some(Self::Moderate),
            3 => Some(Self::Major),
            4 => Some(Self::Severe),
            _ => None,
        }
    }

    /// Returns the numeric class for this severity.
    #[must_use]
    pub const fn as_class(self) -> u32 {
        match self {
            Self::Minor => 1,
            Self::Moderate => 2,
            Self::Major => 3,
            Self::Severe => 4,
        }
    }

    /// Returns the display label for this severity.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Moderate => "Moderate",
            Self::Major => "Major",
            Self::Severe => "SEVERE",
        }
    }

    /// Returns the ANSI color code used when rendering this severity in a
    /// terminal.
    #[must_use]
    pub const fn ansi_color(self) -> &'static str {
        match self {
            Self::Minor => "32",
            Self::Moderate => "33",
            Self::Major => "91",
            Self::Severe => "1;31",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

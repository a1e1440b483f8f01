//! Static catalog of the supported list dumps.
//!
//! Each entry names the marker line that opens the data section, how many
//! header lines follow it, and how data lines are laid out.

use std::fmt;
use std::str::FromStr;

use cinedump_core::errors::ParseError;
use serde::{Deserialize, Serialize};

/// The list dumps cinedump understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    Ratings,
    Genres,
    Keywords,
    Languages,
    Locations,
    RunningTimes,
    Technical,
    Business,
}

impl FormatKind {
    pub const ALL: [FormatKind; 8] = [
        Self::Ratings,
        Self::Genres,
        Self::Keywords,
        Self::Languages,
        Self::Locations,
        Self::RunningTimes,
        Self::Technical,
        Self::Business,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ratings => "ratings",
            Self::Genres => "genres",
            Self::Keywords => "keywords",
            Self::Languages => "languages",
            Self::Locations => "locations",
            Self::RunningTimes => "running-times",
            Self::Technical => "technical",
            Self::Business => "business",
        }
    }

    /// The catalog entry for this list.
    pub fn spec(&self) -> &'static FormatSpec {
        match self {
            Self::Ratings => &RATINGS,
            Self::Genres => &GENRES,
            Self::Keywords => &KEYWORDS,
            Self::Languages => &LANGUAGES,
            Self::Locations => &LOCATIONS,
            Self::RunningTimes => &RUNNING_TIMES,
            Self::Technical => &TECHNICAL,
            Self::Business => &BUSINESS,
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseError::UnknownFormat { name: s.to_string() })
    }
}

/// How data lines carry their entity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Every data line starts with (or, for ratings, ends with) its key.
    /// The section ends at a dash rule or end of input.
    Inline,
    /// A `MV: <key>` header opens a block of `TAG: value` lines; a dash rule
    /// closes the block and the section ends at end of input.
    Block,
}

/// Immutable per-list configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub kind: FormatKind,
    /// Substring of the line announcing the data section.
    pub marker: &'static str,
    /// Lines discarded right after the marker line.
    pub skip: usize,
    pub layout: Layout,
    /// Conventional file name of the dump.
    pub file_name: &'static str,
}

/// Separator rule terminating sections (inline) and blocks (business).
pub const DASH_RULE: &str = "----------";

/// Sub-key tags of the technical list, in slot order.
pub const TECHNICAL_TAGS: [&str; 7] = ["CAM", "MET", "OFM", "PFM", "RAT", "PCS", "LAB"];

/// Sub-key tags of the business list, in slot order.
pub const BUSINESS_TAGS: [&str; 10] = ["BT", "GR", "OW", "RT", "AD", "SD", "PD", "ST", "CP", "WG"];

pub static RATINGS: FormatSpec = FormatSpec {
    kind: FormatKind::Ratings,
    marker: "MOVIE RATINGS REPORT",
    skip: 2,
    layout: Layout::Inline,
    file_name: "ratings.list",
};

pub static GENRES: FormatSpec = FormatSpec {
    kind: FormatKind::Genres,
    marker: "THE GENRES LIST",
    skip: 2,
    layout: Layout::Inline,
    file_name: "genres.list",
};

pub static KEYWORDS: FormatSpec = FormatSpec {
    kind: FormatKind::Keywords,
    marker: "THE KEYWORDS LIST",
    skip: 2,
    layout: Layout::Inline,
    file_name: "keywords.list",
};

pub static LANGUAGES: FormatSpec = FormatSpec {
    kind: FormatKind::Languages,
    marker: "LANGUAGE LIST",
    skip: 1,
    layout: Layout::Inline,
    file_name: "language.list",
};

pub static LOCATIONS: FormatSpec = FormatSpec {
    kind: FormatKind::Locations,
    marker: "LOCATIONS LIST",
    skip: 1,
    layout: Layout::Inline,
    file_name: "locations.list",
};

pub static RUNNING_TIMES: FormatSpec = FormatSpec {
    kind: FormatKind::RunningTimes,
    marker: "RUNNING TIMES LIST",
    skip: 1,
    layout: Layout::Inline,
    file_name: "running-times.list",
};

pub static TECHNICAL: FormatSpec = FormatSpec {
    kind: FormatKind::Technical,
    marker: "TECHNICAL LIST",
    skip: 3,
    layout: Layout::Inline,
    file_name: "technical.list",
};

pub static BUSINESS: FormatSpec = FormatSpec {
    kind: FormatKind::Business,
    marker: "BUSINESS LIST",
    skip: 2,
    layout: Layout::Block,
    file_name: "business.list",
};

//! Entity identity shared by every list.
//!
//! A key is the title plus the parenthesised qualifiers that follow it in
//! the dumps: `Title (1999/II) {Episode} (TV)`. Two records describe the
//! same entity iff all five parts are equal.

use std::fmt;
use std::str::FromStr;

use cinedump_core::errors::ParseError;
use serde::{Deserialize, Serialize};

/// Release year. The dumps write `????` when the year is not known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReleaseYear {
    Unknown,
    Known(u16),
}

impl ReleaseYear {
    /// Decode the 4-character year token. Only `????` or four ASCII digits.
    pub fn parse_token(token: &str) -> Option<Self> {
        if token == "????" {
            return Some(Self::Unknown);
        }
        if token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()) {
            return token.parse().ok().map(Self::Known);
        }
        None
    }

    pub fn known(&self) -> Option<u16> {
        match self {
            Self::Known(y) => Some(*y),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for ReleaseYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(y) => write!(f, "{y:04}"),
            Self::Unknown => f.write_str("????"),
        }
    }
}

/// Release type tag: `(VG)`, `(TV)` or `(V)` after the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReleaseType {
    VideoGame,
    Tv,
    Video,
}

impl ReleaseType {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::VideoGame => "VG",
            Self::Tv => "TV",
            Self::Video => "V",
        }
    }
}

impl FromStr for ReleaseType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VG" => Ok(Self::VideoGame),
            "TV" => Ok(Self::Tv),
            "V" => Ok(Self::Video),
            _ => Err(()),
        }
    }
}

/// Identity of one catalog entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    title: String,
    year: ReleaseYear,
    disambiguation: Option<String>,
    episode: Option<String>,
    release_type: Option<ReleaseType>,
}

impl EntityKey {
    pub fn new(title: impl Into<String>, year: ReleaseYear) -> Self {
        Self {
            title: title.into(),
            year,
            disambiguation: None,
            episode: None,
            release_type: None,
        }
    }

    /// Roman-numeral counter separating equally named titles of one year.
    pub fn with_disambiguation(mut self, counter: impl Into<String>) -> Self {
        self.disambiguation = Some(counter.into());
        self
    }

    pub fn with_episode(mut self, episode: impl Into<String>) -> Self {
        self.episode = Some(episode.into());
        self
    }

    pub fn with_release_type(mut self, release_type: ReleaseType) -> Self {
        self.release_type = Some(release_type);
        self
    }

    /// Build a key from the five leading capture fields of a line.
    pub(crate) fn from_fields(fields: &KeyFields, line_no: usize) -> Result<Self, ParseError> {
        let year = ReleaseYear::parse_token(&fields.year).ok_or_else(|| ParseError::InvalidField {
            field: "year",
            value: fields.year.clone(),
            line_no,
        })?;
        let release_type = match fields.release_type.as_deref() {
            Some(tag) => Some(tag.parse::<ReleaseType>().map_err(|_| ParseError::InvalidField {
                field: "release type",
                value: tag.to_string(),
                line_no,
            })?),
            None => None,
        };
        Ok(Self {
            title: fields.title.clone(),
            year,
            disambiguation: fields.disambiguation.clone(),
            episode: fields.episode.clone(),
            release_type,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> ReleaseYear {
        self.year
    }

    pub fn disambiguation(&self) -> Option<&str> {
        self.disambiguation.as_deref()
    }

    pub fn episode(&self) -> Option<&str> {
        self.episode.as_deref()
    }

    pub fn release_type(&self) -> Option<ReleaseType> {
        self.release_type
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.title, self.year)?;
        if let Some(ref counter) = self.disambiguation {
            write!(f, "/{counter}")?;
        }
        f.write_str(")")?;
        if let Some(ref episode) = self.episode {
            write!(f, " {{{episode}}}")?;
        }
        if let Some(kind) = self.release_type {
            write!(f, " ({})", kind.tag())?;
        }
        Ok(())
    }
}

/// Raw key captures of one line, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFields {
    pub title: String,
    pub year: String,
    pub disambiguation: Option<String>,
    pub episode: Option<String>,
    pub release_type: Option<String>,
}

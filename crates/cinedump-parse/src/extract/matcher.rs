//! Per-format line grammars.
//!
//! Every grammar is anchored at both ends and built around the shared key
//! grammar `Title (YEAR[/ROMAN]) [{Episode}] [{{SUSPENDED}}] [(VG|TV|V)]`.
//! A line either matches completely or not at all.

use std::sync::LazyLock;

use cinedump_core::types::collections::SmallVec2;
use regex::{Captures, Regex};

use crate::catalog::FormatKind;
use crate::key::KeyFields;

/// Shared key grammar. The title is the shortest text that is followed by a
/// parenthesised year; a suspended marker may sit before or after the tag.
/// Digits are ASCII `[0-9]` throughout.
macro_rules! key_grammar {
    () => {
        concat!(
            r"(?P<title>.+?)\s\((?P<year>[0-9]{4}|\?{4})(?:/(?P<counter>[IVXLCDM]+))?\)",
            r"(?:\s\{(?P<episode>[^{}]+)\})?",
            r"(?:\s\{\{SUSPENDED\}\})?",
            r"(?:\s\((?P<kind>VG|TV|V)\))?",
            r"(?:\s\{\{SUSPENDED\}\})?",
        )
    };
}

macro_rules! line_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── ratings: new-marker, distribution, votes, rating, then the key ────────
line_pattern!(
    RE_RATINGS,
    concat!(
        r"^\s*\*?\s*[*.0-9]{1,10}\s+(?P<votes>[0-9]+)\s+(?P<rating>[0-9]?[0-9]\.[0-9])\s+",
        key_grammar!(),
        r"\s*$"
    )
);

// ── genres / keywords: free text ─────────────────────────────────────────
line_pattern!(
    RE_FREE_TEXT,
    concat!("^", key_grammar!(), r"\s+(?P<value>\S.*?)\s*$")
);

// ── languages: name, optional parenthesised note ─────────────────────────
line_pattern!(
    RE_LANGUAGE,
    concat!(
        "^",
        key_grammar!(),
        r"\s+(?P<value>[^\t(]*[^\s(])(?:\s+\(.*\))?\s*$"
    )
);

// ── locations: place, optional tab-separated scene note ──────────────────
line_pattern!(
    RE_LOCATION,
    concat!("^", key_grammar!(), r"\s+(?P<value>[^\t]*\S)(?:\t+\(.*\))?\s*$")
);

// ── running times: optional `Country:` prefix, minutes, optional note ────
line_pattern!(
    RE_RUNNING_TIME,
    concat!(
        "^",
        key_grammar!(),
        r"\s+(?:[^:\t]+:)?(?P<value>[0-9]+)(?:\s+\(.*\))?\s*$"
    )
);

// ── technical: `TAG:value`, trailing spaces stripped ─────────────────────
line_pattern!(
    RE_TECHNICAL,
    concat!("^", key_grammar!(), r"\s+(?P<tag>[A-Z]+):\s*(?P<value>\S.*?)\s*$")
);

// ── business: `MV: <key>` header and `TAG: value` lines ──────────────────
line_pattern!(RE_BUSINESS_HEADER, concat!(r"^MV:\s+", key_grammar!(), r"\s*$"));

line_pattern!(RE_BUSINESS_DATA, r"^(?P<tag>[A-Z]+):\s*(?P<value>.*?)\s*$");

/// Captures of one matching line: the key (absent for block data lines)
/// followed by the format's trailing values in grammar order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFields {
    pub key: Option<KeyFields>,
    pub values: SmallVec2<String>,
}

/// Applies one format's grammar to single lines.
#[derive(Clone, Copy)]
pub struct LineMatcher {
    regex: &'static LazyLock<Option<Regex>>,
    keyed: bool,
    value_groups: &'static [&'static str],
}

impl LineMatcher {
    /// The data-line matcher of a format. For business this is the matcher
    /// of the `TAG: value` lines inside a block.
    pub fn for_format(kind: FormatKind) -> Self {
        match kind {
            FormatKind::Ratings => Self::keyed(&RE_RATINGS, &["votes", "rating"]),
            FormatKind::Genres | FormatKind::Keywords => Self::keyed(&RE_FREE_TEXT, &["value"]),
            FormatKind::Languages => Self::keyed(&RE_LANGUAGE, &["value"]),
            FormatKind::Locations => Self::keyed(&RE_LOCATION, &["value"]),
            FormatKind::RunningTimes => Self::keyed(&RE_RUNNING_TIME, &["value"]),
            FormatKind::Technical => Self::keyed(&RE_TECHNICAL, &["tag", "value"]),
            FormatKind::Business => Self {
                regex: &RE_BUSINESS_DATA,
                keyed: false,
                value_groups: &["tag", "value"],
            },
        }
    }

    /// Matcher for the `MV: <key>` line opening a business block.
    pub fn block_header() -> Self {
        Self::keyed(&RE_BUSINESS_HEADER, &[])
    }

    fn keyed(
        regex: &'static LazyLock<Option<Regex>>,
        value_groups: &'static [&'static str],
    ) -> Self {
        Self {
            regex,
            keyed: true,
            value_groups,
        }
    }

    /// Match `line` against the grammar. `None` on any deviation.
    pub fn match_line(&self, line: &str) -> Option<LineFields> {
        let regex = self.regex.as_ref()?;
        let caps = regex.captures(line)?;

        let key = if self.keyed {
            Some(key_fields(&caps)?)
        } else {
            None
        };

        let mut values = SmallVec2::new();
        for group in self.value_groups {
            values.push(caps.name(group)?.as_str().to_string());
        }

        Some(LineFields { key, values })
    }

    /// True when the grammar compiled. Only false if a pattern is broken.
    pub fn is_ready(&self) -> bool {
        self.regex.is_some()
    }
}

fn key_fields(caps: &Captures<'_>) -> Option<KeyFields> {
    let owned = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
    Some(KeyFields {
        title: owned("title")?,
        year: owned("year")?,
        disambiguation: owned("counter"),
        episode: owned("episode"),
        release_type: owned("kind"),
    })
}

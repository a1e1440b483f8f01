//! Record extraction: one pass over a section, one outcome per line.

use std::io::BufRead;

use cinedump_core::errors::ParseError;
use cinedump_core::types::collections::SmallVec2;
use tracing::debug;

use super::matcher::LineMatcher;
use super::scanner::{self, LineSource};
use crate::catalog::{FormatSpec, Layout};
use crate::key::KeyFields;

/// The fields of one data line: its key captures and trailing values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub line_no: usize,
    pub key: KeyFields,
    pub values: SmallVec2<String>,
}

/// What a single line means for the extraction.
#[derive(Debug)]
pub enum LineOutcome {
    Matched(RawMatch),
    /// Structural line with no data (block header, blank, block rule).
    Skip,
    SectionEnded,
    Fatal(ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractState {
    InSection,
    Done,
    Failed,
}

/// Lazy, forward-only sequence of raw matches from one section.
///
/// Created by [`Extractor::open`], which scans to the section start. After
/// the section ends or a line fails, the iterator yields nothing more.
pub struct Extractor<R> {
    source: LineSource<R>,
    spec: &'static FormatSpec,
    matcher: LineMatcher,
    header: LineMatcher,
    open_block: Option<KeyFields>,
    state: ExtractState,
    matched: usize,
}

impl<R: BufRead> Extractor<R> {
    /// Scan `reader` to the section described by `spec`.
    ///
    /// Fails with `SectionNotFound` if the marker never appears.
    pub fn open(reader: R, spec: &'static FormatSpec) -> Result<Self, ParseError> {
        let mut source = LineSource::new(reader);
        scanner::seek_section(&mut source, spec)?;
        Ok(Self {
            source,
            spec,
            matcher: LineMatcher::for_format(spec.kind),
            header: LineMatcher::block_header(),
            open_block: None,
            state: ExtractState::InSection,
            matched: 0,
        })
    }

    pub fn spec(&self) -> &'static FormatSpec {
        self.spec
    }

    /// Number of the last line read.
    pub fn line_no(&self) -> usize {
        self.source.line_no()
    }

    /// Classify the next line.
    pub fn step(&mut self) -> LineOutcome {
        let line = match self.source.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => return LineOutcome::SectionEnded,
            Err(e) => return LineOutcome::Fatal(e),
        };
        let line_no = self.source.line_no();

        match self.spec.layout {
            Layout::Inline => self.step_inline(line, line_no),
            Layout::Block => self.step_block(line, line_no),
        }
    }

    fn step_inline(&mut self, line: String, line_no: usize) -> LineOutcome {
        if let Some(fields) = self.matcher.match_line(&line) {
            if let Some(key) = fields.key {
                return LineOutcome::Matched(RawMatch {
                    line_no,
                    key,
                    values: fields.values,
                });
            }
        }
        match scanner::check_boundary(&mut self.source, &line) {
            Ok(()) => LineOutcome::SectionEnded,
            Err(e) => LineOutcome::Fatal(e),
        }
    }

    fn step_block(&mut self, line: String, line_no: usize) -> LineOutcome {
        if let Some(fields) = self.header.match_line(&line) {
            self.open_block = fields.key;
            return LineOutcome::Skip;
        }
        if scanner::is_terminator(&line) {
            self.open_block = None;
            return LineOutcome::Skip;
        }
        if scanner::is_blank(&line) {
            return LineOutcome::Skip;
        }
        match (self.matcher.match_line(&line), &self.open_block) {
            (Some(fields), Some(key)) => LineOutcome::Matched(RawMatch {
                line_no,
                key: key.clone(),
                values: fields.values,
            }),
            _ => LineOutcome::Fatal(ParseError::MalformedLine { line_no, line }),
        }
    }
}

impl<R: BufRead> Iterator for Extractor<R> {
    type Item = Result<RawMatch, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.state == ExtractState::InSection {
            match self.step() {
                LineOutcome::Matched(raw) => {
                    self.matched += 1;
                    return Some(Ok(raw));
                }
                LineOutcome::Skip => {}
                LineOutcome::SectionEnded => {
                    self.state = ExtractState::Done;
                    debug!(
                        format = %self.spec.kind,
                        line = self.source.line_no(),
                        matched = self.matched,
                        "reached end of section"
                    );
                }
                LineOutcome::Fatal(e) => {
                    self.state = ExtractState::Failed;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BUSINESS, GENRES};

    #[test]
    fn test_inline_section_to_dash_rule() {
        let text = "THE GENRES LIST\n===\n\nHeat (1995)\tCrime\nHeat (1995)\tDrama\n\n------------------\nJunk after\n";
        let ex = Extractor::open(text.as_bytes(), &GENRES).unwrap();
        let raws: Vec<_> = ex.collect::<Result<_, _>>().unwrap();
        assert_eq!(raws.len(), 2);
        assert_eq!(raws[0].line_no, 4);
        assert_eq!(raws[1].values[0], "Drama");
    }

    #[test]
    fn test_fatal_line_fuses_iterator() {
        let text = "THE GENRES LIST\n===\n\nHeat (1995)\tCrime\nbroken line\nHeat (1995)\tDrama\n";
        let mut ex = Extractor::open(text.as_bytes(), &GENRES).unwrap();
        assert!(ex.next().unwrap().is_ok());
        match ex.next() {
            Some(Err(ParseError::MalformedLine { line_no, line })) => {
                assert_eq!(line_no, 5);
                assert_eq!(line, "broken line");
            }
            other => panic!("expected MalformedLine, got {other:?}"),
        }
        assert!(ex.next().is_none());
    }

    #[test]
    fn test_block_layout_carries_header_key() {
        let text = "BUSINESS LIST\n=============\n\n\
            -------------------------------------------------------------------------------\n\
            MV: Heat (1995)\n\nBT: USD 60,000,000\nGR: USD 67,436,818 (USA)\n\n\
            -------------------------------------------------------------------------------\n\
            MV: Ronin (1998)\n\nBT: USD 55,000,000\n";
        let ex = Extractor::open(text.as_bytes(), &BUSINESS).unwrap();
        let raws: Vec<_> = ex.collect::<Result<_, _>>().unwrap();
        assert_eq!(raws.len(), 3);
        assert_eq!(raws[0].key.title, "Heat");
        assert_eq!(raws[1].values[0], "GR");
        assert_eq!(raws[2].key.title, "Ronin");
    }

    #[test]
    fn test_block_data_without_header_is_malformed() {
        let text = "BUSINESS LIST\n=====\n\n----------------------\nBT: USD 1\n";
        let mut ex = Extractor::open(text.as_bytes(), &BUSINESS).unwrap();
        assert!(matches!(
            ex.next(),
            Some(Err(ParseError::MalformedLine { line_no: 5, .. }))
        ));
    }
}

//! Section scanning: locating the data section and its end.

use std::io::BufRead;

use cinedump_core::errors::ParseError;
use tracing::debug;

use crate::catalog::{FormatSpec, DASH_RULE};

/// Line reader with one line of look-ahead and 1-based line numbers.
///
/// Lines are read as bytes and decoded as UTF-8, falling back to Latin-1
/// for lines that are not valid UTF-8.
pub struct LineSource<R> {
    reader: R,
    line_no: usize,
    peeked: Option<Option<String>>,
    buf: Vec<u8>,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            peeked: None,
            buf: Vec::with_capacity(256),
        }
    }

    /// Number of the line most recently returned by `next_line`.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Next line without its terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<String>, ParseError> {
        let line = match self.peeked.take() {
            Some(line) => line,
            None => self.read_physical()?,
        };
        if line.is_some() {
            self.line_no += 1;
        }
        Ok(line)
    }

    /// Look at the next line without consuming it.
    pub fn peek_line(&mut self) -> Result<Option<&str>, ParseError> {
        if self.peeked.is_none() {
            let line = self.read_physical()?;
            self.peeked = Some(line);
        }
        Ok(self.peeked.as_ref().and_then(|l| l.as_deref()))
    }

    fn read_physical(&mut self) -> Result<Option<String>, ParseError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
            self.buf.pop();
        }
        Ok(Some(decode_line(&self.buf)))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Advance `source` past the marker line and the format's header lines.
///
/// Input that ends inside the header lines leaves an empty section.
pub fn seek_section<R: BufRead>(
    source: &mut LineSource<R>,
    spec: &FormatSpec,
) -> Result<(), ParseError> {
    loop {
        match source.next_line()? {
            Some(line) if line.contains(spec.marker) => break,
            Some(_) => {}
            None => {
                return Err(ParseError::SectionNotFound {
                    marker: spec.marker.to_string(),
                })
            }
        }
    }
    let marker_line = source.line_no();

    for _ in 0..spec.skip {
        if source.next_line()?.is_none() {
            break;
        }
    }

    debug!(
        format = %spec.kind,
        marker_line,
        first_data_line = source.line_no() + 1,
        "reached start of section"
    );
    Ok(())
}

pub fn is_terminator(line: &str) -> bool {
    line.starts_with(DASH_RULE)
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Decide what a non-matching line of an inline section means: `Ok(())`
/// when the section ends here, `MalformedLine` otherwise.
///
/// Blank lines end the section only when nothing but blank lines separates
/// them from a dash rule or the end of input.
pub fn check_boundary<R: BufRead>(
    source: &mut LineSource<R>,
    line: &str,
) -> Result<(), ParseError> {
    let line_no = source.line_no();
    if is_terminator(line) {
        return Ok(());
    }
    if !is_blank(line) {
        return Err(ParseError::MalformedLine {
            line_no,
            line: line.to_string(),
        });
    }

    loop {
        let (ends, blank) = match source.peek_line()? {
            None => (true, false),
            Some(next) => (is_terminator(next), is_blank(next)),
        };
        if ends {
            return Ok(());
        }
        if !blank {
            return Err(ParseError::MalformedLine {
                line_no,
                line: line.to_string(),
            });
        }
        source.next_line()?;
    }
}

//! Typed entry points, one per list.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use cinedump_core::errors::ParseError;
use tracing::debug;

use crate::aggregate::{
    Aggregator, AnyPayload, BusinessData, RatingPayload, Record, RecordPayload, Records,
    TechnicalSpecs,
};
use crate::catalog::{self, FormatKind, FormatSpec};
use crate::extract::Extractor;

/// Boxed record iterator with the payload shape erased.
pub type AnyRecords<'a> = Box<dyn Iterator<Item = Result<Record<AnyPayload>, ParseError>> + 'a>;

fn records<R, P>(reader: R, spec: &'static FormatSpec) -> Result<Records<R, P>, ParseError>
where
    R: BufRead,
    P: RecordPayload,
{
    Ok(Aggregator::new(Extractor::open(reader, spec)?))
}

pub fn read_ratings<R: BufRead>(reader: R) -> Result<Records<R, RatingPayload>, ParseError> {
    records(reader, &catalog::RATINGS)
}

pub fn read_genres<R: BufRead>(reader: R) -> Result<Records<R, Vec<String>>, ParseError> {
    records(reader, &catalog::GENRES)
}

pub fn read_keywords<R: BufRead>(reader: R) -> Result<Records<R, Vec<String>>, ParseError> {
    records(reader, &catalog::KEYWORDS)
}

pub fn read_languages<R: BufRead>(reader: R) -> Result<Records<R, Vec<String>>, ParseError> {
    records(reader, &catalog::LANGUAGES)
}

pub fn read_locations<R: BufRead>(reader: R) -> Result<Records<R, Vec<String>>, ParseError> {
    records(reader, &catalog::LOCATIONS)
}

/// Running times in minutes; country prefixes and notes are dropped.
pub fn read_running_times<R: BufRead>(reader: R) -> Result<Records<R, Vec<u32>>, ParseError> {
    records(reader, &catalog::RUNNING_TIMES)
}

pub fn read_technical<R: BufRead>(reader: R) -> Result<Records<R, TechnicalSpecs>, ParseError> {
    records(reader, &catalog::TECHNICAL)
}

pub fn read_business<R: BufRead>(reader: R) -> Result<Records<R, BusinessData>, ParseError> {
    records(reader, &catalog::BUSINESS)
}

fn erase<'a, R, P>(records: Records<R, P>) -> AnyRecords<'a>
where
    R: BufRead + 'a,
    P: RecordPayload + Into<AnyPayload> + 'a,
{
    Box::new(records.map(|r| r.map(Record::into_any)))
}

/// Read any list, with payloads wrapped in [`AnyPayload`].
pub fn read_any<'a, R: BufRead + 'a>(
    kind: FormatKind,
    reader: R,
) -> Result<AnyRecords<'a>, ParseError> {
    Ok(match kind {
        FormatKind::Ratings => erase(read_ratings(reader)?),
        FormatKind::Genres => erase(read_genres(reader)?),
        FormatKind::Keywords => erase(read_keywords(reader)?),
        FormatKind::Languages => erase(read_languages(reader)?),
        FormatKind::Locations => erase(read_locations(reader)?),
        FormatKind::RunningTimes => erase(read_running_times(reader)?),
        FormatKind::Technical => erase(read_technical(reader)?),
        FormatKind::Business => erase(read_business(reader)?),
    })
}

/// Open a dump file and read it as `kind`.
pub fn open_path(kind: FormatKind, path: &Path) -> Result<AnyRecords<'static>, ParseError> {
    debug!(format = %kind, path = %path.display(), "opening dump");
    let file = File::open(path)?;
    read_any(kind, BufReader::new(file))
}

/// Keep only ratings with at least `min_votes` votes.
pub fn restrict_votes<I>(
    records: I,
    min_votes: u32,
) -> impl Iterator<Item = Result<Record<RatingPayload>, ParseError>>
where
    I: Iterator<Item = Result<Record<RatingPayload>, ParseError>>,
{
    records.filter(move |r| match r {
        Ok(record) => record.payload.votes >= min_votes,
        Err(_) => true,
    })
}

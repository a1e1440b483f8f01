//! Command execution. Output goes to the given writer; logs go to stderr.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use cinedump_core::errors::{ParseError, PipelineError, StorageError};
use cinedump_core::CinedumpConfig;
use cinedump_parse::{
    combine as combine_eager, open_path, read_ratings, restrict_votes, AnyPayload, AnyRecords,
    CombinedRecord, FormatKind, Layout, Record, StreamingCombiner,
};
use cinedump_storage::ArchiveStore;
use tracing::{info, warn};

use crate::cli::{Cli, Commands};

type Collection = Vec<Record<AnyPayload>>;

/// Resolve configuration and run the selected command.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<(), PipelineError> {
    let config = CinedumpConfig::load(&cli.root, Some(&cli.overrides()))?;
    match cli.command {
        Commands::Formats => formats(out),
        Commands::Parse {
            format,
            file,
            limit,
            save,
            ..
        } => parse(&config, format, file, limit, save.as_deref(), out),
        Commands::Combine {
            formats,
            streaming,
            limit,
        } => combine(&config, &formats, streaming, limit, out),
        Commands::Load { name, limit } => load(&config, &name, limit, out),
    }
}

fn emit<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) -> Result<(), PipelineError> {
    writeln!(out, "{line}").map_err(|e| PipelineError::Parse(ParseError::Io(e)))
}

fn formats<W: Write>(out: &mut W) -> Result<(), PipelineError> {
    emit(
        out,
        format_args!("{:<14} {:<22} {:>4}  {:<7}{}", "FORMAT", "MARKER", "SKIP", "LAYOUT", "FILE"),
    )?;
    for kind in FormatKind::ALL {
        let spec = kind.spec();
        let layout = match spec.layout {
            Layout::Inline => "inline",
            Layout::Block => "block",
        };
        emit(
            out,
            format_args!(
                "{:<14} {:<22} {:>4}  {:<7}{}",
                kind.name(),
                spec.marker,
                spec.skip,
                layout,
                spec.file_name
            ),
        )?;
    }
    Ok(())
}

fn dump_path(config: &CinedumpConfig, kind: FormatKind) -> PathBuf {
    config.data.effective_dir().join(kind.spec().file_name)
}

/// Open a dump as `AnyPayload` records, applying the vote threshold to
/// ratings.
fn read_path(kind: FormatKind, path: &Path, min_votes: u32) -> Result<AnyRecords<'static>, ParseError> {
    if min_votes == 0 {
        return open_path(kind, path);
    }
    if kind != FormatKind::Ratings {
        warn!(format = %kind, min_votes, "vote threshold only applies to ratings");
        return open_path(kind, path);
    }
    let file = File::open(path)?;
    let records = restrict_votes(read_ratings(BufReader::new(file))?, min_votes);
    Ok(Box::new(records.map(|r| r.map(Record::into_any))))
}

fn parse<W: Write>(
    config: &CinedumpConfig,
    kind: FormatKind,
    file: Option<PathBuf>,
    limit: Option<usize>,
    save: Option<&str>,
    out: &mut W,
) -> Result<(), PipelineError> {
    let store = ArchiveStore::from_config(&config.storage);
    if let Some(name) = save {
        // fail before a long parse, not after
        if store.exists(name)? && !config.storage.effective_overwrite() {
            return Err(StorageError::FileAlreadyExists {
                path: store.path_of(name)?,
            }
            .into());
        }
    }

    let path = file.unwrap_or_else(|| dump_path(config, kind));
    let started = Instant::now();
    let limit = limit.unwrap_or(usize::MAX);

    let mut kept: Collection = Vec::new();
    let mut count = 0usize;
    for record in read_path(kind, &path, config.parse.effective_min_votes())? {
        let record = record?;
        if count < limit {
            emit(out, format_args!("{}\t{}", record.key, record.payload))?;
        }
        count += 1;
        if save.is_some() {
            kept.push(record);
        }
    }
    info!(
        format = %kind,
        records = count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "parsed dump"
    );

    if let Some(name) = save {
        store.save(name, &kept)?;
    }
    Ok(())
}

fn combine<W: Write>(
    config: &CinedumpConfig,
    kinds: &[FormatKind],
    streaming: bool,
    limit: Option<usize>,
    out: &mut W,
) -> Result<(), PipelineError> {
    let started = Instant::now();
    let min_votes = config.parse.effective_min_votes();

    let combined: Vec<CombinedRecord<AnyPayload>> = if streaming {
        let mut combiner = StreamingCombiner::new();
        for &kind in kinds {
            combiner.try_push(read_path(kind, &dump_path(config, kind), min_votes)?)?;
        }
        info!(peak = combiner.peak_len(), "streaming combine finished");
        combiner.finish()
    } else {
        let mut collections: Vec<Collection> = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            let records = read_path(kind, &dump_path(config, kind), min_votes)?;
            collections.push(records.collect::<Result<_, _>>()?);
        }
        combine_eager(&collections)
    };

    info!(
        formats = kinds.len(),
        records = combined.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "combined dumps"
    );
    for record in combined.iter().take(limit.unwrap_or(usize::MAX)) {
        let payloads: Vec<String> = record.payloads.iter().map(ToString::to_string).collect();
        emit(out, format_args!("{}\t{}", record.key, payloads.join(" || ")))?;
    }
    Ok(())
}

fn load<W: Write>(
    config: &CinedumpConfig,
    name: &str,
    limit: Option<usize>,
    out: &mut W,
) -> Result<(), PipelineError> {
    let store = ArchiveStore::from_config(&config.storage);
    let records: Collection = store.load(name)?;
    info!(archive = name, records = records.len(), "loaded collection");
    for record in records.iter().take(limit.unwrap_or(usize::MAX)) {
        emit(out, format_args!("{}\t{}", record.key, record.payload))?;
    }
    Ok(())
}

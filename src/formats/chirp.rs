//! CHIRP CSV export parser
//!
//! CHIRP exports memories as comma separated values with no quoting, CR/LF
//! line endings, one header line, and one row per programmed memory. Columns
//! are positional:
//!
//! `Location,Name,Frequency,Duplex,Offset,Tone,rToneFreq,cToneFreq,DtcsCode,
//! DtcsPolarity,RxDtcsCode,CrossMode,Mode,TStep,Skip,Power,Comment,...`

use crate::core::constants::{MAX_FREQUENCY, NAME16_LEN, NAME6_LEN, NAME8_LEN};
use crate::core::{Memory, MemoryError, Mode};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

const COL_LOCATION: usize = 0;
const COL_NAME: usize = 1;
const COL_FREQUENCY: usize = 2;
const COL_DUPLEX: usize = 3;
const COL_OFFSET: usize = 4;
const COL_TONE: usize = 5;
const COL_RTONE_FREQ: usize = 6;
const COL_DTCS_CODE: usize = 8;
const COL_MODE: usize = 12;
const COL_COMMENT: usize = 16;

/// Fewest fields a data row may have (through the Mode column)
pub const MIN_COLUMNS: usize = COL_MODE + 1;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty CSV file, expected a header line")]
    Empty,

    #[error("Line {line}: expected at least {} columns, found {found}", MIN_COLUMNS)]
    MissingColumns { line: usize, found: usize },

    #[error("Line {line}: invalid location number '{value}'")]
    InvalidNumber { line: usize, value: String },

    #[error("Line {line}: invalid frequency '{value}'")]
    InvalidFrequency { line: usize, value: String },

    #[error("Line {line}: invalid offset '{value}'")]
    InvalidOffset { line: usize, value: String },

    #[error("Line {line}: invalid CTCSS tone '{value}'")]
    InvalidTone { line: usize, value: String },

    #[error("Line {line}: invalid DCS code '{value}'")]
    InvalidDcs { line: usize, value: String },

    #[error("Unknown Mode '{value}' on line {line}")]
    UnknownMode { line: usize, value: String },
}

impl ParseError {
    /// Input line the error was raised on, if it belongs to one
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Io(_) | ParseError::Empty => None,
            ParseError::MissingColumns { line, .. }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::InvalidFrequency { line, .. }
            | ParseError::InvalidOffset { line, .. }
            | ParseError::InvalidTone { line, .. }
            | ParseError::InvalidDcs { line, .. }
            | ParseError::UnknownMode { line, .. } => Some(*line),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Import memories from a CHIRP CSV file
pub fn import_chirp_csv(filename: impl AsRef<Path>) -> Result<Vec<Memory>> {
    let file = File::open(filename)?;
    parse_chirp_csv(BufReader::new(file))
}

/// Parse a CHIRP CSV stream into memories, in row order.
///
/// The first line is the header and is discarded. Any bad row aborts the
/// whole parse.
pub fn parse_chirp_csv<R: BufRead>(reader: R) -> Result<Vec<Memory>> {
    let mut memories = Vec::new();
    let mut lines = reader.lines();

    // Discard the header line
    lines.next().ok_or(ParseError::Empty)??;

    for (idx, line_result) in lines.enumerate() {
        let line_num = idx + 2;
        let line = line_result?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let mem = parse_row(line, line_num)?;
        tracing::debug!("Line {}: {}", line_num, mem);
        memories.push(mem);
    }

    tracing::info!("Parsed {} memories from CHIRP CSV", memories.len());
    Ok(memories)
}

/// Parse a single data row into a Memory
fn parse_row(line: &str, line_num: usize) -> Result<Memory> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < MIN_COLUMNS {
        return Err(ParseError::MissingColumns {
            line: line_num,
            found: fields.len(),
        });
    }

    let number = parse_number(fields[COL_LOCATION], line_num)?;
    let mut mem = Memory::new(number);

    mem.frequency = parse_frequency(fields[COL_FREQUENCY], line_num)?;
    mem.mode = parse_mode(fields[COL_MODE], line_num)?;
    mem.offset = parse_offset(fields[COL_DUPLEX], fields[COL_OFFSET], line_num)?;

    match fields[COL_TONE] {
        "Tone" => mem.tx_ctcss_freq = Some(parse_ctcss(fields[COL_RTONE_FREQ], line_num)?),
        "DTCS" => mem.tx_dcs_code = Some(parse_dcs(fields[COL_DTCS_CODE], line_num)?),
        _ => {}
    }

    let name = fields[COL_NAME];
    if !name.is_empty() {
        mem.name16 = Some(truncate(name, NAME16_LEN));
        mem.name8 = Some(truncate(name, NAME8_LEN));
        mem.name6 = Some(truncate(name, NAME6_LEN));
    }

    if let Some(comment) = fields.get(COL_COMMENT).filter(|c| !c.is_empty()) {
        mem.description = Some(comment.to_string());
    }

    Ok(mem)
}

fn parse_number(value: &str, line_num: usize) -> Result<u32> {
    value.trim().parse().map_err(|_| ParseError::InvalidNumber {
        line: line_num,
        value: value.to_string(),
    })
}

/// Convert a decimal MHz string to whole Hz, rounding to the nearest Hz.
/// Values above [`MAX_FREQUENCY`] are rejected.
fn mhz_to_hz(value: &str) -> Option<u64> {
    let mhz: f64 = value.trim().parse().ok()?;
    let hz = (mhz * 1_000_000.0).round();
    if !hz.is_finite() || hz < 0.0 || hz > MAX_FREQUENCY as f64 {
        return None;
    }
    Some(hz as u64)
}

/// Parse frequency from a MHz string; blank means an unused slot
fn parse_frequency(value: &str, line_num: usize) -> Result<Option<u64>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    mhz_to_hz(value)
        .map(Some)
        .ok_or_else(|| ParseError::InvalidFrequency {
            line: line_num,
            value: value.to_string(),
        })
}

/// Build a signed offset from the duplex direction and the magnitude.
///
/// The sign comes from the direction token only. Any direction other than
/// `+` or `-` (blank, `split`, `off`) is simplex.
fn parse_offset(direction: &str, value: &str, line_num: usize) -> Result<i64> {
    let sign = match direction {
        "+" => 1,
        "-" => -1,
        _ => return Ok(0),
    };
    if value.trim().is_empty() {
        return Ok(0);
    }

    let hz = mhz_to_hz(value).ok_or_else(|| ParseError::InvalidOffset {
        line: line_num,
        value: value.to_string(),
    })?;
    i64::try_from(hz)
        .map(|hz| sign * hz)
        .map_err(|_| ParseError::InvalidOffset {
            line: line_num,
            value: value.to_string(),
        })
}

fn parse_mode(value: &str, line_num: usize) -> Result<Mode> {
    value.parse().map_err(|_: MemoryError| ParseError::UnknownMode {
        line: line_num,
        value: value.to_string(),
    })
}

fn parse_ctcss(value: &str, line_num: usize) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|tone| tone.is_finite() && *tone > 0.0)
        .ok_or_else(|| ParseError::InvalidTone {
            line: line_num,
            value: value.to_string(),
        })
}

fn parse_dcs(value: &str, line_num: usize) -> Result<u16> {
    value.trim().parse().map_err(|_| ParseError::InvalidDcs {
        line: line_num,
        value: value.to_string(),
    })
}

fn truncate(name: &str, len: usize) -> String {
    name.chars().take(len).collect()
}

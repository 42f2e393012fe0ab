//! ADMS-16 import file renderer
//!
//! ADMS-16 is Yaesu's programming software for the FTM-500DR/DE. It imports
//! a CSV file with these characteristics:
//!   * comma separated values, no quotes on values
//!   * LF line endings
//!   * no header line
//!   * exactly 999 rows, numbered 1 to 999. Unused channels still need a row
//!     or ADMS-16 refuses the file
//!   * channel 1 must not be empty

use crate::core::constants::{CALL_FREQUENCY, DEFAULT_CTCSS_TONE, DEFAULT_DCS_CODE};
use crate::core::{standard_offset, Band, Memory};
use std::cmp::Ordering;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Number of memory channels in the radio, and rows in the file
pub const CHANNEL_COUNT: u32 = 999;

/// Fields per row
pub const FIELD_COUNT: usize = 21;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Memory '{0}' does not have a frequency")]
    EmptyMemory(u32),

    #[error("Memory '{number}' has a frequency of {frequency} Hz and offset of {offset} Hz that cannot be rendered")]
    FrequencyOutOfRange {
        number: u32,
        frequency: u64,
        offset: i64,
    },

    #[error("Memory '{0}' is outside channels 1 to {CHANNEL_COUNT}", CHANNEL_COUNT = CHANNEL_COUNT)]
    SlotOutOfRange(u32),

    #[error("Memory '{number}' follows memory '{previous}', memories must be in increasing order with unique numbers")]
    Unordered { previous: u32, number: u32 },
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Render memories to an ADMS-16 file.
///
/// The whole file is rendered before it is created, so a memory that fails
/// to render leaves nothing behind.
pub fn export_adms16(filename: impl AsRef<Path>, memories: &[Memory]) -> Result<()> {
    let contents = render_adms16(memories)?;
    let mut file = File::create(filename)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Render memories and write them to `out` in one piece
pub fn write_adms16<W: Write>(memories: &[Memory], mut out: W) -> Result<()> {
    let contents = render_adms16(memories)?;
    out.write_all(contents.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Render memories to the full text of an ADMS-16 file
pub fn render_adms16(memories: &[Memory]) -> Result<String> {
    let lines = render_lines(memories)?;
    let mut contents = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        contents.push_str(&line);
        contents.push('\n');
    }
    Ok(contents)
}

/// Render one line per channel, 1 through [`CHANNEL_COUNT`].
///
/// `memories` must be in strictly increasing order of channel number, all
/// within 1..=[`CHANNEL_COUNT`]. Memories without a frequency render as
/// unused channels.
pub fn render_lines(memories: &[Memory]) -> Result<Vec<String>> {
    check_order(memories)?;

    let mut lines = Vec::with_capacity(CHANNEL_COUNT as usize);
    let mut cursor = memories.iter().filter(|m| !m.is_empty()).peekable();

    for number in 1..=CHANNEL_COUNT {
        match cursor.next_if(|m| m.number == number) {
            Some(mem) => lines.push(render_memory(mem)?),
            // ADMS-16 won't import a file without a memory on channel 1
            None if number == 1 => {
                tracing::debug!("No memory on channel 1, using the call frequency");
                lines.push(render_memory(&Memory::simplex(1, CALL_FREQUENCY))?);
            }
            None => lines.push(render_empty_slot(number)),
        }
    }

    Ok(lines)
}

fn check_order(memories: &[Memory]) -> Result<()> {
    let mut previous: Option<u32> = None;
    for mem in memories {
        if mem.number == 0 || mem.number > CHANNEL_COUNT {
            return Err(RenderError::SlotOutOfRange(mem.number));
        }
        if let Some(prev) = previous {
            if mem.number <= prev {
                return Err(RenderError::Unordered {
                    previous: prev,
                    number: mem.number,
                });
            }
        }
        previous = Some(mem.number);
    }
    Ok(())
}

/// Row for a channel with nothing programmed
pub fn render_empty_slot(number: u32) -> String {
    format!("{}{}0", number, ",".repeat(FIELD_COUNT - 1))
}

/// Render one memory as a single row, without the line ending
pub fn render_memory(memory: &Memory) -> Result<String> {
    let freq = memory
        .frequency
        .ok_or(RenderError::EmptyMemory(memory.number))?;
    let band = memory.band().unwrap_or(Band::Unknown);
    let out_of_range = || RenderError::FrequencyOutOfRange {
        number: memory.number,
        frequency: freq,
        offset: memory.offset,
    };
    let rx_freq = i64::try_from(freq).map_err(|_| out_of_range())?;
    let tx_freq = rx_freq
        .checked_add(memory.offset)
        .filter(|tx| *tx >= 0)
        .ok_or_else(out_of_range)?;

    let mut out: Vec<String> = Vec::with_capacity(FIELD_COUNT);

    // column 1: memory number
    out.push(memory.number.to_string());

    // column 2: rx frequency
    out.push(render_frequency_as_mhz(rx_freq));

    // columns 3, 4, 5: tx frequency, offset, offset direction
    out.push(render_frequency_as_mhz(tx_freq));
    if memory.offset != 0 {
        out.push(render_offset_as_mhz(memory.offset));
    } else {
        // the format wants an offset even for simplex, so use the usual
        // repeater offset for this frequency
        out.push(render_offset_as_mhz(standard_offset(freq)));
    }
    out.push(render_offset_direction(memory.offset).to_string());

    // column 6: mode, narrow FM is carried by column 18
    out.push("FM".to_string());

    // column 7: digital/analog, AMS would enable automatic mode detection
    out.push("FM".to_string());

    // column 8: name
    out.push(memory.name16.clone().unwrap_or_default());

    // columns 9, 10, 11: tone type, ctcss freq, dcs code
    let (tone_type, ctcss_freq, dcs_code) = render_tone(memory);
    out.push(tone_type.to_string());
    out.push(ctcss_freq);
    out.push(dcs_code);

    // column 12: user CTCSS
    out.push("1500 Hz".to_string());

    // columns 13, 14: RX and TX DG-ID, which ADMS-16 only accepts as "-" on 1.25m
    let (rx_dgid, tx_dgid) = render_dg_id(band);
    out.push(rx_dgid.to_string());
    out.push(tx_dgid.to_string());

    // column 15: tx power
    out.push("HIGH".to_string());

    // column 16: scan
    out.push("YES".to_string());

    // column 17: step
    out.push(render_frequency_step(band.tuning_step()));

    // column 18: narrow
    out.push(if memory.mode.is_narrow() { "ON" } else { "OFF" }.to_string());

    // column 19: clock shift
    out.push("OFF".to_string());

    // column 20: comment
    out.push(String::new());

    // column 21: last
    out.push("0".to_string());

    Ok(out.join(","))
}

/// Render a frequency in Hz as MHz with five decimals
pub fn render_frequency_as_mhz(freq: i64) -> String {
    format!("{:.5}", freq as f64 / 1_000_000.0)
}

/// Render the magnitude of an offset in Hz as MHz with five decimals
pub fn render_offset_as_mhz(offset: i64) -> String {
    format!("{:.5}", offset.unsigned_abs() as f64 / 1_000_000.0)
}

pub fn render_offset_direction(offset: i64) -> &'static str {
    match offset.cmp(&0) {
        Ordering::Equal => "OFF",
        Ordering::Less => "-RPT",
        Ordering::Greater => "+RPT",
    }
}

/// Tone type, CTCSS frequency and DCS code columns.
///
/// A CTCSS tone wins over a DCS code, and DCS code 0 counts as no code.
/// The column that isn't in use still needs a value, so it gets the default.
pub fn render_tone(memory: &Memory) -> (&'static str, String, String) {
    match (memory.tx_ctcss_freq, memory.tx_dcs_code) {
        (Some(tone), _) => ("TONE", render_ctcss_freq(Some(tone)), render_dcs_code(None)),
        (None, Some(code)) if code != 0 => {
            ("DCS", render_ctcss_freq(None), render_dcs_code(Some(code)))
        }
        (None, _) => ("OFF", render_ctcss_freq(None), render_dcs_code(None)),
    }
}

pub fn render_ctcss_freq(tone: Option<f64>) -> String {
    format!("{:.1} Hz", tone.unwrap_or(DEFAULT_CTCSS_TONE))
}

pub fn render_dcs_code(code: Option<u16>) -> String {
    format!("{:03}", code.unwrap_or(DEFAULT_DCS_CODE))
}

/// RX and TX DG-ID columns for a band
pub fn render_dg_id(band: Band) -> (&'static str, &'static str) {
    match band {
        Band::Amateur125cm => ("-", "-"),
        _ => ("RX 00", "TX 00"),
    }
}

/// Render a step in Hz as KHz with one decimal
pub fn render_frequency_step(step: u32) -> String {
    format!("{:.1}KHz", step as f64 / 1_000.0)
}

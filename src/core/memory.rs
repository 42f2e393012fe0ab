// Memory structure representing a single radio memory channel

use super::band::{band_for, Band};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Invalid mode: {0}")]
    InvalidMode(String),
}

pub type Result<T> = std::result::Result<T, MemoryError>;

/// Operating modes supported by the interchange formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Fm,
    NarrowFm,
}

impl Mode {
    /// Every mode, in token lookup order
    pub const ALL: [Mode; 2] = [Mode::Fm, Mode::NarrowFm];

    /// Look up a mode by its exact external token
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.token() == token)
    }

    /// The external token for this mode
    pub fn token(&self) -> &'static str {
        match self {
            Mode::Fm => "FM",
            Mode::NarrowFm => "NFM",
        }
    }

    pub fn is_narrow(&self) -> bool {
        matches!(self, Mode::NarrowFm)
    }
}

impl std::str::FromStr for Mode {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s).ok_or_else(|| MemoryError::InvalidMode(s.to_string()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A single radio memory channel.
///
/// Set at most one of `tx_ctcss_freq` / `tx_dcs_code`, and at most one of
/// `rx_ctcss_freq` / `rx_dcs_code`. Nothing enforces this; see
/// [`crate::core::validation`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Memory {
    /// Memory channel number
    pub number: u32,

    /// Frequency in Hz, `None` for an unused slot
    pub frequency: Option<u64>,

    pub mode: Mode,

    /// Repeater offset in Hz. Positive transmits above the receive
    /// frequency, negative below, zero is simplex.
    pub offset: i64,

    /// Transmit CTCSS tone in Hz
    pub tx_ctcss_freq: Option<f64>,

    /// Receive CTCSS tone in Hz
    pub rx_ctcss_freq: Option<f64>,

    pub tx_dcs_code: Option<u16>,

    pub rx_dcs_code: Option<u16>,

    pub name6: Option<String>,
    pub name8: Option<String>,
    pub name16: Option<String>,

    pub description: Option<String>,
}

impl Memory {
    /// Create an unused memory slot
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Create a simplex FM memory on `frequency`
    pub fn simplex(number: u32, frequency: u64) -> Self {
        Self {
            number,
            frequency: Some(frequency),
            ..Default::default()
        }
    }

    /// True if this slot has no frequency programmed
    pub fn is_empty(&self) -> bool {
        self.frequency.is_none()
    }

    /// Band of the receive frequency, `None` for an empty memory
    pub fn band(&self) -> Option<Band> {
        self.frequency.map(band_for)
    }

    pub fn frequency_in_mhz(&self) -> Option<f64> {
        self.frequency.map(|f| f as f64 / 1_000_000.0)
    }

    pub fn tx_ctcss_freq_in_khz(&self) -> Option<f64> {
        self.tx_ctcss_freq.map(|f| f / 1_000.0)
    }

    pub fn rx_ctcss_freq_in_khz(&self) -> Option<f64> {
        self.rx_ctcss_freq.map(|f| f / 1_000.0)
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(freq) = self.frequency else {
            return write!(f, "Memory {}: <empty>", self.number);
        };
        let dup = match self.offset {
            0 => "/",
            o if o > 0 => "+",
            _ => "-",
        };

        write!(
            f,
            "Memory {}: {}.{:06}{}{} {} ({})",
            self.number,
            freq / 1_000_000,
            freq % 1_000_000,
            dup,
            self.offset.unsigned_abs(),
            self.mode,
            self.name16.as_deref().unwrap_or("")
        )?;
        if let Some(tone) = self.tx_ctcss_freq {
            write!(f, " t{:.1}", tone)?;
        }
        if let Some(code) = self.tx_dcs_code {
            write!(f, " d{:03}", code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_tokens() {
        assert_eq!(Mode::from_token("FM"), Some(Mode::Fm));
        assert_eq!(Mode::from_token("NFM"), Some(Mode::NarrowFm));
        assert_eq!(Mode::from_token("fm"), None);
        assert_eq!(Mode::from_token("AM"), None);
        assert_eq!(Mode::NarrowFm.token(), "NFM");
        assert!(Mode::NarrowFm.is_narrow());
        assert!(!Mode::Fm.is_narrow());
    }

    #[test]
    fn test_mode_tokens_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_token(mode.token()), Some(mode));
        }
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("NFM".parse::<Mode>().unwrap(), Mode::NarrowFm);
        assert!(matches!(
            "DV".parse::<Mode>(),
            Err(MemoryError::InvalidMode(ref m)) if m == "DV"
        ));
    }

    #[test]
    fn test_memory_creation() {
        let mem = Memory::new(7);
        assert_eq!(mem.number, 7);
        assert_eq!(mem.mode, Mode::Fm);
        assert_eq!(mem.offset, 0);
        assert!(mem.is_empty());
        assert_eq!(mem.band(), None);

        let call = Memory::simplex(1, 146_520_000);
        assert!(!call.is_empty());
        assert_eq!(call.band(), Some(Band::Amateur2m));
        assert_eq!(call.frequency_in_mhz(), Some(146.52));
    }

    #[test]
    fn test_tone_in_khz() {
        let mut mem = Memory::simplex(1, 146_520_000);
        assert_eq!(mem.tx_ctcss_freq_in_khz(), None);
        mem.tx_ctcss_freq = Some(100.0);
        assert_eq!(mem.tx_ctcss_freq_in_khz(), Some(0.1));
    }

    #[test]
    fn test_display() {
        let mut mem = Memory::simplex(3, 146_940_000);
        mem.offset = -600_000;
        mem.name16 = Some("REPEATER".to_string());
        mem.tx_ctcss_freq = Some(88.5);
        assert_eq!(
            mem.to_string(),
            "Memory 3: 146.940000-600000 FM (REPEATER) t88.5"
        );
        assert_eq!(Memory::new(4).to_string(), "Memory 4: <empty>");
    }

    #[test]
    fn test_serialization() {
        let mut mem = Memory::simplex(2, 446_000_000);
        mem.mode = Mode::NarrowFm;
        mem.tx_dcs_code = Some(23);

        let json = serde_json::to_string(&mem).unwrap();
        let back: Memory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mem);
    }
}

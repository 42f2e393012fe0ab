// Frequency bands and the per-band lookups the export formats need

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// A frequency band known to the toolkit.
///
/// Variants are declared in classification priority order; [`band_for`]
/// scans them in this order and the first band whose range contains the
/// frequency wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// 2m amateur radio band
    Amateur2m,
    /// 1.25m amateur radio band
    Amateur125cm,
    /// 70cm amateur radio band
    Amateur70cm,
    /// General Mobile Radio Service
    Gmrs,
    /// Multi-Use Radio Service
    Murs,
    /// NOAA weather radio broadcasts
    NoaaWeather,
    /// Anything not covered above
    Unknown,
}

/// Scan order for classification. `Unknown` is the fallback and is not listed.
const BAND_TABLE: [Band; 6] = [
    Band::Amateur2m,
    Band::Amateur125cm,
    Band::Amateur70cm,
    Band::Gmrs,
    Band::Murs,
    Band::NoaaWeather,
];

impl Band {
    /// Inclusive frequency range in Hz, `None` for `Unknown`
    pub fn range(&self) -> Option<RangeInclusive<u64>> {
        match self {
            Band::Amateur2m => Some(144_000_000..=148_000_000),
            Band::Amateur125cm => Some(222_000_000..=225_000_000),
            Band::Amateur70cm => Some(420_000_000..=450_000_000),
            Band::Gmrs => Some(462_550_000..=467_725_000),
            Band::Murs => Some(151_820_000..=154_600_000),
            Band::NoaaWeather => Some(162_400_000..=162_550_000),
            Band::Unknown => None,
        }
    }

    /// Tuning step in Hz
    pub fn tuning_step(&self) -> u32 {
        match self {
            Band::Amateur2m => 25_000,
            Band::Amateur125cm => 10_000,
            Band::Amateur70cm => 25_000,
            Band::Gmrs => 12_500,
            Band::Murs => 5_000,
            Band::NoaaWeather => 25_000,
            Band::Unknown => 5_000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Amateur2m => "2m",
            Band::Amateur125cm => "1.25m",
            Band::Amateur70cm => "70cm",
            Band::Gmrs => "GMRS",
            Band::Murs => "MURS",
            Band::NoaaWeather => "NOAA Weather",
            Band::Unknown => "Unknown",
        }
    }

    pub fn contains(&self, frequency: u64) -> bool {
        self.range().is_some_and(|r| r.contains(&frequency))
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a frequency in Hz
pub fn band_for(frequency: u64) -> Band {
    BAND_TABLE
        .iter()
        .copied()
        .find(|band| band.contains(frequency))
        .unwrap_or(Band::Unknown)
}

/// Tuning step in Hz for a band
pub fn tuning_step(band: Band) -> u32 {
    band.tuning_step()
}

/// Standard repeater offset in Hz for a frequency.
///
/// Formats that always need an offset use this for simplex channels. Ranges
/// are half-open; anything outside them gets the 2m offset.
pub fn standard_offset(frequency: u64) -> i64 {
    match frequency {
        144_000_000..=147_999_999 => 600_000,
        222_000_000..=224_999_999 => -1_600_000,
        440_000_000..=449_999_999 => 5_000_000,
        // UHF, GMRS repeaters live here
        450_000_000..=469_999_999 => 5_000_000,
        _ => 600_000,
    }
}

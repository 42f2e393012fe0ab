// Constants shared by the parser, renderer and validation - tones, DCS codes, defaults

/// 50 standard CTCSS tones (in Hz)
pub const CTCSS_TONES: [f64; 50] = [
    67.0, 69.3, 71.9, 74.4, 77.0, 79.7, 82.5, 85.4, 88.5, 91.5, 94.8, 97.4, 100.0, 103.5, 107.2,
    110.9, 114.8, 118.8, 123.0, 127.3, 131.8, 136.5, 141.3, 146.2, 151.4, 156.7, 159.8, 162.2,
    165.5, 167.9, 171.3, 173.8, 177.3, 179.9, 183.5, 186.2, 189.9, 192.8, 196.6, 199.5, 203.5,
    206.5, 210.7, 218.1, 225.7, 229.1, 233.6, 241.8, 250.3, 254.1,
];

/// 104 standard DCS codes
pub const DCS_CODES: [u16; 104] = [
    23, 25, 26, 31, 32, 36, 43, 47, 51, 53, 54, 65, 71, 72, 73, 74, 114, 115, 116, 122, 125, 131,
    132, 134, 143, 145, 152, 155, 156, 162, 165, 172, 174, 205, 212, 223, 225, 226, 243, 244, 245,
    246, 251, 252, 255, 261, 263, 265, 266, 271, 274, 306, 311, 315, 325, 331, 332, 343, 346, 351,
    356, 364, 365, 371, 411, 412, 413, 423, 431, 432, 445, 446, 452, 454, 455, 462, 464, 465, 466,
    503, 506, 516, 523, 526, 532, 546, 565, 606, 612, 624, 627, 631, 632, 654, 662, 664, 703, 712,
    723, 731, 732, 734, 743, 754,
];

/// CTCSS tone written when a memory has none
pub const DEFAULT_CTCSS_TONE: f64 = 100.0;

/// DCS code written when a memory has none
pub const DEFAULT_DCS_CODE: u16 = 23;

/// National 2m simplex calling frequency, used to fill channel 1
pub const CALL_FREQUENCY: u64 = 146_520_000;

/// Highest frequency (or offset) in Hz accepted from an import, 10 GHz
pub const MAX_FREQUENCY: u64 = 10_000_000_000;

/// Display name lengths used by radios that truncate names
pub const NAME6_LEN: usize = 6;
pub const NAME8_LEN: usize = 8;
pub const NAME16_LEN: usize = 16;

/// Check a tone against the standard CTCSS list
pub fn is_standard_tone(tone: f64) -> bool {
    CTCSS_TONES.iter().any(|t| (t - tone).abs() < 0.05)
}

/// Check a code against the standard DCS list
pub fn is_standard_dcs(code: u16) -> bool {
    DCS_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tones() {
        assert!(is_standard_tone(88.5));
        assert!(is_standard_tone(100.0));
        assert!(!is_standard_tone(88.6));
    }

    #[test]
    fn test_standard_dcs() {
        assert!(is_standard_dcs(23));
        assert!(is_standard_dcs(754));
        assert!(!is_standard_dcs(24));
    }
}

// Memory validation logic and helpers
//
// These checks are advisory. Renderers do not consult them, so a memory that
// produces warnings still exports exactly as it was parsed.

use super::band::Band;
use super::constants::{is_standard_dcs, is_standard_tone};
use super::memory::Memory;

/// Highest channel number any supported target format can hold
pub const MAX_CHANNEL: u32 = 999;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationMessage {
    Warning(String),
    Error(String),
}

impl ValidationMessage {
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationMessage::Error(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationMessage::Warning(_))
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationMessage::Warning(msg) | ValidationMessage::Error(msg) => msg,
        }
    }
}

/// Validate a memory and return messages
pub fn validate_memory(mem: &Memory) -> Vec<ValidationMessage> {
    let mut msgs = Vec::new();

    if mem.number == 0 || mem.number > MAX_CHANNEL {
        msgs.push(ValidationMessage::Error(format!(
            "Location {} is out of range",
            mem.number
        )));
    }

    if mem.tx_ctcss_freq.is_some() && mem.tx_dcs_code.is_some() {
        msgs.push(ValidationMessage::Warning(format!(
            "Memory {} has both a TX CTCSS tone and a TX DCS code",
            mem.number
        )));
    }
    if mem.rx_ctcss_freq.is_some() && mem.rx_dcs_code.is_some() {
        msgs.push(ValidationMessage::Warning(format!(
            "Memory {} has both an RX CTCSS tone and an RX DCS code",
            mem.number
        )));
    }

    for tone in [mem.tx_ctcss_freq, mem.rx_ctcss_freq].into_iter().flatten() {
        if !is_standard_tone(tone) {
            msgs.push(ValidationMessage::Warning(format!(
                "Memory {}: tone {:.1} is not a standard CTCSS tone",
                mem.number, tone
            )));
        }
    }

    for code in [mem.tx_dcs_code, mem.rx_dcs_code].into_iter().flatten() {
        if !is_standard_dcs(code) {
            msgs.push(ValidationMessage::Warning(format!(
                "Memory {}: DCS code {:03} is not a standard code",
                mem.number, code
            )));
        }
    }

    if mem.band() == Some(Band::Unknown) {
        msgs.push(ValidationMessage::Warning(format!(
            "Memory {}: frequency is outside every known band",
            mem.number
        )));
    }

    msgs
}

/// Check if validation messages contain any errors
pub fn has_errors(messages: &[ValidationMessage]) -> bool {
    messages.iter().any(|m| m.is_error())
}

/// Check if validation messages contain any warnings
pub fn has_warnings(messages: &[ValidationMessage]) -> bool {
    messages.iter().any(|m| m.is_warning())
}

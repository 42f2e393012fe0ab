// HRPT-RS: Ham Radio Programming Toolkit
// Translates CHIRP CSV exports into ADMS-16 import files

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    band::{band_for, standard_offset, tuning_step, Band},
    constants::*,
    memory::{Memory, Mode},
    validation,
};
pub use formats::{convert, export_adms16, import_chirp_csv, ParseError, RenderError};

/// HRPT version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

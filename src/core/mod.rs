// Core module containing the radio memory domain model
pub mod band;
pub mod constants;
pub mod memory;
pub mod validation;

// Re-export commonly used types
pub use band::{band_for, standard_offset, tuning_step, Band};
pub use constants::*;
pub use memory::{Memory, MemoryError, Mode};
pub use validation::{validate_memory, ValidationMessage};

// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod numeral_system;

pub use numeral_system::{Digit, NumeralSystem, SystemRef};

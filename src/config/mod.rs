//! JSON configuration for the demo binaries.
pub mod adjoint_check;

pub use adjoint_check::{load_config, AdjointCheckConfig, AdjointCheckOutput};

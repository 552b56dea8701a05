pub mod config;
pub mod error;

pub use config::{config, set_config, EngineConfig, NegativePointPolicy};
pub use error::{ProficiencyError, Result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProficiencyError {
    #[error("Invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: i32,
        reason: &'static str,
    },

    #[error("Unknown difficulty: {0:?}")]
    UnknownDifficulty(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProficiencyError>;

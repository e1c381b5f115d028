use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown club identifier '{0}'")]
    UnknownClub(String),
    #[error("target distance {value} is out of range (0-{max})")]
    TargetOutOfRange { value: u32, max: u32 },
    #[error("column mapping for '{role}' is empty")]
    EmptyColumnMapping { role: &'static str },
    #[error("unknown shot type '{0}'")]
    UnknownShotType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

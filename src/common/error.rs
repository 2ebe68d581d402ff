use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Domain error: {0}")]
    DomainError(String),
}

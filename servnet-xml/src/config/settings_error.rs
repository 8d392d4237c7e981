use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid writer settings: {0}")]
    ConfigurationError(String),
}

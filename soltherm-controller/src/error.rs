use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the sensing and telemetry core.
///
/// Nothing here is fatal to the control loop. Two failure modes are
/// deliberately not represented as error values: a partially readable
/// config object folds into the boolean result of
/// `CloudSync::refresh_config`, and an exhausted log write is trace-only
/// (telemetry loss must never block the caller).
#[derive(Debug, Error)]
pub enum Error {
    /// The remote read or write call itself failed (network, auth, or
    /// store-side error).
    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(String),

    /// A stored configuration value violates its documented range.
    #[error("config value '{key}' out of range: {value}")]
    ConfigOutOfRange { key: &'static str, value: i64 },
}

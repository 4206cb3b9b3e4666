use pave_core::errors::PaveError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] PaveError),

    #[error("--param expects key=value, got '{0}'")]
    MalformedParam(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

impl CliError {
    /// Stable code printed alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Core(err) => err.error_code(),
            CliError::MalformedParam(_) => "MALFORMED_PARAM",
            CliError::Io { .. } => "IO_ERROR",
            CliError::Json(_) => "JSON_ERROR",
            CliError::Config(_) => "CONFIG_ERROR",
            CliError::Telemetry(_) => "TELEMETRY_ERROR",
        }
    }

    /// 2 for bad input, 1 for everything else
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Core(err) if err.is_input_error() => 2,
            CliError::MalformedParam(_) | CliError::Config(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_exit_status() {
        let input: CliError = PaveError::ZeroSampleSize.into();
        assert_eq!(input.code(), "ZERO_SAMPLE_SIZE");
        assert_eq!(input.exit_code(), 2);

        let file: CliError = PaveError::file_error("open", "x.json", "not found").into();
        assert_eq!(file.exit_code(), 1);

        let malformed = CliError::MalformedParam("trafficVolume".to_string());
        assert_eq!(malformed.exit_code(), 2);
        assert_eq!(malformed.to_string(), "--param expects key=value, got 'trafficVolume'");
    }
}

// Error kinds shared by every operation. Network calls return these as
// values and the binary turns them into a printed message and an exit code.

use std::process::ExitCode;

use thiserror::Error;

/// Everything that can go wrong while posting or deleting.
#[derive(Error, Debug)]
pub enum XpostError {
    /// Missing or malformed configuration; raised before any command runs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input or response content that cannot be used (blank message,
    /// non-image download, missing identifier in a response).
    #[error("{0}")]
    Validation(String),

    /// Timeout, connection failure or a failed image download.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("X API error {status}")]
    Upstream { status: u16, body: String },

    /// Reading the confirmation answer failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl XpostError {
    /// Raw response body, only present when the platform actually answered.
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::Upstream { body, .. } if !body.is_empty() => Some(body.as_str()),
            _ => None,
        }
    }

    /// Process exit status for this kind of failure (sysexits values).
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Configuration(_) => 78,
            Self::Validation(_) => 65,
            Self::Network(_) => 69,
            Self::Upstream { .. } => 76,
            Self::Terminal(_) => 74,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

pub type XpostResult<T> = Result<T, XpostError>;

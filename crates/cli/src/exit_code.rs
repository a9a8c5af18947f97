//! Exit codes for the GraphQL CLI.
//!
//! Distinct codes let scripts and CI systems tell failure modes apart.

/// Exit codes used by the CLI.
///
/// 0 indicates success and non-zero values indicate different types of
/// failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - output generated or up to date
    Success = 0,
    /// Generated output on disk is missing or out of date (`check`)
    StaleOutput = 1,
    /// Configuration error (missing or invalid config file)
    ConfigError = 2,
    /// Schema load error (file not found, invalid SDL)
    SchemaError = 3,
    /// I/O error (output write failure)
    IoError = 4,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::StaleOutput => write!(f, "stale output"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema load error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

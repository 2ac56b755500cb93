//! Error handling for the SeqWalk CLI

use seqwalk_core::WalkError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SeqWalk CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("No input file was specified. Select a file before drawing.")]
    MissingInput,

    #[error("Invalid setting '{field}': {message}")]
    InvalidSetting { field: String, message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Invalid command: {message}")]
    Command { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_setting<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidSetting {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn export<S: Into<String>>(message: S) -> Self {
        Self::Export { message: message.into() }
    }

    pub fn command<S: Into<String>>(message: S) -> Self {
        Self::Command { message: message.into() }
    }
}

impl From<WalkError> for CliError {
    fn from(err: WalkError) -> Self {
        match err {
            WalkError::MissingInput => Self::MissingInput,
            WalkError::InvalidSetting { field, message } => Self::InvalidSetting { field, message },
            other => Self::io(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file\n\
                 • Use '-' to read the sequence from standard input",
                path.display()
            ));
        }

        CliError::MissingInput => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Pass an input file to 'seqwalk plot'\n\
                 • In a session, use 'set input PATH' before 'run'",
            );
        }

        CliError::InvalidSetting { field, .. } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check the value given for '{}'\n\
                 • Directions are N, E, S, W, NE, NW, SE, SW or none\n\
                 • Colors are written as #rrggbb",
                field
            ));
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your seqwalk.toml configuration file\n\
                 • Use 'seqwalk config --example' to generate a sample configuration",
            );
        }

        CliError::Export { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Use an output path ending in .svg or .png\n\
                 • Ensure the output directory exists and is writable",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CliError::config("test message");
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: test message");
    }

    #[test]
    fn test_error_suggestions() {
        let err = CliError::file_not_found(PathBuf::from("test.fa"));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("Check that the file path is correct"));
    }

    #[test]
    fn test_walk_error_conversion() {
        let err: CliError = WalkError::MissingInput.into();
        assert!(matches!(err, CliError::MissingInput));

        let err: CliError = WalkError::invalid_setting("offset", "must be at least 1").into();
        assert_eq!(err.to_string(), "Invalid setting 'offset': must be at least 1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io { .. }));
    }
}

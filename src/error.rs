//! Error types for notepub

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for notepub
#[derive(Debug, Error)]
pub enum NotepubError {
    #[error("Not a notepub directory: {0}")]
    NotNotepubDirectory(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl NotepubError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NotepubError::NotNotepubDirectory(_) => 2,
            NotepubError::InvalidArgument(_) => 3,
            NotepubError::NoteNotFound(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            NotepubError::NotNotepubDirectory(path) => {
                format!(
                    "Not a notepub directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'notepub init' in this directory to create a note store\n\
                    • Navigate to an existing notepub directory\n\
                    • Set NOTEPUB_ROOT environment variable to your store path",
                    path.display()
                )
            }
            NotepubError::InvalidArgument(msg) => {
                format!(
                    "Invalid argument: {}\n\n\
                    Note identifiers must be non-empty and may only contain\n\
                    letters, digits, '-' and '_' (e.g., ABCDEF123456)",
                    msg
                )
            }
            NotepubError::NoteNotFound(id) => {
                format!(
                    "Note not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'notepub list' to see available notes\n\
                    • Create it first: notepub new {}",
                    id, id
                )
            }
            NotepubError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: notepub config publish_base_url https://example.com/p",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using NotepubError
pub type Result<T> = std::result::Result<T, NotepubError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogUrlsError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory '{path}' not found")]
    InputDirectoryNotFound { path: String },

    #[error("'{path}' is not a directory")]
    NotADirectory { path: String },

    #[error("No {extension} files found in '{path}'")]
    NoInputFiles { path: String, extension: String },

    #[error("No URLs found on lines containing '{keyword}'")]
    NoUrlsFound { keyword: String },

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl LogUrlsError {
    /// Outcomes that end the run early without producing output but are not failures.
    pub fn is_graceful(&self) -> bool {
        matches!(
            self,
            LogUrlsError::InputDirectoryNotFound { .. }
                | LogUrlsError::NotADirectory { .. }
                | LogUrlsError::NoInputFiles { .. }
                | LogUrlsError::NoUrlsFound { .. }
        )
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for LogUrlsError {
    fn user_message(&self) -> String {
        match self {
            LogUrlsError::InputDirectoryNotFound { path } => {
                format!("Directory '{}' not found!", path)
            }
            LogUrlsError::NotADirectory { path } => {
                format!("'{}' exists but is not a directory!", path)
            }
            LogUrlsError::NoInputFiles { path, extension } => {
                format!(
                    "No {} files found in '{}'",
                    extension.to_uppercase(),
                    path
                )
            }
            LogUrlsError::NoUrlsFound { keyword } => {
                format!(
                    "No lines containing '{}' with matching URLs were found.",
                    keyword
                )
            }
            LogUrlsError::FileRead { path, source } => {
                format!("Failed to read file {}: {}", path, source)
            }
            LogUrlsError::OutputWrite { path, source } => {
                format!("Could not write {}: {}", path, source)
            }
            LogUrlsError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            LogUrlsError::InvalidPattern { pattern, source } => {
                format!("Invalid URL pattern '{}': {}", pattern, source)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            LogUrlsError::InputDirectoryNotFound { .. } => Some(
                "Please run the extraction script first, or pass the HTML directory as the first argument.".to_string()
            ),
            LogUrlsError::NotADirectory { .. } => Some(
                "The first argument must be a directory containing saved HTML pages.".to_string()
            ),
            LogUrlsError::NoInputFiles { .. } => Some(
                "Save some pages into the directory first, or change the extension with --extension.".to_string()
            ),
            LogUrlsError::OutputWrite { .. } => Some(
                "Ensure you have write permission for the output directory, or pass a different output path.".to_string()
            ),
            LogUrlsError::Config { .. } => Some(
                "Check your configuration file syntax. Run with --generate-config to get a valid sample.".to_string()
            ),
            LogUrlsError::InvalidPattern { .. } => Some(
                "The url_pattern setting must be a valid regular expression.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LogUrlsError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Lead submission failed: {0}")]
    SubmitError(#[from] SubmitError),

    #[error("Mail delivery failed: {message}")]
    MailError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Outcome of one lead submission attempt that did not succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The endpoint answered with a non-success status.
    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request never completed.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("required field is empty: {field}")]
    MissingField { field: &'static str },

    #[error("a submission is already in progress")]
    AlreadySubmitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::SubmitError(_) | SiteError::MailError { .. } => ErrorCategory::Network,
            SiteError::ConfigError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::TomlError(_) => ErrorCategory::Configuration,
            SiteError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SiteError::SubmitError(SubmitError::AlreadySubmitting) => ErrorSeverity::Low,
            SiteError::SubmitError(_) | SiteError::MailError { .. } => ErrorSeverity::Medium,
            SiteError::ConfigError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::TomlError(_) => ErrorSeverity::High,
            SiteError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::SubmitError(e) => format!("The lead was not delivered: {}", e),
            SiteError::MailError { message } => format!("The email was not sent: {}", message),
            SiteError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and try again later",
            ErrorCategory::Configuration => "Review the site configuration file and CLI flags",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

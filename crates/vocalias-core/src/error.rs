//! Error types for the Vocalias alias engine.
//!
//! Alias resolution itself never fails: every cascade ends in an
//! unconditional literal spelling. These errors only surface while loading
//! resources (configuration, dictionaries, voice-bank indices).

/// Result type alias for Vocalias operations
pub type VocaliasResult<T> = Result<T, VocaliasError>;

/// Main error type for Vocalias operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VocaliasError {
    /// Dictionary file could not be parsed or merged
    #[error("Dictionary error: {message}")]
    DictionaryError {
        /// Error message describing the failure
        message: String,
    },

    /// Voice bank index could not be read
    #[error("Voice bank error: {message}")]
    VoiceBankError {
        /// Error message describing the voice bank issue
        message: String,
    },

    /// File I/O error
    #[error("File I/O error: {message}")]
    FileError {
        /// Error message describing the file operation failure
        message: String,
    },

    /// Invalid input error
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message describing the invalid input
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Error message describing the configuration issue
        message: String,
    },
}

impl VocaliasError {
    /// Create a new dictionary error
    #[must_use]
    pub fn dictionary<S: Into<String>>(message: S) -> Self {
        Self::DictionaryError {
            message: message.into(),
        }
    }

    /// Create a new voice bank error
    #[must_use]
    pub fn voice_bank<S: Into<String>>(message: S) -> Self {
        Self::VoiceBankError {
            message: message.into(),
        }
    }

    /// Create a new file error
    #[must_use]
    pub fn file<S: Into<String>>(message: S) -> Self {
        Self::FileError {
            message: message.into(),
        }
    }

    /// Create a new invalid input error
    #[must_use]
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Check if this error is due to invalid user input
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::ConfigurationError { .. } | Self::DictionaryError { .. }
        )
    }

    /// Get the error category for logging
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::DictionaryError { .. } => "dictionary",
            Self::VoiceBankError { .. } => "voice_bank",
            Self::FileError { .. } => "file",
            Self::InvalidInput { .. } => "input",
            Self::ConfigurationError { .. } => "configuration",
        }
    }
}

// Convert from common error types
impl From<std::io::Error> for VocaliasError {
    fn from(err: std::io::Error) -> Self {
        Self::file(err.to_string())
    }
}

impl From<toml::de::Error> for VocaliasError {
    fn from(err: toml::de::Error) -> Self {
        Self::configuration(format!("TOML parse error: {err}"))
    }
}

impl From<glob::PatternError> for VocaliasError {
    fn from(err: glob::PatternError) -> Self {
        Self::voice_bank(format!("Invalid oto.ini search pattern: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VocaliasError::dictionary("missing entries table");
        assert_eq!(err.to_string(), "Dictionary error: missing entries table");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(VocaliasError::dictionary("test").category(), "dictionary");
        assert_eq!(VocaliasError::voice_bank("test").category(), "voice_bank");
        assert_eq!(VocaliasError::file("test").category(), "file");
        assert_eq!(VocaliasError::invalid_input("test").category(), "input");
        assert_eq!(VocaliasError::configuration("test").category(), "configuration");
    }

    #[test]
    fn test_user_errors() {
        assert!(VocaliasError::invalid_input("test").is_user_error());
        assert!(VocaliasError::configuration("test").is_user_error());
        assert!(VocaliasError::dictionary("test").is_user_error());
        assert!(!VocaliasError::file("test").is_user_error());
        assert!(!VocaliasError::voice_bank("test").is_user_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err = VocaliasError::from(io_err);
        assert!(matches!(err, VocaliasError::FileError { .. }));
    }

    #[test]
    fn test_from_toml_error() {
        let parse_err = toml::from_str::<toml::Table>("= broken").unwrap_err();
        let err = VocaliasError::from(parse_err);
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn test_error_equality() {
        let err1 = VocaliasError::voice_bank("bank");
        let err2 = err1.clone();
        let err3 = VocaliasError::voice_bank("other");
        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}

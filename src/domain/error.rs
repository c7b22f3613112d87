use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Internal(String),
    NotFound(String),
    ValidationError(String),
    ParseError(String),
    ConfigError(String),
    IoError(String),
    TransportError(String),
    ProviderError { status: u16, message: String },
    IntegrityError { expected: u64, actual: u64 },
}

impl AppError {
    /// Errors scoped to a single asset; the optimization run keeps going after these.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            AppError::TransportError(_)
                | AppError::ProviderError { .. }
                | AppError::IntegrityError { .. }
                | AppError::ParseError(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            AppError::ProviderError { status, message } => {
                write!(f, "Provider error ({}): {}", status, message)
            }
            AppError::IntegrityError { expected, actual } => write!(
                f,
                "Integrity error: downloaded {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_file_classification() {
        assert!(AppError::TransportError("timed out".into()).is_per_file());
        assert!(AppError::ProviderError {
            status: 401,
            message: "Unauthorized".into()
        }
        .is_per_file());
        assert!(AppError::IntegrityError {
            expected: 10,
            actual: 9
        }
        .is_per_file());
        assert!(!AppError::IoError("denied".into()).is_per_file());
        assert!(!AppError::ValidationError("missing column".into()).is_per_file());
    }

    #[test]
    fn test_display_includes_status() {
        let err = AppError::ProviderError {
            status: 415,
            message: "Unsupported media type".into(),
        };
        assert_eq!(err.to_string(), "Provider error (415): Unsupported media type");
    }
}

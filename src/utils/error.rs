use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Data file not found: {path}")]
    DataNotFound { path: String },

    #[error("Invalid data shape: {message}")]
    InvalidDataShape { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid filter payload: {message}")]
    InvalidFilterPayload { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Request,
    Configuration,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StockError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StockError::DataNotFound { .. }
            | StockError::InvalidDataShape { .. }
            | StockError::SerializationError(_) => ErrorCategory::Data,
            StockError::MissingConfigError { .. }
            | StockError::InvalidConfigValueError { .. }
            | StockError::TomlError(_) => ErrorCategory::Configuration,
            StockError::InvalidFilterPayload { .. } => ErrorCategory::Request,
            StockError::CsvError(_) | StockError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
            StockError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 資料檔問題只會讓服務回傳空資料，不影響啟動
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StockError::DataNotFound { path } => {
                format!("Check that the stock export exists at '{}' or pass --data-path", path)
            }
            StockError::InvalidDataShape { .. } | StockError::SerializationError(_) => {
                "The data file must contain a JSON array of flat objects".to_string()
            }
            StockError::InvalidFilterPayload { .. } => {
                "Send filters as a JSON object of field -> {\"type\", \"value\"}".to_string()
            }
            StockError::TomlError(_) => "Fix the syntax of the TOML configuration file".to_string(),
            StockError::MissingConfigError { field } => {
                format!("Create the configuration file '{}' or omit --config", field)
            }
            StockError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            StockError::CsvError(_) | StockError::ProcessingError { .. } => {
                "Retry the request; report the issue if it persists".to_string()
            }
            StockError::IoError(_) => {
                "Check file permissions and that the bind address is free".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Data => format!("Stock data could not be loaded: {}", self),
            ErrorCategory::Request => format!("Bad request: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// 依嚴重程度決定程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, StockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_errors_are_medium_severity() {
        let err = StockError::DataNotFound {
            path: "json/stock_data_export.json".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("--data-path"));
    }

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = StockError::InvalidConfigValueError {
            field: "server.bind".to_string(),
            value: "nowhere".to_string(),
            reason: "Invalid socket address".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = StockError::from(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "address in use",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    WorkbookError(#[from] calamine::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl ImportError {
    /// 設定或啟動階段的錯誤，會中止整個匯入
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            ImportError::ConfigError { .. }
                | ImportError::MissingConfigError { .. }
                | ImportError::InvalidConfigValueError { .. }
                | ImportError::WorkbookError(_)
        )
    }

    /// 寫入報表用的訊息：驗證錯誤只保留原始訊息
    pub fn report_message(&self) -> String {
        match self {
            ImportError::ValidationError { message } | ImportError::ProcessingError { message } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::MissingConfigError { .. } => {
                "Set the BaseURL variable in the environment or in the env file"
            }
            ImportError::InvalidConfigValueError { .. } | ImportError::ConfigError { .. } => {
                "Check the command line flags and the settings file"
            }
            ImportError::WorkbookError(_) => {
                "Make sure the input workbook exists and is a valid spreadsheet"
            }
            ImportError::IoError(_) | ImportError::CsvError(_) => {
                "Check that the report directory is writable"
            }
            ImportError::ApiError(_) => "Check network access to the user service",
            ImportError::SerializationError(_)
            | ImportError::ProcessingError { .. }
            | ImportError::ValidationError { .. } => "Inspect the input data and the report",
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_message_strips_prefix() {
        let err = ImportError::ValidationError {
            message: "Missing required fields: First Name or Email".to_string(),
        };
        assert_eq!(
            err.report_message(),
            "Missing required fields: First Name or Email"
        );
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: First Name or Email"
        );
    }

    #[test]
    fn test_setup_errors() {
        let missing = ImportError::MissingConfigError {
            field: "BaseURL".to_string(),
        };
        assert!(missing.is_setup_error());
        assert_eq!(missing.to_string(), "Missing configuration: BaseURL");

        let row = ImportError::ProcessingError {
            message: "bad cell".to_string(),
        };
        assert!(!row.is_setup_error());
    }
}

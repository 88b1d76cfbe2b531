use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Invalid date format '{input}': {reason}")]
    InvalidFormat { input: String, reason: String },

    #[error("Missing input '{field}': {message}")]
    MissingInput { field: String, message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Date out of range: {date} shifted by {offset} days")]
    DateOutOfRange { date: String, offset: i64 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度決定程式退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            Self::High => 1,     // 輸入或配置錯誤
            Self::Critical => 3, // 系統錯誤
        }
    }
}

impl EstimatorError {
    pub fn missing(field: &str, message: &str) -> Self {
        Self::MissingInput {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidFormat { .. }
            | Self::MissingInput { .. }
            | Self::InvalidValue { .. }
            | Self::DateOutOfRange { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的訊息 (MissingInput 直接顯示表單提示)
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingInput { message, .. } => message.clone(),
            Self::InvalidFormat { input, .. } => {
                format!("'{}' is not a valid date, expected YYYY-MM-DD", input)
            }
            Self::InvalidValue { field, reason, .. } => format!("{}: {}", field, reason),
            Self::DateOutOfRange { .. } => {
                "The computed date falls outside the supported calendar range".to_string()
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::IoError(e) => format!("Could not read input: {}", e),
            Self::SerializationError(e) => format!("Could not render output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "Enter dates as YYYY-MM-DD, e.g. 2024-01-01",
            Self::MissingInput { .. } => "Fill in the missing field and try again",
            Self::InvalidValue { .. } => {
                "Check the ultrasound measurement: weeks must be non-negative and days 0-6"
            }
            Self::DateOutOfRange { .. } => "Check that the entered dates are plausible",
            Self::ConfigError { .. } => "Check the TOML case file against the documented layout",
            Self::IoError(_) => "Make sure the file exists and is readable",
            Self::SerializationError(_) => "Retry without --json or report the issue",
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;

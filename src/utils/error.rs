use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupSplitError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("At least one group is required to perform a split")]
    NoGroups,

    #[error("{participants} participants cannot be split evenly into {groups} groups")]
    UnevenSplit { participants: usize, groups: usize },

    #[error("Group '{group}' already holds {assigned} participants but its capacity is {capacity}")]
    GroupOverCapacity {
        group: String,
        capacity: usize,
        assigned: usize,
    },

    #[error("Group '{group}' needs {requested} more participants but only {available} remain unassigned")]
    PoolExhausted {
        group: String,
        requested: usize,
        available: usize,
    },

    #[error("Report error: {message}")]
    ReportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Split,
    Io,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GroupSplitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::NoGroups
            | Self::UnevenSplit { .. }
            | Self::GroupOverCapacity { .. }
            | Self::PoolExhausted { .. } => ErrorCategory::Split,
            Self::IoError(_) => ErrorCategory::Io,
            Self::SerializationError(_) | Self::CsvError(_) | Self::ReportError { .. } => {
                ErrorCategory::Report
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Split => ErrorSeverity::High,
            ErrorCategory::Report => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::IoError(_) => "檢查檔案路徑與寫入權限".to_string(),
            Self::SerializationError(_) | Self::CsvError(_) | Self::ReportError { .. } => {
                "改用 text 格式輸出，或檢查輸出目錄".to_string()
            }
            Self::ConfigValidationError { field, .. } => {
                format!("檢查設定檔中的 '{}' 是否為合法 TOML", field)
            }
            Self::MissingConfigError { field } => format!("在設定檔中補上 '{}'", field),
            Self::InvalidConfigValueError { field, .. } => {
                format!("修正 '{}' 的值後重新執行", field)
            }
            Self::NoGroups => "在 [roster] groups 中至少宣告一個組別".to_string(),
            Self::UnevenSplit {
                participants,
                groups,
            } => format!(
                "調整人數或組數，使 {} 能被 {} 整除",
                participants, groups
            ),
            Self::GroupOverCapacity {
                group, capacity, ..
            } => format!("組別 '{}' 的預先分配人數不可超過 {}", group, capacity),
            Self::PoolExhausted { .. } => {
                "確認預先分配的成員都在 participants 名單中".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Split => format!("Unable to split groups: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Report => format!("Unable to produce the report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GroupSplitError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("No series found: the record collection is empty")]
    EmptyCollectionError,

    #[error("Cannot extract a release year from '{released}' (imdbID {imdb_id})")]
    ExtractionError { imdb_id: String, released: String },

    #[error("Cannot parse {field} value '{value}' as a number")]
    ParseError { field: String, value: String },

    #[error("No record carries a value for {field}; its aggregate is undefined")]
    EmptyAggregateError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Record source error: {message}")]
    SourceError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Source,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StatsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StatsError::EmptyCollectionError
            | StatsError::ExtractionError { .. }
            | StatsError::ParseError { .. }
            | StatsError::EmptyAggregateError { .. } => ErrorCategory::Data,
            StatsError::HttpError(_) | StatsError::CsvError(_) | StatsError::SourceError { .. } => {
                ErrorCategory::Source
            }
            StatsError::ConfigError { .. }
            | StatsError::InvalidConfigValueError { .. }
            | StatsError::MissingConfigError { .. } => ErrorCategory::Config,
            StatsError::IoError(_) | StatsError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 來源暫時不可用，可重試
            StatsError::HttpError(_) | StatsError::SourceError { .. } => ErrorSeverity::Medium,
            StatsError::IoError(_) | StatsError::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 依嚴重程度決定的行程結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StatsError::EmptyCollectionError => "No series found to summarise".to_string(),
            StatsError::ExtractionError { imdb_id, released } => format!(
                "Series {} has a release date without a year: '{}'",
                imdb_id, released
            ),
            StatsError::ParseError { field, value } => {
                format!("Series data contains a non-numeric {}: '{}'", field, value)
            }
            StatsError::EmptyAggregateError { field } => {
                format!("No series has a {} value, statistics cannot be computed", field)
            }
            StatsError::HttpError(_) | StatsError::SourceError { .. } => {
                format!("Could not load series records: {}", self)
            }
            StatsError::CsvError(_) => format!("Could not read the CSV input: {}", self),
            StatsError::ConfigError { .. }
            | StatsError::InvalidConfigValueError { .. }
            | StatsError::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            StatsError::IoError(_) | StatsError::SerializationError(_) => {
                format!("System error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StatsError::EmptyCollectionError => "Add series to the catalog before requesting statistics",
            StatsError::ExtractionError { .. } => {
                "Fix the record's released field so it contains a 4-digit year, or clear it"
            }
            StatsError::ParseError { .. } => {
                "Correct the imdbRating / totalSeasons values so they are plain numbers"
            }
            StatsError::EmptyAggregateError { .. } => {
                "Make sure at least one series carries the missing field"
            }
            StatsError::HttpError(_) | StatsError::SourceError { .. } => {
                "Check that the API endpoint is reachable and returns a JSON array of series"
            }
            StatsError::CsvError(_) => "Check the CSV header row and column count",
            StatsError::ConfigError { .. }
            | StatsError::InvalidConfigValueError { .. }
            | StatsError::MissingConfigError { .. } => {
                "Review the command line arguments or the TOML configuration file"
            }
            StatsError::IoError(_) => "Check file paths and permissions",
            StatsError::SerializationError(_) => "Check that the input is valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;

/// Logs `e`, prints the user-facing message and suggestion to stderr, and
/// exits with [`StatsError::exit_code`].
pub fn exit_with(e: &StatsError) -> ! {
    tracing::error!(
        "❌ Statistics run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}

use thiserror::Error;

/// 資料服務 (trivia API) 相關錯誤
#[derive(Error, Debug)]
pub enum DataServiceError {
    #[error("Request to data service failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Data service returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid data service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum TriviaError {
    #[error(transparent)]
    DataService(#[from] DataServiceError),

    #[error("Not enough categories: need {required}, data service offered {available}")]
    InsufficientCategories { available: usize, required: usize },

    #[error("Not enough clues in category '{category}': need {required}, found {available}")]
    InsufficientClues {
        category: String,
        available: usize,
        required: usize,
    },

    #[error("No tile at category {category}, clue {clue}")]
    IndexOutOfRange { category: usize, clue: usize },

    #[error("A board is already being built")]
    BuildInProgress,

    #[error("Build result does not belong to the build in flight")]
    StaleBuild,

    #[error("Invalid command '{input}': {reason}")]
    InvalidCommand { input: String, reason: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Game,
    Input,
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

impl TriviaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TriviaError::DataService(DataServiceError::Malformed { .. }) => ErrorCategory::Data,
            TriviaError::DataService(_) => ErrorCategory::Network,
            TriviaError::InsufficientCategories { .. } | TriviaError::InsufficientClues { .. } => {
                ErrorCategory::Data
            }
            TriviaError::IndexOutOfRange { .. }
            | TriviaError::BuildInProgress
            | TriviaError::StaleBuild => ErrorCategory::Game,
            TriviaError::InvalidCommand { .. } => ErrorCategory::Input,
            TriviaError::ConfigValidationError { .. }
            | TriviaError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TriviaError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Game | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 錯誤發生後是否可以直接重新開始遊戲
    pub fn is_retryable(&self) -> bool {
        self.severity() == ErrorSeverity::Medium
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TriviaError::DataService(DataServiceError::Network(_)) => {
                "Check your network connection, then type 'start' to try again"
            }
            TriviaError::DataService(DataServiceError::Status { .. }) => {
                "The trivia service may be down; wait a moment and type 'start' to retry"
            }
            TriviaError::DataService(DataServiceError::Malformed { .. }) => {
                "The trivia service sent unexpected data; check --api-base-url"
            }
            TriviaError::DataService(DataServiceError::InvalidUrl(_)) => {
                "Use an absolute http(s) URL for --api-base-url"
            }
            TriviaError::InsufficientCategories { .. } => {
                "Lower --categories or raise --category-pool-size"
            }
            TriviaError::InsufficientClues { .. } => {
                "Type 'start' to draw different categories, or lower --clues-per-category"
            }
            TriviaError::IndexOutOfRange { .. } => {
                "Pick a tile shown on the board, e.g. '1 1' for the top-left tile"
            }
            TriviaError::BuildInProgress => "Wait for the current board to finish loading",
            TriviaError::StaleBuild => "Type 'start' to build a new board",
            TriviaError::InvalidCommand { .. } => "Type 'help' to list the available commands",
            TriviaError::ConfigValidationError { .. }
            | TriviaError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags and run again"
            }
            TriviaError::IoError(_) => "Check that the terminal and config file are readable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TriviaError::DataService(_) => {
                format!("Could not load the board from the trivia service ({})", self)
            }
            TriviaError::InsufficientCategories { .. } | TriviaError::InsufficientClues { .. } => {
                format!("The trivia service does not have enough data: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TriviaError>;

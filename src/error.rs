use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("No API key configured. Run `protocol-optimizer config --set-api-key YOUR_KEY` or set GEMINI_API_KEY")]
    MissingApiKey,

    #[error("API call failed: {0}")]
    ApiCall(String),

    #[error("API returned status {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Failed to parse API response: {0}")]
    ApiParse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input error: {0}")]
    Prompt(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl OptimizerError {
    /// ユーザー操作による中断か
    pub fn is_cancellation(&self) -> bool {
        matches!(self, OptimizerError::Cancelled)
    }
}

impl From<dialoguer::Error> for OptimizerError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            // Ctrl-C は console が Interrupted として返す
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                OptimizerError::Cancelled
            }
            dialoguer::Error::IO(e) => OptimizerError::Prompt(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, OptimizerError>;

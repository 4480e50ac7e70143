use thiserror::Error;

/// The central error type for ArchVision.
///
/// Each layer (remote APIs, generation, studio actions) has its own enum so
/// callers can match on the failure they care about; this wrapper unifies
/// them for the binary's exit-code mapping.
#[derive(Error, Debug)]
pub enum ArchVisionError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Studio error: {0}")]
    Studio(#[from] StudioError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failures talking to the text model or the photo index.
///
/// These never reach the user directly: the remote content service logs them
/// and substitutes a safe default.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API returned status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("No images found for query")]
    EmptyResults,
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Message shown when the free-text notes are judged off-topic.
pub const VALIDATION_REJECTED_MESSAGE: &str =
    "Validation Error: Custom instructions must be related to houses or architecture.";

/// Message shown for any other failure during the fetch phase.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to call the image API: permission denied or API key error. Please try again.";

/// The errors a generation run can end with.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("{}", VALIDATION_REJECTED_MESSAGE)]
    ValidationRejected,

    /// Whatever went wrong, the user sees the same generic message; the cause
    /// is kept for logging.
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    GenerationFailed {
        #[source]
        cause: anyhow::Error,
    },

    #[error("A generation is already in progress")]
    Busy,
}

impl GenerationError {
    pub fn failed(cause: impl Into<anyhow::Error>) -> Self {
        GenerationError::GenerationFailed {
            cause: cause.into(),
        }
    }

    /// True when the user has to edit the notes before retrying.
    pub fn is_validation(&self) -> bool {
        matches!(self, GenerationError::ValidationRejected)
    }
}

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Nothing to save: generate a blueprint or exterior first")]
    NothingToSave,

    #[error("No saved design matches '{0}'")]
    DesignNotFound(String),

    #[error("'{prefix}' matches {count} saved designs, use a longer id")]
    AmbiguousId { prefix: String, count: usize },

    #[error("Wait for the current generation to finish")]
    GenerationInFlight,
}

pub type Result<T> = std::result::Result<T, ArchVisionError>;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_API_ERROR: u8 = 4;
pub const EXIT_GENERATION_ERROR: u8 = 5;

/// Determine the appropriate process exit code for an error.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<ArchVisionError>() {
        return match err {
            ArchVisionError::Config(_) => EXIT_CONFIG_ERROR,
            ArchVisionError::Api(_) => EXIT_API_ERROR,
            ArchVisionError::Generation(_) => EXIT_GENERATION_ERROR,
            _ => EXIT_ERROR,
        };
    }

    // Direct enum unwraps fallback
    if e.downcast_ref::<GenerationError>().is_some() {
        return EXIT_GENERATION_ERROR;
    }
    if e.downcast_ref::<ApiError>().is_some() {
        return EXIT_API_ERROR;
    }

    EXIT_ERROR
}

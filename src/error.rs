use crate::services::GroceryError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Logs the underlying cause and keeps it out of the client message.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl std::fmt::Display,
    ) -> Self {
        let message = message.into();
        tracing::error!(error = %source, "{message}");
        Self::Internal(message)
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) | Self::Internal(message) => {
                message.as_str()
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<GroceryError> for AppError {
    fn from(err: GroceryError) -> Self {
        match err {
            GroceryError::Validation(message) => AppError::bad_request(message),
            GroceryError::NotFound(_) => AppError::not_found(err.to_string()),
            GroceryError::Storage(source) => {
                AppError::internal_with_source("Storage failure. Please check the logs", source)
            }
        }
    }
}

use thiserror::Error;

const UNKNOWN_TRANSPORT_MESSAGE: &str = "unknown error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("generation is not configured: {message}")]
    Configuration { message: String },
    #[error("request transport failed: {message}")]
    Transport { message: String },
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("no content generated")]
    NoContent,
    #[error("provider response could not be decoded: {message}")]
    InvalidResponse { message: String },
}

impl GenerationError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_TRANSPORT_MESSAGE.to_string()
        } else {
            message
        };
        Self::Transport { message }
    }

    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumString;
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error: Could not reach the server.";
pub const MISSING_URL_MESSAGE: &str = "Please fill out this field.";
pub const CATEGORIZE_ERROR_MESSAGE: &str =
    "Failed to categorize. Please try again.";
pub const MODEL_NOT_CHOSEN_MESSAGE: &str =
    "Choose a model and submit a URL before submitting answers.";

/// Semantic error types reported in JSON output
#[derive(Debug, EnumString, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[strum(serialize_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub enum ClientErrorType {
    BackendStatusError,
    BackendConnectionError,
    BackendResponseParseError,
    MissingUrlError,
    ModelNotChosenError,
    InvalidSelectionError,
    InputError,
    SerializationError,
}

impl fmt::Display for ClientErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackendStatusError => write!(f, "BackendStatusError"),
            Self::BackendConnectionError => {
                write!(f, "BackendConnectionError")
            }
            Self::BackendResponseParseError => {
                write!(f, "BackendResponseParseError")
            }
            Self::MissingUrlError => write!(f, "MissingUrlError"),
            Self::ModelNotChosenError => write!(f, "ModelNotChosenError"),
            Self::InvalidSelectionError => write!(f, "InvalidSelectionError"),
            Self::InputError => write!(f, "InputError"),
            Self::SerializationError => write!(f, "SerializationError"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    HttpStatus { status: u16, message: Option<String> },

    #[error("Could not reach the backend: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response from the backend: {0}")]
    UnexpectedResponse(String),

    #[error("A URL is required")]
    MissingUrl,

    #[error("No model was chosen for this question set")]
    ModelNotChosen,

    #[error("Option {option:?} is not offered for question {index}")]
    InvalidSelection { index: usize, option: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Convert internal error to semantic error type
    pub fn to_error_type(&self) -> ClientErrorType {
        match self {
            ClientError::HttpStatus { .. } => {
                ClientErrorType::BackendStatusError
            }
            ClientError::Network(e) => {
                if e.is_decode() {
                    ClientErrorType::BackendResponseParseError
                } else {
                    ClientErrorType::BackendConnectionError
                }
            }
            ClientError::UnexpectedResponse(_) => {
                ClientErrorType::BackendResponseParseError
            }
            ClientError::MissingUrl => ClientErrorType::MissingUrlError,
            ClientError::ModelNotChosen => ClientErrorType::ModelNotChosenError,
            ClientError::InvalidSelection { .. } => {
                ClientErrorType::InvalidSelectionError
            }
            ClientError::Io(_) => ClientErrorType::InputError,
            ClientError::Json(_) => ClientErrorType::SerializationError,
        }
    }

    /// Alert text shown when fetching questions fails.
    pub fn fetch_alert_message(&self) -> String {
        match self {
            ClientError::HttpStatus {
                status,
                message: Some(message),
            } => format!("Error: {} - {}", status, message),
            ClientError::HttpStatus { status, message: None } => {
                format!("Error: {}", status)
            }
            ClientError::Network(e) if !e.is_decode() => {
                NETWORK_ERROR_MESSAGE.to_string()
            }
            ClientError::Network(_) | ClientError::UnexpectedResponse(_) => {
                "Error: Unexpected response from the server.".to_string()
            }
            other => format!("Error: {}", other),
        }
    }
}

use crate::error::{ClientError, ClientErrorType};
use crate::model::{AnswerMap, ModelChoice, Question};
use serde::{Deserialize, Serialize};

/// Error information
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorInfo {
    pub error_type: ClientErrorType,
    pub message: String,
}

/// Output format for a categorized submission
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionOutput {
    pub url: String,
    pub model: ModelChoice,
    pub result: String, // "categorized"
    pub questions: Vec<Question>,
    pub answers: AnswerMap,
    pub user_response: String,
    pub category: String,
}

/// Output format for errors
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorOutput {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelChoice>,
    pub result: String, // "error"
    pub error: ErrorInfo,
}

impl SessionOutput {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl ErrorOutput {
    pub fn from_error(
        url: &str,
        model: Option<ModelChoice>,
        error: &ClientError,
    ) -> Self {
        Self {
            url: url.to_string(),
            model,
            result: "error".to_string(),
            error: ErrorInfo {
                error_type: error.to_error_type(),
                message: error.to_string(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

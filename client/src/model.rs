use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// A generated multiple-choice question.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryResponse {
    pub category: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerateQuestionsRequest {
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategorizeRequest {
    pub user_response: String,
}

/// Error payload the backend sends along with a non-2xx status.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ServerErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Backend family that generated the current question set.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    Ollama,
    OpenAi,
}

impl ModelChoice {
    pub fn questions_endpoint(&self) -> &'static str {
        match self {
            Self::Ollama => "/generate-questions",
            Self::OpenAi => "/generate-openai-questions",
        }
    }

    pub fn categorize_endpoint(&self) -> &'static str {
        match self {
            Self::Ollama => "/categorize-ollama",
            Self::OpenAi => "/categorize-openai",
        }
    }
}

/// Which submit control the user fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    OpenAi,
    Ollama,
}

impl SubmitAction {
    pub fn model(&self) -> ModelChoice {
        match self {
            Self::OpenAi => ModelChoice::OpenAi,
            Self::Ollama => ModelChoice::Ollama,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI Submit",
            Self::Ollama => "Ollama Submit",
        }
    }
}

impl From<ModelChoice> for SubmitAction {
    fn from(model: ModelChoice) -> Self {
        match model {
            ModelChoice::OpenAi => Self::OpenAi,
            ModelChoice::Ollama => Self::Ollama,
        }
    }
}

/// Latest selected option per question index, iterated by ascending index.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<usize, String>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, index: usize, option: impl Into<String>) {
        self.0.insert(index, option.into());
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The answers as one string, the form the categorize endpoints expect.
    pub fn user_response(&self) -> String {
        self.0.values().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

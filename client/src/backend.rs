use crate::{
    error::ClientError,
    model::{
        CategorizeRequest, CategoryResponse, GenerateQuestionsRequest, ModelChoice,
        Question, QuestionsResponse, ServerErrorBody,
    },
    Result,
};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info};

/// HTTP client for the question generation and categorization backend.
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the backend of the given family for a questionnaire about `url`.
    pub async fn generate_questions(
        &self,
        model: ModelChoice,
        url: &str,
    ) -> Result<Vec<Question>> {
        info!("Requesting questions for {} from {} backend", url, model);

        let body = GenerateQuestionsRequest {
            url: url.to_string(),
        };
        let response: QuestionsResponse =
            self.post_json(model.questions_endpoint(), &body).await?;

        info!("Received {} questions", response.questions.len());
        Ok(response.questions)
    }

    /// Send the joined answers to the categorize endpoint of the given family.
    pub async fn categorize(
        &self,
        model: ModelChoice,
        user_response: &str,
    ) -> Result<String> {
        info!("Categorizing answers with {} backend", model);

        let body = CategorizeRequest {
            user_response: user_response.to_string(),
        };
        let response: CategoryResponse =
            self.post_json(model.categorize_endpoint(), &body).await?;

        info!("Category: {}", response.category);
        Ok(response.category)
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach backend at {}: {}", url, e);
                e
            })?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let text = response.text().await.map_err(|e| {
            error!("Failed to read backend response from {}: {}", url, e);
            ClientError::UnexpectedResponse(e.to_string())
        })?;
        debug!("Backend response: {}", text);

        serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse backend response from {}: {}", url, e);
            ClientError::UnexpectedResponse(e.to_string())
        })
    }
}

async fn status_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    // An unreadable or non-JSON error body still yields the status.
    let message = response
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str::<ServerErrorBody>(&text).ok())
        .and_then(|body| body.error);

    error!(
        "Backend returned error status {}: {}",
        status,
        message.as_deref().unwrap_or("<no message>")
    );
    ClientError::HttpStatus { status, message }
}

use crate::{
    backend::BackendClient,
    error::{
        ClientError, CATEGORIZE_ERROR_MESSAGE, MISSING_URL_MESSAGE,
        MODEL_NOT_CHOSEN_MESSAGE,
    },
    model::{AnswerMap, ModelChoice, Question, SubmitAction},
    Result,
};
use tracing::{error, info, warn};

/// Everything the view is rendered from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub url: String,
    pub questions: Vec<Question>,
    pub answers: AnswerMap,
    pub category: Option<String>,
    pub loading: bool,
    pub model: Option<ModelChoice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    QuestionsShown,
    CategoryShown,
}

impl FormState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.category.is_some() {
            Phase::CategoryShown
        } else if !self.questions.is_empty() {
            Phase::QuestionsShown
        } else {
            Phase::Idle
        }
    }
}

/// Where the controller sends its view updates and notifications.
pub trait Ui {
    /// Called after every state change.
    fn render(&mut self, state: &FormState);

    /// Blocking, user-facing notification.
    fn alert(&mut self, message: &str);
}

pub struct FormController<U: Ui> {
    state: FormState,
    backend: BackendClient,
    ui: U,
}

impl<U: Ui> FormController<U> {
    pub fn new(backend: BackendClient, ui: U) -> Self {
        Self {
            state: FormState::default(),
            backend,
            ui,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn render(&mut self) {
        self.ui.render(&self.state);
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.state.url = url.into();
        self.render();
    }

    /// Fetch a fresh questionnaire for the current URL from the backend
    /// family picked by `action`.
    ///
    /// The URL is sent exactly as entered. Loading is cleared exactly once
    /// whatever the outcome, and questions are only stored when the whole
    /// response parsed.
    pub async fn submit_url(&mut self, action: SubmitAction) -> Result<()> {
        if self.state.url.trim().is_empty() {
            warn!("Ignoring submission without a URL");
            self.ui.alert(MISSING_URL_MESSAGE);
            return Err(ClientError::MissingUrl);
        }

        self.state.loading = true;
        self.state.questions.clear();
        self.state.answers.clear();
        self.state.category = None;
        self.state.model = None;
        self.render();

        let model = action.model();
        self.state.model = Some(model);
        self.render();

        let result = self
            .backend
            .generate_questions(model, &self.state.url)
            .await;

        let outcome = match result {
            Ok(questions) => {
                self.state.questions = questions;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching questions: {}", e);
                Err(e)
            }
        };

        self.state.loading = false;
        self.render();

        if let Err(ref e) = outcome {
            self.ui.alert(&e.fetch_alert_message());
        }
        outcome
    }

    /// Record `option` as the answer to question `index`, replacing any
    /// earlier choice.
    pub fn select_option(&mut self, index: usize, option: &str) -> Result<()> {
        let offered = self
            .state
            .questions
            .get(index)
            .map(|q| q.options.iter().any(|o| o == option))
            .unwrap_or(false);

        if !offered {
            return Err(ClientError::InvalidSelection {
                index,
                option: option.to_string(),
            });
        }

        self.state.answers.select(index, option);
        self.render();
        Ok(())
    }

    /// Send the collected answers to the categorize endpoint matching the
    /// backend family that produced the questions.
    pub async fn submit_answers(&mut self) -> Result<String> {
        let Some(model) = self.state.model else {
            warn!("Answers submitted before a model was chosen");
            self.ui.alert(MODEL_NOT_CHOSEN_MESSAGE);
            return Err(ClientError::ModelNotChosen);
        };

        let user_response = self.state.answers.user_response();
        info!(
            "Submitting {} answers to {} backend",
            self.state.answers.len(),
            model
        );

        match self.backend.categorize(model, &user_response).await {
            Ok(category) => {
                self.state.category = Some(category.clone());
                self.render();
                Ok(category)
            }
            Err(e) => {
                error!("Error categorizing user: {}", e);
                self.ui.alert(CATEGORIZE_ERROR_MESSAGE);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingUi {
        renders: usize,
        alerts: Vec<String>,
    }

    impl Ui for RecordingUi {
        fn render(&mut self, _state: &FormState) {
            self.renders += 1;
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }
    }

    fn controller() -> FormController<RecordingUi> {
        // Nothing in these tests reaches the network.
        FormController::new(
            BackendClient::new("http://127.0.0.1:9"),
            RecordingUi::default(),
        )
    }

    fn question(text: &str, options: &[&str]) -> Question {
        Question {
            question: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn test_phase_follows_state() {
        let mut state = FormState::default();
        assert_eq!(state.phase(), Phase::Idle);

        state.loading = true;
        assert_eq!(state.phase(), Phase::Loading);

        state.loading = false;
        state.questions.push(question("Q1?", &["A", "B"]));
        assert_eq!(state.phase(), Phase::QuestionsShown);

        state.category = Some("Explorer".to_string());
        assert_eq!(state.phase(), Phase::CategoryShown);
    }

    #[test]
    fn test_set_url_renders() {
        let mut controller = controller();
        controller.set_url("http://example.com");

        assert_eq!(controller.state().url, "http://example.com");
        assert_eq!(controller.ui().renders, 1);
    }

    #[test]
    fn test_select_option_latest_wins() {
        let mut controller = controller();
        controller.state.questions = vec![question("Q1?", &["A", "B"])];

        controller.select_option(0, "A").unwrap();
        controller.select_option(0, "B").unwrap();

        assert_eq!(controller.state().answers.len(), 1);
        assert_eq!(controller.state().answers.get(0), Some("B"));
    }

    #[test]
    fn test_select_option_rejects_unknown_question_or_option() {
        let mut controller = controller();
        controller.state.questions = vec![question("Q1?", &["A", "B"])];

        assert!(matches!(
            controller.select_option(1, "A"),
            Err(ClientError::InvalidSelection { index: 1, .. })
        ));
        assert!(matches!(
            controller.select_option(0, "C"),
            Err(ClientError::InvalidSelection { index: 0, .. })
        ));
        assert!(controller.state().answers.is_empty());
    }

    #[tokio::test]
    async fn test_submit_url_requires_url() {
        let mut controller = controller();
        controller.set_url("   ");

        let result = controller.submit_url(SubmitAction::OpenAi).await;

        assert!(matches!(result, Err(ClientError::MissingUrl)));
        assert!(!controller.state().loading);
        assert_eq!(controller.state().model, None);
        assert_eq!(controller.ui().alerts, vec![MISSING_URL_MESSAGE]);
    }

    #[tokio::test]
    async fn test_submit_answers_without_model_does_not_guess() {
        let mut controller = controller();
        controller.state.questions = vec![question("Q1?", &["A", "B"])];
        controller.select_option(0, "A").unwrap();

        let result = controller.submit_answers().await;

        assert!(matches!(result, Err(ClientError::ModelNotChosen)));
        assert_eq!(controller.state().category, None);
        assert_eq!(controller.ui().alerts, vec![MODEL_NOT_CHOSEN_MESSAGE]);
    }
}

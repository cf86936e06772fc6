use crate::{controller::FormState, model::SubmitAction};
use std::fmt::Write;

pub const TITLE: &str = "Visitor Web Scraper";
pub const URL_LABEL: &str = "Enter URL You Wish to Submit:";
pub const LOADING_TEXT: &str = "Loading questions...";

/// The whole view for `state`. The category block, when present, is always
/// the last thing rendered.
pub fn render_view(state: &FormState) -> String {
  let mut out = String::new();

  let _ = writeln!(out, "== {} ==", TITLE);
  let _ = writeln!(out, "{} {}", URL_LABEL, state.url);
  let _ = writeln!(
    out,
    "[1] {}  [2] {}",
    SubmitAction::OpenAi.label(),
    SubmitAction::Ollama.label()
  );

  if state.loading {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", LOADING_TEXT);
  }

  if !state.questions.is_empty() {
    let _ = writeln!(out);
    let _ = writeln!(out, "Questions");
    for (index, question) in state.questions.iter().enumerate() {
      let _ = writeln!(out, "{}. {}", index + 1, question.question);
      let selected = state.answers.get(index);
      for (i, option) in question.options.iter().enumerate() {
        let mark = if selected == Some(option.as_str()) {
          "(*)"
        } else {
          "( )"
        };
        let _ = writeln!(out, "    {} {}) {}", mark, i + 1, option);
      }
    }
    let _ = writeln!(out, "[Submit Answers]");
  }

  if let Some(ref category) = state.category {
    let _ = writeln!(out);
    let _ = writeln!(out, "Your Category");
    let _ = writeln!(out, "{}", category);
  }

  out
}

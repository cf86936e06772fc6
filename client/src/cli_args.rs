use crate::model::ModelChoice;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
  name = "visitor-scraper-client",
  version,
  about = "Turns a URL into a questionnaire and categorizes the visitor's answers"
)]
pub struct CliArgs {
  /// Base URL of the question/categorization backend.
  #[arg(long, env = "BACKEND_URL", default_value = "http://localhost:5000")]
  pub backend_url: String,

  /// URL to submit first. Prompted for when omitted.
  #[arg(long, env = "SCRAPE_URL")]
  pub url: Option<String>,

  /// Backend family for the first submission (openai or ollama). Prompted
  /// for when omitted.
  #[arg(long, env = "MODEL")]
  pub model: Option<ModelChoice>,

  /// Output format (json or human-readable).
  #[arg(long, env = "OUTPUT", default_value = "human")]
  pub output: String,

  /// Stop after the first categorized submission.
  #[arg(long, env = "ONCE", default_value = "false")]
  pub once: bool,
}

impl CliArgs {
  pub fn is_json_output(&self) -> bool {
    self.output == "json"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let args = CliArgs::parse_from(["visitor-scraper-client"]);

    assert_eq!(args.backend_url, "http://localhost:5000");
    assert_eq!(args.url, None);
    assert_eq!(args.model, None);
    assert!(!args.is_json_output());
    assert!(!args.once);
  }

  #[test]
  fn test_model_flag_parses_lowercase_names() {
    let args = CliArgs::parse_from([
      "visitor-scraper-client",
      "--model",
      "ollama",
      "--output",
      "json",
    ]);

    assert_eq!(args.model, Some(ModelChoice::Ollama));
    assert!(args.is_json_output());
  }

  #[test]
  fn test_unknown_model_is_rejected() {
    let result =
      CliArgs::try_parse_from(["visitor-scraper-client", "--model", "gpt"]);

    assert!(result.is_err());
  }
}

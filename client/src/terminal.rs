use crate::{
  controller::{FormState, Ui},
  error::MISSING_URL_MESSAGE,
  model::{Question, SubmitAction},
  render::{render_view, URL_LABEL},
  Result,
};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::warn;

/// Renders the form to a terminal stream.
pub struct TerminalUi<W: Write> {
  out: W,
  last_view: Option<String>,
}

impl<W: Write> TerminalUi<W> {
  pub fn new(out: W) -> Self {
    Self {
      out,
      last_view: None,
    }
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> Ui for TerminalUi<W> {
  fn render(&mut self, state: &FormState) {
    let view = render_view(state);
    // Field changes that do not show up in the view are not redrawn.
    if self.last_view.as_deref() == Some(view.as_str()) {
      return;
    }
    if let Err(e) = write!(self.out, "\n{}", view).and_then(|_| self.out.flush())
    {
      warn!("Failed to render view: {}", e);
    }
    self.last_view = Some(view);
  }

  fn alert(&mut self, message: &str) {
    if let Err(e) = writeln!(self.out, "\n!! {}", message)
      .and_then(|_| self.out.flush())
    {
      warn!("Failed to show alert: {}", e);
    }
  }
}

/// Line-oriented input for the form. Every read returns `Ok(None)` once the
/// input is exhausted.
pub struct Prompter<R, W> {
  lines: Lines<R>,
  out: W,
}

impl<R, W> Prompter<R, W>
where
  R: AsyncBufRead + Unpin,
  W: Write,
{
  pub fn new(input: R, out: W) -> Self {
    Self {
      lines: input.lines(),
      out,
    }
  }

  async fn read_raw_line(&mut self, prompt: &str) -> Result<Option<String>> {
    write!(self.out, "{}", prompt)?;
    self.out.flush()?;
    Ok(self.lines.next_line().await?)
  }

  async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
    Ok(
      self
        .read_raw_line(prompt)
        .await?
        .map(|line| line.trim().to_string()),
    )
  }

  fn hint(&mut self, message: &str) -> Result<()> {
    writeln!(self.out, "{}", message)?;
    Ok(())
  }

  /// The URL comes back as typed; only blank lines are refused.
  pub async fn read_url(&mut self) -> Result<Option<String>> {
    loop {
      let prompt = format!("{} ", URL_LABEL);
      match self.read_raw_line(&prompt).await? {
        None => return Ok(None),
        Some(url) if !url.trim().is_empty() => return Ok(Some(url)),
        Some(_) => self.hint(MISSING_URL_MESSAGE)?,
      }
    }
  }

  pub async fn read_action(&mut self) -> Result<Option<SubmitAction>> {
    loop {
      let prompt = format!(
        "Submit with [1] {} or [2] {}: ",
        SubmitAction::OpenAi.label(),
        SubmitAction::Ollama.label()
      );
      let Some(choice) = self.read_line(&prompt).await? else {
        return Ok(None);
      };
      match parse_action(&choice) {
        Some(action) => return Ok(Some(action)),
        None => self.hint("Enter 1 (OpenAI) or 2 (Ollama).")?,
      }
    }
  }

  /// Read a 1-based option number for `question` and return the option text.
  pub async fn read_option(
    &mut self,
    number: usize,
    question: &Question,
  ) -> Result<Option<String>> {
    let count = question.options.len();
    loop {
      let prompt = format!("Answer for question {} (1-{}): ", number, count);
      let Some(choice) = self.read_line(&prompt).await? else {
        return Ok(None);
      };
      let option = choice
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=count).contains(n))
        .map(|n| question.options[n - 1].clone());
      match option {
        Some(option) => return Ok(Some(option)),
        None => self.hint(&format!("Enter a number from 1 to {}.", count))?,
      }
    }
  }

  pub async fn confirm(&mut self, prompt: &str) -> Result<Option<bool>> {
    let answer = self.read_line(&format!("{} [y/N]: ", prompt)).await?;
    Ok(answer.map(|a| matches!(a.to_ascii_lowercase().as_str(), "y" | "yes")))
  }
}

pub fn parse_action(input: &str) -> Option<SubmitAction> {
  match input.trim().to_ascii_lowercase().as_str() {
    "1" | "openai" => Some(SubmitAction::OpenAi),
    "2" | "ollama" => Some(SubmitAction::Ollama),
    _ => None,
  }
}

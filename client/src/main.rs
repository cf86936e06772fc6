use clap::Parser;
use std::io::Write;
use visitor_scraper_client::{
    backend::BackendClient,
    cli_args::CliArgs,
    controller::{FormController, Phase, Ui},
    model::SubmitAction,
    output::{ErrorOutput, SessionOutput},
    terminal::{Prompter, TerminalUi},
    ClientError, Result,
};
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Always initialize tracing to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = CliArgs::parse();

    info!("Starting Visitor Web Scraper client");
    info!("Backend URL: {}", args.backend_url);
    info!("Output format: {}", args.output);

    // With JSON output the interactive view moves to stderr so stdout only
    // carries results.
    let view: Box<dyn Write> = if args.is_json_output() {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };
    let prompt_out: Box<dyn Write> = if args.is_json_output() {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };

    let mut controller = FormController::new(
        BackendClient::new(args.backend_url.clone()),
        TerminalUi::new(view),
    );
    let mut prompter =
        Prompter::new(BufReader::new(tokio::io::stdin()), prompt_out);
    let mut results = std::io::stdout();

    run_session(&args, &mut controller, &mut prompter, &mut results).await
}

/// What to do once a question set is finished with.
#[derive(Debug, PartialEq)]
enum Next {
    NewUrl,
    Stop,
}

/// One URL → questions → answers → category cycle after another, until the
/// input runs out or the user stops. JSON documents go to `results`.
async fn run_session<U, R, W, O>(
    args: &CliArgs,
    controller: &mut FormController<U>,
    prompter: &mut Prompter<R, W>,
    results: &mut O,
) -> Result<()>
where
    U: Ui,
    R: AsyncBufRead + Unpin,
    W: Write,
    O: Write,
{
    let mut preset_url = args.url.clone();
    let mut preset_action = args.model.map(SubmitAction::from);

    controller.render();

    loop {
        let url = match preset_url.take() {
            Some(url) => url,
            None => match prompter.read_url().await? {
                Some(url) => url,
                None => break,
            },
        };
        controller.set_url(url);

        let action = match preset_action.take() {
            Some(action) => action,
            None => match prompter.read_action().await? {
                Some(action) => action,
                None => break,
            },
        };

        if let Err(e) = controller.submit_url(action).await {
            print_error(args, controller, &e, results);
            if args.once {
                return Err(e);
            }
            continue;
        }

        if controller.phase() != Phase::QuestionsShown {
            info!("Backend returned no questions");
            if args.once {
                let e = ClientError::UnexpectedResponse(
                    "backend returned no questions".to_string(),
                );
                print_error(args, controller, &e, results);
                return Err(e);
            }
            continue;
        }

        if answer_questions(args, controller, prompter, results).await?
            == Next::Stop
        {
            break;
        }

        match prompter.confirm("Submit another URL?").await? {
            Some(true) => {}
            _ => break,
        }
    }

    Ok(())
}

/// Collect answers and categorize them. A failed categorization can be
/// retried with the same answers, and a shown category can be replaced by
/// answering again.
async fn answer_questions<U, R, W, O>(
    args: &CliArgs,
    controller: &mut FormController<U>,
    prompter: &mut Prompter<R, W>,
    results: &mut O,
) -> Result<Next>
where
    U: Ui,
    R: AsyncBufRead + Unpin,
    W: Write,
    O: Write,
{
    let mut ask = true;
    loop {
        if ask && !collect_answers(controller, prompter).await? {
            return Ok(Next::Stop);
        }

        let retry = match controller.submit_answers().await {
            Ok(category) => {
                if args.is_json_output() {
                    print_session(controller, category, results)?;
                }
                if args.once {
                    return Ok(Next::Stop);
                }
                ask = true;
                prompter.confirm("Change your answers?").await?
            }
            Err(e) => {
                print_error(args, controller, &e, results);
                if args.once {
                    return Err(e);
                }
                ask = false;
                prompter.confirm("Try again?").await?
            }
        };

        match retry {
            Some(true) => {}
            Some(false) => return Ok(Next::NewUrl),
            None => return Ok(Next::Stop),
        }
    }
}

/// Ask for one option per question. Returns false once input is exhausted.
async fn collect_answers<U, R, W>(
    controller: &mut FormController<U>,
    prompter: &mut Prompter<R, W>,
) -> Result<bool>
where
    U: Ui,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let questions = controller.state().questions.clone();
    for (index, question) in questions.iter().enumerate() {
        if question.options.is_empty() {
            continue;
        }
        match prompter.read_option(index + 1, question).await? {
            Some(option) => controller.select_option(index, &option)?,
            None => return Ok(false),
        }
    }
    Ok(true)
}

fn print_session<U: Ui>(
    controller: &FormController<U>,
    category: String,
    results: &mut impl Write,
) -> Result<()> {
    let state = controller.state();
    let model = state.model.ok_or(ClientError::ModelNotChosen)?;
    let output = SessionOutput {
        url: state.url.clone(),
        model,
        result: "categorized".to_string(),
        questions: state.questions.clone(),
        answers: state.answers.clone(),
        user_response: state.answers.user_response(),
        category,
    };
    writeln!(results, "{}", output.to_json()?)?;
    Ok(())
}

fn print_error<U: Ui>(
    args: &CliArgs,
    controller: &FormController<U>,
    e: &ClientError,
    results: &mut impl Write,
) {
    if !args.is_json_output() {
        return;
    }
    let state = controller.state();
    let output = ErrorOutput::from_error(&state.url, state.model, e);
    match output.to_json() {
        Ok(json) => {
            if let Err(e) = writeln!(results, "{}", json) {
                error!("Failed to write error output: {}", e);
            }
        }
        Err(e) => error!("Failed to serialize error output: {}", e),
    }
}

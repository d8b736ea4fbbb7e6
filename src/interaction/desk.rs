//! The interactive support desk: wires the surface, the classifier, and the session state.

use tracing::{error, info, instrument, warn};

use crate::{
    base::{
        config::Config,
        prompts::SAMPLE_QUESTIONS,
        types::{Notice, Void},
    },
    interaction::{
        classifier::classify_issue,
        session::{EMPTY_ISSUE_WARNING, Event, SessionState, transition},
    },
    service::{llm::LlmClient, surface::Surface},
};

const ISSUE_LABEL: &str = "Enter your support request";
const NAME_LABEL: &str = "Enter your Name";
const PHONE_LABEL: &str = "Enter your Phone Number";

/// Commands recognized in any field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    Sample,
    New,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            ":quit" | ":q" => Some(Command::Quit),
            ":sample" => Some(Command::Sample),
            ":new" => Some(Command::New),
            _ => None,
        }
    }
}

/// Submit an issue for classification.
///
/// Empty submissions are rejected without calling the model.  Classification errors are
/// rendered as a notice and never escape.
#[instrument(skip_all)]
pub async fn submit_issue(session: &mut SessionState, llm: &LlmClient, config: &Config, issue: &str) -> Vec<Notice> {
    if issue.trim().is_empty() {
        warn!("Empty issue submitted.");
        return vec![Notice::warning(EMPTY_ISSUE_WARNING)];
    }

    let outcome = classify_issue(llm, &config.classification_directive, issue).await;

    if let Err(err) = &outcome {
        error!("Error while classifying: {}", err);
    }

    apply(session, Event::Classified { issue: issue.to_string(), outcome })
}

/// Confirm the ticket with the entered contact details.
#[instrument(skip_all)]
pub fn confirm_ticket(session: &mut SessionState, name: &str, phone: &str) -> Vec<Notice> {
    apply(
        session,
        Event::ContactDetailsSubmitted {
            name: name.to_string(),
            phone: phone.to_string(),
        },
    )
}

fn apply(session: &mut SessionState, event: Event) -> Vec<Notice> {
    let (next, notices) = transition(std::mem::take(session), event);
    *session = next;
    notices
}

/// Run one interactive session until the user quits or input ends.
///
/// Only surface I/O failures end the session with an error.
#[instrument(skip_all)]
pub async fn run_session(config: &Config, llm: &LlmClient, surface: &Surface) -> Void {
    info!("Starting support session ...");

    surface.show_banner().await?;

    let mut session = SessionState::default();

    loop {
        let Some(input) = surface.read_field(ISSUE_LABEL, None).await? else {
            break;
        };

        let issue = match Command::parse(&input) {
            Some(Command::Quit) => break,
            Some(Command::New) => continue,
            Some(Command::Sample) => match surface.choose("Sample questions:", &SAMPLE_QUESTIONS).await? {
                Some(index) => {
                    let sample = SAMPLE_QUESTIONS[index];
                    surface.render(&Notice::info(format!("Using sample question: {sample}"))).await?;
                    sample.to_string()
                }
                None => continue,
            },
            None => input,
        };

        render_all(surface, &submit_issue(&mut session, llm, config, &issue).await).await?;

        if session.show_contact_form() {
            surface.render(&Notice::info("Please enter your details to create a ticket.")).await?;
        }

        while session.show_contact_form() {
            let Some(name) = surface.read_field(NAME_LABEL, Some(session.name.as_str())).await? else {
                return Ok(());
            };

            match Command::parse(&name) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::New) => break,
                _ => {}
            }

            let Some(phone) = surface.read_field(PHONE_LABEL, Some(session.phone.as_str())).await? else {
                return Ok(());
            };

            match Command::parse(&phone) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::New) => break,
                _ => {}
            }

            render_all(surface, &confirm_ticket(&mut session, &name, &phone)).await?;
        }
    }

    info!("Support session ended.");

    Ok(())
}

async fn render_all(surface: &Surface, notices: &[Notice]) -> Void {
    for notice in notices {
        surface.render(notice).await?;
    }

    Ok(())
}

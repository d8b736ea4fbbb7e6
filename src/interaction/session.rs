//! Ticket collection state machine.
//!
//! A session moves `AwaitingIssue → (classified) → AwaitingContactDetails → TicketConfirmed`.
//! Every step is a pure [`transition`] from one [`SessionState`] to the next, plus the
//! notices the front end should render.  Nothing here is persisted.

use std::fmt;

use tracing::{info, warn};

use crate::{
    base::{
        error::{ClassifyError, ValidationError},
        types::{Category, Notice},
    },
    interaction::responder::respond,
};

/// Warning for an empty issue submission.
pub const EMPTY_ISSUE_WARNING: &str = "Please enter your issue before submitting.";

/// Warning for confirming a ticket while no contact form is shown.
pub const NO_TICKET_WARNING: &str = "Please submit an issue before confirming a ticket.";

/// Where the session currently is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for (another) issue submission.
    #[default]
    AwaitingIssue,
    /// Classified as ticket-worthy; the contact form is shown.
    AwaitingContactDetails(Category),
    /// The ticket was confirmed; idle until the next issue.
    TicketConfirmed(TicketConfirmation),
}

/// Confirmed ticket summary.  Rendered once, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketConfirmation {
    /// Category the request was classified into.
    pub category: Category,
    /// Contact name, trimmed.
    pub name: String,
    /// Contact phone number, trimmed.
    pub phone: String,
}

impl fmt::Display for TicketConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ticket Created! Hello {}, your support request under '{}' has been recorded. Our team will contact you at {} soon.",
            self.name, self.category, self.phone
        )
    }
}

/// Per-session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Last submitted issue text.
    pub issue: String,
    /// Category of the last successfully classified issue.
    pub category: Option<Category>,
    /// Last entered contact name, as typed.
    pub name: String,
    /// Last entered contact phone, as typed.
    pub phone: String,
    /// Current stage of the ticket flow.
    pub stage: Stage,
}

impl SessionState {
    /// Whether the contact-detail inputs should be shown.
    pub fn show_contact_form(&self) -> bool {
        matches!(self.stage, Stage::AwaitingContactDetails(_))
    }
}

/// Something that happened in the session.
#[derive(Debug, Clone)]
pub enum Event {
    /// A non-empty issue went through classification.
    Classified {
        /// The submitted issue text.
        issue: String,
        /// The classifier's verdict.
        outcome: Result<Category, ClassifyError>,
    },
    /// The user asked to confirm the ticket with these contact details.
    ContactDetailsSubmitted {
        /// Contact name, as typed.
        name: String,
        /// Contact phone number, as typed.
        phone: String,
    },
}

/// Apply one event.
pub fn transition(state: SessionState, event: Event) -> (SessionState, Vec<Notice>) {
    match event {
        Event::Classified { issue, outcome } => on_classified(state, issue, outcome),
        Event::ContactDetailsSubmitted { name, phone } => on_contact_details(state, name, phone),
    }
}

fn on_classified(state: SessionState, issue: String, outcome: Result<Category, ClassifyError>) -> (SessionState, Vec<Notice>) {
    // A new submission always restarts the machine.
    let restarted = SessionState {
        issue,
        category: None,
        stage: Stage::AwaitingIssue,
        ..state
    };

    match outcome {
        Ok(category) => {
            let reply = respond(category);

            let (stage, notice) = if reply.show_contact_form {
                (Stage::AwaitingContactDetails(category), Notice::success(reply.text))
            } else {
                (Stage::AwaitingIssue, Notice::warning(reply.text))
            };

            let next = SessionState {
                category: Some(category),
                stage,
                ..restarted
            };

            (next, vec![notice])
        }
        Err(err) => (restarted, vec![Notice::error(format!("Error: {err}"))]),
    }
}

fn on_contact_details(state: SessionState, name: String, phone: String) -> (SessionState, Vec<Notice>) {
    let Stage::AwaitingContactDetails(category) = state.stage else {
        warn!("Ticket confirmation without a classified issue.");
        return (state, vec![Notice::warning(NO_TICKET_WARNING)]);
    };

    let validated = validate_contact_details(&name, &phone);
    let state = SessionState { name, phone, ..state };

    match validated {
        Ok((name, phone)) => {
            let confirmation = TicketConfirmation { category, name, phone };
            info!("Ticket confirmed under `{category}`.");

            let notices = vec![
                Notice::success(confirmation.to_string()),
                Notice::success("Thank you for contacting us! Your ticket has been created."),
            ];

            let next = SessionState {
                stage: Stage::TicketConfirmed(confirmation),
                ..state
            };

            (next, notices)
        }
        Err(err) => {
            warn!("Ticket confirmation rejected: {err:?}");
            (state, vec![Notice::warning(err.to_string())])
        }
    }
}

/// Trim both contact fields and require both to be non-empty.
pub fn validate_contact_details(name: &str, phone: &str) -> Result<(String, String), ValidationError> {
    let (name, phone) = (name.trim(), phone.trim());

    if name.is_empty() || phone.is_empty() {
        return Err(ValidationError {
            missing_name: name.is_empty(),
            missing_phone: phone.is_empty(),
        });
    }

    Ok((name.to_string(), phone.to_string()))
}

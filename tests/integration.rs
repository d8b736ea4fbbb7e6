#![cfg(test)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use mockall::mock;
use support_bot::{
    base::{
        config::Config,
        error::ClassifyError,
        types::{Category, Notice, NoticeLevel, Res, Void},
    },
    interaction::{
        desk::{confirm_ticket, run_session, submit_issue},
        session::{SessionState, Stage},
    },
    service::{
        llm::{GenericLlmClient, LlmClient},
        surface::{GenericSurface, Surface},
    },
};

// Mocks.

// Mock LLM client for testing.

mock! {
    pub Llm {}

    #[async_trait]
    impl GenericLlmClient for Llm {
        async fn get_classification_response(&self, prompt: &str) -> Result<String, ClassifyError>;
    }
}

fn get_mock_llm(reply: &'static str) -> LlmClient {
    let mut mock = MockLlm::new();

    mock.expect_get_classification_response().returning(move |_| Ok(reply.to_string()));

    LlmClient::new(Arc::new(mock))
}

/// Surface that replays scripted answers and records what it was asked to show.
#[derive(Default)]
struct ScriptedSurface {
    inputs: Mutex<VecDeque<&'static str>>,
    choices: Mutex<VecDeque<Option<usize>>>,
    labels: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
}

impl ScriptedSurface {
    fn new(inputs: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            inputs: Mutex::new(inputs.iter().copied().collect()),
            ..Default::default()
        })
    }

    fn with_choice(self: Arc<Self>, choice: Option<usize>) -> Arc<Self> {
        self.choices.lock().unwrap().push_back(choice);
        self
    }

    fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    fn times_asked(&self, label: &str) -> usize {
        self.labels.lock().unwrap().iter().filter(|l| l.as_str() == label).count()
    }
}

#[async_trait]
impl GenericSurface for ScriptedSurface {
    async fn show_banner(&self) -> Void {
        Ok(())
    }

    async fn read_field(&self, label: &str, _default: Option<&str>) -> Res<Option<String>> {
        self.labels.lock().unwrap().push(label.to_string());
        Ok(self.inputs.lock().unwrap().pop_front().map(str::to_string))
    }

    async fn render(&self, notice: &Notice) -> Void {
        self.notices.lock().unwrap().push(notice.clone());
        Ok(())
    }

    async fn choose(&self, _label: &str, _options: &[&str]) -> Res<Option<usize>> {
        Ok(self.choices.lock().unwrap().pop_front().flatten())
    }
}

// Tests.

#[tokio::test]
async fn test_password_reset_is_account_and_access() {
    let config = Config::default();

    let mut mock = MockLlm::new();
    mock.expect_get_classification_response()
        .withf(|prompt| prompt.contains("I forgot my password and can't log in."))
        .times(1)
        .returning(|_| Ok(r#"{"category":"Account & Access Issue"}"#.to_string()));
    let llm = LlmClient::new(Arc::new(mock));

    let mut session = SessionState::default();
    let notices = submit_issue(&mut session, &llm, &config, "I forgot my password and can't log in.").await;

    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert!(notices[0].text.contains("Account & Access Issue"));
    assert!(session.show_contact_form());
    assert_eq!(session.category, Some(Category::AccountAndAccess));
}

#[tokio::test]
async fn test_empty_issue_skips_the_service() {
    let config = Config::default();

    let mut mock = MockLlm::new();
    mock.expect_get_classification_response().never();
    let llm = LlmClient::new(Arc::new(mock));

    let mut session = SessionState::default();

    for issue in ["", "   \n\t"] {
        let notices = submit_issue(&mut session, &llm, &config, issue).await;

        assert_eq!(notices, vec![Notice::warning("Please enter your issue before submitting.")]);
        assert_eq!(session, SessionState::default());
    }
}

#[tokio::test]
async fn test_malformed_reply_is_a_schema_violation() {
    let config = Config::default();
    let llm = get_mock_llm("{\"category\": \"Technical Support");

    let mut session = SessionState::default();
    let notices = submit_issue(&mut session, &llm, &config, "The app crashes every time I open it.").await;

    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].text.contains("expected schema"));
    assert_eq!(session.stage, Stage::AwaitingIssue);
    assert!(!session.show_contact_form());
}

#[tokio::test]
async fn test_unknown_category_is_a_mismatch() {
    let config = Config::default();
    let llm = get_mock_llm(r#"{"category":"Sales Inquiry"}"#);

    let mut session = SessionState::default();
    let notices = submit_issue(&mut session, &llm, &config, "Do you sell gift cards?").await;

    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].text.contains("unknown category"));
    assert!(notices[0].text.contains("Sales Inquiry"));
    assert!(!session.show_contact_form());
}

#[tokio::test]
async fn test_empty_name_does_not_confirm() {
    let config = Config::default();
    let llm = get_mock_llm(r#"{"category":"Billing & Payments Issue"}"#);

    let mut session = SessionState::default();
    submit_issue(&mut session, &llm, &config, "My subscription was charged twice this month.").await;

    let notices = confirm_ticket(&mut session, "", "555-1234");

    assert_eq!(notices, vec![Notice::warning("Please enter both Name and Phone Number.")]);
    assert_eq!(session.stage, Stage::AwaitingContactDetails(Category::BillingAndPayments));
    assert!(session.show_contact_form());
}

#[tokio::test]
async fn test_technical_ticket_confirmation() {
    let config = Config::default();
    let llm = get_mock_llm(r#"{"category":"Technical Support Issue"}"#);

    let mut session = SessionState::default();
    submit_issue(&mut session, &llm, &config, "The app crashes every time I open it.").await;
    let notices = confirm_ticket(&mut session, "Kiran", "9876543210");

    let summary = &notices[0].text;
    assert!(summary.contains("Kiran"));
    assert!(summary.contains("9876543210"));
    assert!(summary.contains("Technical Support Issue"));
    assert!(!session.show_contact_form());
    assert!(matches!(session.stage, Stage::TicketConfirmed(_)));
}

#[tokio::test]
async fn test_session_rerenders_form_until_valid() {
    let config = Config::default();
    let llm = get_mock_llm(r#"{"category":"Billing & Payments Issue"}"#);
    let surface = ScriptedSurface::new(&["I need help updating my billing address.", "", "555-1234", "Kiran", "555-1234"]);

    run_session(&config, &llm, &Surface::new(surface.clone())).await.unwrap();

    let notices = surface.notices();
    assert!(notices.contains(&Notice::warning("Please enter both Name and Phone Number.")));
    assert!(notices.iter().any(|n| n.level == NoticeLevel::Success && n.text.contains("Hello Kiran")));
    assert_eq!(surface.times_asked("Enter your Name"), 2);
    // Input ran out at the issue prompt after the ticket was confirmed.
    assert_eq!(surface.times_asked("Enter your support request"), 2);
}

#[tokio::test]
async fn test_session_uses_sample_question() {
    let config = Config::default();

    let mut mock = MockLlm::new();
    mock.expect_get_classification_response()
        .withf(|prompt| prompt.contains("The app crashes every time I open it."))
        .times(1)
        .returning(|_| Ok(r#"{"category":"Technical Support Issue"}"#.to_string()));
    let llm = LlmClient::new(Arc::new(mock));

    let surface = ScriptedSurface::new(&[":sample", ":new", ":quit"]).with_choice(Some(2));

    run_session(&config, &llm, &Surface::new(surface.clone())).await.unwrap();

    let notices = surface.notices();
    assert_eq!(notices[0], Notice::info("Using sample question: The app crashes every time I open it."));
    assert!(notices[1].text.contains("Technical Support Issue"));
    assert_eq!(surface.times_asked("Enter your Phone Number"), 0);
}

#[tokio::test]
async fn test_session_survives_service_failure() {
    let config = Config::default();

    let mut calls = 0;
    let mut mock = MockLlm::new();
    mock.expect_get_classification_response().times(2).returning(move |_| {
        calls += 1;
        if calls == 1 {
            Err(ClassifyError::ServiceUnavailable("connection refused".to_string()))
        } else {
            Ok(r#"{"category":"Needs Clarification"}"#.to_string())
        }
    });
    let llm = LlmClient::new(Arc::new(mock));

    let surface = ScriptedSurface::new(&["My internet is not working.", "help"]);

    run_session(&config, &llm, &Surface::new(surface.clone())).await.unwrap();

    let notices = surface.notices();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].text.contains("connection refused"));
    assert_eq!(notices[1], Notice::warning("Please provide more details."));
    assert_eq!(surface.times_asked("Enter your Name"), 0);
}

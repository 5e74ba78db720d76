//! Contact form
//!
//! Submission status is a three-state machine:
//!
//! ```text
//! Idle ──submit──▶ Pending ──sent──▶ Success ──5s──▶ Idle
//!                     │
//!                     └──failed──▶ Idle
//! ```
//!
//! A success banner may be cut short by a new submission. A failure is
//! logged, leaves the fields untouched and shows nothing.

use crate::app::AppTimer;
use crate::relay::{EmailMessage, EmailRelay, RelayError};
use folio_core::{Millis, StateMachine, TimerQueue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How long the success banner stays up
pub const SUCCESS_BANNER_MS: Millis = 5_000;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Idle,
    Pending,
    Success,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum SubmissionEvent {
    Submit,
    Sent,
    Failed,
    BannerElapsed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Email => "your@email.com",
            Field::Message => "Tell me about your project...",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("a submission is already in flight")]
    AlreadyPending,
    #[error("field `{0}` is required")]
    MissingField(Field),
}

pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    status: StateMachine<SubmissionStatus, SubmissionEvent>,
    last_failure: Option<RelayError>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        use SubmissionEvent::*;
        use SubmissionStatus::*;

        let status = StateMachine::builder(Idle)
            .on(Idle, Submit, Pending)
            .on(Success, Submit, Pending)
            .on(Pending, Sent, Success)
            .on(Pending, Failed, Idle)
            .on(Success, BannerElapsed, Idle)
            .build();

        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            status,
            last_failure: None,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status.current_state()
    }

    /// Every field must be non-empty
    pub fn validate(&self) -> Result<(), ContactError> {
        match Field::ALL.into_iter().find(|&f| self.field(f).is_empty()) {
            Some(field) => Err(ContactError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// Move to pending and build the outgoing message.
    ///
    /// Refused while a submission is in flight. A success banner still on
    /// screen is dropped along with its timer.
    pub fn begin_submit(
        &mut self,
        timers: &mut TimerQueue<AppTimer>,
    ) -> Result<EmailMessage, ContactError> {
        if self.status.is_in(SubmissionStatus::Pending) {
            return Err(ContactError::AlreadyPending);
        }
        self.validate()?;

        timers.cancel(&AppTimer::ContactBanner);
        self.last_failure = None;
        self.status.send(SubmissionEvent::Submit);

        Ok(EmailMessage {
            from_name: self.name.clone(),
            reply_to: self.email.clone(),
            message: self.message.clone(),
        })
    }

    /// Apply the relay's answer to a pending submission
    pub fn finish(
        &mut self,
        outcome: Result<(), RelayError>,
        now: Millis,
        timers: &mut TimerQueue<AppTimer>,
    ) -> SubmissionStatus {
        if !self.status.is_in(SubmissionStatus::Pending) {
            tracing::debug!("ContactForm::finish - no submission in flight");
            return self.status();
        }

        match outcome {
            Ok(()) => {
                self.name.clear();
                self.email.clear();
                self.message.clear();
                timers.schedule(AppTimer::ContactBanner, now + SUCCESS_BANNER_MS);
                self.status.send(SubmissionEvent::Sent)
            }
            Err(e) => {
                tracing::warn!("ContactForm::finish - message not sent: {}", e);
                self.last_failure = Some(e);
                self.status.send(SubmissionEvent::Failed)
            }
        }
    }

    /// Submit through `relay`, making exactly one attempt
    pub async fn submit(
        &mut self,
        relay: &dyn EmailRelay,
        now: Millis,
        timers: &mut TimerQueue<AppTimer>,
    ) -> Result<SubmissionStatus, ContactError> {
        let message = self.begin_submit(timers)?;
        let outcome = relay.send(&message).await;
        Ok(self.finish(outcome, now, timers))
    }

    /// The success banner timer fired
    pub fn on_banner_elapsed(&mut self) {
        self.status.send(SubmissionEvent::BannerElapsed);
    }

    pub fn submit_disabled(&self) -> bool {
        self.status.is_in(SubmissionStatus::Pending)
    }

    pub fn button_label(&self) -> &'static str {
        if self.submit_disabled() {
            "Sending..."
        } else {
            "Send Message"
        }
    }

    pub fn success_banner(&self) -> Option<&'static str> {
        self.status
            .is_in(SubmissionStatus::Success)
            .then_some(SUCCESS_MESSAGE)
    }

    /// Error from the most recent failed attempt. Not shown by the default view.
    pub fn last_failure(&self) -> Option<&RelayError> {
        self.last_failure.as_ref()
    }
}

impl fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("message", &self.message)
            .field("status", &self.status())
            .field("last_failure", &self.last_failure)
            .finish()
    }
}

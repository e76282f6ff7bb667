//! Command dispatch.
//!
//! Routes a parsed [`Command`] to the list or search engine of one session and
//! produces the status message shown to the speaker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::catalog::ProductSearch;
use crate::command_parser::{parse, Command};
use crate::session::Session;
use crate::shopping_list::ListUpdate;
use crate::speech::{final_text, SpeechEvent};

/// Hint shown when an utterance isn't understood.
pub const UNKNOWN_COMMAND_HINT: &str =
    r#"Didn't catch that. Try: "add 2 apples", "remove milk", "find toothpaste under 5"."#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Ok,
    Error,
}

/// User-facing outcome of one action. Severity only affects presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

impl StatusMessage {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Ok,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

pub(crate) fn unknown_command() -> StatusMessage {
    StatusMessage::error(UNKNOWN_COMMAND_HINT)
}

pub(crate) fn added(update: &ListUpdate, qty: u32) -> StatusMessage {
    if update.is_ignored() {
        return unknown_command();
    }
    StatusMessage::ok(format!("Added {} × {}.", qty, update.name))
}

pub(crate) fn removed(update: &ListUpdate) -> StatusMessage {
    if update.is_ignored() {
        return unknown_command();
    }
    StatusMessage::ok(format!("Removed {}.", update.name))
}

pub(crate) fn quantity_set(update: &ListUpdate, qty: u32) -> StatusMessage {
    if update.is_ignored() {
        return unknown_command();
    }
    StatusMessage::ok(format!("Set {} to {}.", update.name, qty))
}

fn search_results(query: &str, max_price: Option<f64>) -> StatusMessage {
    match max_price {
        Some(max) => StatusMessage::ok(format!(
            "Search results for \"{}\" under ${}.",
            query, max
        )),
        None => StatusMessage::ok(format!("Search results for \"{}\".", query)),
    }
}

/// Applies commands to sessions. Cheap to clone; the product search is shared.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    search: Arc<dyn ProductSearch>,
}

impl Dispatcher {
    pub fn new(search: Arc<dyn ProductSearch>) -> Self {
        Self { search }
    }

    pub fn search_engine(&self) -> &dyn ProductSearch {
        self.search.as_ref()
    }

    /// Apply one command to `session` and record the resulting status on it.
    pub fn dispatch(&self, session: &mut Session, command: Command) -> StatusMessage {
        tracing::debug!(action = command.action(), item = command.item(), "dispatching command");

        let status = match command {
            Command::Add { item, qty } => {
                let update = session.list_mut().add(&item, qty);
                added(&update, qty)
            }
            Command::Remove { item } => {
                let update = session.list_mut().remove(&item);
                removed(&update)
            }
            Command::Modify { item, qty } => {
                let update = session.list_mut().modify(&item, qty);
                quantity_set(&update, qty)
            }
            Command::Search { item, max_price } => {
                let results = self.search.search(&item, max_price);
                tracing::debug!(query = %item, results = results.len(), "catalog search");
                session.replace_search_results(results);
                search_results(&item, max_price)
            }
            Command::Unknown => unknown_command(),
        };

        session.record_status(status.clone());
        status
    }

    /// Parse a finalized utterance and dispatch it.
    pub fn handle_utterance(&self, session: &mut Session, text: &str) -> StatusMessage {
        self.dispatch(session, parse(text))
    }

    /// Feed a batch of recognizer events to `session`.
    ///
    /// Every event updates the transcript. The final chunks of the batch are
    /// joined and parsed once; a batch of only interim chunks dispatches nothing.
    pub fn handle_speech(
        &self,
        session: &mut Session,
        events: &[SpeechEvent],
    ) -> Option<StatusMessage> {
        for event in events {
            session.transcript_mut().apply(event);
        }
        let text = final_text(events)?;
        Some(self.handle_utterance(session, &text))
    }
}

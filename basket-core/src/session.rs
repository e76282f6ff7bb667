//! Per-session assistant state.
//!
//! A [`Session`] owns everything one speaker's interaction mutates: the list
//! and its history, the latest search results, the transcript, the last
//! status message and the recognizer settings. Nothing is shared between
//! sessions; the catalog lives in the [`Dispatcher`](crate::Dispatcher).

use crate::catalog::CatalogProduct;
use crate::config::AssistantConfig;
use crate::dispatcher::{added, quantity_set, removed, StatusMessage};
use crate::error::ListError;
use crate::shopping_list::ShoppingList;
use crate::speech::{Locale, Transcript};
use crate::suggestions::{default_seasonal, suggest};

#[derive(Debug, Clone)]
pub struct Session {
    list: ShoppingList,
    search_results: Vec<CatalogProduct>,
    transcript: Transcript,
    status: Option<StatusMessage>,
    locale: Locale,
    listening: bool,
    seasonal: Vec<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Locale::default(), default_seasonal())
    }
}

impl Session {
    pub fn new(locale: Locale, seasonal: Vec<String>) -> Self {
        Self {
            list: ShoppingList::new(),
            search_results: Vec::new(),
            transcript: Transcript::new(),
            status: None,
            locale,
            listening: false,
            seasonal,
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(config.locale, config.seasonal.clone())
    }

    pub fn list(&self) -> &ShoppingList {
        &self.list
    }

    pub(crate) fn list_mut(&mut self) -> &mut ShoppingList {
        &mut self.list
    }

    pub fn search_results(&self) -> &[CatalogProduct] {
        &self.search_results
    }

    pub(crate) fn replace_search_results(&mut self, results: Vec<CatalogProduct>) {
        self.search_results = results;
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    /// The most recent status message, if any action has produced one.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub(crate) fn record_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Current suggestions derived from this session's add history.
    pub fn suggestions(&self) -> Vec<String> {
        suggest(self.list.history(), &self.seasonal)
    }

    /// Start listening. Does nothing if already listening.
    pub fn start_listening(&mut self) -> Option<StatusMessage> {
        if self.listening {
            return None;
        }
        self.listening = true;
        tracing::info!(locale = %self.locale, "listening started");
        Some(self.set_status(StatusMessage::ok("Listening...")))
    }

    /// Stop listening. Does nothing if not listening.
    pub fn stop_listening(&mut self) -> Option<StatusMessage> {
        if !self.listening {
            return None;
        }
        self.listening = false;
        tracing::info!("listening stopped");
        Some(self.set_status(StatusMessage::ok("Stopped.")))
    }

    /// Switch recognizer language. A running recognizer is stopped since it
    /// was started for the old locale.
    pub fn set_locale(&mut self, locale: Locale) -> Option<StatusMessage> {
        if locale == self.locale {
            return None;
        }
        self.locale = locale;
        self.stop_listening()
    }

    /// Report a recognizer failure (e.g. microphone permission denied).
    /// Only the status changes.
    pub fn speech_error(&mut self, error: &str) -> StatusMessage {
        tracing::warn!(error, "speech recognition error");
        self.set_status(StatusMessage::error(format!("Voice error: {}", error)))
    }

    /// Add one of an item picked from the suggestions or search results.
    pub fn add_item(&mut self, name: &str) -> StatusMessage {
        let update = self.list.add(name, 1);
        self.set_status(added(&update, 1))
    }

    pub fn increment(&mut self, index: usize) -> Result<StatusMessage, ListError> {
        let (update, qty) = self.list.increment(index)?;
        Ok(self.set_status(quantity_set(&update, qty)))
    }

    pub fn decrement(&mut self, index: usize) -> Result<StatusMessage, ListError> {
        let (update, qty) = self.list.decrement(index)?;
        Ok(self.set_status(quantity_set(&update, qty)))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<StatusMessage, ListError> {
        let update = self.list.remove_at(index)?;
        Ok(self.set_status(removed(&update)))
    }

    /// Direct quantity edit. Leaves the status message alone.
    pub fn set_quantity_from_input(&mut self, index: usize, input: &str) -> Result<u32, ListError> {
        self.list.set_quantity_from_input(index, input)
    }

    fn set_status(&mut self, status: StatusMessage) -> StatusMessage {
        self.status = Some(status.clone());
        status
    }
}

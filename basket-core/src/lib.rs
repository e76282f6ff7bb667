pub mod catalog;
pub mod categorizer;
pub mod command_parser;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod history;
pub mod normalize;
pub mod session;
pub mod shopping_list;
pub mod speech;
pub mod suggestions;

pub use catalog::{Catalog, CatalogProduct, ProductSearch};
pub use categorizer::{categorize, Category};
pub use command_parser::{parse, Command};
pub use config::AssistantConfig;
pub use dispatcher::{Dispatcher, Severity, StatusMessage, UNKNOWN_COMMAND_HINT};
pub use error::{CatalogError, ConfigError, ListError};
pub use history::{HistoryLog, HISTORY_CAPACITY};
pub use normalize::normalize_name;
pub use session::Session;
pub use shopping_list::{ListChange, ListEntry, ListUpdate, ShoppingList};
pub use speech::{Locale, SpeechEvent, Transcript};
pub use suggestions::suggest;

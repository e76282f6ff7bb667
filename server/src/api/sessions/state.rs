use crate::api::{ProductResponse, StatusResponse};
use crate::store::SessionRecord;
use basket_core::ListEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListEntryResponse {
    pub name: String,
    pub qty: u32,
    pub category: String,
}

impl From<&ListEntry> for ListEntryResponse {
    fn from(entry: &ListEntry) -> Self {
        Self {
            name: entry.name.clone(),
            qty: entry.qty,
            category: entry.category.to_string(),
        }
    }
}

/// Everything a front end needs to render one session
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionStateResponse {
    pub id: Uuid,
    pub locale: String,
    pub listening: bool,
    pub transcript: String,
    pub status: Option<StatusResponse>,
    pub items: Vec<ListEntryResponse>,
    pub suggestions: Vec<String>,
    pub search_results: Vec<ProductResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionStateResponse {
    pub fn new(id: Uuid, record: &SessionRecord) -> Self {
        let session = &record.session;
        Self {
            id,
            locale: session.locale().tag().to_string(),
            listening: session.is_listening(),
            transcript: session.transcript().text(),
            status: session.status().map(Into::into),
            items: session.list().entries().iter().map(Into::into).collect(),
            suggestions: session.suggestions(),
            search_results: session.search_results().iter().map(Into::into).collect(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Result of one action: the status it produced (if any) and the new state
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActionResponse {
    pub status: Option<StatusResponse>,
    pub session: SessionStateResponse,
}

use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::calendar_entry;
use crate::types::dto::common::PageMeta;
use crate::types::dto::school_event::SchoolEventResponse;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateCalendarEntryRequest {
    pub event_id: String,
    /// User the entry belongs to
    pub created_by: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateCalendarEntryRequest {
    pub event_id: String,
    pub created_by: String,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEntryResponse {
    pub id: String,
    pub event_id: String,
    pub created_by: String,
    pub date_added: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<calendar_entry::Model> for CalendarEntryResponse {
    fn from(entry: calendar_entry::Model) -> Self {
        Self {
            id: entry.id,
            event_id: entry.event_id,
            created_by: entry.created_by,
            date_added: entry.date_added,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Creation response carries the bookmarked event alongside the entry
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CalendarEntryWithEventResponse {
    pub calendar_entry: CalendarEntryResponse,
    pub event: SchoolEventResponse,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CalendarEntryListResponse {
    pub items: Vec<CalendarEntryResponse>,
    pub meta: PageMeta,
}

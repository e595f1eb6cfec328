use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::school_event;
use crate::types::dto::common::PageMeta;

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct CreateSchoolEventRequest {
    pub title: String,
    pub description: Option<String>,
    /// Event date (Unix timestamp); may not be in the past
    pub date: i64,
    pub venue: String,
    /// Either "admin" or "department"
    pub organized_by: String,
}

/// Only title, description, date, and venue may be updated; any other
/// field in the payload is rejected.
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(deny_unknown_fields)]
pub struct UpdateSchoolEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<i64>,
    pub venue: Option<String>,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct SchoolEventResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: i64,
    pub venue: String,
    pub organized_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<school_event::Model> for SchoolEventResponse {
    fn from(event: school_event::Model) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            venue: event.venue,
            organized_by: event.organized_by,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SchoolEventListResponse {
    pub items: Vec<SchoolEventResponse>,
    pub meta: PageMeta,
}

/// Events between two dates, soonest first
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SchoolEventRangeResponse {
    pub items: Vec<SchoolEventResponse>,
    pub count: u64,
}

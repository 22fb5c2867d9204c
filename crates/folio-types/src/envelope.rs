use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Uniform response wrapper returned by every backend endpoint:
/// `{ success, message, data, error, timestamp }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: Some("OK".to_string()),
            data: Some(data),
            error: None,
            timestamp: Some(Utc::now().to_rfc3339()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            error: Some(message.clone()),
            message: Some(message),
            data: None,
            timestamp: Some(Utc::now().to_rfc3339()),
        }
    }

    /// Server-provided message, ignoring blanks
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Page of items returned by list endpoints inside `Envelope::data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Paged<T> {
    /// Slice `items` the way the backend does for `page`/`limit`.
    pub fn from_all(items: Vec<T>, page: u32, limit: u32) -> Self {
        let total = items.len() as u64;
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit as u64) as u32;
        let skip = (page.saturating_sub(1) as usize) * limit as usize;
        let data = items.into_iter().skip(skip).take(limit as usize).collect();
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

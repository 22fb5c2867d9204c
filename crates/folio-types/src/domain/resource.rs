use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::form::ResourceForm;

/// The two resource collections the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Blog,
    Portfolio,
}

impl ResourceKind {
    /// Path segment of the collection endpoint (`/blogs`, `/portfolio`).
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "blogs",
            ResourceKind::Portfolio => "portfolio",
        }
    }

    /// Path segment of the admin screens (`/blogs`, `/portfolios`).
    pub fn screen(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "blogs",
            ResourceKind::Portfolio => "portfolios",
        }
    }

    pub fn fetch_list_failed(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "Failed to fetch blogs",
            ResourceKind::Portfolio => "Failed to fetch portfolios",
        }
    }

    pub fn fetch_one_failed(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "Failed to fetch blog post",
            ResourceKind::Portfolio => "Failed to fetch portfolio item",
        }
    }

    pub fn create_failed(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "Failed to create blog post",
            ResourceKind::Portfolio => "Failed to create portfolio",
        }
    }

    pub fn update_failed(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "Failed to update blog post",
            ResourceKind::Portfolio => "Failed to update portfolio",
        }
    }

    pub fn delete_failed(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "Failed to delete blog post",
            ResourceKind::Portfolio => "Failed to delete portfolio item",
        }
    }

    /// Title of the delete confirmation gate.
    pub fn delete_title(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "Delete Blog Post",
            ResourceKind::Portfolio => "Delete Portfolio Project",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Blog => write!(f, "blog"),
            ResourceKind::Portfolio => write!(f, "portfolio"),
        }
    }
}

/// A server-owned record that can be listed, fetched, edited and deleted.
///
/// The UI only ever holds a transient copy; the backend is the source of truth.
pub trait Resource:
    Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
    const KIND: ResourceKind;

    /// Editable representation used by create/edit screens.
    type Form: ResourceForm<Resource = Self>;

    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn slug(&self) -> &str;
    /// Stored-file reference, possibly carrying a legacy `uploads/` prefix.
    fn image(&self) -> Option<&str>;
    fn is_published(&self) -> bool;
    fn created_at(&self) -> DateTime<Utc>;
}

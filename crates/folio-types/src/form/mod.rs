//! Editable form models and their multipart serialization.
//!
//! A form serializes to an ordered list of [`FormPart`]s; the HTTP layer maps
//! them onto a multipart body and tests inspect them directly.

mod attachment;
mod blog;
mod portfolio;

pub use attachment::Attachment;
pub use blog::BlogForm;
pub use portfolio::{PortfolioForm, split_technologies};

use crate::domain::Resource;
use std::fmt;

/// One field of a multipart payload
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: &'static str, value: String },
    File { name: &'static str, attachment: Attachment },
}

impl FormPart {
    pub fn text(name: &'static str, value: impl Into<String>) -> Self {
        FormPart::Text {
            name,
            value: value.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }

    /// All text values sent under `name`, in order.
    pub fn values<'a>(parts: &'a [FormPart], name: &str) -> Vec<&'a str> {
        parts
            .iter()
            .filter_map(|part| match part {
                FormPart::Text { name: n, value } if *n == name => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has(parts: &[FormPart], name: &str) -> bool {
        parts.iter().any(|part| part.name() == name)
    }
}

/// Editable copy of a [`Resource`] held by create/edit screens.
pub trait ResourceForm: Default + Clone + fmt::Debug + Send + Sync + 'static {
    type Resource: Resource;

    /// Populate the form from a fetched record (edit mode).
    fn from_resource(resource: &Self::Resource) -> Self;

    /// Serialize into multipart parts. Create and edit send the same set.
    fn to_parts(&self) -> Vec<FormPart>;

    /// Required field checked before submit.
    fn title(&self) -> &str;

    /// Newly selected file, if any.
    fn attachment(&self) -> Option<&Attachment>;

    fn attach(&mut self, attachment: Attachment);

    /// Image reference already stored server-side (edit mode).
    fn current_image(&self) -> Option<&str>;
}

fn publish_flag(is_published: bool) -> FormPart {
    FormPart::text("isPublished", is_published.to_string())
}

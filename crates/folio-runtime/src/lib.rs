//! Headless screens of the folio admin.
//!
//! Each screen is a controller over an [`AdminApi`](folio_client::AdminApi):
//! - [`list::ListController`]: paged list with debounced search and confirmed delete
//! - [`form::FormController`]: create/edit with attachment preview and submit
//! - [`generate::ContentGenerator`]: AI content generation
//! - [`route::Route`]: route table behind the auth gate
//!
//! plus the workspace pieces a front end needs at startup: [`Config`] and
//! [`TokenStore`].

pub mod config;
pub mod dialog;
pub mod error;
pub mod form;
pub mod generate;
pub mod list;
pub mod route;
pub mod token;

pub use config::{ApiConfig, Config, ListConfig, resolve_workspace_path};
pub use dialog::{Choice, ConfirmDialog, Resolution};
pub use error::{Error, Result};
pub use form::{FormController, FormMode};
pub use generate::ContentGenerator;
pub use list::{ListCommand, ListController, ListOptions, ListSnapshot, PendingDelete};
pub use route::Route;
pub use token::TokenStore;

pub mod asset;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod form;
pub mod query;

pub use asset::{AssetResolver, PLACEHOLDER_IMAGE_URL, clean_image_path};
pub use domain::*;
pub use envelope::{Envelope, Paged};
pub use error::{Error, Result};
pub use form::{
    Attachment, BlogForm, FormPart, PortfolioForm, ResourceForm, split_technologies,
};
pub use query::{DEFAULT_PAGE_SIZE, ListQuery};

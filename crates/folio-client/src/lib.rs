//! folio-client: HTTP access to the blog/portfolio admin backend.
//!
//! Every endpoint answers with the same envelope
//! (`{ success, message, data, error, timestamp }`); this crate unwraps it,
//! attaches the bearer token from a [`Session`] to mutating calls and encodes
//! forms as multipart bodies.
//!
//! # Quickstart
//!
//! ```no_run
//! use folio_client::{AdminApi, HttpClient, Session};
//! use folio_types::{Blog, ListQuery};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::with_token("eyJhbGciOi...");
//! let client = HttpClient::builder("http://localhost:3000/api")
//!     .session(session)
//!     .build()?;
//!
//! let page = client.list::<Blog>(&ListQuery::new(1, 10, "rust")).await?;
//! for blog in &page.data {
//!     println!("{} ({})", blog.title, blog.slug);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod session;

pub use api::AdminApi;
pub use client::{ClientBuilder, HttpClient};
pub use error::{Error, Result};
pub use session::Session;

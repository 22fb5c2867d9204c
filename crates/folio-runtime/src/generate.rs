//! AI content generation screen.

use std::sync::Arc;

use folio_client::AdminApi;
use folio_types::ResourceKind;

use crate::route::Route;
use crate::{Error, Result};

const GENERATE_FAILED: &str = "Failed to generate content";

pub struct ContentGenerator<A: AdminApi> {
    api: Arc<A>,
    pub context: String,
    content: Option<String>,
    error: Option<String>,
}

impl<A: AdminApi> ContentGenerator<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            context: String::new(),
            content: None,
            error: None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Post the context; on success keep the content and head back to the
    /// blog list.
    pub async fn generate(&mut self) -> Result<Route> {
        if self.context.trim().is_empty() {
            let err = Error::Required("Context");
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.error = None;

        match self.api.generate(&self.context).await {
            Ok(generated) => {
                self.content = Some(generated.content);
                Ok(Route::List(ResourceKind::Blog))
            }
            Err(err) => {
                tracing::warn!(error = %err, "generate failed");
                let err = Error::api(err, GENERATE_FAILED);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

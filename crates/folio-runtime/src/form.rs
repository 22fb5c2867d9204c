//! Create/edit screen state and its submit lifecycle.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use folio_client::AdminApi;
use folio_types::{AssetResolver, Attachment, Resource, ResourceForm};

use crate::route::Route;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

pub struct FormController<F: ResourceForm, A: AdminApi> {
    api: Arc<A>,
    assets: AssetResolver,
    mode: FormMode,
    form: F,
    error: Option<String>,
    loading: bool,
    submitting: Arc<AtomicBool>,
}

impl<F: ResourceForm, A: AdminApi> FormController<F, A> {
    pub fn create(api: Arc<A>, assets: AssetResolver) -> Self {
        Self::with_mode(api, assets, FormMode::Create)
    }

    /// Edit screen for `id`; call [`load`](Self::load) to populate it.
    pub fn edit(api: Arc<A>, assets: AssetResolver, id: impl Into<String>) -> Self {
        let mut controller = Self::with_mode(api, assets, FormMode::Edit { id: id.into() });
        controller.loading = true;
        controller
    }

    fn with_mode(api: Arc<A>, assets: AssetResolver, mode: FormMode) -> Self {
        Self {
            api,
            assets,
            mode,
            form: F::default(),
            error: None,
            loading: false,
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Fetch the record being edited and copy it into the form.
    pub async fn load(&mut self) -> Result<()> {
        let FormMode::Edit { id } = &self.mode else {
            return Ok(());
        };
        self.loading = true;
        let result = self.api.get::<F::Resource>(id).await;
        self.loading = false;

        match result {
            Ok(record) => {
                self.form = F::from_resource(&record);
                self.error = None;
                Ok(())
            }
            Err(err) => Err(self.fail(err, F::Resource::KIND.fetch_one_failed())),
        }
    }

    pub fn attach(&mut self, attachment: Attachment) {
        tracing::debug!(file = %attachment.file_name, bytes = attachment.len(), "attached");
        self.form.attach(attachment);
    }

    pub fn attach_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let attachment = Attachment::from_path(path)?;
        self.attach(attachment);
        Ok(())
    }

    /// Preview of the newly selected file; the stored image only when no
    /// file is selected.
    pub fn preview(&self) -> Option<String> {
        match self.form.attachment() {
            Some(attachment) => attachment.preview_url(),
            None => self.assets.preview_url(self.form.current_image()),
        }
    }

    /// Send the form. The request runs detached, so dropping this future
    /// does not cancel it; `is_submitting` stays set until it finishes.
    pub async fn submit(&mut self) -> Result<Route> {
        if self.is_submitting() {
            return Err(Error::Busy);
        }
        if self.form.title().trim().is_empty() {
            let err = Error::Required("Title");
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.error = None;

        let kind = F::Resource::KIND;
        let fallback = match self.mode {
            FormMode::Create => kind.create_failed(),
            FormMode::Edit { .. } => kind.update_failed(),
        };
        let parts = self.form.to_parts();
        let mode = self.mode.clone();
        let api = self.api.clone();
        let submitting = self.submitting.clone();
        submitting.store(true, Ordering::SeqCst);

        tracing::debug!(%kind, ?mode, "submitting");
        let task = tokio::spawn(async move {
            let result = match &mode {
                FormMode::Create => api.create::<F::Resource>(parts).await,
                FormMode::Edit { id } => api.update::<F::Resource>(id, parts).await,
            };
            submitting.store(false, Ordering::SeqCst);
            result
        });

        match task.await.map_err(|_| Error::Closed)? {
            Ok(()) => {
                tracing::info!(%kind, "saved");
                Ok(Route::List(kind))
            }
            Err(err) => Err(self.fail(err, fallback)),
        }
    }

    fn fail(&mut self, err: folio_client::Error, fallback: &str) -> Error {
        tracing::warn!(error = %err, "form request failed");
        let err = Error::api(err, fallback);
        self.error = Some(err.to_string());
        err
    }
}

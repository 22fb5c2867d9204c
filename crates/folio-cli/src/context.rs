use crate::args::Cli;
use crate::types::OutputFormat;
use anyhow::Result;
use folio_client::{HttpClient, Session};
use folio_runtime::{Config, ListOptions, Route, TokenStore, resolve_workspace_path};
use folio_types::AssetResolver;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a handler needs, resolved once per invocation
pub struct AppContext {
    pub data_dir: PathBuf,
    pub config: Config,
    pub tokens: TokenStore,
    pub session: Session,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn load(cli: &Cli) -> Result<Self> {
        let data_dir = resolve_workspace_path(cli.data_dir.as_deref())?;
        let config = Config::resolve(&data_dir, cli.api_url.as_deref())?;
        let tokens = TokenStore::in_dir(&data_dir);
        let session = tokens.session()?;
        tracing::debug!(data_dir = %data_dir.display(), api = %config.api.base_url, "context loaded");

        Ok(Self {
            data_dir,
            config,
            tokens,
            session,
            format: cli.format,
        })
    }

    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn client(&self) -> Result<Arc<HttpClient>> {
        let client = HttpClient::builder(&self.config.api.base_url)
            .session(self.session.clone())
            .build()?;
        Ok(Arc::new(client))
    }

    pub fn assets(&self) -> AssetResolver {
        self.config.assets()
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions::from(&self.config.list)
    }

    /// Pass the auth gate for `route` or fail with a sign-in hint.
    pub fn enter(&self, route: Route) -> Result<Route> {
        match route.guard(&self.session) {
            Route::SignIn => anyhow::bail!(
                "Not signed in. Run `folio login --token <TOKEN>` first."
            ),
            route => Ok(route),
        }
    }
}

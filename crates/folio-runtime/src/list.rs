//! Paged, searchable resource list.
//!
//! [`ListController`] owns a tokio task that processes commands, the search
//! debounce deadline and network completions one at a time. Every change is
//! published as a [`ListSnapshot`] on a watch channel.
//!
//! Fetches are keyed by `(page, debounced_search)`; a fetch is issued only
//! when that key changes (or on an explicit refresh). Each fetch carries a
//! sequence number and only the most recently issued one may update state.

use std::sync::Arc;
use std::time::Duration;

use folio_client::AdminApi;
use folio_types::{ListQuery, Paged, Resource};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::config::ListConfig;
use crate::dialog::{Choice, ConfirmDialog, Resolution};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub page_size: u32,
    pub search_delay: Duration,
}

impl Default for ListOptions {
    fn default() -> Self {
        ListOptions::from(&ListConfig::default())
    }
}

impl From<&ListConfig> for ListOptions {
    fn from(config: &ListConfig) -> Self {
        Self {
            page_size: config.page_size.max(1),
            search_delay: config.search_delay(),
        }
    }
}

/// Item awaiting delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct ListSnapshot<R> {
    pub items: Vec<R>,
    /// 1-based
    pub page: u32,
    /// Never below 1
    pub total_pages: u32,
    /// Raw search text as typed
    pub search: String,
    /// Search text the current fetch is keyed on
    pub debounced_search: String,
    pub loading: bool,
    pub error: Option<String>,
    pub pending_delete: Option<PendingDelete>,
    pub confirm: Option<ConfirmDialog>,
    pub deleting: bool,
    /// Count of list responses applied so far
    pub revision: u64,
}

impl<R> ListSnapshot<R> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 1,
            search: String::new(),
            debounced_search: String::new(),
            loading: true,
            error: None,
            pending_delete: None,
            confirm: None,
            deleting: false,
            revision: 0,
        }
    }

    /// Items to render; nothing while a fetch is in flight.
    pub fn visible(&self) -> &[R] {
        if self.loading { &[] } else { &self.items }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    Search(String),
    Goto(u32),
    Next,
    Previous,
    Refresh,
    RequestDelete(String),
    Resolve(Choice),
}

enum Completion<R> {
    Fetched {
        seq: u64,
        result: folio_client::Result<Paged<R>>,
    },
    Deleted {
        id: String,
        result: folio_client::Result<()>,
    },
}

/// Handle to a running list screen. Dropping it stops the task.
pub struct ListController<R: Resource> {
    commands: mpsc::UnboundedSender<ListCommand>,
    snapshots: watch::Receiver<ListSnapshot<R>>,
    task: JoinHandle<()>,
}

impl<R: Resource> ListController<R> {
    /// Spawn the controller on the current tokio runtime and issue the first
    /// fetch.
    pub fn start<A: AdminApi>(api: Arc<A>, options: ListOptions) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(ListSnapshot::new());
        let (done_tx, done_rx) = mpsc::unbounded_channel();

        let task = ListTask {
            api,
            options,
            state: ListSnapshot::new(),
            snapshots: snapshot_tx,
            done: done_tx,
            seq: 0,
            fetched_key: None,
            deadline: None,
        };
        let task = tokio::spawn(task.run(command_rx, done_rx));

        Self {
            commands: command_tx,
            snapshots: snapshot_rx,
            task,
        }
    }

    pub fn send(&self, command: ListCommand) -> Result<()> {
        self.commands.send(command).map_err(|_| Error::Closed)
    }

    pub fn search(&self, text: impl Into<String>) -> Result<()> {
        self.send(ListCommand::Search(text.into()))
    }

    pub fn goto(&self, page: u32) -> Result<()> {
        self.send(ListCommand::Goto(page))
    }

    pub fn next(&self) -> Result<()> {
        self.send(ListCommand::Next)
    }

    pub fn previous(&self) -> Result<()> {
        self.send(ListCommand::Previous)
    }

    pub fn refresh(&self) -> Result<()> {
        self.send(ListCommand::Refresh)
    }

    pub fn request_delete(&self, id: impl Into<String>) -> Result<()> {
        self.send(ListCommand::RequestDelete(id.into()))
    }

    pub fn confirm_delete(&self) -> Result<()> {
        self.send(ListCommand::Resolve(Choice::Confirm))
    }

    pub fn cancel_delete(&self) -> Result<()> {
        self.send(ListCommand::Resolve(Choice::Cancel))
    }

    pub fn snapshot(&self) -> ListSnapshot<R> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<R>> {
        self.snapshots.clone()
    }

    /// Wait until a published snapshot satisfies `predicate`.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&ListSnapshot<R>) -> bool,
    ) -> Result<ListSnapshot<R>> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx
            .wait_for(|snapshot| predicate(snapshot))
            .await
            .map_err(|_| Error::Closed)?;
        Ok(snapshot.clone())
    }

    /// Wait for the in-flight fetch (if any) to settle.
    pub async fn settled(&self) -> Result<ListSnapshot<R>> {
        self.wait_for(|snapshot| !snapshot.loading && !snapshot.deleting)
            .await
    }

    /// Stop the task; pending debounce and in-flight results are discarded.
    pub fn dispose(self) {}
}

impl<R: Resource> Drop for ListController<R> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct ListTask<R, A> {
    api: Arc<A>,
    options: ListOptions,
    state: ListSnapshot<R>,
    snapshots: watch::Sender<ListSnapshot<R>>,
    done: mpsc::UnboundedSender<Completion<R>>,
    /// Sequence number of the latest issued fetch
    seq: u64,
    fetched_key: Option<(u32, String)>,
    deadline: Option<Instant>,
}

impl<R: Resource, A: AdminApi> ListTask<R, A> {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<ListCommand>,
        mut done: mpsc::UnboundedReceiver<Completion<R>>,
    ) {
        self.fetch_if_changed();

        loop {
            let deadline = self.deadline;
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                Some(completion) = done.recv() => self.complete(completion),
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.settle_search();
                }
            }
        }

        tracing::debug!(kind = %R::KIND, "list controller stopped");
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.clone());
    }

    fn handle(&mut self, command: ListCommand) {
        match command {
            ListCommand::Search(text) => {
                if text == self.state.search {
                    return;
                }
                self.state.search = text;
                self.state.page = 1;
                self.deadline = Some(Instant::now() + self.options.search_delay);
                self.publish();
                self.fetch_if_changed();
            }
            ListCommand::Goto(page) => self.goto(page),
            ListCommand::Next => self.goto(self.state.page.saturating_add(1)),
            ListCommand::Previous => self.goto(self.state.page.saturating_sub(1)),
            ListCommand::Refresh => self.fetch(),
            ListCommand::RequestDelete(id) => self.request_delete(id),
            ListCommand::Resolve(choice) => self.resolve(choice),
        }
    }

    fn goto(&mut self, page: u32) {
        if page < 1 || page > self.state.total_pages || page == self.state.page {
            return;
        }
        self.state.page = page;
        self.fetch_if_changed();
    }

    fn settle_search(&mut self) {
        self.deadline = None;
        if self.state.debounced_search != self.state.search {
            self.state.debounced_search = self.state.search.clone();
            self.fetch_if_changed();
        }
    }

    fn fetch_if_changed(&mut self) {
        let key = (self.state.page, self.state.debounced_search.clone());
        if self.fetched_key.as_ref() != Some(&key) {
            self.fetch();
        }
    }

    fn fetch(&mut self) {
        self.seq += 1;
        let seq = self.seq;
        let query = ListQuery::new(
            self.state.page,
            self.options.page_size,
            self.state.debounced_search.clone(),
        );
        self.fetched_key = Some((query.page, query.search.clone()));
        self.state.loading = true;
        self.publish();

        tracing::debug!(kind = %R::KIND, seq, page = query.page, search = %query.search, "fetching list");
        let api = self.api.clone();
        let done = self.done.clone();
        tokio::spawn(async move {
            let result = api.list::<R>(&query).await;
            let _ = done.send(Completion::Fetched { seq, result });
        });
    }

    fn complete(&mut self, completion: Completion<R>) {
        match completion {
            Completion::Fetched { seq, result } => {
                if seq != self.seq {
                    tracing::debug!(kind = %R::KIND, seq, latest = self.seq, "discarding stale list response");
                    return;
                }
                self.state.loading = false;
                self.state.revision += 1;
                match result {
                    Ok(page) => {
                        self.state.items = page.data;
                        self.state.total_pages = page.total_pages.max(1);
                        self.state.error = None;
                    }
                    Err(err) => {
                        tracing::warn!(kind = %R::KIND, error = %err, "list fetch failed");
                        self.state.items.clear();
                        self.state.error = Some(err.user_message(R::KIND.fetch_list_failed()));
                    }
                }
            }
            Completion::Deleted { id, result } => {
                match result {
                    Ok(()) => {
                        tracing::info!(kind = %R::KIND, %id, "deleted");
                        self.state.items.retain(|item| item.id() != id);
                    }
                    Err(err) => {
                        tracing::warn!(kind = %R::KIND, %id, error = %err, "delete failed");
                        self.state.error = Some(err.user_message(R::KIND.delete_failed()));
                    }
                }
                self.close_dialog();
            }
        }
        self.publish();
    }

    fn request_delete(&mut self, id: String) {
        if self.state.deleting {
            return;
        }
        let Some(item) = self.state.items.iter().find(|item| item.id() == id) else {
            tracing::debug!(kind = %R::KIND, %id, "delete requested for unknown item");
            return;
        };
        let title = item.title().to_string();
        self.state.confirm = Some(ConfirmDialog::for_delete(R::KIND, &title));
        self.state.pending_delete = Some(PendingDelete { id, title });
        self.publish();
    }

    fn resolve(&mut self, choice: Choice) {
        if self.state.deleting {
            return;
        }
        let Some(dialog) = &self.state.confirm else {
            return;
        };
        match dialog.resolve(choice) {
            Resolution::Close => {
                self.close_dialog();
                self.publish();
            }
            Resolution::Proceed => {
                let Some(pending) = self.state.pending_delete.clone() else {
                    self.close_dialog();
                    self.publish();
                    return;
                };
                self.state.deleting = true;
                self.publish();

                let api = self.api.clone();
                let done = self.done.clone();
                tokio::spawn(async move {
                    let result = api.delete::<R>(&pending.id).await;
                    let _ = done.send(Completion::Deleted {
                        id: pending.id,
                        result,
                    });
                });
            }
        }
    }

    fn close_dialog(&mut self) {
        self.state.confirm = None;
        self.state.pending_delete = None;
        self.state.deleting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_paging_flags() {
        let mut snapshot: ListSnapshot<()> = ListSnapshot::new();
        snapshot.loading = false;
        assert!(!snapshot.has_previous());
        assert!(!snapshot.has_next());

        snapshot.total_pages = 3;
        snapshot.page = 2;
        assert!(snapshot.has_previous());
        assert!(snapshot.has_next());

        snapshot.page = 3;
        assert!(!snapshot.has_next());
    }

    #[test]
    fn test_loading_hides_items() {
        let mut snapshot: ListSnapshot<u8> = ListSnapshot::new();
        snapshot.items = vec![1, 2];
        assert!(snapshot.visible().is_empty());
        snapshot.loading = false;
        assert_eq!(snapshot.visible(), &[1, 2]);
    }

    #[test]
    fn test_options_from_config() {
        let config = ListConfig {
            page_size: 0,
            search_delay_ms: 250,
        };
        let options = ListOptions::from(&config);
        assert_eq!(options.page_size, 1);
        assert_eq!(options.search_delay, Duration::from_millis(250));
    }
}

//! In-memory backend for controller tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use folio_client::{AdminApi, Error, Result};
use folio_types::{FormPart, GeneratedContent, ListQuery, Paged, Resource, ResourceKind};
use serde_json::Value;

/// Operation kinds that can be scripted to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
    Generate,
}

/// One request received by the fake, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List {
        kind: ResourceKind,
        query: ListQuery,
    },
    Get {
        kind: ResourceKind,
        id: String,
    },
    Create {
        kind: ResourceKind,
        parts: Vec<FormPart>,
    },
    Update {
        kind: ResourceKind,
        id: String,
        parts: Vec<FormPart>,
    },
    Delete {
        kind: ResourceKind,
        id: String,
    },
    Generate {
        context: String,
    },
}

impl Call {
    pub fn op(&self) -> Op {
        match self {
            Call::List { .. } => Op::List,
            Call::Get { .. } => Op::Get,
            Call::Create { .. } => Op::Create,
            Call::Update { .. } => Op::Update,
            Call::Delete { .. } => Op::Delete,
            Call::Generate { .. } => Op::Generate,
        }
    }
}

#[derive(Default)]
struct State {
    records: HashMap<ResourceKind, Vec<Value>>,
    calls: Vec<Call>,
    failures: HashMap<Op, VecDeque<Option<String>>>,
    list_delays: HashMap<(u32, String), Duration>,
    delays: HashMap<Op, Duration>,
    generated: String,
}

/// In-memory [`AdminApi`].
///
/// Records are stored as JSON so any [`Resource`] can be held. Search matches
/// titles case-insensitively, like the real backend.
#[derive(Default)]
pub struct FakeAdmin {
    state: Mutex<State>,
}

impl FakeAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records<R: Resource>(self, records: Vec<R>) -> Self {
        {
            let mut state = self.lock();
            let entry = state.records.entry(R::KIND).or_default();
            for record in records {
                entry.push(serde_json::to_value(record).expect("fixture serializes"));
            }
        }
        self
    }

    pub fn with_generated(self, content: impl Into<String>) -> Self {
        self.lock().generated = content.into();
        self
    }

    /// Fail the next `op` with a server message (or none, for a generic failure).
    pub fn fail_next(&self, op: Op, message: Option<&str>) {
        self.lock()
            .failures
            .entry(op)
            .or_default()
            .push_back(message.map(String::from));
    }

    /// Delay list responses for one `(page, search)` key.
    pub fn delay_list(&self, page: u32, search: &str, delay: Duration) {
        self.lock()
            .list_delays
            .insert((page, search.to_string()), delay);
    }

    /// Delay every response of `op`.
    pub fn delay(&self, op: Op, delay: Duration) {
        self.lock().delays.insert(op, delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.lock().calls.iter().filter(|c| c.op() == op).count()
    }

    pub fn list_queries(&self) -> Vec<ListQuery> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::List { query, .. } => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn records<R: Resource>(&self) -> Vec<R> {
        self.lock()
            .records
            .get(&R::KIND)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Log the call and pop a scripted failure; returns the delay to apply.
    fn begin(&self, call: Call) -> (Duration, Option<Error>) {
        let mut state = self.lock();
        let op = call.op();
        let delay = match &call {
            Call::List { query, .. } => state
                .list_delays
                .get(&(query.page, query.search.clone()))
                .copied(),
            _ => None,
        }
        .or_else(|| state.delays.get(&op).copied())
        .unwrap_or_default();
        state.calls.push(call);

        let failure = state
            .failures
            .get_mut(&op)
            .and_then(|queue| queue.pop_front())
            .map(|message| Error::Rejected {
                status: if message.is_some() { 400 } else { 500 },
                message,
            });
        (delay, failure)
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn not_found(kind: ResourceKind) -> Error {
    Error::Rejected {
        status: 404,
        message: Some(format!("{} not found", kind)),
    }
}

fn matches_search(record: &Value, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    record["title"]
        .as_str()
        .map(|t| t.to_lowercase().contains(&search.to_lowercase()))
        .unwrap_or(false)
}

impl AdminApi for FakeAdmin {
    async fn list<R: Resource>(&self, query: &ListQuery) -> Result<Paged<R>> {
        let (delay, failure) = self.begin(Call::List {
            kind: R::KIND,
            query: query.clone(),
        });
        pause(delay).await;
        if let Some(err) = failure {
            return Err(err);
        }

        let matching: Vec<R> = self
            .records::<R>()
            .into_iter()
            .filter(|r| {
                serde_json::to_value(r)
                    .map(|v| matches_search(&v, &query.search))
                    .unwrap_or(false)
            })
            .collect();
        Ok(Paged::from_all(matching, query.page, query.limit))
    }

    async fn get<R: Resource>(&self, id: &str) -> Result<R> {
        let (delay, failure) = self.begin(Call::Get {
            kind: R::KIND,
            id: id.to_string(),
        });
        pause(delay).await;
        if let Some(err) = failure {
            return Err(err);
        }

        self.records::<R>()
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found(R::KIND))
    }

    async fn create<R: Resource>(&self, parts: Vec<FormPart>) -> Result<()> {
        let (delay, failure) = self.begin(Call::Create {
            kind: R::KIND,
            parts,
        });
        pause(delay).await;
        failure.map_or(Ok(()), Err)
    }

    async fn update<R: Resource>(&self, id: &str, parts: Vec<FormPart>) -> Result<()> {
        let (delay, failure) = self.begin(Call::Update {
            kind: R::KIND,
            id: id.to_string(),
            parts,
        });
        pause(delay).await;
        if let Some(err) = failure {
            return Err(err);
        }
        if self.records::<R>().iter().any(|r| r.id() == id) {
            Ok(())
        } else {
            Err(not_found(R::KIND))
        }
    }

    async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        let (delay, failure) = self.begin(Call::Delete {
            kind: R::KIND,
            id: id.to_string(),
        });
        pause(delay).await;
        if let Some(err) = failure {
            return Err(err);
        }

        let mut state = self.lock();
        let records = state.records.entry(R::KIND).or_default();
        let before = records.len();
        records.retain(|v| v["id"].as_str() != Some(id));
        if records.len() == before {
            return Err(not_found(R::KIND));
        }
        Ok(())
    }

    async fn generate(&self, context: &str) -> Result<GeneratedContent> {
        let (delay, failure) = self.begin(Call::Generate {
            context: context.to_string(),
        });
        pause(delay).await;
        if let Some(err) = failure {
            return Err(err);
        }
        Ok(GeneratedContent {
            content: self.lock().generated.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use folio_types::Blog;

    #[tokio::test]
    async fn test_list_filters_and_pages() {
        let fake = FakeAdmin::new().with_records(fixtures::blogs(15));

        let page: Paged<Blog> = fake.list(&ListQuery::new(2, 10, "")).await.unwrap();
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.total_pages, 2);

        let found: Paged<Blog> = fake.list(&ListQuery::new(1, 10, "post 1")).await.unwrap();
        // "Post 1" and "Post 10".."Post 15"
        assert_eq!(found.total, 7);
        assert_eq!(fake.count(Op::List), 2);
    }

    #[tokio::test]
    async fn test_scripted_failure_is_consumed_once() {
        let fake = FakeAdmin::new().with_records(fixtures::blogs(2));
        fake.fail_next(Op::Delete, Some("nope"));

        let err = fake.delete::<Blog>("b1").await.unwrap_err();
        assert_eq!(err.user_message("fallback"), "nope");
        assert_eq!(fake.records::<Blog>().len(), 2);

        fake.delete::<Blog>("b1").await.unwrap();
        assert_eq!(fake.records::<Blog>().len(), 1);
    }
}

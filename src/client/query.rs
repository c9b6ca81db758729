//! Watched queries: fetch policy, refetch, polling and response sequencing.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::ShelfError;

use super::cache::QueryCache;
use super::operations::Operation;
use super::transport::Transport;

/// How a query consults the cache when it is (re)mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Serve a cached result without touching the network; fetch on a miss.
    CacheFirst,
    /// Show the cached result right away, then replace it with the network one.
    #[default]
    CacheAndNetwork,
    /// Always go to the network.
    NetworkOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Idle,
    /// A request is in flight; `stale` is what can be shown meanwhile.
    Loading { stale: Option<T> },
    Success {
        data: T,
        fetched_at: DateTime<Utc>,
        from_cache: bool,
    },
    Error { message: String },
}

impl<T> QueryState<T> {
    /// Data to render, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Loading { stale } => stale.as_ref(),
            QueryState::Success { data, .. } => Some(data),
            QueryState::Idle | QueryState::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueryState::Idle => "idle",
            QueryState::Loading { .. } => "loading",
            QueryState::Success { .. } => "success",
            QueryState::Error { .. } => "error",
        }
    }
}

/// Current state plus the sequence number of the response it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot<T> {
    pub state: QueryState<T>,
    pub applied_seq: u64,
}

struct Inner<D, T> {
    transport: Arc<T>,
    cache: QueryCache,
    operation: Operation,
    policy: FetchPolicy,
    state: watch::Sender<QuerySnapshot<D>>,
}

/// One query kept up to date for a view.
///
/// Every network request takes a sequence number from the shared cache.
/// A response is applied only if it is newer than the last applied one, so
/// a slow poll cannot overwrite a later refetch.
pub struct WatchedQuery<D, T> {
    inner: Arc<Inner<D, T>>,
}

impl<D, T> Clone for WatchedQuery<D, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D, T> WatchedQuery<D, T>
where
    D: DeserializeOwned + Clone + Send + Sync + 'static,
    T: Transport,
{
    pub fn new(
        transport: Arc<T>,
        cache: QueryCache,
        operation: Operation,
        policy: FetchPolicy,
    ) -> Self {
        let (state, _) = watch::channel(QuerySnapshot {
            state: QueryState::Idle,
            applied_seq: 0,
        });
        Self {
            inner: Arc::new(Inner {
                transport,
                cache,
                operation,
                policy,
                state,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot<D>> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> QueryState<D> {
        self.inner.state.borrow().state.clone()
    }

    /// The initial load, following the fetch policy.
    pub async fn fetch(&self) {
        let key = self.inner.operation.cache_key();
        let cached = match self.inner.policy {
            FetchPolicy::NetworkOnly => None,
            FetchPolicy::CacheFirst | FetchPolicy::CacheAndNetwork => self
                .inner
                .cache
                .read(&key)
                .and_then(|entry| self.decode(entry.data).ok().map(|d| (d, entry.fetched_at))),
        };

        match (self.inner.policy, cached) {
            (FetchPolicy::CacheFirst, Some((data, fetched_at))) => {
                let seq = self.inner.cache.next_seq();
                self.apply(
                    seq,
                    QueryState::Success {
                        data,
                        fetched_at,
                        from_cache: true,
                    },
                );
            }
            (_, cached) => {
                let stale = cached.map(|(data, _)| data);
                self.network(stale).await;
            }
        }
    }

    /// Drop the cached result and re-issue the query over the network.
    pub async fn refetch(&self) {
        self.inner
            .cache
            .invalidate(&self.inner.operation.cache_key());
        let stale = self.inner.state.borrow().state.data().cloned();
        self.network(stale).await;
    }

    /// Re-issue the query every `interval` on a background task.
    ///
    /// The first request goes out one interval from now; call [`fetch`]
    /// for the initial load.
    ///
    /// [`fetch`]: WatchedQuery::fetch
    pub fn start_polling(&self, interval: Duration) -> PollHandle {
        let query = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                tracing::debug!(operation = query.inner.operation.name, "Poll tick");
                query.refetch().await;
            }
        });
        PollHandle { task }
    }

    async fn network(&self, stale: Option<D>) {
        let seq = self.inner.cache.next_seq();
        self.inner.state.send_modify(|snap| {
            snap.state = QueryState::Loading { stale };
        });

        let operation = &self.inner.operation;
        let outcome = self
            .inner
            .transport
            .execute(operation.to_request())
            .await
            .and_then(|response| response.into_data());

        let state = match outcome {
            Ok(value) => match self.decode(value.clone()) {
                Ok(data) => {
                    self.inner.cache.write(operation.cache_key(), value, seq);
                    QueryState::Success {
                        data,
                        fetched_at: Utc::now(),
                        from_cache: false,
                    }
                }
                Err(e) => QueryState::Error {
                    message: e.user_message(),
                },
            },
            Err(e) => {
                tracing::warn!(operation = operation.name, error = %e, "Query failed");
                QueryState::Error {
                    message: e.user_message(),
                }
            }
        };
        self.apply(seq, state);
    }

    fn decode(&self, value: serde_json::Value) -> Result<D, ShelfError> {
        serde_json::from_value(value).map_err(|e| {
            ShelfError::UnexpectedResponse(format!(
                "cannot decode {} data: {}",
                self.inner.operation.name, e
            ))
        })
    }

    /// Replace the state with the result of request `seq` unless a newer
    /// result is already showing. The check and the write happen under the
    /// channel's lock.
    fn apply(&self, seq: u64, state: QueryState<D>) -> bool {
        let applied = self.inner.state.send_if_modified(|snap| {
            if seq <= snap.applied_seq {
                return false;
            }
            snap.applied_seq = seq;
            snap.state = state;
            true
        });
        if !applied {
            tracing::debug!(
                operation = self.inner.operation.name,
                seq,
                "Discarded stale response"
            );
        }
        applied
    }
}

/// Stops the polling task when stopped or dropped.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

//! Debounced search-as-you-type.
//!
//! Every [`SearchSession::update_query`] issues a new generation number and
//! cancels the pending search while it is still waiting out the debounce. A
//! lookup that has already started runs to completion on the blocking pool,
//! but only publishes when its generation is still the latest one, so a slow
//! lookup for an old query can never overwrite newer results.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::enrich::EnrichmentPipeline;
use crate::model::ItemRecord;
use crate::search::SearchEngine;
use crate::snapshot::SharedReader;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<ItemRecord>,
    pub searching: bool,
    /// Number of queries issued so far.
    pub generation: u64,
}

pub struct SearchSession {
    engine: SearchEngine,
    pipeline: EnrichmentPipeline,
    limit: usize,
    debounce: Duration,
    state: Arc<watch::Sender<SearchState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchSession {
    pub fn new(reader: SharedReader, config: &SearchConfig) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            engine: SearchEngine::new(reader.clone()),
            pipeline: EnrichmentPipeline::new(reader),
            limit: config.limit,
            debounce: config.debounce(),
            state: Arc::new(state),
            pending: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Replace the current query. Must be called from inside a tokio runtime.
    ///
    /// A blank query clears the results at once; anything else is searched
    /// after the debounce interval unless another update arrives first.
    pub fn update_query(&self, query: impl Into<String>) {
        let query = query.into();
        let blank = query.trim().is_empty();

        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.query = query.clone();
            state.searching = !blank;
            if blank {
                state.results.clear();
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        if blank {
            return;
        }

        let task = SearchTask {
            engine: self.engine.clone(),
            pipeline: self.pipeline.clone(),
            limit: self.limit,
            debounce: self.debounce,
            state: Arc::clone(&self.state),
        };
        *pending = Some(tokio::spawn(task.run(generation, query)));
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(task) = pending.take() {
            task.abort();
        }
    }
}

struct SearchTask {
    engine: SearchEngine,
    pipeline: EnrichmentPipeline,
    limit: usize,
    debounce: Duration,
    state: Arc<watch::Sender<SearchState>>,
}

impl SearchTask {
    async fn run(self, generation: u64, query: String) {
        tokio::time::sleep(self.debounce).await;

        let SearchTask {
            engine,
            pipeline,
            limit,
            state,
            ..
        } = self;
        let fallback = Arc::clone(&state);
        let lookup = query.clone();
        // Committing from the worker keeps the generation check in force after
        // this task is aborted by a newer query.
        let worker = tokio::task::spawn_blocking(move || {
            let results = pipeline.enrich(engine.search(&lookup, limit));
            publish(&state, generation, &lookup, results);
        });
        if let Err(err) = worker.await {
            warn!(%query, error = %err, "search task failed");
            publish(&fallback, generation, &query, Vec::new());
        }
    }
}

/// Stores `results` only if `generation` is still current.
fn publish(
    state: &watch::Sender<SearchState>,
    generation: u64,
    query: &str,
    results: Vec<ItemRecord>,
) {
    let hits = results.len();
    let committed = state.send_if_modified(|current| {
        if current.generation != generation {
            return false;
        }
        current.results = results;
        current.searching = false;
        true
    });
    if committed {
        debug!(query, generation, hits, "published search results");
    } else {
        debug!(query, generation, "dropped stale search results");
    }
}

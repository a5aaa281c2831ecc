// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Scripted collaborators for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::config::RepositoryLocation;
use crate::errors::{ProbeError, StoreError};
use crate::graph::{Graph, Iri};
use crate::traits::{FileProbe, GraphStore, ProbeOutcome};

/// A graph store that answers queries by substring match.
///
/// The first rule whose needle occurs in the query text wins. Queries no rule
/// matches return an empty graph.
#[derive(Default)]
pub struct StubGraphStore {
    rules: Vec<(String, Result<Graph, StoreError>)>,
    queries: Mutex<Vec<(String, Vec<Iri>)>>,
}

impl StubGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, needle: impl Into<String>, graph: Graph) -> Self {
        self.rules.push((needle.into(), Ok(graph)));
        self
    }

    pub fn fail(mut self, needle: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules.push((
            needle.into(),
            Err(StoreError::Query {
                message: message.into(),
            }),
        ));
        self
    }

    /// Every query evaluated so far, with its contexts.
    pub fn queries(&self) -> Vec<(String, Vec<Iri>)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphStore for StubGraphStore {
    async fn evaluate(&self, query: &str, contexts: &[Iri]) -> Result<Graph, StoreError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), contexts.to_vec()));
        self.rules
            .iter()
            .find(|(needle, _)| query.contains(needle.as_str()))
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| Ok(Graph::new()))
    }
}

/// A file probe with scripted answers per path.
///
/// Unscripted paths are reported missing. Every probe sleeps for `delay`
/// first; in-flight probes are counted so tests can assert the concurrency
/// bound. Locations are recorded in call order.
#[derive(Default)]
pub struct StubFileProbe {
    answers: HashMap<String, Result<ProbeOutcome, ProbeError>>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
    locations: Mutex<Vec<RepositoryLocation>>,
}

impl StubFileProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(mut self, path: impl Into<String>) -> Self {
        self.answers.insert(path.into(), Ok(ProbeOutcome::Exists));
        self
    }

    pub fn error(mut self, path: impl Into<String>, error: ProbeError) -> Self {
        self.answers.insert(path.into(), Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn locations(&self) -> Vec<RepositoryLocation> {
        self.locations.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileProbe for StubFileProbe {
    async fn probe(&self, location: &RepositoryLocation, path: &str) -> Result<ProbeOutcome, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.locations.lock().unwrap().push(location.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.answers
            .get(path)
            .cloned()
            .unwrap_or(Ok(ProbeOutcome::Missing))
    }
}

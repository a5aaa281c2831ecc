// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concurrent verification of file references against their repositories.
//!
//! Every reference is probed on its own task. A semaphore bounds the number
//! of probes in flight and one deadline covers the whole pass; probes still
//! running at the deadline fail with [`ProbeError::Timeout`]. A failed probe
//! only affects its own reference.
//!
//! Each alias is resolved to a [`RepositoryLocation`] before the existence
//! check runs; verified references carry that location.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

use crate::backends::file_reference::{FileReference, FileReferenceId};
use crate::config::RepositoryLocation;
use crate::engine::extraction::RejectedReference;
use crate::errors::{ProbeError, UnverifiedReferenceError};
use crate::observability::messages::file_reference::{ReferenceUnverified, VerificationCompleted};
use crate::observability::messages::StructuredLog;
use crate::traits::{FileProbe, ProbeOutcome, RepositoryAliases};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnverifiedReference {
    pub reference: FileReference,
    pub error: UnverifiedReferenceError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub verified: Vec<FileReference>,
    pub unverified: Vec<UnverifiedReference>,
    /// Reference subgraphs that never became records. Filled in by the
    /// pipeline from extraction; the verifier leaves it empty.
    pub rejected: Vec<RejectedReference>,
}

impl VerificationReport {
    /// True when every reference was built and confirmed.
    pub fn is_complete(&self) -> bool {
        self.unverified.is_empty() && self.rejected.is_empty()
    }

    pub fn unverified_ids(&self) -> Vec<FileReferenceId> {
        self.unverified.iter().map(|u| u.reference.id().clone()).collect()
    }
}

pub struct ReferenceVerifier {
    aliases: Arc<dyn RepositoryAliases>,
    probe: Arc<dyn FileProbe>,
    max_concurrency: usize,
}

impl ReferenceVerifier {
    pub fn new(aliases: Arc<dyn RepositoryAliases>, probe: Arc<dyn FileProbe>, max_concurrency: usize) -> Self {
        Self {
            aliases,
            probe,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Probe every reference; results keep the input order.
    pub async fn verify(&self, references: Vec<FileReference>, timeout: Duration) -> VerificationReport {
        let started = Instant::now();
        let deadline = tokio::time::Instant::now() + timeout;
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));

        let tasks: Vec<_> = references
            .into_iter()
            .map(|reference| {
                let location = self.location_for(&reference);
                let probe = Arc::clone(&self.probe);
                let semaphore = Arc::clone(&semaphore);
                let path = reference.path().to_string();
                let task = tokio::spawn(probe_one(location, probe, semaphore, path, deadline, timeout));
                (reference, task)
            })
            .collect();

        let mut report = VerificationReport::default();
        for (reference, task) in tasks {
            let outcome = task
                .await
                .unwrap_or_else(|e| Err(ProbeError::Transport(format!("probe task failed: {}", e))));
            let error = match outcome {
                Ok((location, ProbeOutcome::Exists)) => {
                    report.verified.push(reference.with_location(location));
                    continue;
                }
                Ok((_, ProbeOutcome::Missing)) => UnverifiedReferenceError::NotFound,
                Err(e) => UnverifiedReferenceError::Probe(e),
            };
            ReferenceUnverified {
                id: reference.id(),
                path: reference.path(),
                error: &error,
            }
            .log();
            report.unverified.push(UnverifiedReference { reference, error });
        }

        VerificationCompleted {
            verified: report.verified.len(),
            unverified: report.unverified.len(),
            duration: started.elapsed(),
        }
        .log();
        report
    }

    fn location_for(&self, reference: &FileReference) -> Result<RepositoryLocation, ProbeError> {
        let alias = reference.repository_alias();
        let repository = self
            .aliases
            .lookup(alias)
            .ok_or_else(|| ProbeError::UnknownRepository(alias.to_string()))?;
        if repository.protocol != reference.protocol() {
            return Err(ProbeError::ProtocolMismatch {
                alias: alias.to_string(),
                declared: reference.protocol().to_string(),
                configured: repository.protocol.to_string(),
            });
        }
        repository
            .location()
            .map_err(|e| ProbeError::Misconfigured(e.to_string()))
    }
}

async fn probe_one(
    location: Result<RepositoryLocation, ProbeError>,
    probe: Arc<dyn FileProbe>,
    semaphore: Arc<Semaphore>,
    path: String,
    deadline: tokio::time::Instant,
    timeout: Duration,
) -> Result<(RepositoryLocation, ProbeOutcome), ProbeError> {
    let location = location?;
    let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|e| ProbeError::Transport(format!("verification pool closed: {}", e)))?;

    let outcome = tokio::time::timeout_at(deadline, probe.probe(&location, &path)).await;
    match outcome {
        Ok(outcome) => outcome.map(|outcome| (location, outcome)),
        Err(_) => Err(ProbeError::Timeout(timeout)),
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for purl minting and identifier resolution.
//!
//! This module contains message types for logging events related to:
//! * Purl run lifecycle (start, completion)
//! * Individual mints and collision retries
//! * Temporary identifiers that survive past rdf_parsing

use crate::graph::Iri;
use crate::observability::messages::StructuredLog;
use crate::stage::ProcessorStage;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A purl run started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PurlRunStarted<'a> {
    pub subject: Option<&'a Iri>,
    pub factory_count: usize,
    pub triple_count: usize,
}

impl Display for PurlRunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.subject {
            Some(subject) => write!(
                f,
                "Starting purl run for {} with {} factories over {} triples",
                subject, self.factory_count, self.triple_count
            ),
            None => write!(
                f,
                "Starting purl run for whole graph with {} factories over {} triples",
                self.factory_count, self.triple_count
            ),
        }
    }
}

impl StructuredLog for PurlRunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            subject = self.subject.map(Iri::as_str),
            factory_count = self.factory_count,
            triple_count = self.triple_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "purl_run",
            span_name = name,
            subject = self.subject.map(Iri::as_str),
            factory_count = self.factory_count,
        )
    }
}

/// A permanent identifier was minted.
///
/// # Log Level
/// `debug!` - Per-identifier detail
pub struct PurlMinted<'a> {
    pub factory: &'a str,
    pub temporary: &'a Iri,
    pub permanent: &'a Iri,
}

impl Display for PurlMinted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Factory '{}' minted {} for {}",
            self.factory, self.permanent, self.temporary
        )
    }
}

impl StructuredLog for PurlMinted<'_> {
    fn log(&self) {
        tracing::debug!(
            factory = self.factory,
            temporary = self.temporary.as_str(),
            permanent = self.permanent.as_str(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "purl_minted",
            span_name = name,
            factory = self.factory,
            temporary = self.temporary.as_str(),
        )
    }
}

/// A random mint collided with an identifier already assigned in this run.
///
/// # Log Level
/// `warn!` - Unexpected but recovered
pub struct MintCollisionRetried<'a> {
    pub temporary: &'a Iri,
    pub permanent: &'a Iri,
    pub attempt: usize,
}

impl Display for MintCollisionRetried<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Minted {} for {} is already assigned; retrying (attempt {})",
            self.permanent, self.temporary, self.attempt
        )
    }
}

impl StructuredLog for MintCollisionRetried<'_> {
    fn log(&self) {
        tracing::warn!(
            temporary = self.temporary.as_str(),
            permanent = self.permanent.as_str(),
            attempt = self.attempt,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "mint_collision",
            span_name = name,
            temporary = self.temporary.as_str(),
            attempt = self.attempt,
        )
    }
}

/// A purl run completed and the mapping was applied.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PurlRunCompleted {
    pub minted: usize,
    pub triple_count: usize,
    pub duration: Duration,
}

impl Display for PurlRunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Purl run completed: {} identifiers minted, {} triples rewritten in {:?}",
            self.minted, self.triple_count, self.duration
        )
    }
}

impl StructuredLog for PurlRunCompleted {
    fn log(&self) {
        tracing::info!(
            minted = self.minted,
            triple_count = self.triple_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "purl_run_completed",
            span_name = name,
            minted = self.minted,
            duration = ?self.duration,
        )
    }
}

/// Temporary identifiers are still present after rdf_parsing.
///
/// # Log Level
/// `error!` - Blocks the artifact
pub struct UnresolvedIdentifiersFound<'a> {
    pub stage: ProcessorStage,
    pub uris: &'a [Iri],
}

impl Display for UnresolvedIdentifiersFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} unresolved temporary identifier(s) at stage {}",
            self.uris.len(),
            self.stage
        )
    }
}

impl StructuredLog for UnresolvedIdentifiersFound<'_> {
    fn log(&self) {
        tracing::error!(
            stage = %self.stage,
            count = self.uris.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "unresolved_identifiers",
            span_name = name,
            stage = %self.stage,
            count = self.uris.len(),
        )
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for construct query evaluation and the fragments it returns.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A factory's construct query is about to be evaluated.
///
/// # Log Level
/// `debug!` - Query text is verbose
pub struct ConstructQueryIssued<'a> {
    pub factory: &'a str,
    pub query: &'a str,
    pub context_count: usize,
}

impl Display for ConstructQueryIssued<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Evaluating construct query for factory '{}' over {} context(s): {}",
            self.factory, self.context_count, self.query
        )
    }
}

impl StructuredLog for ConstructQueryIssued<'_> {
    fn log(&self) {
        tracing::debug!(
            factory = self.factory,
            context_count = self.context_count,
            query = self.query,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "construct_query",
            span_name = name,
            factory = self.factory,
            context_count = self.context_count,
        )
    }
}

/// The graph store rejected or failed a factory's query. The factory
/// contributes nothing to this run.
///
/// # Log Level
/// `warn!` - Recovered per factory
///
/// # Example
/// ```
/// use rdf_intake::errors::StoreError;
/// use rdf_intake::observability::messages::query::QueryFailed;
///
/// let error = StoreError::Query { message: "syntax error".to_string() };
/// let msg = QueryFailed {
///     factory: "files",
///     error: &error,
/// };
///
/// assert!(msg.to_string().contains("syntax error"));
/// ```
pub struct QueryFailed<'a> {
    pub factory: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for QueryFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Construct query for factory '{}' failed, skipping factory: {}",
            self.factory, self.error
        )
    }
}

impl StructuredLog for QueryFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            factory = self.factory,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "query_failed",
            span_name = name,
            factory = self.factory,
            error = %self.error,
        )
    }
}

/// A factory could not produce a processor for this run.
///
/// # Log Level
/// `error!` - Configuration problem
pub struct ProcessorUnavailable<'a> {
    pub factory: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ProcessorUnavailable<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Factory '{}' could not create a processor: {}",
            self.factory, self.error
        )
    }
}

impl StructuredLog for ProcessorUnavailable<'_> {
    fn log(&self) {
        tracing::error!(
            factory = self.factory,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "processor_unavailable",
            span_name = name,
            factory = self.factory,
            error = %self.error,
        )
    }
}

/// A processor declined a fragment its factory's query returned. Used by
/// both purl runs and file-reference extraction.
///
/// # Log Level
/// `trace!`
///
/// # Example
/// ```
/// use rdf_intake::observability::messages::query::FragmentDeclined;
///
/// let msg = FragmentDeclined {
///     factory: "repository_files",
///     triple_count: 3,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Processor for factory 'repository_files' declined fragment of 3 triples"
/// );
/// ```
pub struct FragmentDeclined<'a> {
    pub factory: &'a str,
    pub triple_count: usize,
}

impl Display for FragmentDeclined<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor for factory '{}' declined fragment of {} triples",
            self.factory, self.triple_count
        )
    }
}

impl StructuredLog for FragmentDeclined<'_> {
    fn log(&self) {
        tracing::trace!(factory = self.factory, triple_count = self.triple_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!("fragment_declined", span_name = name, factory = self.factory)
    }
}

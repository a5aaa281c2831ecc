// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors reported by external collaborators: the graph store, the version
//! resolver, the reference index and remote file probes.

use std::time::Duration;
use thiserror::Error;

use crate::graph::Iri;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not parse or evaluate a query.
    #[error("query rejected by graph store: {message}")]
    Query { message: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Version resolution failures. An IRI the system does not manage is a
/// different condition from a managed IRI that has no current version.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("IRI {0} is not managed by this system")]
    Unmanaged(Iri),

    #[error("no current version found for {0}")]
    NotFound(Iri),
}

/// Failure of a single remote existence probe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("repository alias '{0}' is not configured")]
    UnknownRepository(String),

    #[error("repository '{alias}' is configured for {configured} but the reference declares {declared}")]
    ProtocolMismatch {
        alias: String,
        declared: String,
        configured: String,
    },

    /// The alias resolves to a configuration missing what its protocol needs.
    #[error("repository cannot be reached: {0}")]
    Misconfigured(String),

    #[error("no probe available for {0} repositories")]
    Unsupported(String),

    #[error("transport error: {0}")]
    Transport(String),
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Narrow interfaces to the collaborators this crate consumes but does not own.

use async_trait::async_trait;

use crate::backends::file_reference::{FileReference, FileReferenceId};
use crate::config::{RepositoryConfig, RepositoryLocation};
use crate::errors::{ProbeError, ResolveError, StoreError};
use crate::graph::{Graph, Iri};

/// A connection able to evaluate construct queries over named graphs.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Evaluate `query` over `contexts`. An empty context list means the
    /// store's default graph.
    async fn evaluate(&self, query: &str, contexts: &[Iri]) -> Result<Graph, StoreError>;
}

/// Resolves an ontology or artifact IRI to its currently managed version.
#[async_trait]
pub trait VersionResolver: Send + Sync {
    async fn resolve(&self, iri: &Iri) -> Result<Iri, ResolveError>;
}

/// Read-only lookup of repository connection parameters by alias.
pub trait RepositoryAliases: Send + Sync {
    fn lookup(&self, alias: &str) -> Option<RepositoryConfig>;
}

/// Result of a successful existence probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Exists,
    Missing,
}

/// Read-only existence check of a file in a remote repository.
#[async_trait]
pub trait FileProbe: Send + Sync {
    async fn probe(&self, location: &RepositoryLocation, path: &str) -> Result<ProbeOutcome, ProbeError>;
}

/// Durable index of verified file references per artifact.
#[async_trait]
pub trait ReferenceIndex: Send + Sync {
    /// Store a reference, replacing any reference with the same identity.
    async fn store(&self, reference: FileReference) -> Result<(), StoreError>;

    /// Remove a reference. Returns whether it existed.
    async fn delete(&self, id: &FileReferenceId) -> Result<bool, StoreError>;

    /// References linked from `object`, whatever their reference node.
    async fn by_object(&self, artifact: &Iri, object: &Iri) -> Result<Vec<FileReference>, StoreError>;

    async fn by_repository(&self, artifact: &Iri, alias: &str) -> Result<Vec<FileReference>, StoreError>;
}

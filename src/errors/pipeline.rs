// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::{FileReferenceError, PurlError, ResolveError, StoreError};
use crate::backends::file_reference::FileReferenceId;
use crate::engine::RejectedReference;
use crate::graph::Iri;
use crate::stage::ProcessorStage;

/// Errors returned to callers of the artifact pipeline.
///
/// The two blocking conditions carry the full list of offending identifiers
/// and references so the caller can report every problem at once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A stage after rdf_parsing still sees temporary identifiers.
    #[error("stage {stage} reached with unresolved temporary identifiers: {}", join_iris(.uris))]
    UnresolvedIdentifiers { stage: ProcessorStage, uris: Vec<Iri> },

    /// The artifact has unresolved identifiers, unverified file references,
    /// or reference subgraphs that could not be built.
    #[error(
        "artifact {artifact} cannot be published: {} unresolved identifier(s), {} unverified file reference(s), {} rejected file reference(s)",
        .unresolved.len(),
        .unverified.len(),
        .rejected.len()
    )]
    PublicationBlocked {
        artifact: Iri,
        unresolved: Vec<Iri>,
        unverified: Vec<FileReferenceId>,
        rejected: Vec<RejectedReference>,
    },

    #[error(transparent)]
    Purl(#[from] PurlError),

    #[error(transparent)]
    FileReference(#[from] FileReferenceError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn join_iris(uris: &[Iri]) -> String {
    uris.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

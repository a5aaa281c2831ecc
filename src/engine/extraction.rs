// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! File-reference extraction.
//!
//! Discover → split → build. For the artifact's stage every registered
//! file-reference factory runs its construct query over the artifact's
//! current version graph. Each result is split into one subgraph per
//! reference node and every subgraph is built into a [`FileReference`].
//! Subgraphs that cannot be built are reported as rejected.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::backends::file_reference::{FileReference, FileReferenceId};
use crate::config::FileReferenceRegistry;
use crate::engine::sparql::build_construct_query;
use crate::errors::FileReferenceError;
use crate::graph::Iri;
use crate::observability::messages::file_reference::{ExtractionStarted, FileReferenceRejected};
use crate::observability::messages::query::{ConstructQueryIssued, FragmentDeclined, ProcessorUnavailable, QueryFailed};
use crate::observability::messages::StructuredLog;
use crate::stage::ProcessorStage;
use crate::traits::{GraphStore, VersionResolver};

/// A reference subgraph that could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedReference {
    pub factory: String,
    pub error: FileReferenceError,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Built references; one per reference node, later results replace
    /// earlier ones.
    pub references: Vec<FileReference>,
    pub rejected: Vec<RejectedReference>,
}

pub struct FileReferenceExtractor {
    registry: Arc<FileReferenceRegistry>,
    store: Arc<dyn GraphStore>,
    resolver: Arc<dyn VersionResolver>,
}

impl FileReferenceExtractor {
    pub fn new(
        registry: Arc<FileReferenceRegistry>,
        store: Arc<dyn GraphStore>,
        resolver: Arc<dyn VersionResolver>,
    ) -> Self {
        Self {
            registry,
            store,
            resolver,
        }
    }

    /// Extract references from the current version of `artifact`.
    pub async fn extract(&self, artifact: &Iri, stage: ProcessorStage) -> Result<ExtractionReport, FileReferenceError> {
        let version = self.resolver.resolve(artifact).await?;
        self.extract_from(artifact, std::slice::from_ref(&version), stage, None)
            .await
    }

    /// Extract references from explicit named graphs, optionally scoped to
    /// one object.
    pub async fn extract_from(
        &self,
        artifact: &Iri,
        contexts: &[Iri],
        stage: ProcessorStage,
        object: Option<&Iri>,
    ) -> Result<ExtractionReport, FileReferenceError> {
        let factories = self.registry.by_stage(Some(stage));
        ExtractionStarted {
            artifact,
            stage,
            context_count: contexts.len(),
            factory_count: factories.len(),
        }
        .log();

        let mut references: IndexMap<FileReferenceId, FileReference> = IndexMap::new();
        let mut rejected = Vec::new();

        for factory in &factories {
            let processor = factory.processor().map_err(|e| {
                ProcessorUnavailable {
                    factory: factory.key(),
                    error: &e,
                }
                .log();
                e
            })?;

            let query = build_construct_query(factory.as_ref(), object);
            ConstructQueryIssued {
                factory: factory.key(),
                query: &query,
                context_count: contexts.len(),
            }
            .log();

            let result = match self.store.evaluate(&query, contexts).await {
                Ok(result) => result,
                Err(e) => {
                    QueryFailed {
                        factory: factory.key(),
                        error: &e,
                    }
                    .log();
                    continue;
                }
            };

            for (_, fragment) in result.split_by_anchor(factory.anchor_predicate()) {
                if !processor.can_handle(&fragment) {
                    FragmentDeclined {
                        factory: factory.key(),
                        triple_count: fragment.len(),
                    }
                    .log();
                    continue;
                }
                match processor.build(artifact, &fragment) {
                    Ok(reference) => {
                        references.insert(reference.id().clone(), reference);
                    }
                    Err(error) => {
                        FileReferenceRejected {
                            factory: factory.key(),
                            error: &error,
                        }
                        .log();
                        rejected.push(RejectedReference {
                            factory: factory.key().to_string(),
                            error,
                        });
                    }
                }
            }
        }

        Ok(ExtractionReport {
            references: references.into_values().collect(),
            rejected,
        })
    }
}

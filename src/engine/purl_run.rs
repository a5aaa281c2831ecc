// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Purl generation runs.
//!
//! A run discovers temporary identifiers through every purl factory registered
//! for [`ProcessorStage::RdfParsing`], mints a permanent identifier for each
//! distinct temporary identifier and rewrites the full uploaded graph.
//!
//! * A permanent identifier already present in the upload is a collision,
//!   as is one already assigned in the run.
//! * Factories are tried in registration order. For any one temporary
//!   identifier the first factory whose processor handles it wins; later
//!   factories reuse the existing mapping.
//! * A factory whose query fails contributes nothing and the run continues.
//! * A factory that cannot produce a processor aborts the run.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use crate::backends::purl::{PurlMapping, PurlProcessor, PurlProcessorFactory, PurlReference};
use crate::config::consts::MAX_MINT_ATTEMPTS;
use crate::config::PurlRegistry;
use crate::engine::sparql::build_construct_query;
use crate::errors::PurlError;
use crate::graph::{Graph, Iri};
use crate::observability::messages::purl::{MintCollisionRetried, PurlMinted, PurlRunCompleted, PurlRunStarted};
use crate::observability::messages::query::{ConstructQueryIssued, FragmentDeclined, ProcessorUnavailable, QueryFailed};
use crate::observability::messages::StructuredLog;
use crate::stage::ProcessorStage;
use crate::traits::GraphStore;

/// Run-scoped minting state.
///
/// Minting through a run is idempotent per temporary identifier and
/// injective across them. Permanent identifiers never coincide with an IRI
/// the run was told already exists.
#[derive(Debug, Default)]
pub struct PurlRun {
    mapping: PurlMapping,
    existing: HashSet<Iri>,
}

impl PurlRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// A run over a graph whose node IRIs are `existing`.
    pub fn with_existing<I: IntoIterator<Item = Iri>>(existing: I) -> Self {
        Self {
            mapping: PurlMapping::new(),
            existing: existing.into_iter().collect(),
        }
    }

    /// Permanent identifier for `temporary`, minting one with `processor`
    /// unless this run already has it.
    pub fn mint(&mut self, processor: &dyn PurlProcessor, temporary: &Iri) -> Result<Iri, PurlError> {
        if let Some(existing) = self.mapping.get(temporary) {
            return Ok(existing.clone());
        }

        let mut attempt = 1;
        loop {
            let permanent = processor.mint(temporary)?;
            let reference = PurlReference::new(temporary.clone(), permanent.clone())?;
            let inserted = if self.existing.contains(&permanent) {
                Err(PurlError::Collision {
                    temporary: temporary.clone(),
                    permanent: permanent.clone(),
                    existing: permanent.clone(),
                })
            } else {
                self.mapping.insert(reference)
            };
            match inserted {
                Ok(assigned) => {
                    let assigned = assigned.clone();
                    PurlMinted {
                        factory: processor.name(),
                        temporary,
                        permanent: &assigned,
                    }
                    .log();
                    return Ok(assigned);
                }
                Err(PurlError::Collision { .. }) if attempt < MAX_MINT_ATTEMPTS => {
                    MintCollisionRetried {
                        temporary,
                        permanent: &permanent,
                        attempt,
                    }
                    .log();
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn mapping(&self) -> &PurlMapping {
        &self.mapping
    }

    pub fn into_mapping(self) -> PurlMapping {
        self.mapping
    }
}

/// Result of a purl run: the rewritten graph and the mapping applied to it.
#[derive(Debug, Clone)]
pub struct PurlRunOutcome {
    pub graph: Graph,
    pub mapping: PurlMapping,
}

impl PurlRunOutcome {
    pub fn references(&self) -> Vec<PurlReference> {
        self.mapping.references()
    }
}

pub struct PurlMinter {
    registry: Arc<PurlRegistry>,
    store: Arc<dyn GraphStore>,
}

impl PurlMinter {
    pub fn new(registry: Arc<PurlRegistry>, store: Arc<dyn GraphStore>) -> Self {
        Self { registry, store }
    }

    /// Mint purls for the temporary identifiers in `graph`.
    ///
    /// Discovery queries run against `contexts` in the graph store, either
    /// over the whole upload or scoped to `subject`. The mapping is applied to
    /// `graph` itself.
    pub async fn run(
        &self,
        graph: &Graph,
        contexts: &[Iri],
        subject: Option<&Iri>,
    ) -> Result<PurlRunOutcome, PurlError> {
        let started = Instant::now();
        let factories = self.registry.by_stage(Some(ProcessorStage::RdfParsing));
        let start_msg = PurlRunStarted {
            subject,
            factory_count: factories.len(),
            triple_count: graph.len(),
        };
        let span = start_msg.span("purl_run");
        span.in_scope(|| start_msg.log());

        let mapping = self
            .mint_all(&factories, graph, contexts, subject)
            .instrument(span.clone())
            .await?;

        let rewritten = mapping.apply(graph);
        span.in_scope(|| {
            PurlRunCompleted {
                minted: mapping.len(),
                triple_count: rewritten.len(),
                duration: started.elapsed(),
            }
            .log()
        });

        Ok(PurlRunOutcome {
            graph: rewritten,
            mapping,
        })
    }

    async fn mint_all(
        &self,
        factories: &[Arc<dyn PurlProcessorFactory>],
        graph: &Graph,
        contexts: &[Iri],
        subject: Option<&Iri>,
    ) -> Result<PurlMapping, PurlError> {
        let mut run = PurlRun::with_existing(graph.node_iris().into_iter().cloned());
        for factory in factories {
            let processor = factory.processor().map_err(|e| {
                ProcessorUnavailable {
                    factory: factory.key(),
                    error: &e,
                }
                .log();
                e
            })?;

            let query = build_construct_query(factory.as_ref(), subject);
            ConstructQueryIssued {
                factory: factory.key(),
                query: &query,
                context_count: contexts.len(),
            }
            .log();

            let fragment = match self.store.evaluate(&query, contexts).await {
                Ok(fragment) => fragment,
                Err(e) => {
                    QueryFailed {
                        factory: factory.key(),
                        error: &e,
                    }
                    .log();
                    continue;
                }
            };

            if !processor.can_handle(&fragment) {
                FragmentDeclined {
                    factory: factory.key(),
                    triple_count: fragment.len(),
                }
                .log();
                continue;
            }

            for temporary in processor.temporary_iris(&fragment) {
                run.mint(processor.as_ref(), &temporary)?;
            }
        }
        Ok(run.into_mapping())
    }
}

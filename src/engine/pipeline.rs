// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Artifact pipeline.
//!
//! Drives one uploaded artifact through the processing stages:
//!
//! ```text
//! upload ─► mint_purls ─► ensure_resolved ─► attach_file_references ─► advance ─► publish
//!             (rdf_parsing)    (every later stage)   extract/verify/persist       gate      gate
//! ```
//!
//! Temporary identifiers block every stage after rdf_parsing. Unverified
//! file references, and reference subgraphs that could not be built, block
//! advancing past concrete_axiom_storage and block publication. Every
//! condition comes back as a structured list.

use std::sync::Arc;
use std::time::Duration;

use crate::backends::file_reference::{FileReference, FileReferenceId};
use crate::config::{FileReferenceRegistry, PurlRegistry, VerificationOptions};
use crate::engine::extraction::{ExtractionReport, FileReferenceExtractor, RejectedReference};
use crate::engine::purl_run::{PurlMinter, PurlRunOutcome};
use crate::engine::verification::{ReferenceVerifier, VerificationReport};
use crate::engine::versions::VersionRegistry;
use crate::errors::PipelineError;
use crate::graph::{Graph, Iri};
use crate::observability::messages::file_reference::{ArtifactPublished, FileReferenceDeleted, PublicationRefused};
use crate::observability::messages::purl::UnresolvedIdentifiersFound;
use crate::observability::messages::StructuredLog;
use crate::stage::ProcessorStage;
use crate::traits::{FileProbe, GraphStore, ReferenceIndex, RepositoryAliases};

/// External collaborators the pipeline works with.
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn GraphStore>,
    pub versions: Arc<VersionRegistry>,
    pub aliases: Arc<dyn RepositoryAliases>,
    pub probe: Arc<dyn FileProbe>,
    pub index: Arc<dyn ReferenceIndex>,
}

pub struct ArtifactPipeline {
    purl_registry: Arc<PurlRegistry>,
    minter: PurlMinter,
    extractor: FileReferenceExtractor,
    verifier: ReferenceVerifier,
    index: Arc<dyn ReferenceIndex>,
    versions: Arc<VersionRegistry>,
    verification_timeout: Duration,
}

impl ArtifactPipeline {
    pub fn new(
        purl_registry: Arc<PurlRegistry>,
        file_reference_registry: Arc<FileReferenceRegistry>,
        collaborators: Collaborators,
        verification: &VerificationOptions,
    ) -> Self {
        let Collaborators {
            store,
            versions,
            aliases,
            probe,
            index,
        } = collaborators;

        Self {
            minter: PurlMinter::new(Arc::clone(&purl_registry), Arc::clone(&store)),
            extractor: FileReferenceExtractor::new(file_reference_registry, store, versions.clone()),
            verifier: ReferenceVerifier::new(aliases, probe, verification.get_max_concurrency()),
            purl_registry,
            index,
            versions,
            verification_timeout: verification.get_timeout(),
        }
    }

    /// Mint purls for an upload stored under `contexts` and rewrite it.
    pub async fn mint_purls(
        &self,
        upload: &Graph,
        contexts: &[Iri],
        subject: Option<&Iri>,
    ) -> Result<PurlRunOutcome, PipelineError> {
        Ok(self.minter.run(upload, contexts, subject).await?)
    }

    /// Temporary identifiers still present in `graph`, by the prefixes of
    /// every registered purl factory.
    pub fn unresolved_identifiers(&self, graph: &Graph) -> Vec<Iri> {
        let factories = self.purl_registry.all();
        graph
            .node_iris()
            .into_iter()
            .filter(|iri| {
                factories
                    .iter()
                    .flat_map(|f| f.temporary_prefixes())
                    .any(|prefix| !prefix.is_empty() && iri.as_str().starts_with(prefix.as_str()))
            })
            .cloned()
            .collect()
    }

    /// Fail if `graph` still carries temporary identifiers at any stage
    /// after rdf_parsing.
    pub fn ensure_resolved(&self, graph: &Graph, stage: ProcessorStage) -> Result<(), PipelineError> {
        if stage == ProcessorStage::RdfParsing {
            return Ok(());
        }
        let uris = self.unresolved_identifiers(graph);
        if uris.is_empty() {
            return Ok(());
        }
        UnresolvedIdentifiersFound { stage, uris: &uris }.log();
        Err(PipelineError::UnresolvedIdentifiers { stage, uris })
    }

    /// Extract the artifact's references without verifying them.
    pub async fn extract_file_references(
        &self,
        artifact: &Iri,
        stage: ProcessorStage,
    ) -> Result<ExtractionReport, PipelineError> {
        Ok(self.extractor.extract(artifact, stage).await?)
    }

    /// Extract, verify and persist the artifact's file references.
    ///
    /// Only verified references are written to the index. Subgraphs that
    /// could not be built come back in [`VerificationReport::rejected`].
    pub async fn attach_file_references(
        &self,
        artifact: &Iri,
        stage: ProcessorStage,
    ) -> Result<VerificationReport, PipelineError> {
        let extraction = self.extract_file_references(artifact, stage).await?;
        let mut report = self
            .verifier
            .verify(extraction.references, self.verification_timeout)
            .await;
        report.rejected = extraction.rejected;

        for reference in &report.verified {
            self.index.store(reference.clone()).await?;
        }
        Ok(report)
    }

    /// Gate for leaving `stage`. Returns the next stage, or `None` after the last one.
    pub fn advance(
        &self,
        artifact: &Iri,
        graph: &Graph,
        stage: ProcessorStage,
        report: &VerificationReport,
    ) -> Result<Option<ProcessorStage>, PipelineError> {
        let Some(next) = stage.next() else {
            return Ok(None);
        };
        self.ensure_resolved(graph, next)?;
        if stage >= ProcessorStage::ConcreteAxiomStorage && !report.is_complete() {
            return Err(self.refuse(artifact, Vec::new(), report));
        }
        Ok(Some(next))
    }

    /// Publish the current version of `artifact`.
    ///
    /// Refused with [`PipelineError::PublicationBlocked`] while `graph` has
    /// temporary identifiers or `report` has unverified or rejected references.
    pub async fn publish(
        &self,
        artifact: &Iri,
        graph: &Graph,
        report: &VerificationReport,
    ) -> Result<Iri, PipelineError> {
        let unresolved = self.unresolved_identifiers(graph);
        if !unresolved.is_empty() || !report.is_complete() {
            return Err(self.refuse(artifact, unresolved, report));
        }

        let version = self.versions.publish(artifact).await?;
        ArtifactPublished {
            artifact,
            version: &version,
        }
        .log();
        Ok(version)
    }

    pub async fn file_references(&self, artifact: &Iri, object: &Iri) -> Result<Vec<FileReference>, PipelineError> {
        Ok(self.index.by_object(artifact, object).await?)
    }

    /// Remove a reference from the index. Returns whether it was indexed.
    pub async fn delete_file_reference(&self, id: &FileReferenceId) -> Result<bool, PipelineError> {
        let existed = self.index.delete(id).await?;
        FileReferenceDeleted { id, existed }.log();
        Ok(existed)
    }

    fn refuse(&self, artifact: &Iri, unresolved: Vec<Iri>, report: &VerificationReport) -> PipelineError {
        let unverified = report.unverified_ids();
        let rejected: Vec<RejectedReference> = report.rejected.clone();
        PublicationRefused {
            artifact,
            unresolved: unresolved.len(),
            unverified: unverified.len(),
            rejected: rejected.len(),
        }
        .log();
        PipelineError::PublicationBlocked {
            artifact: artifact.clone(),
            unresolved,
            unverified,
            rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::file_reference::vocabulary::{HAS_FILE_REFERENCE, HTTP_REPOSITORY, PATH, REPOSITORY, REPOSITORY_TYPE};
    use crate::errors::FileReferenceError;
    use crate::backends::file_reference::RepositoryFileReferenceFactory;
    use crate::backends::purl::{MintStrategy, PrefixPurlFactory};
    use crate::backends::stub::{StubFileProbe, StubGraphStore};
    use crate::backends::MemoryReferenceIndex;
    use crate::config::{RepositoryConfig, RepositoryLocation, RepositoryTable};
    use crate::graph::{Literal, Triple};
    use crate::stage::StageSet;

    fn iri(value: &str) -> Iri {
        Iri::new(value).unwrap()
    }

    fn references_graph() -> Graph {
        let mut graph = Graph::new();
        for (reference, path) in [("https://purl.ex/r1", "/a.csv"), ("https://purl.ex/r2", "/b.csv")] {
            graph.insert(Triple::new(iri("https://purl.ex/d1"), HAS_FILE_REFERENCE.clone(), iri(reference)));
            graph.insert(Triple::new(iri(reference), REPOSITORY_TYPE.clone(), HTTP_REPOSITORY.clone()));
            graph.insert(Triple::new(iri(reference), REPOSITORY.clone(), Literal::new_simple_literal("web")));
            graph.insert(Triple::new(iri(reference), PATH.clone(), Literal::new_simple_literal(path)));
        }
        graph
    }

    struct Fixture {
        pipeline: ArtifactPipeline,
        index: Arc<MemoryReferenceIndex>,
        artifact: Iri,
    }

    async fn fixture(probe: StubFileProbe) -> Fixture {
        fixture_with(probe, references_graph()).await
    }

    async fn fixture_with(probe: StubFileProbe, stored: Graph) -> Fixture {
        let purl = Arc::new(PurlRegistry::new("test-purl"));
        purl.add(Arc::new(PrefixPurlFactory::new(
            "temporary",
            StageSet::from([ProcessorStage::RdfParsing]),
            vec!["urn:temp:".to_string()],
            "https://purl.ex/",
            MintStrategy::Deterministic,
        )));
        let files = Arc::new(FileReferenceRegistry::new("test-files"));
        files.add(Arc::new(RepositoryFileReferenceFactory::new(
            "repository_files",
            StageSet::from([ProcessorStage::ConcreteAxiomStorage]),
        )));

        let artifact = iri("https://purl.ex/artifact");
        let versions = Arc::new(VersionRegistry::new());
        versions.manage(artifact.clone()).await;
        versions
            .set_current(&artifact, iri("https://purl.ex/artifact/v1"))
            .await
            .unwrap();

        let index = Arc::new(MemoryReferenceIndex::new());
        let collaborators = Collaborators {
            store: Arc::new(
                StubGraphStore::new()
                    .answer("hasFileReference", stored)
                    .answer("STRSTARTS", temporary_graph()),
            ),
            versions,
            aliases: Arc::new(RepositoryTable::from_configs([RepositoryConfig::http(
                "web",
                "https://data.example.org/",
            )])),
            probe: Arc::new(probe),
            index: index.clone(),
        };

        Fixture {
            pipeline: ArtifactPipeline::new(purl, files, collaborators, &VerificationOptions::default()),
            index,
            artifact,
        }
    }

    fn temporary_graph() -> Graph {
        vec![Triple::new(iri("urn:temp:d1"), iri("http://ex/title"), Literal::new_simple_literal("Data"))]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn test_ensure_resolved_by_stage() {
        let f = fixture(StubFileProbe::new()).await;
        let graph = temporary_graph();

        assert!(f.pipeline.ensure_resolved(&graph, ProcessorStage::RdfParsing).is_ok());
        let err = f
            .pipeline
            .ensure_resolved(&graph, ProcessorStage::OwlAxiomExtraction)
            .unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnresolvedIdentifiers {
                stage: ProcessorStage::OwlAxiomExtraction,
                uris: vec![iri("urn:temp:d1")],
            }
        );
        assert!(f.pipeline.ensure_resolved(&references_graph(), ProcessorStage::Inference).is_ok());
    }

    #[tokio::test]
    async fn test_attach_stores_only_verified_references() {
        let f = fixture(StubFileProbe::new().exists("/a.csv")).await;

        let report = f
            .pipeline
            .attach_file_references(&f.artifact, ProcessorStage::ConcreteAxiomStorage)
            .await
            .unwrap();

        assert_eq!(report.verified.len(), 1);
        assert_eq!(report.unverified.len(), 1);
        assert_eq!(f.index.len().await, 1);

        let stored = f
            .pipeline
            .file_references(&f.artifact, &iri("https://purl.ex/d1"))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].path(), "/a.csv");
        assert_eq!(
            stored[0].location(),
            Some(&RepositoryLocation::Http {
                base_url: "https://data.example.org/".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_advance_and_publish_are_gated() {
        let f = fixture(StubFileProbe::new().exists("/a.csv")).await;
        let resolved = references_graph();
        let report = f
            .pipeline
            .attach_file_references(&f.artifact, ProcessorStage::ConcreteAxiomStorage)
            .await
            .unwrap();

        assert_eq!(
            f.pipeline
                .advance(&f.artifact, &resolved, ProcessorStage::ConsistencyCheck, &report)
                .unwrap(),
            Some(ProcessorStage::ConcreteAxiomStorage)
        );
        let blocked = f
            .pipeline
            .advance(&f.artifact, &resolved, ProcessorStage::ConcreteAxiomStorage, &report)
            .unwrap_err();
        assert!(matches!(blocked, PipelineError::PublicationBlocked { ref unverified, .. } if unverified.len() == 1));

        let refused = f.pipeline.publish(&f.artifact, &temporary_graph(), &report).await.unwrap_err();
        match refused {
            PipelineError::PublicationBlocked {
                unresolved,
                unverified,
                rejected,
                ..
            } => {
                assert!(rejected.is_empty());
                assert_eq!(unresolved, vec![iri("urn:temp:d1")]);
                assert_eq!(unverified.len(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }

        let version = f
            .pipeline
            .publish(&f.artifact, &resolved, &VerificationReport::default())
            .await
            .unwrap();
        assert_eq!(version, iri("https://purl.ex/artifact/v1"));
    }

    #[tokio::test]
    async fn test_rejected_reference_blocks_advance_and_publish() {
        let unknown_type: Graph = vec![
            Triple::new(iri("https://purl.ex/d1"), HAS_FILE_REFERENCE.clone(), iri("https://purl.ex/r1")),
            Triple::new(iri("https://purl.ex/r1"), REPOSITORY_TYPE.clone(), iri("https://ex/FtpRepository")),
            Triple::new(iri("https://purl.ex/r1"), REPOSITORY.clone(), Literal::new_simple_literal("web")),
            Triple::new(iri("https://purl.ex/r1"), PATH.clone(), Literal::new_simple_literal("/a.csv")),
        ]
        .into_iter()
        .collect();
        let f = fixture_with(StubFileProbe::new().exists("/a.csv"), unknown_type).await;

        let report = f
            .pipeline
            .attach_file_references(&f.artifact, ProcessorStage::ConcreteAxiomStorage)
            .await
            .unwrap();

        assert!(report.verified.is_empty());
        assert!(report.unverified.is_empty());
        assert_eq!(report.rejected.len(), 1);
        assert!(matches!(
            report.rejected[0].error,
            FileReferenceError::UnknownRepositoryType { .. }
        ));
        assert!(!report.is_complete());
        assert!(f.index.is_empty().await);

        let blocked = f
            .pipeline
            .advance(&f.artifact, &Graph::new(), ProcessorStage::ConcreteAxiomStorage, &report)
            .unwrap_err();
        assert!(matches!(blocked, PipelineError::PublicationBlocked { ref rejected, .. } if rejected.len() == 1));

        let refused = f.pipeline.publish(&f.artifact, &Graph::new(), &report).await.unwrap_err();
        match refused {
            PipelineError::PublicationBlocked {
                unresolved,
                unverified,
                rejected,
                ..
            } => {
                assert!(unresolved.is_empty());
                assert!(unverified.is_empty());
                assert_eq!(rejected[0].factory, "repository_files");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_advance_past_last_stage() {
        let f = fixture(StubFileProbe::new()).await;
        let next = f
            .pipeline
            .advance(
                &f.artifact,
                &Graph::new(),
                ProcessorStage::InferredAxiomStorage,
                &VerificationReport::default(),
            )
            .unwrap();
        assert_eq!(next, None);
    }

    #[tokio::test]
    async fn test_delete_file_reference() {
        let f = fixture(StubFileProbe::new().exists("/a.csv").exists("/b.csv")).await;
        let report = f
            .pipeline
            .attach_file_references(&f.artifact, ProcessorStage::ConcreteAxiomStorage)
            .await
            .unwrap();
        let id = report.verified[0].id().clone();

        assert!(f.pipeline.delete_file_reference(&id).await.unwrap());
        assert!(!f.pipeline.delete_file_reference(&id).await.unwrap());
        assert_eq!(f.index.len().await, 1);
    }

    #[tokio::test]
    async fn test_mint_purls_clears_unresolved() {
        let f = fixture(StubFileProbe::new()).await;
        let upload = temporary_graph();

        let outcome = f.pipeline.mint_purls(&upload, &[], None).await.unwrap();

        assert_eq!(outcome.mapping.get(&iri("urn:temp:d1")), Some(&iri("https://purl.ex/d1")));
        assert!(f.pipeline.unresolved_identifiers(&outcome.graph).is_empty());
        assert!(f
            .pipeline
            .ensure_resolved(&outcome.graph, ProcessorStage::OwlAxiomExtraction)
            .is_ok());
    }
}

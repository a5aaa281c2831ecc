// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::file_reference::vocabulary::{HAS_FILE_REFERENCE, HTTP_REPOSITORY, PATH, REPOSITORY, REPOSITORY_TYPE};
use crate::backends::stub::{StubFileProbe, StubGraphStore};
use crate::backends::MemoryReferenceIndex;
use crate::config::{Config, FileReferenceRegistry, PurlRegistry, RuntimeBuilder};
use crate::engine::{ArtifactPipeline, VersionRegistry};
use crate::errors::PipelineError;
use crate::graph::{Graph, Iri, Literal, Triple};
use crate::stage::ProcessorStage;
use crate::traits::ReferenceIndex;

/// End-to-end tests of the artifact pipeline built from YAML
#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
purl:
  namespace: https://purl.example.org/
  processors:
    - key: temp_uris
      stages: [rdf_parsing]
      temporary_prefixes: ["urn:temp:"]
      strategy: deterministic
file_references:
  processors:
    - key: repository_files
      stages: [concrete_axiom_storage]
repositories:
  - alias: web
    protocol: http
    base_url: https://data.example.org/
verification:
  max_concurrency: 2
  timeout_seconds: 5
"#;

    fn iri(value: &str) -> Iri {
        Iri::new(value).unwrap()
    }

    /// Upload with a temporary dataset that points at one file.
    fn upload() -> Graph {
        vec![
            Triple::new(iri("urn:temp:dataset"), iri("http://purl.org/dc/terms/title"), Literal::new_simple_literal("Survey")),
            Triple::new(iri("urn:temp:dataset"), HAS_FILE_REFERENCE.clone(), iri("urn:temp:file")),
            Triple::new(iri("urn:temp:file"), REPOSITORY_TYPE.clone(), HTTP_REPOSITORY.clone()),
            Triple::new(iri("urn:temp:file"), REPOSITORY.clone(), Literal::new_simple_literal("web")),
            Triple::new(iri("urn:temp:file"), PATH.clone(), Literal::new_simple_literal("/survey.csv")),
        ]
        .into_iter()
        .collect()
    }

    async fn build_pipeline(probe: StubFileProbe, stored: Graph) -> (ArtifactPipeline, Arc<MemoryReferenceIndex>, Iri) {
        let config: Config = serde_yaml::from_str(CONFIG).unwrap();
        let runtime = RuntimeBuilder::with_registries(
            &config,
            Arc::new(PurlRegistry::new("purl")),
            Arc::new(FileReferenceRegistry::new("file_reference")),
        )
        .unwrap();

        let artifact = iri("https://purl.example.org/artifact");
        let versions = Arc::new(VersionRegistry::new());
        versions.manage(artifact.clone()).await;
        versions
            .set_current(&artifact, iri("https://purl.example.org/artifact/v1"))
            .await
            .unwrap();

        let store = StubGraphStore::new()
            .answer("STRSTARTS", upload())
            .answer("hasFileReference", stored);
        let index = Arc::new(MemoryReferenceIndex::new());
        let pipeline = runtime.pipeline(Arc::new(store), versions, Arc::new(probe), index.clone());
        (pipeline, index, artifact)
    }

    #[tokio::test]
    async fn test_upload_to_publication() {
        // the store holds the rewritten upload once it has been committed
        let committed = {
            let (pipeline, _, _) = build_pipeline(StubFileProbe::new(), Graph::new()).await;
            pipeline.mint_purls(&upload(), &[], None).await.unwrap().graph
        };
        let (pipeline, index, artifact) = build_pipeline(StubFileProbe::new().exists("/survey.csv"), committed.clone()).await;

        let err = pipeline
            .ensure_resolved(&upload(), ProcessorStage::OwlAxiomExtraction)
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnresolvedIdentifiers { ref uris, .. } if uris.len() == 2));

        let outcome = pipeline.mint_purls(&upload(), &[], None).await.unwrap();
        assert_eq!(outcome.graph, committed);
        assert_eq!(outcome.references().len(), 2);

        let mut stage = ProcessorStage::RdfParsing;
        let mut report = Default::default();
        while let Some(next) = pipeline.advance(&artifact, &outcome.graph, stage, &report).unwrap() {
            stage = next;
            if stage == ProcessorStage::ConcreteAxiomStorage {
                report = pipeline.attach_file_references(&artifact, stage).await.unwrap();
            }
        }
        assert_eq!(stage, ProcessorStage::InferredAxiomStorage);
        assert!(report.is_complete());

        let stored = index
            .by_object(&artifact, &iri("https://purl.example.org/dataset"))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].path(), "/survey.csv");
        assert_eq!(stored[0].repository_alias(), "web");

        let version = pipeline.publish(&artifact, &outcome.graph, &report).await.unwrap();
        assert_eq!(version, iri("https://purl.example.org/artifact/v1"));
    }

    #[tokio::test]
    async fn test_missing_file_blocks_after_storage() {
        let committed = {
            let (pipeline, _, _) = build_pipeline(StubFileProbe::new(), Graph::new()).await;
            pipeline.mint_purls(&upload(), &[], None).await.unwrap().graph
        };
        let (pipeline, index, artifact) = build_pipeline(StubFileProbe::new(), committed.clone()).await;

        let report = pipeline
            .attach_file_references(&artifact, ProcessorStage::ConcreteAxiomStorage)
            .await
            .unwrap();
        assert_eq!(report.unverified.len(), 1);
        assert!(index.is_empty().await);

        let err = pipeline
            .advance(&artifact, &committed, ProcessorStage::ConcreteAxiomStorage, &report)
            .unwrap_err();
        assert!(matches!(err, PipelineError::PublicationBlocked { .. }));

        let err = pipeline.publish(&artifact, &committed, &report).await.unwrap_err();
        match err {
            PipelineError::PublicationBlocked { unresolved, unverified, rejected, .. } => {
                assert!(unresolved.is_empty());
                assert!(rejected.is_empty());
                assert_eq!(unverified[0].repository_alias, "web");
                assert_eq!(unverified[0].reference, report.unverified[0].reference.reference().clone());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

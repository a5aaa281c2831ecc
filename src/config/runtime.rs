// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::file_reference::RepositoryFileReferenceFactory;
use crate::backends::purl::PrefixPurlFactory;
use crate::config::validation::validate_config;
use crate::config::{
    file_reference_registry, purl_registry, Config, FileReferenceRegistry, PurlRegistry, RepositoryTable,
    VerificationOptions,
};
use crate::engine::{ArtifactPipeline, Collaborators, VersionRegistry};
use crate::errors::ConfigError;
use crate::traits::{FileProbe, GraphStore, ReferenceIndex};

/// Register one factory per configured processor.
///
/// Purl processors without their own namespace use the shared
/// `purl.namespace`. Returns how many factories were registered.
pub fn register_from_config(cfg: &Config, purl: &PurlRegistry, files: &FileReferenceRegistry) -> usize {
    for processor in &cfg.purl.processors {
        purl.add(Arc::new(PrefixPurlFactory::new(
            processor.key.clone(),
            processor.stages.clone(),
            processor.temporary_prefixes.clone(),
            processor.namespace_or(&cfg.purl.namespace),
            processor.strategy,
        )));
    }
    for processor in &cfg.file_references.processors {
        files.add(Arc::new(RepositoryFileReferenceFactory::new(
            processor.key.clone(),
            processor.stages.clone(),
        )));
    }
    cfg.purl.processors.len() + cfg.file_references.processors.len()
}

/// Everything a configuration file describes, ready to build pipelines from.
pub struct Runtime {
    purl: Arc<PurlRegistry>,
    files: Arc<FileReferenceRegistry>,
    repositories: Arc<RepositoryTable>,
    verification: VerificationOptions,
}

impl Runtime {
    pub fn purl_registry(&self) -> &Arc<PurlRegistry> {
        &self.purl
    }

    pub fn file_reference_registry(&self) -> &Arc<FileReferenceRegistry> {
        &self.files
    }

    pub fn repositories(&self) -> &Arc<RepositoryTable> {
        &self.repositories
    }

    pub fn verification(&self) -> &VerificationOptions {
        &self.verification
    }

    /// Wire a pipeline over the configured registries and repositories.
    pub fn pipeline(
        &self,
        store: Arc<dyn GraphStore>,
        versions: Arc<VersionRegistry>,
        probe: Arc<dyn FileProbe>,
        index: Arc<dyn ReferenceIndex>,
    ) -> ArtifactPipeline {
        ArtifactPipeline::new(
            Arc::clone(&self.purl),
            Arc::clone(&self.files),
            Collaborators {
                store,
                versions,
                aliases: self.repositories.clone(),
                probe,
                index,
            },
            &self.verification,
        )
    }
}

/// Builds a [`Runtime`] from configuration.
///
/// # Examples
///
/// ```
/// use rdf_intake::config::{Config, FileReferenceRegistry, PurlRegistry, RuntimeBuilder};
/// use std::sync::Arc;
///
/// let config: Config = serde_yaml::from_str(
///     r#"
/// purl:
///   namespace: https://purl.example.org/
///   processors:
///     - key: temp_uris
///       stages: [rdf_parsing]
///       temporary_prefixes: ["urn:temp:"]
/// "#,
/// )
/// .unwrap();
///
/// let runtime = RuntimeBuilder::with_registries(
///     &config,
///     Arc::new(PurlRegistry::new("purl")),
///     Arc::new(FileReferenceRegistry::new("file_reference")),
/// )
/// .unwrap();
///
/// assert_eq!(runtime.purl_registry().keys(), vec!["temp_uris".to_string()]);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Validate `cfg` and register its factories in the process-wide registries.
    pub fn from_config(cfg: &Config) -> Result<Runtime, ConfigError> {
        Self::with_registries(cfg, purl_registry(), file_reference_registry())
    }

    /// Validate `cfg` and register its factories in the given registries.
    pub fn with_registries(
        cfg: &Config,
        purl: Arc<PurlRegistry>,
        files: Arc<FileReferenceRegistry>,
    ) -> Result<Runtime, ConfigError> {
        validate_config(cfg).map_err(ConfigError::Invalid)?;
        register_from_config(cfg, &purl, &files);
        Ok(Runtime {
            purl,
            files,
            repositories: Arc::new(RepositoryTable::from_configs(cfg.repositories.clone())),
            verification: cfg.verification.clone(),
        })
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::backends::purl::MintStrategy;
use crate::config::consts::{DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT_SECONDS};
use crate::config::validation::validate_config;
use crate::config::RepositoryConfig;
use crate::errors::ConfigError;
use crate::stage::StageSet;

/// Top-level configuration of the intake pipeline.
///
/// # Fields
/// * `purl` - Namespace and processors for permanent identifier minting
/// * `file_references` - File-reference processors
/// * `repositories` - Remote file repositories, looked up by alias
/// * `verification` - Limits for repository existence probes
///
/// # Example
/// ```yaml
/// purl:
///   namespace: https://purl.example.org/project/
///   processors:
///     - key: temp_uris
///       stages: [rdf_parsing]
///       temporary_prefixes: ["urn:temp:"]
///       strategy: random
/// file_references:
///   processors:
///     - key: repository_files
///       stages: [concrete_axiom_storage]
/// repositories:
///   - alias: web
///     protocol: http
///     base_url: https://data.example.org/files/
/// verification:
///   max_concurrency: 4
///   timeout_seconds: 20
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub purl: PurlConfig,
    #[serde(default)]
    pub file_references: FileReferenceConfig,
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,
    #[serde(default)]
    pub verification: VerificationOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurlConfig {
    /// Prefix of every minted identifier.
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub processors: Vec<PurlProcessorConfig>,
}

/// One purl factory.
///
/// `namespace` overrides the shared namespace for this factory only.
#[derive(Debug, Clone, Deserialize)]
pub struct PurlProcessorConfig {
    pub key: String,
    #[serde(default)]
    pub stages: StageSet,
    #[serde(default)]
    pub temporary_prefixes: Vec<String>,
    #[serde(default)]
    pub strategy: MintStrategy,
    pub namespace: Option<String>,
}

impl PurlProcessorConfig {
    pub fn namespace_or<'a>(&'a self, shared: &'a str) -> &'a str {
        self.namespace.as_deref().unwrap_or(shared)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileReferenceConfig {
    #[serde(default)]
    pub processors: Vec<FileReferenceProcessorConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileReferenceProcessorConfig {
    pub key: String,
    #[serde(default)]
    pub stages: StageSet,
}

/// Limits for repository probes. Unset values fall back to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationOptions {
    pub max_concurrency: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

impl VerificationOptions {
    pub fn get_max_concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY)
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

/// Load a config from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load a config from a YAML file and validate it.
///
/// Every validation problem is reported at once in [`ConfigError::Invalid`].
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepositoryProtocol;
    use crate::errors::ValidationError;
    use crate::stage::ProcessorStage;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
purl:
  namespace: https://purl.example.org/
  processors:
    - key: temp_uris
      stages: [rdf_parsing]
      temporary_prefixes: ["urn:temp:"]
    - key: drafts
      stages: [rdf_parsing]
      temporary_prefixes: ["urn:draft:"]
      strategy: deterministic
      namespace: https://purl.example.org/drafts/
file_references:
  processors:
    - key: repository_files
      stages: [concrete_axiom_storage, inference]
repositories:
  - alias: archive
    protocol: ssh
    host: files.example.org
    port: 2222
    fingerprint: "SHA256:abc"
    credential: archive-key
verification:
  max_concurrency: 2
"#;

        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.purl.processors.len(), 2);
        assert_eq!(cfg.purl.processors[0].strategy, MintStrategy::Random);
        assert_eq!(cfg.purl.processors[1].strategy, MintStrategy::Deterministic);
        assert_eq!(
            cfg.purl.processors[1].namespace_or(&cfg.purl.namespace),
            "https://purl.example.org/drafts/"
        );
        assert!(cfg.file_references.processors[0].stages.contains(ProcessorStage::Inference));
        assert_eq!(cfg.repositories[0].protocol, RepositoryProtocol::Ssh);
        assert_eq!(cfg.repositories[0].port, 2222);
        assert_eq!(cfg.verification.get_max_concurrency(), 2);
        assert_eq!(cfg.verification.get_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let file = write_config(
            r#"
purl:
  namespace: https://purl.example.org/
  processors:
    - key: temp_uris
      stages: [rdf_parsing]
      temporary_prefixes: ["urn:temp:"]
"#,
        );

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.purl.processors[0].key, "temp_uris");
    }

    #[test]
    fn test_load_and_validate_reports_every_problem() {
        let file = write_config(
            r#"
purl:
  namespace: https://purl.example.org/
  processors:
    - key: temp_uris
      stages: []
      temporary_prefixes: []
"#,
        );

        let err = load_and_validate_config(file.path()).unwrap_err();
        match err {
            ConfigError::Invalid(errors) => {
                assert!(errors.contains(&ValidationError::EmptyStageSet { key: "temp_uris".to_string() }));
                assert!(errors.contains(&ValidationError::MissingTemporaryPrefixes { key: "temp_uris".to_string() }));
            }
            other => panic!("expected validation failure, got {}", other),
        }
    }

    #[test]
    fn test_load_config_errors() {
        let missing = load_config("/nonexistent/rdf-intake.yaml");
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        let file = write_config("purl: [not, a, map]");
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));

        let file = write_config("purl:\n  processors:\n    - key: x\n      stages: [tokenizing]\n");
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let cfg: Config = serde_yaml::from_str("{}").unwrap();
        assert!(cfg.purl.processors.is_empty());
        assert!(cfg.repositories.is_empty());
        assert_eq!(cfg.verification.get_max_concurrency(), DEFAULT_MAX_CONCURRENCY);
    }
}

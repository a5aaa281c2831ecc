// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::config::consts::MAX_TIMEOUT_SECONDS;
use crate::config::Config;
use crate::errors::ValidationError;
use crate::graph::parse_iri;
use crate::stage::ProcessorStage;

/// Validate a loaded configuration.
///
/// Checks:
/// * every processor declares at least one stage
/// * purl processors have temporary prefixes, none of them blank, and only
///   run during rdf_parsing
/// * processor keys are unique within their family
/// * namespaces can prefix a valid IRI
/// * repository aliases are unique and each repository is complete for its protocol
/// * verification limits are in range
///
/// All problems are collected; the error list is never empty.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_purl(config, &mut errors);
    validate_file_references(config, &mut errors);
    validate_repositories(config, &mut errors);
    validate_verification(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_purl(config: &Config, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    let mut namespaces_checked = HashSet::new();

    for processor in &config.purl.processors {
        if !seen.insert(processor.key.as_str()) {
            errors.push(ValidationError::DuplicateProcessorKey {
                key: processor.key.clone(),
            });
        }
        if processor.stages.is_empty() {
            errors.push(ValidationError::EmptyStageSet {
                key: processor.key.clone(),
            });
        }
        for stage in processor.stages.iter().filter(|s| *s != ProcessorStage::RdfParsing) {
            errors.push(ValidationError::PurlStageOutOfRange {
                key: processor.key.clone(),
                stage,
            });
        }
        if processor.temporary_prefixes.is_empty() {
            errors.push(ValidationError::MissingTemporaryPrefixes {
                key: processor.key.clone(),
            });
        } else if processor.temporary_prefixes.iter().any(|p| p.trim().is_empty()) {
            errors.push(ValidationError::EmptyTemporaryPrefix {
                key: processor.key.clone(),
            });
        }

        let namespace = processor.namespace_or(&config.purl.namespace);
        if namespaces_checked.insert(namespace) {
            if let Some(error) = check_namespace(namespace) {
                errors.push(error);
            }
        }
    }
}

fn check_namespace(namespace: &str) -> Option<ValidationError> {
    if namespace.trim().is_empty() {
        return Some(ValidationError::InvalidNamespace {
            namespace: namespace.to_string(),
            reason: "namespace is empty".to_string(),
        });
    }
    parse_iri(format!("{}0", namespace))
        .err()
        .map(|e| ValidationError::InvalidNamespace {
            namespace: namespace.to_string(),
            reason: e.to_string(),
        })
}

fn validate_file_references(config: &Config, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for processor in &config.file_references.processors {
        if !seen.insert(processor.key.as_str()) {
            errors.push(ValidationError::DuplicateProcessorKey {
                key: processor.key.clone(),
            });
        }
        if processor.stages.is_empty() {
            errors.push(ValidationError::EmptyStageSet {
                key: processor.key.clone(),
            });
        }
    }
}

fn validate_repositories(config: &Config, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for repository in &config.repositories {
        if !seen.insert(repository.alias.as_str()) {
            errors.push(ValidationError::DuplicateRepositoryAlias {
                alias: repository.alias.clone(),
            });
        }
        errors.extend(repository.validate());
    }
}

fn validate_verification(config: &Config, errors: &mut Vec<ValidationError>) {
    if config.verification.max_concurrency == Some(0) {
        errors.push(ValidationError::InvalidVerificationOption {
            option: "max_concurrency",
            reason: "must be at least 1".to_string(),
        });
    }
    if let Some(timeout) = config.verification.timeout_seconds {
        if timeout == 0 || timeout > MAX_TIMEOUT_SECONDS {
            errors.push(ValidationError::InvalidVerificationOption {
                option: "timeout_seconds",
                reason: format!("must be between 1 and {}", MAX_TIMEOUT_SECONDS),
            });
        }
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::stage::ProcessorStage;

/// Problems found while validating a loaded configuration.
///
/// Validation collects every problem instead of stopping at the first one so
/// that a broken configuration file can be fixed in a single pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A processor declares no stages and would never be selected.
    #[error("Processor '{key}' declares no stages")]
    EmptyStageSet { key: String },

    /// A purl processor has nothing to detect.
    #[error("Purl processor '{key}' has no temporary URI prefixes")]
    MissingTemporaryPrefixes { key: String },

    /// A blank prefix matches every IRI.
    #[error("Purl processor '{key}' has a blank temporary URI prefix")]
    EmptyTemporaryPrefix { key: String },

    /// A purl processor is registered for a stage where identifiers are
    /// already expected to be permanent.
    #[error("Purl processor '{key}' declares stage '{stage}'; purls are minted during rdf_parsing only")]
    PurlStageOutOfRange { key: String, stage: ProcessorStage },

    /// Two processors of the same category share a key.
    #[error("Duplicate processor key: '{key}'")]
    DuplicateProcessorKey { key: String },

    /// The purl namespace cannot prefix a valid IRI.
    #[error("Invalid purl namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    /// Two repositories share an alias.
    #[error("Duplicate repository alias: '{alias}'")]
    DuplicateRepositoryAlias { alias: String },

    /// A repository lacks a field its protocol needs.
    #[error("Repository '{alias}' is missing required field '{field}'")]
    IncompleteRepository { alias: String, field: &'static str },

    /// A verification option is out of range.
    #[error("Invalid verification option '{option}': {reason}")]
    InvalidVerificationOption { option: &'static str, reason: String },
}

/// Errors surfaced by configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation failed:\n{}", join_lines(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::vocabulary::{HAS_FILE_REFERENCE, PATH, RDFS_LABEL, REPOSITORY, REPOSITORY_TYPE};
use super::{FileReferenceProcessor, RepositoryFileReferenceProcessor};
use crate::errors::ProcessorError;
use crate::graph::Iri;
use crate::stage::StageSet;
use crate::traits::{ConstructPattern, ProcessorFactory};

/// Factory of file-reference processors, registered in the file-reference
/// registry.
pub trait FileReferenceProcessorFactory: ProcessorFactory + ConstructPattern {
    /// Predicate whose subjects are reference nodes. Construct results are
    /// split into one subgraph per such node before building.
    fn anchor_predicate(&self) -> &Iri;

    fn processor(&self) -> Result<Box<dyn FileReferenceProcessor>, ProcessorError>;
}

/// Extracts references described with the repository vocabulary.
#[derive(Debug, Clone)]
pub struct RepositoryFileReferenceFactory {
    key: String,
    stages: StageSet,
    construct_bgp: String,
    where_clause: String,
}

impl RepositoryFileReferenceFactory {
    pub fn new(key: impl Into<String>, stages: StageSet) -> Self {
        let required = format!(
            "?object {has} ?reference . ?reference {kind} ?type . ?reference {repo} ?alias . ?reference {path} ?path .",
            has = *HAS_FILE_REFERENCE,
            kind = *REPOSITORY_TYPE,
            repo = *REPOSITORY,
            path = *PATH,
        );
        let label = format!("?reference {} ?label .", *RDFS_LABEL);

        Self {
            key: key.into(),
            stages,
            construct_bgp: format!("{} {}", required, label),
            where_clause: format!("{} OPTIONAL {{ {} }}", required, label),
        }
    }
}

impl ProcessorFactory for RepositoryFileReferenceFactory {
    fn key(&self) -> &str {
        &self.key
    }

    fn stages(&self) -> &StageSet {
        &self.stages
    }

    fn is_thread_safe(&self) -> bool {
        true
    }
}

impl ConstructPattern for RepositoryFileReferenceFactory {
    fn construct_bgp(&self) -> &str {
        &self.construct_bgp
    }

    fn where_clause(&self) -> &str {
        &self.where_clause
    }

    fn bind_variable(&self) -> &str {
        "object"
    }
}

impl FileReferenceProcessorFactory for RepositoryFileReferenceFactory {
    fn anchor_predicate(&self) -> &Iri {
        &REPOSITORY_TYPE
    }

    fn processor(&self) -> Result<Box<dyn FileReferenceProcessor>, ProcessorError> {
        if self.key.trim().is_empty() {
            return Err(ProcessorError::Configuration {
                key: self.key.clone(),
                reason: "file reference factory has an empty key".to_string(),
            });
        }
        Ok(Box::new(RepositoryFileReferenceProcessor::new(self.key.clone())))
    }
}

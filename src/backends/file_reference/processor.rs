// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::vocabulary::{HAS_FILE_REFERENCE, HTTP_REPOSITORY, PATH, RDFS_LABEL, REPOSITORY, REPOSITORY_TYPE, SSH_REPOSITORY};
use super::{FileReference, FileReferenceId};
use crate::config::RepositoryProtocol;
use crate::errors::FileReferenceError;
use crate::graph::{Graph, Iri, Subject, SubjectExt, Term, TermExt};
use crate::traits::Processor;

/// A processor that materializes one file reference from one split subgraph.
pub trait FileReferenceProcessor: Processor {
    fn build(&self, artifact: &Iri, fragment: &Graph) -> Result<FileReference, FileReferenceError>;
}

/// Reads references described with the repository vocabulary in
/// [`vocabulary`](super::vocabulary).
#[derive(Debug, Clone)]
pub struct RepositoryFileReferenceProcessor {
    name: String,
}

impl RepositoryFileReferenceProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn anchor(fragment: &Graph) -> Option<(&Subject, &Term)> {
        fragment
            .iter()
            .find(|t| t.predicate == *REPOSITORY_TYPE)
            .map(|t| (&t.subject, &t.object))
    }

    fn protocol(anchor: &Subject, repository_type: &Term) -> Result<RepositoryProtocol, FileReferenceError> {
        match repository_type.iri() {
            Some(iri) if iri == &*SSH_REPOSITORY => Ok(RepositoryProtocol::Ssh),
            Some(iri) if iri == &*HTTP_REPOSITORY => Ok(RepositoryProtocol::Http),
            _ => Err(FileReferenceError::UnknownRepositoryType {
                subject: anchor.to_string(),
                value: repository_type.to_string(),
            }),
        }
    }

    fn required_literal(
        fragment: &Graph,
        anchor: &Subject,
        predicate: &Iri,
        property: &'static str,
    ) -> Result<String, FileReferenceError> {
        fragment
            .object_of(anchor, predicate)
            .and_then(TermExt::literal)
            .map(|literal| literal.value().trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or_else(|| FileReferenceError::MissingProperty {
                subject: anchor.to_string(),
                property,
            })
    }

    fn linking_object(fragment: &Graph, anchor: &Subject) -> Option<Iri> {
        let anchor_term = Term::from(anchor.clone());
        fragment
            .iter()
            .filter(|t| t.predicate == *HAS_FILE_REFERENCE && t.object == anchor_term)
            .find_map(|t| t.subject.iri().cloned())
    }
}

impl Processor for RepositoryFileReferenceProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    /// Any fragment with a repository type is handled; an unsupported type
    /// is reported by [`FileReferenceProcessor::build`].
    fn can_handle(&self, fragment: &Graph) -> bool {
        Self::anchor(fragment).is_some()
    }
}

impl FileReferenceProcessor for RepositoryFileReferenceProcessor {
    fn build(&self, artifact: &Iri, fragment: &Graph) -> Result<FileReference, FileReferenceError> {
        let (anchor, repository_type) = Self::anchor(fragment).ok_or_else(|| FileReferenceError::MissingProperty {
            subject: "(empty fragment)".to_string(),
            property: "repositoryType",
        })?;

        let protocol = Self::protocol(anchor, repository_type)?;
        let object = Self::linking_object(fragment, anchor).ok_or_else(|| FileReferenceError::Unlinked {
            subject: anchor.to_string(),
        })?;
        let alias = Self::required_literal(fragment, anchor, &REPOSITORY, "repository")?;
        let path = Self::required_literal(fragment, anchor, &PATH, "path")?;

        let id = FileReferenceId::new(artifact.clone(), anchor.clone(), alias);
        let reference = FileReference::new(id, object, path, protocol);
        let label = fragment
            .object_of(anchor, &RDFS_LABEL)
            .and_then(TermExt::literal)
            .map(|literal| literal.value().to_string());

        Ok(match label {
            Some(label) => reference.with_label(label),
            None => reference,
        })
    }
}

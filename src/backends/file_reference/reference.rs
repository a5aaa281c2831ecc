// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::config::{RepositoryLocation, RepositoryProtocol};
use crate::graph::{Iri, Subject};

/// Identity of a file reference: which reference node of which artifact
/// points into which repository.
///
/// The reference node is the subject carrying the repository type, so two
/// references from one object into the same repository stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileReferenceId {
    pub artifact: Iri,
    pub reference: Subject,
    pub repository_alias: String,
}

impl FileReferenceId {
    pub fn new(artifact: Iri, reference: impl Into<Subject>, repository_alias: impl Into<String>) -> Self {
        Self {
            artifact,
            reference: reference.into(),
            repository_alias: repository_alias.into(),
        }
    }
}

impl fmt::Display for FileReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @{}", self.artifact, self.reference, self.repository_alias)
    }
}

/// A file reference record.
///
/// `object` is the artifact object linking to the reference and is what the
/// index is queried by. `location` stays unset until the repository alias has
/// been resolved during verification.
///
/// Records are never changed in place; the `with_*` methods return a new
/// record that replaces the old one in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    id: FileReferenceId,
    object: Iri,
    label: Option<String>,
    path: String,
    protocol: RepositoryProtocol,
    location: Option<RepositoryLocation>,
}

impl FileReference {
    pub fn new(id: FileReferenceId, object: Iri, path: impl Into<String>, protocol: RepositoryProtocol) -> Self {
        Self {
            id,
            object,
            label: None,
            path: path.into(),
            protocol,
            location: None,
        }
    }

    pub fn id(&self) -> &FileReferenceId {
        &self.id
    }

    pub fn artifact(&self) -> &Iri {
        &self.id.artifact
    }

    pub fn reference(&self) -> &Subject {
        &self.id.reference
    }

    pub fn object(&self) -> &Iri {
        &self.object
    }

    pub fn repository_alias(&self) -> &str {
        &self.id.repository_alias
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Protocol declared by the reference's repository type.
    pub fn protocol(&self) -> RepositoryProtocol {
        self.protocol
    }

    pub fn location(&self) -> Option<&RepositoryLocation> {
        self.location.as_ref()
    }

    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..self.clone()
        }
    }

    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..self.clone()
        }
    }

    pub fn with_location(&self, location: RepositoryLocation) -> Self {
        Self {
            location: Some(location),
            ..self.clone()
        }
    }
}

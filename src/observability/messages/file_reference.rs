// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for file-reference extraction, verification and publication.

use crate::backends::file_reference::FileReferenceId;
use crate::graph::Iri;
use crate::observability::messages::StructuredLog;
use crate::stage::ProcessorStage;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Extraction of file references started for an artifact.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExtractionStarted<'a> {
    pub artifact: &'a Iri,
    pub stage: ProcessorStage,
    pub context_count: usize,
    pub factory_count: usize,
}

impl Display for ExtractionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Extracting file references for {} at stage {} from {} context(s) with {} factories",
            self.artifact, self.stage, self.context_count, self.factory_count
        )
    }
}

impl StructuredLog for ExtractionStarted<'_> {
    fn log(&self) {
        tracing::info!(
            artifact = self.artifact.as_str(),
            stage = %self.stage,
            context_count = self.context_count,
            factory_count = self.factory_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "file_reference_extraction",
            span_name = name,
            artifact = self.artifact.as_str(),
            stage = %self.stage,
        )
    }
}

/// A reference subgraph could not be built into a record.
///
/// # Log Level
/// `warn!` - Reported back to the caller as rejected
pub struct FileReferenceRejected<'a> {
    pub factory: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for FileReferenceRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Factory '{}' rejected a file reference: {}", self.factory, self.error)
    }
}

impl StructuredLog for FileReferenceRejected<'_> {
    fn log(&self) {
        tracing::warn!(factory = self.factory, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "file_reference_rejected",
            span_name = name,
            factory = self.factory,
            error = %self.error,
        )
    }
}

/// A reference could not be confirmed in its repository.
///
/// # Log Level
/// `warn!` - Blocks publication
pub struct ReferenceUnverified<'a> {
    pub id: &'a FileReferenceId,
    pub path: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ReferenceUnverified<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "File reference {} ({}) unverified: {}", self.id, self.path, self.error)
    }
}

impl StructuredLog for ReferenceUnverified<'_> {
    fn log(&self) {
        tracing::warn!(
            reference = %self.id.reference,
            repository = self.id.repository_alias.as_str(),
            path = self.path,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "reference_unverified",
            span_name = name,
            reference = %self.id.reference,
            repository = self.id.repository_alias.as_str(),
        )
    }
}

/// A verification pass finished.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use rdf_intake::observability::messages::file_reference::VerificationCompleted;
/// use std::time::Duration;
///
/// let msg = VerificationCompleted {
///     verified: 3,
///     unverified: 1,
///     duration: Duration::from_millis(120),
/// };
///
/// assert_eq!(msg.to_string(), "Verification completed: 3 verified, 1 unverified in 120ms");
/// ```
pub struct VerificationCompleted {
    pub verified: usize,
    pub unverified: usize,
    pub duration: Duration,
}

impl Display for VerificationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Verification completed: {} verified, {} unverified in {:?}",
            self.verified, self.unverified, self.duration
        )
    }
}

impl StructuredLog for VerificationCompleted {
    fn log(&self) {
        tracing::info!(
            verified = self.verified,
            unverified = self.unverified,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "verification_completed",
            span_name = name,
            verified = self.verified,
            unverified = self.unverified,
        )
    }
}

/// Publication of an artifact was refused.
///
/// # Log Level
/// `error!` - Caller must fix the artifact
pub struct PublicationRefused<'a> {
    pub artifact: &'a Iri,
    pub unresolved: usize,
    pub unverified: usize,
    pub rejected: usize,
}

impl Display for PublicationRefused<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Refusing to publish {}: {} unresolved identifier(s), {} unverified file reference(s), {} rejected file reference(s)",
            self.artifact, self.unresolved, self.unverified, self.rejected
        )
    }
}

impl StructuredLog for PublicationRefused<'_> {
    fn log(&self) {
        tracing::error!(
            artifact = self.artifact.as_str(),
            unresolved = self.unresolved,
            unverified = self.unverified,
            rejected = self.rejected,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "publication_refused",
            span_name = name,
            artifact = self.artifact.as_str(),
        )
    }
}

pub struct ArtifactPublished<'a> {
    pub artifact: &'a Iri,
    pub version: &'a Iri,
}

impl Display for ArtifactPublished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Published {} at version {}", self.artifact, self.version)
    }
}

impl StructuredLog for ArtifactPublished<'_> {
    fn log(&self) {
        tracing::info!(
            artifact = self.artifact.as_str(),
            version = self.version.as_str(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "artifact_published",
            span_name = name,
            artifact = self.artifact.as_str(),
            version = self.version.as_str(),
        )
    }
}

pub struct FileReferenceDeleted<'a> {
    pub id: &'a FileReferenceId,
    pub existed: bool,
}

impl Display for FileReferenceDeleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.existed {
            write!(f, "Deleted file reference {}", self.id)
        } else {
            write!(f, "File reference {} was not indexed; nothing deleted", self.id)
        }
    }
}

impl StructuredLog for FileReferenceDeleted<'_> {
    fn log(&self) {
        tracing::info!(
            reference = %self.id.reference,
            repository = self.id.repository_alias.as_str(),
            existed = self.existed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "file_reference_deleted",
            span_name = name,
            reference = %self.id.reference,
        )
    }
}

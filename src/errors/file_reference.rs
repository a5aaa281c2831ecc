// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::{GraphError, ProbeError, ProcessorError, ResolveError, StoreError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileReferenceError {
    /// A reference subgraph lacks a property the reference record requires.
    #[error("file reference {subject} has no {property}")]
    MissingProperty { subject: String, property: &'static str },

    #[error("file reference {subject} declares unsupported repository type {value}")]
    UnknownRepositoryType { subject: String, value: String },

    #[error("file reference {subject} is not linked from any artifact object")]
    Unlinked { subject: String },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// Why one reference could not be confirmed in its repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnverifiedReferenceError {
    #[error("file not found in repository")]
    NotFound,

    #[error(transparent)]
    Probe(#[from] ProbeError),
}

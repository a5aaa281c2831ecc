// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! File-reference processors.
//!
//! A file reference is a typed pointer from an artifact object to a file kept
//! in an external SSH or HTTP repository. Factories here declare the construct
//! pattern that finds reference subgraphs; their processors turn one split
//! subgraph into a [`FileReference`] record.

mod factory;
mod processor;
mod reference;
pub mod vocabulary;

pub use factory::{FileReferenceProcessorFactory, RepositoryFileReferenceFactory};
pub use processor::{FileReferenceProcessor, RepositoryFileReferenceProcessor};
pub use reference::{FileReference, FileReferenceId};

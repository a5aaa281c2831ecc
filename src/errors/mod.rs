// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error taxonomy.
//!
//! * [`ProcessorError`] covers factory misconfiguration and invalid stage
//!   arguments. Configuration errors are fatal and never retried.
//! * [`StoreError`] is what a graph store or reference index reports. A query
//!   error from one factory is recovered locally: the factory contributes
//!   nothing to the run.
//! * [`PurlError`], [`FileReferenceError`] belong to their subsystems.
//! * [`ProbeError`] and [`UnverifiedReferenceError`] are per-reference
//!   verification failures and never abort sibling verifications.
//! * [`PipelineError`] is what callers of the artifact pipeline see, including
//!   the blocking unresolved-identifier and publication conditions.
//! * [`ValidationError`] / [`ConfigError`] come out of configuration loading.

mod config;
mod file_reference;
mod graph;
mod pipeline;
mod processor;
mod purl;
mod store;

pub use config::{ConfigError, ValidationError};
pub use file_reference::{FileReferenceError, UnverifiedReferenceError};
pub use graph::GraphError;
pub use pipeline::PipelineError;
pub use processor::ProcessorError;
pub use purl::PurlError;
pub use store::{ProbeError, ResolveError, StoreError};

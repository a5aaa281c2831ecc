// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod processor;
pub mod store;

pub use processor::{ConstructPattern, Processor, ProcessorFactory};
pub use store::{FileProbe, GraphStore, ProbeOutcome, ReferenceIndex, RepositoryAliases, VersionResolver};

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod extraction;
mod pipeline;
mod purl_run;
mod sparql;
mod verification;
mod versions;
#[cfg(test)]
mod integration_tests;

pub use extraction::{ExtractionReport, FileReferenceExtractor, RejectedReference};
pub use pipeline::{ArtifactPipeline, Collaborators};
pub use purl_run::{PurlMinter, PurlRun, PurlRunOutcome};
pub use sparql::{build_construct_query, ConstructQueryBuilder};
pub use verification::{ReferenceVerifier, UnverifiedReference, VerificationReport};
pub use versions::VersionRegistry;

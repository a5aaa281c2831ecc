// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Purl processors: detect temporary identifiers and mint permanent ones.
//!
//! Detection is driven purely by configured temporary-URI prefixes such as
//! `urn:temp:`. A [`PurlProcessorFactory`] declares the construct pattern used
//! to discover candidate triples and hands out [`PurlProcessor`]s that decide
//! whether a fragment is theirs and mint replacements. The run-scoped state that
//! keeps minting idempotent lives in [`PurlRun`](crate::engine::PurlRun).

mod factory;
mod mapping;
mod processor;

pub use factory::{MintStrategy, PrefixPurlFactory, PurlProcessorFactory};
pub use mapping::{PurlMapping, PurlReference};
pub use processor::{PrefixPurlProcessor, PurlProcessor};

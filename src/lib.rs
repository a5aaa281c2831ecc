// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // processor families, probes, indexes
pub mod config;     // config + registry
pub mod engine;     // query building, minting, extraction, pipeline
pub mod errors;     // error handling
pub mod graph;      // RDF values
pub mod observability;
pub mod stage;
pub mod traits;     // unified abstractions

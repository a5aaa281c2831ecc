// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `registry` - factory registration and stage filtering
//! * `query` - construct query generation and evaluation
//! * `purl` - purl minting and identifier resolution
//! * `file_reference` - extraction, verification, persistence and publication

use tracing::Span;

pub mod file_reference;
pub mod purl;
pub mod query;
pub mod registry;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message at its level with structured fields attached.
    fn log(&self);

    /// A span carrying the same fields, for wrapping the work the message describes.
    fn span(&self, name: &str) -> Span;
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic text lives in message structs that implement `Display`
//! and [`messages::StructuredLog`]. Call sites construct the message and call
//! `log()`, so log wording and structured fields stay in one place.
//!
//! Messages are organized by subsystem:
//! * `messages::registry` - factory registration and stage filtering
//! * `messages::query` - construct query generation and evaluation
//! * `messages::purl` - purl minting and identifier resolution
//! * `messages::file_reference` - file-reference extraction, verification and publication
//!
//! # Usage
//!
//! ```rust
//! use rdf_intake::observability::messages::registry::DuplicateFactoryKey;
//! use rdf_intake::observability::messages::StructuredLog;
//!
//! DuplicateFactoryKey {
//!     registry: "purl",
//!     key: "temp_uris",
//! }
//! .log();
//! ```

pub mod messages;

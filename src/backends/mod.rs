// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Processor families and collaborator implementations.

pub mod file_reference;
pub mod http_probe;
pub mod memory;
pub mod purl;

#[cfg(test)]
pub(crate) mod stub;

pub use http_probe::HttpFileProbe;
pub use memory::MemoryReferenceIndex;

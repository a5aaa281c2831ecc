// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod registry;
mod repository;
mod runtime;
mod validation;

pub mod consts;

pub use loader::{
    load_and_validate_config, load_config, Config, FileReferenceConfig, FileReferenceProcessorConfig, PurlConfig,
    PurlProcessorConfig, VerificationOptions,
};
pub use registry::{
    discover, file_reference_registry, filter_by_stage, purl_registry, FileReferenceRegistry, PurlRegistry,
    RegisteredFactory, Registry, FILE_REFERENCE_REGISTRY, PURL_REGISTRY,
};
pub use repository::{RepositoryConfig, RepositoryLocation, RepositoryProtocol, RepositoryTable};
pub use runtime::{register_from_config, Runtime, RuntimeBuilder};
pub use validation::validate_config;

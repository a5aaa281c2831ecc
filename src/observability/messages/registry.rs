// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processor registry events.
//!
//! This module contains message types for logging events related to:
//! * Factory registration, replacement and removal
//! * Stage filtering of registered factories

use crate::observability::messages::StructuredLog;
use crate::stage::{ProcessorStage, StageSet};
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A factory was added to a registry.
///
/// # Log Level
/// `debug!` - Startup detail
pub struct FactoryRegistered<'a> {
    pub registry: &'a str,
    pub key: &'a str,
    pub stages: &'a StageSet,
}

impl Display for FactoryRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered factory '{}' in {} registry for stages {}",
            self.key, self.registry, self.stages
        )
    }
}

impl StructuredLog for FactoryRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            registry = self.registry,
            key = self.key,
            stages = %self.stages,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "factory_registered",
            span_name = name,
            registry = self.registry,
            key = self.key,
        )
    }
}

/// A factory replaced an earlier one registered under the same key.
///
/// # Log Level
/// `warn!` - Last registration wins
///
/// # Example
/// ```
/// use rdf_intake::observability::messages::registry::DuplicateFactoryKey;
///
/// let msg = DuplicateFactoryKey {
///     registry: "purl",
///     key: "temp_uris",
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Duplicate factory key 'temp_uris' in purl registry; replacing earlier registration"
/// );
/// ```
pub struct DuplicateFactoryKey<'a> {
    pub registry: &'a str,
    pub key: &'a str,
}

impl Display for DuplicateFactoryKey<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Duplicate factory key '{}' in {} registry; replacing earlier registration",
            self.key, self.registry
        )
    }
}

impl StructuredLog for DuplicateFactoryKey<'_> {
    fn log(&self) {
        tracing::warn!(registry = self.registry, key = self.key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "duplicate_factory_key",
            span_name = name,
            registry = self.registry,
            key = self.key,
        )
    }
}

/// A factory declaring no stages was registered. It will never match.
///
/// # Log Level
/// `warn!` - Misconfiguration tolerated by the registry
pub struct EmptyStageSetRegistered<'a> {
    pub registry: &'a str,
    pub key: &'a str,
}

impl Display for EmptyStageSetRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Factory '{}' in {} registry declares no stages and will never be selected",
            self.key, self.registry
        )
    }
}

impl StructuredLog for EmptyStageSetRegistered<'_> {
    fn log(&self) {
        tracing::warn!(registry = self.registry, key = self.key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "empty_stage_set",
            span_name = name,
            registry = self.registry,
            key = self.key,
        )
    }
}

/// A factory was removed from a registry.
///
/// # Log Level
/// `debug!`
pub struct FactoryRemoved<'a> {
    pub registry: &'a str,
    pub key: &'a str,
}

impl Display for FactoryRemoved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Removed factory '{}' from {} registry", self.key, self.registry)
    }
}

impl StructuredLog for FactoryRemoved<'_> {
    fn log(&self) {
        tracing::debug!(registry = self.registry, key = self.key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "factory_removed",
            span_name = name,
            registry = self.registry,
            key = self.key,
        )
    }
}

pub struct RegistryCleared<'a> {
    pub registry: &'a str,
    pub removed: usize,
}

impl Display for RegistryCleared<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cleared {} registry: {} factories removed", self.registry, self.removed)
    }
}

impl StructuredLog for RegistryCleared<'_> {
    fn log(&self) {
        tracing::debug!(registry = self.registry, removed = self.removed, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "registry_cleared",
            span_name = name,
            registry = self.registry,
            removed = self.removed,
        )
    }
}

/// Factories selected for a stage.
///
/// # Log Level
/// `debug!` - Per-run detail
pub struct StageFactoriesSelected<'a> {
    pub registry: &'a str,
    pub stage: ProcessorStage,
    pub count: usize,
}

impl Display for StageFactoriesSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Selected {} factories from {} registry for stage {}",
            self.count, self.registry, self.stage
        )
    }
}

impl StructuredLog for StageFactoriesSelected<'_> {
    fn log(&self) {
        tracing::debug!(
            registry = self.registry,
            stage = %self.stage,
            count = self.count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stage_factories_selected",
            span_name = name,
            registry = self.registry,
            stage = %self.stage,
            count = self.count,
        )
    }
}

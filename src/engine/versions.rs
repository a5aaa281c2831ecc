// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::errors::ResolveError;
use crate::graph::Iri;
use crate::traits::VersionResolver;

#[derive(Debug, Default, Clone)]
struct VersionState {
    current: Option<Iri>,
    published: Option<Iri>,
}

/// Tracks the current and the published version of each managed artifact.
///
/// Resolution returns the current version. An IRI that was never passed to
/// [`VersionRegistry::manage`] is [`ResolveError::Unmanaged`]; a managed IRI
/// without a current version is [`ResolveError::NotFound`].
#[derive(Debug, Default)]
pub struct VersionRegistry {
    artifacts: RwLock<HashMap<Iri, VersionState>>,
}

impl VersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start managing `iri`. Returns `false` if it was already managed.
    pub async fn manage(&self, iri: Iri) -> bool {
        let mut artifacts = self.artifacts.write().await;
        if artifacts.contains_key(&iri) {
            return false;
        }
        artifacts.insert(iri, VersionState::default());
        true
    }

    pub async fn is_managed(&self, iri: &Iri) -> bool {
        self.artifacts.read().await.contains_key(iri)
    }

    /// Make `version` the current version of `iri`, returning the previous one.
    pub async fn set_current(&self, iri: &Iri, version: Iri) -> Result<Option<Iri>, ResolveError> {
        let mut artifacts = self.artifacts.write().await;
        let state = artifacts
            .get_mut(iri)
            .ok_or_else(|| ResolveError::Unmanaged(iri.clone()))?;
        Ok(state.current.replace(version))
    }

    /// Mark the current version of `iri` as published and return it.
    pub async fn publish(&self, iri: &Iri) -> Result<Iri, ResolveError> {
        let mut artifacts = self.artifacts.write().await;
        let state = artifacts
            .get_mut(iri)
            .ok_or_else(|| ResolveError::Unmanaged(iri.clone()))?;
        let current = state
            .current
            .clone()
            .ok_or_else(|| ResolveError::NotFound(iri.clone()))?;
        state.published = Some(current.clone());
        Ok(current)
    }

    pub async fn current(&self, iri: &Iri) -> Result<Iri, ResolveError> {
        let artifacts = self.artifacts.read().await;
        let state = artifacts.get(iri).ok_or_else(|| ResolveError::Unmanaged(iri.clone()))?;
        state.current.clone().ok_or_else(|| ResolveError::NotFound(iri.clone()))
    }

    /// The published version, if any version was ever published.
    pub async fn published(&self, iri: &Iri) -> Result<Option<Iri>, ResolveError> {
        let artifacts = self.artifacts.read().await;
        let state = artifacts.get(iri).ok_or_else(|| ResolveError::Unmanaged(iri.clone()))?;
        Ok(state.published.clone())
    }
}

#[async_trait]
impl VersionResolver for VersionRegistry {
    async fn resolve(&self, iri: &Iri) -> Result<Iri, ResolveError> {
        self.current(iri).await
    }
}

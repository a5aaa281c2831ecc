// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::backends::file_reference::{FileReference, FileReferenceId};
use crate::errors::StoreError;
use crate::graph::Iri;
use crate::traits::ReferenceIndex;

/// In-process [`ReferenceIndex`] keeping references in insertion order.
#[derive(Debug, Default)]
pub struct MemoryReferenceIndex {
    references: RwLock<IndexMap<FileReferenceId, FileReference>>,
}

impl MemoryReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.references.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.references.read().await.is_empty()
    }

    async fn select<P>(&self, predicate: P) -> Vec<FileReference>
    where
        P: Fn(&FileReference) -> bool,
    {
        self.references
            .read()
            .await
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ReferenceIndex for MemoryReferenceIndex {
    async fn store(&self, reference: FileReference) -> Result<(), StoreError> {
        self.references.write().await.insert(reference.id().clone(), reference);
        Ok(())
    }

    async fn delete(&self, id: &FileReferenceId) -> Result<bool, StoreError> {
        Ok(self.references.write().await.shift_remove(id).is_some())
    }

    async fn by_object(&self, artifact: &Iri, object: &Iri) -> Result<Vec<FileReference>, StoreError> {
        Ok(self
            .select(|r| r.artifact() == artifact && r.object() == object)
            .await)
    }

    async fn by_repository(&self, artifact: &Iri, alias: &str) -> Result<Vec<FileReference>, StoreError> {
        Ok(self
            .select(|r| r.artifact() == artifact && r.repository_alias() == alias)
            .await)
    }
}

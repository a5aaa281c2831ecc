// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stage-filtered processor registries.
//!
//! A [`Registry`] holds factories of one processor family in registration
//! order. Readers load an immutable snapshot (`arc-swap`), writers publish a
//! new vector with read-copy-update, so a concurrent reader never observes a
//! partially added factory.
//!
//! Two process-wide registries exist, one per family:
//! [`purl_registry`] and [`file_reference_registry`]. They start empty and are
//! filled explicitly at startup by
//! [`register_from_config`](crate::config::register_from_config). Tests build
//! their own instances with [`Registry::new`].

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

use crate::backends::file_reference::FileReferenceProcessorFactory;
use crate::backends::purl::PurlProcessorFactory;
use crate::observability::messages::registry::{
    DuplicateFactoryKey, EmptyStageSetRegistered, FactoryRegistered, FactoryRemoved, RegistryCleared,
    StageFactoriesSelected,
};
use crate::observability::messages::StructuredLog;
use crate::stage::{ProcessorStage, StageSet};
use crate::traits::{ConstructPattern, ProcessorFactory};

pub const PURL_REGISTRY: &str = "purl";
pub const FILE_REFERENCE_REGISTRY: &str = "file_reference";

/// Keep the items whose stage set contains `stage`, in their original order.
///
/// An absent stage selects nothing.
pub fn filter_by_stage<T, S>(items: &[T], stage: Option<ProcessorStage>, stages_of: S) -> Vec<T>
where
    T: Clone,
    S: Fn(&T) -> &StageSet,
{
    let Some(stage) = stage else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| stages_of(*item).contains(stage))
        .cloned()
        .collect()
}

/// Keyed, ordered collection of factories of one family.
pub struct Registry<F: ?Sized + ProcessorFactory> {
    name: &'static str,
    factories: ArcSwap<Vec<Arc<F>>>,
}

impl<F: ?Sized + ProcessorFactory> Registry<F> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            factories: ArcSwap::from_pointee(Vec::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register `factory`. A factory with the same key is replaced and
    /// returned; the new one moves to the end of the registration order.
    pub fn add(&self, factory: Arc<F>) -> Option<Arc<F>> {
        let key = factory.key().to_string();
        let mut replaced = None;

        self.factories.rcu(|current| {
            let mut next: Vec<Arc<F>> = Vec::with_capacity(current.len() + 1);
            replaced = None;
            for existing in current.iter() {
                if existing.key() == key {
                    replaced = Some(Arc::clone(existing));
                } else {
                    next.push(Arc::clone(existing));
                }
            }
            next.push(Arc::clone(&factory));
            next
        });

        if replaced.is_some() {
            DuplicateFactoryKey {
                registry: self.name,
                key: &key,
            }
            .log();
        }
        if factory.stages().is_empty() {
            EmptyStageSetRegistered {
                registry: self.name,
                key: &key,
            }
            .log();
        }
        FactoryRegistered {
            registry: self.name,
            key: &key,
            stages: factory.stages(),
        }
        .log();

        replaced
    }

    pub fn remove(&self, key: &str) -> Option<Arc<F>> {
        let mut removed = None;
        self.factories.rcu(|current| {
            removed = current.iter().find(|f| f.key() == key).cloned();
            current
                .iter()
                .filter(|f| f.key() != key)
                .cloned()
                .collect::<Vec<_>>()
        });

        if removed.is_some() {
            FactoryRemoved { registry: self.name, key }.log();
        }
        removed
    }

    pub fn clear(&self) {
        let previous = self.factories.swap(Arc::new(Vec::new()));
        RegistryCleared {
            registry: self.name,
            removed: previous.len(),
        }
        .log();
    }

    /// Snapshot of every factory in registration order.
    pub fn all(&self) -> Vec<Arc<F>> {
        self.factories.load_full().as_ref().clone()
    }

    pub fn get(&self, key: &str) -> Option<Arc<F>> {
        self.factories.load().iter().find(|f| f.key() == key).cloned()
    }

    /// Factories participating in `stage`, in registration order. An absent
    /// stage yields an empty list.
    pub fn by_stage(&self, stage: Option<ProcessorStage>) -> Vec<Arc<F>> {
        let snapshot = self.factories.load_full();
        let selected = filter_by_stage(snapshot.as_slice(), stage, |f| f.stages());
        if let Some(stage) = stage {
            StageFactoriesSelected {
                registry: self.name,
                stage,
                count: selected.len(),
            }
            .log();
        }
        selected
    }

    pub fn len(&self) -> usize {
        self.factories.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.load().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.factories.load().iter().map(|f| f.key().to_string()).collect()
    }
}

impl<F: ?Sized + ProcessorFactory> fmt::Debug for Registry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("keys", &self.keys())
            .finish()
    }
}

pub type PurlRegistry = Registry<dyn PurlProcessorFactory>;
pub type FileReferenceRegistry = Registry<dyn FileReferenceProcessorFactory>;

static PURL: Lazy<Arc<PurlRegistry>> = Lazy::new(|| Arc::new(Registry::new(PURL_REGISTRY)));
static FILE_REFERENCE: Lazy<Arc<FileReferenceRegistry>> =
    Lazy::new(|| Arc::new(Registry::new(FILE_REFERENCE_REGISTRY)));

/// The process-wide purl registry.
pub fn purl_registry() -> Arc<PurlRegistry> {
    Arc::clone(&PURL)
}

/// The process-wide file-reference registry.
pub fn file_reference_registry() -> Arc<FileReferenceRegistry> {
    Arc::clone(&FILE_REFERENCE)
}

/// A factory from either family.
#[derive(Clone)]
pub enum RegisteredFactory {
    Purl(Arc<dyn PurlProcessorFactory>),
    FileReference(Arc<dyn FileReferenceProcessorFactory>),
}

impl RegisteredFactory {
    pub fn key(&self) -> &str {
        match self {
            RegisteredFactory::Purl(f) => f.key(),
            RegisteredFactory::FileReference(f) => f.key(),
        }
    }

    pub fn stages(&self) -> &StageSet {
        match self {
            RegisteredFactory::Purl(f) => f.stages(),
            RegisteredFactory::FileReference(f) => f.stages(),
        }
    }

    /// Registry name of the family.
    pub fn kind(&self) -> &'static str {
        match self {
            RegisteredFactory::Purl(_) => PURL_REGISTRY,
            RegisteredFactory::FileReference(_) => FILE_REFERENCE_REGISTRY,
        }
    }
}

impl ConstructPattern for RegisteredFactory {
    fn construct_bgp(&self) -> &str {
        match self {
            RegisteredFactory::Purl(f) => f.construct_bgp(),
            RegisteredFactory::FileReference(f) => f.construct_bgp(),
        }
    }

    fn where_clause(&self) -> &str {
        match self {
            RegisteredFactory::Purl(f) => f.where_clause(),
            RegisteredFactory::FileReference(f) => f.where_clause(),
        }
    }

    fn group_by(&self) -> &str {
        match self {
            RegisteredFactory::Purl(f) => f.group_by(),
            RegisteredFactory::FileReference(f) => f.group_by(),
        }
    }

    fn bind_variable(&self) -> &str {
        match self {
            RegisteredFactory::Purl(f) => f.bind_variable(),
            RegisteredFactory::FileReference(f) => f.bind_variable(),
        }
    }
}

impl fmt::Debug for RegisteredFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.key())
    }
}

/// Every factory of both families registered for `stage`: purl factories
/// first, each family in registration order.
pub fn discover(
    purl: &PurlRegistry,
    file_references: &FileReferenceRegistry,
    stage: Option<ProcessorStage>,
) -> Vec<RegisteredFactory> {
    let mut all: Vec<RegisteredFactory> = purl.all().into_iter().map(RegisteredFactory::Purl).collect();
    all.extend(file_references.all().into_iter().map(RegisteredFactory::FileReference));
    filter_by_stage(&all, stage, RegisteredFactory::stages)
}

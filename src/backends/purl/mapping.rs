// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::errors::PurlError;
use crate::graph::{Graph, Iri};

/// An immutable temporary → permanent identifier pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PurlReference {
    temporary: Iri,
    permanent: Iri,
}

impl PurlReference {
    pub fn new(temporary: Iri, permanent: Iri) -> Result<Self, PurlError> {
        if temporary == permanent {
            return Err(PurlError::Unchanged(temporary));
        }
        Ok(Self { temporary, permanent })
    }

    pub fn temporary(&self) -> &Iri {
        &self.temporary
    }

    pub fn permanent(&self) -> &Iri {
        &self.permanent
    }
}

/// Reversible temporary → permanent mapping collected during one run.
///
/// The mapping is injective: a permanent IRI is never assigned to two
/// temporary IRIs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurlMapping {
    forward: IndexMap<Iri, Iri>,
    reverse: HashMap<Iri, Iri>,
}

impl PurlMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reference and return the permanent IRI now mapped to its
    /// temporary IRI. A temporary IRI that is already mapped keeps its
    /// existing permanent IRI.
    pub fn insert(&mut self, reference: PurlReference) -> Result<&Iri, PurlError> {
        let PurlReference { temporary, permanent } = reference;

        if self.forward.contains_key(&temporary) {
            return Ok(&self.forward[&temporary]);
        }
        if let Some(existing) = self.reverse.get(&permanent) {
            return Err(PurlError::Collision {
                temporary,
                permanent,
                existing: existing.clone(),
            });
        }

        self.reverse.insert(permanent.clone(), temporary.clone());
        let entry = self.forward.entry(temporary).or_insert(permanent);
        Ok(&*entry)
    }

    pub fn get(&self, temporary: &Iri) -> Option<&Iri> {
        self.forward.get(temporary)
    }

    /// The temporary IRI a permanent IRI was minted for.
    pub fn temporary_for(&self, permanent: &Iri) -> Option<&Iri> {
        self.reverse.get(permanent)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Pairs in minting order.
    pub fn iter(&self) -> impl Iterator<Item = (&Iri, &Iri)> {
        self.forward.iter()
    }

    pub fn references(&self) -> Vec<PurlReference> {
        self.forward
            .iter()
            .map(|(temporary, permanent)| PurlReference {
                temporary: temporary.clone(),
                permanent: permanent.clone(),
            })
            .collect()
    }

    /// Replace every mapped temporary IRI in subject or object position.
    pub fn apply(&self, graph: &Graph) -> Graph {
        graph.rewrite_iris(|iri| self.forward.get(iri).cloned())
    }

    /// Undo [`PurlMapping::apply`].
    pub fn revert(&self, graph: &Graph) -> Graph {
        graph.rewrite_iris(|iri| self.reverse.get(iri).cloned())
    }
}

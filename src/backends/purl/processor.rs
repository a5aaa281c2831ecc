// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use uuid::Uuid;

use super::MintStrategy;
use crate::errors::PurlError;
use crate::graph::{parse_iri, Graph, Iri};
use crate::traits::Processor;

/// A processor that recognizes temporary identifiers and mints replacements.
pub trait PurlProcessor: Processor {
    /// Prefixes that mark an IRI as temporary.
    fn temporary_prefixes(&self) -> &[String];

    /// A blank prefix marks nothing.
    fn is_temporary(&self, iri: &Iri) -> bool {
        self.temporary_prefixes()
            .iter()
            .any(|prefix| !prefix.is_empty() && iri.as_str().starts_with(prefix.as_str()))
    }

    /// Temporary IRIs in subject or object position, in first-seen order.
    fn temporary_iris(&self, fragment: &Graph) -> Vec<Iri> {
        fragment
            .node_iris()
            .into_iter()
            .filter(|iri| self.is_temporary(iri))
            .cloned()
            .collect()
    }

    /// Produce a permanent IRI for `temporary`.
    ///
    /// Random strategies return a fresh value on every call; idempotency within
    /// a run is the caller's responsibility.
    fn mint(&self, temporary: &Iri) -> Result<Iri, PurlError>;
}

/// Prefix-driven purl processor used by [`PrefixPurlFactory`](super::PrefixPurlFactory).
#[derive(Debug, Clone)]
pub struct PrefixPurlProcessor {
    name: String,
    prefixes: Vec<String>,
    namespace: String,
    strategy: MintStrategy,
}

impl PrefixPurlProcessor {
    pub fn new(name: impl Into<String>, prefixes: Vec<String>, namespace: impl Into<String>, strategy: MintStrategy) -> Self {
        Self {
            name: name.into(),
            prefixes,
            namespace: namespace.into(),
            strategy,
        }
    }

    fn suffix_for(&self, temporary: &Iri) -> String {
        match self.strategy {
            MintStrategy::Random => Uuid::new_v4().to_string(),
            MintStrategy::Deterministic => {
                let value = temporary.as_str();
                self.prefixes
                    .iter()
                    .filter(|prefix| !prefix.is_empty() && value.starts_with(prefix.as_str()))
                    .max_by_key(|prefix| prefix.len())
                    .map(|prefix| value[prefix.len()..].to_string())
                    .unwrap_or_else(|| value.to_string())
            }
        }
    }
}

impl Processor for PrefixPurlProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_handle(&self, fragment: &Graph) -> bool {
        fragment.node_iris().into_iter().any(|iri| self.is_temporary(iri))
    }
}

impl PurlProcessor for PrefixPurlProcessor {
    fn temporary_prefixes(&self) -> &[String] {
        &self.prefixes
    }

    fn mint(&self, temporary: &Iri) -> Result<Iri, PurlError> {
        let permanent = parse_iri(format!("{}{}", self.namespace, self.suffix_for(temporary)))?;
        if &permanent == temporary {
            return Err(PurlError::Unchanged(permanent));
        }
        Ok(permanent)
    }
}

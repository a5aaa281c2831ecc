// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use super::{PrefixPurlProcessor, PurlProcessor};
use crate::errors::ProcessorError;
use crate::stage::StageSet;
use crate::traits::{ConstructPattern, ProcessorFactory};

/// Factory of purl processors, registered in the purl registry.
pub trait PurlProcessorFactory: ProcessorFactory + ConstructPattern {
    /// Prefixes marking identifiers this factory mints purls for.
    fn temporary_prefixes(&self) -> &[String];

    /// Build a processor for one run.
    ///
    /// Fails with [`ProcessorError::Configuration`] when the factory has no
    /// temporary-URI prefixes to detect or one of them is blank.
    fn processor(&self) -> Result<Box<dyn PurlProcessor>, ProcessorError>;
}

/// How a permanent identifier is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MintStrategy {
    /// Random UUID appended to the namespace.
    #[default]
    Random,
    /// Temporary prefix swapped for the namespace, keeping the local part.
    Deterministic,
}

/// Purl factory configured with temporary prefixes and a target namespace.
#[derive(Debug, Clone)]
pub struct PrefixPurlFactory {
    key: String,
    stages: StageSet,
    prefixes: Vec<String>,
    namespace: String,
    strategy: MintStrategy,
    where_clause: String,
}

impl PrefixPurlFactory {
    pub fn new(
        key: impl Into<String>,
        stages: StageSet,
        prefixes: Vec<String>,
        namespace: impl Into<String>,
        strategy: MintStrategy,
    ) -> Self {
        let where_clause = Self::where_clause_for(&prefixes);
        Self {
            key: key.into(),
            stages,
            prefixes,
            namespace: namespace.into(),
            strategy,
            where_clause,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn strategy(&self) -> MintStrategy {
        self.strategy
    }

    fn where_clause_for(prefixes: &[String]) -> String {
        if prefixes.is_empty() {
            return "?s ?p ?o . FILTER(false)".to_string();
        }
        let tests: Vec<String> = prefixes
            .iter()
            .flat_map(|prefix| {
                let escaped = prefix.replace('\\', "\\\\").replace('"', "\\\"");
                [
                    format!("STRSTARTS(STR(?s), \"{}\")", escaped),
                    format!("(isIRI(?o) && STRSTARTS(STR(?o), \"{}\"))", escaped),
                ]
            })
            .collect();
        format!("?s ?p ?o . FILTER({})", tests.join(" || "))
    }
}

impl ProcessorFactory for PrefixPurlFactory {
    fn key(&self) -> &str {
        &self.key
    }

    fn stages(&self) -> &StageSet {
        &self.stages
    }

    fn is_thread_safe(&self) -> bool {
        true
    }
}

impl ConstructPattern for PrefixPurlFactory {
    fn construct_bgp(&self) -> &str {
        "?s ?p ?o"
    }

    fn where_clause(&self) -> &str {
        &self.where_clause
    }

    fn bind_variable(&self) -> &str {
        "s"
    }
}

impl PurlProcessorFactory for PrefixPurlFactory {
    fn temporary_prefixes(&self) -> &[String] {
        &self.prefixes
    }

    fn processor(&self) -> Result<Box<dyn PurlProcessor>, ProcessorError> {
        if self.prefixes.is_empty() {
            return Err(ProcessorError::Configuration {
                key: self.key.clone(),
                reason: "no temporary URI prefixes configured".to_string(),
            });
        }
        if self.prefixes.iter().any(|prefix| prefix.trim().is_empty()) {
            return Err(ProcessorError::Configuration {
                key: self.key.clone(),
                reason: "blank temporary URI prefix would match every IRI".to_string(),
            });
        }
        if self.namespace.trim().is_empty() {
            return Err(ProcessorError::Configuration {
                key: self.key.clone(),
                reason: "no purl namespace configured".to_string(),
            });
        }
        Ok(Box::new(PrefixPurlProcessor::new(
            self.key.clone(),
            self.prefixes.clone(),
            self.namespace.clone(),
            self.strategy,
        )))
    }
}

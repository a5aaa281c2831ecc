// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Processing stages an artifact passes through.
//!
//! Stages form a closed, totally ordered enumeration. Every processor factory
//! declares the subset of stages it participates in as a [`StageSet`], and the
//! registries filter factories by stage when an extraction run starts.
//!
//! ```text
//! RdfParsing → OwlAxiomExtraction → ProfileCheck → ConsistencyCheck
//!            → ConcreteAxiomStorage → Inference → InferredAxiomStorage
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::errors::ProcessorError;

/// A single processing stage.
///
/// The derived `Ord` follows declaration order, which is the pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessorStage {
    RdfParsing,
    OwlAxiomExtraction,
    ProfileCheck,
    ConsistencyCheck,
    ConcreteAxiomStorage,
    Inference,
    InferredAxiomStorage,
}

impl ProcessorStage {
    /// All stages in pipeline order.
    pub const ALL: [ProcessorStage; 7] = [
        ProcessorStage::RdfParsing,
        ProcessorStage::OwlAxiomExtraction,
        ProcessorStage::ProfileCheck,
        ProcessorStage::ConsistencyCheck,
        ProcessorStage::ConcreteAxiomStorage,
        ProcessorStage::Inference,
        ProcessorStage::InferredAxiomStorage,
    ];

    /// Stable snake_case name used in configuration files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessorStage::RdfParsing => "rdf_parsing",
            ProcessorStage::OwlAxiomExtraction => "owl_axiom_extraction",
            ProcessorStage::ProfileCheck => "profile_check",
            ProcessorStage::ConsistencyCheck => "consistency_check",
            ProcessorStage::ConcreteAxiomStorage => "concrete_axiom_storage",
            ProcessorStage::Inference => "inference",
            ProcessorStage::InferredAxiomStorage => "inferred_axiom_storage",
        }
    }

    /// The stage following this one, or `None` for the last stage.
    pub fn next(self) -> Option<ProcessorStage> {
        let idx = Self::ALL.iter().position(|s| *s == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

impl fmt::Display for ProcessorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessorStage {
    type Err = ProcessorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProcessorError::UnknownStage(s.to_string()))
    }
}

/// The set of stages a factory participates in.
///
/// An empty set is tolerated but matches nothing; configuration validation
/// reports it before a factory built from YAML ever reaches a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageSet(BTreeSet<ProcessorStage>);

impl StageSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, stage: ProcessorStage) -> bool {
        self.0.contains(&stage)
    }

    pub fn insert(&mut self, stage: ProcessorStage) -> bool {
        self.0.insert(stage)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Stages in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = ProcessorStage> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ProcessorStage> for StageSet {
    fn from_iter<I: IntoIterator<Item = ProcessorStage>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[ProcessorStage; N]> for StageSet {
    fn from(stages: [ProcessorStage; N]) -> Self {
        stages.into_iter().collect()
    }
}

impl fmt::Display for StageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(ProcessorStage::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

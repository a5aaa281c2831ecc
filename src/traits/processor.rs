// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Factory and processor abstractions shared by every processor family.

use crate::errors::ProcessorError;
use crate::graph::Graph;
use crate::stage::{ProcessorStage, StageSet};

/// A keyed producer of run-scoped processors.
///
/// Factories are long-lived and shared through the registries; the processors
/// they hand out are not. Unless [`ProcessorFactory::is_thread_safe`] says
/// otherwise, callers must ask for a fresh processor per extraction run.
pub trait ProcessorFactory: Send + Sync {
    /// Unique key, stable across restarts. Registries deduplicate on it.
    fn key(&self) -> &str;

    /// Stages this factory participates in.
    fn stages(&self) -> &StageSet;

    /// Whether this factory takes part in `stage`.
    ///
    /// An absent stage is a programming error and is reported as
    /// [`ProcessorError::InvalidArgument`] instead of a silent `false`.
    fn can_handle_stage(&self, stage: Option<ProcessorStage>) -> Result<bool, ProcessorError> {
        let stage = stage.ok_or(ProcessorError::InvalidArgument("stage must not be empty"))?;
        Ok(self.stages().contains(stage))
    }

    /// Whether processors from this factory may be shared between concurrent runs.
    fn is_thread_safe(&self) -> bool {
        false
    }
}

/// The declarative graph pattern a factory extracts with.
///
/// The [`ConstructQueryBuilder`](crate::engine::ConstructQueryBuilder) turns it
/// into a SPARQL `CONSTRUCT` query.
pub trait ConstructPattern {
    /// Template of the constructed graph.
    fn construct_bgp(&self) -> &str;

    /// Body of the `WHERE` block.
    fn where_clause(&self) -> &str;

    /// `GROUP BY` expression; empty means no grouping.
    fn group_by(&self) -> &str {
        ""
    }

    /// Variable bound to the subject when extraction is scoped to one resource.
    fn bind_variable(&self) -> &str;
}

/// A run-scoped worker that decides whether it can handle a graph fragment.
pub trait Processor: Send {
    fn name(&self) -> &str;

    fn can_handle(&self, fragment: &Graph) -> bool;
}

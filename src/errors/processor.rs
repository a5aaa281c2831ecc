// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised by processor factories and stage handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessorError {
    /// A caller passed a value the contract forbids, such as an absent stage.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A stage name that is not part of the pipeline.
    #[error("unknown processor stage '{0}'")]
    UnknownStage(String),

    /// A factory cannot build a usable processor.
    #[error("processor factory '{key}' is misconfigured: {reason}")]
    Configuration { key: String, reason: String },
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::{GraphError, ProcessorError};
use crate::graph::Iri;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PurlError {
    /// A permanent URI may never equal the temporary URI it replaces.
    #[error("permanent URI for {0} is identical to the temporary URI")]
    Unchanged(Iri),

    /// Two distinct temporary URIs would share one permanent URI.
    #[error("permanent URI {permanent} for {temporary} is already assigned to {existing}")]
    Collision {
        temporary: Iri,
        permanent: Iri,
        existing: Iri,
    },

    #[error("minted identifier is not a valid IRI: {0}")]
    InvalidIri(#[from] GraphError),

    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

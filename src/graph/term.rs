// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! RDF term values.
//!
//! The value types are `oxrdf`'s. IRIs are `oxrdf::NamedNode`, exported here as
//! [`Iri`]; construction through [`parse_iri`] validates against RFC 3987 and
//! reports failures as [`GraphError`]. The extension traits add the narrow
//! accessors processors use to pick nodes out of subject and object position.

pub use oxrdf::{BlankNode, Literal, NamedNode as Iri, Subject, Term, Triple};

use crate::errors::GraphError;

/// Parse an absolute IRI.
pub fn parse_iri(value: impl Into<String>) -> Result<Iri, GraphError> {
    let value = value.into();
    Iri::new(value.as_str()).map_err(|e| GraphError::InvalidIri {
        iri: value,
        reason: e.to_string(),
    })
}

pub trait SubjectExt {
    /// The IRI, unless the subject is a blank node.
    fn iri(&self) -> Option<&Iri>;
}

impl SubjectExt for Subject {
    fn iri(&self) -> Option<&Iri> {
        match self {
            Subject::NamedNode(iri) => Some(iri),
            _ => None,
        }
    }
}

pub trait TermExt {
    fn iri(&self) -> Option<&Iri>;

    fn literal(&self) -> Option<&Literal>;

    /// The same node viewed as a subject. Literals cannot be subjects.
    fn to_subject(&self) -> Option<Subject>;
}

impl TermExt for Term {
    fn iri(&self) -> Option<&Iri> {
        match self {
            Term::NamedNode(iri) => Some(iri),
            _ => None,
        }
    }

    fn literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    fn to_subject(&self) -> Option<Subject> {
        match self {
            Term::NamedNode(iri) => Some(Subject::from(iri.clone())),
            Term::BlankNode(node) => Some(Subject::from(node.clone())),
            _ => None,
        }
    }
}

pub trait TripleExt {
    /// True when `iri` is the subject or the object of this triple.
    fn mentions(&self, iri: &Iri) -> bool;
}

impl TripleExt for Triple {
    fn mentions(&self, iri: &Iri) -> bool {
        self.subject.iri() == Some(iri) || self.object.iri() == Some(iri)
    }
}

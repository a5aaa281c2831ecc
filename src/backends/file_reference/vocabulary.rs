// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Terms used to describe file references in uploaded graphs.

use once_cell::sync::Lazy;

use crate::graph::Iri;

pub const NAMESPACE: &str = "https://w3id.org/rdf-intake/files#";

/// `?object files:hasFileReference ?reference`
pub static HAS_FILE_REFERENCE: Lazy<Iri> = Lazy::new(|| term("hasFileReference"));
/// `?reference files:repositoryType files:SshRepository | files:HttpRepository`
pub static REPOSITORY_TYPE: Lazy<Iri> = Lazy::new(|| term("repositoryType"));
/// Repository alias literal.
pub static REPOSITORY: Lazy<Iri> = Lazy::new(|| term("repository"));
/// Path literal inside the repository.
pub static PATH: Lazy<Iri> = Lazy::new(|| term("path"));
pub static SSH_REPOSITORY: Lazy<Iri> = Lazy::new(|| term("SshRepository"));
pub static HTTP_REPOSITORY: Lazy<Iri> = Lazy::new(|| term("HttpRepository"));

pub static RDFS_LABEL: Lazy<Iri> = Lazy::new(|| Iri::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label"));

fn term(local: &str) -> Iri {
    Iri::new_unchecked(format!("{}{}", NAMESPACE, local))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_term_is_a_valid_iri() {
        let terms = [
            &*HAS_FILE_REFERENCE,
            &*REPOSITORY_TYPE,
            &*REPOSITORY,
            &*PATH,
            &*SSH_REPOSITORY,
            &*HTTP_REPOSITORY,
            &*RDFS_LABEL,
        ];
        for term in terms {
            assert!(Iri::new(term.as_str()).is_ok(), "{} should validate", term);
        }
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Construct query builder.
//!
//! Turns a factory's declarative [`ConstructPattern`] into the text of a SPARQL
//! `CONSTRUCT` query:
//!
//! ```text
//! CONSTRUCT { <bgp> } WHERE { <where> } [VALUES (?<bind>) { (<subject> ) }] [GROUP BY <group_by>]
//! ```
//!
//! The `VALUES` clause scopes extraction to one resource and is only emitted
//! when a subject is supplied. `GROUP BY` is only emitted when the pattern
//! declares a non-empty grouping. Building is pure string construction.
//!
//! # Examples
//!
//! ```
//! use rdf_intake::engine::ConstructQueryBuilder;
//! use rdf_intake::graph::Iri;
//!
//! let query = ConstructQueryBuilder::new("?s ?p ?o", "?s ?p ?o")
//!     .bind_variable("s")
//!     .subject(Iri::new("http://ex/1").unwrap())
//!     .build();
//!
//! assert_eq!(query, "CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o } VALUES (?s) { (<http://ex/1> ) }");
//! ```

use crate::graph::Iri;
use crate::traits::ConstructPattern;

#[derive(Debug, Clone)]
pub struct ConstructQueryBuilder {
    construct_bgp: String,
    where_clause: String,
    group_by: String,
    bind_variable: String,
    subject: Option<Iri>,
}

impl ConstructQueryBuilder {
    pub fn new(construct_bgp: impl Into<String>, where_clause: impl Into<String>) -> Self {
        Self {
            construct_bgp: construct_bgp.into(),
            where_clause: where_clause.into(),
            group_by: String::new(),
            bind_variable: String::new(),
            subject: None,
        }
    }

    /// Start from everything a factory declares.
    pub fn from_pattern<P: ConstructPattern + ?Sized>(pattern: &P) -> Self {
        Self::new(pattern.construct_bgp(), pattern.where_clause())
            .group_by(pattern.group_by())
            .bind_variable(pattern.bind_variable())
    }

    pub fn group_by(mut self, group_by: impl Into<String>) -> Self {
        self.group_by = group_by.into();
        self
    }

    /// Variable the subject is bound to. A leading `?` is accepted.
    pub fn bind_variable(mut self, variable: impl Into<String>) -> Self {
        let variable = variable.into();
        self.bind_variable = variable.trim().trim_start_matches('?').to_string();
        self
    }

    pub fn subject(mut self, subject: Iri) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn maybe_subject(mut self, subject: Option<Iri>) -> Self {
        self.subject = subject;
        self
    }

    pub fn build(&self) -> String {
        let mut query = format!(
            "CONSTRUCT {{ {} }} WHERE {{ {} }}",
            self.construct_bgp.trim(),
            self.where_clause.trim()
        );

        if let Some(subject) = &self.subject {
            query.push_str(&format!(" VALUES (?{}) {{ ({} ) }}", self.bind_variable, subject));
        }

        let group_by = self.group_by.trim();
        if !group_by.is_empty() {
            query.push_str(" GROUP BY ");
            query.push_str(group_by);
        }

        query
    }
}

/// Build the extraction query for `pattern`, optionally scoped to `subject`.
pub fn build_construct_query<P: ConstructPattern + ?Sized>(pattern: &P, subject: Option<&Iri>) -> String {
    ConstructQueryBuilder::from_pattern(pattern)
        .maybe_subject(subject.cloned())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pattern {
        bgp: &'static str,
        where_clause: &'static str,
        group_by: &'static str,
        bind: &'static str,
    }

    impl ConstructPattern for Pattern {
        fn construct_bgp(&self) -> &str {
            self.bgp
        }

        fn where_clause(&self) -> &str {
            self.where_clause
        }

        fn group_by(&self) -> &str {
            self.group_by
        }

        fn bind_variable(&self) -> &str {
            self.bind
        }
    }

    #[test]
    fn test_build_construct_query_table_driven() {
        struct TestCase {
            name: &'static str,
            pattern: Pattern,
            subject: Option<&'static str>,
            expected: &'static str,
        }

        let cases = vec![
            TestCase {
                name: "whole graph without grouping",
                pattern: Pattern { bgp: "?s ?p ?o", where_clause: "?s ?p ?o", group_by: "", bind: "s" },
                subject: None,
                expected: "CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o }",
            },
            TestCase {
                name: "scoped to one subject",
                pattern: Pattern { bgp: "?s ?p ?o", where_clause: "?s ?p ?o", group_by: "", bind: "s" },
                subject: Some("http://ex/1"),
                expected: "CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o } VALUES (?s) { (<http://ex/1> ) }",
            },
            TestCase {
                name: "grouping without subject",
                pattern: Pattern { bgp: "?s ?p ?o", where_clause: "?s ?p ?o", group_by: "?s", bind: "s" },
                subject: None,
                expected: "CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o } GROUP BY ?s",
            },
            TestCase {
                name: "subject and grouping",
                pattern: Pattern { bgp: "?x ?p ?o", where_clause: "?x ?p ?o .", group_by: "?x ?p", bind: "?x" },
                subject: Some("urn:temp:7"),
                expected: "CONSTRUCT { ?x ?p ?o } WHERE { ?x ?p ?o . } VALUES (?x) { (<urn:temp:7> ) } GROUP BY ?x ?p",
            },
            TestCase {
                name: "whitespace-only group by is ignored",
                pattern: Pattern { bgp: " ?s ?p ?o ", where_clause: "?s ?p ?o", group_by: "   ", bind: "s" },
                subject: None,
                expected: "CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o }",
            },
        ];

        for case in cases {
            let subject = case.subject.map(|s| Iri::new(s).unwrap());
            let query = build_construct_query(&case.pattern, subject.as_ref());
            assert_eq!(query, case.expected, "Test case '{}'", case.name);
        }
    }

    #[test]
    fn test_builder_is_deterministic() {
        let builder = ConstructQueryBuilder::new("?s ?p ?o", "?s ?p ?o")
            .bind_variable("s")
            .subject(Iri::new("http://ex/1").unwrap());
        assert_eq!(builder.build(), builder.build());
    }
}

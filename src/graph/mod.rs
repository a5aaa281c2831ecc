// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory graph values passed between the graph store and processors.
//!
//! Terms and triples are `oxrdf` values. A [`Graph`] is an insertion-ordered
//! set of [`Triple`]s. It is what a
//! [`GraphStore`](crate::traits::GraphStore) returns for a construct query and
//! what processors inspect. Two operations carry pipeline semantics:
//!
//! * [`Graph::rewrite_iris`] substitutes IRIs in subject and object position,
//!   used to apply a purl mapping to the full uploaded graph.
//! * [`Graph::split_by_anchor`] partitions a construct result into one
//!   subgraph per reference-bearing node, so that independent file references
//!   returned by a single query are never handed to one processor together.

mod term;

pub use term::{parse_iri, BlankNode, Iri, Literal, Subject, SubjectExt, Term, TermExt, Triple, TripleExt};

use indexmap::IndexSet;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple. Returns `false` if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Distinct subjects in first-seen order.
    pub fn subjects(&self) -> Vec<&Subject> {
        let mut seen = IndexSet::new();
        for triple in &self.triples {
            seen.insert(&triple.subject);
        }
        seen.into_iter().collect()
    }

    /// Distinct IRIs in subject or object position, in first-seen order.
    pub fn node_iris(&self) -> Vec<&Iri> {
        let mut seen = IndexSet::new();
        for triple in &self.triples {
            if let Some(iri) = triple.subject.iri() {
                seen.insert(iri);
            }
            if let Some(iri) = triple.object.iri() {
                seen.insert(iri);
            }
        }
        seen.into_iter().collect()
    }

    pub fn triples_for_subject<'a>(&'a self, subject: &'a Subject) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| &t.subject == subject)
    }

    /// First object of `predicate` on `subject`.
    pub fn object_of(&self, subject: &Subject, predicate: &Iri) -> Option<&Term> {
        self.triples
            .iter()
            .find(|t| &t.subject == subject && &t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Triples in which `iri` appears as subject or object.
    pub fn mentioning(&self, iri: &Iri) -> Graph {
        self.triples.iter().filter(|t| t.mentions(iri)).cloned().collect()
    }

    /// Copy of this graph with every subject/object IRI for which `lookup`
    /// returns a replacement substituted. Predicates are left untouched.
    pub fn rewrite_iris<F>(&self, lookup: F) -> Graph
    where
        F: Fn(&Iri) -> Option<Iri>,
    {
        self.triples
            .iter()
            .map(|triple| {
                let subject = match &triple.subject {
                    Subject::NamedNode(iri) => Subject::from(lookup(iri).unwrap_or_else(|| iri.clone())),
                    other => other.clone(),
                };
                let object = match &triple.object {
                    Term::NamedNode(iri) => Term::from(lookup(iri).unwrap_or_else(|| iri.clone())),
                    other => other.clone(),
                };
                Triple::new(subject, triple.predicate.clone(), object)
            })
            .collect()
    }

    /// Partition the graph into one subgraph per anchor node.
    ///
    /// An anchor is any subject carrying `anchor_predicate`. Each subgraph
    /// holds the triples reachable from its anchor by following objects that
    /// are themselves subjects (stopping at other anchors), plus the triples
    /// that point directly at the anchor. Triples unrelated to any anchor are
    /// dropped. Subgraphs come back in anchor first-seen order.
    pub fn split_by_anchor(&self, anchor_predicate: &Iri) -> Vec<(Subject, Graph)> {
        let mut anchors: IndexSet<&Subject> = IndexSet::new();
        for triple in &self.triples {
            if &triple.predicate == anchor_predicate {
                anchors.insert(&triple.subject);
            }
        }

        anchors
            .iter()
            .map(|anchor| {
                let mut component = Graph::new();
                let mut visited: HashSet<&Subject> = HashSet::new();
                let mut queue: VecDeque<&Subject> = VecDeque::from([*anchor]);
                visited.insert(*anchor);

                while let Some(node) = queue.pop_front() {
                    for triple in self.triples_for_subject(node) {
                        component.insert(triple.clone());
                        let Some(next) = self.subject_matching(&triple.object) else {
                            continue;
                        };
                        if !anchors.contains(next) && visited.insert(next) {
                            queue.push_back(next);
                        }
                    }
                }

                let anchor_term = Term::from((*anchor).clone());
                for triple in self.triples.iter().filter(|t| t.object == anchor_term) {
                    component.insert(triple.clone());
                }

                ((*anchor).clone(), component)
            })
            .collect()
    }

    fn subject_matching(&self, term: &Term) -> Option<&Subject> {
        let candidate = term.to_subject()?;
        self.triples
            .iter()
            .map(|t| &t.subject)
            .find(|s| **s == candidate)
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = indexmap::set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for triple in &self.triples {
            writeln!(f, "{} .", triple)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(value: &str) -> Iri {
        Iri::new(value).unwrap()
    }

    fn t(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(iri(s), iri(p), iri(o))
    }

    #[test]
    fn test_duplicate_triples_collapse() {
        let mut graph = Graph::new();
        assert!(graph.insert(t("http://ex/a", "http://ex/p", "http://ex/b")));
        assert!(!graph.insert(t("http://ex/a", "http://ex/p", "http://ex/b")));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_rewrite_replaces_subject_and_object_positions() {
        let temp = iri("urn:temp:1");
        let purl = iri("https://purl.ex/1");
        let graph: Graph = vec![
            t("urn:temp:1", "http://ex/p", "http://ex/b"),
            t("http://ex/a", "http://ex/p", "urn:temp:1"),
            t("http://ex/x", "urn:temp:1", "http://ex/y"),
            Triple::new(iri("http://ex/c"), iri("http://ex/label"), Literal::new_simple_literal("urn:temp:1")),
        ]
        .into_iter()
        .collect();

        let rewritten = graph.rewrite_iris(|candidate| (candidate == &temp).then(|| purl.clone()));

        assert_eq!(rewritten.len(), graph.len());
        assert!(rewritten.contains(&t("https://purl.ex/1", "http://ex/p", "http://ex/b")));
        assert!(rewritten.contains(&t("http://ex/a", "http://ex/p", "https://purl.ex/1")));
        // predicates and literals are not identifiers of resources
        assert!(rewritten.contains(&t("http://ex/x", "urn:temp:1", "http://ex/y")));
        assert!(rewritten.contains(&Triple::new(
            iri("http://ex/c"),
            iri("http://ex/label"),
            Literal::new_simple_literal("urn:temp:1")
        )));
    }

    #[test]
    fn test_split_separates_independent_anchors() {
        let anchor = iri("http://ex/repositoryType");
        let graph: Graph = vec![
            t("http://ex/obj1", "http://ex/hasFile", "http://ex/ref1"),
            t("http://ex/ref1", "http://ex/repositoryType", "http://ex/Ssh"),
            Triple::new(iri("http://ex/ref1"), iri("http://ex/path"), Literal::new_simple_literal("/a")),
            t("http://ex/obj2", "http://ex/hasFile", "http://ex/ref2"),
            t("http://ex/ref2", "http://ex/repositoryType", "http://ex/Ssh"),
            Triple::new(iri("http://ex/ref2"), iri("http://ex/path"), Literal::new_simple_literal("/b")),
        ]
        .into_iter()
        .collect();

        let parts = graph.split_by_anchor(&anchor);

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].0, Subject::from(iri("http://ex/ref1")));
        assert_eq!(parts[0].1.len(), 3);
        assert_eq!(parts[1].1.len(), 3);
        assert!(parts[0].1.iter().all(|t| !t.mentions(&iri("http://ex/ref2"))));
        assert!(parts[1].1.iter().all(|t| !t.mentions(&iri("http://ex/ref1"))));
    }

    #[test]
    fn test_split_keeps_two_references_on_one_object_apart() {
        let anchor = iri("http://ex/repositoryType");
        let graph: Graph = vec![
            t("http://ex/obj", "http://ex/hasFile", "http://ex/ref1"),
            t("http://ex/obj", "http://ex/hasFile", "http://ex/ref2"),
            t("http://ex/ref1", "http://ex/repositoryType", "http://ex/Http"),
            t("http://ex/ref2", "http://ex/repositoryType", "http://ex/Ssh"),
        ]
        .into_iter()
        .collect();

        let parts = graph.split_by_anchor(&anchor);

        assert_eq!(parts.len(), 2);
        for (anchor_node, part) in &parts {
            assert_eq!(part.len(), 2, "subgraph for {}", anchor_node);
        }
    }

    #[test]
    fn test_split_follows_blank_node_chains() {
        let anchor = iri("http://ex/repositoryType");
        let detail = BlankNode::new("b0").unwrap();
        let graph: Graph = vec![
            t("http://ex/ref", "http://ex/repositoryType", "http://ex/Ssh"),
            Triple::new(iri("http://ex/ref"), iri("http://ex/detail"), detail.clone()),
            Triple::new(detail, iri("http://ex/path"), Literal::new_simple_literal("/deep")),
            t("http://ex/unrelated", "http://ex/p", "http://ex/o"),
        ]
        .into_iter()
        .collect();

        let parts = graph.split_by_anchor(&anchor);

        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].1.len(), 3);
    }
}

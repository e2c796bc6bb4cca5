//! Graph snapshots
//!
//! A `Graph` is an owned, order-preserving list of triples. It is what a
//! [`MemoryStore`](crate::MemoryStore) exports and imports, and what tests
//! compare against. Duplicates are kept until `canonicalize()` is called.

use crate::{Term, Triple};

/// An owned list of RDF triples
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    triples: Vec<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Add a triple by components
    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Triple::new(s, p, o));
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

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }

    /// Sort triples by SPO
    pub fn sort(&mut self) {
        self.triples.sort();
    }

    /// Sort, then drop duplicate triples
    pub fn canonicalize(&mut self) {
        self.triples.sort();
        self.triples.dedup();
    }

    pub fn is_sorted(&self) -> bool {
        self.triples.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Triples grouped by subject; sort first for one group per subject
    pub fn group_by_subject(&self) -> SubjectGroups<'_> {
        SubjectGroups {
            triples: &self.triples,
            index: 0,
        }
    }

    /// Distinct subjects, sorted
    pub fn subjects(&self) -> Vec<&Term> {
        let mut subjects: Vec<&Term> = self.triples.iter().map(|t| &t.s).collect();
        subjects.sort();
        subjects.dedup();
        subjects
    }

    /// Render as canonical N-Triples: sorted, deduplicated, one line per triple
    pub fn to_ntriples(&self) -> String {
        let mut sorted: Vec<&Triple> = self.triples.iter().collect();
        sorted.sort();
        sorted.dedup();
        let mut out = String::new();
        for triple in sorted {
            out.push_str(&triple.to_string());
            out.push('\n');
        }
        out
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        Graph {
            triples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}

/// Iterator over runs of triples sharing a subject
pub struct SubjectGroups<'a> {
    triples: &'a [Triple],
    index: usize,
}

impl<'a> Iterator for SubjectGroups<'a> {
    type Item = (&'a Term, &'a [Triple]);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.index;
        let subject = &self.triples.get(start)?.s;
        let run = self.triples[start..]
            .iter()
            .take_while(|t| t.s == *subject)
            .count();
        self.index = start + run;
        Some((subject, &self.triples[start..self.index]))
    }
}

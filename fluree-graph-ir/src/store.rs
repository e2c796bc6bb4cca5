//! Mutable triple store
//!
//! [`TripleStore`] is the statement-level surface the object-modeling layer
//! writes through. Stores have set semantics: adding a statement that is
//! already present changes nothing.
//!
//! [`MemoryStore`] is the in-memory implementation, indexed
//! subject → predicate → object with ordered maps so iteration order (and
//! therefore every rendering of the store) is deterministic.

use crate::{Graph, Term, Triple};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// A statement pattern; `None` positions are wildcards
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub s: Option<Term>,
    pub p: Option<Term>,
    pub o: Option<Term>,
}

impl TriplePattern {
    pub fn new(s: Option<Term>, p: Option<Term>, o: Option<Term>) -> Self {
        Self { s, p, o }
    }

    /// Matches every statement
    pub fn any() -> Self {
        Self::default()
    }

    /// `(s, *, *)`
    pub fn subject(s: Term) -> Self {
        Self::new(Some(s), None, None)
    }

    /// `(s, p, *)`
    pub fn subject_predicate(s: Term, p: Term) -> Self {
        Self::new(Some(s), Some(p), None)
    }

    /// The exact statement `(s, p, o)`
    pub fn exact(triple: &Triple) -> Self {
        Self::new(
            Some(triple.s.clone()),
            Some(triple.p.clone()),
            Some(triple.o.clone()),
        )
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        self.s.as_ref().map_or(true, |s| *s == triple.s)
            && self.p.as_ref().map_or(true, |p| *p == triple.p)
            && self.o.as_ref().map_or(true, |o| *o == triple.o)
    }
}

/// Statement-level store operations
///
/// Implementors provide the four primitives; the remaining operations are
/// derived from them.
pub trait TripleStore {
    /// Add a statement; returns `true` when it was not already present
    fn add(&mut self, triple: Triple) -> bool;

    /// Remove every statement matching `pattern`; returns how many were removed
    fn remove(&mut self, pattern: &TriplePattern) -> usize;

    /// Statements matching `pattern`, in SPO order
    fn triples<'a>(&'a self, pattern: &TriplePattern) -> Box<dyn Iterator<Item = Triple> + 'a>;

    /// Total number of statements
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.triples(&TriplePattern::exact(triple)).next().is_some()
    }

    /// Whether any statement has `s` as its subject
    fn has_subject(&self, s: &Term) -> bool {
        self.triples(&TriplePattern::subject(s.clone())).next().is_some()
    }

    /// Replace every `(s, p, *)` with the single statement `(s, p, o)`
    fn set(&mut self, s: Term, p: Term, o: Term) {
        self.remove(&TriplePattern::subject_predicate(s.clone(), p.clone()));
        self.add(Triple::new(s, p, o));
    }

    /// One object of `(s, p, *)`, the smallest in term order
    fn value(&self, s: &Term, p: &Term) -> Option<Term> {
        self.triples(&TriplePattern::subject_predicate(s.clone(), p.clone()))
            .map(|t| t.o)
            .next()
    }

    /// Every object of `(s, p, *)`, in term order
    fn objects(&self, s: &Term, p: &Term) -> Vec<Term> {
        self.triples(&TriplePattern::subject_predicate(s.clone(), p.clone()))
            .map(|t| t.o)
            .collect()
    }

    /// Snapshot every statement into a [`Graph`]
    fn to_graph(&self) -> Graph {
        self.triples(&TriplePattern::any()).collect()
    }
}

type ObjectSet = BTreeSet<Term>;
type PredicateMap = BTreeMap<Term, ObjectSet>;

/// In-memory store indexed subject → predicate → objects
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    spo: BTreeMap<Term, PredicateMap>,
    len: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct subjects, in term order
    pub fn subjects(&self) -> impl Iterator<Item = &Term> {
        self.spo.keys()
    }

    /// Canonical N-Triples rendering of the whole store
    pub fn to_ntriples(&self) -> String {
        self.to_graph().to_ntriples()
    }

    fn remove_from_subject(predicates: &mut PredicateMap, pattern: &TriplePattern) -> usize {
        let mut removed = 0;
        let keys: Vec<Term> = match &pattern.p {
            Some(p) => vec![p.clone()],
            None => predicates.keys().cloned().collect(),
        };
        for p in keys {
            let Some(objects) = predicates.get_mut(&p) else {
                continue;
            };
            match &pattern.o {
                Some(o) => {
                    if objects.remove(o) {
                        removed += 1;
                    }
                }
                None => {
                    removed += objects.len();
                    objects.clear();
                }
            }
            if objects.is_empty() {
                predicates.remove(&p);
            }
        }
        removed
    }
}

impl TripleStore for MemoryStore {
    fn add(&mut self, triple: Triple) -> bool {
        let Triple { s, p, o } = triple;
        let inserted = self
            .spo
            .entry(s)
            .or_default()
            .entry(p)
            .or_default()
            .insert(o);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn remove(&mut self, pattern: &TriplePattern) -> usize {
        let subjects: Vec<Term> = match &pattern.s {
            Some(s) => vec![s.clone()],
            None => self.spo.keys().cloned().collect(),
        };
        let mut removed = 0;
        for s in subjects {
            let Some(predicates) = self.spo.get_mut(&s) else {
                continue;
            };
            removed += Self::remove_from_subject(predicates, pattern);
            if predicates.is_empty() {
                self.spo.remove(&s);
            }
        }
        self.len -= removed;
        if removed > 0 {
            trace!(removed, remaining = self.len, "removed statements");
        }
        removed
    }

    fn triples<'a>(&'a self, pattern: &TriplePattern) -> Box<dyn Iterator<Item = Triple> + 'a> {
        let pattern = pattern.clone();
        let subjects: Box<dyn Iterator<Item = (&'a Term, &'a PredicateMap)> + 'a> =
            match &pattern.s {
                Some(s) => Box::new(self.spo.get_key_value(s).into_iter()),
                None => Box::new(self.spo.iter()),
            };
        Box::new(
            subjects
                .flat_map(|(s, predicates)| predicates.iter().map(move |(p, objects)| (s, p, objects)))
                .flat_map(|(s, p, objects)| objects.iter().map(move |o| (s, p, o)))
                .filter(move |(_, p, o)| {
                    pattern.p.as_ref().map_or(true, |want| want == *p)
                        && pattern.o.as_ref().map_or(true, |want| want == *o)
                })
                .map(|(s, p, o)| Triple::new(s.clone(), p.clone(), o.clone())),
        )
    }

    fn len(&self) -> usize {
        self.len
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.spo
            .get(&triple.s)
            .and_then(|predicates| predicates.get(&triple.p))
            .is_some_and(|objects| objects.contains(&triple.o))
    }

    fn has_subject(&self, s: &Term) -> bool {
        self.spo.contains_key(s)
    }
}

impl From<Graph> for MemoryStore {
    fn from(graph: Graph) -> Self {
        let mut store = MemoryStore::new();
        store.extend(graph);
        store
    }
}

impl Extend<Triple> for MemoryStore {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        for triple in iter {
            self.add(triple);
        }
    }
}

impl FromIterator<Triple> for MemoryStore {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        let mut store = MemoryStore::new();
        store.extend(iter);
        store
    }
}

//! RDF triple

use crate::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single RDF statement
///
/// Ordering is SPO lexicographic, following [`Term`]'s ordering.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub s: Term,
    pub p: Term,
    pub o: Term,
}

impl Triple {
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { s, p, o }
    }

    /// Predicate IRI, if the predicate is an IRI
    pub fn predicate_iri(&self) -> Option<&str> {
        self.p.as_iri()
    }
}

impl From<(Term, Term, Term)> for Triple {
    fn from((s, p, o): (Term, Term, Term)) -> Self {
        Triple::new(s, p, o)
    }
}

impl fmt::Display for Triple {
    /// One N-Triples line, without the trailing newline
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.s, self.p, self.o)
    }
}

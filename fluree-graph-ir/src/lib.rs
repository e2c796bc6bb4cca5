//! RDF term model and in-memory triple store
//!
//! This crate provides the statement-level layer that the object-modeling
//! crate writes through:
//!
//! - [`Term`], [`LiteralValue`], [`Datatype`], [`BlankId`] and [`Triple`]
//! - [`Graph`], an owned snapshot with deterministic N-Triples rendering
//! - [`TripleStore`], the store collaborator trait, and [`MemoryStore`]
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - IRIs are never stored in prefixed form.
//!    Compaction happens at display time in the layers above.
//!
//! 2. **Explicit datatypes** - Literals always carry a datatype. Plain
//!    strings use `xsd:string`, language-tagged strings use `rdf:langString`.
//!
//! 3. **Set semantics in the store** - Re-adding a statement is a no-op.
//!    A [`Graph`] keeps duplicates until `canonicalize()` is called.
//!
//! # Example
//!
//! ```
//! use fluree_graph_ir::{MemoryStore, Term, Triple, TripleStore};
//!
//! let mut store = MemoryStore::new();
//! let alice = Term::iri("http://example.org/alice");
//! let name = Term::iri("http://example.org/name");
//!
//! assert!(store.add(Triple::new(alice.clone(), name.clone(), Term::string("Alice"))));
//! assert!(!store.add(Triple::new(alice.clone(), name.clone(), Term::string("Alice"))));
//! assert_eq!(store.value(&alice, &name), Some(Term::string("Alice")));
//! ```

pub mod datatype;
mod graph;
pub mod store;
mod term;
mod triple;

pub use datatype::Datatype;
pub use graph::{Graph, SubjectGroups};
pub use store::{MemoryStore, TriplePattern, TripleStore};
pub use term::{BlankId, LiteralValue, Term};
pub use triple::Triple;

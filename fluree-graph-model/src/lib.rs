//! Object-modeling layer over a triple store
//!
//! Resources, classes, properties and collections are Rust values whose
//! every mutation is mirrored immediately into statements in a
//! [`TripleStore`](fluree_graph_ir::TripleStore):
//!
//! - [`ResourceBuilder`] computes deterministic, human-readable addresses
//!   (`<namespace>/<path>#<identifier>`) and writes initialization
//!   statements the first time an address is seen.
//! - [`Bag`], [`Seq`] and [`Alt`] use the `rdf:_n` membership encoding;
//!   [`List`] uses `rdf:first`/`rdf:rest` sublists.
//! - Non-fatal corrections are recorded as [`Diagnostic`]s on the
//!   [`ModelContext`] and mirrored to `tracing`.
//!
//! # Example
//!
//! ```
//! use fluree_graph_model::{ModelContext, ResourceBuilder, Seq, Sequence};
//!
//! let mut ctx = ModelContext::new();
//! let paper = ResourceBuilder::class().label("research paper").build(&mut ctx)?;
//! assert_eq!(
//!     paper.iri(),
//!     Some("http://default.example.com/Class#ResearchPaper")
//! );
//!
//! let mut authors = Seq::with_elements(&mut ctx, ["Ada", "Grace"])?;
//! authors.insert(&mut ctx, 0, "Alan")?;
//! assert_eq!(authors.to_string(), "Seq(Alan, Ada, Grace)");
//! # Ok::<(), fluree_graph_model::ModelError>(())
//! ```

pub mod collection;
pub mod config;
pub mod constraints;
pub mod context;
pub mod diagnostics;
pub mod element;
pub mod error;
pub mod iri;
mod lang;
pub mod namespace;
pub mod resource;

pub use collection::{Alt, Bag, Collection, CollectionOptions, ElementCache, List, Seq, Sequence};
pub use config::{AltDefaultPolicy, ListHeadPolicy, ModelConfig};
pub use constraints::{ClassConstraints, ConstraintRegistry, PropertyConstraint};
pub use context::ModelContext;
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Severity};
pub use element::Element;
pub use error::{ModelError, Result};
pub use lang::normalize_language;
pub use namespace::{Namespace, NamespaceRegistry};
pub use resource::{CollectionKind, Resource, ResourceBuilder, ResourceKind};

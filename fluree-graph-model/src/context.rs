//! Root context
//!
//! A `ModelContext` is created once and passed by `&mut` into every
//! mutating call. It owns the store and every registry the modeling layer
//! consults, so resources and collections hold no references of their own:
//! several collections built against one context share its store and see
//! each other's writes immediately.

use crate::config::ModelConfig;
use crate::constraints::ConstraintRegistry;
use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::namespace::{Namespace, NamespaceRegistry};
use fluree_graph_ir::{MemoryStore, Term, TriplePattern, TripleStore};
use tracing::trace;

pub struct ModelContext<S: TripleStore = MemoryStore> {
    store: S,
    namespaces: NamespaceRegistry,
    constraints: ConstraintRegistry,
    config: ModelConfig,
    default_namespace: Namespace,
    diagnostics: Diagnostics,
    next_blank: u64,
}

impl ModelContext<MemoryStore> {
    /// Context over a fresh in-memory store with the default configuration
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    pub fn with_config(config: ModelConfig) -> Self {
        Self::with_store(MemoryStore::new(), config)
    }
}

impl Default for ModelContext<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TripleStore> ModelContext<S> {
    pub fn with_store(store: S, config: ModelConfig) -> Self {
        let default_namespace = Namespace::new(&config.default_namespace);
        let next_blank = first_free_blank(&store);
        Self {
            store,
            namespaces: NamespaceRegistry::new(&default_namespace),
            constraints: ConstraintRegistry::new(),
            config,
            default_namespace,
            diagnostics: Diagnostics::new(),
            next_blank,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn namespaces(&self) -> &NamespaceRegistry {
        &self.namespaces
    }

    pub fn namespaces_mut(&mut self) -> &mut NamespaceRegistry {
        &mut self.namespaces
    }

    pub fn constraints(&self) -> &ConstraintRegistry {
        &self.constraints
    }

    pub fn constraints_mut(&mut self) -> &mut ConstraintRegistry {
        &mut self.constraints
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn default_namespace(&self) -> &Namespace {
        &self.default_namespace
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Record an advisory about `subject`
    pub(crate) fn advise(&mut self, code: DiagnosticCode, message: impl Into<String>, subject: Option<&Term>) {
        let mut diagnostic = Diagnostic::new(code, message);
        if let Some(term) = subject {
            diagnostic = diagnostic.with_subject(self.render(term));
        }
        self.diagnostics.push(diagnostic);
    }

    /// Human-readable form of a term, compacted through the registry
    pub fn render(&self, term: &Term) -> String {
        match term.as_iri() {
            Some(iri) => self.namespaces.compact(iri),
            None => term.to_string(),
        }
    }

    /// Allocate a blank node not yet used in the store
    ///
    /// The counter starts past every `_:bN` present when the context was
    /// created, so only subjects need checking here. A `_:bN` label written
    /// later through [`store_mut`](Self::store_mut) solely as an object is
    /// not seen.
    pub fn fresh_blank(&mut self) -> Term {
        loop {
            let candidate = Term::blank(format!("b{}", self.next_blank));
            self.next_blank += 1;
            if !self.store.has_subject(&candidate) {
                trace!(blank = %candidate, "allocated blank node");
                return candidate;
            }
        }
    }
}

/// One past the highest `_:bN` label in `store`, or 0
fn first_free_blank<S: TripleStore>(store: &S) -> u64 {
    store
        .triples(&TriplePattern::any())
        .flat_map(|t| [t.s, t.o])
        .filter_map(|term| {
            term.as_blank()?
                .as_str()
                .strip_prefix('b')?
                .parse::<u64>()
                .ok()
        })
        .max()
        .map_or(0, |n| n + 1)
}

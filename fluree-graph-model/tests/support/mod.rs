//! Shared harness for fluree-graph-model integration tests.

// Not every integration test crate uses every helper.
#![allow(dead_code)]

use fluree_graph_ir::{MemoryStore, Term, TriplePattern, TripleStore};
use fluree_graph_model::{Diagnostic, ListHeadPolicy, ModelConfig, ModelContext};
use fluree_vocab::rdf;
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Tracing
// =============================================================================

/// Install a per-test subscriber writing through the test harness.
///
/// Honors `RUST_LOG`; defaults to `debug` for this crate. Dropping the guard
/// restores the previous subscriber.
pub fn init_tracing() -> tracing::subscriber::DefaultGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fluree_graph_model=debug"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}

// =============================================================================
// Context helpers
// =============================================================================

pub fn context() -> ModelContext {
    ModelContext::new()
}

pub fn stable_context() -> ModelContext {
    ModelContext::with_config(ModelConfig::default().with_list_head_policy(ListHeadPolicy::Stable))
}

/// Context whose diagnostics are also copied into the returned buffer as
/// they are recorded
pub fn observed_context() -> (ModelContext, Rc<RefCell<Vec<Diagnostic>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut ctx = ModelContext::new();
    ctx.diagnostics_mut()
        .set_observer(move |d| sink.borrow_mut().push(d.clone()));
    (ctx, seen)
}

// =============================================================================
// Store inspection
// =============================================================================

/// `(position, value)` for every `rdf:_n` statement on `subject`, by position
pub fn members(store: &MemoryStore, subject: &Term) -> Vec<(usize, Term)> {
    let mut found: Vec<(usize, Term)> = store
        .triples(&TriplePattern::subject(subject.clone()))
        .filter_map(|t| Some((rdf::member_position(t.p.as_iri()?)?, t.o)))
        .collect();
    found.sort();
    found
}

/// Assert positions on `subject` run exactly `1..=expected.len()` with
/// `expected` values
pub fn assert_members(store: &MemoryStore, subject: &Term, expected: &[Term]) {
    let found = members(store, subject);
    let positions: Vec<usize> = found.iter().map(|(p, _)| *p).collect();
    let values: Vec<Term> = found.into_iter().map(|(_, v)| v).collect();
    assert_eq!(positions, (1..=expected.len()).collect::<Vec<_>>(), "positions not contiguous");
    assert_eq!(values, expected, "member values differ");
}

/// Nodes reached from `head` by following `rdf:rest`, excluding `rdf:nil`
pub fn list_nodes(store: &MemoryStore, head: &Term) -> Vec<Term> {
    let rest = Term::iri(rdf::REST);
    let mut nodes = Vec::new();
    let mut node = head.clone();
    while !node.is_nil() && nodes.len() <= store.len() {
        let next = store.value(&node, &rest);
        nodes.push(node);
        match next {
            Some(next) => node = next,
            None => break,
        }
    }
    nodes
}

pub fn ints(values: &[i64]) -> Vec<Term> {
    values.iter().map(|v| Term::integer(*v)).collect()
}

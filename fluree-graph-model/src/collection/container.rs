//! `rdf:_n` membership mechanics shared by Bag, Seq and Alt

use super::{CollectionOptions, ElementCache};
use crate::context::ModelContext;
use crate::element::Element;
use crate::error::Result;
use crate::resource::{CollectionKind, Resource, ResourceBuilder};
use fluree_graph_ir::{Term, TriplePattern, TripleStore};
use fluree_vocab::rdf;
use tracing::{debug, trace};

/// A container node plus its element cache
///
/// Invariant: the store holds exactly `(node, rdf:_i, formatted[i - 1])` for
/// `i = 1..=len`, one statement per position.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Container {
    resource: Resource,
    cache: ElementCache,
}

impl Container {
    pub(crate) fn create<S: TripleStore>(
        ctx: &mut ModelContext<S>,
        kind: CollectionKind,
        options: &CollectionOptions,
    ) -> Result<Self> {
        let mut builder = ResourceBuilder::collection(kind);
        if let Some(check) = options.check_triples {
            builder = builder.check_triples(check);
        }
        Ok(Self {
            resource: builder.build(ctx)?,
            cache: ElementCache::new(),
        })
    }

    pub(crate) fn resource(&self) -> &Resource {
        &self.resource
    }

    pub(crate) fn cache(&self) -> &ElementCache {
        &self.cache
    }

    pub(crate) fn options(&self) -> CollectionOptions {
        CollectionOptions::default().check_triples(self.resource.check_triples())
    }

    pub(crate) fn len(&self) -> usize {
        self.cache.len()
    }

    /// Membership predicate for zero-based `index`
    fn member(index: usize) -> String {
        rdf::member(index + 1)
    }

    /// Rewrite the values of positions `from..len` from the cache
    fn rewrite_from<S: TripleStore>(&self, ctx: &mut ModelContext<S>, from: usize) {
        let subject = self.resource.term();
        for (index, term) in self.cache.formatted().iter().enumerate().skip(from) {
            ctx.store_mut()
                .set(subject.clone(), Term::iri(Self::member(index)), term.clone());
        }
    }

    pub(crate) fn append<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: Element) -> Result<()> {
        let index = self.len();
        let predicate = Self::member(index);
        let term = self.resource.write(ctx, &predicate, &element)?;
        trace!(subject = %self.resource, predicate = %predicate, "appended member");
        self.cache.push(element, term);
        Ok(())
    }

    /// Insert at `index`, shifting later values up one position
    pub(crate) fn insert<S: TripleStore>(
        &mut self,
        ctx: &mut ModelContext<S>,
        index: usize,
        element: Element,
    ) -> Result<()> {
        if index >= self.len() {
            return self.append(ctx, element);
        }
        let term = self
            .resource
            .checked_object(ctx, &Self::member(index), &element)?;
        self.cache.insert(index, element, term);
        self.rewrite_from(ctx, index);
        trace!(subject = %self.resource, index, len = self.len(), "inserted member");
        Ok(())
    }

    /// Remove the element at `index`, shifting later values down and
    /// dropping the last membership statement
    pub(crate) fn pop<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, index: usize) -> Result<Element> {
        let (element, _) = self.cache.remove(index);
        self.rewrite_from(ctx, index);
        let last = Term::iri(Self::member(self.len()));
        ctx.store_mut().remove(&TriplePattern::subject_predicate(
            self.resource.term().clone(),
            last,
        ));
        trace!(subject = %self.resource, index, len = self.len(), "popped member");
        Ok(element)
    }

    pub(crate) fn set_item<S: TripleStore>(
        &mut self,
        ctx: &mut ModelContext<S>,
        index: usize,
        element: Element,
    ) -> Result<Element> {
        let term = self.resource.write(ctx, &Self::member(index), &element)?;
        Ok(self.cache.replace(index, element, term))
    }

    pub(crate) fn clear<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>) {
        let subject = self.resource.term().clone();
        for index in 0..self.len() {
            ctx.store_mut().remove(&TriplePattern::subject_predicate(
                subject.clone(),
                Term::iri(Self::member(index)),
            ));
        }
        debug!(subject = %subject, removed = self.len(), "cleared container");
        self.cache.clear();
    }
}

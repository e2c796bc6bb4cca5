use super::{access_index, render, Collection, CollectionOptions, ElementCache, Sequence};
use crate::config::ListHeadPolicy;
use crate::context::ModelContext;
use crate::element::Element;
use crate::error::Result;
use crate::resource::{CollectionKind, Resource, ResourceBuilder};
use fluree_graph_ir::{Term, TriplePattern, TripleStore};
use fluree_vocab::rdf;
use std::fmt;
use tracing::debug;

/// Linked list mirrored as `rdf:first`/`rdf:rest` sublists
///
/// Each element lives on its own blank sublist typed `rdf:List`; the list's
/// own node is sublist 0 and the last sublist's `rdf:rest` is `rdf:nil`. An
/// empty list is a bare typed node with neither predicate.
///
/// How the head behaves when the first element is removed or a new first
/// element is inserted depends on the [`ListHeadPolicy`] the list was built
/// with.
#[derive(Clone, Debug, PartialEq)]
pub struct List {
    head: Resource,
    cache: ElementCache,
    /// One node per element; `sublists[0]` is the head when non-empty
    sublists: Vec<Resource>,
    policy: ListHeadPolicy,
}

impl List {
    pub fn new<S: TripleStore>(ctx: &mut ModelContext<S>) -> Result<Self> {
        Self::with_options(ctx, Vec::<Element>::new(), CollectionOptions::default())
    }

    pub fn with_elements<S, I>(ctx: &mut ModelContext<S>, elements: I) -> Result<Self>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        Self::with_options(ctx, elements, CollectionOptions::default())
    }

    pub fn with_options<S, I>(ctx: &mut ModelContext<S>, elements: I, options: CollectionOptions) -> Result<Self>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        let mut builder = ResourceBuilder::collection(CollectionKind::List);
        if let Some(check) = options.check_triples {
            builder = builder.check_triples(check);
        }
        let mut list = Self {
            head: builder.build(ctx)?,
            cache: ElementCache::new(),
            sublists: Vec::new(),
            policy: ctx.config().list_head_policy,
        };
        list.extend(ctx, elements)?;
        Ok(list)
    }

    /// Use `policy` for head removal and insertion from now on
    pub fn with_policy(mut self, policy: ListHeadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ListHeadPolicy {
        self.policy
    }

    /// Sublist nodes, head first
    pub fn sublists(&self) -> impl Iterator<Item = &Term> {
        self.sublists.iter().map(Resource::term)
    }

    /// Values reached by following `rdf:rest` from the head in the store
    ///
    /// Stops at `rdf:nil`, at a node without `rdf:first`, or after as many
    /// steps as the store has statements, so a cyclic chain cannot loop.
    pub fn chain<S: TripleStore>(&self, ctx: &ModelContext<S>) -> Vec<Term> {
        let store = ctx.store();
        let first = Term::iri(rdf::FIRST);
        let rest = Term::iri(rdf::REST);
        let limit = store.len();
        let mut values = Vec::new();
        let mut node = self.head.term().clone();
        while !node.is_nil() && values.len() < limit {
            let Some(value) = store.value(&node, &first) else {
                break;
            };
            values.push(value);
            match store.value(&node, &rest) {
                Some(next) => node = next,
                None => break,
            }
        }
        values
    }

    fn new_node<S: TripleStore>(&self, ctx: &mut ModelContext<S>) -> Result<Resource> {
        ResourceBuilder::collection(CollectionKind::List)
            .check_triples(self.head.check_triples())
            .build(ctx)
    }

    /// Node following position `index`, or `rdf:nil`
    fn next_after(&self, index: usize) -> Term {
        self.sublists
            .get(index + 1)
            .map_or_else(Term::nil, |node| node.term().clone())
    }

    fn put<S: TripleStore>(ctx: &mut ModelContext<S>, node: &Term, predicate: &str, object: Term) {
        ctx.store_mut().set(node.clone(), Term::iri(predicate), object);
    }

    fn unlink_head<S: TripleStore>(&self, ctx: &mut ModelContext<S>) {
        for predicate in [rdf::FIRST, rdf::REST] {
            ctx.store_mut().remove(&TriplePattern::subject_predicate(
                self.head.term().clone(),
                Term::iri(predicate),
            ));
        }
    }

    /// Stable-head insertion at position 0: the head takes the new value
    /// and its old value moves into a new second sublist
    fn shift_into_head<S: TripleStore>(
        &mut self,
        ctx: &mut ModelContext<S>,
        element: Element,
        term: Term,
    ) -> Result<()> {
        let displaced = self.cache.raw()[0].clone();
        let displaced_term = self.cache.formatted()[0].clone();
        let node = self.new_node(ctx)?;
        Self::put(ctx, node.term(), rdf::FIRST, displaced_term.clone());
        Self::put(ctx, node.term(), rdf::REST, self.next_after(0));
        Self::put(ctx, self.head.term(), rdf::FIRST, term.clone());
        Self::put(ctx, self.head.term(), rdf::REST, node.term().clone());
        self.sublists.insert(1, node);
        self.cache.replace(0, element, term);
        self.cache.insert(1, displaced, displaced_term);
        Ok(())
    }
}

impl Collection for List {
    fn resource(&self) -> &Resource {
        &self.head
    }

    fn cache(&self) -> &ElementCache {
        &self.cache
    }

    fn kind(&self) -> CollectionKind {
        CollectionKind::List
    }

    fn append_one<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: Element) -> Result<()> {
        let term = self.head.checked_object(ctx, rdf::FIRST, &element)?;
        let node = match self.sublists.last() {
            None => self.head.clone(),
            Some(_) => self.new_node(ctx)?,
        };
        Self::put(ctx, node.term(), rdf::FIRST, term.clone());
        Self::put(ctx, node.term(), rdf::REST, Term::nil());
        if let Some(previous) = self.sublists.last() {
            Self::put(ctx, previous.term(), rdf::REST, node.term().clone());
        }
        self.sublists.push(node);
        self.cache.push(element, term);
        Ok(())
    }

    fn insert_at<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, index: usize, element: Element) -> Result<()> {
        if index >= self.len() {
            return self.append_one(ctx, element);
        }
        let term = self.head.checked_object(ctx, rdf::FIRST, &element)?;
        if index == 0 && self.policy == ListHeadPolicy::Stable {
            return self.shift_into_head(ctx, element, term);
        }

        let node = self.new_node(ctx)?;
        Self::put(ctx, node.term(), rdf::FIRST, term.clone());
        Self::put(ctx, node.term(), rdf::REST, self.sublists[index].term().clone());
        if index == 0 {
            debug!(from = %self.head, to = %node, "list head moved to new first node");
            self.head.rebind(node.term().clone());
        } else {
            Self::put(ctx, self.sublists[index - 1].term(), rdf::REST, node.term().clone());
        }
        self.sublists.insert(index, node);
        self.cache.insert(index, element, term);
        Ok(())
    }

    fn pop_at<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, index: usize) -> Result<Element> {
        if self.len() == 1 {
            self.unlink_head(ctx);
            self.sublists.clear();
            let (element, _) = self.cache.remove(0);
            return Ok(element);
        }

        let (element, _) = self.cache.remove(index);
        match (index, self.policy) {
            (0, ListHeadPolicy::Promote) => {
                let old = self.sublists.remove(0);
                old.purge(ctx);
                let promoted = self.sublists[0].term().clone();
                debug!(from = %old, to = %promoted, "list head promoted");
                self.head.rebind(promoted);
            }
            (0, ListHeadPolicy::Stable) => {
                let second = self.sublists.remove(1);
                Self::put(ctx, self.head.term(), rdf::FIRST, self.cache.formatted()[0].clone());
                Self::put(ctx, self.head.term(), rdf::REST, self.next_after(0));
                second.purge(ctx);
            }
            _ => {
                let node = self.sublists.remove(index);
                node.purge(ctx);
                let next = self
                    .sublists
                    .get(index)
                    .map_or_else(Term::nil, |n| n.term().clone());
                Self::put(ctx, self.sublists[index - 1].term(), rdf::REST, next);
            }
        }
        Ok(element)
    }

    fn clear<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>) -> Result<()> {
        for node in self.sublists.iter().skip(1) {
            node.purge(ctx);
        }
        self.unlink_head(ctx);
        debug!(subject = %self.head, removed = self.len(), "cleared list");
        self.sublists.clear();
        self.cache.clear();
        Ok(())
    }

    fn empty_like<S: TripleStore>(&self, ctx: &mut ModelContext<S>) -> Result<Self> {
        let options = CollectionOptions::default().check_triples(self.head.check_triples());
        Ok(Self::with_options(ctx, Vec::<Element>::new(), options)?.with_policy(self.policy))
    }
}

impl Sequence for List {
    fn set_item<S: TripleStore>(
        &mut self,
        ctx: &mut ModelContext<S>,
        index: isize,
        element: impl Into<Element>,
    ) -> Result<()> {
        let index = access_index(index, self.len())?;
        let element = element.into();
        let term = self.head.checked_object(ctx, rdf::FIRST, &element)?;
        Self::put(ctx, self.sublists[index].term(), rdf::FIRST, term.clone());
        self.cache.replace(index, element, term);
        Ok(())
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(CollectionKind::List, self.elements()))
    }
}

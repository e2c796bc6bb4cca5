use super::container::Container;
use super::{render, Collection, CollectionOptions, ElementCache};
use crate::context::ModelContext;
use crate::diagnostics::DiagnosticCode;
use crate::element::Element;
use crate::error::{ModelError, Result};
use crate::resource::{CollectionKind, Resource};
use fluree_graph_ir::TripleStore;
use std::fmt;

/// Unordered multiset mirrored as an `rdf:Bag`
///
/// A bag built with [`Bag::unique`] drops elements equal to one already
/// present and records `DuplicateSuppressed` for each.
#[derive(Clone, Debug, PartialEq)]
pub struct Bag {
    core: Container,
    unique: bool,
}

impl Bag {
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

    /// Bag that suppresses duplicates
    pub fn unique<S, I>(ctx: &mut ModelContext<S>, elements: I) -> Result<Self>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        Self::build(ctx, elements, CollectionOptions::default(), true)
    }

    pub fn with_options<S, I>(ctx: &mut ModelContext<S>, elements: I, options: CollectionOptions) -> Result<Self>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        Self::build(ctx, elements, options, false)
    }

    fn build<S, I>(ctx: &mut ModelContext<S>, elements: I, options: CollectionOptions, unique: bool) -> Result<Self>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        let mut bag = Self {
            core: Container::create(ctx, CollectionKind::Bag, &options)?,
            unique,
        };
        bag.extend(ctx, elements)?;
        Ok(bag)
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Add one element; returns `false` when a unique bag suppressed it
    pub fn add<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: impl Into<Element>) -> Result<bool> {
        let element = element.into();
        if self.suppress(ctx, &element) {
            return Ok(false);
        }
        self.core.append(ctx, element)?;
        Ok(true)
    }

    /// Add every element of `elements`
    pub fn update<S, I>(&mut self, ctx: &mut ModelContext<S>, elements: I) -> Result<()>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        for element in elements {
            self.add(ctx, element)?;
        }
        Ok(())
    }

    /// Remove every instance of `element`; returns how many were removed
    pub fn remove_all<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: impl Into<Element>) -> Result<usize> {
        let term = self.format(&element.into());
        let mut removed = 0;
        while let Some(index) = self.formatted().iter().position(|t| *t == term) {
            self.core.pop(ctx, index)?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Whether `element` must be dropped, recording the advisory if so
    fn suppress<S: TripleStore>(&self, ctx: &mut ModelContext<S>, element: &Element) -> bool {
        if !self.unique || self.position(element).is_none() {
            return false;
        }
        ctx.advise(
            DiagnosticCode::DuplicateSuppressed,
            format!("{element} is already a member"),
            Some(self.term()),
        );
        true
    }
}

impl Collection for Bag {
    fn resource(&self) -> &Resource {
        self.core.resource()
    }

    fn cache(&self) -> &ElementCache {
        self.core.cache()
    }

    fn kind(&self) -> CollectionKind {
        CollectionKind::Bag
    }

    fn append_one<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: Element) -> Result<()> {
        self.add(ctx, element).map(|_| ())
    }

    fn insert_at<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, index: usize, element: Element) -> Result<()> {
        if self.suppress(ctx, &element) {
            return Ok(());
        }
        self.core.insert(ctx, index, element)
    }

    fn pop_at<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, index: usize) -> Result<Element> {
        self.core.pop(ctx, index)
    }

    fn clear<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>) -> Result<()> {
        self.core.clear(ctx);
        Ok(())
    }

    fn empty_like<S: TripleStore>(&self, ctx: &mut ModelContext<S>) -> Result<Self> {
        Self::build(ctx, Vec::<Element>::new(), self.core.options(), self.unique)
    }

    /// Bags remove every instance; fails when there is none
    fn remove<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: impl Into<Element>) -> Result<Element> {
        let element = element.into();
        match self.remove_all(ctx, element.clone())? {
            0 => Err(ModelError::not_found(element.to_string())),
            _ => Ok(element),
        }
    }

    fn discard<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: impl Into<Element>) -> Result<bool> {
        Ok(self.remove_all(ctx, element)? > 0)
    }
}

impl fmt::Display for Bag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(CollectionKind::Bag, self.elements()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluree_graph_ir::Term;

    #[test]
    fn test_counts_duplicates() {
        let mut ctx = ModelContext::new();
        let bag = Bag::with_elements(&mut ctx, ["a", "a", "b"]).unwrap();
        assert_eq!(bag.len(), 3);
        assert_eq!(bag.count("a"), 2);
        assert_eq!(bag.count("c"), 0);
        assert_eq!(bag.to_string(), "Bag(a, a, b)");
    }

    #[test]
    fn test_remove_takes_every_instance() {
        let mut ctx = ModelContext::new();
        let mut bag = Bag::with_elements(&mut ctx, ["a", "b", "a"]).unwrap();
        assert_eq!(bag.remove(&mut ctx, "a").unwrap(), Element::from("a"));
        assert_eq!(bag.elements(), &[Element::from("b")]);
        assert!(matches!(
            bag.remove(&mut ctx, "a"),
            Err(ModelError::ElementNotFound(_))
        ));
        assert!(!bag.discard(&mut ctx, "a").unwrap());
        assert_eq!(bag.resource().statements(&ctx).len(), 2);
    }

    #[test]
    fn test_unique_bag_suppresses_duplicates() {
        let mut ctx = ModelContext::new();
        let mut bag = Bag::unique(&mut ctx, [1, 2, 1]).unwrap();
        assert_eq!(bag.formatted(), &[Term::integer(1), Term::integer(2)]);
        assert!(!bag.add(&mut ctx, 2).unwrap());
        assert!(bag.add(&mut ctx, 3).unwrap());
        assert_eq!(ctx.diagnostics().count(DiagnosticCode::DuplicateSuppressed), 2);
    }

    #[test]
    fn test_copy_keeps_options() {
        let mut ctx = ModelContext::new();
        let bag = Bag::unique(&mut ctx, ["x"]).unwrap();
        let mut copy = bag.copy(&mut ctx).unwrap();
        assert_ne!(copy.term(), bag.term());
        assert!(copy.is_unique());
        assert!(!copy.add(&mut ctx, "x").unwrap());
    }
}

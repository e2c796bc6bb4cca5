use super::container::Container;
use super::{access_index, render, Collection, CollectionOptions, ElementCache, Sequence};
use crate::context::ModelContext;
use crate::element::Element;
use crate::error::Result;
use crate::resource::{CollectionKind, Resource};
use fluree_graph_ir::TripleStore;
use std::fmt;

/// Ordered sequence mirrored as an `rdf:Seq`
#[derive(Clone, Debug, PartialEq)]
pub struct Seq {
    core: Container,
}

impl Seq {
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
        let mut seq = Self {
            core: Container::create(ctx, CollectionKind::Seq, &options)?,
        };
        seq.extend(ctx, elements)?;
        Ok(seq)
    }
}

impl Collection for Seq {
    fn resource(&self) -> &Resource {
        self.core.resource()
    }

    fn cache(&self) -> &ElementCache {
        self.core.cache()
    }

    fn kind(&self) -> CollectionKind {
        CollectionKind::Seq
    }

    fn append_one<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: Element) -> Result<()> {
        self.core.append(ctx, element)
    }

    fn insert_at<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, index: usize, element: Element) -> Result<()> {
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
        Self::with_options(ctx, Vec::<Element>::new(), self.core.options())
    }
}

impl Sequence for Seq {
    fn set_item<S: TripleStore>(
        &mut self,
        ctx: &mut ModelContext<S>,
        index: isize,
        element: impl Into<Element>,
    ) -> Result<()> {
        let index = access_index(index, self.len())?;
        self.core.set_item(ctx, index, element.into()).map(|_| ())
    }
}

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(CollectionKind::Seq, self.elements()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use fluree_graph_ir::Term;
    use fluree_vocab::rdf;

    fn value_at(ctx: &ModelContext, seq: &Seq, position: usize) -> Option<Term> {
        ctx.store()
            .value(seq.term(), &Term::iri(rdf::member(position)))
    }

    #[test]
    fn test_order_is_preserved() {
        let mut ctx = ModelContext::new();
        let seq = Seq::with_elements(&mut ctx, ["c", "a", "b"]).unwrap();
        assert_eq!(value_at(&ctx, &seq, 1), Some(Term::string("c")));
        assert_eq!(value_at(&ctx, &seq, 3), Some(Term::string("b")));
        assert_eq!(value_at(&ctx, &seq, 4), None);
        assert_eq!(seq.get(-1).unwrap(), &Element::from("b"));
    }

    #[test]
    fn test_insert_clamps_and_pop_defaults_to_last() {
        let mut ctx = ModelContext::new();
        let mut seq = Seq::with_elements(&mut ctx, [1, 2]).unwrap();
        seq.insert(&mut ctx, 10, 3).unwrap();
        seq.insert(&mut ctx, -10, 0).unwrap();
        assert_eq!(
            seq.formatted(),
            &[Term::integer(0), Term::integer(1), Term::integer(2), Term::integer(3)]
        );
        assert_eq!(seq.pop(&mut ctx, None).unwrap(), Element::from(3));
        assert_eq!(seq.pop(&mut ctx, Some(0)).unwrap(), Element::from(0));
        assert_eq!(value_at(&ctx, &seq, 1), Some(Term::integer(1)));
        assert_eq!(value_at(&ctx, &seq, 3), None);
    }

    #[test]
    fn test_index_bounds() {
        let mut ctx = ModelContext::new();
        let seq = Seq::with_elements(&mut ctx, ["a", "b", "a"]).unwrap();
        assert_eq!(seq.index("a", 0, -1).unwrap(), 0);
        assert_eq!(seq.index("a", 1, -1).unwrap(), 2);
        assert!(matches!(seq.index("b", 2, 2), Err(ModelError::ElementNotFound(_))));
        assert!(matches!(
            seq.index("a", 5, -1),
            Err(ModelError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_set_item_and_sort() {
        let mut ctx = ModelContext::new();
        let mut seq = Seq::with_elements(&mut ctx, [3, 1, 2]).unwrap();
        seq.set_item(&mut ctx, -1, 5).unwrap();
        seq.sort(&mut ctx).unwrap();
        assert_eq!(seq.to_string(), "Seq(1, 3, 5)");
        assert_eq!(value_at(&ctx, &seq, 3), Some(Term::integer(5)));

        seq.reverse(&mut ctx).unwrap();
        assert_eq!(seq.iter_rev().next(), Some(&Element::from(1)));
        assert!(seq.set_item(&mut ctx, 3, 0).is_err());
    }

    #[test]
    fn test_sort_mixed_numbers() {
        let mut ctx = ModelContext::new();
        let mut seq =
            Seq::with_elements(&mut ctx, [Element::from(3), Element::from(2.5), Element::from(1)]).unwrap();
        seq.sort(&mut ctx).unwrap();
        assert_eq!(seq.to_string(), "Seq(1, 2.5, 3)");
        assert_eq!(value_at(&ctx, &seq, 2), Some(Term::double(2.5)));

        seq.sort_descending(&mut ctx).unwrap();
        assert_eq!(seq.to_string(), "Seq(3, 2.5, 1)");
        assert_eq!(value_at(&ctx, &seq, 1), Some(Term::integer(3)));
    }
}

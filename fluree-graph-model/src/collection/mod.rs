//! Collections mirrored into the store
//!
//! Every collection keeps two parallel caches: the raw [`Element`]s the
//! caller supplied and their store-ready [`Term`]s. Lookups (`index`,
//! `count`, `contains`) compare the formatted terms, so equality is exact and
//! type-sensitive.
//!
//! Encodings written to the store:
//!
//! - [`Bag`], [`Seq`], [`Alt`]: `(c, rdf:_n, value_n)` for `n = 1..len`,
//!   contiguous. Positions are never renumbered on insert or pop; values
//!   shift across the existing predicates instead.
//! - [`List`]: one blank sublist per element, `(node, rdf:first, value)` and
//!   `(node, rdf:rest, next-or-rdf:nil)`; the list's own node is sublist 0.
//!
//! Mutations are not transactional. An error raised partway through a
//! multi-statement update leaves the store and the caches as they were at
//! the failing write.

mod alt;
mod bag;
mod container;
mod list;
mod seq;

pub use alt::Alt;
pub use bag::Bag;
pub use list::List;
pub use seq::Seq;

use crate::context::ModelContext;
use crate::element::Element;
use crate::error::{ModelError, Result};
use crate::resource::{CollectionKind, Resource};
use fluree_graph_ir::{LiteralValue, Term, TripleStore};
use std::cmp::Ordering;

/// Rendered collections longer than this are trimmed around an ellipsis
const DISPLAY_THRESHOLD: usize = 80;

/// Budget for each side of a trimmed rendering
const DISPLAY_SIDE_THRESHOLD: usize = 35;

const DISPLAY_SEPARATOR: &str = ", ";

/// Construction options shared by every collection kind
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionOptions {
    /// Override the context's `check_triples` for this collection
    pub check_triples: Option<bool>,
}

impl CollectionOptions {
    pub fn check_triples(mut self, enabled: bool) -> Self {
        self.check_triples = Some(enabled);
        self
    }
}

/// Raw elements and their formatted terms, always the same length
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementCache {
    raw: Vec<Element>,
    formatted: Vec<Term>,
}

impl ElementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn raw(&self) -> &[Element] {
        &self.raw
    }

    pub fn formatted(&self) -> &[Term] {
        &self.formatted
    }

    pub(crate) fn push(&mut self, element: Element, term: Term) {
        self.raw.push(element);
        self.formatted.push(term);
    }

    pub(crate) fn insert(&mut self, index: usize, element: Element, term: Term) {
        self.raw.insert(index, element);
        self.formatted.insert(index, term);
    }

    pub(crate) fn remove(&mut self, index: usize) -> (Element, Term) {
        (self.raw.remove(index), self.formatted.remove(index))
    }

    pub(crate) fn replace(&mut self, index: usize, element: Element, term: Term) -> Element {
        self.formatted[index] = term;
        std::mem::replace(&mut self.raw[index], element)
    }

    pub(crate) fn clear(&mut self) {
        self.raw.clear();
        self.formatted.clear();
    }

    /// First position of `term` within `start..=end`
    fn position_in(&self, term: &Term, start: usize, end: usize) -> Option<usize> {
        if start > end || end >= self.formatted.len() {
            return None;
        }
        self.formatted[start..=end]
            .iter()
            .position(|t| t == term)
            .map(|offset| start + offset)
    }
}

/// Normalize an access index; valid indices lie in `[-len, len)`
pub(crate) fn access_index(index: isize, len: usize) -> Result<usize> {
    let signed_len = len as isize;
    if index < -signed_len || index >= signed_len {
        return Err(ModelError::out_of_range(index, len));
    }
    Ok(if index < 0 { index + signed_len } else { index } as usize)
}

/// Normalize an insertion index, clamping to `[0, len]`
pub(crate) fn insertion_index(index: isize, len: usize) -> usize {
    let signed_len = len as isize;
    if index >= signed_len {
        len
    } else if index <= -signed_len {
        0
    } else if index < 0 {
        (index + signed_len) as usize
    } else {
        index as usize
    }
}

/// `Kind(a, b, c)`, trimmed around an ellipsis when long
pub(crate) fn render(kind: CollectionKind, elements: &[Element]) -> String {
    let rendered: Vec<String> = elements.iter().map(ToString::to_string).collect();
    let joined = rendered.join(DISPLAY_SEPARATOR);
    if joined.chars().count() <= DISPLAY_THRESHOLD {
        return format!("{}({})", kind.name(), joined);
    }

    let head = trim_side(rendered.iter());
    let mut tail = trim_side(rendered.iter().rev());
    tail.reverse();
    let mut parts = head;
    parts.push("...");
    parts.extend(tail);
    format!("{}({})", kind.name(), parts.join(DISPLAY_SEPARATOR))
}

/// Leading items whose joined length stays within the side budget; the
/// first item is always kept
fn trim_side<'a>(mut items: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let Some(first) = items.next() else {
        return Vec::new();
    };
    let mut kept = vec![first.as_str()];
    let mut count = first.chars().count();
    for item in items {
        count += item.chars().count() + DISPLAY_SEPARATOR.len();
        if count > DISPLAY_SIDE_THRESHOLD {
            break;
        }
        kept.push(item.as_str());
    }
    kept
}

/// Behavior shared by Bag, Seq, Alt and List
///
/// Implementors supply the four statement-maintenance primitives
/// (`append_one`, `insert_at`, `pop_at`, `clear`); everything else is
/// derived from them and the element cache.
pub trait Collection {
    fn resource(&self) -> &Resource;

    fn cache(&self) -> &ElementCache;

    fn kind(&self) -> CollectionKind;

    /// Append one element at the end
    fn append_one<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: Element) -> Result<()>;

    /// Insert at `index`, already normalized to `0..=len`
    fn insert_at<S: TripleStore>(
        &mut self,
        ctx: &mut ModelContext<S>,
        index: usize,
        element: Element,
    ) -> Result<()>;

    /// Remove and return the element at `index`, already normalized to `0..len`
    fn pop_at<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, index: usize) -> Result<Element>;

    /// Remove every element and its backing statements
    fn clear<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>) -> Result<()>;

    /// A new, empty collection of the same kind and options
    fn empty_like<S: TripleStore>(&self, ctx: &mut ModelContext<S>) -> Result<Self>
    where
        Self: Sized;

    /// The collection's node in the store
    fn term(&self) -> &Term {
        self.resource().term()
    }

    fn elements(&self) -> &[Element] {
        self.cache().raw()
    }

    /// Store-ready form of every element, in order
    fn formatted(&self) -> &[Term] {
        self.cache().formatted()
    }

    fn len(&self) -> usize {
        self.cache().len()
    }

    fn is_empty(&self) -> bool {
        self.cache().is_empty()
    }

    fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements().iter()
    }

    /// Element at `index`; negative indices count from the end
    fn get(&self, index: isize) -> Result<&Element> {
        let i = access_index(index, self.len())?;
        Ok(&self.elements()[i])
    }

    fn format(&self, element: &Element) -> Term {
        self.resource().format(element)
    }

    /// First position of `element`
    fn position(&self, element: &Element) -> Option<usize> {
        let term = self.format(element);
        self.formatted().iter().position(|t| *t == term)
    }

    fn contains(&self, element: impl Into<Element>) -> bool {
        self.position(&element.into()).is_some()
    }

    fn count(&self, element: impl Into<Element>) -> usize {
        let term = self.format(&element.into());
        self.formatted().iter().filter(|t| **t == term).count()
    }

    /// Position of the first instance of `element` between `start` and
    /// `end`, both inclusive and both accepting negative indices
    fn index(&self, element: impl Into<Element>, start: isize, end: isize) -> Result<usize> {
        let element = element.into();
        let term = self.format(&element);
        if self.is_empty() {
            return Err(ModelError::not_found(element.to_string()));
        }
        let start = access_index(start, self.len())?;
        let end = access_index(end, self.len())?;
        self.cache()
            .position_in(&term, start, end)
            .ok_or_else(|| ModelError::not_found(element.to_string()))
    }

    fn append<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: impl Into<Element>) -> Result<()> {
        self.append_one(ctx, element.into())
    }

    fn extend<S, I>(&mut self, ctx: &mut ModelContext<S>, elements: I) -> Result<()>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        for element in elements {
            self.append_one(ctx, element.into())?;
        }
        Ok(())
    }

    /// Replace every element: clear, then append each new one
    fn set_elements<S, I>(&mut self, ctx: &mut ModelContext<S>, elements: I) -> Result<()>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        self.clear(ctx)?;
        self.extend(ctx, elements)
    }

    /// Remove the first instance of `element`; fails when absent
    fn remove<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: impl Into<Element>) -> Result<Element> {
        let element = element.into();
        let index = self
            .position(&element)
            .ok_or_else(|| ModelError::not_found(element.to_string()))?;
        self.pop_at(ctx, index)
    }

    /// Like `remove`, but absent elements are not an error
    ///
    /// Returns whether anything was removed.
    fn discard<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: impl Into<Element>) -> Result<bool> {
        match self.remove(ctx, element) {
            Ok(_) => Ok(true),
            Err(ModelError::ElementNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// New collection of the same kind holding the same elements
    fn copy<S: TripleStore>(&self, ctx: &mut ModelContext<S>) -> Result<Self>
    where
        Self: Sized,
    {
        let mut copy = self.empty_like(ctx)?;
        copy.extend(ctx, self.elements().to_vec())?;
        Ok(copy)
    }

    /// New collection holding this collection's elements followed by `other`'s
    fn concat<S: TripleStore, C: Collection>(&self, ctx: &mut ModelContext<S>, other: &C) -> Result<Self>
    where
        Self: Sized,
    {
        let mut joined = self.copy(ctx)?;
        joined.extend(ctx, other.elements().to_vec())?;
        Ok(joined)
    }
}

/// Ordered collections, where positions are part of the contract
pub trait Sequence: Collection {
    /// Replace the element at `index`
    fn set_item<S: TripleStore>(
        &mut self,
        ctx: &mut ModelContext<S>,
        index: isize,
        element: impl Into<Element>,
    ) -> Result<()>;

    /// Insert before `index`; out-of-range indices clamp to the ends
    fn insert<S: TripleStore>(
        &mut self,
        ctx: &mut ModelContext<S>,
        index: isize,
        element: impl Into<Element>,
    ) -> Result<()> {
        let index = insertion_index(index, self.len());
        self.insert_at(ctx, index, element.into())
    }

    /// Remove and return the element at `index`, the last one by default
    fn pop<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, index: Option<isize>) -> Result<Element> {
        let index = access_index(index.unwrap_or(-1), self.len())?;
        self.pop_at(ctx, index)
    }

    fn reverse<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>) -> Result<()> {
        let reversed: Vec<Element> = self.elements().iter().rev().cloned().collect();
        self.set_elements(ctx, reversed)
    }

    /// Sort ascending; numeric literals compare by value, across datatypes
    fn sort<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>) -> Result<()> {
        self.sort_terms(ctx, false)
    }

    /// [`sort`](Sequence::sort) in descending order
    fn sort_descending<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>) -> Result<()> {
        self.sort_terms(ctx, true)
    }

    #[doc(hidden)]
    fn sort_terms<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, descending: bool) -> Result<()> {
        let mut pairs: Vec<(Term, Element)> = self
            .formatted()
            .iter()
            .cloned()
            .zip(self.elements().iter().cloned())
            .collect();
        pairs.sort_by(|a, b| {
            let order = term_order(&a.0, &b.0);
            if descending {
                order.reverse()
            } else {
                order
            }
        });
        self.set_elements(ctx, pairs.into_iter().map(|(_, element)| element))
    }

    fn sort_by<S, F>(&mut self, ctx: &mut ModelContext<S>, compare: F) -> Result<()>
    where
        S: TripleStore,
        F: FnMut(&Element, &Element) -> Ordering,
    {
        let mut sorted = self.elements().to_vec();
        sorted.sort_by(compare);
        self.set_elements(ctx, sorted)
    }

    fn iter_rev(&self) -> std::iter::Rev<std::slice::Iter<'_, Element>> {
        self.elements().iter().rev()
    }
}

/// Total order used by [`Sequence::sort`]
///
/// Resources first, then numeric literals by value (ties fall back to term
/// order, so `1` and `1.0` stay distinct), then every other literal in term
/// order.
fn term_order(a: &Term, b: &Term) -> Ordering {
    let (na, nb) = (numeric_value(a), numeric_value(b));
    let group = |term: &Term, numeric: Option<f64>| match (term.is_literal(), numeric) {
        (false, _) => 0u8,
        (true, Some(_)) => 1,
        (true, None) => 2,
    };
    group(a, na)
        .cmp(&group(b, nb))
        .then_with(|| match (na, nb) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}

fn numeric_value(term: &Term) -> Option<f64> {
    let (value, datatype, _) = term.as_literal()?;
    if !datatype.is_numeric() {
        return None;
    }
    match value {
        LiteralValue::Integer(i) => Some(*i as f64),
        LiteralValue::Double(d) => Some(*d),
        LiteralValue::String(s) => s.trim().parse().ok(),
        LiteralValue::Boolean(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_index() {
        assert_eq!(access_index(0, 3).unwrap(), 0);
        assert_eq!(access_index(-1, 3).unwrap(), 2);
        assert_eq!(access_index(-3, 3).unwrap(), 0);
        assert!(matches!(
            access_index(3, 3),
            Err(ModelError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert!(access_index(-4, 3).is_err());
        assert!(access_index(0, 0).is_err());
    }

    #[test]
    fn test_insertion_index_clamps() {
        assert_eq!(insertion_index(0, 3), 0);
        assert_eq!(insertion_index(7, 3), 3);
        assert_eq!(insertion_index(-1, 3), 2);
        assert_eq!(insertion_index(-9, 3), 0);
        assert_eq!(insertion_index(0, 0), 0);
        assert_eq!(insertion_index(-1, 0), 0);
    }

    #[test]
    fn test_term_order_compares_numbers_by_value() {
        let mut terms = vec![
            Term::string("b"),
            Term::integer(3),
            Term::typed("0.5", fluree_graph_ir::Datatype::xsd_decimal()),
            Term::double(2.5),
            Term::iri("http://example.org/x"),
            Term::integer(1),
            Term::double(1.0),
        ];
        terms.sort_by(term_order);
        assert_eq!(
            terms,
            vec![
                Term::iri("http://example.org/x"),
                Term::typed("0.5", fluree_graph_ir::Datatype::xsd_decimal()),
                Term::double(1.0),
                Term::integer(1),
                Term::double(2.5),
                Term::integer(3),
                Term::string("b"),
            ]
        );
    }

    #[test]
    fn test_render_short() {
        let elements = vec![Element::from("a"), Element::from(2), Element::from(true)];
        assert_eq!(render(CollectionKind::Seq, &elements), "Seq(a, 2, true)");
        assert_eq!(render(CollectionKind::Bag, &[]), "Bag()");
    }

    #[test]
    fn test_render_trims_long_lists() {
        let elements: Vec<Element> = (0..100).map(|i| Element::from(format!("item{i}"))).collect();
        let rendered = render(CollectionKind::List, &elements);
        assert!(rendered.starts_with("List(item0, item1"));
        assert!(rendered.contains(", ..., "));
        assert!(rendered.ends_with("item98, item99)"));
        assert!(rendered.len() < 100);
    }

    #[test]
    fn test_cache_position_in_range() {
        let mut cache = ElementCache::new();
        for v in [1, 2, 1] {
            cache.push(Element::from(v), Term::integer(v));
        }
        assert_eq!(cache.position_in(&Term::integer(1), 0, 2), Some(0));
        assert_eq!(cache.position_in(&Term::integer(1), 1, 2), Some(2));
        assert_eq!(cache.position_in(&Term::integer(1), 1, 1), None);
        assert_eq!(cache.position_in(&Term::integer(2), 2, 1), None);
    }
}

use super::container::Container;
use super::{render, Collection, CollectionOptions, ElementCache};
use crate::config::AltDefaultPolicy;
use crate::context::ModelContext;
use crate::diagnostics::DiagnosticCode;
use crate::element::Element;
use crate::error::Result;
use crate::resource::{CollectionKind, Resource};
use fluree_graph_ir::TripleStore;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use tracing::debug;

/// Alternatives mirrored as an `rdf:Alt`
///
/// Position 0 (`rdf:_1`) holds the default; the remaining positions hold the
/// other alternatives. Members are unique: adding an element equal to one
/// already present is dropped with a `DuplicateSuppressed` note.
#[derive(Clone, Debug, PartialEq)]
pub struct Alt {
    core: Container,
}

impl Alt {
    pub fn new<S: TripleStore>(ctx: &mut ModelContext<S>) -> Result<Self> {
        Self::with_options(ctx, None, Vec::<Element>::new(), CollectionOptions::default())
    }

    /// Alt with an explicit default followed by `alternatives`; repeats of
    /// the default among them are dropped without a diagnostic
    pub fn with_default<S, I>(ctx: &mut ModelContext<S>, default: impl Into<Element>, alternatives: I) -> Result<Self>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        Self::with_options(ctx, Some(default.into()), alternatives, CollectionOptions::default())
    }

    /// Alt whose default is picked from `alternatives` by the context's
    /// [`AltDefaultPolicy`]
    pub fn from_alternatives<S, I>(ctx: &mut ModelContext<S>, alternatives: I) -> Result<Self>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        Self::with_options(ctx, None, alternatives, CollectionOptions::default())
    }

    pub fn with_options<S, I>(
        ctx: &mut ModelContext<S>,
        default: Option<Element>,
        alternatives: I,
        options: CollectionOptions,
    ) -> Result<Self>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        let mut alt = Self {
            core: Container::create(ctx, CollectionKind::Alt, &options)?,
        };
        let mut alternatives: Vec<Element> = alternatives.into_iter().map(Into::into).collect();
        let default = match default {
            Some(default) => {
                let term = alt.format(&default);
                alternatives.retain(|a| alt.format(a) != term);
                Some(default)
            }
            None if alternatives.is_empty() => None,
            None => {
                let index = match ctx.config().alt_default_policy {
                    AltDefaultPolicy::First => 0,
                    AltDefaultPolicy::Random => rand::thread_rng().gen_range(0..alternatives.len()),
                };
                let chosen = alternatives.remove(index);
                ctx.advise(
                    DiagnosticCode::DefaultSelected,
                    format!("no default given; selected {chosen}"),
                    Some(alt.term()),
                );
                Some(chosen)
            }
        };
        alt.extend(ctx, default.into_iter().chain(alternatives))?;
        Ok(alt)
    }

    /// The default alternative
    pub fn default(&self) -> Option<&Element> {
        self.elements().first()
    }

    /// Every alternative except the default
    pub fn alternatives(&self) -> &[Element] {
        self.elements().get(1..).unwrap_or(&[])
    }

    /// Make `element` the default
    ///
    /// The previous default stays as an alternative when `keep` is set and is
    /// dropped otherwise. If `element` was already an alternative it moves
    /// rather than being duplicated.
    pub fn set_default<S: TripleStore>(
        &mut self,
        ctx: &mut ModelContext<S>,
        element: impl Into<Element>,
        keep: bool,
    ) -> Result<()> {
        let element = element.into();
        if !keep && !self.is_empty() {
            self.core.pop(ctx, 0)?;
        }
        if let Some(index) = self.position(&element) {
            self.core.pop(ctx, index)?;
        }
        debug!(subject = %self.term(), default = %element, "set alt default");
        self.core.insert(ctx, 0, element)
    }

    /// Add one alternative; returns `false` when it was already present
    pub fn add_alternative<S: TripleStore>(
        &mut self,
        ctx: &mut ModelContext<S>,
        element: impl Into<Element>,
    ) -> Result<bool> {
        let element = element.into();
        if self.suppress(ctx, &element) {
            return Ok(false);
        }
        self.core.append(ctx, element)?;
        Ok(true)
    }

    /// Add several alternatives; returns how many were new
    pub fn add_alternatives<S, I>(&mut self, ctx: &mut ModelContext<S>, elements: I) -> Result<usize>
    where
        S: TripleStore,
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        let mut added = 0;
        for element in elements {
            if self.add_alternative(ctx, element)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// A random member, optionally excluding the default
    pub fn any(&self, include_default: bool) -> Option<&Element> {
        self.any_with(&mut rand::thread_rng(), include_default)
    }

    pub fn any_with<R: Rng + ?Sized>(&self, rng: &mut R, include_default: bool) -> Option<&Element> {
        let pool = if include_default {
            self.elements()
        } else {
            self.alternatives()
        };
        pool.choose(rng)
    }

    fn suppress<S: TripleStore>(&self, ctx: &mut ModelContext<S>, element: &Element) -> bool {
        if self.position(element).is_none() {
            return false;
        }
        ctx.advise(
            DiagnosticCode::DuplicateSuppressed,
            format!("{element} is already an alternative"),
            Some(self.term()),
        );
        true
    }
}

impl Collection for Alt {
    fn resource(&self) -> &Resource {
        self.core.resource()
    }

    fn cache(&self) -> &ElementCache {
        self.core.cache()
    }

    fn kind(&self) -> CollectionKind {
        CollectionKind::Alt
    }

    fn append_one<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, element: Element) -> Result<()> {
        self.add_alternative(ctx, element).map(|_| ())
    }

    fn insert_at<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, index: usize, element: Element) -> Result<()> {
        if self.suppress(ctx, &element) {
            return Ok(());
        }
        self.core.insert(ctx, index, element)
    }

    /// Removing the default promotes the next alternative and records
    /// `DefaultRemoved`
    fn pop_at<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>, index: usize) -> Result<Element> {
        let element = self.core.pop(ctx, index)?;
        if index == 0 {
            let message = match self.default() {
                Some(next) => format!("default {element} removed; {next} is the new default"),
                None => format!("default {element} removed; no alternatives remain"),
            };
            ctx.advise(DiagnosticCode::DefaultRemoved, message, Some(self.term()));
        }
        Ok(element)
    }

    fn clear<S: TripleStore>(&mut self, ctx: &mut ModelContext<S>) -> Result<()> {
        self.core.clear(ctx);
        Ok(())
    }

    fn empty_like<S: TripleStore>(&self, ctx: &mut ModelContext<S>) -> Result<Self> {
        Self::with_options(ctx, None, Vec::<Element>::new(), self.core.options())
    }
}

impl fmt::Display for Alt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(CollectionKind::Alt, self.elements()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use fluree_graph_ir::Term;
    use fluree_vocab::rdf;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_is_first_member() {
        let mut ctx = ModelContext::new();
        let alt = Alt::with_default(&mut ctx, "en", ["fr", "de", "fr"]).unwrap();
        assert_eq!(alt.default(), Some(&Element::from("en")));
        assert_eq!(alt.alternatives(), &[Element::from("fr"), Element::from("de")]);
        assert_eq!(
            ctx.store().value(alt.term(), &Term::iri(rdf::member(1))),
            Some(Term::string("en"))
        );
        assert_eq!(ctx.diagnostics().count(DiagnosticCode::DuplicateSuppressed), 1);
    }

    #[test]
    fn test_default_repeated_among_alternatives() {
        let mut ctx = ModelContext::new();
        let alt = Alt::with_default(&mut ctx, "a", ["a", "b"]).unwrap();
        assert_eq!(alt.elements(), &[Element::from("a"), Element::from("b")]);
        assert!(!ctx.diagnostics().has(DiagnosticCode::DuplicateSuppressed));
        assert_eq!(
            ctx.store().value(alt.term(), &Term::iri(rdf::member(2))),
            Some(Term::string("b"))
        );
    }

    #[test]
    fn test_policy_selects_default() {
        let mut ctx = ModelContext::new();
        let alt = Alt::from_alternatives(&mut ctx, ["x", "y"]).unwrap();
        assert_eq!(alt.default(), Some(&Element::from("x")));
        assert!(ctx.diagnostics().has(DiagnosticCode::DefaultSelected));

        let mut ctx = ModelContext::with_config(
            ModelConfig::default().with_alt_default_policy(AltDefaultPolicy::Random),
        );
        let alt = Alt::from_alternatives(&mut ctx, ["x", "y", "z"]).unwrap();
        assert_eq!(alt.len(), 3);
        assert!(alt.default().is_some());

        let mut ctx = ModelContext::new();
        let alt = Alt::from_alternatives(&mut ctx, Vec::<Element>::new()).unwrap();
        assert!(alt.default().is_none());
        assert!(!ctx.diagnostics().has(DiagnosticCode::DefaultSelected));
    }

    #[test]
    fn test_set_default_moves_or_replaces() {
        let mut ctx = ModelContext::new();
        let mut alt = Alt::with_default(&mut ctx, "a", ["b", "c"]).unwrap();

        alt.set_default(&mut ctx, "c", true).unwrap();
        assert_eq!(
            alt.elements(),
            &[Element::from("c"), Element::from("a"), Element::from("b")]
        );

        alt.set_default(&mut ctx, "z", false).unwrap();
        assert_eq!(
            alt.elements(),
            &[Element::from("z"), Element::from("a"), Element::from("b")]
        );
        assert!(!ctx.diagnostics().has(DiagnosticCode::DefaultRemoved));
    }

    #[test]
    fn test_removing_default_promotes_next() {
        let mut ctx = ModelContext::new();
        let mut alt = Alt::with_default(&mut ctx, "a", ["b"]).unwrap();
        alt.remove(&mut ctx, "a").unwrap();
        assert_eq!(alt.default(), Some(&Element::from("b")));
        assert!(ctx.diagnostics().has(DiagnosticCode::DefaultRemoved));
        assert_eq!(
            ctx.store().value(alt.term(), &Term::iri(rdf::member(1))),
            Some(Term::string("b"))
        );
        assert_eq!(ctx.store().value(alt.term(), &Term::iri(rdf::member(2))), None);
    }

    #[test]
    fn test_any_respects_include_default() {
        let mut ctx = ModelContext::new();
        let alt = Alt::with_default(&mut ctx, "a", ["b"]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(alt.any_with(&mut rng, false), Some(&Element::from("b")));
        }
        assert!(alt.any(true).is_some());

        let single = Alt::with_default(&mut ctx, "only", Vec::<Element>::new()).unwrap();
        assert_eq!(single.any(false), None);
    }
}

//! Resources and the identity builder
//!
//! A [`Resource`] is an address (or blank node) plus the tags the modeling
//! layer needs to write statements about it: its kind, identifier, lineage
//! and language. Resources hold no reference to the store; every operation
//! takes the [`ModelContext`] explicitly.
//!
//! [`ResourceBuilder`] computes addresses:
//!
//! ```text
//! <namespace>/<path segments>#<legalized identifier>
//! ```
//!
//! Building is idempotent: initialization statements are written only when
//! nothing is yet known about the computed address.

use crate::context::ModelContext;
use crate::diagnostics::DiagnosticCode;
use crate::element::Element;
use crate::error::{ModelError, Result};
use crate::iri::{camel_case, legalize, legalize_path, local_name, pascal_case};
use crate::lang::normalize_language;
use crate::namespace::Namespace;
use fluree_graph_ir::{Term, Triple, TriplePattern, TripleStore};
use fluree_vocab::{dcterms, rdf, rdfs, skos};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The four collection encodings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Bag,
    Seq,
    Alt,
    List,
}

impl CollectionKind {
    pub fn type_iri(&self) -> &'static str {
        match self {
            CollectionKind::Bag => rdf::BAG,
            CollectionKind::Seq => rdf::SEQ,
            CollectionKind::Alt => rdf::ALT,
            CollectionKind::List => rdf::LIST,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Bag => "Bag",
            CollectionKind::Seq => "Seq",
            CollectionKind::Alt => "Alt",
            CollectionKind::List => "List",
        }
    }
}

/// What a resource is, which decides its type tag and identifier casing
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `rdfs:Resource`; identifier kept verbatim
    Resource,
    /// `rdfs:Class`; identifier in PascalCase
    Class,
    /// `rdf:Property`; identifier in camelCase
    Property,
    /// Instance of the class with this IRI; identifier kept verbatim
    Instance(Arc<str>),
    /// Anonymous collection node
    Collection(CollectionKind),
}

impl ResourceKind {
    pub fn type_iri(&self) -> &str {
        match self {
            ResourceKind::Resource => rdfs::RESOURCE,
            ResourceKind::Class => rdfs::CLASS,
            ResourceKind::Property => rdf::PROPERTY,
            ResourceKind::Instance(class) => class,
            ResourceKind::Collection(kind) => kind.type_iri(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, ResourceKind::Collection(_))
    }

    /// Canonical form of an identifier for this kind
    fn canonical_identifier(&self, identifier: &str) -> String {
        match self {
            ResourceKind::Class => pascal_case(identifier),
            ResourceKind::Property => camel_case(identifier),
            _ => identifier.to_string(),
        }
    }

    /// Predicate linking a class or property to its parents
    fn parent_predicate(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Class => Some(rdfs::SUB_CLASS_OF),
            ResourceKind::Property => Some(rdfs::SUB_PROPERTY_OF),
            _ => None,
        }
    }
}

/// An addressable (or anonymous) node in the store
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    term: Term,
    kind: ResourceKind,
    id: Option<String>,
    lineage: Vec<String>,
    language: Option<String>,
    check_triples: bool,
}

impl Resource {
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Address, unless the resource is a blank node
    pub fn iri(&self) -> Option<&str> {
        self.term.as_iri()
    }

    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    pub fn type_iri(&self) -> &str {
        self.kind.type_iri()
    }

    /// Canonical identifier
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Ancestry path handed down to sub-classes, sub-properties and instances
    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn check_triples(&self) -> bool {
        self.check_triples
    }

    pub fn is_anonymous(&self) -> bool {
        self.term.is_blank()
    }

    /// Point this handle at another node
    pub(crate) fn rebind(&mut self, term: Term) {
        self.term = term;
    }

    /// Store-ready form of `element`, with this resource's language
    pub fn format(&self, element: &Element) -> Term {
        element.format(self.language())
    }

    /// Format `element` as the object of `predicate`, checking constraints
    /// when enabled
    pub(crate) fn checked_object<S: TripleStore>(
        &self,
        ctx: &mut ModelContext<S>,
        predicate: &str,
        element: &Element,
    ) -> Result<Term> {
        let object = self.format(element);
        if element.is_empty_text() {
            ctx.advise(
                DiagnosticCode::EmptyLiteral,
                format!("empty string used as object of {}", ctx.render(&Term::iri(predicate))),
                Some(&self.term),
            );
        }
        if self.check_triples {
            ctx.constraints()
                .check(self.type_iri(), predicate, &object)
                .map_err(|message| ModelError::constraint(ctx.render(&self.term), message))?;
        }
        Ok(object)
    }

    /// Replace `(self, predicate, *)` without advisories
    pub(crate) fn write<S: TripleStore>(
        &self,
        ctx: &mut ModelContext<S>,
        predicate: &str,
        element: &Element,
    ) -> Result<Term> {
        let object = self.checked_object(ctx, predicate, element)?;
        ctx.store_mut()
            .set(self.term.clone(), Term::iri(predicate), object.clone());
        Ok(object)
    }

    /// Remove every statement with this resource as subject
    pub(crate) fn purge<S: TripleStore>(&self, ctx: &mut ModelContext<S>) -> usize {
        ctx.store_mut()
            .remove(&TriplePattern::subject(self.term.clone()))
    }

    /// Add `(self, p, o)`
    ///
    /// Returns whether the statement was new. Adding a second value to a
    /// single-valued predicate records `MaxCountExceeded`.
    pub fn add<S: TripleStore>(
        &self,
        ctx: &mut ModelContext<S>,
        predicate: &str,
        object: impl Into<Element>,
    ) -> Result<bool> {
        let predicate = ctx.namespaces().resolve(predicate)?;
        let object = self.checked_object(ctx, &predicate, &object.into())?;
        let p = Term::iri(&predicate);

        if self.check_triples {
            let max = ctx
                .constraints()
                .property(self.type_iri(), &predicate)
                .and_then(|c| c.max_count);
            if let Some(max) = max {
                let existing = ctx.store().objects(&self.term, &p);
                if !existing.contains(&object) && existing.len() >= max {
                    ctx.advise(
                        DiagnosticCode::MaxCountExceeded,
                        format!(
                            "{} allows {} value(s); use set() to replace",
                            ctx.render(&p),
                            max
                        ),
                        Some(&self.term),
                    );
                }
            }
        }
        Ok(ctx.store_mut().add(Triple::new(self.term.clone(), p, object)))
    }

    /// Make `o` the only value of `p`, recording `ValueOverwritten` when a
    /// different value is replaced
    pub fn set<S: TripleStore>(
        &self,
        ctx: &mut ModelContext<S>,
        predicate: &str,
        object: impl Into<Element>,
    ) -> Result<()> {
        self.set_inner(ctx, predicate, object.into(), true)
    }

    /// Make `o` the only value of `p`, silently
    pub fn replace<S: TripleStore>(
        &self,
        ctx: &mut ModelContext<S>,
        predicate: &str,
        object: impl Into<Element>,
    ) -> Result<()> {
        self.set_inner(ctx, predicate, object.into(), false)
    }

    fn set_inner<S: TripleStore>(
        &self,
        ctx: &mut ModelContext<S>,
        predicate: &str,
        object: Element,
        advise: bool,
    ) -> Result<()> {
        let predicate = ctx.namespaces().resolve(predicate)?;
        let object = self.checked_object(ctx, &predicate, &object)?;
        let p = Term::iri(&predicate);
        if advise {
            let previous = ctx.store().objects(&self.term, &p);
            if previous.iter().any(|o| *o != object) {
                let rendered: Vec<String> = previous.iter().map(|o| ctx.render(o)).collect();
                ctx.advise(
                    DiagnosticCode::ValueOverwritten,
                    format!(
                        "{} overwritten: [{}] replaced by {}",
                        ctx.render(&p),
                        rendered.join(", "),
                        ctx.render(&object)
                    ),
                    Some(&self.term),
                );
            }
        }
        ctx.store_mut().set(self.term.clone(), p, object);
        Ok(())
    }

    /// Remove `(self, p, o)`, or every `(self, p, *)` when `o` is `None`
    ///
    /// Returns how many statements were removed; removing nothing records
    /// `MissingStatement` when checking is enabled.
    pub fn remove<S: TripleStore>(
        &self,
        ctx: &mut ModelContext<S>,
        predicate: &str,
        object: Option<Element>,
    ) -> Result<usize> {
        let predicate = ctx.namespaces().resolve(predicate)?;
        let p = Term::iri(&predicate);
        let o = object.as_ref().map(|e| self.format(e));
        let removed = ctx.store_mut().remove(&TriplePattern::new(
            Some(self.term.clone()),
            Some(p.clone()),
            o.clone(),
        ));
        if removed == 0 && self.check_triples {
            let message = match &o {
                Some(o) => format!(
                    "no statement with predicate {} and object {} to remove",
                    ctx.render(&p),
                    ctx.render(o)
                ),
                None => format!("no statement with predicate {} to remove", ctx.render(&p)),
            };
            ctx.advise(DiagnosticCode::MissingStatement, message, Some(&self.term));
        }
        Ok(removed)
    }

    /// One value of `p`
    pub fn value<S: TripleStore>(&self, ctx: &ModelContext<S>, predicate: &str) -> Result<Option<Term>> {
        let p = Term::iri(ctx.namespaces().resolve(predicate)?);
        Ok(ctx.store().value(&self.term, &p))
    }

    /// Every value of `p`
    pub fn objects<S: TripleStore>(&self, ctx: &ModelContext<S>, predicate: &str) -> Result<Vec<Term>> {
        let p = Term::iri(ctx.namespaces().resolve(predicate)?);
        Ok(ctx.store().objects(&self.term, &p))
    }

    /// Every statement with this resource as subject
    pub fn statements<S: TripleStore>(&self, ctx: &ModelContext<S>) -> Vec<Triple> {
        ctx.store()
            .triples(&TriplePattern::subject(self.term.clone()))
            .collect()
    }

    /// Set `skos:prefLabel`, tagged with this resource's language
    pub fn set_pref_label<S: TripleStore>(&self, ctx: &mut ModelContext<S>, label: &str) -> Result<()> {
        self.set(ctx, skos::PREF_LABEL, label)
    }

    /// Add a `skos:altLabel`, unless it equals the preferred label
    ///
    /// Returns whether the label was added.
    pub fn add_alt_label<S: TripleStore>(&self, ctx: &mut ModelContext<S>, label: &str) -> Result<bool> {
        let candidate = self.format(&Element::from(label));
        let pref = ctx
            .store()
            .value(&self.term, &Term::iri(skos::PREF_LABEL));
        if pref.as_ref() == Some(&candidate) {
            ctx.advise(
                DiagnosticCode::AltLabelSkipped,
                format!("'{label}' is already the preferred label"),
                Some(&self.term),
            );
            return Ok(false);
        }
        self.add(ctx, skos::ALT_LABEL, label)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)
    }
}

/// Builds resources and writes their initialization statements
#[derive(Clone, Debug)]
pub struct ResourceBuilder {
    kind: ResourceKind,
    identifier: Option<String>,
    label: Option<String>,
    iri: Option<String>,
    path: Vec<String>,
    namespace: Option<Namespace>,
    language: Option<String>,
    supers: Vec<Resource>,
    class_lineage: Option<Vec<String>>,
    type_in_iri: bool,
    hierarchical_path: Option<bool>,
    check_triples: Option<bool>,
}

impl ResourceBuilder {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            identifier: None,
            label: None,
            iri: None,
            path: Vec::new(),
            namespace: None,
            language: None,
            supers: Vec::new(),
            class_lineage: None,
            type_in_iri: true,
            hierarchical_path: None,
            check_triples: None,
        }
    }

    pub fn resource() -> Self {
        Self::new(ResourceKind::Resource)
    }

    pub fn class() -> Self {
        Self::new(ResourceKind::Class)
    }

    pub fn property() -> Self {
        Self::new(ResourceKind::Property)
    }

    /// Instance of a class built with this crate; its lineage becomes the path
    pub fn instance(class: &Resource) -> Self {
        let class_iri = match class.term() {
            Term::Iri(iri) => Arc::clone(iri),
            other => Arc::from(other.to_string().as_str()),
        };
        let mut builder = Self::new(ResourceKind::Instance(class_iri));
        builder.class_lineage = Some(class.lineage().to_vec());
        builder
    }

    /// Instance of an arbitrary class IRI
    pub fn instance_of(class_iri: &str) -> Self {
        Self::new(ResourceKind::Instance(Arc::from(class_iri)))
    }

    pub fn collection(kind: CollectionKind) -> Self {
        Self::new(ResourceKind::Collection(kind))
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Use this address instead of computing one
    pub fn iri(mut self, iri: impl Into<String>) -> Self {
        self.iri = Some(iri.into());
        self
    }

    /// Append a path segment before the type-derived segments
    pub fn path(mut self, segment: impl Into<String>) -> Self {
        self.path.push(segment.into());
        self
    }

    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Parent class (for classes) or parent property (for properties)
    pub fn super_resource(mut self, parent: &Resource) -> Self {
        self.supers.push(parent.clone());
        self
    }

    pub fn type_in_iri(mut self, enabled: bool) -> Self {
        self.type_in_iri = enabled;
        self
    }

    pub fn hierarchical_path(mut self, enabled: bool) -> Self {
        self.hierarchical_path = Some(enabled);
        self
    }

    pub fn check_triples(mut self, enabled: bool) -> Self {
        self.check_triples = Some(enabled);
        self
    }

    /// Compute the address and write initialization statements if the
    /// address is new
    pub fn build<S: TripleStore>(self, ctx: &mut ModelContext<S>) -> Result<Resource> {
        let check_triples = self.check_triples.unwrap_or(ctx.config().check_triples);

        if self.kind.is_anonymous() {
            let term = ctx.fresh_blank();
            ctx.store_mut().add(Triple::new(
                term.clone(),
                Term::iri(rdf::TYPE),
                Term::iri(self.kind.type_iri()),
            ));
            debug!(subject = %term, kind = self.kind.type_iri(), "created anonymous resource");
            return Ok(Resource {
                term,
                kind: self.kind,
                id: None,
                lineage: Vec::new(),
                language: None,
                check_triples,
            });
        }

        let language = self.resolve_language(ctx);
        let label = self.label.as_deref().map(str::trim).map(str::to_string);
        let raw_id = self.identifier.clone().or_else(|| label.clone());

        let id = match (&raw_id, &self.iri) {
            (Some(raw), _) if raw.is_empty() => {
                return Err(ModelError::empty_identifier(format!(
                    "{} built with an empty identifier",
                    local_name(self.kind.type_iri())
                )));
            }
            (Some(raw), _) => {
                let canonical = self.kind.canonical_identifier(raw);
                if canonical.is_empty() {
                    return Err(ModelError::empty_identifier(format!(
                        "'{raw}' has no usable characters"
                    )));
                }
                if canonical != *raw {
                    ctx.advise(
                        DiagnosticCode::IdentifierReformatted,
                        format!("identifier '{raw}' reformatted to '{canonical}'"),
                        None,
                    );
                }
                Some(canonical)
            }
            (None, Some(_)) => None,
            (None, None) => {
                return Err(ModelError::missing_identity(format!(
                    "{} needs an identifier, a label, or an address",
                    local_name(self.kind.type_iri())
                )));
            }
        };

        let hierarchical = self
            .hierarchical_path
            .unwrap_or(ctx.config().hierarchical_path);
        let parent_lineage: Vec<String> = match self.supers.first() {
            Some(parent) if hierarchical => parent.lineage().to_vec(),
            _ => Vec::new(),
        };
        let lineage = match (&self.kind, &id) {
            (ResourceKind::Class | ResourceKind::Property, Some(id)) => {
                let mut own = parent_lineage.clone();
                own.push(id.clone());
                own
            }
            _ => Vec::new(),
        };

        let term = match (&self.iri, &id) {
            (Some(iri), _) => Term::iri(iri),
            (None, Some(id)) => {
                let namespace = self
                    .namespace
                    .clone()
                    .unwrap_or_else(|| ctx.default_namespace().clone());
                let path = legalize_path(&self.path_segments(&parent_lineage).join("/"));
                Term::iri(namespace.address(&path, &legalize(id, false)))
            }
            (None, None) => {
                return Err(ModelError::missing_identity(format!(
                    "{} has neither an identifier nor an address",
                    local_name(self.kind.type_iri())
                )));
            }
        };

        let resource = Resource {
            term,
            kind: self.kind.clone(),
            id,
            lineage,
            language,
            check_triples,
        };

        if !ctx.store().has_subject(resource.term()) {
            self.initialize(ctx, &resource, label.as_deref())?;
        }
        if let Some(namespace) = &self.namespace {
            ctx.store_mut().add(Triple::new(
                resource.term().clone(),
                Term::iri(dcterms::SOURCE),
                Term::iri(namespace.as_str()),
            ));
        }
        Ok(resource)
    }

    fn resolve_language<S: TripleStore>(&self, ctx: &mut ModelContext<S>) -> Option<String> {
        let requested = self
            .language
            .clone()
            .or_else(|| ctx.config().language.clone())?;
        let normalized = normalize_language(&requested);
        if normalized.is_none() {
            ctx.advise(
                DiagnosticCode::InvalidLanguage,
                format!("language tag '{requested}' is not valid BCP-47; ignoring it"),
                None,
            );
        }
        normalized
    }

    /// Path segments before the identifier
    fn path_segments(&self, parent_lineage: &[String]) -> Vec<String> {
        let mut segments = self.path.clone();
        if !self.type_in_iri {
            return segments;
        }
        match &self.kind {
            ResourceKind::Class | ResourceKind::Property => {
                segments.push(local_name(self.kind.type_iri()).to_string());
                segments.extend(parent_lineage.iter().cloned());
            }
            ResourceKind::Instance(class) => match &self.class_lineage {
                Some(lineage) if !lineage.is_empty() => segments.extend(lineage.iter().cloned()),
                _ => segments.push(local_name(class).to_string()),
            },
            _ => segments.push(local_name(self.kind.type_iri()).to_string()),
        }
        segments
    }

    fn initialize<S: TripleStore>(
        &self,
        ctx: &mut ModelContext<S>,
        resource: &Resource,
        label: Option<&str>,
    ) -> Result<()> {
        let subject = resource.term().clone();
        ctx.store_mut().add(Triple::new(
            subject.clone(),
            Term::iri(rdf::TYPE),
            Term::iri(resource.type_iri()),
        ));
        if let Some(id) = resource.id() {
            resource.write(ctx, dcterms::IDENTIFIER, &Element::Term(Term::string(id)))?;
        }
        match label {
            Some("") => ctx.advise(
                DiagnosticCode::EmptyLiteral,
                "empty label; no label set",
                Some(&subject),
            ),
            Some(label) => {
                resource.write(ctx, skos::PREF_LABEL, &Element::from(label))?;
            }
            None => {}
        }
        if let Some(parent_predicate) = self.kind.parent_predicate() {
            for parent in &self.supers {
                ctx.store_mut().add(Triple::new(
                    subject.clone(),
                    Term::iri(parent_predicate),
                    parent.term().clone(),
                ));
            }
        }
        debug!(subject = %subject, kind = resource.type_iri(), "initialized resource");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use fluree_vocab::xsd;

    #[test]
    fn test_resource_address() {
        let mut ctx = ModelContext::new();
        let alice = ResourceBuilder::resource()
            .label("alice")
            .build(&mut ctx)
            .unwrap();
        assert_eq!(
            alice.iri(),
            Some("http://default.example.com/Resource#alice")
        );
        assert_eq!(
            ctx.store().value(alice.term(), &Term::iri(rdf::TYPE)),
            Some(Term::iri(rdfs::RESOURCE))
        );
        assert_eq!(
            alice.value(&ctx, "dcterms:identifier").unwrap(),
            Some(Term::string("alice"))
        );
        assert_eq!(
            alice.value(&ctx, "skos:prefLabel").unwrap(),
            Some(Term::string("alice"))
        );
    }

    #[test]
    fn test_class_casing_records_advisory() {
        let mut ctx = ModelContext::new();
        let class = ResourceBuilder::class()
            .label("research paper")
            .build(&mut ctx)
            .unwrap();
        assert_eq!(class.id(), Some("ResearchPaper"));
        assert_eq!(
            class.iri(),
            Some("http://default.example.com/Class#ResearchPaper")
        );
        assert!(ctx.diagnostics().has(DiagnosticCode::IdentifierReformatted));
    }

    #[test]
    fn test_property_casing() {
        let mut ctx = ModelContext::new();
        let property = ResourceBuilder::property()
            .identifier("hasAuthor")
            .build(&mut ctx)
            .unwrap();
        assert_eq!(property.id(), Some("hasAuthor"));
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_hierarchical_paths() {
        let mut ctx = ModelContext::new();
        let person = ResourceBuilder::class().label("Person").build(&mut ctx).unwrap();
        let student = ResourceBuilder::class()
            .label("Student")
            .super_resource(&person)
            .build(&mut ctx)
            .unwrap();
        assert_eq!(
            student.iri(),
            Some("http://default.example.com/Class/Person#Student")
        );
        assert_eq!(student.lineage(), ["Person", "Student"]);
        assert_eq!(
            ctx.store().value(student.term(), &Term::iri(rdfs::SUB_CLASS_OF)),
            Some(person.term().clone())
        );

        let bob = ResourceBuilder::instance(&student)
            .label("bob")
            .build(&mut ctx)
            .unwrap();
        assert_eq!(
            bob.iri(),
            Some("http://default.example.com/Person/Student#bob")
        );
        assert_eq!(bob.type_iri(), student.iri().unwrap());
    }

    #[test]
    fn test_flat_paths_when_not_hierarchical() {
        let mut ctx = ModelContext::with_config(ModelConfig {
            hierarchical_path: false,
            ..ModelConfig::default()
        });
        let person = ResourceBuilder::class().label("Person").build(&mut ctx).unwrap();
        let student = ResourceBuilder::class()
            .label("Student")
            .super_resource(&person)
            .build(&mut ctx)
            .unwrap();
        assert_eq!(
            student.iri(),
            Some("http://default.example.com/Class#Student")
        );
    }

    #[test]
    fn test_identifier_is_legalized() {
        let mut ctx = ModelContext::new();
        let r = ResourceBuilder::resource()
            .identifier("a b#c")
            .path("my docs")
            .type_in_iri(false)
            .build(&mut ctx)
            .unwrap();
        assert_eq!(
            r.iri(),
            Some("http://default.example.com/my%20docs#a%20b%23c")
        );
        assert_eq!(r.id(), Some("a b#c"));
    }

    #[test]
    fn test_bare_address_without_type_segment() {
        let mut ctx = ModelContext::new();
        let r = ResourceBuilder::resource()
            .identifier("alice")
            .type_in_iri(false)
            .build(&mut ctx)
            .unwrap();
        assert_eq!(r.iri(), Some("http://default.example.com#alice"));
    }

    #[test]
    fn test_rebuild_is_a_store_no_op() {
        let mut ctx = ModelContext::new();
        let first = ResourceBuilder::resource().label("x").build(&mut ctx).unwrap();
        let snapshot = ctx.store().clone();
        let second = ResourceBuilder::resource().label("x").build(&mut ctx).unwrap();
        assert_eq!(first, second);
        assert_eq!(*ctx.store(), snapshot);
    }

    #[test]
    fn test_missing_and_empty_identity() {
        let mut ctx = ModelContext::new();
        assert!(matches!(
            ResourceBuilder::resource().build(&mut ctx),
            Err(ModelError::MissingIdentity(_))
        ));
        assert!(matches!(
            ResourceBuilder::resource().label("   ").build(&mut ctx),
            Err(ModelError::EmptyIdentifier(_))
        ));
        assert!(ResourceBuilder::resource()
            .iri("http://example.org/explicit")
            .build(&mut ctx)
            .is_ok());
    }

    #[test]
    fn test_language_tags() {
        let mut ctx = ModelContext::new();
        let r = ResourceBuilder::resource()
            .label("chat")
            .language("FR-ca")
            .build(&mut ctx)
            .unwrap();
        assert_eq!(r.language(), Some("fr-CA"));
        assert_eq!(
            r.value(&ctx, "skos:prefLabel").unwrap(),
            Some(Term::lang_string("chat", "fr-CA"))
        );

        let bad = ResourceBuilder::resource()
            .label("dog")
            .language("not a tag")
            .build(&mut ctx)
            .unwrap();
        assert_eq!(bad.language(), None);
        assert!(ctx.diagnostics().has(DiagnosticCode::InvalidLanguage));
    }

    #[test]
    fn test_namespace_source_link() {
        let mut ctx = ModelContext::new();
        let ns = Namespace::new("http://library.example.org/");
        let r = ResourceBuilder::resource()
            .label("book")
            .namespace(ns)
            .build(&mut ctx)
            .unwrap();
        assert_eq!(r.iri(), Some("http://library.example.org/Resource#book"));
        assert_eq!(
            r.value(&ctx, "dcterms:source").unwrap(),
            Some(Term::iri("http://library.example.org"))
        );
    }

    #[test]
    fn test_set_records_overwrite() {
        let mut ctx = ModelContext::new();
        let r = ResourceBuilder::resource().label("r").build(&mut ctx).unwrap();
        r.set(&mut ctx, "http://example.org/age", 3).unwrap();
        assert!(!ctx.diagnostics().has(DiagnosticCode::ValueOverwritten));
        r.set(&mut ctx, "http://example.org/age", 4).unwrap();
        assert!(ctx.diagnostics().has(DiagnosticCode::ValueOverwritten));
        r.replace(&mut ctx, "http://example.org/age", 5).unwrap();
        assert_eq!(ctx.diagnostics().count(DiagnosticCode::ValueOverwritten), 1);
        assert_eq!(
            r.objects(&ctx, "http://example.org/age").unwrap(),
            vec![Term::integer(5)]
        );
    }

    #[test]
    fn test_remove_missing_records_advisory() {
        let mut ctx = ModelContext::new();
        let r = ResourceBuilder::resource().label("r").build(&mut ctx).unwrap();
        assert_eq!(r.remove(&mut ctx, "http://example.org/p", None).unwrap(), 0);
        assert!(ctx.diagnostics().has(DiagnosticCode::MissingStatement));
    }

    #[test]
    fn test_alt_label_equal_to_pref_label_is_skipped() {
        let mut ctx = ModelContext::new();
        let r = ResourceBuilder::resource().label("Moon").build(&mut ctx).unwrap();
        assert!(!r.add_alt_label(&mut ctx, "Moon").unwrap());
        assert!(r.add_alt_label(&mut ctx, "Luna").unwrap());
        assert!(ctx.diagnostics().has(DiagnosticCode::AltLabelSkipped));
    }

    #[test]
    fn test_instance_constraints() {
        let mut ctx = ModelContext::new();
        let book = ResourceBuilder::class().label("Book").build(&mut ctx).unwrap();
        let book_iri = book.iri().unwrap().to_string();
        ctx.constraints_mut().class_mut(&book_iri).set_property(
            "http://example.org/pages",
            crate::constraints::PropertyConstraint::datatypes([xsd::INTEGER]),
        );
        let dune = ResourceBuilder::instance(&book).label("dune").build(&mut ctx).unwrap();

        dune.set(&mut ctx, "http://example.org/pages", 412).unwrap();
        let err = dune
            .set(&mut ctx, "http://example.org/pages", "many")
            .unwrap_err();
        assert!(matches!(err, ModelError::ConstraintViolation { .. }));
        assert_eq!(
            dune.value(&ctx, "http://example.org/pages").unwrap(),
            Some(Term::integer(412))
        );
    }

    #[test]
    fn test_invalid_predicate() {
        let mut ctx = ModelContext::new();
        let r = ResourceBuilder::resource().label("r").build(&mut ctx).unwrap();
        assert!(matches!(
            r.add(&mut ctx, "knows", 1),
            Err(ModelError::InvalidPredicate(_))
        ));
    }
}

//! Constraint registry
//!
//! Instead of synthesizing a type per class, an instance of class `C` is a
//! plain [`Resource`](crate::Resource) tagged with `C`; statement checks look
//! up `C` here. A class entry lists per-predicate constraints and may be
//! closed, in which case predicates it does not list are rejected.
//!
//! Container membership predicates (`rdf:_1`, `rdf:_2`, ...) are checked
//! against the `rdfs:member` entry of the container's type.

use fluree_graph_ir::Term;
use fluree_vocab::{dcterms, rdf, rdfs, skos};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Predicates every resource may carry, closed or not
const BASE_PREDICATES: [&str; 8] = [
    rdf::TYPE,
    rdfs::LABEL,
    rdfs::SUB_CLASS_OF,
    rdfs::SUB_PROPERTY_OF,
    dcterms::IDENTIFIER,
    dcterms::SOURCE,
    skos::PREF_LABEL,
    skos::ALT_LABEL,
];

/// Constraints on one predicate
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyConstraint {
    /// Allowed literal datatypes; `None` allows any
    pub datatypes: Option<BTreeSet<String>>,
    /// Maximum number of values
    pub max_count: Option<usize>,
}

impl PropertyConstraint {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn datatypes<I, T>(datatypes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            datatypes: Some(datatypes.into_iter().map(Into::into).collect()),
            max_count: None,
        }
    }

    pub fn with_max_count(mut self, max: usize) -> Self {
        self.max_count = Some(max);
        self
    }

    pub fn single() -> Self {
        Self::any().with_max_count(1)
    }

    /// Why `object` is not acceptable, if it is not
    fn violation(&self, predicate: &str, object: &Term) -> Option<String> {
        let allowed = self.datatypes.as_ref()?;
        let datatype = object.datatype()?;
        if allowed.contains(datatype.as_iri()) {
            return None;
        }
        let allowed: Vec<&str> = allowed.iter().map(String::as_str).collect();
        Some(format!(
            "object {} has datatype <{}>, expected one of {:?} for <{}>",
            object, datatype, allowed, predicate
        ))
    }
}

/// Constraints attached to a class
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassConstraints {
    pub properties: BTreeMap<String, PropertyConstraint>,
    pub closed: bool,
}

impl ClassConstraints {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn closed() -> Self {
        Self {
            properties: BTreeMap::new(),
            closed: true,
        }
    }

    pub fn with_property(mut self, predicate: impl Into<String>, constraint: PropertyConstraint) -> Self {
        self.properties.insert(predicate.into(), constraint);
        self
    }

    pub fn set_property(&mut self, predicate: impl Into<String>, constraint: PropertyConstraint) {
        self.properties.insert(predicate.into(), constraint);
    }

    fn lookup(&self, predicate: &str) -> Option<&PropertyConstraint> {
        self.properties.get(predicate).or_else(|| {
            rdf::is_member(predicate)
                .then(|| self.properties.get(rdfs::MEMBER))
                .flatten()
        })
    }
}

/// Type IRI → class constraints
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintRegistry {
    classes: HashMap<String, ClassConstraints>,
}

impl ConstraintRegistry {
    /// Registry seeded with the list and container vocabularies
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(
            rdf::LIST,
            ClassConstraints::closed()
                .with_property(rdf::FIRST, PropertyConstraint::single())
                .with_property(rdf::REST, PropertyConstraint::single()),
        );
        for container in [rdf::BAG, rdf::SEQ, rdf::ALT] {
            registry.register(
                container,
                ClassConstraints::closed().with_property(rdfs::MEMBER, PropertyConstraint::single()),
            );
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    pub fn register(&mut self, type_iri: impl Into<String>, constraints: ClassConstraints) {
        self.classes.insert(type_iri.into(), constraints);
    }

    pub fn class(&self, type_iri: &str) -> Option<&ClassConstraints> {
        self.classes.get(type_iri)
    }

    /// Entry for `type_iri`, created open and empty if missing
    pub fn class_mut(&mut self, type_iri: &str) -> &mut ClassConstraints {
        self.classes.entry(type_iri.to_string()).or_default()
    }

    /// Constraint governing `predicate` on instances of `type_iri`
    pub fn property(&self, type_iri: &str, predicate: &str) -> Option<&PropertyConstraint> {
        self.class(type_iri)?.lookup(predicate)
    }

    /// Check one statement about an instance of `type_iri`
    ///
    /// Returns the violation message; types with no entry accept anything.
    pub fn check(&self, type_iri: &str, predicate: &str, object: &Term) -> Result<(), String> {
        let Some(class) = self.class(type_iri) else {
            return Ok(());
        };
        match class.lookup(predicate) {
            Some(constraint) => match constraint.violation(predicate, object) {
                Some(message) => Err(message),
                None => Ok(()),
            },
            None if class.closed && !BASE_PREDICATES.contains(&predicate) => Err(format!(
                "predicate <{}> is not allowed on instances of <{}>",
                predicate, type_iri
            )),
            None => Ok(()),
        }
    }
}

impl Default for ConstraintRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluree_vocab::xsd;

    #[test]
    fn test_list_is_closed() {
        let registry = ConstraintRegistry::new();
        assert!(registry.check(rdf::LIST, rdf::FIRST, &Term::integer(1)).is_ok());
        assert!(registry.check(rdf::LIST, rdf::TYPE, &Term::iri(rdf::LIST)).is_ok());
        assert!(registry
            .check(rdf::LIST, "http://example.org/p", &Term::integer(1))
            .is_err());
        assert_eq!(
            registry.property(rdf::LIST, rdf::REST).and_then(|c| c.max_count),
            Some(1)
        );
    }

    #[test]
    fn test_membership_predicates_use_member_entry() {
        let mut registry = ConstraintRegistry::new();
        assert!(registry.check(rdf::SEQ, &rdf::member(7), &Term::string("x")).is_ok());

        registry
            .class_mut(rdf::SEQ)
            .set_property(rdfs::MEMBER, PropertyConstraint::datatypes([xsd::INTEGER]));
        assert!(registry.check(rdf::SEQ, &rdf::member(1), &Term::integer(3)).is_ok());
        let err = registry
            .check(rdf::SEQ, &rdf::member(2), &Term::string("x"))
            .unwrap_err();
        assert!(err.contains("datatype"));
        // IRIs carry no datatype
        assert!(registry
            .check(rdf::SEQ, &rdf::member(2), &Term::iri("http://example.org/a"))
            .is_ok());
    }

    #[test]
    fn test_unregistered_type_accepts_anything() {
        let registry = ConstraintRegistry::new();
        assert!(registry
            .check("http://example.org/Thing", "http://example.org/p", &Term::boolean(true))
            .is_ok());
    }
}

//! Namespaces and the prefix registry
//!
//! A [`Namespace`] is the base every built address starts from. The
//! [`NamespaceRegistry`] maps prefixes to namespace IRIs in both directions;
//! it expands prefixed predicate names and compacts IRIs for diagnostics.
//! One registry lives on each [`ModelContext`](crate::ModelContext); there is
//! no process-wide table.

use crate::error::{ModelError, Result};
use crate::iri::{legalize, legalize_path};
use fluree_vocab::namespaces;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Base IRI for built addresses, stored without a trailing `/` or `#`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Namespace(Arc<str>);

impl Namespace {
    pub fn new(iri: impl AsRef<str>) -> Self {
        Namespace(Arc::from(iri.as_ref().trim_end_matches(['/', '#'])))
    }

    /// Assemble a namespace from IRI parts, legalizing each one
    ///
    /// ```
    /// use fluree_graph_model::Namespace;
    ///
    /// let ns = Namespace::build("https", "data.example.org", "library/books");
    /// assert_eq!(ns.as_str(), "https://data.example.org/library/books");
    /// ```
    pub fn build(scheme: &str, authority: &str, path: &str) -> Self {
        let mut iri = format!("{}://{}", legalize(scheme, true), legalize(authority, true));
        let path = legalize_path(path);
        if !path.is_empty() {
            iri.push('/');
            iri.push_str(&path);
        }
        Namespace::new(iri)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address of an identifier under this namespace: `<ns>/<path>#<id>`,
    /// or `<ns>#<id>` when `path` is empty
    ///
    /// `path` and `identifier` must already be legalized.
    pub fn address(&self, path: &str, identifier: &str) -> String {
        if path.is_empty() {
            format!("{}#{}", self.0, identifier)
        } else {
            format!("{}/{}#{}", self.0, path, identifier)
        }
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Namespace::build(
            namespaces::DEFAULT_SCHEME,
            &format!(
                "{}.{}",
                namespaces::DEFAULT_SUBDOMAIN,
                namespaces::DEFAULT_DOMAIN
            ),
            "",
        )
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bidirectional prefix ↔ namespace map
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceRegistry {
    by_prefix: BTreeMap<String, String>,
    by_namespace: BTreeMap<String, String>,
}

impl NamespaceRegistry {
    /// Registry seeded with the default namespace (empty prefix) and the
    /// standard vocabularies
    pub fn new(default_namespace: &Namespace) -> Self {
        let mut registry = Self::empty();
        registry.bind("", format!("{}/", default_namespace));
        for (prefix, ns) in namespaces::STANDARD_PREFIXES {
            registry.bind(prefix, ns);
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            by_prefix: BTreeMap::new(),
            by_namespace: BTreeMap::new(),
        }
    }

    /// Bind `prefix` to `namespace`, replacing any previous binding of
    /// either side. Returns the namespace previously bound to `prefix`.
    pub fn bind(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Option<String> {
        let prefix = prefix.into();
        let namespace = namespace.into();
        if let Some(old_prefix) = self.by_namespace.remove(&namespace) {
            self.by_prefix.remove(&old_prefix);
        }
        let previous = self.by_prefix.insert(prefix.clone(), namespace.clone());
        if let Some(old_ns) = &previous {
            self.by_namespace.remove(old_ns);
        }
        self.by_namespace.insert(namespace, prefix);
        previous
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.by_prefix.get(prefix).map(String::as_str)
    }

    pub fn prefix(&self, namespace: &str) -> Option<&str> {
        self.by_namespace.get(namespace).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_prefix.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// Expand a prefixed name (`skos:prefLabel`) to a full IRI
    pub fn expand(&self, name: &str) -> Option<String> {
        let (prefix, local) = name.split_once(':')?;
        self.namespace(prefix).map(|ns| format!("{ns}{local}"))
    }

    /// Compact an IRI with the longest matching namespace; IRIs with no
    /// matching namespace are returned in angle brackets
    pub fn compact(&self, iri: &str) -> String {
        self.by_namespace
            .iter()
            .filter(|(ns, _)| iri.starts_with(ns.as_str()) && iri.len() > ns.len())
            .max_by_key(|(ns, _)| ns.len())
            .map(|(ns, prefix)| format!("{}:{}", prefix, &iri[ns.len()..]))
            .unwrap_or_else(|| format!("<{iri}>"))
    }

    /// Resolve a predicate name to an absolute IRI
    ///
    /// Absolute IRIs (`scheme://...`, `urn:...`) pass through; prefixed
    /// names are expanded; anything else is rejected.
    pub fn resolve(&self, name: &str) -> Result<String> {
        if name.contains("://") || name.starts_with("urn:") {
            return Ok(name.to_string());
        }
        self.expand(name)
            .ok_or_else(|| ModelError::invalid_predicate(name.to_string()))
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new(&Namespace::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluree_vocab::{rdf, skos};

    #[test]
    fn test_default_namespace() {
        assert_eq!(Namespace::default().as_str(), "http://default.example.com");
        assert_eq!(
            Namespace::new("http://example.org/ns/").address("Class", "Person"),
            "http://example.org/ns/Class#Person"
        );
    }

    #[test]
    fn test_address_without_path() {
        let ns = Namespace::new("http://example.org/ns");
        assert_eq!(ns.address("", "Person"), "http://example.org/ns#Person");
    }

    #[test]
    fn test_build_legalizes_authority() {
        let ns = Namespace::build("http", "user@host", "my path/sub");
        assert_eq!(ns.as_str(), "http://user%40host/my%20path/sub");
    }

    #[test]
    fn test_seeded_prefixes() {
        let registry = NamespaceRegistry::default();
        assert_eq!(registry.namespace("rdf"), Some(rdf::NS));
        assert_eq!(registry.namespace(""), Some("http://default.example.com/"));
        assert_eq!(registry.prefix(skos::NS), Some("skos"));
    }

    #[test]
    fn test_expand_and_compact() {
        let registry = NamespaceRegistry::default();
        assert_eq!(registry.expand("skos:prefLabel").as_deref(), Some(skos::PREF_LABEL));
        assert_eq!(registry.expand("nope:x"), None);
        assert_eq!(registry.compact(rdf::FIRST), "rdf:first");
        assert_eq!(
            registry.compact("http://default.example.com/Resource#alice"),
            ":Resource#alice"
        );
        assert_eq!(registry.compact("http://other.org/x"), "<http://other.org/x>");
    }

    #[test]
    fn test_rebinding_replaces_both_directions() {
        let mut registry = NamespaceRegistry::empty();
        assert_eq!(registry.bind("ex", "http://example.org/"), None);
        assert_eq!(
            registry.bind("ex", "http://example.com/").as_deref(),
            Some("http://example.org/")
        );
        assert_eq!(registry.prefix("http://example.org/"), None);

        registry.bind("ex2", "http://example.com/");
        assert_eq!(registry.namespace("ex"), None);
        assert_eq!(registry.prefix("http://example.com/"), Some("ex2"));
    }

    #[test]
    fn test_resolve() {
        let registry = NamespaceRegistry::default();
        assert_eq!(registry.resolve("rdf:type").unwrap(), rdf::TYPE);
        assert_eq!(
            registry.resolve("http://example.org/p").unwrap(),
            "http://example.org/p"
        );
        assert!(matches!(
            registry.resolve("knows"),
            Err(ModelError::InvalidPredicate(_))
        ));
    }
}

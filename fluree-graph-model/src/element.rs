//! Collection elements and their store-ready form

use crate::resource::Resource;
use fluree_graph_ir::Term;
use std::fmt;

/// A value a resource can point at
///
/// Native values are formatted to literal terms when written; see
/// [`Element::format`].
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Term(Term),
    Resource(Resource),
    Text(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
}

impl Element {
    /// Store-ready term for this element
    ///
    /// Text takes `language` when one is given, otherwise `xsd:string`.
    /// Integers, doubles and booleans map to `xsd:integer`, `xsd:double` and
    /// `xsd:boolean`; a nested resource is replaced by its address.
    pub fn format(&self, language: Option<&str>) -> Term {
        match self {
            Element::Term(term) => term.clone(),
            Element::Resource(resource) => resource.term().clone(),
            Element::Text(text) => match language {
                Some(lang) => Term::lang_string(text, lang),
                None => Term::string(text),
            },
            Element::Integer(i) => Term::integer(*i),
            Element::Double(d) => Term::double(*d),
            Element::Boolean(b) => Term::boolean(*b),
        }
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, Element::Text(text) if text.is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Element::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Element::Resource(resource) => Some(resource),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Term(term) => match term.as_literal() {
                Some((value, _, _)) => f.write_str(&value.lexical()),
                None => write!(f, "{}", term),
            },
            Element::Resource(resource) => write!(f, "{}", resource.term()),
            Element::Text(text) => f.write_str(text),
            Element::Integer(i) => write!(f, "{}", i),
            Element::Double(d) => write!(f, "{}", d),
            Element::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<Term> for Element {
    fn from(term: Term) -> Self {
        Element::Term(term)
    }
}

impl From<Resource> for Element {
    fn from(resource: Resource) -> Self {
        Element::Resource(resource)
    }
}

impl From<&Resource> for Element {
    fn from(resource: &Resource) -> Self {
        Element::Resource(resource.clone())
    }
}

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Element::Text(text.to_string())
    }
}

impl From<String> for Element {
    fn from(text: String) -> Self {
        Element::Text(text)
    }
}

impl From<i64> for Element {
    fn from(i: i64) -> Self {
        Element::Integer(i)
    }
}

impl From<i32> for Element {
    fn from(i: i32) -> Self {
        Element::Integer(i64::from(i))
    }
}

impl From<f64> for Element {
    fn from(d: f64) -> Self {
        Element::Double(d)
    }
}

impl From<bool> for Element {
    fn from(b: bool) -> Self {
        Element::Boolean(b)
    }
}

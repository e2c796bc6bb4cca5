//! RDF literal datatypes
//!
//! Datatypes are always explicit in this IR: plain strings carry
//! `xsd:string`, language-tagged strings carry `rdf:langString`.

use fluree_vocab::{rdf, xsd};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// RDF literal datatype, stored as its expanded IRI
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    pub fn xsd_string() -> Self {
        Self::from_iri(xsd::STRING)
    }

    pub fn xsd_boolean() -> Self {
        Self::from_iri(xsd::BOOLEAN)
    }

    pub fn xsd_integer() -> Self {
        Self::from_iri(xsd::INTEGER)
    }

    pub fn xsd_double() -> Self {
        Self::from_iri(xsd::DOUBLE)
    }

    pub fn xsd_decimal() -> Self {
        Self::from_iri(xsd::DECIMAL)
    }

    pub fn xsd_date_time() -> Self {
        Self::from_iri(xsd::DATE_TIME)
    }

    pub fn xsd_any_uri() -> Self {
        Self::from_iri(xsd::ANY_URI)
    }

    /// rdf:langString - for language-tagged literals
    pub fn rdf_lang_string() -> Self {
        Self::from_iri(rdf::LANG_STRING)
    }

    /// Get the IRI of this datatype
    pub fn as_iri(&self) -> &str {
        &self.0
    }

    pub fn is_xsd_string(&self) -> bool {
        self.as_iri() == xsd::STRING
    }

    pub fn is_lang_string(&self) -> bool {
        self.as_iri() == rdf::LANG_STRING
    }

    /// Check if this is a numeric type (integer, long, int, decimal, float, double)
    pub fn is_numeric(&self) -> bool {
        xsd::is_numeric_datatype(self.as_iri())
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! RDF Vocabulary Constants for the Fluree graph model
//!
//! This crate provides a centralized location for the RDF vocabulary IRIs
//! used by the term model and the object-modeling layer.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `owl` - OWL vocabulary (http://www.w3.org/2002/07/owl#)
//! - `skos` - SKOS labelling vocabulary
//! - `dcterms` - Dublin Core terms used for identifiers and provenance
//! - `namespaces` - Namespace base IRIs and their conventional prefixes

/// RDF vocabulary constants
pub mod rdf {
    /// RDF namespace IRI
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// rdf:JSON IRI
    pub const JSON: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#JSON";

    /// rdf:Property IRI
    pub const PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";

    /// rdf:List IRI
    pub const LIST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#List";

    /// rdf:first IRI (RDF list head)
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";

    /// rdf:rest IRI (RDF list tail)
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";

    /// rdf:nil IRI (RDF list terminator)
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

    /// rdf:Bag IRI
    pub const BAG: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Bag";

    /// rdf:Seq IRI
    pub const SEQ: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Seq";

    /// rdf:Alt IRI
    pub const ALT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Alt";

    /// Build the container membership predicate `rdf:_n`
    ///
    /// Membership positions are 1-based: `member(1)` is `rdf:_1`.
    ///
    /// # Example
    /// ```
    /// use fluree_vocab::rdf;
    ///
    /// assert_eq!(
    ///     rdf::member(3),
    ///     "http://www.w3.org/1999/02/22-rdf-syntax-ns#_3"
    /// );
    /// ```
    pub fn member(position: usize) -> String {
        format!("{NS}_{position}")
    }

    /// Parse a container membership predicate back into its 1-based position
    ///
    /// Returns `None` for anything that is not `rdf:_n` with `n >= 1`.
    pub fn member_position(iri: &str) -> Option<usize> {
        let digits = iri.strip_prefix(NS)?.strip_prefix('_')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match digits.parse::<usize>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(n),
        }
    }

    /// Check whether an IRI is a container membership predicate
    #[inline]
    pub fn is_member(iri: &str) -> bool {
        member_position(iri).is_some()
    }
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// RDFS namespace IRI
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// rdfs:Resource IRI
    pub const RESOURCE: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";

    /// rdfs:Class IRI
    pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";

    /// rdfs:Container IRI
    pub const CONTAINER: &str = "http://www.w3.org/2000/01/rdf-schema#Container";

    /// rdfs:member IRI
    pub const MEMBER: &str = "http://www.w3.org/2000/01/rdf-schema#member";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// rdfs:subClassOf IRI
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

    /// rdfs:subPropertyOf IRI
    pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";

    /// rdfs:domain IRI
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";

    /// rdfs:range IRI
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
}

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace IRI
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:int IRI
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:anyURI IRI
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

    /// Check if a datatype IRI is a numeric type
    #[inline]
    pub fn is_numeric_datatype(datatype_iri: &str) -> bool {
        matches!(
            datatype_iri,
            INTEGER | LONG | INT | DECIMAL | FLOAT | DOUBLE
        )
    }

    /// Get the local name portion of a datatype IRI (e.g., "integer" from xsd:integer)
    #[inline]
    pub fn datatype_local_name(datatype_iri: &str) -> Option<&str> {
        datatype_iri.rsplit('#').next()
    }
}

/// OWL vocabulary constants
pub mod owl {
    /// OWL namespace IRI
    pub const NS: &str = "http://www.w3.org/2002/07/owl#";

    /// owl:Ontology IRI
    pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";

    /// owl:inverseOf IRI
    pub const INVERSE_OF: &str = "http://www.w3.org/2002/07/owl#inverseOf";
}

/// SKOS vocabulary constants
pub mod skos {
    /// SKOS namespace IRI
    pub const NS: &str = "http://www.w3.org/2004/02/skos/core#";

    /// skos:prefLabel IRI
    pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";

    /// skos:altLabel IRI
    pub const ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";
}

/// Dublin Core terms
pub mod dcterms {
    /// DCTERMS namespace IRI
    pub const NS: &str = "http://purl.org/dc/terms/";

    /// dcterms:identifier IRI (links a resource to its plain identifier)
    pub const IDENTIFIER: &str = "http://purl.org/dc/terms/identifier";

    /// dcterms:source IRI (links a resource to the namespace it was built in)
    pub const SOURCE: &str = "http://purl.org/dc/terms/source";
}

/// Namespace base IRIs and their conventional prefixes
pub mod namespaces {
    /// Default namespace for resources built without an explicit namespace
    pub const DEFAULT: &str = "http://default.example.com";

    /// Scheme of the default namespace
    pub const DEFAULT_SCHEME: &str = "http";

    /// Subdomain of the default namespace
    pub const DEFAULT_SUBDOMAIN: &str = "default";

    /// Domain of the default namespace
    pub const DEFAULT_DOMAIN: &str = "example.com";

    /// Standard `(prefix, namespace)` pairs seeded into every registry
    pub const STANDARD_PREFIXES: [(&str, &str); 6] = [
        ("rdf", super::rdf::NS),
        ("rdfs", super::rdfs::NS),
        ("xsd", super::xsd::NS),
        ("owl", super::owl::NS),
        ("skos", super::skos::NS),
        ("dcterms", super::dcterms::NS),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_predicates_are_one_based() {
        assert_eq!(rdf::member(1), format!("{}_1", rdf::NS));
        assert_eq!(rdf::member_position(&rdf::member(12)), Some(12));
    }

    #[test]
    fn member_position_rejects_non_members() {
        assert_eq!(rdf::member_position(rdf::FIRST), None);
        assert_eq!(rdf::member_position(&format!("{}_0", rdf::NS)), None);
        assert_eq!(rdf::member_position(&format!("{}_", rdf::NS)), None);
        assert_eq!(rdf::member_position(&format!("{}_1a", rdf::NS)), None);
        assert_eq!(rdf::member_position("http://example.org/_1"), None);
        assert!(!rdf::is_member(rdf::NIL));
    }

    #[test]
    fn standard_prefixes_cover_core_vocabularies() {
        let prefixes: Vec<&str> = namespaces::STANDARD_PREFIXES
            .iter()
            .map(|(p, _)| *p)
            .collect();
        assert!(prefixes.contains(&"rdf"));
        assert!(prefixes.contains(&"skos"));
        assert_eq!(xsd::datatype_local_name(xsd::INTEGER), Some("integer"));
    }
}

//! IDS document model.
//!
//! Facets are a tagged enum decoded once at the XML boundary, so translators
//! pattern-match on variants instead of probing nested maps for keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A value restriction inside a facet element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetValue {
    /// `<simpleValue>` — a single literal.
    Simple(String),
    /// `<xs:restriction>` with `<xs:enumeration>` entries, in document order.
    Enumeration(Vec<String>),
    /// `<xs:restriction>` with `<xs:pattern>` entries, in document order.
    Pattern(Vec<String>),
}

impl FacetValue {
    /// Build a value from a set of candidates: one distinct value becomes a
    /// scalar, two or more become a sorted enumeration, none becomes `None`.
    /// A singleton enumeration is never produced.
    pub fn from_values(values: impl IntoIterator<Item = String>) -> Option<Self> {
        let distinct: BTreeSet<String> = values.into_iter().collect();
        let mut sorted: Vec<String> = distinct.into_iter().collect();
        match sorted.len() {
            0 => None,
            1 => Some(FacetValue::Simple(sorted.remove(0))),
            _ => Some(FacetValue::Enumeration(sorted)),
        }
    }

    /// The literal of a `Simple` value, if that is what this is.
    pub fn simple(&self) -> Option<&str> {
        match self {
            FacetValue::Simple(value) => Some(value),
            _ => None,
        }
    }

    /// The entries of an `Enumeration`, if that is what this is.
    pub fn enumeration(&self) -> Option<&[String]> {
        match self {
            FacetValue::Enumeration(values) => Some(values),
            _ => None,
        }
    }

    /// The entries of a `Pattern`, if that is what this is.
    pub fn patterns(&self) -> Option<&[String]> {
        match self {
            FacetValue::Pattern(values) => Some(values),
            _ => None,
        }
    }
}

/// One constraint unit inside a specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facet {
    /// Entity-type restriction, optionally narrowed by a predefined type.
    Entity {
        name: FacetValue,
        predefined_type: Option<FacetValue>,
    },
    /// Membership in a classification system, optionally pinned to values
    /// and/or a class URI.
    Classification {
        value: Option<FacetValue>,
        system: Option<FacetValue>,
        uri: Option<String>,
    },
    /// A property inside a property set.
    Property {
        property_set: FacetValue,
        base_name: FacetValue,
        value: Option<FacetValue>,
        data_type: Option<String>,
        uri: Option<String>,
        cardinality: Option<String>,
        instructions: Option<String>,
    },
    /// A direct IFC attribute with a fixed value.
    Attribute {
        name: FacetValue,
        value: Option<FacetValue>,
    },
}

/// One named rule: an applicability condition plus requirement facets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    pub ifc_version: String,
    pub description: Option<String>,
    pub applicability: Vec<Facet>,
    pub requirements: Vec<Facet>,
}

/// A complete IDS document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ids {
    pub title: String,
    pub copyright: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub specifications: Vec<Specification>,
}

//! Error types for IDS document decoding.
//!
//! Fetch failures have no error type; a failed fetch surfaces as "no data"
//! at the call site. Only a malformed IDS input aborts a run.

use thiserror::Error;

/// Errors raised while decoding an IDS XML document into the facet model.
#[derive(Error, Debug)]
pub enum IdsParseError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Document has no <{0}> element")]
    MissingElement(&'static str),

    #[error("Specification is missing its required name attribute")]
    MissingSpecificationName,

    #[error("Unexpected closing tag </{0}>")]
    UnexpectedClose(String),
}

//! IDS side of the conversion: document model, XML reader, XML writer.

pub mod reader;
pub mod types;
pub mod writer;

pub use types::{Facet, FacetValue, Ids, Specification};
pub use writer::IdsVersion;

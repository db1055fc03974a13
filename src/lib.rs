//! bsdd-ids - bSDD ⇄ IDS converter
//!
//! Converts between buildingSMART Data Dictionary (bSDD) class/property
//! records and Information Delivery Specification (IDS) rule documents.
//!
//! Forward direction: fetch a dictionary from the bSDD API and generate one
//! IDS specification per class. Reverse direction: read an IDS document and
//! assemble a bSDD import JSON.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bsdd_ids::bsdd::BsddClient;
//! use bsdd_ids::forward::translate_dictionary;
//!
//! let mut client = BsddClient::new()?;
//! let ids = translate_dictionary(
//!     &mut client,
//!     "https://identifier.buildingsmart.org/uri/demo/demo/latest",
//! )?;
//! assert!(!ids.specifications.is_empty());
//! # Ok::<(), anyhow::Error>(())
//! ```

// Core error handling
pub mod error;

// Pure mapping helpers
pub mod datatype;
pub mod naming;

// bSDD side: API models, client, disk cache, import JSON
pub mod bsdd;

// IDS side: document model, XML reader/writer
pub mod ids;

// The two translation directions
pub mod forward;
pub mod reverse;

// Public re-exports for the common call paths
pub use bsdd::{BsddClient, ClassSource, DiskCache};
pub use error::IdsParseError;
pub use forward::translate_dictionary;
pub use ids::{Facet, FacetValue, Ids, IdsVersion, Specification};
pub use reverse::{translate_ids, ReverseOptions};

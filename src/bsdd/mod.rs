//! bSDD side of the conversion: API models, HTTP client, disk cache, and the
//! import-JSON output model.

pub mod cache;
pub mod client;
pub mod types;

pub use cache::{CacheKind, DiskCache};
pub use client::{BsddClient, ClassSource, BSDD_API_BASE};
pub use types::*;

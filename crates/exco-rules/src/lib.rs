//! # exco-rules — Export Compliance Rule Catalog
//!
//! Holds the configuration side of compliance: which goods each destination
//! refuses, which origin/destination routes are closed, which goods may not
//! share a parcel, and how heavy a single container may be.
//!
//! - [`RuleCatalog`]: validated, read-only catalog with typed lookups.
//! - [`CatalogDocument`]: the authored (YAML/JSON) form before validation.
//! - [`parser`]: format-aware file loading shared with request documents.
//!
//! ## Crate Policy
//!
//! - A catalog that fails validation is a startup error. There is no
//!   partially-loaded catalog.
//! - The catalog has no lifecycle beyond load: no setters, no reload.

pub mod catalog;
pub mod error;
pub mod parser;

pub use catalog::{CatalogDocument, RuleCatalog, DEFAULT_CATALOG_YAML};
pub use error::{RulesError, RulesResult};

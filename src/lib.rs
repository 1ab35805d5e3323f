//! Cached, sanitized lookups over game reference sheets: worlds, duties,
//! items and item categories, jobs and place names.

pub mod cli;
pub mod reference;
pub mod sanitize;
pub mod sheets;

pub use reference::{Catalog, ItemLists, ReferenceData};
pub use sanitize::{SeStringSanitizer, Sanitizer, Verbatim};
pub use sheets::{SheetError, SheetErrorKind, SheetProvider, SheetStore};

pub mod list;
pub mod source;

pub use list::Catalog;
pub use source::{builtin_catalog, load_catalog_file, resolve_catalog};

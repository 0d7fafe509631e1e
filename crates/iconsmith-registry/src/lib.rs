//! Registry file parsing and editing.
//!
//! A registry is a source file exporting a single object literal whose
//! properties are icon components. This crate locates that object, reports
//! the byte span of every entry, and splices entries in and out while
//! leaving the rest of the file untouched.

pub mod editor;
pub mod parser;

pub use editor::{compare_names, RegistryEditor};
pub use parser::{
    parse_registry, parse_registry_as, RegistryEntry, RegistryError, RegistryFile, RegistryImport,
    DEFAULT_COLLECTION,
};

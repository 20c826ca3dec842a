//! Utility modules for common functionality
//!
//! Provides file operations and XML formatting.

pub mod fs;
pub mod xml;

pub use fs::FileSystemUtils;
pub use xml::{MarkupFormatter, XmlFormatter};

//! # sf-codegen
//!
//! Generates Salesforce permission set metadata from a source tree.
//! Custom fields and custom objects found under the source paths are bound
//! into a permission-set template and written out as indented XML.
//!
//! ## Features
//!
//! - Component discovery for source format and Metadata API format trees
//! - Closed set of metadata kinds, with unknown files reported instead of dropped silently
//! - Built-in or user-supplied Jinja templates
//! - XML pretty-printing of the rendered output
//!
//! ## Example
//!
//! ```no_run
//! use sf_codegen::core::{ComponentLoader, JinjaRenderer, PermissionSetAttributes, PermissionSetGenerator};
//! use sf_codegen::utils::XmlFormatter;
//!
//! let components = ComponentLoader::new()?.load(&["force-app"])?;
//! let attributes = PermissionSetAttributes::new("Sales Ops", "Sales_Ops", "");
//! let generator = PermissionSetGenerator::new(JinjaRenderer::builtin(), XmlFormatter::default());
//! println!("{}", generator.generate(&attributes, &components)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity.
///
/// Logs go to stderr; stdout is reserved for generated output.
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

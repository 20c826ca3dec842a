//! Core functionality for permission set generation
//!
//! Contains component discovery, payload assembly and template rendering.

pub mod component;
pub mod loader;
pub mod permissionset;
pub mod template;

pub use component::{ComponentKind, ComponentSet, MetadataComponent};
pub use loader::ComponentLoader;
pub use permissionset::{PermissionSetAttributes, PermissionSetGenerator, TemplateDataPayload, assemble};
pub use template::{JinjaRenderer, TemplateRenderer};

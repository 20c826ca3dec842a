//! Permission set assembly
//!
//! Splits a component set into the fields and objects a permission set grants
//! access to, then renders and formats the result.

use crate::{
    core::{
        component::{ComponentKind, ComponentSet, MetadataComponent},
        template::TemplateRenderer,
    },
    error::Result,
    utils::xml::MarkupFormatter,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Caller-supplied permission set attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSetAttributes {
    /// Display label
    pub label: String,
    /// API name
    pub name: String,
    pub description: String,
}

impl PermissionSetAttributes {
    pub fn new(
        label: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Data bound into the permission-set template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDataPayload {
    pub attributes: PermissionSetAttributes,
    /// `CustomField` components, in discovery order
    pub fields: Vec<MetadataComponent>,
    /// `CustomObject` components, in discovery order
    pub objects: Vec<MetadataComponent>,
}

/// Partition `components` into template data.
///
/// Only `CustomField` and `CustomObject` components are kept. Everything else
/// is left out of the payload and logged; this never fails.
#[instrument(skip_all, fields(components = components.len()))]
pub fn assemble(attributes: &PermissionSetAttributes, components: &ComponentSet) -> TemplateDataPayload {
    for component in components {
        match &component.kind {
            ComponentKind::CustomField | ComponentKind::CustomObject => {}
            ComponentKind::Other(type_name) => {
                debug!("Excluding {} {}", type_name, component.full_name);
            }
            ComponentKind::Unrecognized(suffix) => {
                warn!(
                    "Excluding unrecognized metadata '{}' ({})",
                    suffix,
                    component.path.display()
                );
            }
        }
    }

    let payload = TemplateDataPayload {
        attributes: attributes.clone(),
        fields: components.of_type(ComponentKind::CustomField.type_name()).into_vec(),
        objects: components.of_type(ComponentKind::CustomObject.type_name()).into_vec(),
    };

    debug!(
        "Assembled payload with {} fields and {} objects",
        payload.fields.len(),
        payload.objects.len()
    );
    payload
}

/// Runs assemble, render and format once, in that order
pub struct PermissionSetGenerator<R, F> {
    renderer: R,
    formatter: F,
}

impl<R: TemplateRenderer, F: MarkupFormatter> PermissionSetGenerator<R, F> {
    pub fn new(renderer: R, formatter: F) -> Self {
        Self { renderer, formatter }
    }

    /// Generate the formatted permission set definition
    #[instrument(skip_all, fields(name = %attributes.name))]
    pub fn generate(
        &self,
        attributes: &PermissionSetAttributes,
        components: &ComponentSet,
    ) -> Result<String> {
        let payload = assemble(attributes, components);
        let markup = self.renderer.render(&payload)?;
        let formatted = self.formatter.format(&markup)?;

        info!(
            "Generated permission set with {} field and {} object permission(s)",
            payload.fields.len(),
            payload.objects.len()
        );
        Ok(formatted)
    }
}

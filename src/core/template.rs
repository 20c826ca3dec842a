//! Template rendering
//!
//! The permission-set template is a Jinja template rendered with
//! `minijinja`. Interpolated values are XML-escaped.

use crate::{
    core::permissionset::TemplateDataPayload,
    error::{CodegenError, Result},
    utils::fs::FileSystemUtils,
};
use minijinja::{Environment, ErrorKind, Output, State, UndefinedBehavior, Value};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Template shipped with the binary
pub const BUILTIN_TEMPLATE: &str = include_str!("../../templates/permissionset.xml.j2");

const BUILTIN_TEMPLATE_NAME: &str = "permissionset.xml.j2";

/// Renders a payload into raw markup
pub trait TemplateRenderer {
    fn render(&self, payload: &TemplateDataPayload) -> Result<String>;
}

/// `minijinja` backed renderer
pub struct JinjaRenderer {
    name: String,
    source: String,
    /// Set when the template was read from disk
    path: Option<PathBuf>,
    env: Environment<'static>,
}

impl JinjaRenderer {
    /// Renderer for the built-in permission-set template
    pub fn builtin() -> Self {
        Self::from_source(BUILTIN_TEMPLATE_NAME, BUILTIN_TEMPLATE)
    }

    /// Renderer for an in-memory template
    pub fn from_source(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            path: None,
            env: Self::environment(),
        }
    }

    /// Renderer for a template file on disk
    #[instrument]
    pub fn from_file<P: AsRef<Path> + std::fmt::Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = FileSystemUtils::new()
            .read_file_to_string(path)
            .map_err(|e| CodegenError::file_system("read template", path, e))?;

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        debug!("Loaded template {} ({} bytes)", name, source.len());
        Ok(Self {
            path: Some(path.to_path_buf()),
            ..Self::from_source(name, source)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn environment() -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_formatter(xml_formatter);
        env
    }
}

impl TemplateRenderer for JinjaRenderer {
    #[instrument(skip(self, payload), fields(template = %self.name))]
    fn render(&self, payload: &TemplateDataPayload) -> Result<String> {
        let rendered = self
            .env
            .render_named_str(&self.name, &self.source, payload)
            .map_err(|e| {
                CodegenError::template(
                    format!("Failed to render {}", self.name),
                    self.path.clone(),
                    e,
                )
            })?;

        debug!("Rendered {} bytes of markup", rendered.len());
        Ok(rendered)
    }
}

/// Writes values XML-escaped; `none` renders as nothing
fn xml_formatter(
    out: &mut Output<'_>,
    _state: &State<'_, '_>,
    value: &Value,
) -> std::result::Result<(), minijinja::Error> {
    if value.is_none() || value.is_undefined() {
        return Ok(());
    }

    let text = value.to_string();
    let written = if value.is_safe() {
        out.write_str(&text)
    } else {
        out.write_str(&quick_xml::escape::escape(text.as_str()))
    };
    written.map_err(|_| minijinja::Error::from(ErrorKind::WriteFailure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        component::{ComponentKind, MetadataComponent},
        permissionset::PermissionSetAttributes,
    };
    use std::fs;
    use tempfile::TempDir;

    fn payload() -> TemplateDataPayload {
        TemplateDataPayload {
            attributes: PermissionSetAttributes::new("Sales & Service", "Sales_Service", ""),
            fields: vec![MetadataComponent::new(
                ComponentKind::CustomField,
                "Account.Rating__c",
                "f",
            )],
            objects: vec![MetadataComponent::new(ComponentKind::CustomObject, "Invoice__c", "o")],
        }
    }

    #[test]
    fn test_builtin_template() {
        let output = JinjaRenderer::builtin().render(&payload()).unwrap();

        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(output.contains("<field>Account.Rating__c</field>"));
        assert!(output.contains("<object>Invoice__c</object>"));
        assert!(output.contains("<label>Sales &amp; Service</label>"));
        assert!(!output.contains("<description>"));
    }

    #[test]
    fn test_custom_template_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("names.j2");
        fs::write(
            &path,
            "<names>{% for f in fields %}<n>{{ f.fullName }}</n>{% endfor %}<api>{{ attributes.name }}</api></names>",
        )
        .unwrap();

        let renderer = JinjaRenderer::from_file(&path).unwrap();
        assert_eq!(renderer.name(), "names.j2");
        assert_eq!(
            renderer.render(&payload()).unwrap(),
            "<names><n>Account.Rating__c</n><api>Sales_Service</api></names>"
        );
    }

    #[test]
    fn test_missing_template_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = JinjaRenderer::from_file(temp_dir.path().join("nope.j2")).err().unwrap();
        assert!(matches!(err, CodegenError::FileSystem { .. }));
    }

    #[test]
    fn test_undefined_variable_is_error() {
        let renderer = JinjaRenderer::from_source("bad.j2", "<a>{{ attributes.owner }}</a>");
        let err = renderer.render(&payload()).unwrap_err();
        assert!(matches!(err, CodegenError::Template { .. }));
    }

    #[test]
    fn test_syntax_error_is_error() {
        let renderer = JinjaRenderer::from_source("bad.j2", "{% for f in fields %}");
        assert!(renderer.render(&payload()).is_err());
    }
}

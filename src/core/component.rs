//! Metadata component model
//!
//! Components are immutable once the loader produces them; filtering a
//! [`ComponentSet`] always yields a new set.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Metadata type of a component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// A field on a standard or custom object
    CustomField,
    /// A standard or custom object definition
    CustomObject,
    /// A registered metadata type that permission sets don't reference
    Other(&'static str),
    /// A `-meta.xml` file whose suffix is not registered
    Unrecognized(String),
}

/// Registered source-format suffixes and their metadata type names
const REGISTRY: &[(&str, &str)] = &[
    ("app", "CustomApplication"),
    ("cls", "ApexClass"),
    ("component", "ApexComponent"),
    ("flow", "Flow"),
    ("labels", "CustomLabels"),
    ("layout", "Layout"),
    ("listView", "ListView"),
    ("page", "ApexPage"),
    ("permissionset", "PermissionSet"),
    ("profile", "Profile"),
    ("recordType", "RecordType"),
    ("tab", "CustomTab"),
    ("trigger", "ApexTrigger"),
    ("validationRule", "ValidationRule"),
];

impl ComponentKind {
    /// Resolve a source-format suffix (`field`, `object`, `cls`, ...)
    pub fn from_suffix(suffix: &str) -> Self {
        match suffix {
            "field" => Self::CustomField,
            "object" => Self::CustomObject,
            _ => REGISTRY
                .iter()
                .find(|(known, _)| *known == suffix)
                .map_or_else(
                    || Self::Unrecognized(suffix.to_string()),
                    |&(_, type_name)| Self::Other(type_name),
                ),
        }
    }

    /// Metadata API type name, or the raw suffix for unrecognized files
    pub fn type_name(&self) -> &str {
        match self {
            Self::CustomField => "CustomField",
            Self::CustomObject => "CustomObject",
            Self::Other(type_name) => type_name,
            Self::Unrecognized(suffix) => suffix,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl Serialize for ComponentKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name())
    }
}

/// A single metadata component discovered in a source tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataComponent {
    /// Metadata type
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// API name, qualified with the parent object for child types
    pub full_name: String,
    /// File the component was read from
    pub path: PathBuf,
}

impl MetadataComponent {
    /// Create a new component
    pub fn new(kind: ComponentKind, full_name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            kind,
            full_name: full_name.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Metadata type name of this component
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

/// Ordered collection of metadata components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentSet {
    components: Vec<MetadataComponent>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component, keeping discovery order
    pub fn push(&mut self, component: MetadataComponent) {
        self.components.push(component);
    }

    /// New set holding clones of the components matching `predicate`
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&MetadataComponent) -> bool,
    {
        self.components
            .iter()
            .filter(|component| predicate(component))
            .cloned()
            .collect()
    }

    /// Components matching a metadata type name
    pub fn of_type(&self, type_name: &str) -> Self {
        self.filter(|component| component.type_name() == type_name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetadataComponent> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Materialize the set as an owned sequence
    pub fn to_vec(&self) -> Vec<MetadataComponent> {
        self.components.clone()
    }

    pub fn into_vec(self) -> Vec<MetadataComponent> {
        self.components
    }
}

impl FromIterator<MetadataComponent> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = MetadataComponent>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

impl Extend<MetadataComponent> for ComponentSet {
    fn extend<I: IntoIterator<Item = MetadataComponent>>(&mut self, iter: I) {
        self.components.extend(iter);
    }
}

impl IntoIterator for ComponentSet {
    type Item = MetadataComponent;
    type IntoIter = std::vec::IntoIter<MetadataComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComponentSet {
    type Item = &'a MetadataComponent;
    type IntoIter = std::slice::Iter<'a, MetadataComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ComponentSet {
        vec![
            MetadataComponent::new(ComponentKind::CustomObject, "Invoice__c", "a"),
            MetadataComponent::new(ComponentKind::CustomField, "Invoice__c.Total__c", "b"),
            MetadataComponent::new(ComponentKind::from_suffix("cls"), "InvoiceService", "c"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_from_suffix() {
        assert_eq!(ComponentKind::from_suffix("field"), ComponentKind::CustomField);
        assert_eq!(ComponentKind::from_suffix("object"), ComponentKind::CustomObject);
        assert_eq!(ComponentKind::from_suffix("cls"), ComponentKind::Other("ApexClass"));
        assert_eq!(
            ComponentKind::from_suffix("widget"),
            ComponentKind::Unrecognized("widget".to_string())
        );
    }

    #[test]
    fn test_type_name() {
        assert_eq!(ComponentKind::CustomField.type_name(), "CustomField");
        assert_eq!(ComponentKind::from_suffix("layout").type_name(), "Layout");
        assert_eq!(ComponentKind::from_suffix("widget").type_name(), "widget");
    }

    #[test]
    fn test_filter_returns_new_set() {
        let set = sample_set();
        let fields = set.of_type("CustomField");

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.iter().next().unwrap().full_name, "Invoice__c.Total__c");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_filter_preserves_order() {
        let set = sample_set();
        let names: Vec<_> = set
            .filter(|c| c.kind != ComponentKind::CustomField)
            .into_iter()
            .map(|c| c.full_name)
            .collect();
        assert_eq!(names, vec!["Invoice__c", "InvoiceService"]);
    }

    #[test]
    fn test_serialize_kind_as_type_name() {
        let value = minijinja::Value::from_serialize(&MetadataComponent::new(
            ComponentKind::CustomField,
            "Account.Rating__c",
            "f",
        ));
        assert_eq!(value.get_attr("type").unwrap().to_string(), "CustomField");
        assert_eq!(value.get_attr("fullName").unwrap().to_string(), "Account.Rating__c");
    }
}

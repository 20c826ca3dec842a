//! Metadata component discovery
//!
//! Scans source trees in either source format (one `*-meta.xml` file per
//! component) or Metadata API format (`objects/<Name>.object` files that embed
//! their fields).

use crate::{
    core::component::{ComponentKind, ComponentSet, MetadataComponent},
    error::{CodegenError, Result},
    utils::fs::FileSystemUtils,
};
use quick_xml::{Reader, events::Event};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// File patterns scanned under each source directory
const SCAN_PATTERNS: &[&str] = &["**/*-meta.xml", "**/*.object"];

/// Discovers metadata components under file-system paths
pub struct ComponentLoader {
    /// Matches `<name>.<suffix>-meta.xml`
    re_source_file: Regex,
    /// Matches `<name>.object`
    re_mdapi_object: Regex,
    fs_utils: FileSystemUtils,
}

impl ComponentLoader {
    /// Create a new component loader
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_source_file: Regex::new(r"^(?P<name>.+)\.(?P<suffix>[A-Za-z]+)-meta\.xml$")
                .map_err(|e| CodegenError::config(format!("Failed to compile regex: {}", e)))?,
            re_mdapi_object: Regex::new(r"^(?P<name>.+)\.object$")
                .map_err(|e| CodegenError::config(format!("Failed to compile regex: {}", e)))?,
            fs_utils: FileSystemUtils::new(),
        })
    }

    /// Load every component found under `paths`, in the order given
    #[instrument(skip(self))]
    pub fn load<P: AsRef<Path> + std::fmt::Debug>(&self, paths: &[P]) -> Result<ComponentSet> {
        let mut set = ComponentSet::new();

        for path in paths {
            self.load_path(path.as_ref(), &mut set)?;
        }

        info!(
            "Loaded {} metadata components from {} path(s)",
            set.len(),
            paths.len()
        );
        Ok(set)
    }

    fn load_path(&self, path: &Path, set: &mut ComponentSet) -> Result<()> {
        if !path.exists() {
            return Err(CodegenError::source_path(path));
        }

        if self.fs_utils.is_file(path) {
            return self.load_file(path, set);
        }

        let files = self.find_metadata_files(path)?;
        debug!("Found {} candidate files under {}", files.len(), path.display());

        for file in files {
            self.load_file(&file, set)?;
        }
        Ok(())
    }

    /// Find candidate metadata files under a directory, sorted by path
    fn find_metadata_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let root = glob::Pattern::escape(&dir.to_string_lossy());
        let mut files = Vec::new();

        for pattern in SCAN_PATTERNS {
            let full_pattern = format!("{}/{}", root.trim_end_matches('/'), pattern);
            let paths = glob::glob(&full_pattern).map_err(|e| {
                CodegenError::config(format!("Invalid glob pattern {}: {}", full_pattern, e))
            })?;

            for entry in paths {
                match entry {
                    Ok(path) if self.fs_utils.is_file(&path) => files.push(path),
                    Ok(_) => {}
                    Err(e) => {
                        let path = e.path().to_path_buf();
                        return Err(CodegenError::file_system("read", path, e.into_error()));
                    }
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// Classify a single file and add the components it defines
    fn load_file(&self, path: &Path, set: &mut ComponentSet) -> Result<()> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            warn!("Skipping file with non UTF-8 name: {}", path.display());
            return Ok(());
        };

        if let Some(caps) = self.re_source_file.captures(file_name) {
            let name = &caps["name"];
            let kind = ComponentKind::from_suffix(&caps["suffix"]);
            let full_name = match kind {
                ComponentKind::CustomField => qualify_field_name(path, name),
                _ => name.to_string(),
            };

            debug!("Found {} {} at {}", kind, full_name, path.display());
            set.push(MetadataComponent::new(kind, full_name, path));
        } else if let Some(caps) = self.re_mdapi_object.captures(file_name) {
            let object = &caps["name"];
            let fields = self.parse_object_fields(path)?;

            debug!(
                "Found CustomObject {} with {} embedded fields at {}",
                object,
                fields.len(),
                path.display()
            );

            set.push(MetadataComponent::new(ComponentKind::CustomObject, object, path));
            set.extend(fields.into_iter().map(|field| {
                MetadataComponent::new(
                    ComponentKind::CustomField,
                    format!("{}.{}", object, field),
                    path,
                )
            }));
        } else {
            debug!("Skipping non-metadata file: {}", path.display());
        }

        Ok(())
    }

    /// Read the `<fields><fullName>` children of a Metadata API object file
    fn parse_object_fields(&self, path: &Path) -> Result<Vec<String>> {
        let content = self
            .fs_utils
            .read_file_to_string(path)
            .map_err(|e| CodegenError::file_system("read", path, e))?;

        let mut reader = Reader::from_str(&content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<String> = Vec::new();
        let mut fields = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    stack.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                }
                Ok(Event::End(_)) => {
                    stack.pop();
                }
                Ok(Event::Text(text)) if is_field_name(&stack) => {
                    let name = text.unescape().map_err(|e| {
                        CodegenError::metadata_with_source("Invalid field name", path, e)
                    })?;
                    fields.push(name.trim().to_string());
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(CodegenError::metadata_with_source(
                        format!("Malformed XML at byte {}", reader.error_position()),
                        path,
                        e,
                    ));
                }
            }
        }

        if !stack.is_empty() {
            return Err(CodegenError::metadata(
                format!("Unclosed element <{}>", stack.join("><")),
                path,
            ));
        }

        Ok(fields)
    }
}

/// True when positioned at `CustomObject/fields/fullName`
fn is_field_name(stack: &[String]) -> bool {
    matches!(stack, [_, fields, full_name] if fields == "fields" && full_name == "fullName")
}

/// `objects/<Object>/fields/<Field>` becomes `<Object>.<Field>`
fn qualify_field_name(path: &Path, field: &str) -> String {
    let object = path
        .parent()
        .filter(|dir| dir.file_name().is_some_and(|n| n == "fields"))
        .and_then(Path::parent)
        .and_then(Path::file_name)
        .and_then(|n| n.to_str());

    match object {
        Some(object) => format!("{}.{}", object, field),
        None => field.to_string(),
    }
}

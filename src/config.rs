//! Configuration for the code generator
//!
//! Built once from the command line and passed explicitly to the command
//! handlers.

use crate::{
    cli::{Args, Command, GenerateArgs, PermissionsetCommand},
    core::permissionset::PermissionSetAttributes,
    error::CodegenError,
    utils::{fs::FileSystemUtils, xml::DEFAULT_INDENT},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Widest indentation accepted for generated output
const MAX_INDENT: usize = 16;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Paths scanned for metadata components
    pub source_paths: Vec<PathBuf>,
    /// Permission set attributes
    pub attributes: PermissionSetAttributes,
    /// Template configuration
    pub template: TemplateConfig,
    /// Output configuration
    pub output: OutputConfig,
}

/// Template configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Template file on disk; the built-in template when unset
    pub path: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination file; stdout when unset
    pub file: Option<PathBuf>,
    /// Overwrite an existing destination file
    pub force: bool,
    /// Spaces per indentation level
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            source_paths: vec![PathBuf::from("force-app")],
            attributes: PermissionSetAttributes::default(),
            template: TemplateConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: None,
            force: false,
            indent: DEFAULT_INDENT,
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, CodegenError> {
        let mut config = Self {
            debug: args.debug,
            ..Self::default()
        };

        match &args.command {
            Command::Permissionset {
                command: PermissionsetCommand::Generate(generate),
            } => config.apply_generate_args(generate),
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_generate_args(&mut self, args: &GenerateArgs) {
        self.source_paths = args.path.clone();
        self.attributes = PermissionSetAttributes::new(
            args.label.clone().unwrap_or_default(),
            args.name.clone().unwrap_or_default(),
            args.description.clone().unwrap_or_default(),
        );
        self.template.path = args.template.clone();
        self.output = OutputConfig {
            file: args.output_file.clone(),
            force: args.force,
            indent: args.indent,
        };
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), CodegenError> {
        if self.source_paths.is_empty() {
            return Err(CodegenError::validation("At least one source path is required"));
        }

        if self.output.indent > MAX_INDENT {
            return Err(CodegenError::validation(format!(
                "Indent of {} exceeds the maximum of {}",
                self.output.indent, MAX_INDENT
            )));
        }

        if let Some(file) = &self.output.file {
            let fs_utils = FileSystemUtils::new();

            if fs_utils.is_dir(file) {
                return Err(CodegenError::validation(format!(
                    "Output path is a directory: {}",
                    file.display()
                )));
            }

            if fs_utils.is_file(file) && !self.output.force {
                return Err(CodegenError::validation(format!(
                    "Output file already exists: {} (use --force to overwrite)",
                    file.display()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["sf-codegen", "permissionset", "generate"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_from_args() {
        let config = Config::from_args(&parse(&[
            "-p", "src", "-n", "Sales_Ops", "-l", "Sales Ops", "--indent", "2",
        ]))
        .unwrap();

        assert_eq!(config.source_paths, vec![PathBuf::from("src")]);
        assert_eq!(
            config.attributes,
            PermissionSetAttributes::new("Sales Ops", "Sales_Ops", "")
        );
        assert!(config.template.path.is_none());
        assert!(config.output.file.is_none());
        assert_eq!(config.output.indent, 2);
    }

    #[test]
    fn test_existing_output_requires_force() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("Sales.permissionset-meta.xml");
        fs::write(&output, "<PermissionSet/>").unwrap();
        let output = output.to_str().unwrap();

        let err = Config::from_args(&parse(&["-o", output])).unwrap_err();
        assert!(matches!(err, CodegenError::Validation { .. }));

        let config = Config::from_args(&parse(&["-o", output, "--force"])).unwrap();
        assert!(config.output.force);
    }

    #[test]
    fn test_output_directory_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().to_str().unwrap();

        let err = Config::from_args(&parse(&["-o", output, "-f"])).unwrap_err();
        assert!(matches!(err, CodegenError::Validation { .. }));
    }

    #[test]
    fn test_indent_limit() {
        let err = Config::from_args(&parse(&["--indent", "40"])).unwrap_err();
        assert!(matches!(err, CodegenError::Validation { .. }));
    }
}

//! Command-line argument parsing

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

const GENERATE_EXAMPLES: &str = "\
Examples:
  sf-codegen permissionset generate -p force-app -n Sales_Ops -l \"Sales Ops\"
  sf-codegen permissionset generate -p force-app/main/default/objects -n Billing -l Billing \\
      -d \"Invoice access\" -o permissionsets/Billing.permissionset-meta.xml -f";

/// Salesforce metadata code generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "sf-codegen")]
pub struct Args {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Permission set generation
    Permissionset {
        #[command(subcommand)]
        command: PermissionsetCommand,
    },
}

/// Permission set subcommands
#[derive(Subcommand, Debug)]
pub enum PermissionsetCommand {
    /// Generate a permission set granting access to every custom field and object under a source path
    #[command(after_help = GENERATE_EXAMPLES)]
    Generate(GenerateArgs),
}

/// Options for `permissionset generate`
#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    /// Source path(s) to scan, comma separated or repeated
    #[arg(short = 'p', long = "path", value_delimiter = ',', default_value = "force-app")]
    pub path: Vec<PathBuf>,

    /// Api Name
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    /// Label
    #[arg(short = 'l', long = "label")]
    pub label: Option<String>,

    /// Description
    #[arg(short = 'd', long = "description")]
    pub description: Option<String>,

    /// Overwrite the output file if it already exists
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Template file to render instead of the built-in one
    #[arg(short = 't', long = "template")]
    pub template: Option<PathBuf>,

    /// Write the permission set to this file instead of stdout
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Spaces per indentation level in the output
    #[arg(long, default_value_t = crate::utils::xml::DEFAULT_INDENT)]
    pub indent: usize,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}

//! Command implementations for the CLI

use crate::{
    cli::{Command, PermissionsetCommand},
    config::Config,
    core::{ComponentLoader, JinjaRenderer, PermissionSetGenerator},
    utils::{fs::FileSystemUtils, xml::XmlFormatter},
};
use anyhow::Context;
use std::io::Write;
use tracing::{debug, info, instrument};

/// Execute the appropriate command based on CLI arguments
#[instrument(skip(config))]
pub fn execute_command(config: &Config, command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Permissionset {
            command: PermissionsetCommand::Generate(_),
        } => execute_generate_command(config),
    }
}

/// Execute the permission set generate command
#[instrument(skip(config))]
fn execute_generate_command(config: &Config) -> anyhow::Result<()> {
    info!("Generating permission set '{}'...", config.attributes.name);

    let loader = ComponentLoader::new()?;
    let components = loader
        .load(&config.source_paths)
        .context("Failed to load metadata components")?;

    let renderer = match &config.template.path {
        Some(path) => JinjaRenderer::from_file(path).context("Failed to load template")?,
        None => JinjaRenderer::builtin(),
    };
    debug!("Using template {}", renderer.name());

    let generator = PermissionSetGenerator::new(renderer, XmlFormatter::new(config.output.indent));
    let xml = generator
        .generate(&config.attributes, &components)
        .context("Failed to generate permission set")?;

    match &config.output.file {
        Some(path) => {
            FileSystemUtils::new()
                .write_file(path, format!("{}\n", xml), config.output.force)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Permission set written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", xml).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use ocfl_fs::FileDriver;
use ocfl_resolv::{Config, Location, ResolvError, Resolver, Select, Walker};
use ocfl_types::{EntityRef, EntityType};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::resolve(cli.config.as_deref(), cli.root)?;
    match cli.command {
        Command::Ls(args) => cmd_ls(&config, args, &cli.format),
        Command::Root(args) => cmd_root(&config, args, &cli.format),
    }
}

fn cmd_ls(config: &CliConfig, args: LsArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let location = Location::infer(&args.location)?;
    let mut select = Select::of(args.entity_type);
    select.head = args.head;

    let mut count = 0usize;
    let mut print = |entity: EntityRef| -> ocfl_resolv::Result<()> {
        count += 1;
        let line = render(&entity, format).map_err(ResolvError::callback)?;
        println!("{line}");
        Ok(())
    };

    match &config.root {
        Some(root) => {
            let resolver = Resolver::init(Config {
                root: root.clone(),
                drivers: vec![Arc::new(FileDriver::with_root(root))],
            })
            .with_context(|| format!("opening storage root {}", root.display()))?;
            resolver.walk(select, &location, &mut print)?;
        }
        None => FileDriver::new().walk(select, &location, &mut print)?,
    }

    tracing::debug!(count, "listing complete");
    Ok(())
}

fn cmd_root(config: &CliConfig, args: RootArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let path: PathBuf = args
        .path
        .or_else(|| config.root.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let entity = FileDriver::new().resolve(&Location::Physical(path))?;
    let root = entity
        .ancestor(EntityType::Root)
        .context("resolved entity has no storage root")?;
    println!("{}", render(root, format)?);
    Ok(())
}

fn render(entity: &EntityRef, format: &OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string(entity)?,
        OutputFormat::Text => {
            let coords = entity.coords().join("/");
            let name = if coords.is_empty() { "/".to_string() } else { coords };
            format!(
                "{:<12} {}  {}",
                entity.entity_type.to_string().cyan(),
                name.bold(),
                entity.addr.dimmed()
            )
        }
    })
}

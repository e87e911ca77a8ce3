//! Command dispatch: wires settings, snapshot store, and service

use std::io;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::TreeService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Mutation, Side};
use crate::infrastructure::{resolve_snapshot_dir, FileSnapshotStore};
use crate::render::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(None)?;
    let side = cli.side.unwrap_or(settings.default_side);

    match &cli.command {
        Some(Commands::Add { parent_id }) => _add(cli, &settings, side, *parent_id),
        Some(Commands::Set { id, name, image }) => {
            _set(cli, &settings, side, *id, name.as_deref(), image.as_deref())
        }
        Some(Commands::Remove { id }) => _remove(cli, &settings, side, *id),
        Some(Commands::List) => _list(cli, &settings, side),
        Some(Commands::Tree) => _tree(cli, &settings, side),
        Some(Commands::Config { command }) => _config(command, &settings),
        Some(Commands::Info) => _info(),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn service(cli: &Cli, settings: &Settings) -> CliResult<TreeService> {
    let override_dir = cli.data_dir.as_deref().or(settings.data_dir.as_deref());
    let dir = resolve_snapshot_dir(override_dir).map_err(crate::application::ApplicationError::from)?;
    debug!("snapshot dir: {}", dir.display());
    Ok(TreeService::new(Arc::new(FileSnapshotStore::new(dir))))
}

#[instrument(skip(cli, settings))]
fn _add(cli: &Cli, settings: &Settings, side: Side, parent_id: u64) -> CliResult<()> {
    match service(cli, settings)?.add_child(side, parent_id)? {
        Mutation::Applied { id } => {
            output::success(&format!(
                "added node {} under {} ({})",
                id, parent_id, side
            ));
        }
        Mutation::TargetNotFound { id } => {
            output::warning(&format!("no node {} in {} tree, nothing added", id, side));
        }
    }
    Ok(())
}

#[instrument(skip(cli, settings, name, image))]
fn _set(
    cli: &Cli,
    settings: &Settings,
    side: Side,
    id: u64,
    name: Option<&str>,
    image: Option<&str>,
) -> CliResult<()> {
    match service(cli, settings)?.update_node(side, id, name, image)? {
        Mutation::Applied { id } => {
            output::success(&format!("updated node {} ({})", id, side));
        }
        Mutation::TargetNotFound { id } => {
            output::warning(&format!("no node {} in {} tree, nothing updated", id, side));
        }
    }
    Ok(())
}

#[instrument(skip(cli, settings))]
fn _remove(cli: &Cli, settings: &Settings, side: Side, id: u64) -> CliResult<()> {
    match service(cli, settings)?.delete_node(side, id)? {
        Mutation::Applied { id } => {
            output::success(&format!("removed node {} and its subtree ({})", id, side));
        }
        Mutation::TargetNotFound { id } => {
            output::warning(&format!("no node {} in {} tree, nothing removed", id, side));
        }
    }
    Ok(())
}

#[instrument(skip(cli, settings))]
fn _list(cli: &Cli, settings: &Settings, side: Side) -> CliResult<()> {
    let nodes = service(cli, settings)?.list(side)?;
    output::header(&format!("{} ({} nodes)", side, nodes.len()));
    for n in nodes {
        output::info(&format!("{:>6}  {:<24}  {}", n.id, n.name, n.image));
    }
    Ok(())
}

#[instrument(skip(cli, settings))]
fn _tree(cli: &Cli, settings: &Settings, side: Side) -> CliResult<()> {
    let store = service(cli, settings)?.load(side)?;
    output::header(&side);
    output::info(&store.root().to_tree_string());
    Ok(())
}

fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::warning("no config directory available"),
            }
            Ok(())
        }
    }
}

fn _info() -> CliResult<()> {
    let cmd = Cli::command();
    if let Some(author) = cmd.get_author() {
        output::info(&format!("AUTHOR: {}", author));
    }
    if let Some(version) = cmd.get_version() {
        output::info(&format!("VERSION: {}", version));
    }
    Ok(())
}

//! Command dispatch

use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::Catalog;
use crate::application::CountdownTimer;
use crate::cli::args::{Cli, Commands, ConfigCommands, StatusArg, StatusCommands};
use crate::cli::output;
use crate::cli::render::{self, OutlineConvert};
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings, TreeConfig};
use crate::domain::status_page::rate_limited_lines;
use crate::domain::{
    present_broadcasts, present_tags, present_view, ExpansionState, Forbidden, HexColor,
    Maintenance, RateLimited, StatusPage,
};
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree {
            catalog,
            selected,
            expand,
            expand_all,
            outline,
        }) => cmd_tree(catalog, selected.as_deref(), expand, *expand_all, *outline),
        Some(Commands::Contrast { colors }) => cmd_contrast(colors),
        Some(Commands::Tags { catalog, filter }) => cmd_tags(catalog, filter.as_deref()),
        Some(Commands::Broadcasts { catalog, status }) => cmd_broadcasts(catalog, *status),
        Some(Commands::Status { command }) => cmd_status(command),
        Some(Commands::Config { command }) => cmd_config(command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Err(CliError::Usage(
            "no command given, run with --help for usage".to_string(),
        )),
    }
}

/// Directory holding the catalog and its local config; `.` for bare file names.
fn catalog_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Settings for a catalog (its directory may hold a local config) plus the loaded catalog.
fn load_catalog(path: &Path) -> CliResult<(ServiceContainer, Catalog)> {
    let settings = Settings::load(Some(catalog_dir(path)))?;
    let container = ServiceContainer::new(settings);
    let catalog = container.catalog.load(path)?;
    Ok((container, catalog))
}

#[instrument(skip(expand))]
fn cmd_tree(
    catalog: &Path,
    selected: Option<&str>,
    expand: &[String],
    expand_all: bool,
    outline: bool,
) -> CliResult<()> {
    let (container, catalog) = load_catalog(catalog)?;

    if outline {
        output::info(&catalog.categories.to_outline());
        return Ok(());
    }

    let expanded = if expand_all {
        ExpansionState::expand_all(&catalog.categories)
    } else {
        toggle_expansion(&container.settings.tree, expand)
    };
    debug!("expanded: {:?}", expanded);

    let view = present_view(&catalog.categories, selected, &expanded)?;
    for (line, is_selected) in render::tree_lines(&view) {
        if is_selected {
            output::selected(&line);
        } else {
            output::info(&line);
        }
    }
    Ok(())
}

/// Configured expansion with each `--expand` id toggled on top.
///
/// An id the config already expands is collapsed again.
fn toggle_expansion(configured: &TreeConfig, expand: &[String]) -> ExpansionState {
    expand
        .iter()
        .fold(configured.expansion_state(), |state, id| state.toggled(id))
}

#[instrument]
fn cmd_contrast(colors: &[String]) -> CliResult<()> {
    for color in colors {
        let background = HexColor::parse(color)?;
        output::swatch(background, background.contrasting_text());
    }
    Ok(())
}

#[instrument]
fn cmd_tags(catalog: &Path, filter: Option<&str>) -> CliResult<()> {
    let (_, catalog) = load_catalog(catalog)?;
    let rows = present_tags(&catalog.tags, filter)?;
    if rows.is_empty() {
        output::warning("no tags");
        return Ok(());
    }
    for row in &rows {
        output::badge(
            &row.name,
            row.background,
            row.foreground,
            &render::tag_detail(row),
        );
    }
    Ok(())
}

#[instrument]
fn cmd_broadcasts(catalog: &Path, status: Option<StatusArg>) -> CliResult<()> {
    let (container, catalog) = load_catalog(catalog)?;
    let rows = present_broadcasts(
        &catalog.broadcasts,
        status.map(Into::into),
        &container.settings.date_format,
    );
    if rows.is_empty() {
        output::warning("no broadcasts");
        return Ok(());
    }
    output::header(&render::broadcast_header());
    for row in &rows {
        output::info(&render::broadcast_line(row));
    }
    Ok(())
}

#[instrument]
fn cmd_status(command: &StatusCommands) -> CliResult<()> {
    let settings = Settings::load(None)?;
    let page = match command {
        StatusCommands::Forbidden { role, resource } => StatusPage::Forbidden(Forbidden {
            role: role.clone(),
            resource: resource.clone(),
        }),
        StatusCommands::RateLimited { retry_after, .. } => {
            StatusPage::RateLimited(RateLimited::new(*retry_after))
        }
        StatusCommands::Maintenance {
            until,
            message,
            contact,
        } => StatusPage::Maintenance(Maintenance {
            estimated_return: until.as_deref().map(parse_timestamp).transpose()?,
            message: message.clone(),
            support_contact: contact.clone().or_else(|| settings.support_contact.clone()),
        }),
    };

    let rendered = page.render(&settings.date_format);
    output::header(&render::page_heading(&rendered));
    for line in &rendered.lines {
        output::info(line);
    }

    if let StatusCommands::RateLimited {
        retry_after,
        watch: true,
    } = command
    {
        let interval = Duration::from_millis(settings.countdown_tick_ms);
        let timer = CountdownTimer::start(*retry_after, interval, |countdown| {
            if let Some(line) = rate_limited_lines(&countdown).last() {
                output::detail(line);
            }
        })?;
        if timer.wait().is_some_and(|c| c.can_retry()) {
            output::success("retry allowed");
        }
    }
    Ok(())
}

fn parse_timestamp(value: &str) -> CliResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| CliError::InvalidArgs(format!("--until {value:?}: {e}")))
}

fn cmd_config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show { dir } => {
            let settings = Settings::load(dir.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::warning("no global config directory on this platform"),
            }
            output::info(&format!(
                "local:  {}",
                local_config_path(Path::new("<catalog_dir>")).display()
            ));
        }
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

//! Command dispatch: loads the dataset and routes events through the viewer.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::Viewer;
use crate::application::UiEvent;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::presenter::{Expansion, TerminalPresenter, TreeView};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Document, Summary};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        let mut cmd = Cli::command();
        cmd.print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => config_command(cli, command),
        _ => {
            let container = ServiceContainer::new(load_settings(cli)?);
            data_command(&container, command)
        }
    }
}

/// Layered settings plus the `--base` override.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(Path::new(".")))?;
    if let Some(base) = &cli.base {
        settings.base = base.clone();
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn data_command(container: &ServiceContainer, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Cards => return cards(container),
        Commands::Completion { .. } | Commands::Config { .. } => {
            return Err(CliError::Usage("not a dataset command".into()))
        }
        _ => {}
    }

    let document = container.loader().load()?;
    if document.rejected_episodes > 0 {
        output::warning(&format!(
            "{} malformed episode record(s) skipped",
            document.rejected_episodes
        ));
    }

    match command {
        Commands::Info => info(&document),
        Commands::Tree {
            all,
            expand,
            details,
            json,
        } => tree(document, *all, expand, *details, *json),
        Commands::Episodes { search, saga, arc } => {
            episodes(document, search.as_deref(), saga.as_deref(), arc.as_deref())
        }
        Commands::Sagas => {
            let mut viewer = Viewer::new(
                document,
                TerminalPresenter {
                    show_saga_options: true,
                    ..TerminalPresenter::default()
                },
            );
            viewer.start();
            Ok(())
        }
        Commands::Arcs { saga } => arcs(document, saga.clone()),
        Commands::Select { search } => select(container, document, search.as_deref()),
        Commands::Cards | Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
    }
}

/// Thousands separators, e.g. `1,122`.
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[instrument(skip(document))]
fn info(document: &Document) -> CliResult<()> {
    let summary = Summary::from_document(document);
    output::header(&summary.series);
    output::field("Status", &summary.status);
    output::field("Episodes", &group_digits(summary.total_episodes));
    output::field("Sagas", &summary.sagas);
    output::field("Arcs", &summary.arcs);
    Ok(())
}

#[instrument(skip(document))]
fn tree(document: Document, all: bool, expand: &[String], details: bool, json: bool) -> CliResult<()> {
    if json {
        let (root, _) = crate::domain::hierarchy::build(&document);
        let text = serde_json::to_string_pretty(&root)
            .map_err(|e| InfraError::serialize("hierarchy", e))?;
        output::plain(&text);
        return Ok(());
    }

    if let Some(unknown) = expand
        .iter()
        .find(|name| !document.sagas.iter().any(|s| s.name.eq_ignore_ascii_case(name)))
    {
        return Err(CliError::InvalidArgs(format!("no saga named {unknown}")));
    }

    let expansion = if all {
        Expansion::All
    } else if !expand.is_empty() {
        Expansion::Named(expand.to_vec())
    } else {
        Expansion::Collapsed
    };
    let view = TreeView {
        expansion,
        details,
        paint: true,
    };
    let mut viewer = Viewer::new(document, TerminalPresenter::hierarchy_only(view));
    viewer.start();
    Ok(())
}

/// Without `--saga`, `--arc` takes the hierarchy path and selects the
/// owning saga too; with it, the dropdown path validates membership.
#[instrument(skip(document))]
fn episodes(
    document: Document,
    search: Option<&str>,
    saga: Option<&str>,
    arc: Option<&str>,
) -> CliResult<()> {
    let mut viewer = Viewer::new(document, TerminalPresenter::table_only());

    if let Some(term) = search {
        viewer.apply(&UiEvent::SearchChanged(term.to_string()))?;
    }
    if let Some(saga) = saga {
        if viewer.state().indices.saga_name(saga).is_none() {
            output::warning(&format!("unknown saga id: {saga}"));
        }
        viewer.apply(&UiEvent::SagaChanged(Some(saga.to_string())))?;
    }
    match (saga, arc) {
        (Some(_), Some(arc)) => {
            viewer.apply(&UiEvent::ArcChanged(Some(arc.to_string())))?;
        }
        (None, Some(arc)) => {
            if viewer.state().indices.saga_of_arc(arc).is_none() {
                output::warning(&format!("unknown arc id: {arc}; showing unfiltered by arc"));
            }
            viewer.dispatch(UiEvent::ArcNodeClicked(arc.to_string()))?;
            return Ok(());
        }
        _ => {}
    }

    viewer.render_table();
    Ok(())
}

#[instrument(skip(document))]
fn arcs(document: Document, saga: Option<String>) -> CliResult<()> {
    let mut viewer = Viewer::new(
        document,
        TerminalPresenter {
            show_arc_options: true,
            ..TerminalPresenter::default()
        },
    );
    viewer.apply(&UiEvent::SagaChanged(saga))?;
    viewer.render_arc_options();
    Ok(())
}

#[instrument(skip(container, document))]
fn select(container: &ServiceContainer, document: Document, search: Option<&str>) -> CliResult<()> {
    let mut viewer = Viewer::new(document, TerminalPresenter::table_only());
    if let Some(term) = search {
        viewer.apply(&UiEvent::SearchChanged(term.to_string()))?;
    }

    let Some(events) = container.selection().choose(viewer.state())? else {
        output::plain(&"Selection cancelled");
        return Ok(());
    };
    for event in &events {
        viewer.apply(event)?;
    }
    viewer.render_table();
    Ok(())
}

#[instrument(skip(container))]
fn cards(container: &ServiceContainer) -> CliResult<()> {
    let cards = container
        .loader()
        .load_saga_cards(&container.settings.saga_files);
    if cards.is_empty() {
        output::warning(&"no saga cards found");
        return Ok(());
    }
    for card in cards {
        output::header(&card.saga_name);
        if !card.japanese_name.is_empty() {
            output::note(&card.japanese_name);
        }
        if !card.overall_summary.is_empty() {
            output::detail(&card.overall_summary);
        }
        println!();
    }
    Ok(())
}

fn config_command(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::plain(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::field("Global", &describe_path(&path)),
                None => output::field("Global", &"(no config directory on this platform)"),
            }
            output::field("Local", &describe_path(&local_config_path(Path::new("."))));
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("no global config directory on this platform".into())
                })?
            } else {
                local_config_path(Path::new("."))
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
        }
        ConfigCommands::Template => output::plain(&Settings::template()),
    }
    Ok(())
}

fn describe_path(path: &Path) -> String {
    let state = if path.exists() { "exists" } else { "not found" };
    format!("{} ({state})", path.display())
}

//! Command line interface.
//!
//! - `replay`: run a scripted session, optionally saving and exporting it
//! - `export`: render a saved board to PNG
//! - `list`: list saved boards
//! - `shortcuts`: print the keyboard shortcuts

use crate::config::AppConfig;
use crate::export::{export_png, text_metrics};
use crate::script::{ScriptRunner, parse_script};
use crate::shortcuts::ShortcutRegistry;
use anyhow::{Context, Result, bail};
use chalkboard_core::session::Session;
use chalkboard_core::shapes::SerializableColor;
use chalkboard_core::storage::{BOARD_KEY_PREFIX, Storage};
use chalkboard_render::RenderContext;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

/// Chalkboard whiteboard CLI
#[derive(Parser, Debug)]
#[command(name = "chalkboard")]
#[command(about = "Headless whiteboard: replay sessions, export boards to PNG")]
#[command(version)]
pub struct Cli {
    /// Directory holding saved boards
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Surface width in pixels
    #[arg(long, global = true, default_value_t = 1280)]
    pub width: u32,

    /// Surface height in pixels
    #[arg(long, global = true, default_value_t = 800)]
    pub height: u32,

    /// Background color as #rrggbb
    #[arg(long, global = true, default_value = "#ffffff")]
    pub background: SerializableColor,

    /// Font used to measure and paint text (defaults to the bundled font)
    #[arg(long, global = true)]
    pub font: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSON script of user actions
    Replay {
        /// Script file
        script: PathBuf,
        /// Save the resulting board under this name
        #[arg(long)]
        save: Option<String>,
        /// Export the resulting board to this PNG file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Render a saved board to PNG
    Export {
        /// Board name
        name: String,
        /// Output file (defaults to board.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List saved boards
    List,
    /// Print keyboard shortcuts
    Shortcuts,
}

impl Cli {
    /// Configuration with command line overrides applied.
    pub fn config(&self) -> AppConfig {
        AppConfig {
            width: self.width,
            height: self.height,
            background_color: self.background,
            storage_dir: self.storage_dir.clone(),
            font_path: self.font.clone(),
            ..AppConfig::default()
        }
    }
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    match cli.command {
        Some(Commands::Replay {
            script,
            save,
            export,
        }) => replay(&config, &script, save.as_deref(), export),
        Some(Commands::Export { name, output }) => export(&config, &name, output),
        Some(Commands::List) => list(&config),
        Some(Commands::Shortcuts) => {
            ShortcutRegistry::print_all();
            Ok(())
        }
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

/// A session measuring text with the same font exports paint with.
fn new_session(config: &AppConfig) -> Result<Session> {
    let metrics = text_metrics(config).context("Failed to load font")?;
    Ok(Session::with_metrics(metrics))
}

fn replay(
    config: &AppConfig,
    script: &Path,
    save: Option<&str>,
    export: Option<PathBuf>,
) -> Result<()> {
    let json = fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let steps = parse_script(&json).context("Invalid script")?;
    let storage = config.open_storage().context("Failed to open board storage")?;

    let mut runner = ScriptRunner::new(new_session(config)?, &storage, config);
    let report = runner.run(&steps);
    log::info!(
        "Replayed {} steps: {} redraws, {} failures",
        report.steps,
        report.redraws,
        report.failures.len()
    );
    for failure in &report.failures {
        eprintln!("step {}: {}", failure.index, failure.message);
    }

    let session = runner.into_session();
    if let Some(name) = save {
        session.save(&storage, name)?;
        println!("Saved board {:?}", name);
    }
    if let Some(path) = export {
        export_png(&RenderContext::for_session(&session), config, &path)?;
        println!("Exported {}", path.display());
    }
    Ok(())
}

fn export(config: &AppConfig, name: &str, output: Option<PathBuf>) -> Result<()> {
    let storage = config.open_storage().context("Failed to open board storage")?;
    let mut session = new_session(config)?;
    session.load(&storage, name)?;

    let path = output.unwrap_or_else(|| config.export_path.clone());
    export_png(&RenderContext::for_session(&session), config, &path)?;
    println!("Exported {} ({} shapes) to {}", name, session.board().len(), path.display());
    Ok(())
}

fn list(config: &AppConfig) -> Result<()> {
    let storage = config.open_storage().context("Failed to open board storage")?;
    let names: Vec<String> = storage
        .list()?
        .into_iter()
        .filter_map(|key| key.strip_prefix(BOARD_KEY_PREFIX).map(str::to_string))
        .collect();
    if names.is_empty() {
        bail!("No saved boards");
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

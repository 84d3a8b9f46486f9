//! Chalkboard Application
//!
//! Headless application shell: configuration, keyboard shortcuts, scripted
//! session replay and PNG export, driven from the command line.

pub mod cli;
mod config;
mod export;
mod script;
mod shortcuts;

pub use config::{AppConfig, EXPORT_FILE_NAME};
pub use export::{ExportError, encode_png, export_png, raster_surface, render_png};
pub use script::{ReplayReport, ScriptRunner, ScriptStep, StepFailure, parse_script};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};

//! Scripted session replay.
//!
//! A script is a JSON array of steps, each tagged by `action`:
//!
//! ```json
//! [
//!   {"action": "tool", "tool": "rect"},
//!   {"action": "pointer", "event": {"kind": "down", "position": {"x": 10, "y": 10}}},
//!   {"action": "pointer", "event": {"kind": "move", "position": {"x": 50, "y": 50}, "buttons_held": true}},
//!   {"action": "pointer", "event": {"kind": "up", "position": {"x": 50, "y": 50}}},
//!   {"action": "save", "name": "myboard1"},
//!   {"action": "export"}
//! ]
//! ```
//!
//! Failing steps are logged and recorded; replay carries on with the next one.

use crate::config::AppConfig;
use crate::export::export_png;
use crate::shortcuts::ShortcutRegistry;
use chalkboard_core::input::{KeyEvent, PointerEvent};
use chalkboard_core::session::{Outcome, Session};
use chalkboard_core::shapes::{SerializableColor, ShapeId};
use chalkboard_core::storage::Storage;
use chalkboard_core::tools::ToolKind;
use chalkboard_render::RenderContext;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    Tool { tool: ToolKind },
    Pointer { event: PointerEvent },
    /// A key press, routed through the shortcut registry.
    Key { key: String },
    /// Answer to the pending text prompt; `null` cancels it.
    Text { text: Option<String> },
    StrokeColor { color: SerializableColor },
    StrokeWidth { width: f64 },
    EraseWidth { width: f64 },
    TextColor { color: SerializableColor },
    TextSize { size: f64 },
    /// Layer steps index the layer list, topmost shape first.
    SelectLayer { index: usize },
    ToggleLayer { index: usize },
    DeleteLayer { index: usize },
    DeleteSelected,
    Clear { confirmed: bool },
    Save { name: String },
    Load { name: String },
    Export {
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

/// Parse a script from JSON.
pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, serde_json::Error> {
    serde_json::from_str(json)
}

/// A step that could not be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    pub index: usize,
    pub message: String,
}

/// Summary of a replay run.
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub steps: usize,
    /// Steps after which the host would repaint.
    pub redraws: usize,
    pub failures: Vec<StepFailure>,
    pub exports: Vec<PathBuf>,
}

/// Drives a session from script steps.
pub struct ScriptRunner<'a> {
    session: Session,
    storage: &'a dyn Storage,
    config: &'a AppConfig,
}

impl<'a> ScriptRunner<'a> {
    pub fn new(session: Session, storage: &'a dyn Storage, config: &'a AppConfig) -> Self {
        Self {
            session,
            storage,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Apply every step in order.
    pub fn run(&mut self, steps: &[ScriptStep]) -> ReplayReport {
        let mut report = ReplayReport::default();
        for (index, step) in steps.iter().enumerate() {
            report.steps += 1;
            match self.apply(step, &mut report) {
                Ok(Outcome::Unchanged) => {}
                Ok(_) => report.redraws += 1,
                Err(message) => {
                    log::warn!("Step {} ({:?}) failed: {}", index, step, message);
                    report.failures.push(StepFailure { index, message });
                }
            }
        }
        report
    }

    fn layer_id(&self, index: usize) -> Result<ShapeId, String> {
        self.session
            .layers()
            .get(index)
            .map(|layer| layer.id)
            .ok_or_else(|| format!("no layer at index {}", index))
    }

    fn apply(&mut self, step: &ScriptStep, report: &mut ReplayReport) -> Result<Outcome, String> {
        let session = &mut self.session;
        let outcome = match step {
            ScriptStep::Tool { tool } => session.set_tool(*tool),
            ScriptStep::Pointer { event } => session.handle_pointer(event.clone()),
            ScriptStep::Key { key } => {
                ShortcutRegistry::dispatch(session, &KeyEvent::Pressed(key.clone()))
            }
            ScriptStep::Text { text } => {
                session.submit_text(text.clone()).map_err(|e| e.to_string())?;
                Outcome::Redraw
            }
            ScriptStep::StrokeColor { color } => {
                session.set_stroke_color(*color);
                Outcome::Unchanged
            }
            ScriptStep::StrokeWidth { width } => {
                session.set_stroke_width(*width);
                Outcome::Unchanged
            }
            ScriptStep::EraseWidth { width } => {
                session.set_erase_width(*width);
                Outcome::Unchanged
            }
            ScriptStep::TextColor { color } => {
                session.set_text_color(*color);
                Outcome::Unchanged
            }
            ScriptStep::TextSize { size } => {
                session.set_text_size(*size);
                Outcome::Unchanged
            }
            ScriptStep::SelectLayer { index } => {
                let id = self.layer_id(*index)?;
                self.session.select(id)
            }
            ScriptStep::ToggleLayer { index } => {
                let id = self.layer_id(*index)?;
                self.session.toggle_visibility(id)
            }
            ScriptStep::DeleteLayer { index } => {
                let id = self.layer_id(*index)?;
                self.session.remove_shape(id)
            }
            ScriptStep::DeleteSelected => session.delete_selected(),
            ScriptStep::Clear { confirmed } => session.clear_board(*confirmed),
            ScriptStep::Save { name } => {
                session.save(self.storage, name).map_err(|e| e.to_string())?;
                Outcome::Unchanged
            }
            ScriptStep::Load { name } => {
                session.load(self.storage, name).map_err(|e| e.to_string())?;
                Outcome::Redraw
            }
            ScriptStep::Export { path } => {
                let path = path.clone().unwrap_or_else(|| self.config.export_path.clone());
                let ctx = RenderContext::for_session(&self.session);
                export_png(&ctx, self.config, &path).map_err(|e| e.to_string())?;
                report.exports.push(path);
                Outcome::Unchanged
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chalkboard_core::shapes::Shape;
    use chalkboard_core::storage::MemoryStorage;
    use tempfile::tempdir;

    const RECT_SCRIPT: &str = r##"[
        {"action": "tool", "tool": "rect"},
        {"action": "stroke_color", "color": "#ff0000"},
        {"action": "pointer", "event": {"kind": "down", "position": {"x": 10, "y": 10}}},
        {"action": "pointer", "event": {"kind": "move", "position": {"x": 50, "y": 50}, "buttons_held": true}},
        {"action": "pointer", "event": {"kind": "up", "position": {"x": 50, "y": 50}}}
    ]"##;

    fn run(json: &str, storage: &dyn Storage, config: &AppConfig) -> (Session, ReplayReport) {
        let steps = parse_script(json).unwrap();
        let mut runner = ScriptRunner::new(Session::new(), storage, config);
        let report = runner.run(&steps);
        (runner.into_session(), report)
    }

    #[test]
    fn test_replay_creates_rect() {
        let storage = MemoryStorage::new();
        let config = AppConfig::default();
        let (session, report) = run(RECT_SCRIPT, &storage, &config);

        assert_eq!(report.steps, 5);
        assert!(report.failures.is_empty());
        match session.board().shapes_ordered().next().unwrap() {
            Shape::Rectangle(r) => {
                assert_eq!(r.style.stroke_color, SerializableColor::rgb(255, 0, 0));
                assert_eq!(r.end.x, 50.0);
            }
            other => panic!("expected rect, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(parse_script(r#"[{"action": "undo"}]"#).is_err());
        assert!(parse_script(r#"[{"action": "tool", "tool": "lasso"}]"#).is_err());
    }

    #[test]
    fn test_text_steps() {
        let storage = MemoryStorage::new();
        let config = AppConfig::default();
        let script = r#"[
            {"action": "tool", "tool": "text"},
            {"action": "pointer", "event": {"kind": "down", "position": {"x": 5, "y": 30}}},
            {"action": "text", "text": null},
            {"action": "pointer", "event": {"kind": "down", "position": {"x": 5, "y": 30}}},
            {"action": "text", "text": "hello world, long"}
        ]"#;
        let (session, report) = run(script, &storage, &config);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 2);
        assert_eq!(session.layers()[0].label, "text: hello worl...");
    }

    #[test]
    fn test_layer_steps_and_delete_key() {
        let storage = MemoryStorage::new();
        let config = AppConfig::default();
        let mut steps = parse_script(RECT_SCRIPT).unwrap();
        steps.extend(
            parse_script(
                r#"[
                {"action": "select_layer", "index": 0},
                {"action": "key", "key": "Backspace"},
                {"action": "select_layer", "index": 0}
            ]"#,
            )
            .unwrap(),
        );
        let mut runner = ScriptRunner::new(Session::new(), &storage, &config);
        let report = runner.run(&steps);

        assert!(runner.session().board().is_empty());
        assert_eq!(runner.session().selection(), None);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 7);
    }

    #[test]
    fn test_save_load_and_missing_board() {
        let storage = MemoryStorage::new();
        let config = AppConfig::default();
        let mut steps = parse_script(RECT_SCRIPT).unwrap();
        steps.extend(
            parse_script(
                r#"[
                {"action": "save", "name": "b1"},
                {"action": "clear", "confirmed": false},
                {"action": "clear", "confirmed": true},
                {"action": "load", "name": "missing"},
                {"action": "load", "name": "b1"}
            ]"#,
            )
            .unwrap(),
        );
        let mut runner = ScriptRunner::new(Session::new(), &storage, &config);
        let report = runner.run(&steps);

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].message.contains("missing"));
        assert_eq!(runner.session().board().len(), 1);
    }

    #[test]
    fn test_export_step() {
        let dir = tempdir().unwrap();
        let storage = MemoryStorage::new();
        let config = AppConfig {
            width: 64,
            height: 64,
            export_path: dir.path().join("board.png"),
            ..AppConfig::default()
        };
        let mut steps = parse_script(RECT_SCRIPT).unwrap();
        steps.push(ScriptStep::Export { path: None });
        let (_, report) = run_steps(&steps, &storage, &config);

        assert_eq!(report.exports, vec![dir.path().join("board.png")]);
        assert!(dir.path().join("board.png").exists());
    }

    fn run_steps(
        steps: &[ScriptStep],
        storage: &dyn Storage,
        config: &AppConfig,
    ) -> (Session, ReplayReport) {
        let mut runner = ScriptRunner::new(Session::new(), storage, config);
        let report = runner.run(steps);
        (runner.into_session(), report)
    }
}

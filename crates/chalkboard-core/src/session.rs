//! Interaction session: the board, the selection and the pointer state machine.
//!
//! A `Session` is the single owner of all mutable whiteboard state. Hosts feed
//! it pointer and keyboard events, toolbar changes and text-prompt answers, and
//! repaint whenever a handler returns [`Outcome::Redraw`].

use crate::board::{Board, LayerEntry};
use crate::error::{BoardError, BoardResult};
use crate::hit_test::hit_test_id;
use crate::input::{KeyEvent, PointerEvent};
use crate::shapes::{ApproxTextMetrics, SerializableColor, ShapeId, TextMetrics};
use crate::storage::{board_key, Storage};
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Point, Vec2};

/// A shape being repositioned with the move tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub shape_id: ShapeId,
    /// Pointer position minus the shape's anchor at drag start.
    pub offset: Vec2,
}

/// Where the pointer state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A new shape is being formed by an active drag.
    Creating { shape_id: ShapeId },
    /// An existing shape follows the pointer.
    Dragging(DragState),
    /// Waiting for the host to answer a text prompt for a label at `position`.
    AwaitingTextInput { position: Point },
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Nothing visible changed.
    Unchanged,
    /// Board or selection changed; repaint.
    Redraw,
    /// Ask the user for a text label, then call [`Session::submit_text`].
    TextInputRequested(Point),
}

/// One whiteboard editing session.
pub struct Session {
    board: Board,
    selection: Option<ShapeId>,
    tools: ToolManager,
    state: InteractionState,
    metrics: Box<dyn TextMetrics>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("board", &self.board)
            .field("selection", &self.selection)
            .field("tools", &self.tools)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session with an empty board and approximate text metrics.
    pub fn new() -> Self {
        Self::with_metrics(Box::new(ApproxTextMetrics))
    }

    /// Create a session that measures text with `metrics`.
    ///
    /// Use the same measurement as the surface that paints the board so text
    /// hit boxes match what is on screen.
    pub fn with_metrics(metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            board: Board::new(),
            selection: None,
            tools: ToolManager::new(),
            state: InteractionState::Idle,
            metrics,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    /// Layer list entries, topmost first, with the selection marked.
    pub fn layers(&self) -> Vec<LayerEntry> {
        self.board.layers(self.selection)
    }

    // --- Pointer handling ---

    /// Dispatch a pointer event to the matching handler.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Outcome {
        match event {
            PointerEvent::Down { position, .. } => self.pointer_down(position),
            PointerEvent::Move {
                position,
                buttons_held,
            } => self.pointer_move(position, buttons_held),
            PointerEvent::Up { position, .. } => self.pointer_up(position),
        }
    }

    pub fn pointer_down(&mut self, point: Point) -> Outcome {
        if let InteractionState::AwaitingTextInput { .. } = self.state {
            log::debug!("Ignoring pointer down while a text prompt is open");
            return Outcome::Unchanged;
        }
        // A missed pointer-up must not leave a stale interaction behind.
        self.finish_interaction();

        let tool = self.tools.current_tool;
        match tool {
            ToolKind::Draw
            | ToolKind::Erase
            | ToolKind::Rect
            | ToolKind::Circle
            | ToolKind::Arrow => {
                let Some(shape) = self.tools.begin_shape(point) else {
                    return Outcome::Unchanged;
                };
                let shape_id = shape.id();
                if !self.board.add_shape(shape) {
                    return Outcome::Unchanged;
                }
                self.state = InteractionState::Creating { shape_id };
                log::debug!("Creating {} {}", tool, shape_id);
                Outcome::Redraw
            }
            ToolKind::Text => {
                self.state = InteractionState::AwaitingTextInput { position: point };
                Outcome::TextInputRequested(point)
            }
            ToolKind::Move => match self.hit(point) {
                Some(shape_id) => {
                    self.selection = Some(shape_id);
                    if let Some(shape) = self.board.get_shape(shape_id) {
                        if shape.is_draggable() {
                            let offset = point - shape.anchor();
                            self.state = InteractionState::Dragging(DragState { shape_id, offset });
                            log::debug!("Dragging {}", shape_id);
                        }
                    }
                    Outcome::Redraw
                }
                None => self.clear_selection(),
            },
            ToolKind::Select => match self.hit(point) {
                Some(shape_id) => self.select(shape_id),
                None => self.clear_selection(),
            },
        }
    }

    /// Handle pointer movement. `buttons_held` reports whether any button is
    /// down during the move.
    pub fn pointer_move(&mut self, point: Point, buttons_held: bool) -> Outcome {
        match self.state {
            InteractionState::Creating { shape_id } => {
                let Some(shape) = self.board.get_shape_mut(shape_id) else {
                    self.state = InteractionState::Idle;
                    return Outcome::Unchanged;
                };
                if let Some(path) = shape.as_freehand_mut() {
                    path.add_point(point);
                } else {
                    shape.set_end(point);
                }
                Outcome::Redraw
            }
            InteractionState::Dragging(drag) if buttons_held => {
                let Some(shape) = self.board.get_shape_mut(drag.shape_id) else {
                    self.state = InteractionState::Idle;
                    return Outcome::Unchanged;
                };
                shape.move_anchor_to(point - drag.offset);
                Outcome::Redraw
            }
            _ => Outcome::Unchanged,
        }
    }

    pub fn pointer_up(&mut self, _point: Point) -> Outcome {
        match self.state {
            InteractionState::Creating { .. } | InteractionState::Dragging(_) => {
                self.finish_interaction();
                Outcome::Redraw
            }
            _ => Outcome::Unchanged,
        }
    }

    /// Answer a pending text prompt.
    ///
    /// `None` means the prompt was cancelled. Cancelled or blank input creates
    /// nothing and returns [`BoardError::EmptyInput`]; either way the session
    /// returns to idle.
    pub fn submit_text(&mut self, text: Option<String>) -> BoardResult<ShapeId> {
        let InteractionState::AwaitingTextInput { position } = self.state else {
            log::warn!("Text submitted without a pending prompt");
            return Err(BoardError::EmptyInput);
        };
        self.state = InteractionState::Idle;

        let content = match text {
            Some(content) if !content.trim().is_empty() => content,
            _ => {
                log::debug!("Text prompt cancelled or blank");
                return Err(BoardError::EmptyInput);
            }
        };

        let shape = self.tools.text_shape(position, content);
        let id = shape.id();
        self.board.add_shape(shape);
        log::debug!("Created text {}", id);
        Ok(id)
    }

    fn hit(&self, point: Point) -> Option<ShapeId> {
        hit_test_id(&self.board, point, self.metrics.as_ref())
    }

    fn finish_interaction(&mut self) {
        if self.state != InteractionState::Idle {
            log::debug!("Finished {:?}", self.state);
        }
        self.state = InteractionState::Idle;
    }

    // --- Toolbar ---

    /// Switch tools. Ends any interaction in progress and clears the selection.
    pub fn set_tool(&mut self, tool: ToolKind) -> Outcome {
        self.finish_interaction();
        self.tools.set_tool(tool);
        log::debug!("Tool set to {}", tool);
        self.clear_selection();
        // The toolbar itself changed, so hosts repaint regardless.
        Outcome::Redraw
    }

    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.tools.set_stroke_color(color);
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.tools.set_stroke_width(width);
    }

    pub fn set_erase_width(&mut self, width: f64) {
        self.tools.set_erase_width(width);
    }

    pub fn set_text_color(&mut self, color: SerializableColor) {
        self.tools.set_text_color(color);
    }

    pub fn set_text_size(&mut self, size: f64) {
        self.tools.set_text_size(size);
    }

    // --- Selection and layers ---

    /// Select a shape by id. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: ShapeId) -> Outcome {
        if !self.board.contains(id) {
            log::warn!("Cannot select unknown shape {}", id);
            return Outcome::Unchanged;
        }
        if self.selection == Some(id) {
            return Outcome::Unchanged;
        }
        self.selection = Some(id);
        Outcome::Redraw
    }

    pub fn clear_selection(&mut self) -> Outcome {
        match self.selection.take() {
            Some(_) => Outcome::Redraw,
            None => Outcome::Unchanged,
        }
    }

    /// Show or hide a shape.
    pub fn toggle_visibility(&mut self, id: ShapeId) -> Outcome {
        match self.board.toggle_visibility(id) {
            Some(_) => Outcome::Redraw,
            None => Outcome::Unchanged,
        }
    }

    /// Remove a shape, dropping any selection or drag that refers to it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Outcome {
        if self.board.remove_shape(id).is_none() {
            return Outcome::Unchanged;
        }
        if self.selection == Some(id) {
            self.selection = None;
        }
        match self.state {
            InteractionState::Creating { shape_id }
            | InteractionState::Dragging(DragState { shape_id, .. })
                if shape_id == id =>
            {
                self.state = InteractionState::Idle;
            }
            _ => {}
        }
        log::debug!("Removed shape {}", id);
        Outcome::Redraw
    }

    /// Remove the selected shape, if any.
    pub fn delete_selected(&mut self) -> Outcome {
        match self.selection {
            Some(id) => self.remove_shape(id),
            None => Outcome::Unchanged,
        }
    }

    /// Handle a key event. Delete and Backspace remove the selection.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Outcome {
        if event.is_delete() {
            self.delete_selected()
        } else {
            Outcome::Unchanged
        }
    }

    /// Remove every shape. Does nothing unless the user `confirmed`.
    pub fn clear_board(&mut self, confirmed: bool) -> Outcome {
        if !confirmed {
            return Outcome::Unchanged;
        }
        self.board.clear();
        self.selection = None;
        self.finish_interaction();
        log::info!("Board cleared");
        Outcome::Redraw
    }

    /// Replace the whole board, resetting selection and interaction state.
    pub fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.selection = None;
        self.finish_interaction();
    }

    // --- Persistence ---

    /// Save the board under `name`.
    pub fn save(&self, storage: &dyn Storage, name: &str) -> BoardResult<()> {
        let payload = self.board.to_json()?;
        storage.save(&board_key(name), &payload)?;
        log::info!("Saved board {:?} ({} shapes)", name, self.board.len());
        Ok(())
    }

    /// Load the board saved under `name`.
    ///
    /// On any failure the current board is left untouched.
    pub fn load(&mut self, storage: &dyn Storage, name: &str) -> BoardResult<()> {
        let payload = storage
            .load(&board_key(name))?
            .ok_or_else(|| BoardError::MissingBoard(name.to_string()))?;
        let board = Board::from_json(&payload).inspect_err(|e| {
            log::error!("Failed to load board {:?}: {}", name, e);
        })?;
        log::info!("Loaded board {:?} ({} shapes)", name, board.len());
        self.replace_board(board);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;
    use crate::shapes::Shape;
    use crate::storage::MemoryStorage;

    fn drag(session: &mut Session, from: Point, to: Point) -> ShapeId {
        session.pointer_down(from);
        session.pointer_move(to, true);
        session.pointer_up(to);
        session.board().shapes_ordered().last().unwrap().id()
    }

    fn rect_session() -> (Session, ShapeId) {
        let mut session = Session::new();
        session.set_tool(ToolKind::Rect);
        let id = drag(&mut session, Point::new(10.0, 10.0), Point::new(50.0, 50.0));
        (session, id)
    }

    #[test]
    fn test_freehand_creation() {
        let mut session = Session::new();
        assert_eq!(session.pointer_down(Point::new(0.0, 0.0)), Outcome::Redraw);
        assert!(matches!(session.state(), InteractionState::Creating { .. }));
        session.pointer_move(Point::new(5.0, 5.0), true);
        session.pointer_move(Point::new(10.0, 5.0), true);
        assert_eq!(session.pointer_up(Point::new(10.0, 5.0)), Outcome::Redraw);
        assert_eq!(session.state(), InteractionState::Idle);

        let shape = session.board().shapes_ordered().next().unwrap();
        let path = shape.as_freehand().unwrap();
        assert!(matches!(shape, Shape::Stroke(_)));
        assert_eq!(path.len(), 3);
        assert_eq!(path.stroke_width, 4.0);
    }

    #[test]
    fn test_erase_uses_erase_settings() {
        let mut session = Session::new();
        session.set_tool(ToolKind::Erase);
        session.set_erase_width(12.0);
        drag(&mut session, Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        match session.board().shapes_ordered().next().unwrap() {
            Shape::Erase(path) => {
                assert_eq!(path.stroke_width, 12.0);
                assert_eq!(path.color, SerializableColor::white());
            }
            other => panic!("expected erase, got {:?}", other),
        }
    }

    #[test]
    fn test_rect_creation_updates_second_corner() {
        let (session, id) = rect_session();
        match session.board().get_shape(id).unwrap() {
            Shape::Rectangle(r) => {
                assert_eq!(r.start, Point::new(10.0, 10.0));
                assert_eq!(r.end, Point::new(50.0, 50.0));
            }
            other => panic!("expected rect, got {:?}", other),
        }
    }

    #[test]
    fn test_text_prompt_flow() {
        let mut session = Session::new();
        session.set_tool(ToolKind::Text);
        let at = Point::new(20.0, 40.0);
        assert_eq!(session.pointer_down(at), Outcome::TextInputRequested(at));

        // Pointer input is ignored while the prompt is open.
        assert_eq!(session.pointer_down(Point::new(0.0, 0.0)), Outcome::Unchanged);
        assert_eq!(session.state(), InteractionState::AwaitingTextInput { position: at });

        let id = session.submit_text(Some("hello".to_string())).unwrap();
        assert_eq!(session.state(), InteractionState::Idle);
        match session.board().get_shape(id).unwrap() {
            Shape::Text(text) => {
                assert_eq!(text.content, "hello");
                assert_eq!(text.position, at);
                assert_eq!(text.font_size, 22.0);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_text_prompt_cancelled_or_blank() {
        let mut session = Session::new();
        session.set_tool(ToolKind::Text);

        session.pointer_down(Point::new(1.0, 1.0));
        assert!(matches!(session.submit_text(None), Err(BoardError::EmptyInput)));
        assert_eq!(session.state(), InteractionState::Idle);

        session.pointer_down(Point::new(1.0, 1.0));
        assert!(matches!(
            session.submit_text(Some("   ".to_string())),
            Err(BoardError::EmptyInput)
        ));
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_submit_text_without_prompt() {
        let mut session = Session::new();
        assert!(session.submit_text(Some("x".to_string())).is_err());
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_move_drags_rect_first_corner() {
        let (mut session, id) = rect_session();
        session.set_tool(ToolKind::Move);

        session.pointer_down(Point::new(30.0, 30.0));
        assert_eq!(session.selection(), Some(id));
        assert!(matches!(session.state(), InteractionState::Dragging(_)));

        // Moving without a button held does nothing.
        assert_eq!(session.pointer_move(Point::new(90.0, 90.0), false), Outcome::Unchanged);

        session.pointer_move(Point::new(40.0, 35.0), true);
        session.pointer_up(Point::new(40.0, 35.0));
        assert_eq!(session.state(), InteractionState::Idle);

        match session.board().get_shape(id).unwrap() {
            Shape::Rectangle(r) => {
                assert_eq!(r.start, Point::new(20.0, 15.0));
                assert_eq!(r.end, Point::new(50.0, 50.0));
            }
            other => panic!("expected rect, got {:?}", other),
        }
        assert_eq!(session.selection(), Some(id));
    }

    #[test]
    fn test_move_drags_arrow_both_endpoints() {
        let mut session = Session::new();
        session.set_tool(ToolKind::Arrow);
        let id = drag(&mut session, Point::new(0.0, 0.0), Point::new(100.0, 0.0));

        session.set_tool(ToolKind::Move);
        session.pointer_down(Point::new(50.0, 2.0));
        session.pointer_move(Point::new(60.0, 12.0), true);
        session.pointer_up(Point::new(60.0, 12.0));

        match session.board().get_shape(id).unwrap() {
            Shape::Arrow(a) => {
                assert_eq!(a.start, Point::new(10.0, 10.0));
                assert_eq!(a.end, Point::new(110.0, 10.0));
            }
            other => panic!("expected arrow, got {:?}", other),
        }
    }

    #[test]
    fn test_move_miss_clears_selection() {
        let (mut session, id) = rect_session();
        session.set_tool(ToolKind::Move);
        session.select(id);
        assert_eq!(session.pointer_down(Point::new(200.0, 200.0)), Outcome::Redraw);
        assert_eq!(session.selection(), None);
        assert_eq!(session.state(), InteractionState::Idle);
    }

    #[test]
    fn test_select_tool() {
        let (mut session, id) = rect_session();
        session.set_tool(ToolKind::Select);
        session.pointer_down(Point::new(30.0, 30.0));
        assert_eq!(session.selection(), Some(id));
        assert_eq!(session.state(), InteractionState::Idle);
        // Select never drags.
        assert_eq!(session.pointer_move(Point::new(80.0, 80.0), true), Outcome::Unchanged);

        session.pointer_down(Point::new(5.0, 5.0));
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn test_set_tool_resets_state_and_selection() {
        let (mut session, id) = rect_session();
        session.select(id);
        session.set_tool(ToolKind::Draw);
        session.pointer_down(Point::new(0.0, 0.0));
        assert!(matches!(session.state(), InteractionState::Creating { .. }));

        session.set_tool(ToolKind::Select);
        assert_eq!(session.state(), InteractionState::Idle);
        assert_eq!(session.selection(), None);
        assert_eq!(session.current_tool(), ToolKind::Select);
    }

    #[test]
    fn test_select_unknown_id() {
        let mut session = Session::new();
        assert_eq!(session.select(uuid::Uuid::new_v4()), Outcome::Unchanged);
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn test_delete_key_clears_selection() {
        let (mut session, id) = rect_session();
        session.select(id);

        let outcome = session.handle_key(&KeyEvent::Pressed("Delete".to_string()));
        assert_eq!(outcome, Outcome::Redraw);
        assert!(!session.board().contains(id));
        assert_eq!(session.selection(), None);

        // Nothing selected: Backspace is a no-op.
        let outcome = session.handle_key(&KeyEvent::Pressed("Backspace".to_string()));
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_other_keys_ignored() {
        let (mut session, id) = rect_session();
        session.select(id);
        assert_eq!(
            session.handle_key(&KeyEvent::Pressed("a".to_string())),
            Outcome::Unchanged
        );
        assert!(session.board().contains(id));
    }

    #[test]
    fn test_remove_dragged_shape_drops_drag() {
        let (mut session, id) = rect_session();
        session.set_tool(ToolKind::Move);
        session.pointer_down(Point::new(30.0, 30.0));
        session.remove_shape(id);
        assert_eq!(session.state(), InteractionState::Idle);
        assert_eq!(session.selection(), None);
        assert_eq!(session.pointer_move(Point::new(1.0, 1.0), true), Outcome::Unchanged);
    }

    #[test]
    fn test_remove_other_shape_keeps_selection() {
        let (mut session, first) = rect_session();
        let second = drag(&mut session, Point::new(100.0, 100.0), Point::new(120.0, 120.0));
        session.select(first);
        session.remove_shape(second);
        assert_eq!(session.selection(), Some(first));
    }

    #[test]
    fn test_toggle_visibility_hides_from_hit_test() {
        let (mut session, id) = rect_session();
        session.set_tool(ToolKind::Select);
        assert_eq!(session.toggle_visibility(id), Outcome::Redraw);
        session.pointer_down(Point::new(30.0, 30.0));
        assert_eq!(session.selection(), None);
        assert!(!session.layers()[0].visible);
    }

    #[test]
    fn test_clear_board_requires_confirmation() {
        let (mut session, _) = rect_session();
        assert_eq!(session.clear_board(false), Outcome::Unchanged);
        assert_eq!(session.board().len(), 1);
        assert_eq!(session.clear_board(true), Outcome::Redraw);
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_handle_pointer_dispatch() {
        let mut session = Session::new();
        session.set_tool(ToolKind::Circle);
        session.handle_pointer(PointerEvent::Down {
            position: Point::new(0.0, 0.0),
            button: MouseButton::Left,
        });
        session.handle_pointer(PointerEvent::Move {
            position: Point::new(3.0, 4.0),
            buttons_held: true,
        });
        session.handle_pointer(PointerEvent::Up {
            position: Point::new(3.0, 4.0),
            button: MouseButton::Left,
        });
        match session.board().shapes_ordered().next().unwrap() {
            Shape::Circle(c) => assert_eq!(c.end, Point::new(3.0, 4.0)),
            other => panic!("expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let storage = MemoryStorage::new();
        let (session, _) = rect_session();
        session.save(&storage, "myboard1").unwrap();
        assert!(storage.exists("board_myboard1").unwrap());

        let mut other = Session::new();
        other.load(&storage, "myboard1").unwrap();
        assert_eq!(other.board(), session.board());
    }

    #[test]
    fn test_load_missing_board() {
        let storage = MemoryStorage::new();
        let (mut session, id) = rect_session();
        let err = session.load(&storage, "nope").unwrap_err();
        assert!(matches!(err, BoardError::MissingBoard(name) if name == "nope"));
        assert!(session.board().contains(id));
    }

    #[test]
    fn test_load_corrupted_board_keeps_current() {
        let storage = MemoryStorage::new();
        storage.save("board_bad", "{not json").unwrap();
        let (mut session, id) = rect_session();
        session.select(id);
        let before = session.board().clone();

        let err = session.load(&storage, "bad").unwrap_err();
        assert!(matches!(err, BoardError::Deserialization(_)));
        assert_eq!(session.board(), &before);
        assert_eq!(session.selection(), Some(id));
    }

    #[test]
    fn test_load_clears_selection() {
        let storage = MemoryStorage::new();
        let (mut session, id) = rect_session();
        session.save(&storage, "b").unwrap();
        session.select(id);
        session.load(&storage, "b").unwrap();
        assert_eq!(session.selection(), None);
    }
}

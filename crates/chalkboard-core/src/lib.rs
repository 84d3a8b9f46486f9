//! Chalkboard Core Library
//!
//! Platform-agnostic core data structures and logic for the Chalkboard whiteboard.

pub mod board;
pub mod error;
pub mod geometry;
pub mod input;
pub mod session;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use board::{Board, LayerEntry};
pub use error::{BoardError, BoardResult};
pub use hit_test::{hit_test, hit_test_id};
pub use input::{KeyEvent, MouseButton, PointerEvent};
pub use session::{DragState, InteractionState, Outcome, Session};
pub use shapes::{ApproxTextMetrics, SerializableColor, Shape, ShapeId, ShapeStyle, TextMetrics};
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
pub use tools::{ToolKind, ToolManager, ToolSettings};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

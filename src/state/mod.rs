mod editor_state;
mod persistence;

pub use editor_state::{EditorState, Gesture, PenSettings, ShapeKind, ToolKind};
pub use persistence::{EditorSettings, PersistenceError, PersistenceResult, SettingsStore};

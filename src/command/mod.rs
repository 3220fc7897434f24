mod commands;
mod history;

use thiserror::Error;

use crate::document::Document;
use crate::id_generator::ItemId;
use crate::state::EditorState;

pub use commands::Command;
pub use history::CommandHistory;

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("item {0} is not in the document")]
    ElementNotFound(ItemId),

    #[error("item {0} is already in the document")]
    DuplicateElement(ItemId),

    /// The command does not hold the item it needs, e.g. it was applied twice.
    #[error("command is not in a state that can be applied")]
    InvalidState,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

/// Everything a command may touch while it runs.
pub struct CommandContext<'a> {
    pub document: &'a mut Document,
    pub state: &'a mut EditorState,
}

impl<'a> CommandContext<'a> {
    pub fn new(document: &'a mut Document, state: &'a mut EditorState) -> Self {
        Self { document, state }
    }
}

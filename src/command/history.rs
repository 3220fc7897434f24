use log::debug;

use super::{Command, CommandContext, CommandError, CommandResult};

/// Linear undo/redo over item creation and deletion.
///
/// Anything else the editor changes (geometry, pixels, colors) is applied in
/// place and never enters the history.
#[derive(Debug, Default)]
pub struct CommandHistory {
    done: Vec<Command>,
    undone: Vec<Command>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `command` and record it. A failed command leaves no trace.
    pub fn execute(&mut self, mut command: Command, ctx: &mut CommandContext) -> CommandResult {
        command.execute(ctx)?;
        debug!("history: {} {}", command.name(), command.item());
        self.done.push(command);
        self.undone.clear();
        Ok(())
    }

    pub fn undo(&mut self, ctx: &mut CommandContext) -> CommandResult {
        let mut command = self.done.pop().ok_or(CommandError::NothingToUndo)?;
        match command.undo(ctx) {
            Ok(()) => {
                self.undone.push(command);
                Ok(())
            }
            Err(err) => {
                // keep it where it was so the stacks stay consistent
                self.done.push(command);
                Err(err)
            }
        }
    }

    pub fn redo(&mut self, ctx: &mut CommandContext) -> CommandResult {
        let mut command = self.undone.pop().ok_or(CommandError::NothingToRedo)?;
        match command.execute(ctx) {
            Ok(()) => {
                self.done.push(command);
                Ok(())
            }
            Err(err) => {
                self.undone.push(command);
                Err(err)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.done.len()
    }

    pub fn redo_len(&self) -> usize {
        self.undone.len()
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }
}

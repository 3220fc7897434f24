use log::info;

use super::{CommandContext, CommandError, CommandResult};
use crate::element::Element;
use crate::id_generator::ItemId;

/// Reversible document mutations.
///
/// A command owns the item while it is *not* in the document, so undo and
/// redo move the same item back and forth without copying it.
#[derive(Debug)]
pub enum Command {
    /// Insert an item and select it.
    AddElement {
        id: ItemId,
        element: Option<Element>,
        /// Slot the item occupied when it was last removed by undo.
        slot: Option<usize>,
    },

    /// Remove an item, remembering its slot so undo restores the stacking.
    RemoveElement {
        id: ItemId,
        element: Option<Element>,
        slot: Option<usize>,
    },
}

impl Command {
    pub fn add_element(element: Element) -> Self {
        Self::AddElement {
            id: element.id(),
            element: Some(element),
            slot: None,
        }
    }

    pub fn remove_element(id: ItemId) -> Self {
        Self::RemoveElement {
            id,
            element: None,
            slot: None,
        }
    }

    pub fn item(&self) -> ItemId {
        match self {
            Self::AddElement { id, .. } | Self::RemoveElement { id, .. } => *id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AddElement { .. } => "add item",
            Self::RemoveElement { .. } => "remove item",
        }
    }

    pub fn execute(&mut self, ctx: &mut CommandContext) -> CommandResult {
        match self {
            Self::AddElement { id, element, slot } => {
                insert(ctx, *id, element, *slot)?;
                ctx.state.select(ctx.document, *id);
                info!("Added item {}", id);
                Ok(())
            }
            Self::RemoveElement { id, element, slot } => {
                let (index, removed) = take(ctx, *id)?;
                *slot = Some(index);
                *element = Some(removed);
                info!("Removed item {}", id);
                Ok(())
            }
        }
    }

    pub fn undo(&mut self, ctx: &mut CommandContext) -> CommandResult {
        match self {
            Self::AddElement { id, element, slot } => {
                let (index, removed) = take(ctx, *id)?;
                *slot = Some(index);
                *element = Some(removed);
                info!("Undo: removed item {}", id);
                Ok(())
            }
            Self::RemoveElement { id, element, slot } => {
                insert(ctx, *id, element, *slot)?;
                ctx.state.select(ctx.document, *id);
                info!("Undo: restored item {}", id);
                Ok(())
            }
        }
    }
}

fn insert(
    ctx: &mut CommandContext,
    id: ItemId,
    element: &mut Option<Element>,
    slot: Option<usize>,
) -> CommandResult {
    if ctx.document.contains(id) {
        return Err(CommandError::DuplicateElement(id));
    }
    let element = element.take().ok_or(CommandError::InvalidState)?;
    match slot {
        Some(index) => ctx.document.insert_at(index, element),
        None => ctx.document.add(element),
    }
    Ok(())
}

/// Remove `id`, clearing any selection or crop decoration that refers to it.
fn take(ctx: &mut CommandContext, id: ItemId) -> Result<(usize, Element), CommandError> {
    let (index, mut element) = ctx
        .document
        .remove(id)
        .ok_or(CommandError::ElementNotFound(id))?;
    element.set_selected(false);
    // a crop session on this item ends with it
    element.set_movable(true);
    ctx.state.forget_missing(ctx.document);
    Ok((index, element))
}

//! Calls the editor issues outward to its surroundings.
//!
//! Dialogs, message boxes and the (slow) foreground segmentation model live
//! outside the engine. The editor only ever talks to them through
//! [`EditorHost`], synchronously, on the interaction thread.

use std::path::{Path, PathBuf};

use egui::Color32;
use thiserror::Error;

use crate::effects::PixelBuffer;

/// Errors reported by collaborator calls.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("segmentation failed: {0}")]
    Segmentation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

pub trait EditorHost {
    /// Ask the user for a color. `None` means the dialog was cancelled.
    fn pick_color(&mut self, initial: Color32) -> Option<Color32>;

    fn pick_open_file_path(&mut self) -> Option<PathBuf>;

    fn pick_save_file_path(&mut self) -> Option<PathBuf>;

    fn show_message(&mut self, kind: MessageKind, text: &str);

    /// Raw bytes of an image file. Decoding happens in the editor.
    fn load_image_bytes(&mut self, path: &Path) -> Result<Vec<u8>, HostError> {
        std::fs::read(path).map_err(|source| HostError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Cut the foreground out of `image`. May block for a long time and
    /// cannot be cancelled.
    fn segment_foreground(&mut self, image: &PixelBuffer) -> Result<PixelBuffer, HostError>;
}

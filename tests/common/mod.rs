#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;

use egui::{Color32, Pos2, Rect, Vec2};
use scene_paint::host::{EditorHost, HostError, MessageKind};
use scene_paint::{EditorSettings, PixelBuffer, SceneEditor};

/// Host with scripted dialog answers that records what the editor asked.
#[derive(Default)]
pub struct MockHost {
    pub colors: VecDeque<Option<Color32>>,
    pub open_paths: VecDeque<Option<PathBuf>>,
    pub save_paths: VecDeque<Option<PathBuf>>,
    /// `None` makes segmentation fail.
    pub segmentation: Option<PixelBuffer>,
    pub messages: Vec<(MessageKind, String)>,
    pub color_requests: Vec<Color32>,
    pub segment_calls: usize,
}

impl MockHost {
    pub fn errors(&self) -> usize {
        self.messages
            .iter()
            .filter(|(kind, _)| *kind == MessageKind::Error)
            .count()
    }

    pub fn warnings(&self) -> usize {
        self.messages
            .iter()
            .filter(|(kind, _)| *kind == MessageKind::Warning)
            .count()
    }
}

impl EditorHost for MockHost {
    fn pick_color(&mut self, initial: Color32) -> Option<Color32> {
        self.color_requests.push(initial);
        self.colors.pop_front().flatten()
    }

    fn pick_open_file_path(&mut self) -> Option<PathBuf> {
        self.open_paths.pop_front().flatten()
    }

    fn pick_save_file_path(&mut self) -> Option<PathBuf> {
        self.save_paths.pop_front().flatten()
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        self.messages.push((kind, text.to_string()));
    }

    fn segment_foreground(&mut self, _image: &PixelBuffer) -> Result<PixelBuffer, HostError> {
        self.segment_calls += 1;
        self.segmentation
            .clone()
            .ok_or_else(|| HostError::Segmentation("model unavailable".to_string()))
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Editor with an 800x600 viewport at the origin and an identity view, so
/// screen and scene coordinates coincide.
pub fn editor() -> SceneEditor<MockHost> {
    init_logging();
    SceneEditor::new(
        MockHost::default(),
        EditorSettings::default(),
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
    )
}

/// Buffer whose pixel (x, y) is `(x, y, 7, 255)`, so every pixel says where
/// it came from.
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| image::Rgba([x as u8, y as u8, 7, 255]))
}

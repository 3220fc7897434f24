use egui::Color32;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeKind {
    Light,
    #[default]
    Dark,
}

/// Colors the engine hands out for new items and decorations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub item_fill: Color32,
    pub item_outline: Color32,
    pub handle_fill: Color32,
    pub handle_outline: Color32,
    pub preview: Color32,
    pub canvas: Color32,
    pub crop_outline: Color32,
    pub crop_shade: Color32,
}

impl Palette {
    pub fn for_theme(theme: ThemeKind) -> Self {
        match theme {
            ThemeKind::Light => Self {
                item_fill: Color32::from_rgb(0xaa, 0xff, 0xaa),
                item_outline: Color32::BLACK,
                handle_fill: Color32::WHITE,
                handle_outline: Color32::BLACK,
                preview: Color32::DARK_GRAY,
                canvas: Color32::WHITE,
                crop_outline: Color32::YELLOW,
                crop_shade: Color32::from_rgba_unmultiplied(0, 0, 0, 80),
            },
            ThemeKind::Dark => Self {
                item_fill: Color32::from_rgb(0x30, 0x60, 0x30),
                item_outline: Color32::LIGHT_GRAY,
                handle_fill: Color32::from_rgb(0x44, 0x44, 0x44),
                handle_outline: Color32::LIGHT_GRAY,
                preview: Color32::LIGHT_GRAY,
                canvas: Color32::from_rgb(0x3a, 0x3a, 0x3a),
                crop_outline: Color32::YELLOW,
                crop_shade: Color32::from_rgba_unmultiplied(0, 0, 0, 80),
            },
        }
    }
}

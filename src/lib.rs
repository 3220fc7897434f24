#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod document;
pub mod effects;
pub mod element;
pub mod error;
pub mod export;
pub mod geometry;
pub mod host;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod rasterizer;
pub mod selection;
pub mod state;
pub mod theme;
pub mod tools;
pub mod view;

pub use app::SceneEditor;
pub use command::{Command, CommandError, CommandHistory};
pub use document::Document;
pub use effects::{ImageLayers, PixelBox, PixelBuffer};
pub use element::{factory, Element, ElementKind};
pub use error::{EditorError, EditorResult};
pub use host::{EditorHost, HostError, MessageKind};
pub use id_generator::ItemId;
pub use input::{InputEvent, InputLocation};
pub use panels::{ItemProperties, PanelModel};
pub use state::{EditorSettings, EditorState, ShapeKind, ToolKind};
pub use theme::{Palette, ThemeKind};
pub use tools::Tool;
pub use view::ViewTransform;

mod common;

use common::{init_logging, MockHost};
use egui::{Color32, Pos2, Rect, Vec2};
use scene_paint::state::{PersistenceError, SettingsStore};
use scene_paint::{EditorSettings, InputEvent, SceneEditor, ThemeKind};

#[test]
fn test_missing_file_gives_defaults() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("absent.json"));
    assert_eq!(store.load().unwrap(), EditorSettings::default());
}

#[test]
fn test_saved_settings_load_back() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));

    let settings = EditorSettings {
        eraser_brush_size: 24.0,
        theme: ThemeKind::Light,
        canvas_background: Some(Color32::from_rgb(10, 20, 30)),
        brightness_range: 0.5..=1.5,
        ..Default::default()
    };
    store.save(&settings).unwrap();
    assert_eq!(store.load().unwrap(), settings);
}

#[test]
fn test_invalid_file_is_an_error() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = SettingsStore::new(&path).load();
    assert!(matches!(result, Err(PersistenceError::SerializationError(_))));
}

#[test]
fn test_settings_drive_the_editor() {
    init_logging();
    let settings = EditorSettings {
        wheel_zoom_factor: 2.0,
        brightness_range: 0.5..=1.5,
        ..Default::default()
    };
    let mut editor = SceneEditor::new(
        MockHost::default(),
        settings,
        Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 100.0)),
    );

    editor
        .handle_input(InputEvent::Wheel {
            position: Pos2::new(50.0, 50.0),
            delta: 3.0,
        })
        .unwrap();
    assert_eq!(editor.view().zoom(), 2.0);

    let id = editor
        .paste_image(common::gradient(4, 4), Pos2::ZERO)
        .unwrap();
    assert!(editor.set_brightness(0.1));
    let layers = editor.document().get(id).unwrap().image().unwrap();
    assert_eq!(layers.brightness(), 0.5);
}

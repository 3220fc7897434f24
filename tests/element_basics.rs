mod common;

use common::{editor, gradient, MockHost};
use egui::{Color32, PointerButton, Pos2, Rect, Vec2};
use scene_paint::element::{factory, EraseMode, HasFill, HasOutline, Outline, ResizeMode};
use scene_paint::{InputEvent, SceneEditor, ShapeKind, ToolKind};

fn click(editor: &mut SceneEditor<MockHost>, at: Pos2) {
    editor
        .handle_input(InputEvent::PointerDown {
            position: at,
            button: PointerButton::Primary,
        })
        .unwrap();
    editor
        .handle_input(InputEvent::PointerUp {
            position: at,
            button: PointerButton::Primary,
        })
        .unwrap();
}

fn drag(editor: &mut SceneEditor<MockHost>, from: Pos2, to: Pos2) {
    editor
        .handle_input(InputEvent::PointerDown {
            position: from,
            button: PointerButton::Primary,
        })
        .unwrap();
    editor
        .handle_input(InputEvent::PointerMove {
            position: to,
            held_buttons: vec![PointerButton::Primary],
        })
        .unwrap();
    editor
        .handle_input(InputEvent::PointerUp {
            position: to,
            button: PointerButton::Primary,
        })
        .unwrap();
}

/// A 50x50 rectangle at (100, 100), selected with the select tool.
fn selected_square(editor: &mut SceneEditor<MockHost>) -> scene_paint::ItemId {
    editor.set_tool(ToolKind::Shape(ShapeKind::Rectangle));
    drag(editor, Pos2::new(100.0, 100.0), Pos2::new(150.0, 150.0));
    editor.set_tool(ToolKind::Select);
    assert_eq!(editor.state().selected_item(), None);
    click(editor, Pos2::new(120.0, 120.0));
    editor.state().selected_item().unwrap()
}

#[test]
fn test_factory_normalizes_geometry() {
    let outline = Outline::new(Color32::BLACK, 1.0);
    let rect = factory::create_rectangle(
        Rect::from_two_pos(Pos2::new(30.0, 40.0), Pos2::new(10.0, 20.0)),
        Color32::GREEN,
        outline,
    );
    assert_eq!(rect.transform().position, Pos2::new(10.0, 20.0));
    assert_eq!(rect.local_rect(), Rect::from_min_size(Pos2::ZERO, Vec2::splat(20.0)));

    let line = factory::create_line(Pos2::new(50.0, 10.0), Pos2::new(10.0, 30.0), outline);
    assert_eq!(line.transform().position, Pos2::new(10.0, 10.0));
    assert_eq!(line.local_rect().size(), Vec2::new(40.0, 20.0));
}

#[test]
fn test_capabilities_follow_kind() {
    let outline = Outline::new(Color32::BLACK, 2.0);
    let rect = Rect::from_min_size(Pos2::ZERO, Vec2::splat(10.0));

    let ellipse = factory::create_ellipse(rect, Color32::GREEN, outline);
    assert!(ellipse.capabilities().has_fill);
    assert_eq!(ellipse.capabilities().resize, ResizeMode::Rect);
    assert_eq!(ellipse.capabilities().erase, EraseMode::Rasterize);

    let stroke = factory::create_stroke(vec![Pos2::ZERO, Pos2::new(5.0, 5.0)], outline);
    assert!(!stroke.capabilities().has_fill);
    assert!(stroke.is_pen_stroke());
    assert_eq!(stroke.kind_name(), "Pen Stroke");

    let image = factory::create_image(gradient(4, 4), Pos2::ZERO);
    assert!(image.capabilities().croppable);
    assert!(image.fill().is_none());
    assert!(image.outline().is_none());
    assert_eq!(image.capabilities().erase, EraseMode::Pixels);

    let table = factory::create_table(rect, 0, 3, Color32::WHITE, outline);
    assert!(!table.capabilities().croppable);
    assert_eq!(table.kind_name(), "Table");
}

#[test]
fn test_corner_handle_resizes_rectangle() {
    let mut editor = editor();
    let id = selected_square(&mut editor);

    // the handle sits on the bottom-right corner
    drag(&mut editor, Pos2::new(150.0, 150.0), Pos2::new(180.0, 170.0));

    let rect = editor.document().get(id).unwrap();
    assert_eq!(rect.local_rect(), Rect::from_min_size(Pos2::ZERO, Vec2::new(80.0, 70.0)));
    assert_eq!(rect.transform().position, Pos2::new(100.0, 100.0));
    // handles follow the new corner
    let handle = editor.state().selection().unwrap().handles()[0];
    assert!(handle.rect.contains(Pos2::new(80.0, 70.0)));
}

#[test]
fn test_resize_clamps_to_minimum_size() {
    let mut editor = editor();
    let id = selected_square(&mut editor);

    drag(&mut editor, Pos2::new(150.0, 150.0), Pos2::new(20.0, 140.0));

    let rect = editor.document().get(id).unwrap().local_rect();
    assert_eq!(rect.width(), editor.settings().min_shape_size);
    assert_eq!(rect.height(), 40.0);
}

#[test]
fn test_dragging_body_moves_item() {
    let mut editor = editor();
    let id = selected_square(&mut editor);

    drag(&mut editor, Pos2::new(120.0, 120.0), Pos2::new(140.0, 110.0));

    let moved = editor.document().get(id).unwrap();
    assert_eq!(moved.transform().position, Pos2::new(120.0, 90.0));
}

#[test]
fn test_click_on_empty_canvas_deselects() {
    let mut editor = editor();
    let id = selected_square(&mut editor);
    assert!(editor.document().get(id).unwrap().is_selected());

    click(&mut editor, Pos2::new(500.0, 500.0));
    assert_eq!(editor.state().selected_item(), None);
    assert!(!editor.document().get(id).unwrap().is_selected());
}

#[test]
fn test_rubber_band_selects_topmost_item() {
    let mut editor = editor();
    let id = selected_square(&mut editor);
    click(&mut editor, Pos2::new(500.0, 500.0));

    drag(&mut editor, Pos2::new(300.0, 300.0), Pos2::new(140.0, 140.0));
    assert_eq!(editor.state().selected_item(), Some(id));
}

#[test]
fn test_rotation_keeps_center_and_rotates_hit_area() {
    let mut editor = editor();
    editor.set_tool(ToolKind::Shape(ShapeKind::Rectangle));
    drag(&mut editor, Pos2::new(0.0, 0.0), Pos2::new(100.0, 20.0));
    let id = editor.state().selected_item().unwrap();

    assert!(editor.set_rotation(90.0));
    let rotated = editor.document().get(id).unwrap();
    let bounds = rotated.scene_bounds();
    assert!((bounds.center().x - 50.0).abs() < 0.01);
    assert!((bounds.center().y - 10.0).abs() < 0.01);

    // the long side now runs vertically through the center
    assert!(rotated.contains_scene_point(Pos2::new(50.0, -30.0)));
    assert!(!rotated.contains_scene_point(Pos2::new(5.0, 10.0)));
    assert_eq!(editor.panel().selection.unwrap().rotation, 90.0);
}

#[test]
fn test_set_size_keeps_top_left() {
    let mut editor = editor();
    let id = selected_square(&mut editor);

    assert!(editor.set_size(120.0, 30.0));
    let rect = editor.document().get(id).unwrap();
    assert_eq!(rect.visible_size(), Vec2::new(120.0, 30.0));
    assert_eq!(rect.transform().position, Pos2::new(100.0, 100.0));
}

#[test]
fn test_images_resize_uniformly() {
    let mut editor = editor();
    let id = editor.paste_image(gradient(100, 50), Pos2::new(10.0, 10.0)).unwrap();

    assert!(editor.set_size(200.0, 999.0));
    let image = editor.document().get(id).unwrap();
    assert!((image.visible_size().x - 200.0).abs() < 0.01);
    assert!((image.visible_size().y - 100.0).abs() < 0.01);
    let top_left = image.scene_bounds().min;
    assert!((top_left.x - 10.0).abs() < 0.01 && (top_left.y - 10.0).abs() < 0.01);
}

#[test]
fn test_vertical_line_resizes_along_its_height() {
    let mut editor = editor();
    editor.set_tool(ToolKind::Shape(ShapeKind::Line));
    drag(&mut editor, Pos2::new(100.0, 100.0), Pos2::new(100.0, 180.0));
    editor.set_tool(ToolKind::Select);
    click(&mut editor, Pos2::new(100.0, 140.0));
    let id = editor.state().selected_item().unwrap();

    // the handle sits on the lower end of the line
    drag(&mut editor, Pos2::new(100.0, 180.0), Pos2::new(100.0, 220.0));
    let line = editor.document().get(id).unwrap();
    assert!((line.visible_size().y - 120.0).abs() < 0.01);
    let top = line.scene_to_local(Pos2::new(100.0, 100.0)).unwrap();
    assert!(top.distance(Pos2::ZERO) < 0.01);

    assert!(editor.set_size(999.0, 60.0));
    let line = editor.document().get(id).unwrap();
    assert!((line.visible_size().y - 60.0).abs() < 0.01);
    assert_eq!(line.visible_size().x, 0.0);
}

#[test]
fn test_recolor_uses_picker_and_kind_guards() {
    let mut editor = editor();
    let id = selected_square(&mut editor);

    editor.host_mut().colors.push_back(Some(Color32::BLUE));
    assert!(editor.change_fill_color());
    let rect = editor.document().get(id).unwrap();
    assert_eq!(rect.fill().unwrap().fill(), Color32::BLUE);

    // a cancelled dialog leaves the color alone
    editor.host_mut().colors.push_back(None);
    assert!(!editor.change_outline_color());
    let before = editor.palette().item_outline;
    assert_eq!(editor.document().get(id).unwrap().outline().unwrap().outline().color, before);

    assert!(editor.set_outline_color(Color32::RED));
    assert_eq!(
        editor.document().get(id).unwrap().outline().unwrap().outline().color,
        Color32::RED
    );

    // images have neither fill nor outline
    editor.paste_image(gradient(8, 8), Pos2::new(300.0, 300.0)).unwrap();
    assert!(!editor.set_fill_color(Color32::RED));
    assert!(!editor.set_outline_color(Color32::RED));
}

#[test]
fn test_pen_color_and_width_target_tool_or_stroke() {
    let mut editor = editor();
    // cancelling the first prompt keeps the default pen color
    editor.host_mut().colors.push_back(None);
    editor.set_tool(ToolKind::Pen);
    assert_eq!(editor.state().pen().color, editor.settings().pen_color);

    assert!(editor.set_pen_width(80.0));
    assert_eq!(editor.state().pen().width, 50.0);
    drag(&mut editor, Pos2::new(10.0, 10.0), Pos2::new(60.0, 60.0));
    let stroke = editor.state().selected_item().unwrap();

    // re-entering the pen does not prompt again
    editor.set_tool(ToolKind::Select);
    editor.set_tool(ToolKind::Pen);
    assert_eq!(editor.host().color_requests.len(), 1);

    editor.set_tool(ToolKind::Select);
    click(&mut editor, Pos2::new(35.0, 35.0));
    assert_eq!(editor.state().selected_item(), Some(stroke));
    assert!(editor.set_pen_color(Color32::GOLD));
    assert!(editor.set_pen_width(0.5));
    let outline = editor.document().get(stroke).unwrap().outline().unwrap().outline();
    assert_eq!(outline, Outline::new(Color32::GOLD, 1.0));
    // the pen itself is untouched
    assert_eq!(editor.state().pen().width, 50.0);

    let id = selected_square(&mut editor);
    assert_eq!(editor.state().selected_item(), Some(id));
    assert!(!editor.set_pen_color(Color32::RED));
}

#[test]
fn test_z_order_nudges() {
    let mut editor = editor();
    let lower = editor.paste_image(gradient(20, 20), Pos2::new(0.0, 0.0)).unwrap();
    let upper = editor.paste_image(gradient(20, 20), Pos2::new(10.0, 10.0)).unwrap();
    assert_eq!(editor.document().top_item_at(Pos2::new(15.0, 15.0)), Some(upper));

    click(&mut editor, Pos2::new(5.0, 5.0));
    assert_eq!(editor.state().selected_item(), Some(lower));
    assert!(editor.bring_forward());
    assert!((editor.document().get(lower).unwrap().z() - 0.1).abs() < 1e-6);
    assert_eq!(editor.document().top_item_at(Pos2::new(15.0, 15.0)), Some(lower));

    assert!(editor.send_backward());
    assert!(editor.send_backward());
    assert_eq!(editor.document().top_item_at(Pos2::new(15.0, 15.0)), Some(upper));

    click(&mut editor, Pos2::new(500.0, 500.0));
    assert!(!editor.bring_forward());
}

#[test]
fn test_table_insertion() {
    let mut editor = editor();
    let id = editor.insert_table(2, 3, Pos2::new(40.0, 40.0)).unwrap();
    let table = editor.document().get(id).unwrap();
    assert_eq!(table.kind_name(), "Table");
    assert_eq!(table.local_rect().size(), Vec2::new(240.0, 60.0));
    assert_eq!(table.fill().unwrap().fill(), editor.palette().item_fill);
    assert_eq!(editor.state().selected_item(), Some(id));
}

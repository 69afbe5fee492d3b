use vecsketch_designer::{
    Canvas, DrawingMode, FontSpec, Handle, Point, PrimitiveKind, RenderSurface,
    TEXT_SIZE_PER_WIDTH,
};
use vecsketch_settings::EditorSettings;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn assert_coords_eq(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{:?} vs {:?}", actual, expected);
    }
}

/// Draws a freehand stroke through `points` in draw mode.
fn stroke(canvas: &mut Canvas, points: &[Point]) {
    canvas.set_mode(DrawingMode::Draw);
    canvas.on_press(points[0]);
    for p in &points[1..] {
        canvas.on_drag(*p);
    }
    canvas.on_release(points[points.len() - 1]);
}

fn click(canvas: &mut Canvas, p: Point) {
    canvas.on_press(p);
    canvas.on_release(p);
}

#[test]
fn test_freehand_gesture_is_one_object() {
    let mut canvas = Canvas::new();
    stroke(
        &mut canvas,
        &[pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0), pt(30.0, 0.0)],
    );

    assert_eq!(canvas.object_count(), 1);
    assert_eq!(canvas.surface().len(), 3);
    let group = canvas.registry().groups().next().unwrap();
    assert_eq!(group.handles(), canvas.surface().handles().as_slice());
}

#[test]
fn test_eraser_splits_stroke_in_two() {
    let mut canvas = Canvas::new();
    stroke(
        &mut canvas,
        &[pt(0.0, 0.0), pt(100.0, 0.0), pt(200.0, 0.0), pt(300.0, 0.0)],
    );
    let segments = canvas.surface().handles();

    canvas.set_mode(DrawingMode::Eraser);
    click(&mut canvas, pt(150.0, 5.0));

    assert_eq!(canvas.object_count(), 2);
    assert!(!canvas.surface().contains(segments[1]));
    assert_eq!(
        canvas.registry().lookup(segments[0]).unwrap().handles(),
        &[segments[0]]
    );
    assert_eq!(
        canvas.registry().lookup(segments[2]).unwrap().handles(),
        &[segments[2]]
    );
}

#[test]
fn test_eraser_drag_erases_along_the_way() {
    let mut canvas = Canvas::new();
    stroke(
        &mut canvas,
        &[pt(0.0, 0.0), pt(100.0, 0.0), pt(200.0, 0.0), pt(300.0, 0.0)],
    );

    canvas.set_mode(DrawingMode::Eraser);
    canvas.on_press(pt(50.0, 5.0));
    canvas.on_drag(pt(250.0, 5.0));
    canvas.on_release(pt(250.0, 5.0));

    assert_eq!(canvas.surface().len(), 1);
    assert_eq!(canvas.object_count(), 1);
}

#[test]
fn test_rotate_stroke_about_click_point() {
    let mut canvas = Canvas::new();
    stroke(&mut canvas, &[pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0)]);
    let segments = canvas.surface().handles();

    canvas.set_mode(DrawingMode::Rotate);
    click(&mut canvas, pt(0.0, 0.0));

    let first = canvas.surface().get_geometry(segments[0]).unwrap();
    let second = canvas.surface().get_geometry(segments[1]).unwrap();
    assert_coords_eq(&first, &[0.0, 0.0, 0.0, 10.0]);
    assert_coords_eq(&second, &[0.0, 10.0, 0.0, 20.0]);
    assert_eq!(canvas.object_count(), 1);
}

#[test]
fn test_rotate_polygon_about_centroid() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::Polygon);
    click(&mut canvas, pt(0.0, 0.0));
    click(&mut canvas, pt(30.0, 0.0));
    click(&mut canvas, pt(0.0, 30.0));
    let polygon = canvas.finish_polygon().unwrap();

    canvas.set_mode(DrawingMode::Rotate);
    click(&mut canvas, pt(10.0, 10.0));

    let coords = canvas.surface().get_geometry(polygon).unwrap();
    assert_coords_eq(&coords, &[20.0, 0.0, 20.0, 30.0, -10.0, 0.0]);
}

#[test]
fn test_rotate_leaves_ovals_alone() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::Circle);
    canvas.on_press(pt(50.0, 50.0));
    canvas.on_release(pt(60.0, 50.0));
    let circle = canvas.surface().handles()[0];
    let before = canvas.surface().get_geometry(circle);

    canvas.set_mode(DrawingMode::Rotate);
    click(&mut canvas, pt(55.0, 50.0));
    assert_eq!(canvas.surface().get_geometry(circle), before);
}

#[test]
fn test_copy_paste_stroke_as_single_polyline() {
    let mut canvas = Canvas::new();
    stroke(&mut canvas, &[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)]);

    canvas.set_mode(DrawingMode::Copy);
    click(&mut canvas, pt(5.0, 0.0));
    assert!(!canvas.clipboard().is_empty());

    canvas.set_mode(DrawingMode::Paste);
    canvas.on_press(pt(100.0, 100.0));
    canvas.on_release(pt(100.0, 100.0));

    assert_eq!(canvas.object_count(), 2);
    let pasted = *canvas.surface().handles().last().unwrap();
    let group = canvas.registry().lookup(pasted).unwrap();
    assert_eq!(group.len(), 1);

    let primitive = canvas.surface().primitive(pasted).unwrap();
    assert_eq!(primitive.kind, PrimitiveKind::Line);
    assert_eq!(
        primitive.coords,
        vec![100.0, 100.0, 110.0, 100.0, 110.0, 100.0, 110.0, 110.0]
    );
}

#[test]
fn test_copy_falls_back_to_closest() {
    let mut canvas = Canvas::new();
    canvas.place_text(pt(200.0, 200.0), "far", None, Some("red"));

    canvas.set_mode(DrawingMode::Copy);
    click(&mut canvas, pt(0.0, 0.0));

    let copied = canvas.clipboard().contents().unwrap();
    assert_eq!(copied.kind, PrimitiveKind::Text);
    assert_eq!(copied.text.as_deref(), Some("far"));
    assert_eq!(copied.style.fill, "red");
}

#[test]
fn test_drag_shape_commits_without_preview() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::Rectangle);
    canvas.on_press(pt(10.0, 10.0));
    canvas.on_drag(pt(20.0, 15.0));
    canvas.on_drag(pt(30.0, 20.0));
    assert_eq!(canvas.surface().len(), 1);
    assert_eq!(canvas.object_count(), 0);

    canvas.on_release(pt(40.0, 20.0));

    assert_eq!(canvas.surface().len(), 1);
    assert_eq!(canvas.object_count(), 1);
    let (handle, rect) = canvas.surface().iter().next().unwrap();
    assert!(canvas.registry().contains(handle));
    assert_eq!(rect.kind, PrimitiveKind::Rectangle);
    assert_eq!(rect.coords, vec![10.0, 10.0, 20.0, 20.0]);
    assert_eq!(rect.style.outline, "");
    assert_eq!(rect.style.width, 1.0);
}

#[test]
fn test_triangle_commit_geometry() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::Triangle);
    canvas.on_press(pt(100.0, 100.0));
    canvas.on_release(pt(100.0, 140.0));

    let (_, triangle) = canvas.surface().iter().next().unwrap();
    assert_eq!(triangle.kind, PrimitiveKind::Polygon);
    assert_eq!(triangle.coords, vec![100.0, 60.0, 80.0, 100.0, 120.0, 100.0]);
}

#[test]
fn test_polygon_commits_on_double_click() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::Polygon);
    click(&mut canvas, pt(0.0, 0.0));
    click(&mut canvas, pt(40.0, 0.0));
    click(&mut canvas, pt(20.0, 30.0));
    assert_eq!(canvas.polygon_vertices().len(), 3);
    assert_eq!(canvas.surface().len(), 2);

    canvas.on_double_click(pt(20.0, 30.0));

    assert_eq!(canvas.object_count(), 1);
    assert_eq!(canvas.surface().len(), 1);
    assert!(canvas.polygon_vertices().is_empty());
    let (_, polygon) = canvas.surface().iter().next().unwrap();
    assert_eq!(polygon.coords, vec![0.0, 0.0, 40.0, 0.0, 20.0, 30.0]);
}

#[test]
fn test_polygon_with_two_vertices_is_discarded() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::Polygon);
    click(&mut canvas, pt(0.0, 0.0));
    click(&mut canvas, pt(40.0, 0.0));
    canvas.on_double_click(pt(40.0, 0.0));

    assert_eq!(canvas.object_count(), 0);
    assert!(canvas.surface().is_empty());
}

#[test]
fn test_mode_change_deletes_previews() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::Circle);
    canvas.on_press(pt(50.0, 50.0));
    canvas.on_drag(pt(60.0, 50.0));
    assert_eq!(canvas.surface().len(), 1);
    canvas.set_mode(DrawingMode::Polygon);
    assert!(canvas.surface().is_empty());

    click(&mut canvas, pt(0.0, 0.0));
    click(&mut canvas, pt(10.0, 0.0));
    click(&mut canvas, pt(10.0, 10.0));
    canvas.set_mode(DrawingMode::Draw);
    assert!(canvas.surface().is_empty());
    assert_eq!(canvas.object_count(), 0);
}

#[test]
fn test_move_drags_whole_stroke() {
    let mut canvas = Canvas::new();
    stroke(&mut canvas, &[pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0)]);
    let segments = canvas.surface().handles();

    canvas.set_mode(DrawingMode::Move);
    canvas.on_press(pt(15.0, 0.0));
    canvas.on_drag(pt(18.0, 2.0));
    canvas.on_drag(pt(20.0, 5.0));
    canvas.on_release(pt(20.0, 5.0));

    assert_eq!(
        canvas.surface().get_geometry(segments[0]),
        Some(vec![5.0, 5.0, 15.0, 5.0])
    );
    assert_eq!(
        canvas.surface().get_geometry(segments[1]),
        Some(vec![15.0, 5.0, 25.0, 5.0])
    );
    assert_eq!(canvas.selected(), Some(segments[1]));
}

#[test]
fn test_remove_mode_removes_whole_stroke() {
    let mut canvas = Canvas::new();
    stroke(&mut canvas, &[pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0)]);
    canvas.place_text(pt(100.0, 100.0), "stay", None, None);

    canvas.set_mode(DrawingMode::Remove);
    click(&mut canvas, pt(5.0, 0.0));

    assert_eq!(canvas.object_count(), 1);
    assert_eq!(canvas.surface().len(), 1);
    assert_eq!(canvas.selected(), None);
}

#[test]
fn test_selection_commands_act_on_whole_group() {
    let mut canvas = Canvas::new();
    stroke(&mut canvas, &[pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0)]);
    let segments = canvas.surface().handles();

    // A press in draw mode selects what is under the pointer.
    click(&mut canvas, pt(5.0, 0.0));
    assert_eq!(canvas.selected(), Some(segments[0]));
    assert_eq!(canvas.object_count(), 1);

    assert!(canvas.set_fill("green"));
    assert!(canvas.set_line_width(4.0));
    for h in &segments {
        let style = &canvas.surface().primitive(*h).unwrap().style;
        assert_eq!(style.fill, "green");
        assert_eq!(style.width, 4.0);
    }
}

#[test]
fn test_line_width_on_text_sets_font_size() {
    let mut canvas = Canvas::new();
    let text = canvas.place_text(
        pt(50.0, 50.0),
        "abc",
        Some(FontSpec::new("Courier", 12.0)),
        None,
    );

    click(&mut canvas, pt(50.0, 50.0));
    assert_eq!(canvas.selected(), Some(text));
    assert!(canvas.set_line_width(4.0));

    let style = &canvas.surface().primitive(text).unwrap().style;
    assert_eq!(style.font, Some(FontSpec::new("Courier", 32.0)));
    assert_eq!(style.width, 0.0);

    assert!(canvas.set_line_width(10.0));
    let style = &canvas.surface().primitive(text).unwrap().style;
    assert_eq!(
        style.font.as_ref().map(|f| f.size),
        Some(10.0 * TEXT_SIZE_PER_WIDTH)
    );
}

#[test]
fn test_recolor_from_palette() {
    let mut canvas = Canvas::new();
    let text = canvas.place_text(pt(50.0, 50.0), "abc", None, None);
    click(&mut canvas, pt(50.0, 50.0));
    assert_eq!(canvas.selected(), Some(text));

    assert_eq!(
        canvas.tools().palette,
        vec!["black", "red", "green", "blue", "yellow"]
    );
    assert!(canvas.set_fill_from_palette(3));
    assert_eq!(canvas.surface().primitive(text).unwrap().style.fill, "blue");

    assert!(!canvas.set_fill_from_palette(5));
    assert_eq!(canvas.surface().primitive(text).unwrap().style.fill, "blue");
}

#[test]
fn test_palette_comes_from_settings() {
    let mut editor = EditorSettings::default();
    editor.palette = vec!["#112233".to_string(), "orange".to_string()];
    let mut canvas = Canvas::with_settings(&editor);
    let text = canvas.place_text(pt(10.0, 10.0), "abc", None, None);
    click(&mut canvas, pt(10.0, 10.0));
    assert_eq!(canvas.selected(), Some(text));

    assert!(canvas.set_fill_from_palette(1));
    assert_eq!(canvas.surface().primitive(text).unwrap().style.fill, "orange");
    assert!(!canvas.set_fill_from_palette(2));
}

#[test]
fn test_raise_and_lower_selected() {
    let mut canvas = Canvas::new();
    let bottom = canvas.place_text(pt(50.0, 50.0), "a", None, None);
    let top = canvas.place_text(pt(50.0, 50.0), "b", None, None);

    canvas.set_mode(DrawingMode::Move);
    click(&mut canvas, pt(50.0, 50.0));
    assert_eq!(canvas.selected(), Some(bottom));

    assert!(canvas.raise_selected());
    assert_eq!(canvas.surface().handles(), vec![top, bottom]);
    assert!(canvas.lower_selected());
    assert_eq!(canvas.surface().handles(), vec![bottom, top]);
}

#[test]
fn test_restart_clears_canvas() {
    let mut canvas = Canvas::new();
    stroke(&mut canvas, &[pt(0.0, 0.0), pt(10.0, 0.0)]);
    canvas.place_text(pt(5.0, 5.0), "x", None, None);

    canvas.restart();

    assert_eq!(canvas.object_count(), 0);
    assert!(canvas.surface().is_empty());
    assert_eq!(canvas.selected(), None::<Handle>);
}

#[test]
fn test_change_line_width_applies_to_new_strokes_only() {
    let mut canvas = Canvas::new();
    stroke(&mut canvas, &[pt(0.0, 0.0), pt(10.0, 0.0)]);
    canvas.change_line_width(6.0);
    stroke(&mut canvas, &[pt(0.0, 50.0), pt(10.0, 50.0)]);

    let widths: Vec<f64> = canvas
        .surface()
        .iter()
        .map(|(_, p)| p.style.width)
        .collect();
    assert_eq!(widths, vec![1.0, 6.0]);
}

use egui::{Color32, pos2};
use sketch_board::{DrawingEngine, PaintConfig, ToolKind};

fn engine() -> DrawingEngine {
    DrawingEngine::new(100, 100, &PaintConfig::default())
}

fn scribble(engine: &mut DrawingEngine, offset: f32) {
    engine.begin_stroke(pos2(10.0 + offset, 10.0));
    engine.continue_stroke(pos2(30.0 + offset, 60.0));
    engine.continue_stroke(pos2(50.0 + offset, 20.0));
    engine.end_stroke();
}

#[test]
fn test_rectangle_undo_redo_scenario() {
    let mut engine = engine();
    let blank = engine.canvas().snapshot();

    engine.begin_stroke(pos2(10.0, 10.0));
    engine.select_tool(ToolKind::Rectangle);
    engine.set_fill(false);
    engine.continue_stroke(pos2(50.0, 50.0));
    engine.end_stroke();

    let rectangle = engine.canvas().snapshot();
    assert_eq!(rectangle.image().get_pixel(10, 30).0, [0, 0, 0, 255]);
    assert_eq!(rectangle.image().get_pixel(50, 30).0, [0, 0, 0, 255]);
    assert_eq!(rectangle.image().get_pixel(30, 30).0, [255, 255, 255, 255]);

    assert!(engine.undo());
    assert!(engine.canvas().matches(&blank));

    assert!(engine.redo());
    assert!(engine.canvas().matches(&rectangle));
}

#[test]
fn test_undo_redo_round_trip_restores_depths() {
    let mut engine = engine();
    for i in 0..4 {
        scribble(&mut engine, i as f32 * 10.0);
    }
    // step back once so both stacks are populated
    engine.undo();

    for _ in 0..engine.undo_depth() {
        let canvas = engine.canvas().snapshot();
        let depths = (engine.undo_depth(), engine.redo_depth());

        assert!(engine.undo());
        assert!(engine.redo());

        assert!(engine.canvas().matches(&canvas));
        assert_eq!((engine.undo_depth(), engine.redo_depth()), depths);

        engine.undo();
    }
}

#[test]
fn test_empty_stacks_are_noops() {
    let mut engine = engine();
    let blank = engine.canvas().snapshot();
    let revision = engine.revision();

    assert!(!engine.undo());
    assert!(!engine.redo());
    assert!(engine.canvas().matches(&blank));
    assert_eq!(engine.redo_depth(), 0);
    assert_eq!(engine.revision(), revision);

    scribble(&mut engine, 0.0);
    let drawn = engine.canvas().snapshot();
    assert!(!engine.redo());
    assert!(engine.canvas().matches(&drawn));
    assert_eq!(engine.undo_depth(), 1);
}

#[test]
fn test_new_stroke_clears_redo() {
    let mut engine = engine();
    scribble(&mut engine, 0.0);
    scribble(&mut engine, 20.0);
    engine.undo();
    engine.undo();
    engine.redo();
    assert_eq!(engine.redo_depth(), 1);

    engine.begin_stroke(pos2(5.0, 5.0));
    assert_eq!(engine.redo_depth(), 0);
    assert!(!engine.can_redo());
    assert_eq!(engine.undo_depth(), 2);
}

#[test]
fn test_clear_is_not_recorded() {
    let mut engine = engine();
    scribble(&mut engine, 0.0);
    let first = engine.canvas().snapshot();
    scribble(&mut engine, 30.0);

    engine.clear();
    assert_eq!(engine.undo_depth(), 2);
    assert_eq!(engine.canvas().pixel(10, 10), Some(Color32::WHITE));
    assert!(!engine.canvas().matches(&first));

    // undo skips over the clear to the state before the second stroke
    assert!(engine.undo());
    assert!(engine.canvas().matches(&first));
}

#[test]
fn test_history_limit_from_config() {
    let config = PaintConfig {
        history_limit: Some(3),
        ..PaintConfig::default()
    };
    let mut engine = DrawingEngine::new(100, 100, &config);
    for i in 0..6 {
        scribble(&mut engine, i as f32 * 5.0);
    }
    assert_eq!(engine.undo_depth(), 3);

    let mut undone = 0;
    while engine.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert_eq!(engine.redo_depth(), 3);
}

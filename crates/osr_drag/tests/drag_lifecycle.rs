use osr_core::test_support::{EngineCall, RecordingEngine};
use osr_core::{ButtonMask, DragOperation, EngineButton, Point};
use osr_drag::DragContext;

fn started(data: Option<&str>) -> DragContext<String> {
    let mut drag = DragContext::new();
    drag.start_dragging(data.map(str::to_owned), DragOperation::COPY | DragOperation::MOVE);
    drag
}

#[test]
fn primary_release_sends_drop_then_leave() {
    let mut engine = RecordingEngine::new();
    let mut drag = started(Some("text/plain"));
    drag.enter(&mut engine, Point::new(10, 20), ButtonMask::BUTTON1);
    assert!(drag.over(&mut engine, Point::new(12, 22), ButtonMask::empty()));
    assert!(drag.release(&mut engine, EngineButton::PRIMARY, Point::new(14, 24), ButtonMask::empty()));

    let allowed = DragOperation::COPY | DragOperation::MOVE;
    assert_eq!(
        engine.take_calls(),
        vec![
            EngineCall::DragEnter {
                data: Some("text/plain".to_owned()),
                position: Point::new(10, 20),
                modifiers: ButtonMask::BUTTON1,
                allowed,
            },
            EngineCall::DragOver {
                position: Point::new(12, 22),
                modifiers: ButtonMask::BUTTON1,
                allowed,
            },
            EngineCall::Drop {
                position: Point::new(14, 24),
                modifiers: ButtonMask::empty(),
            },
            EngineCall::DragLeave,
        ]
    );
    assert!(!drag.is_dragging());
    assert!(drag.data().is_none());
}

#[test]
fn other_buttons_do_not_end_the_drag() {
    let mut engine = RecordingEngine::new();
    let mut drag = started(Some("x"));
    assert!(!drag.release(&mut engine, EngineButton::RIGHT, Point::new(0, 0), ButtonMask::BUTTON1));
    assert!(!drag.release(&mut engine, EngineButton::MIDDLE, Point::new(0, 0), ButtonMask::BUTTON1));
    assert!(drag.is_dragging());
    assert!(engine.drag_calls().is_empty());
}

#[test]
fn degenerate_drag_enters_without_data() {
    let mut engine = RecordingEngine::new();
    let mut drag = started(None);
    drag.enter(&mut engine, Point::new(1, 1), ButtonMask::BUTTON1);
    assert!(drag.release(&mut engine, EngineButton::PRIMARY, Point::new(1, 1), ButtonMask::empty()));
    assert!(matches!(engine.calls[0], EngineCall::DragEnter { data: None, .. }));
    assert_eq!(engine.calls.len(), 3);
}

#[test]
fn idle_context_sends_nothing() {
    let mut engine = RecordingEngine::new();
    let mut drag = DragContext::<String>::new();
    drag.enter(&mut engine, Point::new(0, 0), ButtonMask::empty());
    assert!(!drag.over(&mut engine, Point::new(0, 0), ButtonMask::empty()));
    assert!(!drag.release(&mut engine, EngineButton::PRIMARY, Point::new(0, 0), ButtonMask::empty()));
    assert!(engine.calls.is_empty());
}

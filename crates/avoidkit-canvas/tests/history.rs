use avoidkit_canvas::item::SE;
use avoidkit_canvas::{Canvas, EventLog};
use avoidkit_core::{Point, Rectangle};

#[test]
fn test_replay_undoes_then_redoes() {
    let mut canvas = Canvas::new();
    let b = canvas
        .add_element(Rectangle::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let l = canvas
        .add_line(&[Point::new(40.0, 60.0), Point::new(80.0, 60.0)])
        .unwrap();
    canvas.update_now().unwrap();
    let head = canvas.line(l).unwrap().head().id;
    let se = canvas.element(b).unwrap().handles()[SE].id;

    let mut log = EventLog::new();
    log.start_recording();
    log.push(canvas.connect_item(l, head, b, 0, None).unwrap());
    log.push(canvas.move_handle(b, se, Point::new(30.0, 30.0)).unwrap());
    canvas.update_now().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(canvas.element(b).unwrap().width(), 30.0);

    assert_eq!(log.replay(&mut canvas).unwrap(), 2);
    assert!(canvas.connections().is_empty());
    assert_eq!(canvas.element(b).unwrap().width(), 10.0);
    assert_eq!(log.len(), 2);

    assert_eq!(log.replay(&mut canvas).unwrap(), 2);
    assert_eq!(canvas.connections().len(), 1);
    assert_eq!(canvas.element(b).unwrap().width(), 30.0);
}

#[test]
fn test_push_is_ignored_when_not_recording() {
    let mut canvas = Canvas::new();
    let l = canvas
        .add_line(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)])
        .unwrap();
    let tail = canvas.line(l).unwrap().tail().id;

    let mut log = EventLog::new();
    log.push(canvas.move_handle(l, tail, Point::new(20.0, 0.0)).unwrap());
    assert!(log.is_empty());

    log.start_recording();
    log.push(canvas.move_handle(l, tail, Point::new(30.0, 0.0)).unwrap());
    log.stop_recording();
    assert_eq!(log.len(), 1);

    // Playback outside recording consumes the log.
    log.replay(&mut canvas).unwrap();
    assert!(log.is_empty());
    assert_eq!(canvas.line(l).unwrap().tail().pos, Point::new(20.0, 0.0));
}

#[test]
fn test_pop_and_start_recording_clear() {
    let mut canvas = Canvas::new();
    let l = canvas
        .add_line(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)])
        .unwrap();
    let head = canvas.line(l).unwrap().head().id;

    let mut log = EventLog::new();
    log.start_recording();
    log.push(canvas.move_handle(l, head, Point::new(1.0, 0.0)).unwrap());
    log.push(canvas.move_handle(l, head, Point::new(2.0, 0.0)).unwrap());
    assert_eq!(log.pop().map(|c| c.item()), Some(l));
    assert_eq!(log.len(), 1);

    log.start_recording();
    assert!(log.is_empty());
    assert!(log.is_recording());
}

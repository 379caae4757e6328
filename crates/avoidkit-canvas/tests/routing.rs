use avoidkit_canvas::{Canvas, CanvasError, Element, ItemId, ItemKind};
use avoidkit_core::{ConnectorLayout, Matrix, Point, Rectangle, RoutingPenalty};
use avoidkit_router::{RouteRequest, RoutingEngine};
use avoidkit_settings::RouterSettings;

const TOL: f64 = 1e-9;

fn assert_points(actual: &[Point], expected: &[(f64, f64)]) {
    assert_eq!(actual.len(), expected.len(), "got {:?}", actual);
    for (a, e) in actual.iter().zip(expected) {
        assert!(a.approx_eq(&Point::from(*e), TOL), "got {:?}, want {:?}", actual, expected);
    }
}

/// Box at (0,0)-(10,10) and a line from (20,40) to (40,80) in item space,
/// translated by (20,40), with its head connected to the box.
fn connected_scene() -> (Canvas, ItemId, ItemId) {
    let mut canvas = Canvas::new();
    let b = canvas
        .add_element(Rectangle::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let l = canvas
        .add_line(&[Point::new(20.0, 40.0), Point::new(40.0, 80.0)])
        .unwrap();
    canvas.set_matrix(l, Matrix::translation(20.0, 40.0)).unwrap();
    let head = canvas.line(l).unwrap().head().id;
    canvas.connect_item(l, head, b, 0, None).unwrap();
    (canvas, b, l)
}

#[test]
fn test_connected_head_lands_on_box_edge() {
    let (mut canvas, b, l) = connected_scene();
    assert_points(
        &canvas.outline(b).unwrap(),
        &[(10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
    );

    let stats = canvas.update_now().unwrap();
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.lines_updated, 1);

    let points = canvas.route_points(l).unwrap();
    assert_points(&points, &[(10.0, 5.0), (60.0, 5.0), (60.0, 120.0)]);
    assert!(canvas.take_redraw_requests().contains(&l));
}

#[test]
fn test_points_c2i_undoes_line_translation() {
    let mut canvas = Canvas::new();
    let l = canvas
        .add_line(&[Point::new(0.0, 0.0), Point::new(20.0, 40.0)])
        .unwrap();
    canvas.set_matrix(l, Matrix::translation(20.0, 40.0)).unwrap();

    let canvas_points = [Point::new(20.0, 40.0), Point::new(40.0, 80.0)];
    let item_points = canvas.points_c2i(l, &canvas_points).unwrap();
    assert_points(&item_points, &[(0.0, 0.0), (20.0, 40.0)]);
    assert_points(
        &canvas.points_i2c(l, &item_points).unwrap(),
        &[(20.0, 40.0), (40.0, 80.0)],
    );
}

#[test]
fn test_outline_follows_ancestor_matrix() {
    let mut canvas = Canvas::new();
    let parent = canvas
        .add_element(Rectangle::new(100.0, 100.0, 20.0, 20.0))
        .unwrap();
    let child = canvas
        .add_item(
            ItemKind::Element(Element::new(10.0, 10.0)),
            Some(parent),
            Matrix::translation(5.0, 5.0),
        )
        .unwrap();
    canvas.update_now().unwrap();

    canvas
        .set_matrix(parent, Matrix::translation(200.0, 100.0))
        .unwrap();
    canvas.update_now().unwrap();

    let obstacle = canvas.obstacle(child).unwrap();
    assert_points(
        canvas.router().obstacle_polygon(obstacle).unwrap(),
        &[(215.0, 105.0), (215.0, 115.0), (205.0, 115.0), (205.0, 105.0)],
    );
}

#[test]
fn test_moved_box_reroutes_connected_line() {
    let (mut canvas, b, l) = connected_scene();
    canvas.update_now().unwrap();

    canvas.set_matrix(b, Matrix::translation(0.0, 20.0)).unwrap();
    canvas.update_now().unwrap();

    // Centre (5, 25): the route leaves through the east edge at y = 25.
    let points = canvas.route_points(l).unwrap();
    assert_points(&points, &[(10.0, 25.0), (60.0, 25.0), (60.0, 120.0)]);
}

#[test]
fn test_checkpoint_survives_solves_per_segment() {
    let mut canvas = Canvas::new();
    let l = canvas
        .add_line(&[Point::new(0.0, 0.0), Point::new(100.0, 100.0)])
        .unwrap();
    canvas.update_now().unwrap();
    assert_eq!(canvas.line(l).unwrap().handle_count(), 3);

    let bend = canvas.line(l).unwrap().handles()[1].id;
    canvas.move_handle(l, bend, Point::new(50.0, 20.0)).unwrap();
    canvas.update_now().unwrap();

    assert_eq!(canvas.router().connector_count(), 2);
    let line = canvas.line(l).unwrap();
    assert_points(
        &line.positions(),
        &[(0.0, 0.0), (50.0, 0.0), (50.0, 20.0), (100.0, 20.0), (100.0, 100.0)],
    );
    assert_eq!(line.handles()[2].id, bend);
    assert!(line.handles()[2].checkpoint);
    assert_eq!(line.checkpoint_count(), 1);

    // Moving the tail re-routes only the last segment.
    let tail = line.tail().id;
    canvas.move_handle(l, tail, Point::new(120.0, 100.0)).unwrap();
    let stats = canvas.update_now().unwrap();
    assert_eq!(stats.routes_changed, 1);
    let line = canvas.line(l).unwrap();
    assert_eq!(line.checkpoint_count(), 1);
    assert_points(
        &line.positions(),
        &[(0.0, 0.0), (50.0, 0.0), (50.0, 20.0), (120.0, 20.0), (120.0, 100.0)],
    );
}

#[test]
fn test_quiet_update_changes_nothing() {
    let (mut canvas, _b, l) = connected_scene();
    canvas.update_now().unwrap();
    let before = canvas.line(l).unwrap().clone();

    canvas.request_update(l).unwrap();
    let stats = canvas.update_now().unwrap();
    assert_eq!(stats.routes_changed, 0);
    assert_eq!(stats.lines_updated, 0);
    assert_eq!(canvas.line(l).unwrap(), &before);
}

#[test]
fn test_single_connector_layout_matches_echoed_checkpoints() {
    let settings = RouterSettings {
        connector_layout: ConnectorLayout::Single,
        ..RouterSettings::default()
    };
    let mut canvas = Canvas::with_settings(settings).unwrap();
    let l = canvas
        .add_line(&[Point::new(0.0, 0.0), Point::new(100.0, 100.0)])
        .unwrap();
    canvas.update_now().unwrap();

    let bend = canvas.line(l).unwrap().handles()[1].id;
    canvas.move_handle(l, bend, Point::new(50.0, 20.0)).unwrap();
    canvas.update_now().unwrap();

    assert_eq!(canvas.router().connector_count(), 1);
    let line = canvas.line(l).unwrap();
    assert_eq!(line.handle_count(), 5);
    assert_eq!(line.checkpoint_indices(), vec![2]);
    assert_eq!(line.handles()[2].pos, Point::new(50.0, 20.0));
}

/// Routes every connector straight from source to destination and leaves
/// the checkpoints out.
struct CheckpointDroppingEngine;

impl RoutingEngine for CheckpointDroppingEngine {
    fn name(&self) -> &str {
        "checkpoint-dropping"
    }

    fn route(&self, request: &RouteRequest<'_>) -> avoidkit_router::Result<Vec<Point>> {
        Ok(vec![request.source, request.dest])
    }
}

#[test]
fn test_failed_delivery_is_logged_and_line_kept() {
    let settings = RouterSettings {
        connector_layout: ConnectorLayout::Single,
        ..RouterSettings::default()
    };
    let mut canvas = Canvas::with_engine(settings, Box::new(CheckpointDroppingEngine)).unwrap();
    assert_eq!(canvas.router().engine_name(), "checkpoint-dropping");
    let l = canvas
        .add_line(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
        ])
        .unwrap();
    let middle = canvas.line(l).unwrap().handles()[1].id;
    canvas.move_handle(l, middle, Point::new(10.0, 20.0)).unwrap();
    let before = canvas.line(l).unwrap().clone();

    let stats = canvas.update_now().unwrap();
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.lines_updated, 0);
    assert_eq!(canvas.line(l).unwrap(), &before);
    assert!(canvas.take_redraw_requests().contains(&l));
}

#[test]
fn test_coinciding_checkpoints_keep_single_layout_routing() {
    let settings = RouterSettings {
        connector_layout: ConnectorLayout::Single,
        ..RouterSettings::default()
    };
    let mut canvas = Canvas::with_settings(settings).unwrap();
    let l = canvas
        .add_line(&[
            Point::new(0.0, 0.0),
            Point::new(30.0, 10.0),
            Point::new(30.0, 10.0),
            Point::new(60.0, 60.0),
        ])
        .unwrap();
    let ids: Vec<_> = canvas.line(l).unwrap().handles().iter().map(|h| h.id).collect();
    canvas.move_handle(l, ids[1], Point::new(30.0, 10.0)).unwrap();
    canvas.move_handle(l, ids[2], Point::new(30.0, 10.0)).unwrap();

    let stats = canvas.update_now().unwrap();
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.lines_updated, 1);
    assert_points(
        &canvas.line(l).unwrap().positions(),
        &[(0.0, 0.0), (30.0, 0.0), (30.0, 10.0), (30.0, 10.0), (60.0, 10.0), (60.0, 60.0)],
    );

    canvas.move_handle(l, ids[3], Point::new(90.0, 90.0)).unwrap();
    let stats = canvas.update_now().unwrap();
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.lines_updated, 1);
    let line = canvas.line(l).unwrap();
    assert_eq!(line.checkpoint_indices(), vec![2, 3]);
    assert_points(
        &line.positions(),
        &[(0.0, 0.0), (30.0, 0.0), (30.0, 10.0), (30.0, 10.0), (90.0, 10.0), (90.0, 90.0)],
    );
}

#[test]
fn test_bound_end_walks_route_to_box_edge() {
    let mut canvas = Canvas::new();
    let b = canvas
        .add_element(Rectangle::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    // The first bend of either route lies inside the box.
    let down = canvas
        .add_line(&[Point::new(0.0, 0.0), Point::new(7.0, 100.0)])
        .unwrap();
    let across = canvas
        .add_line(&[Point::new(100.0, 7.0), Point::new(0.0, 0.0)])
        .unwrap();
    let head = canvas.line(down).unwrap().head().id;
    let tail = canvas.line(across).unwrap().tail().id;
    canvas.connect_item(down, head, b, 2, None).unwrap();
    canvas.connect_item(across, tail, b, 0, None).unwrap();
    assert!(canvas.has_pending_updates());

    let stats = canvas.update_now().unwrap();
    assert!(!canvas.has_pending_updates());
    assert_eq!(stats.failed, 0);
    assert_points(&canvas.route_points(down).unwrap(), &[(7.0, 10.0), (7.0, 100.0)]);
    assert_points(&canvas.route_points(across).unwrap(), &[(100.0, 7.0), (10.0, 7.0)]);

    // Stable on the next pass.
    canvas.request_update(down).unwrap();
    canvas.request_update(across).unwrap();
    let stats = canvas.update_now().unwrap();
    assert_eq!(stats.lines_updated, 0);
    assert_eq!(canvas.line(down).unwrap().handle_count(), 2);
}

#[test]
fn test_split_segment_adds_checkpoints() {
    let mut canvas = Canvas::with_settings(RouterSettings {
        routing_type: avoidkit_core::RoutingType::PolyLine,
        ..RouterSettings::default()
    })
    .unwrap();
    let l = canvas
        .add_line(&[Point::new(0.0, 0.0), Point::new(30.0, 30.0)])
        .unwrap();
    let ids = canvas.split_segment(l, 0, 3).unwrap();
    assert_eq!(ids.len(), 2);
    canvas.update_now().unwrap();

    let line = canvas.line(l).unwrap();
    assert_eq!(line.checkpoint_count(), 2);
    assert_points(
        &line.positions(),
        &[(0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (30.0, 30.0)],
    );
    assert_eq!(canvas.router().connector_count(), 3);

    assert!(matches!(
        canvas.split_segment(l, 7, 2),
        Err(CanvasError::InvalidSegment { segment: 7, .. })
    ));
}

#[test]
fn test_element_corner_keeps_min_size() {
    let mut canvas = Canvas::new();
    let b = canvas
        .add_element(Rectangle::new(0.0, 0.0, 40.0, 40.0))
        .unwrap();
    let se = canvas.element(b).unwrap().handles()[avoidkit_canvas::item::SE].id;

    let undo = canvas.move_handle(b, se, Point::new(2.0, 3.0)).unwrap();
    let element = canvas.element(b).unwrap();
    assert_eq!(element.width(), element.min_width());
    assert_eq!(element.height(), element.min_height());

    canvas.apply(undo).unwrap();
    assert_eq!(
        canvas.element(b).unwrap().rect(),
        Rectangle::new(0.0, 0.0, 40.0, 40.0)
    );
}

#[test]
fn test_settings_configure_router() {
    let canvas = Canvas::new();
    assert_eq!(canvas.router().routing_penalty(RoutingPenalty::Segment), 40.0);
    assert_eq!(
        canvas.router().routing_penalty(RoutingPenalty::FixedSharedPath),
        8000.0
    );
    assert_eq!(canvas.router().parameters().nudge_distance, 14.0);

    let bad = RouterSettings {
        shape_margin: -1.0,
        ..RouterSettings::default()
    };
    assert!(matches!(
        Canvas::with_settings(bad),
        Err(CanvasError::Settings(_))
    ));
}

#[test]
fn test_shape_margin_grows_obstacle() {
    let mut canvas = Canvas::with_settings(RouterSettings {
        shape_margin: 5.0,
        ..RouterSettings::default()
    })
    .unwrap();
    let b = canvas
        .add_element(Rectangle::new(0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let obstacle = canvas.obstacle(b).unwrap();
    assert_points(
        canvas.router().obstacle_polygon(obstacle).unwrap(),
        &[(15.0, -5.0), (15.0, 15.0), (-5.0, 15.0), (-5.0, -5.0)],
    );
}

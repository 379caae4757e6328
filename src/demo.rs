//! Headless version of the diagram demo: two boxes joined by a line that
//! is routed, re-routed when a box moves, split, and finally unwound by
//! playing back the recorded connections.

use avoidkit_canvas::{Canvas, EventLog, UpdateStats};
use avoidkit_core::{Matrix, Point, Rectangle};
use avoidkit_settings::RouterSettings;

/// What [`run`] observed.
#[derive(Debug, Clone)]
pub struct DemoReport {
    /// One entry per canvas update, in order.
    pub updates: Vec<UpdateStats>,
    /// Canvas-space handle positions of the line at the end.
    pub final_route: Vec<Point>,
    /// Connections left after playback.
    pub connections: usize,
    /// Commands applied by playback.
    pub replayed: usize,
}

pub fn run(settings: RouterSettings) -> anyhow::Result<DemoReport> {
    let mut canvas = Canvas::with_settings(settings)?;
    let mut log = EventLog::new();
    let mut updates = Vec::new();

    let left = canvas.add_element(Rectangle::new(0.0, 0.0, 40.0, 30.0))?;
    let right = canvas.add_element(Rectangle::new(200.0, 120.0, 40.0, 30.0))?;
    let line = canvas.add_line(&[Point::new(20.0, 15.0), Point::new(220.0, 135.0)])?;
    updates.push(canvas.update_now()?);
    tracing::info!(items = canvas.item_count(), "Scene created");

    log.start_recording();
    let (head, tail) = {
        let l = canvas.line(line)?;
        (l.head().id, l.tail().id)
    };
    log.push(canvas.connect_item(line, head, left, 1, None)?);
    log.push(canvas.connect_item(line, tail, right, 3, None)?);
    updates.push(canvas.update_now()?);
    tracing::info!(route = ?canvas.route_points(line)?, "Line connected");

    canvas.set_matrix(right, Matrix::translation(260.0, 60.0))?;
    updates.push(canvas.update_now()?);
    tracing::info!(route = ?canvas.route_points(line)?, "Box moved");

    let inserted = canvas.split_segment(line, 0, 2)?;
    updates.push(canvas.update_now()?);
    tracing::info!(
        inserted = inserted.len(),
        route = ?canvas.route_points(line)?,
        "Line split"
    );
    log.stop_recording();

    let replayed = log.replay(&mut canvas)?;
    tracing::info!(
        replayed,
        connections = canvas.connections().len(),
        "Recorded connections played back"
    );

    let redraw = canvas.take_redraw_requests();
    tracing::debug!(items = redraw.len(), "Redraw requested");

    Ok(DemoReport {
        updates,
        final_route: canvas.route_points(line)?,
        connections: canvas.connections().len(),
        replayed,
    })
}

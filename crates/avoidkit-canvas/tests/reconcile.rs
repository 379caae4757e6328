use avoidkit_canvas::Line;
use avoidkit_core::Point;
use proptest::prelude::*;

fn route_strategy() -> impl Strategy<Value = Vec<(Point, bool)>> {
    prop::collection::vec((-500.0..500.0f64, -500.0..500.0f64, any::<bool>()), 2..12).prop_map(
        |raw| {
            let n = raw.len();
            raw.into_iter()
                .enumerate()
                .map(|(i, (x, y, cp))| (Point::new(x, y), cp && i > 0 && i + 1 < n))
                .collect()
        },
    )
}

/// A line with `checkpoints` checkpoint handles and a few plain bends.
fn line_with_checkpoints(checkpoints: usize) -> Line {
    let mut points = vec![Point::new(0.0, 0.0)];
    for i in 0..checkpoints * 2 + 1 {
        points.push(Point::new(i as f64, 1.0));
    }
    points.push(Point::new(100.0, 100.0));
    let mut line = Line::from_points(&points).unwrap();
    for k in 0..checkpoints {
        line.set_checkpoint(2 * k + 2, true);
    }
    line
}

proptest! {
    #[test]
    fn reconcile_twice_is_a_no_op(route in route_strategy()) {
        let k = route.iter().filter(|(_, cp)| *cp).count();
        let mut line = line_with_checkpoints(k);
        prop_assert_eq!(line.checkpoint_count(), k);

        line.reconcile(&route).unwrap();
        let snapshot = line.clone();
        prop_assert!(!line.reconcile(&route).unwrap());
        prop_assert_eq!(&line, &snapshot);
        prop_assert_eq!(line.handle_count(), route.len());
    }

    #[test]
    fn checkpoint_handles_are_never_removed(route in route_strategy()) {
        let k = route.iter().filter(|(_, cp)| *cp).count();
        let mut line = line_with_checkpoints(k);
        let ids: Vec<_> = line
            .checkpoint_indices()
            .into_iter()
            .map(|i| line.handles()[i].id)
            .collect();

        line.reconcile(&route).unwrap();

        let after: Vec<_> = line
            .checkpoint_indices()
            .into_iter()
            .map(|i| line.handles()[i].id)
            .collect();
        prop_assert_eq!(after, ids);
        let expected: Vec<Point> = route.iter().filter(|(_, cp)| *cp).map(|(p, _)| *p).collect();
        prop_assert_eq!(line.checkpoints(), expected);
    }
}

use super::*;

fn path(speed: f64, hold: u32) -> Path {
    Path::new(PathId::from("p"), speed, Ease::Linear, hold).unwrap()
}

fn run(path: &mut Path, max: usize) -> Vec<Advance> {
    let mut out = Vec::new();
    for _ in 0..max {
        let step = path.advance();
        out.push(step);
        if matches!(step, Advance::Finished(_)) {
            break;
        }
    }
    out
}

#[test]
fn speed_must_be_positive_and_finite() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            Path::new(PathId::from("p"), bad, Ease::Linear, 0),
            Err(GlyphfxError::InvalidSpeed(_))
        ));
    }
    let mut p = path(1.0, 0);
    assert!(p.set_speed(0.0).is_err());
    p.set_speed(2.5).unwrap();
    assert_eq!(p.speed(), 2.5);
}

#[test]
fn waypoint_ids_default_to_index() {
    let mut p = path(1.0, 0);
    assert_eq!(p.new_waypoint(Coord::new(1, 1), None, None).id, "0");
    assert_eq!(
        p.new_waypoint(Coord::new(2, 2), None, Some("apex")).id,
        "apex"
    );
    assert_eq!(p.new_waypoint(Coord::new(3, 3), None, None).id, "2");
    assert_eq!(
        p.query_waypoint("apex").map(|w| w.coord),
        Some(Coord::new(2, 2))
    );
    assert!(p.query_waypoint("missing").is_none());
}

#[test]
fn begin_requires_waypoints() {
    let mut p = path(1.0, 0);
    assert!(matches!(
        p.begin(Coord::new(1, 1)),
        Err(GlyphfxError::Validation(_))
    ));
}

#[test]
fn straight_segment_takes_ceil_length_over_speed_ticks() {
    let mut p = path(1.0, 0);
    p.new_waypoint(Coord::new(5, 10), None, None);
    p.begin(Coord::new(5, 1)).unwrap();
    assert_eq!(p.total_ticks(), 9);
    assert_eq!(p.total_distance(), 9.0);

    let steps = run(&mut p, 20);
    assert_eq!(steps.len(), 9);
    assert_eq!(steps[8], Advance::Finished(Coord::new(5, 10)));
    let rows: Vec<i32> = steps
        .iter()
        .map(|s| match s {
            Advance::Moving(c) | Advance::Finished(c) => c.row,
        })
        .collect();
    assert_eq!(rows, (2..=10).collect::<Vec<_>>());
    assert_eq!(p.progress_ratio(), 1.0);
    assert_eq!(p.distance_ratio(), 1.0);
}

#[test]
fn fractional_speed_rounds_ticks_up() {
    let mut p = path(0.35, 0);
    p.new_waypoint(Coord::new(1, 4), None, None);
    p.begin(Coord::new(1, 1)).unwrap();
    // 3 / 0.35 = 8.57..
    assert_eq!(p.total_ticks(), 9);
}

#[test]
fn hold_delays_completion() {
    let mut p = path(2.0, 3);
    p.new_waypoint(Coord::new(5, 1), None, None);
    p.begin(Coord::new(1, 1)).unwrap();
    assert_eq!(p.total_ticks(), 2);
    let steps = run(&mut p, 20);
    assert_eq!(steps.len(), 2 + 3);
    assert!(
        steps[..4]
            .iter()
            .all(|s| matches!(s, Advance::Moving(_)))
    );
    assert_eq!(steps[4], Advance::Finished(Coord::new(5, 1)));
}

#[test]
fn zero_length_path_finishes_on_first_step() {
    let mut p = path(1.0, 0);
    p.new_waypoint(Coord::new(3, 3), None, None);
    p.begin(Coord::new(3, 3)).unwrap();
    assert_eq!(p.total_ticks(), 0);
    assert_eq!(p.advance(), Advance::Finished(Coord::new(3, 3)));
    assert_eq!(p.progress_ratio(), 1.0);
}

#[test]
fn zero_length_segments_are_skipped() {
    let mut p = path(1.0, 0);
    p.new_waypoint(Coord::new(1, 1), None, None);
    p.new_waypoint(Coord::new(1, 3), None, None);
    p.begin(Coord::new(1, 1)).unwrap();
    assert_eq!(p.total_ticks(), 2);
    let steps = run(&mut p, 10);
    assert_eq!(
        steps,
        vec![
            Advance::Moving(Coord::new(1, 2)),
            Advance::Finished(Coord::new(1, 3))
        ]
    );
}

#[test]
fn curved_segment_uses_control_polygon_length() {
    let mut p = path(1.0, 0);
    p.new_waypoint(Coord::new(6, 0), Some(Coord::new(3, 4)), None);
    p.begin(Coord::new(0, 0)).unwrap();
    assert_eq!(p.total_ticks(), 10);
    let steps = run(&mut p, 20);
    assert_eq!(steps.len(), 10);
    assert_eq!(steps[4], Advance::Moving(Coord::new(3, 2)));
    assert_eq!(steps[9], Advance::Finished(Coord::new(6, 0)));
}

#[test]
fn ratios_track_progress() {
    let mut p = path(1.0, 0);
    p.new_waypoint(Coord::new(1, 5), None, None);
    p.begin(Coord::new(1, 1)).unwrap();
    assert_eq!(p.progress_ratio(), 0.0);
    assert_eq!(p.distance_ratio(), 0.0);
    p.advance();
    assert_eq!(p.ticks_moved(), 1);
    assert_eq!(p.progress_ratio(), 0.25);
    assert_eq!(p.distance_travelled(), 1.0);
    assert_eq!(p.distance_ratio(), 0.25);
}

#[test]
fn begin_rewinds_state() {
    let mut p = path(1.0, 1);
    p.new_waypoint(Coord::new(1, 3), None, None);
    p.begin(Coord::new(1, 1)).unwrap();
    run(&mut p, 10);
    p.begin(Coord::new(1, 1)).unwrap();
    assert_eq!(p.ticks_moved(), 0);
    assert_eq!(run(&mut p, 10).len(), 3);
}

use super::*;
use crate::engine::events::EventSource;

fn straight(motion: &mut Motion, id: &str, to: Coord, speed: f64) {
    motion
        .new_path(speed, Ease::Linear, 0, Some(id))
        .unwrap()
        .new_waypoint(to, None, None);
}

#[test]
fn path_ids_are_sequential_and_unique() {
    let mut m = Motion::new(Coord::new(1, 1));
    assert_eq!(m.new_path(1.0, Ease::Linear, 0, None).unwrap().id().0, "0");
    m.new_path(1.0, Ease::Linear, 0, Some("1")).unwrap();
    // Auto ids skip ids that were taken explicitly.
    assert_eq!(m.new_path(1.0, Ease::Linear, 0, None).unwrap().id().0, "2");
    assert!(matches!(
        m.new_path(1.0, Ease::Linear, 0, Some("0")),
        Err(GlyphfxError::Validation(_))
    ));
    assert!(matches!(
        m.new_path(0.0, Ease::Linear, 0, None),
        Err(GlyphfxError::InvalidSpeed(_))
    ));
    assert_eq!(m.paths().count(), 3);
}

#[test]
fn activation_errors() {
    let mut m = Motion::new(Coord::new(1, 1));
    assert!(matches!(
        m.activate_path("missing"),
        Err(GlyphfxError::PathNotFound(_))
    ));
    m.new_path(1.0, Ease::Linear, 0, Some("empty")).unwrap();
    assert!(matches!(
        m.activate_path("empty"),
        Err(GlyphfxError::Validation(_))
    ));
    assert!(m.movement_is_complete());
}

#[test]
fn step_moves_then_completes() {
    let mut m = Motion::new(Coord::new(5, 1));
    straight(&mut m, "up", Coord::new(5, 10), 1.0);
    let occ = m.activate_path("up").unwrap();
    assert_eq!(occ.event, Event::PathActivated);
    assert_eq!(occ.source, EventSource::path("up"));
    assert!(!m.movement_is_complete());

    assert!(m.step().is_none());
    assert_eq!(m.current_coord(), Coord::new(5, 2));
    assert_eq!(m.previous_coord(), Some(Coord::new(5, 1)));

    let mut last = None;
    for _ in 0..8 {
        last = m.step();
    }
    assert_eq!(last.map(|o| o.event), Some(Event::PathComplete));
    assert_eq!(m.current_coord(), Coord::new(5, 10));
    assert!(m.movement_is_complete());
    assert!(m.step().is_none());
}

#[test]
fn reactivation_starts_from_current_coord() {
    let mut m = Motion::new(Coord::new(1, 1));
    straight(&mut m, "right", Coord::new(4, 1), 1.0);
    m.activate_path("right").unwrap();
    m.step();
    m.activate_path("right").unwrap();
    assert_eq!(m.active_path().map(Path::total_ticks), Some(2));
}

#[test]
fn deactivate_only_clears_matching_path() {
    let mut m = Motion::new(Coord::new(1, 1));
    straight(&mut m, "a", Coord::new(1, 5), 1.0);
    m.activate_path("a").unwrap();
    assert!(!m.deactivate_path("b"));
    assert!(m.deactivate_path("a"));
    assert!(m.movement_is_complete());
    assert!(m.step().is_none());
}

#[test]
fn looping_path_restarts_instead_of_completing() {
    let mut m = Motion::new(Coord::new(1, 1));
    let p = m.new_path(1.0, Ease::Linear, 0, Some("loop")).unwrap();
    p.is_looping = true;
    p.new_waypoint(Coord::new(1, 3), None, None);
    p.new_waypoint(Coord::new(1, 1), None, None);
    m.activate_path("loop").unwrap();

    let events: Vec<Event> = (0..12).filter_map(|_| m.step()).map(|o| o.event).collect();
    assert_eq!(events, vec![Event::PathActivated; 3]);
    assert!(!m.movement_is_complete());
}

#[test]
fn single_waypoint_loop_holds_at_its_waypoint() {
    let mut m = Motion::new(Coord::new(1, 1));
    let p = m.new_path(1.0, Ease::Linear, 0, Some("loop")).unwrap();
    p.is_looping = true;
    p.new_waypoint(Coord::new(1, 3), None, None);
    m.activate_path("loop").unwrap();

    let events: Vec<Option<Event>> = (0..10).map(|_| m.step().map(|o| o.event)).collect();
    assert!(events.iter().all(Option::is_none), "{events:?}");
    assert_eq!(m.current_coord(), Coord::new(1, 3));
    assert!(!m.movement_is_complete());
}

#[test]
fn set_coordinate_jumps() {
    let mut m = Motion::new(Coord::new(1, 1));
    m.set_coordinate(Coord::new(7, 7));
    assert_eq!(m.current_coord(), Coord::new(7, 7));
    assert_eq!(m.previous_coord(), Some(Coord::new(1, 1)));
}

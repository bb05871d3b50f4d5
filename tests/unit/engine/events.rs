use super::*;

#[test]
fn actions_run_in_registration_order() {
    let mut h = EventHandler::new();
    h.register_event(
        Event::PathComplete,
        EventSource::path("a"),
        Action::SetLayer(1),
    )
    .unwrap();
    h.register_event(
        Event::PathComplete,
        EventSource::path("a"),
        Action::ActivatePath(PathId::from("b")),
    )
    .unwrap();
    let occ = Occurrence::path(Event::PathComplete, &PathId::from("a"));
    assert_eq!(
        h.actions_for(&occ),
        &[Action::SetLayer(1), Action::ActivatePath(PathId::from("b"))]
    );
    assert_eq!(h.len(), 2);
}

#[test]
fn unbound_occurrences_have_no_actions() {
    let h = EventHandler::new();
    assert!(h.is_empty());
    let occ = Occurrence::scene(Event::SceneComplete, &SceneId::from("s"));
    assert!(h.actions_for(&occ).is_empty());
}

#[test]
fn bindings_are_keyed_by_event_and_source() {
    let mut h = EventHandler::new();
    h.register_event(
        Event::PathActivated,
        EventSource::path("a"),
        Action::SetLayer(2),
    )
    .unwrap();
    let other_event = Occurrence::path(Event::PathComplete, &PathId::from("a"));
    let other_source = Occurrence::path(Event::PathActivated, &PathId::from("b"));
    assert!(h.actions_for(&other_event).is_empty());
    assert!(h.actions_for(&other_source).is_empty());
}

#[test]
fn event_kind_must_match_source_kind() {
    let mut h = EventHandler::new();
    assert!(matches!(
        h.register_event(
            Event::SceneComplete,
            EventSource::path("a"),
            Action::SetLayer(0)
        ),
        Err(GlyphfxError::Validation(_))
    ));
    assert!(
        h.register_event(
            Event::PathActivated,
            EventSource::scene("s"),
            Action::SetLayer(0)
        )
        .is_err()
    );
    assert!(h.is_empty());
}

use super::*;
use crate::color::color::Rgb;

fn scene(looping: bool) -> Scene {
    Scene::new(SceneId::from("s"), None, looping)
}

fn drain(scene: &mut Scene, steps: usize) -> Vec<String> {
    (0..steps)
        .filter_map(|_| scene.next_visual())
        .map(|v| v.symbol)
        .collect()
}

#[test]
fn add_frame_rejects_zero_duration() {
    let mut s = scene(false);
    let err = s.add_frame("x", 0, None).unwrap_err();
    assert!(matches!(err, GlyphfxError::InvalidDuration(_)));
    assert!(s.frames().is_empty());
}

#[test]
fn frames_are_held_for_their_duration() {
    let mut s = scene(false);
    s.add_frame("a", 2, None).unwrap();
    s.add_frame("b", 1, None).unwrap();
    assert_eq!(drain(&mut s, 3), vec!["a", "a", "b"]);
    assert!(s.is_exhausted());
    assert_eq!(s.played_frames(), 2);
    assert!(s.next_visual().is_none());
}

#[test]
fn looping_scene_recycles_frames() {
    let mut s = scene(true);
    s.add_frame("a", 1, None).unwrap();
    s.add_frame("b", 1, None).unwrap();
    assert_eq!(drain(&mut s, 5), vec!["a", "b", "a", "b", "a"]);
    assert!(!s.is_exhausted());
}

#[test]
fn reset_restores_original_order_and_is_idempotent() {
    let mut s = scene(false);
    for sym in ["1", "2", "3"] {
        s.add_frame(sym, 1, None).unwrap();
    }
    drain(&mut s, 2);
    s.reset();
    let after_one = (s.played_frames(), s.current_visual().cloned());
    s.reset();
    assert_eq!((s.played_frames(), s.current_visual().cloned()), after_one);
    assert_eq!(drain(&mut s, 3), vec!["1", "2", "3"]);
}

#[test]
fn gradient_frames_cycle_symbols() {
    let black = Color::Rgb(Rgb::new(0, 0, 0));
    let white = Color::Rgb(Rgb::new(255, 255, 255));
    let g = Gradient::new(&[black, white], &[2]).unwrap();
    let mut s = scene(false);
    s.apply_gradient_to_symbols(&g, &["x", "y"], 3).unwrap();

    assert_eq!(s.frames().len(), g.spectrum().len());
    let symbols: Vec<&str> = s.frames().iter().map(Frame::symbol).collect();
    assert_eq!(symbols, vec!["x", "y", "x", "y"]);
    assert!(s.frames().iter().all(|f| f.duration() == 3));
    assert_eq!(s.frames()[0].color(), Some(black));
    assert_eq!(s.frames()[3].color(), Some(white));
}

#[test]
fn gradient_requires_a_symbol() {
    let g = Gradient::new(&[Color::Xterm(1)], &[]).unwrap();
    let mut s = scene(false);
    let empty: [&str; 0] = [];
    assert!(matches!(
        s.apply_gradient_to_symbols(&g, &empty, 1),
        Err(GlyphfxError::Validation(_))
    ));
}

#[test]
fn synced_frame_follows_ratio() {
    let mut s = Scene::new(SceneId::from("s"), Some(SyncMetric::Step), false);
    for sym in ["a", "b", "c", "d", "e"] {
        s.add_frame(sym, 1, None).unwrap();
    }
    let at = |r: f64| s.synced_visual(r).map(|v| v.symbol);
    assert_eq!(at(0.0).as_deref(), Some("a"));
    assert_eq!(at(0.5).as_deref(), Some("c"));
    assert_eq!(at(1.0).as_deref(), Some("e"));
    assert_eq!(at(4.0).as_deref(), Some("e"));
    assert_eq!(s.last_visual().map(|v| v.symbol).as_deref(), Some("e"));
}

#[test]
fn styled_frames_keep_their_modes() {
    let mut scene = Scene::new(SceneId::from("s"), None, false);
    let bold = Style {
        bold: true,
        ..Style::default()
    };
    scene
        .add_styled_frame(Visual::new("*", None).with_style(bold), 2)
        .unwrap();
    scene.add_frame("+", 1, None).unwrap();
    assert_eq!(scene.frames()[0].style(), bold);
    assert!(scene.frames()[1].style().is_plain());
    assert!(matches!(
        scene.add_styled_frame(Visual::new("-", None), 0),
        Err(GlyphfxError::InvalidDuration(_))
    ));
    assert_eq!(scene.next_visual().map(|v| v.style), Some(bold));
}

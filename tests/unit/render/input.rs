use super::*;

fn glyph(s: &str, column: i32, row: i32) -> (String, Coord) {
    (s.to_owned(), Coord::new(column, row))
}

#[test]
fn rows_count_up_from_the_last_line() {
    let d = decompose_input("ab\ncd", 80, &TerminalConfig::default());
    assert_eq!((d.width, d.height), (2, 2));
    assert_eq!(
        d.glyphs,
        vec![
            glyph("a", 1, 2),
            glyph("b", 2, 2),
            glyph("c", 1, 1),
            glyph("d", 2, 1)
        ]
    );
}

#[test]
fn whitespace_is_skipped_but_keeps_its_column() {
    let d = decompose_input("a b  ", 80, &TerminalConfig::default());
    assert_eq!(d.width, 3);
    assert_eq!(d.glyphs, vec![glyph("a", 1, 1), glyph("b", 3, 1)]);
}

#[test]
fn tabs_expand_to_configured_width() {
    let config = TerminalConfig {
        tab_width: 2,
        ..Default::default()
    };
    let d = decompose_input("\tx", 80, &config);
    assert_eq!(d.glyphs, vec![glyph("x", 3, 1)]);
    let d = decompose_input("\tx", 80, &TerminalConfig::default());
    assert_eq!(d.glyphs, vec![glyph("x", 5, 1)]);
}

#[test]
fn trailing_blank_lines_are_dropped_inner_ones_kept() {
    let d = decompose_input("a\n\n\n", 80, &TerminalConfig::default());
    assert_eq!(d.height, 1);
    let d = decompose_input("a\n\nb", 80, &TerminalConfig::default());
    assert_eq!(d.height, 3);
    assert_eq!(d.glyphs, vec![glyph("a", 1, 3), glyph("b", 1, 1)]);
}

#[test]
fn long_lines_wrap_or_truncate() {
    let wrapped = decompose_input("abcdef", 4, &TerminalConfig::default());
    assert_eq!((wrapped.width, wrapped.height), (4, 2));
    assert!(wrapped.glyphs.contains(&glyph("e", 1, 1)));
    assert!(wrapped.glyphs.contains(&glyph("d", 4, 2)));

    let config = TerminalConfig {
        no_wrap: true,
        ..Default::default()
    };
    let truncated = decompose_input("abcdef", 4, &config);
    assert_eq!((truncated.width, truncated.height), (4, 1));
    assert_eq!(truncated.glyphs.len(), 4);
}

#[test]
fn empty_input_has_no_glyphs() {
    let d = decompose_input("", 80, &TerminalConfig::default());
    assert_eq!(d, DecomposedInput::default());
}

#[test]
fn config_defaults_fill_missing_fields() {
    let c: TerminalConfig = serde_json::from_str(r#"{"xterm_colors": true}"#).unwrap();
    assert!(c.xterm_colors);
    assert_eq!(c.tab_width, 4);
    assert_eq!(c.frame_rate, 100);
}

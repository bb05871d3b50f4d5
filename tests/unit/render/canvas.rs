use super::*;
use crate::color::color::{Color, Rgb};

fn canvas(text: &str) -> Canvas {
    Canvas::from_input(text, &TerminalConfig::default(), (80, 24))
}

fn show_all(c: &mut Canvas) {
    for id in c.ids() {
        c.set_character_visibility(id, true);
    }
}

#[test]
fn from_input_sizes_canvas_to_text() {
    let c = canvas("ab\ncd");
    assert_eq!((c.top, c.right, c.bottom, c.left), (2, 2, 1, 1));
    assert_eq!(c.len(), 4);
    assert!(c.characters().iter().all(|ch| !ch.is_visible()));
    assert_eq!(c[CharacterId(2)].input_coord(), Coord::new(1, 1));
}

#[test]
fn tall_input_is_clipped_to_terminal() {
    let c = Canvas::from_input("1\n2\n3\n4\n5", &TerminalConfig::default(), (80, 3));
    assert_eq!(c.top, 2);
    let symbols: Vec<&str> = c.characters().iter().map(|ch| ch.input_symbol()).collect();
    assert_eq!(symbols, vec!["4", "5"]);
}

#[test]
fn empty_input_still_has_one_cell() {
    let c = canvas("");
    assert!(c.is_empty());
    assert_eq!((c.top, c.right), (1, 1));
}

#[test]
fn center_and_bounds() {
    let c = Canvas::new(3, 5, &TerminalConfig::default());
    assert_eq!(c.center(), Coord::new(3, 2));
    assert!(c.contains(Coord::new(5, 3)));
    assert!(!c.contains(Coord::new(6, 3)));
    assert!(!c.contains(Coord::new(1, 0)));
    assert_eq!(c.prep_output_area(), "\n\n\n");
}

#[test]
fn rasterize_places_visible_characters_top_row_first() {
    let mut c = canvas("ab\ncd");
    assert_eq!(c.rasterize(false), vec!["  ", "  "]);
    show_all(&mut c);
    assert_eq!(c.rasterize(false), vec!["ab", "cd"]);
    c.set_character_visibility(CharacterId(1), false);
    assert_eq!(c.rasterize(false), vec!["a ", "cd"]);
}

#[test]
fn characters_outside_the_canvas_are_not_drawn() {
    let mut c = canvas("ab");
    show_all(&mut c);
    c[CharacterId(0)].set_coordinate(Coord::new(9, 9));
    assert_eq!(c.rasterize(false), vec![" b"]);
}

#[test]
fn higher_layer_wins_shared_cell() {
    let mut c = canvas("ab");
    show_all(&mut c);
    c[CharacterId(1)].set_coordinate(Coord::new(1, 1));
    assert_eq!(c.rasterize(false), vec!["b "]);
    c[CharacterId(0)].set_layer(1);
    assert_eq!(c.rasterize(false), vec!["a "]);
}

#[test]
fn output_string_rewrites_only_changed_rows() {
    let mut c = canvas("ab\ncd");
    show_all(&mut c);
    let first = c.get_formatted_output_string();
    assert_eq!(
        first,
        "\x1b7\x1b[2A\x1b[1Gab\x1b8\x1b[1A\x1b[1Gcd\x1b8"
    );
    assert_eq!(c.get_formatted_output_string(), "");

    c.set_character_visibility(CharacterId(3), false);
    assert_eq!(c.get_formatted_output_string(), "\x1b7\x1b[1A\x1b[1Gc \x1b8");
}

#[test]
fn colors_render_true_color_or_palette() {
    let red = Color::Rgb(Rgb::new(255, 0, 0));
    for (xterm_colors, expected) in [(false, "\x1b[38;2;255;0;0m"), (true, "\x1b[38;5;9m")] {
        let config = TerminalConfig {
            xterm_colors,
            ..Default::default()
        };
        let mut c = Canvas::from_input("a", &config, (80, 24));
        let id = CharacterId(0);
        c[id]
            .animator
            .new_scene(Some("s"), None, false)
            .unwrap()
            .add_frame("a", 1, Some(red))
            .unwrap();
        c[id].activate_scene("s").unwrap();
        c.set_character_visibility(id, true);
        let out = c.get_formatted_output_string();
        assert!(out.contains(expected), "{out:?}");
        assert!(out.contains("a\x1b[0m"));
    }
}

#[test]
fn active_requires_visibility() {
    let mut c = canvas("a");
    let id = CharacterId(0);
    c[id]
        .motion
        .new_path(1.0, crate::Ease::Linear, 0, Some("p"))
        .unwrap()
        .new_waypoint(Coord::new(1, 1), None, None);
    c[id].set_coordinate(Coord::new(1, 5));
    c[id].activate_path("p").unwrap();
    assert!(c[id].is_active());
    assert!(!c.is_character_active(id));
    c.set_character_visibility(id, true);
    assert!(c.is_character_active(id));
    assert!(c.character(CharacterId(5)).is_none());
}

#[test]
fn characters_group_by_row_column_and_diagonal() {
    // a b
    // c
    let mut c = canvas("ab\nc");
    let ids = |v: &[&[usize]]| -> Vec<Vec<CharacterId>> {
        v.iter()
            .map(|g| g.iter().copied().map(CharacterId).collect())
            .collect()
    };
    let cases: [(CharacterGroup, &[&[usize]]); 8] = [
        (CharacterGroup::RowTopToBottom, &[&[0, 1], &[2]]),
        (CharacterGroup::RowBottomToTop, &[&[2], &[0, 1]]),
        (CharacterGroup::ColumnLeftToRight, &[&[0, 2], &[1]]),
        (CharacterGroup::ColumnRightToLeft, &[&[1], &[0, 2]]),
        (CharacterGroup::DiagonalTopLeftToBottomRight, &[&[0], &[1, 2]]),
        (CharacterGroup::DiagonalBottomRightToTopLeft, &[&[1, 2], &[0]]),
        (CharacterGroup::DiagonalBottomLeftToTopRight, &[&[2], &[0], &[1]]),
        (CharacterGroup::DiagonalTopRightToBottomLeft, &[&[1], &[0], &[2]]),
    ];
    for (grouping, expected) in cases {
        assert_eq!(c.get_characters_grouped(grouping, false), ids(expected), "{grouping:?}");
    }
    assert_eq!(c.len(), 3);
}

#[test]
fn fill_characters_cover_empty_cells_once() {
    let mut c = canvas("ab\nc");
    let rows = c.get_characters_grouped(CharacterGroup::RowTopToBottom, true);
    assert_eq!(
        rows,
        vec![
            vec![CharacterId(0), CharacterId(1)],
            vec![CharacterId(2), CharacterId(3)]
        ]
    );
    let fill = &c[CharacterId(3)];
    assert!(fill.is_fill_character());
    assert!(!fill.is_visible());
    assert_eq!(fill.input_symbol(), " ");
    assert_eq!(fill.input_coord(), Coord::new(2, 1));

    assert_eq!(c.add_fill_characters(), 0);
    assert_eq!(c.len(), 4);
    // Without fill_chars the fillers stay out of the groups.
    assert_eq!(
        c.get_characters_grouped(CharacterGroup::RowBottomToTop, false),
        vec![vec![CharacterId(2)], vec![CharacterId(0), CharacterId(1)]]
    );
}

use super::*;
use crate::color::color::Rgb;

#[test]
fn cursor_sequences() {
    assert_eq!(save_cursor(), "\x1b7");
    assert_eq!(restore_cursor(), "\x1b8");
    assert_eq!(move_cursor_up(3), "\x1b[3A");
    assert_eq!(move_cursor_to_column(1), "\x1b[1G");
    assert_eq!(move_cursor_to_column(12), "\x1b[12G");
}

#[test]
fn foreground_colors() {
    let red = Color::Rgb(Rgb::new(255, 0, 0));
    assert_eq!(fg(red, false), "\x1b[38;2;255;0;0m");
    assert_eq!(fg(red, true), "\x1b[38;5;9m");
    assert_eq!(fg(Color::Xterm(200), false), "\x1b[38;5;200m");
}

#[test]
fn visuals_reset_after_colored_symbol() {
    let plain = Visual::new("a", None);
    assert_eq!(format_visual(&plain, false), "a");
    let colored = Visual::new("b", Some(Color::Xterm(4)));
    assert_eq!(format_visual(&colored, false), "\x1b[38;5;4mb\x1b[0m");
}

#[test]
fn graphic_modes_precede_the_color() {
    let style = Style {
        bold: true,
        underline: true,
        strike: true,
        ..Style::default()
    };
    assert_eq!(graphic_modes(style), "\x1b[1m\x1b[4m\x1b[9m");
    assert_eq!(graphic_modes(Style::default()), "");

    let styled = Visual::new("c", Some(Color::Xterm(4))).with_style(style);
    assert_eq!(
        format_visual(&styled, false),
        "\x1b[1m\x1b[4m\x1b[9m\x1b[38;5;4mc\x1b[0m"
    );
    let uncolored = Visual::new("d", None).with_style(Style {
        reverse: true,
        ..Style::default()
    });
    assert_eq!(format_visual(&uncolored, false), "\x1b[7md\x1b[0m");
}

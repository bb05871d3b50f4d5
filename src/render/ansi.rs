//! ANSI escape sequences used by the canvas, built from `crossterm` commands.

use crossterm::{
    Command,
    cursor::{MoveToColumn, MoveUp, RestorePosition, SavePosition},
    style::{self, Attribute, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::{
    animation::scene::{Style, Visual},
    color::color::Color,
};

fn ansi(cmd: impl Command) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = cmd.write_ansi(&mut out);
    out
}

/// Save the cursor position (`ESC 7`).
pub fn save_cursor() -> String {
    ansi(SavePosition)
}

/// Restore the saved cursor position (`ESC 8`).
pub fn restore_cursor() -> String {
    ansi(RestorePosition)
}

/// Move the cursor up `rows` lines.
pub fn move_cursor_up(rows: u16) -> String {
    ansi(MoveUp(rows))
}

/// Move to a 1-based column.
pub fn move_cursor_to_column(column: u16) -> String {
    ansi(MoveToColumn(column.saturating_sub(1)))
}

/// Foreground color sequence; with `xterm_only`, RGB colors fall back to the nearest palette index.
pub fn fg(color: Color, xterm_only: bool) -> String {
    let c = match (color, xterm_only) {
        (Color::Xterm(i), _) => style::Color::AnsiValue(i),
        (Color::Rgb(_), true) => style::Color::AnsiValue(color.to_xterm()),
        (Color::Rgb(rgb), false) => style::Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        },
    };
    ansi(SetForegroundColor(c))
}

/// SGR sequences for every mode set in `style`.
pub fn graphic_modes(style: Style) -> String {
    [
        (style.bold, Attribute::Bold),
        (style.dim, Attribute::Dim),
        (style.italic, Attribute::Italic),
        (style.underline, Attribute::Underlined),
        (style.blink, Attribute::SlowBlink),
        (style.reverse, Attribute::Reverse),
        (style.hidden, Attribute::Hidden),
        (style.strike, Attribute::CrossedOut),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .map(|(_, attr)| ansi(SetAttribute(attr)))
    .collect()
}

/// Symbol wrapped in its mode and color sequences and a reset, or the bare symbol when plain.
pub fn format_visual(visual: &Visual, xterm_only: bool) -> String {
    if visual.color.is_none() && visual.style.is_plain() {
        return visual.symbol.clone();
    }
    let mut out = graphic_modes(visual.style);
    if let Some(color) = visual.color {
        out.push_str(&fg(color, xterm_only));
    }
    out.push_str(&visual.symbol);
    out.push_str(&ansi(ResetColor));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/ansi.rs"]
mod tests;

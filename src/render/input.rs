use crate::foundation::core::Coord;

/// Terminal-level settings shared by every effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Spaces per tab character.
    pub tab_width: usize,
    /// Downgrade RGB colors to the nearest xterm-256 index.
    pub xterm_colors: bool,
    /// Truncate instead of wrapping lines wider than the terminal.
    pub no_wrap: bool,
    /// Target frames per second for the driver; `0` means unthrottled.
    pub frame_rate: u32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            xterm_colors: false,
            no_wrap: false,
            frame_rate: 100,
        }
    }
}

/// Input text split into positioned glyphs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecomposedInput {
    /// One entry per non-space glyph, top-left first.
    pub glyphs: Vec<(String, Coord)>,
    /// Widest line after tab expansion and wrapping.
    pub width: i32,
    /// Number of lines, trailing blank lines excluded.
    pub height: i32,
}

/// Split `text` into glyphs with bottom-up row coordinates.
///
/// Tabs are expanded, lines wider than `max_width` are wrapped (or truncated with `no_wrap`), and
/// trailing blank lines are dropped. Row 1 is the last line of the input.
pub fn decompose_input(text: &str, max_width: usize, config: &TerminalConfig) -> DecomposedInput {
    let tab = " ".repeat(config.tab_width);
    let max_width = max_width.max(1);

    let mut lines: Vec<Vec<char>> = Vec::new();
    for raw in text.lines() {
        let line: Vec<char> = raw.replace('\t', &tab).trim_end().chars().collect();
        if line.len() <= max_width {
            lines.push(line);
        } else if config.no_wrap {
            lines.push(line[..max_width].to_vec());
        } else {
            lines.extend(line.chunks(max_width).map(<[char]>::to_vec));
        }
    }
    while lines.last().is_some_and(Vec::is_empty) {
        lines.pop();
    }

    let height = lines.len() as i32;
    let width = lines.iter().map(Vec::len).max().unwrap_or(0) as i32;
    let mut glyphs = Vec::new();
    for (row_index, line) in lines.iter().enumerate() {
        let row = height - row_index as i32;
        for (col_index, ch) in line.iter().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            glyphs.push((ch.to_string(), Coord::new(col_index as i32 + 1, row)));
        }
    }

    DecomposedInput {
        glyphs,
        width,
        height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/input.rs"]
mod tests;

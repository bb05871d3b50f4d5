use std::{
    collections::{BTreeMap, HashSet},
    ops::{Index, IndexMut},
};

use crate::{
    engine::character::{CharacterId, EffectCharacter},
    foundation::core::Coord,
    render::ansi,
    render::input::{TerminalConfig, decompose_input},
};

/// Ordering of character groups returned by [`Canvas::get_characters_grouped`].
///
/// Rows and columns group characters sharing an input row or column. Diagonals running from
/// bottom-left to top-right share `row + column`; the others share `column - row`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum CharacterGroup {
    /// Columns, leftmost first.
    ColumnLeftToRight,
    /// Columns, rightmost first.
    ColumnRightToLeft,
    /// Rows, top row first.
    RowTopToBottom,
    /// Rows, bottom row first.
    RowBottomToTop,
    /// Diagonals parallel to the top-left to bottom-right line, top-left corner first.
    DiagonalTopLeftToBottomRight,
    /// Diagonals parallel to the top-left to bottom-right line, bottom-right corner first.
    DiagonalBottomRightToTopLeft,
    /// Diagonals parallel to the bottom-left to top-right line, bottom-left corner first.
    DiagonalBottomLeftToTopRight,
    /// Diagonals parallel to the bottom-left to top-right line, top-right corner first.
    DiagonalTopRightToBottomLeft,
}

impl CharacterGroup {
    /// Key shared by every member of a group, and whether keys are visited in descending order.
    fn key(self, coord: Coord) -> (i32, bool) {
        match self {
            Self::ColumnLeftToRight => (coord.column, false),
            Self::ColumnRightToLeft => (coord.column, true),
            Self::RowTopToBottom => (coord.row, true),
            Self::RowBottomToTop => (coord.row, false),
            Self::DiagonalTopLeftToBottomRight => (coord.column - coord.row, false),
            Self::DiagonalBottomRightToTopLeft => (coord.column - coord.row, true),
            Self::DiagonalBottomLeftToTopRight => (coord.column + coord.row, false),
            Self::DiagonalTopRightToBottomLeft => (coord.column + coord.row, true),
        }
    }
}

/// Bounded grid that owns every character of an effect and rasterizes the visible ones.
///
/// Rows are 1-based from the bottom; `bottom` and `left` are always 1.
#[derive(Clone, Debug)]
pub struct Canvas {
    /// Highest row.
    pub top: i32,
    /// Rightmost column.
    pub right: i32,
    /// Lowest row, always 1.
    pub bottom: i32,
    /// Leftmost column, always 1.
    pub left: i32,
    characters: Vec<EffectCharacter>,
    has_fill: bool,
    xterm_colors: bool,
    previous_rows: Vec<String>,
}

impl Canvas {
    /// Empty `right x top` canvas.
    pub fn new(top: i32, right: i32, config: &TerminalConfig) -> Self {
        Self {
            top: top.max(1),
            right: right.max(1),
            bottom: 1,
            left: 1,
            characters: Vec::new(),
            has_fill: false,
            xterm_colors: config.xterm_colors,
            previous_rows: Vec::new(),
        }
    }

    /// Canvas sized to `input`, clipped to a terminal of `(columns, rows)`.
    ///
    /// One line is reserved for the cursor, so at most `rows - 1` input lines are kept.
    #[tracing::instrument(skip(input, config))]
    pub fn from_input(input: &str, config: &TerminalConfig, terminal_size: (u16, u16)) -> Self {
        let (columns, rows) = terminal_size;
        let decomposed = decompose_input(input, usize::from(columns), config);
        let top = decomposed.height.min(i32::from(rows) - 1);
        let mut canvas = Self::new(top, decomposed.width, config);
        for (symbol, coord) in decomposed.glyphs {
            if coord.row <= canvas.top {
                canvas.add_character(symbol, coord);
            }
        }
        tracing::debug!(
            top = canvas.top,
            right = canvas.right,
            characters = canvas.len(),
            "canvas built"
        );
        canvas
    }

    /// Add a character at `input_coord`. It starts hidden.
    pub fn add_character(&mut self, symbol: impl Into<String>, input_coord: Coord) -> CharacterId {
        let id = CharacterId(self.characters.len());
        self.characters
            .push(EffectCharacter::new(id, symbol, input_coord));
        id
    }

    /// Number of characters, fill characters included.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// True when the canvas holds no characters.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Ids of every character, in input order. Fill characters come last.
    pub fn ids(&self) -> Vec<CharacterId> {
        (0..self.characters.len()).map(CharacterId).collect()
    }

    /// Character `id`, if it exists.
    pub fn character(&self, id: CharacterId) -> Option<&EffectCharacter> {
        self.characters.get(id.0)
    }

    /// Mutable character `id`, if it exists.
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut EffectCharacter> {
        self.characters.get_mut(id.0)
    }

    /// Every character, in id order.
    pub fn characters(&self) -> &[EffectCharacter] {
        &self.characters
    }

    /// Every character, mutably, in id order.
    pub fn characters_mut(&mut self) -> &mut [EffectCharacter] {
        &mut self.characters
    }

    /// Add a hidden blank character on every canvas cell no input glyph occupies.
    ///
    /// Runs once; later calls return 0. Returns the number of characters added.
    pub fn add_fill_characters(&mut self) -> usize {
        if self.has_fill {
            return 0;
        }
        self.has_fill = true;
        let occupied: HashSet<Coord> = self.characters.iter().map(|c| c.input_coord()).collect();
        let before = self.characters.len();
        for row in (self.bottom..=self.top).rev() {
            for column in self.left..=self.right {
                let coord = Coord::new(column, row);
                if occupied.contains(&coord) {
                    continue;
                }
                let id = self.add_character(" ", coord);
                self[id].mark_fill();
            }
        }
        self.characters.len() - before
    }

    /// Character ids grouped by input row, column or diagonal, groups ordered by `grouping`.
    ///
    /// Rows list their members left to right, columns and diagonals top to bottom. With
    /// `fill_chars`, fill characters are added first (see [`Canvas::add_fill_characters`]) and
    /// included; otherwise they are left out.
    pub fn get_characters_grouped(
        &mut self,
        grouping: CharacterGroup,
        fill_chars: bool,
    ) -> Vec<Vec<CharacterId>> {
        if fill_chars {
            self.add_fill_characters();
        }
        let mut groups: BTreeMap<i32, Vec<(Coord, CharacterId)>> = BTreeMap::new();
        let mut descending = false;
        for c in &self.characters {
            if c.is_fill_character() && !fill_chars {
                continue;
            }
            let (key, desc) = grouping.key(c.input_coord());
            descending = desc;
            groups.entry(key).or_default().push((c.input_coord(), c.id()));
        }
        let mut ordered: Vec<Vec<CharacterId>> = groups
            .into_values()
            .map(|mut members| {
                // Top to bottom, then left to right.
                members.sort_by_key(|(coord, _)| (-coord.row, coord.column));
                members.into_iter().map(|(_, id)| id).collect()
            })
            .collect();
        if descending {
            ordered.reverse();
        }
        ordered
    }

    /// Middle cell of the canvas.
    pub fn center(&self) -> Coord {
        Coord::new(
            ((self.left + self.right) / 2).max(1),
            ((self.bottom + self.top) / 2).max(1),
        )
    }

    /// Whether `coord` lies inside the canvas.
    pub fn contains(&self, coord: Coord) -> bool {
        (self.left..=self.right).contains(&coord.column)
            && (self.bottom..=self.top).contains(&coord.row)
    }

    /// Show or hide character `id`. Hidden characters are not rasterized.
    pub fn set_character_visibility(&mut self, id: CharacterId, visible: bool) {
        if let Some(c) = self.character_mut(id) {
            c.set_visible(visible);
        }
    }

    /// Visible and still moving or playing a non-looping scene.
    pub fn is_character_active(&self, id: CharacterId) -> bool {
        self.character(id).is_some_and(|c| c.is_visible() && c.is_active())
    }

    /// Newlines that open up the output area above the cursor.
    pub fn prep_output_area(&self) -> String {
        "\n".repeat(self.top as usize)
    }

    /// Current frame as rows, top row first, each exactly `right` cells wide.
    ///
    /// With `formatted`, cells carry their color sequences.
    pub fn rasterize(&self, formatted: bool) -> Vec<String> {
        let width = self.right as usize;
        let height = self.top as usize;
        let mut cells: Vec<Vec<Option<String>>> = vec![vec![None; width]; height];

        let mut order: Vec<&EffectCharacter> =
            self.characters.iter().filter(|c| c.is_visible()).collect();
        // Stable: equal layers keep arena order, so later characters win.
        order.sort_by_key(|c| c.layer());

        for c in order {
            let coord = c.current_coord();
            if !self.contains(coord) {
                continue;
            }
            let row = (self.top - coord.row) as usize;
            let col = (coord.column - self.left) as usize;
            let cell = if formatted {
                ansi::format_visual(c.visual(), self.xterm_colors)
            } else {
                c.visual().symbol.clone()
            };
            cells[row][col] = Some(cell);
        }

        cells
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.unwrap_or_else(|| " ".to_owned()))
                    .collect::<String>()
            })
            .collect()
    }

    /// Diff the current frame against the last emitted one and return the escape sequence that
    /// rewrites only the changed rows.
    ///
    /// Output is `ESC 7`, then per changed row `ESC[nA ESC[1G <row> ESC 8`. Returns an empty
    /// string when nothing changed.
    pub fn get_formatted_output_string(&mut self) -> String {
        let rows = self.rasterize(true);
        let mut out = String::new();
        for (i, row) in rows.iter().enumerate() {
            if self.previous_rows.get(i) == Some(row) {
                continue;
            }
            if out.is_empty() {
                out.push_str(&ansi::save_cursor());
            }
            // Row `i` from the top sits `top - i` lines above the cursor.
            let up = (self.top as usize - i) as u16;
            out.push_str(&ansi::move_cursor_up(up));
            out.push_str(&ansi::move_cursor_to_column(1));
            out.push_str(row);
            out.push_str(&ansi::restore_cursor());
        }
        self.previous_rows = rows;
        out
    }
}

impl Index<CharacterId> for Canvas {
    type Output = EffectCharacter;

    fn index(&self, id: CharacterId) -> &Self::Output {
        &self.characters[id.0]
    }
}

impl IndexMut<CharacterId> for Canvas {
    fn index_mut(&mut self, id: CharacterId) -> &mut Self::Output {
        &mut self.characters[id.0]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;

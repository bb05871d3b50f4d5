use std::borrow::Borrow;

use crate::{
    color::color::Color,
    color::gradient::Gradient,
    foundation::error::{GlyphfxError, GlyphfxResult},
};

/// Identifier of a [`Scene`], unique within one [`Animator`](crate::Animator).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SceneId(pub String);

impl Borrow<str> for SceneId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SceneId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Progress signal that drives a synced scene instead of the tick clock.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SyncMetric {
    /// Ticks moved along the active path over its total ticks.
    Step,
    /// Distance travelled along the active path over its total distance.
    Distance,
}

/// Terminal graphic modes applied to a frame's symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Style {
    /// Bold or increased intensity.
    pub bold: bool,
    /// Faint or decreased intensity.
    pub dim: bool,
    /// Italic.
    pub italic: bool,
    /// Single underline.
    pub underline: bool,
    /// Slow blink.
    pub blink: bool,
    /// Swap foreground and background.
    pub reverse: bool,
    /// Concealed.
    pub hidden: bool,
    /// Crossed out.
    pub strike: bool,
}

impl Style {
    /// No mode set.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// What a character shows: a glyph, an optional foreground color and graphic modes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Visual {
    /// Glyph written to the cell.
    pub symbol: String,
    /// Foreground color; `None` keeps the terminal default.
    pub color: Option<Color>,
    /// Graphic modes.
    pub style: Style,
}

impl Visual {
    /// Unstyled visual.
    pub fn new(symbol: impl Into<String>, color: Option<Color>) -> Self {
        Self {
            symbol: symbol.into(),
            color,
            style: Style::default(),
        }
    }

    /// Same visual with `style` applied.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// A visual held for `duration` animation steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    visual: Visual,
    duration: u32,
}

impl Frame {
    /// Glyph, color and style shown while the frame plays.
    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    /// Glyph of the frame.
    pub fn symbol(&self) -> &str {
        &self.visual.symbol
    }

    /// Foreground color of the frame.
    pub fn color(&self) -> Option<Color> {
        self.visual.color
    }

    /// Graphic modes of the frame.
    pub fn style(&self) -> Style {
        self.visual.style
    }

    /// Animation steps the frame is held for.
    pub fn duration(&self) -> u32 {
        self.duration
    }
}

/// Ordered frames played back one animation step at a time.
///
/// Frames before the play cursor have been played, frames from the cursor on are pending.
#[derive(Clone, Debug)]
pub struct Scene {
    id: SceneId,
    frames: Vec<Frame>,
    /// Recycle played frames when the queue runs out.
    pub is_looping: bool,
    /// Drive frame selection from path progress instead of ticks.
    pub sync: Option<SyncMetric>,
    cursor: usize,
    frame_plays: u32,
}

impl Scene {
    pub(crate) fn new(id: SceneId, sync: Option<SyncMetric>, is_looping: bool) -> Self {
        Self {
            id,
            frames: Vec::new(),
            is_looping,
            sync,
            cursor: 0,
            frame_plays: 0,
        }
    }

    /// Id of the scene.
    pub fn id(&self) -> &SceneId {
        &self.id
    }

    /// Every frame, in play order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Append a frame. `duration` is in animation steps and must be at least 1.
    pub fn add_frame(
        &mut self,
        symbol: impl Into<String>,
        duration: u32,
        color: Option<Color>,
    ) -> GlyphfxResult<()> {
        self.add_styled_frame(Visual::new(symbol, color), duration)
    }

    /// Append a frame showing `visual`, graphic modes included.
    pub fn add_styled_frame(&mut self, visual: Visual, duration: u32) -> GlyphfxResult<()> {
        if duration < 1 {
            return Err(GlyphfxError::invalid_duration(format!(
                "frame duration in scene '{}' must be >= 1",
                self.id
            )));
        }
        self.frames.push(Frame { visual, duration });
        Ok(())
    }

    /// Append one frame per spectrum color, cycling through `symbols`.
    pub fn apply_gradient_to_symbols<S: AsRef<str>>(
        &mut self,
        gradient: &Gradient,
        symbols: &[S],
        frames_per_step: u32,
    ) -> GlyphfxResult<()> {
        if symbols.is_empty() {
            return Err(GlyphfxError::validation(format!(
                "scene '{}' needs at least one symbol for a gradient",
                self.id
            )));
        }
        for (i, color) in gradient.spectrum().iter().enumerate() {
            let symbol = symbols[i % symbols.len()].as_ref();
            self.add_frame(symbol, frames_per_step, Some(*color))?;
        }
        Ok(())
    }

    /// True once every frame has been played (never for a looping scene with frames).
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.frames.len()
    }

    /// Number of frames already played since the last reset.
    pub fn played_frames(&self) -> usize {
        self.cursor.min(self.frames.len())
    }

    /// Visual of the next pending frame.
    pub fn current_visual(&self) -> Option<&Visual> {
        self.frames.get(self.cursor).map(Frame::visual)
    }

    /// Return every frame to the pending queue in original order.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.frame_plays = 0;
    }

    pub(crate) fn next_visual(&mut self) -> Option<Visual> {
        let frame = self.frames.get(self.cursor)?;
        let visual = frame.visual.clone();
        self.frame_plays += 1;
        if self.frame_plays >= frame.duration {
            self.frame_plays = 0;
            self.cursor += 1;
            if self.is_looping && self.cursor >= self.frames.len() {
                self.cursor = 0;
            }
        }
        Some(visual)
    }

    pub(crate) fn synced_visual(&self, ratio: f64) -> Option<Visual> {
        let last = self.frames.len().checked_sub(1)?;
        let idx = (last as f64 * ratio.clamp(0.0, 1.0)).round() as usize;
        self.frames.get(idx.min(last)).map(|f| f.visual.clone())
    }

    pub(crate) fn last_visual(&self) -> Option<Visual> {
        self.frames.last().map(|f| f.visual.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scene.rs"]
mod tests;

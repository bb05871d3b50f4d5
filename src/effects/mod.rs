//! Effects built on the character engine, and the shared driver pieces they use.

use std::collections::BTreeMap;

use crate::{
    color::color::{Color, Rgb},
    color::gradient::{Direction, Gradient},
    engine::character::CharacterId,
    foundation::core::{Coord, Rng64},
    foundation::error::{GlyphfxError, GlyphfxResult},
    render::canvas::Canvas,
};

pub(crate) mod expand;
pub(crate) mod fireworks;
pub(crate) mod spray;

/// A built effect: yields one diffed frame string per tick until every character has settled.
pub trait Effect: Iterator<Item = String> {
    /// Effect name as used on the command line.
    fn name(&self) -> &'static str;

    /// Canvas the effect draws on.
    fn canvas(&self) -> &Canvas;
}

/// Effects selectable at runtime.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Characters move out from the canvas center.
    Expand,
    /// Characters are sprayed from one edge or corner.
    Spray,
    /// Characters launch in shells and fall into place.
    Fireworks,
}

impl EffectKind {
    /// Lowercase name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Expand => "expand",
            Self::Spray => "spray",
            Self::Fireworks => "fireworks",
        }
    }
}

/// Build `kind` on `canvas`.
///
/// `config` overlays the effect's default configuration (missing fields keep their defaults).
#[tracing::instrument(skip(canvas, config))]
pub fn build_effect(
    kind: EffectKind,
    canvas: Canvas,
    config: Option<serde_json::Value>,
    seed: u64,
) -> GlyphfxResult<Box<dyn Effect>> {
    let rng = Rng64::new(seed);
    let config = config.unwrap_or_else(|| serde_json::Value::Object(Default::default()));
    Ok(match kind {
        EffectKind::Expand => {
            let cfg: expand::ExpandConfig = serde_json::from_value(config)?;
            Box::new(expand::Expand::new(canvas, &cfg, rng)?)
        }
        EffectKind::Spray => {
            let cfg: spray::SprayConfig = serde_json::from_value(config)?;
            Box::new(spray::Spray::new(canvas, &cfg, rng)?)
        }
        EffectKind::Fireworks => {
            let cfg: fireworks::FireworksConfig = serde_json::from_value(config)?;
            Box::new(fireworks::Fireworks::new(canvas, &cfg, rng)?)
        }
    })
}

/// Characters that still need ticking.
#[derive(Clone, Debug, Default)]
pub struct ActiveSet {
    ids: Vec<CharacterId>,
}

impl ActiveSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `id` until it settles.
    pub fn push(&mut self, id: CharacterId) {
        self.ids.push(id);
    }

    /// Number of tracked characters.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True once every tracked character has settled.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Tick every active character, render the frame, then drop the ones that settled.
    pub fn update(&mut self, canvas: &mut Canvas) -> String {
        for &id in &self.ids {
            canvas[id].tick();
        }
        let frame = canvas.get_formatted_output_string();
        self.ids.retain(|&id| canvas.is_character_active(id));
        frame
    }
}

/// Final gradient shared by the effects, and the per-cell colors it maps to.
pub(crate) fn final_gradient_map(
    canvas: &Canvas,
    stops: &[Color],
    steps: &[usize],
    direction: Direction,
) -> GlyphfxResult<(Gradient, BTreeMap<Coord, Color>)> {
    let gradient = Gradient::new(stops, steps)?;
    let mapping = gradient.build_coordinate_color_mapping(canvas.top, canvas.right, direction);
    Ok((gradient, mapping))
}

pub(crate) fn final_color(
    mapping: &BTreeMap<Coord, Color>,
    gradient: &Gradient,
    coord: Coord,
) -> Color {
    mapping
        .get(&coord)
        .copied()
        .unwrap_or_else(|| gradient.color_at_fraction(1.0))
}

pub(crate) fn default_final_stops() -> Vec<Color> {
    vec![
        Color::Rgb(Rgb::new(0x8A, 0x00, 0x8A)),
        Color::Rgb(Rgb::new(0x00, 0xD1, 0xFF)),
        Color::Rgb(Rgb::new(0xFF, 0xFF, 0xFF)),
    ]
}

pub(crate) fn ensure_stops(stops: &[Color]) -> GlyphfxResult<()> {
    if stops.is_empty() {
        return Err(GlyphfxError::validation(
            "final_gradient_stops must contain at least one color",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/driver.rs"]
mod tests;

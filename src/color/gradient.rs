use std::collections::BTreeMap;

use crate::{
    color::color::{Color, Rgb},
    foundation::core::Coord,
    foundation::error::{GlyphfxError, GlyphfxResult},
    foundation::geometry::find_normalized_distance_from_center,
};

/// Axis used to project a gradient onto a 2D area.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left to right.
    Horizontal,
    /// Bottom to top.
    #[default]
    Vertical,
    /// Bottom-left to top-right, rows weighted double.
    Diagonal,
    /// Center outwards.
    Radial,
}

/// Precomputed color ramp through one or more stop colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    stops: Vec<Color>,
    steps: Vec<usize>,
    spectrum: Vec<Color>,
}

impl Gradient {
    /// Build a gradient through `stops`.
    ///
    /// `steps[i]` is the number of intermediate colors between `stops[i]` and `stops[i + 1]`.
    /// When fewer step counts than segments are given, the last count is reused; an empty `steps`
    /// means no intermediates. The spectrum holds `stops.len() + sum(steps)` colors (or one color
    /// for a single stop).
    pub fn new(stops: &[Color], steps: &[usize]) -> GlyphfxResult<Self> {
        if stops.is_empty() {
            return Err(GlyphfxError::validation("gradient needs at least one stop"));
        }
        let segments = stops.len() - 1;
        let steps: Vec<usize> = (0..segments)
            .map(|i| steps.get(i).or(steps.last()).copied().unwrap_or(0))
            .collect();

        let mut spectrum = Vec::with_capacity(stops.len() + steps.iter().sum::<usize>());
        for (pair, &n) in stops.windows(2).zip(&steps) {
            spectrum.push(pair[0]);
            spectrum.extend(interpolate(pair[0].to_rgb(), pair[1].to_rgb(), n));
        }
        spectrum.push(stops[stops.len() - 1]);

        Ok(Self {
            stops: stops.to_vec(),
            steps,
            spectrum,
        })
    }

    /// Stop colors as given.
    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Effective intermediate counts, one per segment.
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// Ordered colors of the ramp, first stop to last stop.
    pub fn spectrum(&self) -> &[Color] {
        &self.spectrum
    }

    /// Spectrum color at `fraction` of the ramp (clamped to `[0, 1]`).
    pub fn color_at_fraction(&self, fraction: f64) -> Color {
        let last = self.spectrum.len() - 1;
        let f = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let idx = (f * last as f64).round() as usize;
        self.spectrum[idx.min(last)]
    }

    /// Assign a spectrum color to every cell of the `right x top` area.
    ///
    /// Each cell is projected onto the axis selected by `direction`, normalized to `[0, 1]` and
    /// scaled onto the spectrum.
    pub fn build_coordinate_color_mapping(
        &self,
        top: i32,
        right: i32,
        direction: Direction,
    ) -> BTreeMap<Coord, Color> {
        fn ratio(v: i32, max: i32) -> f64 {
            if max <= 1 {
                0.0
            } else {
                f64::from(v - 1) / f64::from(max - 1)
            }
        }

        let mut out = BTreeMap::new();
        for row in 1..=top.max(0) {
            for column in 1..=right.max(0) {
                let coord = Coord::new(column, row);
                let fraction = match direction {
                    Direction::Horizontal => ratio(column, right),
                    Direction::Vertical => ratio(row, top),
                    Direction::Diagonal => {
                        let span = (top - 1) * 2 + (right - 1);
                        if span <= 0 {
                            0.0
                        } else {
                            f64::from((row - 1) * 2 + (column - 1)) / f64::from(span)
                        }
                    }
                    Direction::Radial => find_normalized_distance_from_center(top, right, coord),
                };
                out.insert(coord, self.color_at_fraction(fraction));
            }
        }
        out
    }
}

fn interpolate(a: Rgb, b: Rgb, n: usize) -> impl Iterator<Item = Color> {
    // Floor division: ramps between the same two colors differ slightly by direction.
    let divisor = n as i32 + 1;
    let delta = |from: u8, to: u8| (i32::from(to) - i32::from(from)).div_euclid(divisor);
    let (dr, dg, db) = (delta(a.r, b.r), delta(a.g, b.g), delta(a.b, b.b));
    let channel = |base: u8, d: i32, k: i32| (i32::from(base) + d * k).clamp(0, 255) as u8;
    (1..=n as i32).map(move |k| {
        Color::Rgb(Rgb::new(
            channel(a.r, dr, k),
            channel(a.g, dg, k),
            channel(a.b, db, k),
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/color/gradient.rs"]
mod tests;

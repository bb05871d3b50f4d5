use crate::{
    animation::ease::Ease,
    color::color::Color,
    color::gradient::{Direction, Gradient},
    effects::{
        ActiveSet, Effect, default_final_stops, ensure_stops, final_color, final_gradient_map,
    },
    engine::character::CharacterId,
    engine::events::{Action, Event, EventSource},
    foundation::core::{Coord, Rng64},
    foundation::error::{GlyphfxError, GlyphfxResult},
    render::canvas::Canvas,
};

const PATH_ID: &str = "spray";
const SCENE_ID: &str = "droplet";

/// Canvas edge or corner the characters are sprayed from.
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
pub enum SprayPosition {
    /// Middle of the top edge.
    N,
    /// Top-right corner.
    Ne,
    /// Middle of the right edge.
    #[default]
    E,
    /// Bottom-right corner.
    Se,
    /// Middle of the bottom edge.
    S,
    /// Bottom-left corner.
    Sw,
    /// Middle of the left edge.
    W,
    /// Top-left corner.
    Nw,
    /// Canvas center.
    Center,
}

impl SprayPosition {
    /// Cell on `canvas` the spray starts from.
    pub fn origin(self, canvas: &Canvas) -> Coord {
        let mid_column = (canvas.right / 2).max(1);
        let mid_row = (canvas.top / 2).max(1);
        let right = (canvas.right - 1).max(1);
        match self {
            Self::Center => canvas.center(),
            Self::N => Coord::new(mid_column, canvas.top),
            Self::Nw => Coord::new(canvas.left, canvas.top),
            Self::W => Coord::new(canvas.left, mid_row),
            Self::Sw => Coord::new(canvas.left, canvas.bottom),
            Self::S => Coord::new(mid_column, canvas.bottom),
            Self::Se => Coord::new(right, canvas.bottom),
            Self::E => Coord::new(right, mid_row),
            Self::Ne => Coord::new(right, canvas.top),
        }
    }
}

/// Settings for [`Spray`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SprayConfig {
    /// Stops of the gradient characters settle on.
    pub final_gradient_stops: Vec<Color>,
    /// Interpolated colors between consecutive stops.
    pub final_gradient_steps: Vec<usize>,
    /// Axis the final gradient runs along.
    pub final_gradient_direction: Direction,
    /// Where the spray starts.
    pub spray_position: SprayPosition,
    /// Fraction of the characters released per tick, at most.
    pub spray_volume: f64,
    /// Per-character speed is drawn uniformly from `(min, max)`.
    pub movement_speed: (f64, f64),
    /// Easing of every flight.
    pub movement_easing: Ease,
}

impl Default for SprayConfig {
    fn default() -> Self {
        Self {
            final_gradient_stops: default_final_stops(),
            final_gradient_steps: vec![12],
            final_gradient_direction: Direction::Vertical,
            spray_position: SprayPosition::E,
            spray_volume: 0.005,
            movement_speed: (0.4, 1.0),
            movement_easing: Ease::OutExpo,
        }
    }
}

/// Characters are released in random batches from one point and fly to their input positions.
#[derive(Debug)]
pub struct Spray {
    canvas: Canvas,
    rng: Rng64,
    pending: Vec<CharacterId>,
    active: ActiveSet,
    volume: i32,
}

impl Spray {
    /// Place every character on the spray origin and queue it for release.
    #[tracing::instrument(skip_all, fields(characters = canvas.len()))]
    pub fn new(mut canvas: Canvas, config: &SprayConfig, mut rng: Rng64) -> GlyphfxResult<Self> {
        ensure_stops(&config.final_gradient_stops)?;
        let (min_speed, max_speed) = config.movement_speed;
        if !(min_speed > 0.0 && max_speed >= min_speed) {
            return Err(GlyphfxError::invalid_speed(format!(
                "movement_speed must satisfy 0 < min <= max, got ({min_speed}, {max_speed})"
            )));
        }
        let (final_gradient, mapping) = final_gradient_map(
            &canvas,
            &config.final_gradient_stops,
            &config.final_gradient_steps,
            config.final_gradient_direction,
        )?;
        let origin = config.spray_position.origin(&canvas);
        let mut pending = Vec::with_capacity(canvas.len());

        for id in canvas.ids() {
            let ch = &mut canvas[id];
            let target = final_color(&mapping, &final_gradient, ch.input_coord());
            let symbol = ch.input_symbol().to_owned();
            let input_coord = ch.input_coord();

            ch.set_coordinate(origin);
            let speed = rng.uniform(min_speed, max_speed);
            ch.motion
                .new_path(speed, config.movement_easing, 0, Some(PATH_ID))?
                .new_waypoint(input_coord, None, None);
            ch.register_event(
                Event::PathActivated,
                EventSource::path(PATH_ID),
                Action::SetLayer(1),
            )?;
            ch.register_event(
                Event::PathComplete,
                EventSource::path(PATH_ID),
                Action::SetLayer(0),
            )?;

            let start = rng
                .choose(final_gradient.spectrum())
                .copied()
                .unwrap_or(target);
            let droplet = Gradient::new(&[start, target], &[7])?;
            ch.animator
                .new_scene(Some(SCENE_ID), None, false)?
                .apply_gradient_to_symbols(&droplet, &[symbol], 20)?;
            ch.activate_scene(SCENE_ID)?;
            ch.activate_path(PATH_ID)?;
            pending.push(id);
        }

        rng.shuffle(&mut pending);
        let volume = ((pending.len() as f64 * config.spray_volume) as i32).max(1);
        tracing::debug!(volume, %origin, "spray ready");

        Ok(Self {
            canvas,
            rng,
            pending,
            active: ActiveSet::new(),
            volume,
        })
    }

    fn release(&mut self) {
        let batch = self.rng.range_inclusive(1, self.volume);
        for _ in 0..batch {
            let Some(id) = self.pending.pop() else {
                break;
            };
            self.canvas.set_character_visibility(id, true);
            self.active.push(id);
        }
    }
}

impl Iterator for Spray {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.pending.is_empty() && self.active.is_empty() {
            return None;
        }
        self.release();
        Some(self.active.update(&mut self.canvas))
    }
}

impl Effect for Spray {
    fn name(&self) -> &'static str {
        "spray"
    }

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

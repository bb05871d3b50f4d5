use crate::{
    animation::ease::Ease,
    color::color::Color,
    color::gradient::{Direction, Gradient},
    effects::{
        ActiveSet, Effect, default_final_stops, ensure_stops, final_color, final_gradient_map,
    },
    engine::events::{Action, Event, EventSource},
    foundation::core::Rng64,
    foundation::error::GlyphfxResult,
    render::canvas::Canvas,
};

const PATH_ID: &str = "expand";
const SCENE_ID: &str = "gradient";

/// Settings for [`Expand`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExpandConfig {
    /// Stops of the gradient characters settle on.
    pub final_gradient_stops: Vec<Color>,
    /// Interpolated colors between consecutive stops.
    pub final_gradient_steps: Vec<usize>,
    /// Animation steps each gradient color is held for.
    pub final_gradient_frames: u32,
    /// Axis the final gradient runs along.
    pub final_gradient_direction: Direction,
    /// Distance a character travels per animation step.
    pub movement_speed: f64,
    /// Easing applied to the outward motion.
    pub expand_easing: Ease,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            final_gradient_stops: default_final_stops(),
            final_gradient_steps: vec![12],
            final_gradient_frames: 5,
            final_gradient_direction: Direction::Vertical,
            movement_speed: 0.35,
            expand_easing: Ease::InOutQuart,
        }
    }
}

/// Every character starts on the canvas center and travels out to its input position while
/// fading into the final gradient.
#[derive(Debug)]
pub struct Expand {
    canvas: Canvas,
    active: ActiveSet,
}

impl Expand {
    /// Build paths, scenes and events for every character of `canvas`.
    #[tracing::instrument(skip_all, fields(characters = canvas.len()))]
    pub fn new(mut canvas: Canvas, config: &ExpandConfig, _rng: Rng64) -> GlyphfxResult<Self> {
        ensure_stops(&config.final_gradient_stops)?;
        let (final_gradient, mapping) = final_gradient_map(
            &canvas,
            &config.final_gradient_stops,
            &config.final_gradient_steps,
            config.final_gradient_direction,
        )?;
        let first = final_gradient.color_at_fraction(0.0);
        let center = canvas.center();
        let mut active = ActiveSet::new();

        for id in canvas.ids() {
            let ch = &mut canvas[id];
            let target = final_color(&mapping, &final_gradient, ch.input_coord());
            let symbol = ch.input_symbol().to_owned();

            ch.set_coordinate(center);
            let input_coord = ch.input_coord();
            ch.motion
                .new_path(config.movement_speed, config.expand_easing, 0, Some(PATH_ID))?
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
            ch.activate_path(PATH_ID)?;

            let fade = Gradient::new(&[first, target], &[10])?;
            ch.animator
                .new_scene(Some(SCENE_ID), None, false)?
                .apply_gradient_to_symbols(&fade, &[symbol], config.final_gradient_frames)?;
            ch.activate_scene(SCENE_ID)?;

            canvas.set_character_visibility(id, true);
            active.push(id);
        }

        Ok(Self { canvas, active })
    }
}

impl Iterator for Expand {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.active.is_empty() {
            return None;
        }
        Some(self.active.update(&mut self.canvas))
    }
}

impl Effect for Expand {
    fn name(&self) -> &'static str {
        "expand"
    }

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

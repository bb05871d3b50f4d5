use crate::{
    animation::ease::Ease,
    color::color::{Color, Rgb},
    color::gradient::{Direction, Gradient},
    effects::{
        ActiveSet, Effect, default_final_stops, ensure_stops, final_color, final_gradient_map,
    },
    engine::character::CharacterId,
    engine::events::{Action, Event, EventSource},
    foundation::core::{Coord, Rng64},
    foundation::error::{GlyphfxError, GlyphfxResult},
    foundation::geometry::{find_coord_at_distance, find_coords_in_circle},
    render::canvas::Canvas,
};

const APEX_PATH: &str = "apex";
const EXPLODE_PATH: &str = "explode";
const INPUT_PATH: &str = "input";
const LAUNCH_SCENE: &str = "launch";
const BLOOM_SCENE: &str = "bloom";
const FALL_SCENE: &str = "fall";

const WHITE: Color = Color::Rgb(Rgb::new(0xFF, 0xFF, 0xFF));

/// Settings for [`Fireworks`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FireworksConfig {
    /// Let shells burst anywhere on the canvas instead of only above their characters' rows.
    pub explode_anywhere: bool,
    /// One color is picked per shell.
    pub firework_colors: Vec<Color>,
    /// Glyph shown while a shell climbs.
    pub firework_symbol: String,
    /// Fraction of the characters carried by each shell.
    pub firework_volume: f64,
    /// Stops of the gradient characters settle on.
    pub final_gradient_stops: Vec<Color>,
    /// Interpolated colors between consecutive stops.
    pub final_gradient_steps: Vec<usize>,
    /// Axis the final gradient runs along.
    pub final_gradient_direction: Direction,
    /// Ticks between launches, jittered by a factor in `[0.5, 1.5)`.
    pub launch_delay: u32,
    /// Burst radius as a fraction of the canvas width.
    pub explode_distance: f64,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            explode_anywhere: false,
            firework_colors: vec![
                Color::Rgb(Rgb::new(0x88, 0xF7, 0xE2)),
                Color::Rgb(Rgb::new(0x44, 0xD4, 0x92)),
                Color::Rgb(Rgb::new(0xF5, 0xEB, 0x67)),
                Color::Rgb(Rgb::new(0xFF, 0xA1, 0x5C)),
                Color::Rgb(Rgb::new(0xFA, 0x23, 0x3E)),
            ],
            firework_symbol: "o".to_owned(),
            firework_volume: 0.02,
            final_gradient_stops: default_final_stops(),
            final_gradient_steps: vec![12],
            final_gradient_direction: Direction::Horizontal,
            launch_delay: 60,
            explode_distance: 0.1,
        }
    }
}

/// Characters are launched in shells from the bottom edge, burst at an apex and then fall back
/// into place.
///
/// The whole sequence is chained through event bindings: finishing the apex path starts the
/// explode path and the bloom scene, finishing the explode path starts the input path, and
/// activating the input path starts the fall scene.
#[derive(Debug)]
pub struct Fireworks {
    canvas: Canvas,
    rng: Rng64,
    shells: Vec<Vec<CharacterId>>,
    active: ActiveSet,
    launch_delay: u32,
    countdown: i64,
}

impl Fireworks {
    /// Split `canvas` into shells and wire every character's launch sequence.
    #[tracing::instrument(skip_all, fields(characters = canvas.len()))]
    pub fn new(
        mut canvas: Canvas,
        config: &FireworksConfig,
        mut rng: Rng64,
    ) -> GlyphfxResult<Self> {
        ensure_stops(&config.final_gradient_stops)?;
        if config.firework_colors.is_empty() {
            return Err(GlyphfxError::validation(
                "firework_colors must contain at least one color",
            ));
        }
        let (final_gradient, mapping) = final_gradient_map(
            &canvas,
            &config.final_gradient_stops,
            &config.final_gradient_steps,
            config.final_gradient_direction,
        )?;

        let volume = ((config.firework_volume * canvas.len() as f64).round() as usize).max(1);
        let explode_distance =
            ((f64::from(canvas.right) * config.explode_distance).round() as i32).max(1);

        let ids = canvas.ids();
        let mut shells = Vec::new();
        for group in ids.chunks(volume) {
            let min_row = if config.explode_anywhere {
                canvas.bottom
            } else {
                canvas[group[0]].input_coord().row
            };
            let origin = Coord::new(
                rng.range_inclusive(canvas.left, canvas.right),
                rng.range_inclusive(min_row, canvas.top),
            );
            let burst = find_coords_in_circle(origin, explode_distance);
            let shell_color = rng
                .choose(&config.firework_colors)
                .copied()
                .unwrap_or(WHITE);

            for &id in group {
                let explode_at = rng.choose(&burst).copied().unwrap_or(origin);
                let target = final_color(&mapping, &final_gradient, canvas[id].input_coord());
                let launch_from = Coord::new(origin.column, canvas.bottom);
                build_shell_character(
                    &mut canvas,
                    id,
                    config,
                    ShellPlan {
                        launch_from,
                        apex: origin,
                        explode_at,
                        explode_distance,
                        shell_color,
                        final_color: target,
                    },
                )?;
            }
            shells.push(group.to_vec());
        }
        tracing::debug!(shells = shells.len(), volume, explode_distance, "fireworks ready");

        Ok(Self {
            canvas,
            rng,
            shells,
            active: ActiveSet::new(),
            launch_delay: config.launch_delay,
            countdown: 0,
        })
    }

    /// Shells not yet launched.
    pub fn pending_shells(&self) -> usize {
        self.shells.len()
    }
}

struct ShellPlan {
    launch_from: Coord,
    apex: Coord,
    explode_at: Coord,
    explode_distance: i32,
    shell_color: Color,
    final_color: Color,
}

fn build_shell_character(
    canvas: &mut Canvas,
    id: CharacterId,
    config: &FireworksConfig,
    plan: ShellPlan,
) -> GlyphfxResult<()> {
    let ch = &mut canvas[id];
    let input_coord = ch.input_coord();
    let symbol = ch.input_symbol().to_owned();
    ch.set_coordinate(plan.launch_from);

    ch.motion
        .new_path(0.2, Ease::OutExpo, 0, Some(APEX_PATH))?
        .new_waypoint(plan.apex, None, None);

    let bloom_control = find_coord_at_distance(
        plan.apex,
        plan.explode_at,
        f64::from(plan.explode_distance / 2),
    );
    let bloom_end = Coord::new(bloom_control.column, (bloom_control.row - 7).max(1));
    let explode = ch.motion.new_path(0.15, Ease::OutCirc, 0, Some(EXPLODE_PATH))?;
    explode.new_waypoint(plan.explode_at, None, None);
    explode.new_waypoint(bloom_end, Some(bloom_control), None);

    ch.motion
        .new_path(0.3, Ease::InOutQuart, 0, Some(INPUT_PATH))?
        .new_waypoint(input_coord, Some(Coord::new(bloom_end.column, 1)), None);

    let launch = ch.animator.new_scene(Some(LAUNCH_SCENE), None, true)?;
    launch.add_frame(config.firework_symbol.as_str(), 2, Some(plan.shell_color))?;
    launch.add_frame(config.firework_symbol.as_str(), 1, Some(WHITE))?;
    ch.animator
        .new_scene(Some(BLOOM_SCENE), None, false)?
        .add_frame(symbol.as_str(), 1, Some(plan.shell_color))?;
    let fall = Gradient::new(&[plan.shell_color, plan.final_color], &[15])?;
    ch.animator
        .new_scene(Some(FALL_SCENE), None, false)?
        .apply_gradient_to_symbols(&fall, &[symbol], 15)?;

    let apex = || EventSource::path(APEX_PATH);
    let explode = || EventSource::path(EXPLODE_PATH);
    ch.register_event(Event::PathActivated, apex(), Action::SetLayer(2))?;
    ch.register_event(Event::PathComplete, explode(), Action::SetLayer(0))?;
    ch.register_event(
        Event::PathComplete,
        apex(),
        Action::ActivatePath(EXPLODE_PATH.into()),
    )?;
    ch.register_event(
        Event::PathComplete,
        explode(),
        Action::ActivatePath(INPUT_PATH.into()),
    )?;
    ch.register_event(
        Event::PathComplete,
        apex(),
        Action::ActivateScene(BLOOM_SCENE.into()),
    )?;
    ch.register_event(
        Event::PathActivated,
        EventSource::path(INPUT_PATH),
        Action::ActivateScene(FALL_SCENE.into()),
    )?;

    ch.activate_path(APEX_PATH)?;
    ch.activate_scene(LAUNCH_SCENE)?;
    Ok(())
}

impl Iterator for Fireworks {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.shells.is_empty() && self.active.is_empty() {
            return None;
        }
        if self.countdown <= 0 {
            if let Some(shell) = self.shells.pop() {
                for id in shell {
                    self.canvas.set_character_visibility(id, true);
                    self.active.push(id);
                }
                let jitter = self.rng.uniform(0.5, 1.5);
                self.countdown = (f64::from(self.launch_delay) * jitter) as i64;
            }
        }
        let frame = self.active.update(&mut self.canvas);
        self.countdown -= 1;
        Some(frame)
    }
}

impl Effect for Fireworks {
    fn name(&self) -> &'static str {
        "fireworks"
    }

    fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

use crate::{
    animation::animator::{Animator, PathProgress},
    animation::scene::Visual,
    engine::events::{Action, Event, EventHandler, EventSource, Occurrence},
    foundation::core::Coord,
    foundation::error::{GlyphfxError, GlyphfxResult},
    motion::motion::Motion,
};

/// Upper bound on nested event dispatch within one trigger.
pub const MAX_CASCADE: usize = 64;

/// Stable index of a character inside its [`Canvas`](crate::Canvas).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CharacterId(pub usize);

/// One input glyph with its own motion, animation and event bindings.
///
/// Motion and animator never call each other; they report events and the character routes them
/// through its [`EventHandler`].
#[derive(Clone, Debug)]
pub struct EffectCharacter {
    id: CharacterId,
    input_symbol: String,
    input_coord: Coord,
    visual: Visual,
    layer: i32,
    is_visible: bool,
    is_fill: bool,
    /// Trajectory state.
    pub motion: Motion,
    /// Visual state.
    pub animator: Animator,
    event_handler: EventHandler,
}

impl EffectCharacter {
    /// Hidden character resting at `input_coord`.
    pub fn new(id: CharacterId, symbol: impl Into<String>, input_coord: Coord) -> Self {
        let input_symbol = symbol.into();
        Self {
            id,
            visual: Visual::new(input_symbol.clone(), None),
            input_symbol,
            input_coord,
            layer: 0,
            is_visible: false,
            is_fill: false,
            motion: Motion::new(input_coord),
            animator: Animator::new(),
            event_handler: EventHandler::new(),
        }
    }

    /// Index of the character in its canvas.
    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// Glyph read from the input.
    pub fn input_symbol(&self) -> &str {
        &self.input_symbol
    }

    /// Cell the glyph occupies in the input.
    pub fn input_coord(&self) -> Coord {
        self.input_coord
    }

    /// Cell the character is drawn at.
    pub fn current_coord(&self) -> Coord {
        self.motion.current_coord()
    }

    /// Glyph and color currently rendered.
    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    /// Draw order; higher layers are drawn on top.
    pub fn layer(&self) -> i32 {
        self.layer
    }

    /// Change the draw order.
    pub fn set_layer(&mut self, layer: i32) {
        self.layer = layer;
    }

    /// Whether the canvas draws the character.
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.is_visible = visible;
    }

    /// Blank cell added by the canvas to cover the gaps between input glyphs.
    pub fn is_fill_character(&self) -> bool {
        self.is_fill
    }

    pub(crate) fn mark_fill(&mut self) {
        self.is_fill = true;
    }

    /// Registered event bindings.
    pub fn event_handler(&self) -> &EventHandler {
        &self.event_handler
    }

    /// Motion still in progress or a non-looping scene still playing.
    pub fn is_active(&self) -> bool {
        !self.motion.movement_is_complete() || !self.animator.is_active_scene_complete()
    }

    /// Bind `action` to `event` raised by `source`.
    ///
    /// The source and any path or scene the action targets must already be registered, and a
    /// path to activate must already have its waypoints, so wiring mistakes surface while the
    /// effect is built.
    pub fn register_event(
        &mut self,
        event: Event,
        source: EventSource,
        action: Action,
    ) -> GlyphfxResult<()> {
        match &source {
            EventSource::Path(id) => {
                self.motion.query_path(&id.0)?;
            }
            EventSource::Scene(id) => {
                self.animator.query_scene(&id.0)?;
            }
        }
        match &action {
            Action::ActivatePath(id) => {
                if self.motion.query_path(&id.0)?.waypoints().is_empty() {
                    return Err(GlyphfxError::validation(format!(
                        "path '{id}' has no waypoints to activate"
                    )));
                }
            }
            Action::DeactivatePath(id) => {
                self.motion.query_path(&id.0)?;
            }
            Action::ActivateScene(id) | Action::DeactivateScene(id) | Action::ResetScene(id) => {
                self.animator.query_scene(&id.0)?;
            }
            Action::SetLayer(_) | Action::SetCoordinate(_) => {}
        }
        self.event_handler.register_event(event, source, action)
    }

    /// Activate a path and dispatch its `PathActivated` bindings.
    pub fn activate_path(&mut self, id: &str) -> GlyphfxResult<()> {
        let occurrence = self.motion.activate_path(id)?;
        self.dispatch(occurrence, 0);
        Ok(())
    }

    /// Activate a scene, show its next frame and dispatch its `SceneActivated` bindings.
    pub fn activate_scene(&mut self, id: &str) -> GlyphfxResult<()> {
        let (visual, occurrence) = self.animator.activate_scene(id)?;
        if let Some(visual) = visual {
            self.visual = visual;
        }
        self.dispatch(occurrence, 0);
        Ok(())
    }

    /// Jump to `coord` without traversal.
    pub fn set_coordinate(&mut self, coord: Coord) {
        self.motion.set_coordinate(coord);
    }

    /// Advance one tick: motion, then animation, each followed by its event dispatch.
    ///
    /// Actions triggered by an event take effect before the tick returns, except that a scene
    /// activated after the animator step first shows on the next tick.
    pub fn tick(&mut self) {
        if let Some(occurrence) = self.motion.step() {
            self.dispatch(occurrence, 0);
        }
        let progress = self.motion.active_path().map(PathProgress::of);
        let step = self.animator.step(progress);
        if let Some(visual) = step.visual {
            self.visual = visual;
        }
        if let Some(occurrence) = step.event {
            self.dispatch(occurrence, 0);
        }
    }

    fn dispatch(&mut self, occurrence: Occurrence, depth: usize) {
        if depth >= MAX_CASCADE {
            tracing::warn!(
                character = self.id.0,
                ?occurrence,
                "event cascade limit reached, dropping event"
            );
            return;
        }
        let actions = self.event_handler.actions_for(&occurrence).to_vec();
        for action in actions {
            tracing::trace!(character = self.id.0, ?occurrence, ?action, "dispatch");
            match self.apply(&action) {
                Ok(Some(next)) => self.dispatch(next, depth + 1),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(character = self.id.0, ?action, %err, "event action failed");
                }
            }
        }
    }

    fn apply(&mut self, action: &Action) -> GlyphfxResult<Option<Occurrence>> {
        match action {
            Action::ActivatePath(id) => self.motion.activate_path(&id.0).map(Some),
            Action::DeactivatePath(id) => {
                self.motion.deactivate_path(&id.0);
                Ok(None)
            }
            Action::ActivateScene(id) => {
                // The first frame is shown by the next animator step, which also counts its play.
                let (_, occurrence) = self.animator.activate_scene(&id.0)?;
                Ok(Some(occurrence))
            }
            Action::DeactivateScene(id) => {
                self.animator.deactivate_scene(&id.0);
                Ok(None)
            }
            Action::ResetScene(id) => {
                self.animator.reset_scene(&id.0)?;
                Ok(None)
            }
            Action::SetLayer(layer) => {
                self.layer = *layer;
                Ok(None)
            }
            Action::SetCoordinate(coord) => {
                self.motion.set_coordinate(*coord);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/character.rs"]
mod tests;

use std::collections::BTreeMap;

use crate::{
    animation::scene::SceneId,
    foundation::core::Coord,
    foundation::error::{GlyphfxError, GlyphfxResult},
    motion::path::PathId,
};

/// Lifecycle events raised by a character's motion and animator.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Event {
    /// A path became the active path (also raised on re-activation).
    PathActivated,
    /// The active path reached its final waypoint and finished holding.
    PathComplete,
    /// A scene became the active scene.
    SceneActivated,
    /// A non-looping scene played its last frame.
    SceneComplete,
}

impl Event {
    fn is_path_event(self) -> bool {
        matches!(self, Self::PathActivated | Self::PathComplete)
    }
}

/// Path or scene an event is raised for.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventSource {
    /// Raised by a path.
    Path(PathId),
    /// Raised by a scene.
    Scene(SceneId),
}

impl EventSource {
    /// Source for path `id`.
    pub fn path(id: impl Into<String>) -> Self {
        Self::Path(PathId(id.into()))
    }

    /// Source for scene `id`.
    pub fn scene(id: impl Into<String>) -> Self {
        Self::Scene(SceneId(id.into()))
    }
}

/// One raised event, as returned by motion and animator stepping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrence {
    /// What happened.
    pub event: Event,
    /// Path or scene it happened to.
    pub source: EventSource,
}

impl Occurrence {
    pub(crate) fn path(event: Event, id: &PathId) -> Self {
        Self {
            event,
            source: EventSource::Path(id.clone()),
        }
    }

    pub(crate) fn scene(event: Event, id: &SceneId) -> Self {
        Self {
            event,
            source: EventSource::Scene(id.clone()),
        }
    }
}

/// Effect applied to the owning character when a bound event fires.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Start a path from the current coordinate.
    ActivatePath(PathId),
    /// Stop a path if it is the active one.
    DeactivatePath(PathId),
    /// Start or resume a scene.
    ActivateScene(SceneId),
    /// Pause a scene if it is the active one.
    DeactivateScene(SceneId),
    /// Rewind a scene to its first frame.
    ResetScene(SceneId),
    /// Change the draw layer.
    SetLayer(i32),
    /// Jump to a cell.
    SetCoordinate(Coord),
}

/// Per-character table of `(event, source) -> actions`.
///
/// Actions for the same key run in registration order.
#[derive(Clone, Debug, Default)]
pub struct EventHandler {
    table: BTreeMap<(Event, EventSource), Vec<Action>>,
}

impl EventHandler {
    /// Table with no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `action` to `event` raised by `source`.
    ///
    /// Path events must name a path source and scene events a scene source.
    pub fn register_event(
        &mut self,
        event: Event,
        source: EventSource,
        action: Action,
    ) -> GlyphfxResult<()> {
        let source_is_path = matches!(source, EventSource::Path(_));
        if event.is_path_event() != source_is_path {
            return Err(GlyphfxError::validation(format!(
                "event {event:?} cannot be raised by {source:?}"
            )));
        }
        self.table.entry((event, source)).or_default().push(action);
        Ok(())
    }

    /// Actions bound to `occurrence`, in registration order.
    pub fn actions_for(&self, occurrence: &Occurrence) -> &[Action] {
        self.table
            .get(&(occurrence.event, occurrence.source.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of registered bindings.
    pub fn len(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }

    /// True when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/events.rs"]
mod tests;

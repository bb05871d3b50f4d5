use std::collections::BTreeMap;

use crate::{
    animation::scene::{Scene, SceneId, SyncMetric, Visual},
    engine::events::{Event, Occurrence},
    foundation::error::{GlyphfxError, GlyphfxResult},
    motion::path::Path,
};

/// Progress of the owning character's active path, consumed by synced scenes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathProgress {
    /// Ticks moved over total ticks.
    pub step_ratio: f64,
    /// Distance travelled over total distance.
    pub distance_ratio: f64,
}

impl PathProgress {
    /// Snapshot of `path` after its latest step.
    pub fn of(path: &Path) -> Self {
        Self {
            step_ratio: path.progress_ratio(),
            distance_ratio: path.distance_ratio(),
        }
    }
}

/// Outcome of one animation step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimatorStep {
    /// Visual to apply to the character, if the active scene produced one.
    pub visual: Option<Visual>,
    /// `SceneComplete` when the active scene finished on this step.
    pub event: Option<Occurrence>,
}

/// Per-character visual state: registered scenes and the one currently playing.
#[derive(Clone, Debug, Default)]
pub struct Animator {
    scenes: BTreeMap<SceneId, Scene>,
    active_scene: Option<SceneId>,
    next_scene_id: usize,
}

impl Animator {
    /// Animator with no scenes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new scene. Without an explicit id, ids are assigned in creation order.
    pub fn new_scene(
        &mut self,
        id: Option<&str>,
        sync: Option<SyncMetric>,
        is_looping: bool,
    ) -> GlyphfxResult<&mut Scene> {
        let id = match id {
            Some(id) => SceneId::from(id),
            None => loop {
                let candidate = SceneId(self.next_scene_id.to_string());
                self.next_scene_id += 1;
                if !self.scenes.contains_key(&candidate) {
                    break candidate;
                }
            },
        };
        if self.scenes.contains_key(&id) {
            return Err(GlyphfxError::validation(format!(
                "duplicate scene id '{id}'"
            )));
        }
        let scene = Scene::new(id.clone(), sync, is_looping);
        Ok(self.scenes.entry(id).or_insert(scene))
    }

    /// Registered scene `id`.
    pub fn query_scene(&self, id: &str) -> GlyphfxResult<&Scene> {
        self.scenes
            .get(id)
            .ok_or_else(|| GlyphfxError::scene_not_found(id))
    }

    /// Registered scene `id`, mutably.
    pub fn query_scene_mut(&mut self, id: &str) -> GlyphfxResult<&mut Scene> {
        self.scenes
            .get_mut(id)
            .ok_or_else(|| GlyphfxError::scene_not_found(id))
    }

    /// Every registered scene, ordered by id.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    /// Scene currently playing.
    pub fn active_scene(&self) -> Option<&Scene> {
        self.active_scene.as_ref().and_then(|id| self.scenes.get(id))
    }

    /// Make `id` the active scene, resuming from its play cursor.
    ///
    /// Returns the visual to show right away (the next pending frame) and the
    /// `SceneActivated` occurrence.
    pub fn activate_scene(&mut self, id: &str) -> GlyphfxResult<(Option<Visual>, Occurrence)> {
        let scene = self.query_scene(id)?;
        let visual = scene.current_visual().cloned();
        let active = scene.id().clone();
        let occurrence = Occurrence::scene(Event::SceneActivated, &active);
        self.active_scene = Some(active);
        Ok((visual, occurrence))
    }

    /// Clear the active scene if it is `id`, keeping its play position.
    pub fn deactivate_scene(&mut self, id: &str) -> bool {
        if self.active_scene.as_ref().is_some_and(|a| a.0 == id) {
            self.active_scene = None;
            return true;
        }
        false
    }

    /// Rewind scene `id` to its first frame.
    pub fn reset_scene(&mut self, id: &str) -> GlyphfxResult<()> {
        self.query_scene_mut(id)?.reset();
        Ok(())
    }

    /// True with no active scene, a looping active scene, or an exhausted one.
    pub fn is_active_scene_complete(&self) -> bool {
        match self.active_scene() {
            None => true,
            Some(scene) => scene.is_looping || scene.is_exhausted(),
        }
    }

    /// Advance the active scene by one step.
    ///
    /// A non-looping scene that plays its last frame rewinds, becomes inactive and reports
    /// `SceneComplete` exactly once. Synced scenes follow `progress` and complete once the path
    /// they follow is gone.
    pub fn step(&mut self, progress: Option<PathProgress>) -> AnimatorStep {
        let Some(id) = self.active_scene.clone() else {
            return AnimatorStep::default();
        };
        let Some(scene) = self.scenes.get_mut(&id) else {
            return AnimatorStep::default();
        };

        let (visual, finished) = match (scene.sync, progress) {
            (Some(metric), Some(p)) => {
                let ratio = match metric {
                    SyncMetric::Step => p.step_ratio,
                    SyncMetric::Distance => p.distance_ratio,
                };
                (scene.synced_visual(ratio), false)
            }
            (Some(_), None) => (scene.last_visual(), !scene.is_looping),
            (None, _) => {
                let visual = scene.next_visual();
                (visual, !scene.is_looping && scene.is_exhausted())
            }
        };

        if !finished {
            return AnimatorStep {
                visual,
                event: None,
            };
        }
        scene.reset();
        self.active_scene = None;
        AnimatorStep {
            visual,
            event: Some(Occurrence::scene(Event::SceneComplete, &id)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animator.rs"]
mod tests;

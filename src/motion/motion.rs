use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    engine::events::{Event, Occurrence},
    foundation::core::Coord,
    foundation::error::{GlyphfxError, GlyphfxResult},
    motion::path::{Advance, Path, PathId},
};

/// Per-character trajectory state: registered paths and the one currently being traversed.
#[derive(Clone, Debug)]
pub struct Motion {
    current_coord: Coord,
    previous_coord: Option<Coord>,
    paths: BTreeMap<PathId, Path>,
    active_path: Option<PathId>,
    next_path_id: usize,
}

impl Motion {
    /// Motion resting at `origin` with no paths.
    pub fn new(origin: Coord) -> Self {
        Self {
            current_coord: origin,
            previous_coord: None,
            paths: BTreeMap::new(),
            active_path: None,
            next_path_id: 0,
        }
    }

    /// Cell the character occupies now.
    pub fn current_coord(&self) -> Coord {
        self.current_coord
    }

    /// Coordinate before the most recent move, if the character has moved.
    pub fn previous_coord(&self) -> Option<Coord> {
        self.previous_coord
    }

    /// Jump to `coord` without traversal.
    pub fn set_coordinate(&mut self, coord: Coord) {
        self.previous_coord = Some(self.current_coord);
        self.current_coord = coord;
    }

    /// Register a new path. Without an explicit id, ids are assigned in creation order.
    pub fn new_path(
        &mut self,
        speed: f64,
        ease: Ease,
        hold_time: u32,
        id: Option<&str>,
    ) -> GlyphfxResult<&mut Path> {
        let id = match id {
            Some(id) => PathId::from(id),
            None => loop {
                let candidate = PathId(self.next_path_id.to_string());
                self.next_path_id += 1;
                if !self.paths.contains_key(&candidate) {
                    break candidate;
                }
            },
        };
        if self.paths.contains_key(&id) {
            return Err(GlyphfxError::validation(format!("duplicate path id '{id}'")));
        }
        let path = Path::new(id.clone(), speed, ease, hold_time)?;
        Ok(self.paths.entry(id).or_insert(path))
    }

    /// Registered path `id`.
    pub fn query_path(&self, id: &str) -> GlyphfxResult<&Path> {
        self.paths
            .get(id)
            .ok_or_else(|| GlyphfxError::path_not_found(id))
    }

    /// Registered path `id`, mutably.
    pub fn query_path_mut(&mut self, id: &str) -> GlyphfxResult<&mut Path> {
        self.paths
            .get_mut(id)
            .ok_or_else(|| GlyphfxError::path_not_found(id))
    }

    /// Every registered path, ordered by id.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.values()
    }

    /// Path being traversed.
    pub fn active_path(&self) -> Option<&Path> {
        self.active_path.as_ref().and_then(|id| self.paths.get(id))
    }

    /// Make `id` the active path, starting from the current coordinate.
    ///
    /// Replaces any active path and restarts `id` from its first segment if it was already active.
    pub fn activate_path(&mut self, id: &str) -> GlyphfxResult<Occurrence> {
        let origin = self.current_coord;
        let path = self.query_path_mut(id)?;
        path.begin(origin)?;
        tracing::trace!(path = id, total_ticks = path.total_ticks(), "path activated");
        let active = path.id().clone();
        let occurrence = Occurrence::path(Event::PathActivated, &active);
        self.active_path = Some(active);
        Ok(occurrence)
    }

    /// Clear the active path if it is `id`. Returns whether anything changed.
    pub fn deactivate_path(&mut self, id: &str) -> bool {
        if self.active_path.as_ref().is_some_and(|a| a.0 == id) {
            self.active_path = None;
            return true;
        }
        false
    }

    /// True when no path is active.
    pub fn movement_is_complete(&self) -> bool {
        self.active_path.is_none()
    }

    /// Advance the active path by one tick.
    ///
    /// Returns `PathComplete` on the tick the path finishes, or `PathActivated` when a looping
    /// path restarts.
    pub fn step(&mut self) -> Option<Occurrence> {
        let id = self.active_path.clone()?;
        let origin = self.current_coord;
        let path = self.paths.get_mut(&id)?;
        let (coord, finished) = match path.advance() {
            Advance::Moving(c) => (c, false),
            Advance::Finished(c) => (c, true),
        };
        if coord != self.current_coord {
            self.previous_coord = Some(self.current_coord);
            self.current_coord = coord;
        }
        if !finished {
            return None;
        }
        if path.is_looping {
            // Looping paths restart from where they ended and never complete. With nothing left
            // to traverse the character holds on the last waypoint.
            match path.begin(coord) {
                Ok(()) if path.total_ticks() > 0 || path.hold_time > 0 => {
                    return Some(Occurrence::path(Event::PathActivated, &id));
                }
                Ok(()) => return None,
                Err(err) => {
                    tracing::warn!(path = %id, %origin, %err, "looping path could not restart");
                }
            }
        }
        self.active_path = None;
        Some(Occurrence::path(Event::PathComplete, &id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/motion.rs"]
mod tests;

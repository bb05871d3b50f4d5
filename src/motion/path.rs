use std::borrow::Borrow;

use crate::{
    animation::ease::Ease,
    foundation::core::Coord,
    foundation::error::{GlyphfxError, GlyphfxResult},
    foundation::geometry::{
        find_length_of_bezier_control_polygon, find_length_of_line, find_point_on_bezier_curve,
        find_point_on_line,
    },
};

/// Identifier of a [`Path`], unique within one [`Motion`](crate::Motion).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PathId(pub String);

impl Borrow<str> for PathId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PathId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl std::fmt::Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target cell on a path, optionally approached along a quadratic Bezier curve.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Waypoint {
    /// Id, unique within the path.
    pub id: String,
    /// Cell to reach.
    pub coord: Coord,
    /// Control point of the curve ending at `coord`.
    pub bezier_control: Option<Coord>,
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    start: Coord,
    end: Coord,
    control: Option<Coord>,
    length: f64,
    ticks: u32,
}

impl Segment {
    fn new(start: Coord, end: Coord, control: Option<Coord>, speed: f64) -> Self {
        let length = match control {
            Some(c) => find_length_of_bezier_control_polygon(start, c, end),
            None => find_length_of_line(start, end),
        };
        Self {
            start,
            end,
            control,
            length,
            ticks: (length / speed).ceil() as u32,
        }
    }

    fn position(&self, eased: f64) -> Coord {
        match self.control {
            Some(c) => find_point_on_bezier_curve(self.start, c, self.end, eased),
            None => find_point_on_line(self.start, self.end, eased),
        }
    }
}

/// Result of advancing a path by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Advance {
    /// Still travelling or holding at the final waypoint.
    Moving(Coord),
    /// Traversal and hold are both over.
    Finished(Coord),
}

/// Ordered waypoints traversed at a fixed speed with easing applied per segment.
#[derive(Clone, Debug)]
pub struct Path {
    id: PathId,
    waypoints: Vec<Waypoint>,
    speed: f64,
    /// Easing applied within each segment.
    pub ease: Ease,
    /// Ticks to stay on the final waypoint before completing.
    pub hold_time: u32,
    /// Restart from the first waypoint instead of completing.
    pub is_looping: bool,

    segments: Vec<Segment>,
    segment_index: usize,
    segment_tick: u32,
    hold_remaining: u32,
    ticks_moved: u32,
    total_ticks: u32,
    total_distance: f64,
    distance_travelled: f64,
    last_coord: Coord,
}

pub(crate) fn validate_speed(speed: f64) -> GlyphfxResult<()> {
    if !(speed.is_finite() && speed > 0.0) {
        return Err(GlyphfxError::invalid_speed(format!(
            "path speed must be > 0, got {speed}"
        )));
    }
    Ok(())
}

impl Path {
    pub(crate) fn new(id: PathId, speed: f64, ease: Ease, hold_time: u32) -> GlyphfxResult<Self> {
        validate_speed(speed)?;
        Ok(Self {
            id,
            waypoints: Vec::new(),
            speed,
            ease,
            hold_time,
            is_looping: false,
            segments: Vec::new(),
            segment_index: 0,
            segment_tick: 0,
            hold_remaining: 0,
            ticks_moved: 0,
            total_ticks: 0,
            total_distance: 0.0,
            distance_travelled: 0.0,
            last_coord: Coord::new(0, 0),
        })
    }

    /// Id of the path.
    pub fn id(&self) -> &PathId {
        &self.id
    }

    /// Waypoints in traversal order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Cells per tick.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Change the speed used the next time the path is activated.
    pub fn set_speed(&mut self, speed: f64) -> GlyphfxResult<()> {
        validate_speed(speed)?;
        self.speed = speed;
        Ok(())
    }

    /// Append a waypoint. Without an explicit id, the waypoint index is used.
    pub fn new_waypoint(
        &mut self,
        coord: Coord,
        bezier_control: Option<Coord>,
        id: Option<&str>,
    ) -> &Waypoint {
        let id = id
            .map(str::to_owned)
            .unwrap_or_else(|| self.waypoints.len().to_string());
        self.waypoints.push(Waypoint {
            id,
            coord,
            bezier_control,
        });
        &self.waypoints[self.waypoints.len() - 1]
    }

    /// Waypoint `id`, if present.
    pub fn query_waypoint(&self, id: &str) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.id == id)
    }

    /// Ticks needed to traverse every segment of the current activation, excluding hold.
    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    /// Ticks spent moving since the last activation.
    pub fn ticks_moved(&self) -> u32 {
        self.ticks_moved
    }

    /// Summed segment lengths of the current activation.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Distance covered since the last activation, in eased units.
    pub fn distance_travelled(&self) -> f64 {
        self.distance_travelled
    }

    /// Fraction of movement ticks elapsed, `1.0` for a path with nothing to traverse.
    pub fn progress_ratio(&self) -> f64 {
        if self.total_ticks == 0 {
            1.0
        } else {
            f64::from(self.ticks_moved) / f64::from(self.total_ticks)
        }
    }

    /// Fraction of the total distance travelled, `1.0` for a zero-length path.
    pub fn distance_ratio(&self) -> f64 {
        if self.total_distance <= 0.0 {
            1.0
        } else {
            (self.distance_travelled / self.total_distance).clamp(0.0, 1.0)
        }
    }

    /// Rebuild segments from `origin` and rewind the traversal cursor.
    pub(crate) fn begin(&mut self, origin: Coord) -> GlyphfxResult<()> {
        if self.waypoints.is_empty() {
            return Err(GlyphfxError::validation(format!(
                "path '{}' has no waypoints",
                self.id
            )));
        }
        let mut start = origin;
        self.segments = self
            .waypoints
            .iter()
            .map(|w| {
                let seg = Segment::new(start, w.coord, w.bezier_control, self.speed);
                start = w.coord;
                seg
            })
            .collect();
        self.segment_index = 0;
        self.segment_tick = 0;
        self.hold_remaining = self.hold_time;
        self.ticks_moved = 0;
        self.total_ticks = self.segments.iter().map(|s| s.ticks).sum();
        self.total_distance = self.segments.iter().map(|s| s.length).sum();
        self.distance_travelled = 0.0;
        self.last_coord = origin;
        Ok(())
    }

    fn skip_empty_segments(&mut self) {
        while let Some(seg) = self.segments.get(self.segment_index) {
            if seg.ticks > 0 {
                break;
            }
            self.last_coord = seg.end;
            self.distance_travelled += seg.length;
            self.segment_index += 1;
        }
    }

    pub(crate) fn advance(&mut self) -> Advance {
        self.skip_empty_segments();

        if let Some(seg) = self.segments.get(self.segment_index).copied() {
            self.segment_tick += 1;
            self.ticks_moved += 1;
            let ratio = f64::from(self.segment_tick) / f64::from(seg.ticks);
            let eased = self.ease.apply(ratio);
            self.last_coord = seg.position(eased);

            let done_before: f64 = self.segments[..self.segment_index]
                .iter()
                .map(|s| s.length)
                .sum();
            self.distance_travelled = done_before + seg.length * eased.clamp(0.0, 1.0);

            if self.segment_tick >= seg.ticks {
                self.last_coord = seg.end;
                self.segment_index += 1;
                self.segment_tick = 0;
                self.skip_empty_segments();
                if self.segment_index >= self.segments.len() && self.hold_remaining == 0 {
                    return Advance::Finished(self.last_coord);
                }
            }
            return Advance::Moving(self.last_coord);
        }

        if self.hold_remaining > 0 {
            self.hold_remaining -= 1;
        }
        if self.hold_remaining == 0 {
            Advance::Finished(self.last_coord)
        } else {
            Advance::Moving(self.last_coord)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/path.rs"]
mod tests;

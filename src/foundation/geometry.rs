//! Grid geometry helpers.
//!
//! Terminal cells are roughly twice as tall as they are wide, so the circle helpers stretch the
//! column axis by [`CELL_ASPECT`] to look round on screen.

use kurbo::{Line, ParamCurve, QuadBez};

use crate::foundation::core::{Coord, Point};

/// Column stretch applied by circle helpers.
pub const CELL_ASPECT: f64 = 2.0;

/// Euclidean distance between two cells.
pub fn find_length_of_line(a: Coord, b: Coord) -> f64 {
    a.to_point().distance(b.to_point())
}

/// Length of the control polygon `start -> control -> end`.
///
/// Used to size the tick count of a curved segment; it is an upper bound on the arc length.
pub fn find_length_of_bezier_control_polygon(start: Coord, control: Coord, end: Coord) -> f64 {
    find_length_of_line(start, control) + find_length_of_line(control, end)
}

/// Cell at ratio `t` on the straight line from `start` to `end`.
pub fn find_point_on_line(start: Coord, end: Coord, t: f64) -> Coord {
    let line = Line::new(start.to_point(), end.to_point());
    Coord::from_point(line.eval(t))
}

/// Cell at ratio `t` on the quadratic Bezier curve `start -> control -> end`.
pub fn find_point_on_bezier_curve(start: Coord, control: Coord, end: Coord, t: f64) -> Coord {
    let curve = QuadBez::new(start.to_point(), control.to_point(), end.to_point());
    Coord::from_point(curve.eval(t))
}

/// Cell reached after travelling `distance` from `origin` towards `target`.
///
/// Travel continues past `target` when `distance` exceeds the line length.
pub fn find_coord_at_distance(origin: Coord, target: Coord, distance: f64) -> Coord {
    let length = find_length_of_line(origin, target);
    if length == 0.0 {
        return origin;
    }
    let o = origin.to_point();
    let dir = (target.to_point() - o) / length;
    Coord::from_point(o + dir * distance)
}

/// `num_points` cells evenly spaced on an (aspect-corrected) circle around `origin`.
///
/// Duplicate cells produced by rounding are dropped, preserving angular order.
pub fn find_coords_on_circle(origin: Coord, radius: f64, num_points: usize) -> Vec<Coord> {
    let mut out: Vec<Coord> = Vec::with_capacity(num_points);
    if num_points == 0 {
        return out;
    }
    let step = std::f64::consts::TAU / num_points as f64;
    let o = origin.to_point();
    for i in 0..num_points {
        let angle = step * i as f64;
        let p = Point::new(
            o.x + radius * CELL_ASPECT * angle.cos(),
            o.y + radius * angle.sin(),
        );
        let c = Coord::from_point(p);
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

/// Every cell inside the ellipse with vertical semi-axis `distance` centered on `center`.
pub fn find_coords_in_circle(center: Coord, distance: i32) -> Vec<Coord> {
    let b = distance.max(0);
    let a = (f64::from(b) * CELL_ASPECT).round() as i32;
    if a == 0 || b == 0 {
        return vec![center];
    }
    let (a2, b2) = (f64::from(a * a), f64::from(b * b));
    let mut out = Vec::new();
    for column in (center.column - a)..=(center.column + a) {
        for row in (center.row - b)..=(center.row + b) {
            let dx = f64::from(column - center.column);
            let dy = f64::from(row - center.row);
            if dx * dx / a2 + dy * dy / b2 <= 1.0 {
                out.push(Coord::new(column, row));
            }
        }
    }
    out
}

/// Distance of `coord` from the center of a `right x top` area, normalized to `[0, 1]`.
///
/// Rows are weighted by the cell aspect so the result is round on screen.
pub fn find_normalized_distance_from_center(top: i32, right: i32, coord: Coord) -> f64 {
    let cx = f64::from(right + 1) / 2.0;
    let cy = f64::from(top + 1) / 2.0;
    let max = ((cx - 1.0).powi(2) + ((cy - 1.0) * CELL_ASPECT).powi(2)).sqrt();
    if max == 0.0 {
        return 0.0;
    }
    let dx = f64::from(coord.column) - cx;
    let dy = (f64::from(coord.row) - cy) * CELL_ASPECT;
    ((dx * dx + dy * dy).sqrt() / max).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;

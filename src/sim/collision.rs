//! Slice detection: pointer-drag segment against an entity's bounding circle
//!
//! Uses the clamped projection so hits past either end of the drag are never
//! reported. Pure functions only; the caller decides what a hit means.

use glam::Vec2;

use super::entity::Entity;

/// Segments shorter than this (squared) are treated as a single point
const DEGENERATE_LEN_SQ: f32 = 1e-6;

/// A pointer movement over one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSegment {
    pub from: Vec2,
    pub to: Vec2,
}

impl DragSegment {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    /// Same segment traversed in the other direction
    pub fn reversed(self) -> Self {
        Self::new(self.to, self.from)
    }
}

/// Closest point on segment `a`-`b` to `p`
#[inline]
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let line_vec = b - a;
    let len_sq = line_vec.length_squared();
    if len_sq < DEGENERATE_LEN_SQ {
        return a;
    }
    let t = ((p - a).dot(line_vec) / len_sq).clamp(0.0, 1.0);
    a + line_vec * t
}

/// Minimum distance from `center` to the segment `a`-`b`.
///
/// Endpoints are put in a canonical order first so swapping them yields the
/// exact same floating point result.
pub fn segment_point_distance(a: Vec2, b: Vec2, center: Vec2) -> f32 {
    let (a, b) = if (a.x, a.y) <= (b.x, b.y) { (a, b) } else { (b, a) };
    if (b - a).length_squared() < DEGENERATE_LEN_SQ {
        return (center - a).length();
    }
    (center - closest_point_on_segment(a, b, center)).length()
}

/// Does the drag cut a circle? `accuracy` scales the effective radius.
#[inline]
pub fn segment_hits_circle(seg: DragSegment, center: Vec2, radius: f32, accuracy: f32) -> bool {
    segment_point_distance(seg.from, seg.to, center) <= radius * accuracy
}

/// Does the drag cut this entity? Only airborne entities can be hit.
pub fn slice_hits(seg: DragSegment, entity: &Entity, accuracy: f32) -> bool {
    entity.is_airborne() && segment_hits_circle(seg, entity.pos, entity.radius, accuracy)
}

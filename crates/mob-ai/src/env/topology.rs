//! Visibility, reachability, and path queries against the world geometry.
//!
//! The engine does not prescribe a spatial index or pathfinding algorithm;
//! it only needs the answers below, with bounded synchronous cost.

use crate::types::{Direction, Point};

/// State of a door tile encountered while replaying an investigation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorState {
    Open,
    Closed { locked: bool },
}

/// Geometry collaborator: line of sight, ground paths, and region flags.
pub trait TopologyOracle {
    /// Straight-line visibility between two points.
    fn line_of_sight(&self, from: Point, to: Point) -> bool;

    /// True when an unobstructed ground path exists from `from` to `to`.
    fn path_clear(&self, from: Point, to: Point) -> bool;

    /// Computes a step sequence from `from` toward `to`, or `None` when no
    /// path exists. Used once per investigation to record a snapshot; replay
    /// never replans.
    fn plan_path(&self, from: Point, to: Point) -> Option<Vec<Direction>>;

    /// Door occupying `at`, if any.
    fn door_at(&self, at: Point) -> Option<DoorState>;

    /// True when `at` lies inside a guarded town region.
    fn guarded(&self, at: Point) -> bool;
}

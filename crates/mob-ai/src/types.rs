//! Shared scalar types: identifiers, grid positions, directions, and the
//! millisecond tick used by the scheduler and all memory TTLs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for any mobile entity the engine reasons about.
///
/// The engine never owns the entity; a `MobId` is only meaningful to the
/// oracles that resolve it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct MobId(pub u32);

impl fmt::Display for MobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete world position in tile coordinates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: the number of steps a mob needs to reach `other`
    /// when diagonal movement costs the same as orthogonal.
    pub fn distance(&self, other: Point) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// Returns the adjacent point one step in `dir`.
    pub fn step(&self, dir: Direction) -> Point {
        let (dx, dy) = dir.offset();
        Point::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Eight-way movement direction.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in clockwise order starting from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Tile offset of one step in this direction. North is negative y.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// The direction pointing the opposite way, used when backing off.
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Rough direction from `from` toward `to`. Returns `None` when the two
    /// points coincide.
    pub fn toward(from: Point, to: Point) -> Option<Direction> {
        let dx = (to.x - from.x).signum();
        let dy = (to.y - from.y).signum();
        match (dx, dy) {
            (0, 0) => None,
            (0, -1) => Some(Direction::North),
            (1, -1) => Some(Direction::NorthEast),
            (1, 0) => Some(Direction::East),
            (1, 1) => Some(Direction::SouthEast),
            (0, 1) => Some(Direction::South),
            (-1, 1) => Some(Direction::SouthWest),
            (-1, 0) => Some(Direction::West),
            (-1, -1) => Some(Direction::NorthWest),
            _ => unreachable!("signum is always in -1..=1"),
        }
    }
}

/// Engine time in milliseconds since world start.
///
/// Every component takes the current tick as an argument; nothing in the
/// engine reads a wall clock, which keeps pulses and TTL expiry deterministic
/// under test.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    pub fn since(&self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_distance_counts_steps() {
        let a = Point::new(0, 0);
        assert_eq!(a.distance(Point::new(3, 1)), 3);
        assert_eq!(a.distance(Point::new(-2, -2)), 2);
        assert_eq!(a.distance(a), 0);
    }

    #[test]
    fn toward_picks_the_rough_heading() {
        let from = Point::new(5, 5);
        assert_eq!(
            Direction::toward(from, Point::new(9, 5)),
            Some(Direction::East)
        );
        assert_eq!(
            Direction::toward(from, Point::new(2, 9)),
            Some(Direction::SouthWest)
        );
        assert_eq!(Direction::toward(from, from), None);
    }

    #[test]
    fn step_and_reverse_round_trip() {
        let p = Point::new(4, 4);
        for dir in Direction::ALL {
            assert_eq!(p.step(dir).step(dir.reverse()), p);
        }
    }
}

//! Points and compass directions
//!
//! Screen orientation throughout: `x` grows to the right (east), `y` grows
//! downward (south), so north is `(0, -1)`.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use anyhow::{Result, bail};

/// A point (or offset) on the integer plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point2 {
    pub x: i64,
    pub y: i64,
}

impl Point2 {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: Self) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal neighbours in N, E, S, W order
    pub fn neighbors4(self) -> impl Iterator<Item = Self> {
        Direction::ALL.into_iter().map(move |d| self + d.delta())
    }

    /// All eight surrounding points
    pub fn neighbors8(self) -> impl Iterator<Item = Self> {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| Self::new(dx, dy)))
            .filter(|&d| d != Self::ORIGIN)
            .map(move |d| self + d)
    }

    pub fn step(self, direction: Direction) -> Self {
        self + direction.delta()
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Add for Point2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<i64> for Point2 {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// One of the four compass directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise from north
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn delta(self) -> Point2 {
        match self {
            Direction::North => Point2::new(0, -1),
            Direction::East => Point2::new(1, 0),
            Direction::South => Point2::new(0, 1),
            Direction::West => Point2::new(-1, 0),
        }
    }

    pub fn turn_right(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    pub fn turn_left(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    pub fn reverse(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    /// Position in [`Direction::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parses `U`/`R`/`D`/`L` as well as `N`/`E`/`S`/`W` and the arrows `^>v<`
    pub fn from_char(c: char) -> Result<Self> {
        Ok(match c {
            'U' | 'N' | '^' => Direction::North,
            'R' | 'E' | '>' => Direction::East,
            'D' | 'S' | 'v' => Direction::South,
            'L' | 'W' | '<' => Direction::West,
            _ => bail!("not a direction: {c:?}"),
        })
    }
}

/// A point in integer 3D space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point3 {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Point3 {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Face-adjacent neighbours
    pub fn neighbors6(self) -> impl Iterator<Item = Self> {
        const DELTAS: [(i64, i64, i64); 6] = [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ];
        DELTAS
            .into_iter()
            .map(move |(dx, dy, dz)| Self::new(self.x + dx, self.y + dy, self.z + dz))
    }

    /// Squared Euclidean distance; exact for integer coordinates
    pub fn distance_squared(self, other: Self) -> u128 {
        let dx = self.x.abs_diff(other.x) as u128;
        let dy = self.y.abs_diff(other.y) as u128;
        let dz = self.z.abs_diff(other.z) as u128;
        dx * dx + dy * dy + dz * dz
    }

    pub fn manhattan(self, other: Self) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }
}

impl Add for Point3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_cycles_through_compass() {
        let mut d = Direction::North;
        for expected in [Direction::East, Direction::South, Direction::West, Direction::North] {
            d = d.turn_right();
            assert_eq!(d, expected);
        }
        assert_eq!(Direction::North.turn_left(), Direction::West);
        assert_eq!(Direction::East.reverse(), Direction::West);
        for d in Direction::ALL {
            assert_eq!(d.turn_left().turn_right(), d);
            assert_eq!(d.delta() + d.reverse().delta(), Point2::ORIGIN);
        }
    }

    #[test]
    fn neighbours() {
        let p = Point2::new(3, -2);
        let n4: Vec<_> = p.neighbors4().collect();
        assert_eq!(
            n4,
            vec![
                Point2::new(3, -3),
                Point2::new(4, -2),
                Point2::new(3, -1),
                Point2::new(2, -2)
            ]
        );
        assert_eq!(p.neighbors8().count(), 8);
        assert!(p.neighbors8().all(|q| q != p && q.manhattan(p) <= 2));
        assert_eq!(Point3::new(0, 0, 0).neighbors6().count(), 6);
    }

    #[test]
    fn distances() {
        assert_eq!(Point2::new(-3, 4).manhattan(Point2::ORIGIN), 7);
        assert_eq!(Point3::new(1, 2, 3).distance_squared(Point3::new(4, 6, 3)), 25);
        assert_eq!(Point3::new(1, 2, 3).manhattan(Point3::new(0, 0, 0)), 6);
    }

    #[test]
    fn parse_directions() {
        assert_eq!(Direction::from_char('U').unwrap(), Direction::North);
        assert_eq!(Direction::from_char('<').unwrap(), Direction::West);
        assert!(Direction::from_char('x').is_err());
    }
}

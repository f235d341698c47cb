use macroquad::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Integer grid coordinate of a tile cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        GridPos { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        GridPos::new(self.x + dx, self.y + dy)
    }
}

/// The 3x3 block around a cell (the cell itself included).
pub const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (0, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Orthogonal neighbour directions as bit flags.
pub mod dir {
    pub const RIGHT: u8 = 0b0001;
    pub const LEFT: u8 = 0b0010;
    pub const UP: u8 = 0b0100;
    pub const DOWN: u8 = 0b1000;

    pub const ALL: [(u8, (i32, i32)); 4] = [
        (RIGHT, (1, 0)),
        (LEFT, (-1, 0)),
        (UP, (0, -1)),
        (DOWN, (0, 1)),
    ];
}

#[inline]
pub fn world_to_grid(p: Vec2, tile_size: f32) -> GridPos {
    GridPos {
        x: (p.x / tile_size).floor() as i32,
        y: (p.y / tile_size).floor() as i32,
    }
}

#[inline]
pub fn grid_to_world(g: GridPos, tile_size: f32) -> Vec2 {
    vec2(g.x as f32 * tile_size, g.y as f32 * tile_size)
}

/// On-disk key form: `"x;y"`.
impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadGridKey(pub String);

impl fmt::Display for BadGridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed grid key '{}', expected \"x;y\"", self.0)
    }
}

impl FromStr for GridPos {
    type Err = BadGridKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || BadGridKey(s.to_owned());
        let (x, y) = s.split_once(';').ok_or_else(bad)?;
        Ok(GridPos {
            x: x.trim().parse().map_err(|_| bad())?,
            y: y.trim().parse().map_err(|_| bad())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_to_grid_floors_negative_coordinates() {
        assert_eq!(world_to_grid(vec2(0.0, 15.9), 16.0), GridPos::new(0, 0));
        assert_eq!(world_to_grid(vec2(-0.5, 16.0), 16.0), GridPos::new(-1, 1));
        assert_eq!(world_to_grid(vec2(-16.0, -17.0), 16.0), GridPos::new(-1, -2));
    }

    #[test]
    fn grid_keys_round_trip_through_text() {
        let p = GridPos::new(-3, 12);
        assert_eq!(p.to_string(), "-3;12");
        assert_eq!("-3;12".parse::<GridPos>(), Ok(p));
        assert!("3,12".parse::<GridPos>().is_err());
        assert!("a;1".parse::<GridPos>().is_err());
    }
}

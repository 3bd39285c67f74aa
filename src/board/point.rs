//! Toroidal grid geometry.
//!
//! Points follow the host's orientation: `x` grows eastwards and `y` grows
//! northwards. The host flattens the grid row by row starting at the
//! northern edge, so index 0 is the north-west corner.

/// A cell coordinate on a square board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Converts a flat host index into a point on a board of side `size`.
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            x: index % size,
            y: size - index / size - 1,
        }
    }

    /// Converts the point back into the host's flat index.
    pub fn to_index(self, size: usize) -> usize {
        (size - self.y - 1) * size + self.x
    }

    /// Returns the neighbouring point one step in `dir`, wrapping at the edges.
    pub fn translate(self, dir: Direction, size: usize) -> Self {
        let (dx, dy) = dir.offset();
        Self {
            x: wrap(self.x as i64 + dx, size),
            y: wrap(self.y as i64 + dy, size),
        }
    }
}

fn wrap(v: i64, size: usize) -> usize {
    v.rem_euclid(size as i64) as usize
}

/// One of the four compass moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

/// All directions in the order ships scan their neighbourhood.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// Unit offset `(dx, dy)` of a single step.
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_zero_is_north_west_corner() {
        let p = Point::from_index(0, 5);
        assert_eq!(p, Point::new(0, 4));
        assert_eq!(p.to_index(5), 0);
    }

    #[test]
    fn index_mapping_is_bijective() {
        let size = 7;
        for index in 0..size * size {
            assert_eq!(Point::from_index(index, size).to_index(size), index);
        }
    }

    #[test]
    fn north_decreases_flat_index_by_one_row() {
        let size = 5;
        let p = Point::from_index(12, size);
        assert_eq!(p.translate(Direction::North, size).to_index(size), 7);
        assert_eq!(p.translate(Direction::South, size).to_index(size), 17);
        assert_eq!(p.translate(Direction::East, size).to_index(size), 13);
        assert_eq!(p.translate(Direction::West, size).to_index(size), 11);
    }

    #[test]
    fn translate_wraps_around_edges() {
        let size = 4;
        assert_eq!(Point::new(0, 0).translate(Direction::West, size), Point::new(3, 0));
        assert_eq!(Point::new(0, 0).translate(Direction::South, size), Point::new(0, 3));
        assert_eq!(Point::new(3, 3).translate(Direction::East, size), Point::new(0, 3));
        assert_eq!(Point::new(3, 3).translate(Direction::North, size), Point::new(3, 0));
    }
}

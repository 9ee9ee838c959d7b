/// A cell coordinate on the field, in `(row, column)` order.
///
/// Coordinates are signed because the falling piece spawns one row above the
/// visible field (row -1) and kick offsets can probe outside the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Add)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }
}

/// One of the four unit moves a piece can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The unit delta this direction applies to a position.
    #[must_use]
    pub const fn delta(self) -> Position {
        match self {
            Direction::Up => Position::new(-1, 0),
            Direction::Down => Position::new(1, 0),
            Direction::Left => Position::new(0, -1),
            Direction::Right => Position::new(0, 1),
        }
    }
}

/// Image of the coordinate `(i, j)` under a 90° clockwise rotation of an
/// `size × size` grid: `(i', j') = (j, size - 1 - i)`.
#[must_use]
pub const fn rotate_coordinate_right((i, j): (usize, usize), size: usize) -> (usize, usize) {
    (j, size - 1 - i)
}

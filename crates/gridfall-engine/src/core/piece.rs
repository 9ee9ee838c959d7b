use crate::ShapeError;

use super::{
    grid::Grid,
    position::{Position, rotate_coordinate_right},
};

/// Row the active piece spawns on: one above the visible field.
///
/// A freshly spawned piece overlaps this sentinel row until the first
/// successful gravity step. A piece that can no longer fall while still on
/// this row signals that the stack has reached the top.
pub const SPAWN_ROW: i32 = -1;

/// Enum naming the seven catalog pieces, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// O-piece (2×2 square, exempt from rotation).
    O = 0,
    /// S-piece.
    S = 1,
    /// Z-piece.
    Z = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// T-piece.
    T = 5,
    /// I-piece (4×4 bitmap).
    I = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All kinds in catalog order. Seeds the bag generator.
    pub const ALL: [Self; Self::LEN] = [
        Self::O,
        Self::S,
        Self::Z,
        Self::L,
        Self::J,
        Self::T,
        Self::I,
    ];

    /// Fixed colour name of this piece kind.
    #[must_use]
    pub const fn colour(self) -> &'static str {
        match self {
            Self::O => "gold",
            Self::S => "green",
            Self::Z => "red",
            Self::L => "orange",
            Self::J => "blue",
            Self::T => "purple",
            Self::I => "teal",
        }
    }

    const fn bitmap(self) -> &'static [&'static [u8]] {
        match self {
            Self::O => &[
                &[1, 1], //
                &[1, 1],
            ],
            Self::S => &[
                &[0, 1, 1], //
                &[1, 1, 0],
                &[0, 0, 0],
            ],
            Self::Z => &[
                &[1, 1, 0], //
                &[0, 1, 1],
                &[0, 0, 0],
            ],
            Self::L => &[
                &[1, 1, 1], //
                &[1, 0, 0],
                &[0, 0, 0],
            ],
            Self::J => &[
                &[1, 1, 1], //
                &[0, 0, 1],
                &[0, 0, 0],
            ],
            Self::T => &[
                &[1, 1, 1], //
                &[0, 1, 0],
                &[0, 0, 0],
            ],
            Self::I => &[
                &[0, 0, 0, 0],
                &[1, 1, 1, 1],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
            ],
        }
    }

    /// Builds a fresh copy of this kind's spawn-orientation shape bitmap.
    ///
    /// Shapes are square: 2×2 for O, 4×4 for I, 3×3 for the rest. Rotated
    /// variants are derived with [`rotate_shape_right`]; the catalog bitmaps
    /// themselves never change.
    #[must_use]
    pub fn base_shape(self) -> Grid<bool> {
        let rows = self
            .bitmap()
            .iter()
            .map(|row| row.iter().map(|&cell| cell != 0).collect())
            .collect();
        Grid::from_rows(rows)
    }
}

/// Rotates a square shape bitmap 90° clockwise, producing a new grid.
///
/// # Errors
///
/// Returns [`ShapeError::InvalidGeometry`] if the bitmap is not square.
pub fn rotate_shape_right(shape: &Grid<bool>) -> Result<Grid<bool>, ShapeError> {
    let size = shape.rows();
    if size != shape.columns() {
        return Err(ShapeError::InvalidGeometry);
    }

    let mut rotated = Grid::new(size, size, false);
    for (i, j, &value) in shape.entries() {
        let (i2, j2) = rotate_coordinate_right((i, j), size);
        rotated.set(i2, j2, value);
    }
    Ok(rotated)
}

/// A `(Δrow, Δcolumn)` adjustment tried when a raw rotation collides.
pub type KickOffset = (i32, i32);

// Clockwise wall-kick tables of the standard rotation system. Entry i holds
// the 5 tests for a rotation that starts from rotation index i; the first
// test is always no kick. There is no counter-clockwise table.
const SIZE3_KICK_OFFSETS: [[KickOffset; 5]; 4] = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

const SIZE4_KICK_OFFSETS: [[KickOffset; 5]; 4] = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Looks up the clockwise kick-offset table for a shape size.
///
/// The outer index is the rotation index *before* the clockwise rotation is
/// applied; each entry lists 5 offsets to try in order.
///
/// # Errors
///
/// Returns [`ShapeError::UnsupportedKickSize`] for any size other than 3
/// or 4. The 2×2 piece never rotates and has no table.
pub fn kick_offsets(size: usize) -> Result<&'static [[KickOffset; 5]; 4], ShapeError> {
    match size {
        3 => Ok(&SIZE3_KICK_OFFSETS),
        4 => Ok(&SIZE4_KICK_OFFSETS),
        size => Err(ShapeError::UnsupportedKickSize { size }),
    }
}

/// The falling piece: a catalog kind at a position and rotation, carrying
/// its current rotated shape bitmap.
///
/// The game owns the single authoritative copy and replaces it wholesale on
/// spawn, rotation, and hold. Field operations hand back candidate copies
/// rather than mutating shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub(crate) position: Position,
    pub(crate) rotation: u8,
    pub(crate) kind: PieceKind,
    pub(crate) shape: Grid<bool>,
}

impl ActivePiece {
    /// Creates a piece at its spawn placement: row -1 (sentinel), centered
    /// horizontally by `(field_columns - shape_columns) / 2`, rotation 0.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn spawn(kind: PieceKind, field_columns: usize) -> Self {
        let shape = kind.base_shape();
        let column = (field_columns as i32 - shape.columns() as i32) / 2;
        Self {
            position: Position::new(SPAWN_ROW, column),
            rotation: 0,
            kind,
            shape,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Rotation index, 0..=3.
    #[must_use]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Current rotated shape bitmap.
    #[must_use]
    pub fn shape(&self) -> &Grid<bool> {
        &self.shape
    }

    #[must_use]
    pub fn colour(&self) -> &'static str {
        self.kind.colour()
    }

    /// Copy of this piece placed at `position`.
    #[must_use]
    pub fn at(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Absolute field positions of the occupied shape cells.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_cells(&self) -> impl Iterator<Item = Position> {
        self.shape
            .keys_where(|&cell| cell)
            .map(|(i, j)| self.position + Position::new(i as i32, j as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shapes_are_square() {
        for kind in PieceKind::ALL {
            let shape = kind.base_shape();
            assert_eq!(shape.rows(), shape.columns(), "{kind:?}");
        }
    }

    #[test]
    fn test_catalog_colours_are_unique() {
        let colours: Vec<_> = PieceKind::ALL.iter().map(|kind| kind.colour()).collect();
        let mut deduped = colours.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), colours.len());
    }

    #[test]
    fn test_every_piece_occupies_four_cells() {
        for kind in PieceKind::ALL {
            let shape = kind.base_shape();
            assert_eq!(shape.keys_where(|&cell| cell).count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_four_right_rotations_restore_shape() {
        for kind in PieceKind::ALL {
            if kind == PieceKind::O {
                continue;
            }
            let original = kind.base_shape();
            let mut shape = original.clone();
            for _ in 0..4 {
                shape = rotate_shape_right(&shape).unwrap();
            }
            assert_eq!(shape, original, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_right_quarter_turn() {
        let shape = PieceKind::T.base_shape();
        let rotated = rotate_shape_right(&shape).unwrap();
        let expected = Grid::from_rows(vec![
            vec![false, false, true],
            vec![false, true, true],
            vec![false, false, true],
        ]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_rotate_non_square_shape_fails() {
        let shape = Grid::from_rows(vec![vec![true, true, false], vec![false, true, true]]);
        assert_eq!(
            rotate_shape_right(&shape),
            Err(ShapeError::InvalidGeometry)
        );
    }

    #[test]
    fn test_kick_offsets_first_test_is_no_kick() {
        for size in [3, 4] {
            let tables = kick_offsets(size).unwrap();
            for tests in tables {
                assert_eq!(tests[0], (0, 0));
            }
        }
    }

    #[test]
    fn test_kick_offsets_unsupported_sizes() {
        for size in [0, 1, 2, 5] {
            assert_eq!(
                kick_offsets(size),
                Err(ShapeError::UnsupportedKickSize { size })
            );
        }
    }

    #[test]
    fn test_spawn_placement() {
        // 3-wide shape on a 10-wide field centers at column 3 (floor of 3.5).
        let piece = ActivePiece::spawn(PieceKind::T, 10);
        assert_eq!(piece.position(), Position::new(SPAWN_ROW, 3));
        assert_eq!(piece.rotation(), 0);

        let square = ActivePiece::spawn(PieceKind::O, 10);
        assert_eq!(square.position(), Position::new(SPAWN_ROW, 4));

        let bar = ActivePiece::spawn(PieceKind::I, 10);
        assert_eq!(bar.position(), Position::new(SPAWN_ROW, 3));
    }

    #[test]
    fn test_occupied_cells_offset_by_position() {
        let piece = ActivePiece::spawn(PieceKind::O, 10).at(Position::new(2, 4));
        let cells: Vec<_> = piece.occupied_cells().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(2, 4),
                Position::new(2, 5),
                Position::new(3, 4),
                Position::new(3, 5),
            ]
        );
    }
}

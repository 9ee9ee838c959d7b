use crate::{
    ShapeError,
    core::{
        grid::Grid,
        piece::{ActivePiece, PieceKind, kick_offsets, rotate_shape_right},
        position::{Direction, Position},
    },
};

/// A single cell of the playing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Unoccupied cell.
    #[default]
    Empty,
    /// Cell occupied by a locked piece of the given kind.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Colour of the occupying piece, or `None` for an empty cell.
    #[must_use]
    pub fn colour(self) -> Option<&'static str> {
        match self {
            Cell::Empty => None,
            Cell::Piece(kind) => Some(kind.colour()),
        }
    }
}

/// Row/column dimensions of a playing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for FieldConfig {
    /// The standard 20×10 field.
    fn default() -> Self {
        Self {
            rows: 20,
            columns: 10,
        }
    }
}

/// The placed-cell grid and its spatial rules.
///
/// Owns a [`Grid`] of [`Cell`]s (composition: collision and lock logic is
/// distinct from generic grid storage). Answers collision queries, performs
/// moves and rotations with kick resolution, affixes landed pieces, and
/// detects and clears completed rows. The grid is mutated only through
/// [`Field::affix`] and [`Field::clear_completed_rows`].
#[derive(Debug, Clone)]
pub struct Field {
    grid: Grid<Cell>,
}

impl Field {
    #[must_use]
    pub fn new(config: FieldConfig) -> Self {
        Self {
            grid: Grid::new(config.rows, config.columns, Cell::Empty),
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    /// Read access to the placed cells, for rendering.
    #[must_use]
    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn set_cell(&mut self, row: usize, column: usize, cell: Cell) {
        self.grid.set(row, column, cell);
    }

    /// Whether any occupied cell of the piece is out of bounds or overlaps
    /// a placed cell.
    #[must_use]
    pub fn has_collided(&self, piece: &ActivePiece) -> bool {
        for position in piece.occupied_cells() {
            let (Ok(row), Ok(column)) = (
                usize::try_from(position.row),
                usize::try_from(position.column),
            ) else {
                return true;
            };
            if row >= self.grid.rows() || column >= self.grid.columns() {
                return true;
            }
            if !self.grid.get(row, column).is_empty() {
                return true;
            }
        }
        false
    }

    /// Offsets the piece one cell in `direction` if the candidate placement
    /// does not collide. Commits in place and reports whether it moved.
    pub fn move_piece(&self, piece: &mut ActivePiece, direction: Direction) -> bool {
        let candidate = piece.at(piece.position() + direction.delta());
        if self.has_collided(&candidate) {
            return false;
        }
        *piece = candidate;
        true
    }

    /// Rotates the piece 90° clockwise with wall-kick correction.
    ///
    /// The 2×2 piece does not rotate and is returned unchanged. Otherwise
    /// the shape bitmap is rotated, the rotation index advances modulo 4,
    /// and the 5 kick offsets for (shape size, pre-rotation index) are
    /// tried in order as deltas from the original position. The first
    /// non-colliding placement wins; if all 5 fail, the original unrotated
    /// piece is returned.
    ///
    /// # Errors
    ///
    /// Propagates [`ShapeError`] for a non-square shape or a shape size
    /// without a kick table, both of which mean the catalog is corrupted.
    pub fn rotate_right(&self, piece: &ActivePiece) -> Result<ActivePiece, ShapeError> {
        let size = piece.shape().rows();
        if size == 2 {
            return Ok(piece.clone());
        }

        let rotated = ActivePiece {
            position: piece.position(),
            rotation: (piece.rotation() + 1) % 4,
            kind: piece.kind(),
            shape: rotate_shape_right(piece.shape())?,
        };

        let tests = &kick_offsets(size)?[usize::from(piece.rotation())];
        for &(delta_row, delta_column) in tests {
            let kicked =
                rotated.at(piece.position() + Position::new(delta_row, delta_column));
            if !self.has_collided(&kicked) {
                return Ok(kicked);
            }
        }

        Ok(piece.clone())
    }

    /// Writes the piece's kind into every field cell it occupies.
    ///
    /// No collision re-check: the caller guarantees a valid placement.
    #[expect(clippy::cast_sign_loss)]
    pub fn affix(&mut self, piece: &ActivePiece) {
        for position in piece.occupied_cells() {
            self.grid.set(
                position.row as usize,
                position.column as usize,
                Cell::Piece(piece.kind()),
            );
        }
    }

    /// Indices of rows with every cell occupied, in descending order.
    ///
    /// Bottom-most first: [`Field::clear_completed_rows`] relies on this
    /// collection order when it relocates the cleared rows.
    #[must_use]
    pub fn find_completed_rows(&self) -> Vec<usize> {
        (0..self.grid.rows())
            .rev()
            .filter(|&row| self.grid.row(row).iter().all(|cell| !cell.is_empty()))
            .collect()
    }

    /// Blanks every completed row and drops the field down.
    ///
    /// The grid is rebuilt with the cleared (now blank) rows stacked at the
    /// top and the untouched rows below them in their original relative
    /// order, preserving the row count. Returns the number of rows cleared.
    pub fn clear_completed_rows(&mut self) -> usize {
        let completed = self.find_completed_rows();
        if completed.is_empty() {
            return 0;
        }

        for &row in &completed {
            self.grid.fill_row(row, Cell::Empty);
        }

        let mut new_rows = Vec::with_capacity(self.grid.rows());
        for &row in completed.iter().rev() {
            new_rows.push(self.grid.row(row).to_vec());
        }
        for row in 0..self.grid.rows() {
            if !completed.contains(&row) {
                new_rows.push(self.grid.row(row).to_vec());
            }
        }
        self.grid = Grid::from_rows(new_rows);

        completed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_field() -> Field {
        Field::new(FieldConfig {
            rows: 6,
            columns: 6,
        })
    }

    fn piece_at(kind: PieceKind, row: i32, column: i32, field: &Field) -> ActivePiece {
        ActivePiece::spawn(kind, field.columns()).at(Position::new(row, column))
    }

    #[test]
    fn test_collision_bounds() {
        let field = small_field();

        // In bounds, empty field.
        assert!(!field.has_collided(&piece_at(PieceKind::O, 0, 0, &field)));
        assert!(!field.has_collided(&piece_at(PieceKind::O, 4, 4, &field)));

        // Each edge violation.
        assert!(field.has_collided(&piece_at(PieceKind::O, -1, 0, &field)));
        assert!(field.has_collided(&piece_at(PieceKind::O, 0, -1, &field)));
        assert!(field.has_collided(&piece_at(PieceKind::O, 5, 0, &field)));
        assert!(field.has_collided(&piece_at(PieceKind::O, 0, 5, &field)));
    }

    #[test]
    fn test_collision_with_placed_cells() {
        let mut field = small_field();
        field.set_cell(3, 3, Cell::Piece(PieceKind::I));

        // O at (2, 2) covers rows 2-3, columns 2-3, overlapping (3, 3).
        assert!(field.has_collided(&piece_at(PieceKind::O, 2, 2, &field)));
        // One column to the left it fits.
        assert!(!field.has_collided(&piece_at(PieceKind::O, 2, 1, &field)));
    }

    #[test]
    fn test_move_commits_or_leaves_untouched() {
        let field = small_field();
        let mut piece = piece_at(PieceKind::O, 0, 0, &field);

        assert!(field.move_piece(&mut piece, Direction::Right));
        assert_eq!(piece.position(), Position::new(0, 1));

        // Blocked against the left wall after moving back.
        assert!(field.move_piece(&mut piece, Direction::Left));
        assert!(!field.move_piece(&mut piece, Direction::Left));
        assert_eq!(piece.position(), Position::new(0, 0));
    }

    #[test]
    fn test_rotate_square_piece_is_noop() {
        let field = small_field();
        let piece = piece_at(PieceKind::O, 2, 2, &field);
        let rotated = field.rotate_right(&piece).unwrap();
        assert_eq!(rotated, piece);
    }

    #[test]
    fn test_rotate_in_open_space_uses_no_kick() {
        let field = Field::new(FieldConfig::default());
        let piece = piece_at(PieceKind::T, 5, 4, &field);

        let rotated = field.rotate_right(&piece).unwrap();
        assert_eq!(rotated.rotation(), 1);
        assert_eq!(rotated.position(), piece.position());
        assert_eq!(rotated.shape(), &rotate_shape_right(piece.shape()).unwrap());
    }

    #[test]
    fn test_rotate_blocked_placement_applies_kick() {
        let mut field = Field::new(FieldConfig::default());
        // The raw rotation of a T at (5, 4) would occupy (7, 6); block that
        // cell so the no-kick test fails and the second test (-1, 0) wins.
        field.set_cell(7, 6, Cell::Piece(PieceKind::L));
        let piece = piece_at(PieceKind::T, 5, 4, &field);
        assert!(!field.has_collided(&piece));

        let rotated = field.rotate_right(&piece).unwrap();
        assert_eq!(rotated.rotation(), 1);
        assert_eq!(rotated.position(), Position::new(4, 4));
    }

    #[test]
    fn test_rotate_rejected_returns_original() {
        let mut field = Field::new(FieldConfig {
            rows: 3,
            columns: 3,
        });
        for row in 0..3 {
            field.grid.fill_row(row, Cell::Piece(PieceKind::Z));
        }

        let piece = ActivePiece::spawn(PieceKind::T, 3).at(Position::new(0, 0));
        let result = field.rotate_right(&piece).unwrap();
        assert_eq!(result, piece);
        assert_eq!(result.rotation(), 0);
    }

    #[test]
    fn test_kick_lookup_uses_pre_rotation_index() {
        let field = Field::new(FieldConfig::default());
        // A rotation-1 T hugging the left wall: its occupied columns are
        // offsets 1-2, so column -1 is a legal placement.
        let spawned = piece_at(PieceKind::T, 5, 4, &field);
        let once = field.rotate_right(&spawned).unwrap();
        let near_wall = once.at(Position::new(5, -1));
        assert!(!field.has_collided(&near_wall));

        // Rotating 1 -> 2 must use table entry 1, whose first fit here is
        // (0, 2). A lookup with the post-rotation index would land the
        // piece one row lower via entry 2's (1, 1) test.
        let twice = field.rotate_right(&near_wall).unwrap();
        assert_eq!(twice.rotation(), 2);
        assert_eq!(twice.position(), Position::new(5, 1));
    }

    #[test]
    fn test_affix_writes_piece_cells() {
        let mut field = small_field();
        let piece = piece_at(PieceKind::S, 2, 1, &field);
        field.affix(&piece);

        let occupied: Vec<_> = field
            .grid()
            .keys_where(|cell| !cell.is_empty())
            .collect();
        assert_eq!(occupied, vec![(2, 2), (2, 3), (3, 1), (3, 2)]);
        assert_eq!(*field.grid().get(2, 2), Cell::Piece(PieceKind::S));
        assert_eq!(field.grid().get(2, 2).colour(), Some("green"));
    }

    #[test]
    fn test_find_completed_rows_descending() {
        let mut field = small_field();
        for column in 0..field.columns() {
            field.set_cell(1, column, Cell::Piece(PieceKind::J));
            field.set_cell(3, column, Cell::Piece(PieceKind::L));
        }
        assert_eq!(field.find_completed_rows(), vec![3, 1]);
    }

    #[test]
    fn test_clear_single_row_relocates_it_to_top() {
        let mut field = small_field();
        // Markers above and below the completed row to track the shift.
        field.set_cell(1, 0, Cell::Piece(PieceKind::T));
        for column in 0..field.columns() {
            field.set_cell(2, column, Cell::Piece(PieceKind::I));
        }
        field.set_cell(4, 5, Cell::Piece(PieceKind::S));

        assert_eq!(field.clear_completed_rows(), 1);

        // Cleared row is blank and relocated to row 0; rows above it shift
        // down by one; rows below it are untouched.
        assert!(field.grid().row(0).iter().all(|cell| cell.is_empty()));
        assert_eq!(*field.grid().get(2, 0), Cell::Piece(PieceKind::T));
        assert_eq!(*field.grid().get(4, 5), Cell::Piece(PieceKind::S));
        assert_eq!(
            field.grid().keys_where(|cell| !cell.is_empty()).count(),
            2
        );
    }

    #[test]
    fn test_clear_multiple_rows_preserves_survivor_order() {
        let mut field = small_field();
        field.set_cell(0, 2, Cell::Piece(PieceKind::Z));
        for column in 0..field.columns() {
            field.set_cell(1, column, Cell::Piece(PieceKind::I));
            field.set_cell(4, column, Cell::Piece(PieceKind::I));
        }
        field.set_cell(3, 4, Cell::Piece(PieceKind::J));

        assert_eq!(field.clear_completed_rows(), 2);

        // Two blank rows on top, then the survivors in original order:
        // old row 0, old row 2 (empty), old row 3, old row 5.
        assert_eq!(*field.grid().get(2, 2), Cell::Piece(PieceKind::Z));
        assert_eq!(*field.grid().get(4, 4), Cell::Piece(PieceKind::J));
        assert_eq!(
            field.grid().keys_where(|cell| !cell.is_empty()).count(),
            2
        );
    }

    #[test]
    fn test_clear_nothing_when_no_row_complete() {
        let mut field = small_field();
        field.set_cell(5, 0, Cell::Piece(PieceKind::O));
        assert_eq!(field.clear_completed_rows(), 0);
        assert_eq!(*field.grid().get(5, 0), Cell::Piece(PieceKind::O));
    }
}

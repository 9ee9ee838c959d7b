/// Score values for simultaneous row clears, indexed by the number of rows
/// cleared in one lock (0 through 4).
const ROW_CLEAR_SCORES: [usize; 5] = [0, 100, 300, 500, 800];

/// Points per successful manual downward move.
const SOFT_DROP_SCORE: usize = 1;

/// Points per row descended by a hard drop.
const HARD_DROP_SCORE_PER_ROW: usize = 2;

/// Score and drop statistics for one play session.
///
/// The score grows additively from soft drops, hard-drop distance, and row
/// clears; the counters track locked pieces and a histogram of clear sizes.
///
/// # Example
///
/// ```
/// use gridfall_engine::ScoreBoard;
///
/// let mut board = ScoreBoard::new();
/// board.lock_piece(4);
///
/// assert_eq!(board.score(), 800);
/// assert_eq!(board.total_cleared_rows(), 4);
/// assert_eq!(board.cleared_rows_counter()[4], 1);
/// ```
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    score: usize,
    locked_pieces: usize,
    total_cleared_rows: usize,
    cleared_rows_counter: [usize; 5],
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreBoard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            locked_pieces: 0,
            total_cleared_rows: 0,
            cleared_rows_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Total number of pieces locked into the field.
    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    #[must_use]
    pub const fn total_cleared_rows(&self) -> usize {
        self.total_cleared_rows
    }

    /// Histogram of locks by rows cleared: `[0]` counts locks that cleared
    /// nothing, `[4]` counts quadruple clears.
    #[must_use]
    pub const fn cleared_rows_counter(&self) -> &[usize; 5] {
        &self.cleared_rows_counter
    }

    /// Awards one successful manual downward move.
    pub const fn award_soft_drop(&mut self) {
        self.score += SOFT_DROP_SCORE;
    }

    /// Awards a hard drop that descended `rows` rows.
    pub const fn award_hard_drop(&mut self, rows: usize) {
        self.score += HARD_DROP_SCORE_PER_ROW * rows;
    }

    /// Records a lock that cleared `cleared_rows` rows (0 through 4) and
    /// awards the clear score.
    pub const fn lock_piece(&mut self, cleared_rows: usize) {
        self.locked_pieces += 1;
        self.total_cleared_rows += cleared_rows;
        self.cleared_rows_counter[cleared_rows] += 1;
        self.score += ROW_CLEAR_SCORES[cleared_rows];
    }
}

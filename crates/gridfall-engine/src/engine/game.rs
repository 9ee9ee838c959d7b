use crate::{
    ShapeError,
    core::{
        piece::{ActivePiece, PieceKind, SPAWN_ROW},
        position::{Direction, Position},
    },
};

use super::{
    bag_generator::{BagSeed, SevenBagGenerator},
    field::{Field, FieldConfig},
    score_board::ScoreBoard,
};

/// Session state. `GameOver` is terminal: the driver detects it and
/// constructs a new session to restart.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    Active,
    GameOver,
}

/// What one gravity tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GravityOutcome {
    /// The piece fell one row.
    Moved,
    /// The piece could not fall and was affixed; rows may have cleared and
    /// the next piece has spawned.
    Locked { cleared_rows: usize },
    /// The stack has reached the top (or already had). No field mutation.
    GameOver,
}

/// One play session: field, falling piece, sequencer, hold, score.
///
/// The game is the sole owner of all mutable state; every entry point is
/// synchronous and driven externally (a timer for [`Game::apply_gravity`],
/// input events for the rest). Spatial checks and mutations are delegated
/// to [`Field`], next-piece selection to [`SevenBagGenerator`].
#[derive(Debug, Clone)]
pub struct Game {
    field: Field,
    active: ActivePiece,
    ghost_position: Position,
    generator: SevenBagGenerator,
    held: Option<PieceKind>,
    hold_available: bool,
    score_board: ScoreBoard,
    state: GameState,
}

impl Game {
    /// Creates a session with a randomly seeded piece sequencer.
    #[must_use]
    pub fn new(config: FieldConfig) -> Self {
        Self::with_generator(config, SevenBagGenerator::new())
    }

    /// Like [`Game::new`], but with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(config: FieldConfig, seed: BagSeed) -> Self {
        Self::with_generator(config, SevenBagGenerator::with_seed(seed))
    }

    fn with_generator(config: FieldConfig, mut generator: SevenBagGenerator) -> Self {
        let field = Field::new(config);
        let active = ActivePiece::spawn(generator.take(), field.columns());
        let mut game = Self {
            ghost_position: active.position(),
            field,
            active,
            generator,
            held: None,
            hold_available: true,
            score_board: ScoreBoard::new(),
            state: GameState::Active,
        };
        game.refresh_ghost();
        game
    }

    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        &self.active
    }

    /// Where the active piece would land if hard-dropped now. Advisory;
    /// recomputed on every position or rotation change.
    #[must_use]
    pub fn ghost_position(&self) -> Position {
        self.ghost_position
    }

    /// Preview of the next piece the sequencer will produce.
    #[must_use]
    pub fn preview_next(&self) -> PieceKind {
        self.generator.peek()
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.held
    }

    /// Whether a hold swap is still available this piece lifetime.
    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.hold_available
    }

    #[must_use]
    pub fn score_board(&self) -> &ScoreBoard {
        &self.score_board
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Replaces the active piece with a fresh spawn: the forced kind when
    /// given (hold swaps), otherwise the sequencer's next draw.
    pub fn spawn_piece(&mut self, forced: Option<PieceKind>) {
        let kind = forced.unwrap_or_else(|| self.generator.take());
        self.active = ActivePiece::spawn(kind, self.field.columns());
        self.refresh_ghost();
    }

    /// Moves the active piece one cell if nothing blocks it. A successful
    /// downward move earns the soft-drop award.
    pub fn attempt_move(&mut self, direction: Direction) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        let moved = self.field.move_piece(&mut self.active, direction);
        if moved {
            if direction == Direction::Down {
                self.score_board.award_soft_drop();
            }
            self.refresh_ghost();
        }
        moved
    }

    /// Rotates the active piece clockwise with kick resolution, committing
    /// only a placement that does not collide. Returns whether the
    /// rotation advanced.
    ///
    /// # Errors
    ///
    /// Propagates [`ShapeError`] from the catalog lookup; see
    /// [`Field::rotate_right`].
    pub fn attempt_rotate_right(&mut self) -> Result<bool, ShapeError> {
        if self.state.is_game_over() {
            return Ok(false);
        }
        let candidate = self.field.rotate_right(&self.active)?;
        // Re-check even though rotate_right only returns valid kicks.
        if self.field.has_collided(&candidate) {
            return Ok(false);
        }
        let advanced = candidate.rotation() != self.active.rotation();
        self.active = candidate;
        self.refresh_ghost();
        Ok(advanced)
    }

    /// Lowest placement the active piece can reach straight down.
    ///
    /// Pure: probes downward offsets from 1 up to the field's row count
    /// inclusive (the extra row accounts for the sentinel spawn row) and
    /// keeps the deepest non-colliding one. Backs both the ghost piece and
    /// [`Game::hard_drop`].
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn calculate_lock_position(&self) -> Position {
        let mut deepest = 0;
        for offset in 1..=self.field.rows() as i32 {
            let candidate = self
                .active
                .at(self.active.position() + Position::new(offset, 0));
            if self.field.has_collided(&candidate) {
                break;
            }
            deepest = offset;
        }
        self.active.position() + Position::new(deepest, 0)
    }

    /// Drops the active piece straight to its lock position, awarding the
    /// hard-drop score for the distance. Returns the rows descended.
    ///
    /// Does not lock the piece: affixing happens on the next gravity tick,
    /// once the piece can no longer fall.
    pub fn hard_drop(&mut self) -> usize {
        if self.state.is_game_over() {
            return 0;
        }
        let target = self.calculate_lock_position();
        let distance = usize::try_from(target.row - self.active.position().row)
            .unwrap_or_default();
        if distance > 0 {
            self.active = self.active.at(target);
            self.score_board.award_hard_drop(distance);
            self.refresh_ghost();
        }
        distance
    }

    /// One gravity tick: the piece falls one row, or locks.
    ///
    /// When the piece cannot fall and its row is still the spawn sentinel,
    /// the session transitions to game over with no further state change.
    /// Otherwise the piece is affixed, completed rows are cleared and
    /// scored, hold is re-enabled, and the next piece spawns.
    pub fn apply_gravity(&mut self) -> GravityOutcome {
        if self.state.is_game_over() {
            return GravityOutcome::GameOver;
        }
        if self.field.move_piece(&mut self.active, Direction::Down) {
            self.refresh_ghost();
            return GravityOutcome::Moved;
        }
        if self.active.position().row == SPAWN_ROW {
            self.state = GameState::GameOver;
            return GravityOutcome::GameOver;
        }

        self.field.affix(&self.active);
        let cleared_rows = self.field.clear_completed_rows();
        self.score_board.lock_piece(cleared_rows);
        self.hold_available = true;
        self.spawn_piece(None);
        GravityOutcome::Locked { cleared_rows }
    }

    /// Swaps the active piece into hold, at most once per piece lifetime.
    ///
    /// The replacement is the previously held kind, or a fresh draw from
    /// the sequencer when nothing was held. Returns whether the hold
    /// happened.
    pub fn attempt_hold(&mut self) -> bool {
        if self.state.is_game_over() || !self.hold_available {
            return false;
        }
        let swapped_out = self.held.replace(self.active.kind());
        self.hold_available = false;
        self.spawn_piece(swapped_out);
        true
    }

    fn refresh_ghost(&mut self) {
        self.ghost_position = self.calculate_lock_position();
    }
}

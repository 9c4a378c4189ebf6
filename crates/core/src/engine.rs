//! Game state machine and per-tick orchestration.

use oled_tetris_types::{GameParams, GameState, InputSnapshot};

use crate::field::FieldController;
use crate::piece::PieceController;
use crate::rng::MinoRng;
use crate::score;
use crate::snapshot::RenderSnapshot;

/// The whole game behind one `tick(input)` call.
///
/// States move WaitingStart -> Initializing -> Running -> GameOver and back
/// to Initializing on confirm; Paused freezes Running from the outside via
/// [`Engine::set_paused`] and is never entered by `tick` itself.
pub struct Engine {
    state: GameState,
    /// Single-slot pause save. `Some` exactly while paused; a second pause
    /// request while occupied is a no-op, as is unpausing while empty.
    resume_state: Option<GameState>,
    piece: PieceController,
    field: FieldController,
    params: GameParams,
}

impl Engine {
    pub fn new(rng: Box<dyn MinoRng>) -> Self {
        Self {
            state: GameState::WaitingStart,
            resume_state: None,
            piece: PieceController::new(rng),
            field: FieldController::new(),
            params: GameParams::new_game(),
        }
    }

    pub fn game_state(&self) -> GameState {
        self.state
    }

    pub fn params(&self) -> GameParams {
        self.params
    }

    pub fn field(&self) -> &FieldController {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut FieldController {
        &mut self.field
    }

    /// Advance one logic tick.
    pub fn tick(&mut self, input: &InputSnapshot) {
        match self.state {
            GameState::WaitingStart | GameState::GameOver => {
                if input.confirm_1 || input.confirm_2 {
                    self.state = GameState::Initializing;
                }
            }
            GameState::Initializing => {
                self.field.reset();
                self.piece.reset();
                self.params = GameParams::new_game();
                self.state = GameState::Running;
            }
            GameState::Running => self.tick_running(input),
            GameState::Paused => {}
        }
    }

    /// Running-state tick order: spawn if one is due, then rotation, then
    /// movement and gravity. A collided gravity step locks the piece, scores
    /// it and either ends the game or queues the next spawn; otherwise the
    /// landing prediction is refreshed for the ghost.
    fn tick_running(&mut self, input: &InputSnapshot) {
        if self.piece.spawn_pending() {
            self.piece.spawn(self.field.bitmap());
        }

        self.piece.rotate(self.field.bitmap(), input);
        let locked = self.piece.step_move(self.field.bitmap(), input, self.params.level);

        if locked {
            let erased = self.field.lock(&mut self.piece.piece_mut().bitmap);
            score::update(&mut self.params, erased.len());
            if self.field.is_game_over() {
                self.state = GameState::GameOver;
            } else {
                self.piece.request_spawn();
            }
        } else {
            self.piece.predict_landing(self.field.bitmap());
        }
    }

    /// Freeze or resume the game. Pausing saves the current state into the
    /// single slot; pausing again before resuming, or resuming while not
    /// paused, does nothing.
    pub fn set_paused(&mut self, paused: bool) {
        if paused {
            if self.resume_state.is_none() {
                self.resume_state = Some(self.state);
                self.state = GameState::Paused;
            }
        } else if let Some(saved) = self.resume_state.take() {
            self.state = saved;
        }
    }

    /// Copy everything drawable into the caller's snapshot. Consumes the
    /// params `updated` flag: the next snapshot reports it false unless a
    /// lock changes the score panel again.
    pub fn snapshot_into(&mut self, out: &mut RenderSnapshot) {
        out.field.copy_from(self.field.bitmap());
        out.piece.copy_from(&self.piece.piece().bitmap);
        out.landing_distance = self.piece.piece().landing_distance;
        out.next_kind = self.piece.next_kind();
        out.params = self.params;
        out.state = self.state;
        self.params.updated = false;
    }
}

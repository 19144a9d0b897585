use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost,
}

/// Lifecycle phase of one game.
///
/// Valid transitions:
/// - AwaitingFirstClick -> Active (first reveal click, mines placed)
/// - AwaitingFirstClick -> Terminal(Won) (first reveal clears the board)
/// - Active -> Terminal(Won | Lost)
/// - Terminal(_) -> AwaitingFirstClick (reset click, consumed)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    AwaitingFirstClick,
    Active,
    Terminal(GameOutcome),
}

impl SessionPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal(_))
    }
}

/// Discrete input event from the rendering/input collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickAction {
    Reveal,
    ToggleFlag,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub action: ClickAction,
    pub x: Coord,
    pub y: Coord,
}

impl ClickEvent {
    pub const fn reveal(x: Coord, y: Coord) -> Self {
        Self {
            action: ClickAction::Reveal,
            x,
            y,
        }
    }

    pub const fn toggle_flag(x: Coord, y: Coord) -> Self {
        Self {
            action: ClickAction::ToggleFlag,
            x,
            y,
        }
    }

    /// Maps pixel coordinates to a tile by dividing by the tile size and
    /// clamping to the board, the way a windowed frontend feeds clicks in.
    pub fn from_pixel(
        action: ClickAction,
        px: u32,
        py: u32,
        tile_size: u32,
        config: &GameConfig,
    ) -> Self {
        let max: u32 = (config.size - 1).into();
        Self {
            action,
            x: (px / tile_size.max(1)).min(max) as Coord,
            y: (py / tile_size.max(1)).min(max) as Coord,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }
}

/// What one handled click did to the session, so the collaborator knows
/// whether a redraw is due.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoChange,
    Updated,
    Won,
    Lost,
    /// A terminal-phase click was consumed to recreate the board.
    Reset,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One game from first click to reset. The session owns the board and the
/// phase machine; mine placement is deferred until the first reveal click so
/// that click's cell can be excluded from it. Reset replaces the board
/// wholesale, only the RNG stream carries over so successive boards differ.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    rng: SmallRng,
    board: Board,
    phase: SessionPhase,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            board: Board::unarmed(config.size),
            phase: SessionPhase::AwaitingFirstClick,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Configured mines minus placed flags, the usual counter display.
    pub fn mines_left(&self) -> isize {
        self.config.mines as isize - self.board.flagged_count() as isize
    }

    /// Processes one click to completion. Out-of-bounds coordinates are
    /// rejected in every phase and leave the session untouched; clicks in a
    /// terminal phase are consumed solely as the reset acknowledgment.
    pub fn handle(&mut self, event: ClickEvent) -> Result<ClickOutcome> {
        let coords = event.coords();
        if event.x >= self.config.size || event.y >= self.config.size {
            return Err(GameError::OutOfBounds);
        }

        if self.phase.is_terminal() {
            self.reset();
            return Ok(ClickOutcome::Reset);
        }

        match event.action {
            ClickAction::Reveal => {
                if matches!(self.phase, SessionPhase::AwaitingFirstClick) {
                    self.arm_board(coords);
                }
                self.do_reveal(coords)
            }
            ClickAction::ToggleFlag => {
                let outcome = self.board.toggle_flag(coords)?;
                Ok(if outcome.has_update() {
                    ClickOutcome::Updated
                } else {
                    ClickOutcome::NoChange
                })
            }
        }
    }

    /// First reveal click: place the mines now, excluding the clicked cell,
    /// and enter the active phase. Flags placed before this survive.
    fn arm_board(&mut self, exclude: Coord2) {
        let seed = self.rng.next_u64();
        let layout = RejectionGenerator::new(seed).generate(self.config, exclude);
        self.board.place_mines(layout);
        self.phase = SessionPhase::Active;
        log::debug!("first click at {exclude:?}, board armed");
    }

    fn do_reveal(&mut self, coords: Coord2) -> Result<ClickOutcome> {
        Ok(match self.board.reveal(coords)? {
            RevealOutcome::NoChange => ClickOutcome::NoChange,
            RevealOutcome::Revealed => ClickOutcome::Updated,
            RevealOutcome::Exploded => {
                self.phase = SessionPhase::Terminal(GameOutcome::Lost);
                log::info!("game lost, awaiting reset click");
                ClickOutcome::Lost
            }
            RevealOutcome::Won => {
                self.phase = SessionPhase::Terminal(GameOutcome::Won);
                log::info!("game won, awaiting reset click");
                ClickOutcome::Won
            }
        })
    }

    /// Replaces the board with a prepared layout and skips straight to the
    /// active phase, so scenario tests are not at the mercy of the RNG.
    #[cfg(test)]
    pub(crate) fn install_board_for_tests(&mut self, board: Board) {
        self.config = GameConfig::new_unchecked(board.size(), board.mine_count());
        self.board = board;
        self.phase = SessionPhase::Active;
    }

    /// Discards the board and returns to the deferred-placement phase. The
    /// triggering click is consumed here and applies no reveal or flag.
    fn reset(&mut self) {
        self.board = Board::unarmed(self.config.size);
        self.phase = SessionPhase::AwaitingFirstClick;
        log::info!("board reset, awaiting first click");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mines_appear_only_at_the_first_reveal_click() {
        let mut session = GameSession::new(GameConfig::new(20, 10), 1);
        assert_eq!(session.board().mine_count(), 0);

        session.handle(ClickEvent::toggle_flag(5, 5)).unwrap();
        assert_eq!(session.phase(), SessionPhase::AwaitingFirstClick);
        assert_eq!(session.board().mine_count(), 0);

        session.handle(ClickEvent::reveal(3, 7)).unwrap();
        assert_eq!(session.board().mine_count(), 10);
        assert!(!session.board().mine_at((3, 7)));
        assert!(session.board().state_at((3, 7)).is_revealed());
    }

    #[test]
    fn first_click_is_never_a_mine_across_seeds() {
        for seed in 0..32 {
            let mut session = GameSession::new(GameConfig::new(8, 30), seed);
            session.handle(ClickEvent::reveal(4, 4)).unwrap();
            assert!(!session.board().mine_at((4, 4)));
            assert_eq!(session.board().mine_count(), 30);
        }
    }

    #[test]
    fn flags_placed_before_the_first_reveal_survive_placement() {
        let mut session = GameSession::new(GameConfig::new(9, 60), 7);

        session.handle(ClickEvent::toggle_flag(0, 0)).unwrap();
        session.handle(ClickEvent::reveal(4, 4)).unwrap();

        assert_eq!(session.board().state_at((0, 0)), CellState::Flagged);
        assert_eq!(session.board().flagged_count(), 1);
    }

    #[test]
    fn mine_free_board_is_won_by_the_first_click() {
        let mut session = GameSession::new(GameConfig::new(4, 0), 3);

        let outcome = session.handle(ClickEvent::reveal(0, 0)).unwrap();

        assert_eq!(outcome, ClickOutcome::Won);
        assert_eq!(session.phase(), SessionPhase::Terminal(GameOutcome::Won));
        assert_eq!(session.board().revealed_count(), 16);
    }

    #[test]
    fn dense_board_win_and_loss_are_deterministic() {
        // 3x3 with 7 mines: the first click and exactly one other cell are
        // safe, so the post-reveal phase is Active no matter the seed.
        let mut session = GameSession::new(GameConfig::new(3, 7), 11);
        session.handle(ClickEvent::reveal(1, 1)).unwrap();
        assert_eq!(session.phase(), SessionPhase::Active);

        let mine = first_mine(&session).unwrap();
        let outcome = session.handle(ClickEvent::reveal(mine.0, mine.1)).unwrap();

        assert_eq!(outcome, ClickOutcome::Lost);
        assert_eq!(session.phase(), SessionPhase::Terminal(GameOutcome::Lost));
        assert_eq!(session.board().exploded(), Some(mine));
    }

    #[test]
    fn terminal_click_is_consumed_as_reset_only() {
        let mut session = lost_session();

        let outcome = session.handle(ClickEvent::reveal(2, 2)).unwrap();

        assert_eq!(outcome, ClickOutcome::Reset);
        assert_eq!(session.phase(), SessionPhase::AwaitingFirstClick);
        // The reset click did not double as a reveal.
        assert_eq!(session.board().revealed_count(), 0);
        assert_eq!(session.board().mine_count(), 0);
        assert_eq!(session.board().exploded(), None);
    }

    #[test]
    fn click_after_reset_is_a_fresh_first_click() {
        let mut session = lost_session();
        session.handle(ClickEvent::toggle_flag(0, 0)).unwrap();

        session.handle(ClickEvent::reveal(1, 1)).unwrap();

        assert_eq!(session.board().mine_count(), 7);
        assert!(!session.board().mine_at((1, 1)));
    }

    #[test]
    fn layouts_differ_across_resets() {
        let mut session = GameSession::new(GameConfig::new(20, 10), 5);
        session.handle(ClickEvent::reveal(0, 0)).unwrap();
        let first = mine_coords(&session);

        loop {
            // Play until terminal, then reset and restart.
            if session.phase().is_terminal() {
                session.handle(ClickEvent::reveal(0, 0)).unwrap();
                break;
            }
            let mine = first_mine(&session).unwrap();
            session.handle(ClickEvent::reveal(mine.0, mine.1)).unwrap();
        }
        session.handle(ClickEvent::reveal(0, 0)).unwrap();
        let second = mine_coords(&session);

        assert_eq!(second.len(), 10);
        assert_ne!(first, second);
    }

    #[test]
    fn out_of_bounds_clicks_fail_in_every_phase() {
        let mut session = GameSession::new(GameConfig::new(4, 2), 9);
        assert_eq!(
            session.handle(ClickEvent::reveal(4, 0)).unwrap_err(),
            GameError::OutOfBounds
        );
        assert_eq!(session.phase(), SessionPhase::AwaitingFirstClick);

        let mut lost = lost_session();
        assert_eq!(
            lost.handle(ClickEvent::toggle_flag(9, 9)).unwrap_err(),
            GameError::OutOfBounds
        );
        assert!(lost.phase().is_terminal());
    }

    #[test]
    fn pixel_mapping_divides_by_tile_size_and_clamps() {
        let config = GameConfig::new(20, 10);

        let event = ClickEvent::from_pixel(ClickAction::Reveal, 137, 42, 20, &config);
        assert_eq!(event.coords(), (6, 2));

        let clamped = ClickEvent::from_pixel(ClickAction::ToggleFlag, 9999, 0, 20, &config);
        assert_eq!(clamped.coords(), (19, 0));
    }

    /// Session driven into Terminal(Lost) on a dense 3x3 board.
    fn lost_session() -> GameSession {
        let mut session = GameSession::new(GameConfig::new(3, 7), 21);
        session.handle(ClickEvent::reveal(1, 1)).unwrap();
        let mine = first_mine(&session).unwrap();
        session.handle(ClickEvent::reveal(mine.0, mine.1)).unwrap();
        assert!(session.phase().is_terminal());
        session
    }

    fn first_mine(session: &GameSession) -> Option<Coord2> {
        mine_coords(session).into_iter().next()
    }

    fn mine_coords(session: &GameSession) -> alloc::vec::Vec<Coord2> {
        let size = session.config().size;
        let mut mines = alloc::vec::Vec::new();
        for x in 0..size {
            for y in 0..size {
                if session.board().mine_at((x, y)) {
                    mines.push((x, y));
                }
            }
        }
        mines
    }
}

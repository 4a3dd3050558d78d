//! Match engine: placement and battle phases, shot resolution, victory and
//! surrender.
//!
//! The engine owns every board, view and account it touches. Callers get
//! copies or shared borrows only, so engine invariants cannot be broken from
//! outside. The logged-in session and the active turn are separate: every
//! match operation acts for whoever holds the turn.

use alloc::boxed::Box;
use alloc::string::String;
#[cfg(feature = "std")]
use alloc::string::ToString;
#[cfg(feature = "std")]
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Board, Grid};
use crate::common::{AccountError, CellState, MatchError, PlacementError};
use crate::config::{Difficulty, Mode, BOARD_SIZE, PLACEMENT_ATTEMPTS, ROSTER, WIN_POINTS};
use crate::enemy_view::EnemyView;
use crate::match_log::{MatchLog, PlainLog};
use crate::player::{Accounts, Player, PlayerId};
use crate::regen;
use crate::ship::{Orientation, Ship, ShipCode};

/// Phase of an active match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Placement,
    Battle,
}

/// Everything learned from the most recent call to [`GameEngine::shoot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    pub row: usize,
    pub col: usize,
    pub result: CellState,
    /// The opposing fleet was scattered after this shot.
    pub regenerated: bool,
    /// The ship struck, as it stands after the shot.
    pub hit_ship: Option<Ship>,
    pub ship_sunk: bool,
    /// The shot sank the last ship of the opposing fleet.
    pub game_over: bool,
}

impl ShotReport {
    fn quiet(row: usize, col: usize, result: CellState) -> Self {
        ShotReport {
            row,
            col,
            result,
            regenerated: false,
            hit_ship: None,
            ship_sunk: false,
            game_over: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Victory(usize),
    Surrender { winner: usize },
}

/// One participant's fleet and what the opponent knows about it.
#[derive(Debug, Clone, Default)]
struct Fleet {
    board: Board,
    /// The opponent's fog-of-war view of `board`.
    view: EnemyView,
    ready: bool,
}

#[derive(Debug, Clone)]
struct Match {
    players: [PlayerId; 2],
    fleets: [Fleet; 2],
    phase: Phase,
    /// Index into `players` of the side acting now.
    turn: usize,
    outcome: Option<Outcome>,
    shots: usize,
    regenerations: usize,
}

impl Match {
    fn acting(&mut self) -> &mut Fleet {
        &mut self.fleets[self.turn]
    }
}

/// Serializable read model of the current match.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchSnapshot {
    pub players: [String; 2],
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub mode: Mode,
    pub current_turn: String,
    pub ready: [bool; 2],
    /// Each player's fleet.
    pub fleets: [Vec<Ship>; 2],
    /// The fog-of-war view each player has of the *other* fleet.
    pub views: [Grid; 2],
    pub winner: Option<String>,
    pub shots: usize,
    pub regenerations: usize,
}

/// Core engine for a two-player dynamic battleship session.
pub struct GameEngine {
    accounts: Accounts,
    difficulty: Difficulty,
    mode: Mode,
    game: Option<Match>,
    last_shot: Option<ShotReport>,
    rng: SmallRng,
    log: Box<dyn MatchLog>,
}

#[cfg(feature = "std")]
impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Engine seeded from the thread RNG.
    #[cfg(feature = "std")]
    pub fn new() -> Self {
        let mut seed_rng = rand::rng();
        Self::with_rng(SmallRng::from_rng(&mut seed_rng))
    }

    /// Engine whose regenerations are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: SmallRng) -> Self {
        Self {
            accounts: Accounts::new(),
            difficulty: Difficulty::default(),
            mode: Mode::default(),
            game: None,
            last_shot: None,
            rng,
            log: Box::new(PlainLog),
        }
    }

    /// Replace the history entry formatter.
    pub fn with_log(mut self, log: impl MatchLog + 'static) -> Self {
        self.log = Box::new(log);
        self
    }

    // ----- accounts --------------------------------------------------------

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<(), AccountError> {
        self.accounts.register(username, password).map(|_| ())
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AccountError> {
        self.accounts.login(username, password).map(|_| ())
    }

    /// End the session. Any match in progress is discarded.
    pub fn logout(&mut self) {
        self.accounts.logout();
        self.reset_game();
    }

    pub fn current_user(&self) -> Option<&Player> {
        self.accounts.current_user()
    }

    // ----- settings --------------------------------------------------------

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Placed fleets are only valid under the rules they were built with, so
    /// the difficulty is locked once a match has any ship on the board.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), MatchError> {
        if let Some(game) = &self.game {
            if game.phase == Phase::Battle {
                return Err(MatchError::NotPlacementPhase);
            }
            if game.fleets.iter().any(|f| !f.board.is_empty()) {
                log::warn!("difficulty stays {}: ships already placed", self.difficulty);
                return Err(MatchError::ShipsPlaced);
            }
        }
        self.difficulty = difficulty;
        Ok(())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    // ----- lifecycle -------------------------------------------------------

    /// Start a match between the logged-in player and `enemy`. The session
    /// player moves first. Replaces any match in progress.
    pub fn start_match(&mut self, enemy: &str) -> Result<(), MatchError> {
        let me = self.accounts.session().ok_or(MatchError::NotLoggedIn)?;
        let enemy = self
            .accounts
            .find(enemy.trim())
            .ok_or(MatchError::UnknownPlayer)?;
        if enemy == me {
            return Err(MatchError::SelfMatch);
        }
        self.game = Some(Match {
            players: [me, enemy],
            fleets: [Fleet::default(), Fleet::default()],
            phase: Phase::Placement,
            turn: 0,
            outcome: None,
            shots: 0,
            regenerations: 0,
        });
        self.last_shot = None;
        log::info!(
            "match started: {} vs {} ({}, {})",
            self.accounts.get(me).username(),
            self.accounts.get(enemy).username(),
            self.difficulty,
            self.mode
        );
        Ok(())
    }

    /// Drop the match and everything scoped to it. Accounts are untouched.
    pub fn reset_game(&mut self) {
        if self.game.take().is_some() {
            log::info!("match reset");
        }
        self.last_shot = None;
    }

    pub fn is_match_active(&self) -> bool {
        self.game.is_some()
    }

    pub fn phase(&self) -> Option<Phase> {
        self.game.as_ref().map(|g| g.phase)
    }

    pub fn is_placement_phase(&self) -> bool {
        self.phase() == Some(Phase::Placement)
    }

    // ----- placement -------------------------------------------------------

    fn placing(&mut self) -> Result<&mut Match, PlacementError> {
        let game = self.game.as_mut().ok_or(PlacementError::NoMatch)?;
        if game.phase != Phase::Placement {
            return Err(PlacementError::NotPlacementPhase);
        }
        Ok(game)
    }

    /// Place a ship of `code` for the acting player, subject to the
    /// difficulty's quota and duplicate rules. Returns the ship's fleet index.
    pub fn add_ship(
        &mut self,
        code: ShipCode,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<usize, PlacementError> {
        let difficulty = self.difficulty;
        let board = &mut self.placing()?.acting().board;
        let required = difficulty.required_ships();
        if board.len() >= required {
            log::warn!("rejected {}: quota of {} reached", code, required);
            return Err(PlacementError::QuotaReached { required });
        }
        if board.count_code(code) >= difficulty.max_per_code(code) {
            log::warn!("rejected {}: no more allowed at {}", code, difficulty);
            return Err(PlacementError::DuplicateCode(code));
        }
        let index = board.place(code, row, col, orientation).inspect_err(|e| {
            log::warn!("rejected {} at ({}, {}): {}", code, row, col, e);
        })?;
        log::debug!("placed {} at ({}, {}) {:?}", code, row, col, orientation);
        Ok(index)
    }

    /// Remove the acting player's first ship with `code`.
    pub fn remove_ship(&mut self, code: ShipCode) -> Result<Ship, PlacementError> {
        let fleet = self.placing()?.acting();
        let ship = fleet.board.remove_code(code)?;
        fleet.ready = false;
        Ok(ship)
    }

    /// Remove one specific ship of the acting player.
    pub fn remove_ship_at(&mut self, index: usize) -> Result<Ship, PlacementError> {
        let fleet = self.placing()?.acting();
        let ship = fleet.board.remove(index)?;
        fleet.ready = false;
        Ok(ship)
    }

    /// Move one of the acting player's placed ships.
    pub fn relocate_ship(
        &mut self,
        index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        self.placing()?
            .acting()
            .board
            .relocate(index, row, col, orientation)
    }

    /// Fill the acting player's remaining quota with random legal ships.
    /// Either every missing ship is placed or the fleet is left as it was.
    pub fn place_fleet_randomly(&mut self) -> Result<(), PlacementError> {
        let difficulty = self.difficulty;
        let game = self.game.as_mut().ok_or(PlacementError::NoMatch)?;
        if game.phase != Phase::Placement {
            return Err(PlacementError::NotPlacementPhase);
        }
        let board = &mut game.fleets[game.turn].board;
        let mut staged = board.clone();
        while staged.len() < difficulty.required_ships() {
            let code = ROSTER
                .iter()
                .copied()
                .filter(|&c| staged.count_code(c) < difficulty.max_per_code(c))
                .min_by_key(|&c| staged.count_code(c))
                .ok_or(PlacementError::UnableToPlaceShip)?;
            let (r, c, o) = staged
                .random_placement(&mut self.rng, code, PLACEMENT_ATTEMPTS)
                .or_else(|_| {
                    regen::scan(code, &staged.occupancy()).ok_or(PlacementError::UnableToPlaceShip)
                })?;
            staged.place(code, r, c, o)?;
        }
        *board = staged;
        Ok(())
    }

    /// The acting player's placed ships.
    pub fn placed_ships(&self) -> &[Ship] {
        self.game
            .as_ref()
            .map(|g| g.fleets[g.turn].board.ships())
            .unwrap_or(&[])
    }

    pub fn current_turn_ship_count(&self) -> usize {
        self.placed_ships().len()
    }

    /// Whether the acting player has placed the ships the difficulty needs.
    pub fn all_ships_placed(&self) -> bool {
        self.is_match_active() && self.current_turn_ship_count() >= self.difficulty.required_ships()
    }

    /// Mark the acting player (un)ready. Readiness needs a full quota. Once
    /// both players are ready the battle starts with player one to move.
    pub fn set_player_ready(&mut self, ready: bool) -> Result<(), MatchError> {
        let required = self.difficulty.required_ships();
        let game = self.game.as_mut().ok_or(MatchError::NoMatch)?;
        if game.phase != Phase::Placement {
            return Err(MatchError::NotPlacementPhase);
        }
        let placed = game.fleets[game.turn].board.len();
        if ready && placed < required {
            return Err(MatchError::QuotaNotMet { placed, required });
        }
        game.acting().ready = ready;
        if game.fleets.iter().all(|f| f.ready) {
            game.phase = Phase::Battle;
            game.turn = 0;
            log::info!("placement finished, battle begins");
        }
        Ok(())
    }

    pub fn are_both_players_ready(&self) -> bool {
        self.game
            .as_ref()
            .is_some_and(|g| g.fleets.iter().all(|f| f.ready))
    }

    /// During placement: mark the acting player ready and hand placement to
    /// the other player, unless that started the battle. During battle:
    /// [`next_turn`](Self::next_turn).
    pub fn continue_to_next_turn(&mut self) -> Result<(), MatchError> {
        match self.phase().ok_or(MatchError::NoMatch)? {
            Phase::Placement => {
                self.set_player_ready(true)?;
                if self.is_placement_phase() {
                    self.next_turn();
                }
            }
            Phase::Battle => self.next_turn(),
        }
        Ok(())
    }

    /// Hand the turn to the other participant. The session is not touched.
    pub fn next_turn(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.turn = 1 - game.turn;
            log::debug!("turn: {}", self.accounts.get(game.players[game.turn]).username());
        }
    }

    // ----- battle ----------------------------------------------------------

    /// Fire at (`row`, `col`) of the opposing fleet.
    ///
    /// Returns `None` outside a running battle, for off-grid targets, or when
    /// regeneration fails (state is then rolled back). A cell that is already
    /// resolved returns its state unchanged. A miss passes the turn; hits and
    /// sinks keep it.
    pub fn shoot(&mut self, row: usize, col: usize) -> Option<CellState> {
        let game = match self.game.as_mut() {
            Some(g) if g.phase == Phase::Battle && g.outcome.is_none() => g,
            _ => {
                log::warn!("shot at ({}, {}) ignored: no battle in progress", row, col);
                return None;
            }
        };
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            log::warn!("shot at ({}, {}) is off the grid", row, col);
            return None;
        }

        let shooter = game.turn;
        let target = 1 - shooter;
        let fleet = &mut game.fleets[target];

        let seen = fleet.view.get(row, col);
        if !seen.is_unresolved() {
            log::debug!("({}, {}) already resolved as {:?}", row, col, seen);
            self.last_shot = Some(ShotReport::quiet(row, col, seen));
            return Some(seen);
        }

        game.shots += 1;
        let Some(index) = fleet.board.ship_at(row, col) else {
            fleet.view.mark(row, col, CellState::Miss);
            log::debug!("miss at ({}, {})", row, col);
            self.last_shot = Some(ShotReport::quiet(row, col, CellState::Miss));
            game.turn = target;
            return Some(CellState::Miss);
        };

        let ship = *fleet.board.ship(index)?;
        let (ship_row, ship_col) = ship.origin();
        let segment = if ship.is_vertical() {
            row - ship_row
        } else {
            col - ship_col
        };

        if ship.is_segment_hit(segment) {
            fleet.view.mark(row, col, CellState::Hit);
            log::debug!("repeat hit on {} segment {}", ship.code(), segment);
            self.last_shot = Some(ShotReport {
                hit_ship: Some(ship),
                ship_sunk: ship.is_sunk(),
                ..ShotReport::quiet(row, col, CellState::Hit)
            });
            return Some(CellState::Hit);
        }

        let backup = fleet.clone();
        fleet.view.mark(row, col, CellState::Hit);
        fleet.board.hit_segment(index, segment);
        let sunk = fleet.board.ship(index).is_some_and(Ship::is_sunk);
        if sunk {
            for (r, c) in ship.cells() {
                fleet.view.mark(r, c, CellState::Sunk);
            }
            log::info!("{} sunk", ship.code());
        } else {
            log::debug!("hit on {} segment {}", ship.code(), segment);
        }

        if let Err(e) = regen::regenerate(&mut self.rng, &mut fleet.board, &mut fleet.view) {
            log::error!("shot at ({}, {}) aborted: {}", row, col, e);
            *fleet = backup;
            game.shots -= 1;
            self.last_shot = None;
            return None;
        }
        game.regenerations += 1;

        let game_over = sunk && fleet.board.all_sunk();
        let result = if sunk { CellState::Sunk } else { CellState::Hit };
        self.last_shot = Some(ShotReport {
            row,
            col,
            result,
            regenerated: true,
            hit_ship: fleet.board.ship(index).copied(),
            ship_sunk: sunk,
            game_over,
        });

        if game_over {
            game.outcome = Some(Outcome::Victory(shooter));
            let (winner, loser) = (game.players[shooter], game.players[target]);
            let entry = self.log.victory(
                self.accounts.get(winner).username(),
                self.accounts.get(loser).username(),
            );
            settle(&mut self.accounts, winner, loser, entry);
            log::info!("{} wins", self.accounts.get(winner).username());
        }
        Some(result)
    }

    pub fn last_shot(&self) -> Option<&ShotReport> {
        self.last_shot.as_ref()
    }

    pub fn was_last_shot_regenerated(&self) -> bool {
        self.last_shot.is_some_and(|s| s.regenerated)
    }

    pub fn last_hit_ship(&self) -> Option<Ship> {
        self.last_shot.and_then(|s| s.hit_ship)
    }

    pub fn was_last_ship_sunk(&self) -> bool {
        self.last_shot.is_some_and(|s| s.ship_sunk)
    }

    /// The acting player's fog-of-war view of the opponent.
    pub fn enemy_board(&self) -> Option<Grid> {
        self.game
            .as_ref()
            .map(|g| g.fleets[1 - g.turn].view.cells())
    }

    /// The acting player's own board, ships revealed.
    pub fn own_board(&self) -> Option<Grid> {
        self.game
            .as_ref()
            .map(|g| g.fleets[g.turn].board.cell_states())
    }

    /// The opponent's fleet as it currently sits. Meant for tutorial display.
    pub fn enemy_ships(&self) -> &[Ship] {
        self.game
            .as_ref()
            .map(|g| g.fleets[1 - g.turn].board.ships())
            .unwrap_or(&[])
    }

    pub fn current_turn_username(&self) -> Option<&str> {
        self.game
            .as_ref()
            .map(|g| self.accounts.get(g.players[g.turn]).username())
    }

    pub fn next_turn_username(&self) -> Option<&str> {
        self.game
            .as_ref()
            .map(|g| self.accounts.get(g.players[1 - g.turn]).username())
    }

    /// Whether the logged-in player holds the turn.
    pub fn is_my_turn(&self) -> bool {
        match (&self.game, self.accounts.session()) {
            (Some(g), Some(me)) => g.players[g.turn] == me,
            _ => false,
        }
    }

    /// The player who sank every opposing ship, once that has happened.
    pub fn winner(&self) -> Option<&Player> {
        match self.game.as_ref()?.outcome? {
            Outcome::Victory(side) => {
                let game = self.game.as_ref()?;
                Some(self.accounts.get(game.players[side]))
            }
            Outcome::Surrender { .. } => None,
        }
    }

    /// The acting player concedes. The opponent earns the win reward and both
    /// histories gain one entry. Returns the winner.
    pub fn surrender(&mut self) -> Option<&Player> {
        let game = self.game.as_mut()?;
        if game.outcome.is_some() {
            return None;
        }
        let loser = game.players[game.turn];
        let winner_side = 1 - game.turn;
        let winner = game.players[winner_side];
        game.outcome = Some(Outcome::Surrender {
            winner: winner_side,
        });
        let entry = self.log.surrender(
            self.accounts.get(loser).username(),
            self.accounts.get(winner).username(),
        );
        settle(&mut self.accounts, winner, loser, entry);
        log::info!(
            "{} surrendered to {}",
            self.accounts.get(loser).username(),
            self.accounts.get(winner).username()
        );
        Some(self.accounts.get(winner))
    }

    pub fn shots_fired(&self) -> usize {
        self.game.as_ref().map_or(0, |g| g.shots)
    }

    pub fn regenerations(&self) -> usize {
        self.game.as_ref().map_or(0, |g| g.regenerations)
    }

    #[cfg(feature = "std")]
    pub fn snapshot(&self) -> Option<MatchSnapshot> {
        let g = self.game.as_ref()?;
        let name = |id: PlayerId| self.accounts.get(id).username().to_string();
        let winner = g.outcome.map(|o| match o {
            Outcome::Victory(side) | Outcome::Surrender { winner: side } => name(g.players[side]),
        });
        Some(MatchSnapshot {
            players: [name(g.players[0]), name(g.players[1])],
            phase: g.phase,
            difficulty: self.difficulty,
            mode: self.mode,
            current_turn: name(g.players[g.turn]),
            ready: [g.fleets[0].ready, g.fleets[1].ready],
            fleets: [g.fleets[0].board.ships().to_vec(), g.fleets[1].board.ships().to_vec()],
            // fleets[i].view is what the other player sees of fleet i
            views: [g.fleets[1].view.cells(), g.fleets[0].view.cells()],
            winner,
            shots: g.shots,
            regenerations: g.regenerations,
        })
    }
}

/// Award the win and record `entry` for both players.
fn settle(accounts: &mut Accounts, winner: PlayerId, loser: PlayerId, entry: String) {
    let w = accounts.get_mut(winner);
    w.add_points(WIN_POINTS);
    w.record(entry.clone());
    accounts.get_mut(loser).record(entry);
}

impl core::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEngine")
            .field("difficulty", &self.difficulty)
            .field("mode", &self.mode)
            .field("game", &self.game)
            .field("last_shot", &self.last_shot)
            .finish()
    }
}

//! The board's interaction state machine.
//!
//! `Session` is the single owner of the board map, the selection, the legal-move
//! highlights, the in-flight animation and the turn indicator. It follows the
//! Elm-style update loop of the front-ends: every input is a method call that
//! changes state and returns the `Effect`s the caller must carry out (network
//! calls, a timer, a sound). Nothing here blocks or performs I/O.
//!
//! Per selection cycle:
//!
//! ```text
//! Idle -> Selected -> AwaitingMoveResult -> Animating -> Idle
//!                          |
//!                          +-- rejected --> Idle
//! ```

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::api::{MatchCreated, MatchId, MoveOutcome};
use crate::board_state::BoardState;
use crate::coord::Coord;
use crate::error::Error;
use crate::piece::{Color, Piece};
use crate::sound::SoundCue;

/// A piece travelling between two squares, drawn until the move is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingPiece {
    pub start: Coord,
    pub end: Coord,
    pub piece: Piece,
}

/// Identifies one scheduled commit. A commit carrying an outdated ticket is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No match loaded yet.
    Loading,
    Idle,
    Selected(Coord),
    AwaitingMoveResult { from: Coord, to: Coord },
    Animating { moving: MovingPiece, ticket: CommitTicket },
}

/// Work the front-end performs on behalf of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the service for the legal destinations of the piece at `at`,
    /// then report back with `legal_moves_received` or `legal_moves_failed`.
    FetchLegalMoves { match_id: MatchId, at: Coord },
    /// Submit a move, then report back with `move_accepted` or `move_rejected`.
    SubmitMove { match_id: MatchId, from: Coord, to: Coord },
    /// Call `commit(ticket)` once `delay` has elapsed.
    ScheduleCommit { ticket: CommitTicket, delay: Duration },
    PlaySound(SoundCue),
}

#[derive(Debug, Clone)]
pub struct Session {
    match_id: Option<MatchId>,
    board: BoardState,
    turn: Option<Color>,
    phase: Phase,
    available_moves: Vec<Coord>,
    check: Option<Coord>,
    last_move: Option<(Coord, Coord)>,
    animation: Duration,
    next_ticket: u64,
}

impl Session {
    pub fn new(animation: Duration) -> Self {
        Self {
            match_id: None,
            board: BoardState::empty(),
            turn: None,
            phase: Phase::Loading,
            available_moves: Vec::new(),
            check: None,
            last_move: None,
            animation,
            next_ticket: 0,
        }
    }

    pub fn match_id(&self) -> Option<&MatchId> {
        self.match_id.as_ref()
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Side to move, as last reported by the service or flipped after an accepted move.
    pub fn turn(&self) -> Option<Color> {
        self.turn
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn animation(&self) -> Duration {
        self.animation
    }

    pub fn selection(&self) -> Option<Coord> {
        match self.phase {
            Phase::Selected(at) => Some(at),
            _ => None,
        }
    }

    pub fn available_moves(&self) -> &[Coord] {
        &self.available_moves
    }

    pub fn moving_piece(&self) -> Option<&MovingPiece> {
        match &self.phase {
            Phase::Animating { moving, .. } => Some(moving),
            _ => None,
        }
    }

    /// Square of the king the service last reported in check.
    pub fn check(&self) -> Option<Coord> {
        self.check
    }

    pub fn last_move(&self) -> Option<(Coord, Coord)> {
        self.last_move
    }

    /// Forgets the current match. Any commit still scheduled becomes stale.
    pub fn reset(&mut self) {
        info!("resetting board");
        let animation = self.animation;
        let next_ticket = self.next_ticket;
        *self = Self::new(animation);
        self.next_ticket = next_ticket;
    }

    /// Installs a freshly created match: 64 empty squares overlaid with the
    /// service's placements, plus its id and starting turn.
    pub fn load_match(&mut self, created: &MatchCreated) {
        self.reset();
        self.board = created.board();
        self.turn = Some(created.turn);
        self.match_id = Some(created.match_id.clone());
        self.phase = Phase::Idle;
        info!(match_id = %created.match_id, turn = %created.turn, "match loaded");
    }

    /// Handles a click on a cell.
    pub fn click(&mut self, at: Coord) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Phase::Animating { ticket, .. } = self.phase {
            debug!(%at, "click during animation, committing early");
            effects.extend(self.commit(ticket));
        }

        let Some(match_id) = self.match_id.clone() else {
            debug!(%at, "click before a match is loaded");
            return effects;
        };

        match self.phase {
            Phase::Loading | Phase::Animating { .. } => {}
            Phase::AwaitingMoveResult { .. } => {
                debug!(%at, "click ignored while a move is in flight");
            }
            Phase::Idle => {
                let own_piece = self.board.color_at(at).is_some() && self.board.color_at(at) == self.turn;
                if own_piece {
                    effects.push(self.select(match_id, at));
                } else {
                    debug!(%at, turn = ?self.turn, "nothing selectable here");
                }
            }
            Phase::Selected(from) => {
                let target = self.board.color_at(at);
                if target.is_some() && target == self.board.color_at(from) {
                    effects.push(self.select(match_id, at));
                } else {
                    self.available_moves.clear();
                    self.phase = Phase::AwaitingMoveResult { from, to: at };
                    debug!(%from, to = %at, "submitting move");
                    effects.push(Effect::SubmitMove { match_id, from, to: at });
                }
            }
        }
        effects
    }

    fn select(&mut self, match_id: MatchId, at: Coord) -> Effect {
        self.available_moves.clear();
        self.phase = Phase::Selected(at);
        Effect::FetchLegalMoves { match_id, at }
    }

    fn is_current(&self, match_id: &MatchId) -> bool {
        self.match_id.as_ref() == Some(match_id)
    }

    /// Whether `from -> to` in `match_id` is the submission still waiting for a reply.
    fn is_pending(&self, match_id: &MatchId, from: Coord, to: Coord) -> bool {
        self.is_current(match_id) && self.phase == Phase::AwaitingMoveResult { from, to }
    }

    /// Replaces the highlighted destinations, provided `at` is still selected
    /// in the same match.
    pub fn legal_moves_received(&mut self, match_id: &MatchId, at: Coord, moves: Vec<Coord>) {
        if self.is_current(match_id) && self.selection() == Some(at) {
            self.available_moves = moves;
        } else {
            debug!(%match_id, %at, "dropping legal moves for a stale selection");
        }
    }

    pub fn legal_moves_failed(&mut self, match_id: &MatchId, at: Coord, err: &Error) {
        warn!(%match_id, %at, "failed to fetch legal moves: {err}");
    }

    /// The service accepted the pending move. Flips the turn, starts the
    /// animation and asks for the commit to be scheduled.
    ///
    /// A reply for any other match or move is dropped.
    pub fn move_accepted(&mut self, match_id: &MatchId, from: Coord, to: Coord, outcome: MoveOutcome) -> Vec<Effect> {
        if !self.is_pending(match_id, from, to) {
            debug!(%match_id, %from, %to, "dropping acceptance for a move that is not pending");
            return Vec::new();
        }
        let Some(piece) = self.board.get(from) else {
            warn!(%from, "accepted move has no piece on its origin");
            self.phase = Phase::Idle;
            return Vec::new();
        };

        self.turn = self.turn.map(Color::opponent);
        self.check = outcome.check;
        self.available_moves.clear();
        self.next_ticket += 1;
        let ticket = CommitTicket(self.next_ticket);
        self.phase = Phase::Animating {
            moving: MovingPiece { start: from, end: to, piece },
            ticket,
        };
        vec![Effect::ScheduleCommit { ticket, delay: self.animation }]
    }

    /// The service refused the pending move, or the call failed. The board and
    /// turn stay as they were. A reply for any other match or move is dropped.
    pub fn move_rejected(&mut self, match_id: &MatchId, from: Coord, to: Coord, err: &Error) {
        if !self.is_pending(match_id, from, to) {
            debug!(%match_id, %from, %to, "dropping rejection for a move that is not pending: {err}");
            return;
        }
        error!(%from, %to, "move failed: {err}");
        self.phase = Phase::Idle;
        self.available_moves.clear();
    }

    /// Ends the animation window: moves the piece on the board and picks the cue.
    pub fn commit(&mut self, ticket: CommitTicket) -> Vec<Effect> {
        let moving = match self.phase {
            Phase::Animating { moving, ticket: current } if current == ticket => moving,
            _ => {
                debug!(?ticket, "stale commit");
                return Vec::new();
            }
        };

        let captured = self.board.apply_move(moving.start, moving.end);
        self.last_move = Some((moving.start, moving.end));
        self.phase = Phase::Idle;

        let cue = match captured {
            Some(victim) => {
                info!(at = %moving.end, ?victim, "capture");
                SoundCue::Capture
            }
            None => SoundCue::Move,
        };
        vec![Effect::PlaySound(cue)]
    }
}

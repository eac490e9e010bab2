//! Ritual encounter state machine

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

use crate::options::RitualOptions;
use crate::rng::GameRng;

use super::rules::{Move, MoveError, RuleSet, check_move, is_losing_for_mover, legal_moves};
use super::setup::draw_piles;
use super::strategy::{Decision, choose_move};

/// Duel participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Side {
    /// The goblin shaman, always moves first
    Challenger,
    /// The player
    Defender,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Challenger => Self::Defender,
            Self::Defender => Self::Challenger,
        }
    }
}

/// Piles, rule and whose turn it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelState {
    pub left: u32,
    pub right: u32,
    pub rule: RuleSet,
    pub turn: Side,
}

impl DuelState {
    pub fn is_empty(&self) -> bool {
        self.left == 0 && self.right == 0
    }

    pub fn total(&self) -> u32 {
        self.left + self.right
    }
}

/// How a finished ritual pays out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RitualResult {
    /// The goblin took the last stone; the player suffers backlash damage
    GoblinWon { backlash: u32 },
    /// The player took the last stone and earns a sigil
    PlayerWon,
}

/// One ritual encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RitualDuel {
    state: DuelState,
    winner: Option<Side>,
    history: Vec<(Side, Move)>,
}

impl RitualDuel {
    /// Fresh encounter: random rule, random (possibly fairness-nudged) piles
    pub fn new_encounter(options: &RitualOptions, rng: &mut GameRng) -> Self {
        let rule = if rng.coin() {
            RuleSet::Parity
        } else {
            RuleSet::ModFour
        };
        let (left, right) = draw_piles(rule, options, rng);
        debug!(%rule, left, right, "ritual begins");
        Self::with_piles(rule, left, right)
    }

    /// Encounter from fixed piles, goblin to move
    pub fn with_piles(rule: RuleSet, left: u32, right: u32) -> Self {
        let state = DuelState {
            left,
            right,
            rule,
            turn: Side::Challenger,
        };
        Self {
            state,
            winner: None,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> DuelState {
        self.state
    }

    pub fn rule(&self) -> RuleSet {
        self.state.rule
    }

    pub fn piles(&self) -> (u32, u32) {
        (self.state.left, self.state.right)
    }

    pub fn turn(&self) -> Side {
        self.state.turn
    }

    /// Terminal when the board is empty
    pub fn is_over(&self) -> bool {
        self.state.is_empty()
    }

    /// Whoever took the last stone
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn history(&self) -> &[(Side, Move)] {
        &self.history
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self.state.rule, self.state.left, self.state.right)
    }

    /// Whether the side to move is lost against perfect play
    pub fn mover_is_losing(&self) -> bool {
        is_losing_for_mover(self.state.rule, self.state.left, self.state.right)
    }

    /// Legality of a move for the side to move, without playing it
    fn check(&self, mv: Move) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::Finished);
        }
        check_move(self.state.rule, self.state.left, self.state.right, mv)
    }

    /// Let the goblin choose and play its move
    pub fn adversary_move(&mut self, rng: &mut GameRng) -> Result<Decision, MoveError> {
        if self.is_over() {
            return Err(MoveError::Finished);
        }
        if self.state.turn != Side::Challenger {
            return Err(MoveError::OutOfTurn);
        }
        let decision = choose_move(self.state.rule, self.state.left, self.state.right, rng)
            .ok_or(MoveError::Finished)?;
        self.play(decision.mv);
        debug!(mv = %decision.mv, tactic = ?decision.tactic, "goblin moves");
        Ok(decision)
    }

    /// Play the player's move; a rejected move leaves the turn with the player
    ///
    /// Returns the winner if this move ended the ritual.
    pub fn player_move(&mut self, mv: Move) -> Result<Option<Side>, MoveError> {
        if !self.is_over() && self.state.turn != Side::Defender {
            return Err(MoveError::OutOfTurn);
        }
        self.check(mv)?;
        self.play(mv);
        Ok(self.winner)
    }

    /// Payout for a finished ritual
    pub fn settle(&self, options: &RitualOptions, rng: &mut GameRng) -> Option<RitualResult> {
        match self.winner? {
            Side::Challenger => Some(RitualResult::GoblinWon {
                backlash: rng.between(options.backlash_min, options.backlash_max),
            }),
            Side::Defender => Some(RitualResult::PlayerWon),
        }
    }

    fn play(&mut self, mv: Move) {
        let mover = self.state.turn;
        self.state.left -= mv.left;
        self.state.right -= mv.right;
        self.history.push((mover, mv));
        if self.state.is_empty() {
            self.winner = Some(mover);
        } else {
            self.state.turn = mover.other();
        }
    }
}

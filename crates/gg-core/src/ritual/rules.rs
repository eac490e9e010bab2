//! Stone duel rules
//!
//! Two piles, players alternate removing stones, whoever empties the board wins.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use thiserror::Error;

use crate::consts::MOD_FOUR_MAX_TAKE;

/// Which ritual is being played
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RuleSet {
    /// Rule A: take (1,0), (0,1) or (1,1)
    #[strum(serialize = "Game 1")]
    Parity,
    /// Rule B: take 1-3 stones in total, split across the piles any way
    #[strum(serialize = "Game 2")]
    ModFour,
}

impl RuleSet {
    pub fn description(self) -> &'static str {
        match self {
            Self::Parity => "take (1,0) or (0,1) or (1,1). Last move wins.",
            Self::ModFour => {
                "take 1-3 stones TOTAL each turn (split across piles). Last move wins."
            }
        }
    }
}

/// Stones taken from the (left, right) piles in one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub left: u32,
    pub right: u32,
}

impl Move {
    pub const fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    pub const fn total(self) -> u32 {
        self.left + self.right
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.left, self.right)
    }
}

/// Why a move was rejected. The turn is not consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the ritual is already over")]
    Finished,

    #[error("it is not your turn")]
    OutOfTurn,

    #[error("you can't take more stones than exist")]
    ExceedsPile,

    #[error("only (1,0) (0,1) (1,1) are allowed in Game 1")]
    ShapeNotAllowed,

    #[error("must take 1-3 stones total in Game 2")]
    WrongTotal,
}

const PARITY_MOVES: [Move; 3] = [Move::new(1, 0), Move::new(0, 1), Move::new(1, 1)];

/// Check a move against the rule and the current piles
pub fn check_move(rule: RuleSet, left: u32, right: u32, mv: Move) -> Result<(), MoveError> {
    if mv.left > left || mv.right > right {
        return Err(MoveError::ExceedsPile);
    }
    match rule {
        RuleSet::Parity if !PARITY_MOVES.contains(&mv) => Err(MoveError::ShapeNotAllowed),
        RuleSet::ModFour if mv.total() == 0 || mv.total() > MOD_FOUR_MAX_TAKE => {
            Err(MoveError::WrongTotal)
        }
        _ => Ok(()),
    }
}

/// Every legal move, ordered by (left, right)
pub fn legal_moves(rule: RuleSet, left: u32, right: u32) -> Vec<Move> {
    match rule {
        RuleSet::Parity => {
            let mut moves: Vec<Move> = PARITY_MOVES
                .into_iter()
                .filter(|mv| mv.left <= left && mv.right <= right)
                .collect();
            moves.sort_unstable();
            moves
        }
        RuleSet::ModFour => {
            let mut moves = Vec::new();
            for l in 0..=left.min(MOD_FOUR_MAX_TAKE) {
                for r in 0..=right.min(MOD_FOUR_MAX_TAKE - l) {
                    if l + r >= 1 {
                        moves.push(Move::new(l, r));
                    }
                }
            }
            moves
        }
    }
}

/// Whether the player about to move is lost against perfect play
///
/// Rule A: both piles even. Rule B: total stones a multiple of four.
pub fn is_losing_for_mover(rule: RuleSet, left: u32, right: u32) -> bool {
    match rule {
        RuleSet::Parity => left % 2 == 0 && right % 2 == 0,
        RuleSet::ModFour => (left + right) % 4 == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_moves() {
        assert_eq!(
            legal_moves(RuleSet::Parity, 3, 3),
            vec![Move::new(0, 1), Move::new(1, 0), Move::new(1, 1)]
        );
        assert_eq!(legal_moves(RuleSet::Parity, 0, 2), vec![Move::new(0, 1)]);
        assert!(legal_moves(RuleSet::Parity, 0, 0).is_empty());
    }

    #[test]
    fn test_mod_four_moves() {
        let moves = legal_moves(RuleSet::ModFour, 5, 5);
        assert_eq!(moves.len(), 9);
        assert_eq!(moves[0], Move::new(0, 1));
        assert!(moves.iter().all(|mv| (1..=3).contains(&mv.total())));

        assert_eq!(
            legal_moves(RuleSet::ModFour, 1, 0),
            vec![Move::new(1, 0)]
        );
        assert_eq!(legal_moves(RuleSet::ModFour, 0, 2).len(), 2);
    }

    #[test]
    fn test_check_move() {
        assert_eq!(check_move(RuleSet::Parity, 1, 1, Move::new(1, 1)), Ok(()));
        assert_eq!(
            check_move(RuleSet::Parity, 5, 5, Move::new(2, 0)),
            Err(MoveError::ShapeNotAllowed)
        );
        assert_eq!(
            check_move(RuleSet::Parity, 0, 5, Move::new(1, 0)),
            Err(MoveError::ExceedsPile)
        );
        assert_eq!(
            check_move(RuleSet::ModFour, 5, 5, Move::new(0, 0)),
            Err(MoveError::WrongTotal)
        );
        assert_eq!(
            check_move(RuleSet::ModFour, 5, 5, Move::new(2, 2)),
            Err(MoveError::WrongTotal)
        );
        assert_eq!(check_move(RuleSet::ModFour, 5, 5, Move::new(2, 1)), Ok(()));
    }

    #[test]
    fn test_every_listed_move_is_legal() {
        for rule in [RuleSet::Parity, RuleSet::ModFour] {
            for left in 0..6 {
                for right in 0..6 {
                    for mv in legal_moves(rule, left, right) {
                        assert_eq!(check_move(rule, left, right, mv), Ok(()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_losing_positions() {
        assert!(is_losing_for_mover(RuleSet::Parity, 8, 10));
        assert!(!is_losing_for_mover(RuleSet::Parity, 7, 10));
        assert!(is_losing_for_mover(RuleSet::ModFour, 5, 7));
        assert!(!is_losing_for_mover(RuleSet::ModFour, 5, 5));
        assert_eq!(RuleSet::ModFour.to_string(), "Game 2");
    }
}

//! Goblin move selection
//!
//! The goblin looks for a forcing move first and only falls back to a random legal
//! move when no forcing move exists. Each branch is named so callers and tests can
//! see which one fired.

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

use super::rules::{Move, RuleSet, legal_moves};

/// Branch of the decision table that produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tactic {
    /// Rule A, one pile empty: the only shape left
    SinglePile,
    /// Rule A: restore (even, even)
    FixParity,
    /// Rule B: leave a multiple of four
    ModFour,
    /// No forcing move exists, pick any legal move
    RandomFallback,
}

/// The goblin's chosen move and the branch that chose it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub mv: Move,
    pub tactic: Tactic,
}

/// The forcing move for this position, if the rule has one
pub fn forcing_move(rule: RuleSet, left: u32, right: u32) -> Option<Decision> {
    match rule {
        RuleSet::Parity => parity_forcing_move(left, right),
        RuleSet::ModFour => mod_four_forcing_move(left, right),
    }
}

/// Choose the goblin's move; `None` only when both piles are empty
pub fn choose_move(rule: RuleSet, left: u32, right: u32, rng: &mut GameRng) -> Option<Decision> {
    if let Some(decision) = forcing_move(rule, left, right) {
        return Some(decision);
    }
    let moves = legal_moves(rule, left, right);
    rng.choose(&moves).map(|&mv| Decision {
        mv,
        tactic: Tactic::RandomFallback,
    })
}

fn parity_forcing_move(left: u32, right: u32) -> Option<Decision> {
    let (mv, tactic) = match (left, right) {
        (0, 0) => return None,
        (0, _) => (Move::new(0, 1), Tactic::SinglePile),
        (_, 0) => (Move::new(1, 0), Tactic::SinglePile),
        _ => match (left % 2 == 1, right % 2 == 1) {
            (true, false) => (Move::new(1, 0), Tactic::FixParity),
            (false, true) => (Move::new(0, 1), Tactic::FixParity),
            (true, true) => (Move::new(1, 1), Tactic::FixParity),
            (false, false) => return None,
        },
    };
    Some(Decision { mv, tactic })
}

fn mod_four_forcing_move(left: u32, right: u32) -> Option<Decision> {
    let target = (left + right) % 4;
    if target == 0 {
        return None;
    }
    legal_moves(RuleSet::ModFour, left, right)
        .into_iter()
        .find(|mv| mv.total() == target)
        .map(|mv| Decision {
            mv,
            tactic: Tactic::ModFour,
        })
}

//! Goblin ritual: the two-pile stone duel
//!
//! The goblin always opens. Rule A ([`RuleSet::Parity`]) is won by handing the
//! opponent two even piles; rule B ([`RuleSet::ModFour`]) by leaving a multiple of four.

mod duel;
mod rules;
mod setup;
mod strategy;

pub use duel::{DuelState, RitualDuel, RitualResult, Side};
pub use rules::{Move, MoveError, RuleSet, check_move, is_losing_for_mover, legal_moves};
pub use setup::{draw_piles, make_even_in_range, mod_four_deficit};
pub use strategy::{Decision, Tactic, choose_move, forcing_move};

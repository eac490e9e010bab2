//! Ambush fights
//!
//! A guessing duel: the foe hides a number, every miss costs health, a hit wins.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::rng::GameRng;

/// Reply to one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    TooLow { damage: u32 },
    TooHigh { damage: u32 },
    Hit,
}

impl GuessOutcome {
    /// Damage the foe deals in answer, zero on a hit
    pub fn damage(self) -> u32 {
        match self {
            Self::TooLow { damage } | Self::TooHigh { damage } => damage,
            Self::Hit => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the fight is already over")]
pub struct BattleOver;

/// One ambush in progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberBattle {
    difficulty: u32,
    upper: u32,
    secret: u32,
    attempts: u32,
    won: bool,
}

impl NumberBattle {
    /// Difficulty grows with every sigil already earned
    pub fn difficulty_for(sigils: u32) -> u32 {
        sigils.saturating_add(1)
    }

    /// Highest number the foe may hide
    pub fn upper_bound(difficulty: u32) -> u32 {
        match difficulty {
            2 => 50,
            3 => 100,
            _ => 30,
        }
    }

    pub fn new(difficulty: u32, rng: &mut GameRng) -> Self {
        let upper = Self::upper_bound(difficulty);
        Self::with_secret(difficulty, rng.rnd(upper))
    }

    /// Battle against a known secret
    pub fn with_secret(difficulty: u32, secret: u32) -> Self {
        Self {
            difficulty,
            upper: Self::upper_bound(difficulty),
            secret,
            attempts: 0,
            won: false,
        }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn upper(&self) -> u32 {
        self.upper
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Guess the secret; a miss rolls the foe's counterattack
    pub fn guess(&mut self, guess: i64, rng: &mut GameRng) -> Result<GuessOutcome, BattleOver> {
        if self.won {
            return Err(BattleOver);
        }
        self.attempts += 1;

        let secret = i64::from(self.secret);
        let outcome = if guess < secret {
            GuessOutcome::TooLow {
                damage: self.roll_damage(rng),
            }
        } else if guess > secret {
            GuessOutcome::TooHigh {
                damage: self.roll_damage(rng),
            }
        } else {
            self.won = true;
            GuessOutcome::Hit
        };
        debug!(guess, attempts = self.attempts, ?outcome, "fight guess");
        Ok(outcome)
    }

    fn roll_damage(&self, rng: &mut GameRng) -> u32 {
        let d = self.difficulty;
        rng.between(
            d.saturating_mul(2).saturating_add(5),
            d.saturating_mul(3).saturating_add(12),
        )
    }

    /// Gold looted from a beaten foe
    pub fn reward(rng: &mut GameRng) -> u32 {
        15 + rng.between(0, 25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_bounds() {
        assert_eq!(NumberBattle::upper_bound(1), 30);
        assert_eq!(NumberBattle::upper_bound(2), 50);
        assert_eq!(NumberBattle::upper_bound(3), 100);
        assert_eq!(NumberBattle::upper_bound(4), 30);
        assert_eq!(NumberBattle::difficulty_for(0), 1);
        assert_eq!(NumberBattle::difficulty_for(2), 3);
        assert_eq!(NumberBattle::difficulty_for(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_huge_difficulty_saturates() {
        let mut rng = GameRng::new(12);
        let mut battle = NumberBattle::with_secret(u32::MAX, 10);
        assert_eq!(battle.upper(), 30);
        assert_eq!(battle.guess(1, &mut rng).unwrap().damage(), u32::MAX);
    }

    #[test]
    fn test_secret_in_range() {
        let mut rng = GameRng::new(8);
        for difficulty in 1..=4 {
            for _ in 0..100 {
                let battle = NumberBattle::new(difficulty, &mut rng);
                assert!((1..=battle.upper()).contains(&battle.secret));
            }
        }
    }

    #[test]
    fn test_guessing() {
        let mut rng = GameRng::new(9);
        let mut battle = NumberBattle::with_secret(2, 17);

        match battle.guess(3, &mut rng).unwrap() {
            GuessOutcome::TooLow { damage } => assert!((9..=18).contains(&damage)),
            other => panic!("unexpected {other:?}"),
        }
        match battle.guess(40, &mut rng).unwrap() {
            GuessOutcome::TooHigh { damage } => assert!((9..=18).contains(&damage)),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!battle.is_won());
        assert_eq!(battle.guess(17, &mut rng), Ok(GuessOutcome::Hit));
        assert!(battle.is_won());
        assert_eq!(battle.attempts(), 3);
        assert_eq!(battle.guess(17, &mut rng), Err(BattleOver));
    }

    #[test]
    fn test_negative_guess_is_low() {
        let mut rng = GameRng::new(10);
        let mut battle = NumberBattle::with_secret(1, 1);
        let outcome = battle.guess(-5, &mut rng).unwrap();
        assert!(matches!(outcome, GuessOutcome::TooLow { .. }));
        assert!((7..=15).contains(&outcome.damage()));
    }

    #[test]
    fn test_reward_range() {
        let mut rng = GameRng::new(11);
        for _ in 0..200 {
            assert!((15..=40).contains(&NumberBattle::reward(&mut rng)));
        }
    }
}

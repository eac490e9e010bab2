//! Opening piles for a ritual
//!
//! Piles are drawn uniformly, then optionally nudged so the player (who moves second)
//! starts on a winnable position.

use crate::options::RitualOptions;
use crate::rng::GameRng;

use super::rules::RuleSet;

/// Draw the two opening piles for `rule`
pub fn draw_piles(rule: RuleSet, options: &RitualOptions, rng: &mut GameRng) -> (u32, u32) {
    let mut left = rng.between(options.pile_min, options.pile_max);
    let mut right = rng.between(options.pile_min, options.pile_max);

    match rule {
        RuleSet::Parity => {
            if rng.percent(options.parity_fair_percent) {
                left = make_even_in_range(left, options.pile_min, options.pile_max);
                right = make_even_in_range(right, options.pile_min, options.pile_max);
            }
        }
        RuleSet::ModFour => {
            if rng.percent(options.mod_four_fair_percent) {
                let deficit = mod_four_deficit(left + right);
                if rng.coin() {
                    left += deficit;
                } else {
                    right += deficit;
                }
            }
        }
    }
    (left, right)
}

/// Odd values step to an even neighbour: +1 while that stays within `hi`, else -1
///
/// Stepping down never leaves the range for the draw ranges used here (`lo < hi`).
pub fn make_even_in_range(x: u32, lo: u32, hi: u32) -> u32 {
    if x % 2 == 0 {
        return x;
    }
    if x < hi || x <= lo {
        x + 1
    } else {
        x - 1
    }
}

/// Stones to add so the total becomes a multiple of four
pub fn mod_four_deficit(total: u32) -> u32 {
    (4 - total % 4) % 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_even() {
        assert_eq!(make_even_in_range(8, 7, 13), 8);
        assert_eq!(make_even_in_range(7, 7, 13), 8);
        assert_eq!(make_even_in_range(11, 7, 13), 12);
        assert_eq!(make_even_in_range(13, 7, 13), 12);
    }

    #[test]
    fn test_deficit() {
        assert_eq!(mod_four_deficit(16), 0);
        assert_eq!(mod_four_deficit(17), 3);
        assert_eq!(mod_four_deficit(19), 1);
    }

    #[test]
    fn test_always_fair_parity() {
        let options = RitualOptions {
            parity_fair_percent: 100,
            ..RitualOptions::default()
        };
        let mut rng = GameRng::new(5);
        for _ in 0..200 {
            let (left, right) = draw_piles(RuleSet::Parity, &options, &mut rng);
            assert_eq!(left % 2, 0);
            assert_eq!(right % 2, 0);
            assert!((7..=13).contains(&left));
            assert!((7..=13).contains(&right));
        }
    }

    #[test]
    fn test_always_fair_mod_four() {
        let options = RitualOptions {
            mod_four_fair_percent: 100,
            ..RitualOptions::default()
        };
        let mut rng = GameRng::new(6);
        for _ in 0..200 {
            let (left, right) = draw_piles(RuleSet::ModFour, &options, &mut rng);
            assert_eq!((left + right) % 4, 0);
            assert!(left >= 7 && right >= 7);
            assert!(left <= 16 && right <= 16);
        }
    }

    #[test]
    fn test_widest_configurable_range() {
        let options = RitualOptions {
            pile_min: 1,
            pile_max: crate::consts::PILE_LIMIT,
            parity_fair_percent: 100,
            mod_four_fair_percent: 100,
            ..RitualOptions::default()
        };
        let mut rng = GameRng::new(8);
        for rule in [RuleSet::Parity, RuleSet::ModFour] {
            for _ in 0..200 {
                let (left, right) = draw_piles(rule, &options, &mut rng);
                assert!(left >= 1 && right >= 1);
                assert!(left + right > 0);
            }
        }
    }

    #[test]
    fn test_never_fair_stays_in_range() {
        let options = RitualOptions {
            parity_fair_percent: 0,
            mod_four_fair_percent: 0,
            ..RitualOptions::default()
        };
        let mut rng = GameRng::new(7);
        for rule in [RuleSet::Parity, RuleSet::ModFour] {
            for _ in 0..100 {
                let (left, right) = draw_piles(rule, &options, &mut rng);
                assert!((7..=13).contains(&left));
                assert!((7..=13).contains(&right));
            }
        }
    }
}

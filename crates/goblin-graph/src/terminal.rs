//! Line-based terminal front end
//!
//! Prompts on the output stream, reads answers line by line and narrates every
//! [`SessionEvent`]. Generic over the streams so tests can script a whole exchange.

use std::fmt::Display;
use std::io::{BufRead, Write};

use gg_core::combat::{GuessOutcome, NumberBattle};
use gg_core::loot::{LootItem, parse_selection};
use gg_core::ritual::{DuelState, Move, RitualDuel, RuleSet};
use gg_core::{Decider, SessionEvent};

use crate::input::{parse_guess, parse_move};

pub struct Terminal<R, W> {
    input: R,
    out: W,
    hints: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, out: W, hints: bool) -> Self {
        Self { input, out, hints }
    }

    /// Write one line; a closed output is not worth aborting the game over
    pub fn say(&mut self, text: impl Display) {
        writeln!(self.out, "{text}").ok();
    }

    pub fn divider(&mut self) {
        self.say(format!("\n{}\n", "-".repeat(60)));
    }

    /// Prompt and read one trimmed line; `None` once input is exhausted
    pub fn ask(&mut self, prompt: &str) -> Option<String> {
        write!(self.out, "{prompt}").ok();
        self.out.flush().ok();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    #[cfg(test)]
    pub(crate) fn written(&self) -> &W {
        &self.out
    }

    fn show_status(&mut self, state: DuelState) {
        self.say(format!("\nPiles: Left={}  Right={}", state.left, state.right));
        match state.rule {
            RuleSet::Parity => self.say(format!(
                "Status: Left is {}, Right is {}",
                parity_word(state.left),
                parity_word(state.right)
            )),
            RuleSet::ModFour => self.say(format!(
                "Status: Total={} (mod 4 = {})",
                state.total(),
                state.total() % 4
            )),
        }
    }

    /// Status plus the hint line, before the player's move
    fn show_piles(&mut self, duel: &RitualDuel) {
        self.show_status(duel.state());
        if self.hints && duel.mover_is_losing() {
            match duel.rule() {
                RuleSet::Parity => self.say(
                    "The stones lock into a stubborn rhythm... the goblin seems confident.",
                ),
                RuleSet::ModFour => {
                    self.say("The stones vibrate softly, settling into an uneasy stillness...")
                }
            }
        }
    }
}

fn parity_word(n: u32) -> &'static str {
    if n % 2 == 0 { "even" } else { "odd" }
}

impl<R: BufRead, W: Write> Decider for Terminal<R, W> {
    fn duel_move(&mut self, duel: &RitualDuel) -> Move {
        self.show_piles(duel);
        loop {
            self.say("Your move. Enter two numbers: L R  (example: 1 0)");
            let Some(line) = self.ask("> ") else {
                // Input closed: play the first legal move so the ritual can finish
                return duel.legal_moves().first().copied().unwrap_or(Move::new(0, 0));
            };
            match parse_move(&line) {
                Ok(mv) => return mv,
                Err(err) => self.say(err),
            }
        }
    }

    fn loot_picks(&mut self, offer: &[LootItem], capacity: u32) -> Vec<usize> {
        self.say("\nTorchlight flickers over broken stone. You spot loot:");
        for (i, item) in offer.iter().enumerate() {
            self.say(format!(
                "  {}. {:<14}  weight={}  value={}",
                i + 1,
                item.name,
                item.weight,
                item.value
            ));
        }
        self.say(format!("\nYour pack can carry up to {capacity} weight."));
        self.say("Pick items by number (e.g. 1 3 5). Press Enter to take nothing.");
        self.ask("> ")
            .map(|line| parse_selection(&line, offer.len()))
            .unwrap_or_default()
    }

    fn guess(&mut self, _battle: &NumberBattle) -> i64 {
        loop {
            let Some(line) = self.ask("Your guess: ") else {
                return 0;
            };
            match parse_guess(&line) {
                Some(guess) => return guess,
                None => self.say("Please enter a valid integer."),
            }
        }
    }

    fn notify(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::DungeonCreated { .. } => {
                self.say("The dungeon shifts into place beneath the village...\n")
            }
            SessionEvent::Echoes => self.say("Nothing here but echoes."),
            SessionEvent::RitualStarted { rule, .. } => {
                self.divider();
                self.say("A goblin shaman blocks the way, cackling over two piles of stones.");
                self.say(format!("Ritual mode: {rule}"));
                self.say(format!("Rules: {}", rule.description()));
                if *rule == RuleSet::ModFour && self.hints {
                    self.say("Hint: Total stones mod 4 matters...");
                }
            }
            SessionEvent::GoblinToMove(state) => self.show_status(*state),
            SessionEvent::GoblinMoved { mv, .. } => self.say(format!(
                "Goblin takes: {} from left, {} from right",
                mv.left, mv.right
            )),
            SessionEvent::PlayerMoved { .. } => {}
            SessionEvent::IllegalMove(err) => self.say(format!("Illegal: {err}.")),
            SessionEvent::RitualLost { backlash, health } => {
                self.say("\nThe Goblin wins the ritual and does a tiny victory dance.");
                self.say(format!(
                    "The ritual backlash hits you for {backlash} damage. (HP: {health})"
                ));
            }
            SessionEvent::RitualWon { sigils, required } => {
                self.say("\nYou win the ritual. The ash circle cracks like ice.");
                self.say(format!("You gained a Sigil! (Sigils: {sigils}/{required})"));
            }
            SessionEvent::Shifted(outcome) => {
                self.say("\nThe dungeon shudders...");
                self.say(outcome);
            }
            SessionEvent::LootResolved {
                resolution,
                capacity,
                greed_damage,
            } => {
                self.say("\nYou tighten the straps...");
                if resolution.overflowed() {
                    self.say("Too heavy! Stone groans overhead. Something is coming.");
                    self.say("You start dumping gear while running...");
                    for item in &resolution.dropped {
                        self.say(format!(
                            "  Dropped: {} (w={}, v={})",
                            item.name, item.weight, item.value
                        ));
                    }
                }
                self.say(format!(
                    "Pack weight {}/{capacity}. You pocket loot worth {} gold.",
                    resolution.accepted_weight(),
                    resolution.accepted_value()
                ));
                if let Some(damage) = greed_damage {
                    self.say(format!(
                        "The dungeon bites you for {damage} damage in the chaos."
                    ));
                }
            }
            SessionEvent::FightStarted { upper, .. } => {
                self.say("A shadow lunges!");
                self.say(format!(
                    "An enemy challenges you! Guess the number between 1 and {upper}."
                ));
            }
            SessionEvent::Guessed {
                outcome, health, ..
            } => match outcome {
                GuessOutcome::Hit => self.say("You hit the mark! The foe recoils."),
                GuessOutcome::TooLow { damage } | GuessOutcome::TooHigh { damage } => {
                    let hint = if matches!(outcome, GuessOutcome::TooLow { .. }) {
                        "Too low!"
                    } else {
                        "Too high!"
                    };
                    self.say(hint);
                    self.say(format!(
                        "The enemy strikes you for {damage} damage! (HP: {health})"
                    ));
                }
            },
            SessionEvent::FightWon { reward } => self.say(format!("You loot {reward} gold.")),
            SessionEvent::GateSealed { sigils, required } => {
                self.say(format!("\nSigils: {sigils}/{required}"));
                self.say(format!("The gate won't budge. You need {required} Sigils."));
            }
            SessionEvent::Escaped => {
                self.say("The sockets flare. The gate unlocks.");
                self.say("You step into moonlight. You escaped the Goblin King's Graph.");
                self.say("\n=== YOU WIN ===\n");
            }
            SessionEvent::Died => self.say("\nYOU FALL. THE DUNGEON CLAIMS ANOTHER.\n"),
        }
    }
}

//! Dungeon run orchestration
//!
//! A [`Session`] owns the player, the live dungeon (if any) and the RNG. Room events
//! ask a [`Decider`] for the player's choices, so the same loop drives the terminal
//! front end and scripted tests.

use thiserror::Error;
use tracing::{info, warn};

use crate::combat::{GuessOutcome, NumberBattle};
use crate::dungeon::{
    Dungeon, DungeonError, RoomId, RoomKind, ShiftOutcome, apply_shift, generate_dungeon,
};
use crate::loot::{self, LootItem, LootResolution};
use crate::options::GameOptions;
use crate::player::PlayerRecord;
use crate::ritual::{DuelState, Move, MoveError, RitualDuel, RitualResult, RuleSet, Side};
use crate::rng::GameRng;
use crate::shop::{self, PurchaseResult};

/// The player's side of every room event
pub trait Decider {
    /// Next move in a ritual; rejected moves are reported and asked for again
    fn duel_move(&mut self, duel: &RitualDuel) -> Move;

    /// 1-based positions in `offer` to grab
    fn loot_picks(&mut self, offer: &[LootItem], capacity: u32) -> Vec<usize>;

    /// Next guess in a fight
    fn guess(&mut self, battle: &NumberBattle) -> i64;

    /// Narration hook
    fn notify(&mut self, _event: &SessionEvent) {}
}

/// Things that happen while resolving a room
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    DungeonCreated { rooms: usize },
    /// Room without an event
    Echoes,
    RitualStarted { rule: RuleSet, left: u32, right: u32 },
    /// Board as the goblin is about to move
    GoblinToMove(DuelState),
    GoblinMoved { mv: Move, left: u32, right: u32 },
    PlayerMoved { mv: Move, left: u32, right: u32 },
    IllegalMove(MoveError),
    RitualLost { backlash: u32, health: i32 },
    RitualWon { sigils: u32, required: u32 },
    Shifted(ShiftOutcome),
    LootResolved {
        resolution: LootResolution,
        capacity: u32,
        greed_damage: Option<u32>,
    },
    FightStarted { difficulty: u32, upper: u32 },
    Guessed { guess: i64, outcome: GuessOutcome, health: i32 },
    FightWon { reward: u32 },
    GateSealed { sigils: u32, required: u32 },
    Escaped,
    Died,
}

/// Where the run stands after resolving a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomOutcome {
    /// Pick an exit and keep exploring
    Continue,
    /// Gate opened, dungeon discarded
    Escaped,
    /// Player fell, dungeon discarded
    Died,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no dungeon is open")]
    NoDungeon,

    #[error(transparent)]
    Dungeon(#[from] DungeonError),
}

pub struct Session {
    pub player: PlayerRecord,
    pub dungeon: Option<Dungeon>,
    pub options: GameOptions,
    rng: GameRng,
}

impl Session {
    pub fn new(player: PlayerRecord, options: GameOptions, rng: GameRng) -> Self {
        Self {
            player,
            dungeon: None,
            options,
            rng,
        }
    }

    /// Spend gold at the village shop
    pub fn buy(&mut self, slot: usize) -> PurchaseResult {
        let result = shop::buy(&mut self.player, slot);
        info!(slot, ?result, gold = self.player.gold, "shop visit");
        result
    }

    /// Generate a dungeon unless one is already open
    pub fn enter_dungeon(&mut self, decider: &mut dyn Decider) -> Result<&Dungeon, SessionError> {
        if self.dungeon.is_none() {
            let dungeon =
                generate_dungeon(self.options.rooms, self.options.extra_tunnels, &mut self.rng)?;
            decider.notify(&SessionEvent::DungeonCreated {
                rooms: dungeon.rooms.len(),
            });
            self.dungeon = Some(dungeon);
        }
        self.dungeon.as_ref().ok_or(SessionError::NoDungeon)
    }

    /// Run the current room's event (once) and check the exit gate
    pub fn resolve_room(&mut self, decider: &mut dyn Decider) -> Result<RoomOutcome, SessionError> {
        let dungeon = self.dungeon.as_ref().ok_or(SessionError::NoDungeon)?;
        let room_id = dungeon.current;
        let room = dungeon.current_room();
        let (kind, pending) = (room.kind, room.event_pending());

        if !self.player.is_dead() && pending {
            match kind {
                RoomKind::Loot => self.loot_cache(decider),
                RoomKind::Ritual => self.goblin_ritual(decider),
                RoomKind::Fight => self.ambush(decider),
                RoomKind::Start | RoomKind::Exit | RoomKind::Empty => {
                    decider.notify(&SessionEvent::Echoes)
                }
            }
            if let Some(dungeon) = self.dungeon.as_mut() {
                dungeon.current_room_mut().cleared = true;
            }
        }

        if self.player.is_dead() {
            info!(player = %self.player.name, room = room_id, "player died in the dungeon");
            self.dungeon = None;
            decider.notify(&SessionEvent::Died);
            return Ok(RoomOutcome::Died);
        }

        if kind == RoomKind::Exit {
            let required = self.options.sigils_required;
            if self.player.has_escaped(required) {
                info!(player = %self.player.name, sigils = self.player.sigils, "escaped");
                self.dungeon = None;
                decider.notify(&SessionEvent::Escaped);
                return Ok(RoomOutcome::Escaped);
            }
            decider.notify(&SessionEvent::GateSealed {
                sigils: self.player.sigils,
                required,
            });
        }
        Ok(RoomOutcome::Continue)
    }

    /// Walk through the `slot`-th exit (0-based) of the current room
    pub fn travel(&mut self, slot: usize) -> Result<RoomId, SessionError> {
        let dungeon = self.dungeon.as_mut().ok_or(SessionError::NoDungeon)?;
        Ok(dungeon.travel(slot)?)
    }

    fn loot_cache(&mut self, decider: &mut dyn Decider) {
        let offer = loot::offer(self.options.loot.offer_size, &mut self.rng);
        let capacity = self.player.pack_capacity;

        let mut taken: Vec<LootItem> = Vec::new();
        let mut seen = Vec::new();
        for pick in decider.loot_picks(&offer, capacity) {
            if let Some(item) = pick.checked_sub(1).and_then(|i| offer.get(i))
                && !seen.contains(&pick)
            {
                seen.push(pick);
                taken.push(*item);
            }
        }

        let resolution = loot::resolve(capacity, taken, &mut self.rng);
        self.player.add_gold(resolution.accepted_value());

        let greed_damage = resolution.overflowed().then(|| {
            let damage = self
                .rng
                .between(self.options.loot.greed_damage_min, self.options.loot.greed_damage_max);
            self.player.take_damage(damage);
            damage
        });
        decider.notify(&SessionEvent::LootResolved {
            resolution,
            capacity,
            greed_damage,
        });
    }

    fn goblin_ritual(&mut self, decider: &mut dyn Decider) {
        let mut duel = RitualDuel::new_encounter(&self.options.ritual, &mut self.rng);
        let (left, right) = duel.piles();
        decider.notify(&SessionEvent::RitualStarted {
            rule: duel.rule(),
            left,
            right,
        });

        while !duel.is_over() {
            match duel.turn() {
                Side::Challenger => {
                    decider.notify(&SessionEvent::GoblinToMove(duel.state()));
                    let Ok(decision) = duel.adversary_move(&mut self.rng) else {
                        break;
                    };
                    let (left, right) = duel.piles();
                    decider.notify(&SessionEvent::GoblinMoved {
                        mv: decision.mv,
                        left,
                        right,
                    });
                }
                Side::Defender => {
                    let mv = decider.duel_move(&duel);
                    match duel.player_move(mv) {
                        Ok(_) => {
                            let (left, right) = duel.piles();
                            decider.notify(&SessionEvent::PlayerMoved { mv, left, right });
                        }
                        Err(err) => decider.notify(&SessionEvent::IllegalMove(err)),
                    }
                }
            }
        }

        let moves = duel.history().len();
        match duel.settle(&self.options.ritual, &mut self.rng) {
            Some(RitualResult::GoblinWon { backlash }) => {
                self.player.take_damage(backlash);
                info!(backlash, moves, "goblin won the ritual");
                decider.notify(&SessionEvent::RitualLost {
                    backlash,
                    health: self.player.health,
                });
            }
            Some(RitualResult::PlayerWon) => {
                self.player.award_sigil();
                info!(sigils = self.player.sigils, moves, "player won the ritual");
                decider.notify(&SessionEvent::RitualWon {
                    sigils: self.player.sigils,
                    required: self.options.sigils_required,
                });
            }
            None => warn!("ritual ended without a winner"),
        }

        if let Some(dungeon) = self.dungeon.as_mut() {
            let outcome = apply_shift(dungeon, &mut self.rng);
            decider.notify(&SessionEvent::Shifted(outcome));
        }
    }

    fn ambush(&mut self, decider: &mut dyn Decider) {
        let difficulty = NumberBattle::difficulty_for(self.player.sigils);
        let mut battle = NumberBattle::new(difficulty, &mut self.rng);
        decider.notify(&SessionEvent::FightStarted {
            difficulty: battle.difficulty(),
            upper: battle.upper(),
        });

        while !self.player.is_dead() && !battle.is_won() {
            let guess = decider.guess(&battle);
            let Ok(outcome) = battle.guess(guess, &mut self.rng) else {
                break;
            };
            self.player.take_damage(outcome.damage());
            decider.notify(&SessionEvent::Guessed {
                guess,
                outcome,
                health: self.player.health,
            });

            if outcome == GuessOutcome::Hit {
                let reward = NumberBattle::reward(&mut self.rng);
                self.player.add_gold(reward);
                decider.notify(&SessionEvent::FightWon { reward });
            }
        }
    }
}

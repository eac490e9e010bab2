//! The village hub and dungeon runs

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use gg_core::player::ItemEffect;
use gg_core::shop::{PurchaseResult, SHOP_STOCK};
use gg_core::{RoomOutcome, Session};
use gg_save::{delete_save, load_game, save_game};

use crate::input::parse_menu_index;
use crate::terminal::Terminal;

/// Replace the session's player and dungeon from the save file
pub fn restore<R: BufRead, W: Write>(
    session: &mut Session,
    save_path: &Path,
    term: &mut Terminal<R, W>,
) -> bool {
    match load_game(save_path) {
        Ok(loaded) => {
            if loaded.discarded.is_some() {
                term.say("Your map of the dungeon has crumbled. The maze will be new.");
            }
            session.player = loaded.player;
            session.dungeon = loaded.dungeon;
            true
        }
        Err(err) => {
            warn!(error = %err, "failed to load game");
            term.say(format!("[Failed to load game: {err}]"));
            false
        }
    }
}

pub fn save<R: BufRead, W: Write>(session: &Session, save_path: &Path, term: &mut Terminal<R, W>) {
    match save_game(&session.player, session.dungeon.as_ref(), save_path) {
        Ok(()) => term.say(format!("[Saved to {}]", save_path.display())),
        Err(err) => {
            warn!(error = %err, "failed to save game");
            term.say(format!("[Failed to save game: {err}]"));
        }
    }
}

/// Main menu loop; returns when the player quits or dies
pub fn village<R: BufRead, W: Write>(
    session: &mut Session,
    save_path: &Path,
    term: &mut Terminal<R, W>,
) -> Result<()> {
    loop {
        term.divider();
        term.say("You stroll through the small village. Traders call out from stalls.");
        term.say("1) Visit the Shop");
        term.say("2) Visit the Noticeboard");
        term.say("3) Enter the Dungeon");
        term.say("4) Use an item");
        term.say("5) Show stats");
        term.say("6) Save Game");
        term.say("7) Load Game");
        term.say("8) Quit (autosave)");

        let choice = term.ask("> ");
        match choice.as_deref() {
            Some("1") => shop(session, term),
            Some("2") => noticeboard(session, term),
            Some("3") => {
                if dungeon_run(session, save_path, term)? == RoomOutcome::Died {
                    // Permadeath: the save goes with the adventurer
                    delete_save(save_path).ok();
                    term.say("Goodbye.");
                    return Ok(());
                }
            }
            Some("4") => use_item(session, term),
            Some("5") => show_stats(session, term),
            Some("6") => save(session, save_path, term),
            Some("7") => {
                if restore(session, save_path, term) {
                    term.say("Loaded.");
                }
            }
            Some("8") | None => {
                term.say("Autosaving and exiting...");
                save(session, save_path, term);
                term.say("Goodbye.");
                return Ok(());
            }
            Some(_) => term.say("Choose a valid option."),
        }
    }
}

fn shop<R: BufRead, W: Write>(session: &mut Session, term: &mut Terminal<R, W>) {
    term.divider();
    term.say("You enter the shop. The owner eyes your coin purse.");
    term.say(format!("Your gold: {}", session.player.gold));
    for (i, item) in SHOP_STOCK.iter().enumerate() {
        term.say(format!(
            "{}. {} - {} gold - {}",
            i + 1,
            item.ware,
            item.price,
            item.desc
        ));
    }
    term.say(format!("{}. Leave shop", SHOP_STOCK.len() + 1));

    let Some(slot) = term
        .ask("> ")
        .and_then(|line| parse_menu_index(&line, SHOP_STOCK.len()))
    else {
        term.say("You leave the shop.");
        return;
    };
    match session.buy(slot) {
        PurchaseResult::Bought(item) => term.say(format!("You bought: {item}")),
        PurchaseResult::PackReinforced { .. } => {
            term.say("Leather straps tightened. Capacity increased.")
        }
        PurchaseResult::CannotAfford { .. } => term.say("You can't afford that."),
        PurchaseResult::NoSuchItem => term.say("You leave the shop."),
    }
}

fn noticeboard<R: BufRead, W: Write>(session: &Session, term: &mut Terminal<R, W>) {
    term.divider();
    term.say("The noticeboard shows one warning in big letters:");
    term.say(format!(
        "'THE GOBLIN KING'S MAZE SHIFTED AGAIN. SIGILS REQUIRED: {}.'",
        session.options.sigils_required
    ));
    if session.options.hints {
        term.say("A smaller note: 'In the ritual rooms, the total stones whisper in mod 4...'");
    }
}

fn show_stats<R: BufRead, W: Write>(session: &Session, term: &mut Terminal<R, W>) {
    let player = &session.player;
    term.divider();
    term.say(format!("Name: {}", player.name));
    term.say(format!("Health: {}", player.health));
    term.say(format!("Gold: {}", player.gold));
    term.say(format!("Pack capacity: {}", player.pack_capacity));
    term.say(format!(
        "Sigils: {}/{}",
        player.sigils, session.options.sigils_required
    ));
    term.say(format!("Inventory: {:?}", player.inventory));
    if let Some(dungeon) = &session.dungeon {
        term.say(format!(
            "Dungeon: {}/{} rooms cleared",
            dungeon.cleared_count(),
            dungeon.rooms.len()
        ));
    }
}

fn use_item<R: BufRead, W: Write>(session: &mut Session, term: &mut Terminal<R, W>) {
    term.divider();
    let player = &mut session.player;
    if player.inventory.is_empty() {
        term.say("You have no items.");
        return;
    }

    term.say("Items in your pack:");
    for (i, item) in player.inventory.iter().enumerate() {
        term.say(format!("{}. {item}", i + 1));
    }
    term.say(format!("{}. Cancel", player.inventory.len() + 1));

    let Some(index) = term
        .ask("> ")
        .and_then(|line| parse_menu_index(&line, player.inventory.len()))
    else {
        term.say("Canceled.");
        return;
    };
    match player.use_item(index) {
        Some((item, ItemEffect::Healed(amount))) => term.say(format!(
            "You drink a {item} and restore {amount} HP. (HP: {})",
            player.health
        )),
        Some((_, ItemEffect::Hums)) => {
            term.say("The Sigil hums but nothing happens... maybe the gate below wants these.")
        }
        Some((item, ItemEffect::Nothing)) => {
            term.say(format!("You examine {item} but nothing happens."))
        }
        None => term.say("Canceled."),
    }
}

/// Explore until the player escapes, dies or walks back up
fn dungeon_run<R: BufRead, W: Write>(
    session: &mut Session,
    save_path: &Path,
    term: &mut Terminal<R, W>,
) -> Result<RoomOutcome> {
    session
        .enter_dungeon(term)
        .context("generating the dungeon")?;

    loop {
        let Some(dungeon) = session.dungeon.as_ref() else {
            return Ok(RoomOutcome::Continue);
        };
        let room = dungeon.current_room();
        term.divider();
        term.say(format!("You are in: {}", room.name));
        term.say(&room.desc);

        match session.resolve_room(term)? {
            RoomOutcome::Continue => {}
            outcome => return Ok(outcome),
        }

        let Some(dungeon) = session.dungeon.as_ref() else {
            return Ok(RoomOutcome::Continue);
        };
        let exits = dungeon.exits();
        term.say("\nExits:");
        for (i, &id) in exits.iter().enumerate() {
            if let Some(room) = dungeon.room(id) {
                let mark = if room.cleared { "x" } else { " " };
                term.say(format!("{}. [{mark}] {} ({})", i + 1, room.name, room.kind));
            }
        }
        term.say("\nA) Return to Village");
        term.say("S) Save");

        let Some(choice) = term.ask("> ").map(|c| c.to_lowercase()) else {
            return Ok(RoomOutcome::Continue);
        };
        match choice.as_str() {
            "a" => {
                term.say("You retreat to the surface... for now.");
                return Ok(RoomOutcome::Continue);
            }
            "s" => save(session, save_path, term),
            _ => match parse_menu_index(&choice, exits.len()) {
                Some(slot) => {
                    session.travel(slot)?;
                }
                None if choice.chars().all(|c| c.is_ascii_digit()) && !choice.is_empty() => {
                    term.say("Nope.")
                }
                None => term.say("Choose a door number, A, or S."),
            },
        }
    }
}

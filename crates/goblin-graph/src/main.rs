//! Goblin Graph
//!
//! Terminal entry point: arguments, logging, options and the opening prompts.

mod input;
mod terminal;
mod village;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use gg_core::{GameOptions, GameRng, PlayerRecord, Session};
use gg_save::{default_save_path, load_header, save_exists};

use crate::terminal::Terminal;
use crate::village::{restore, save, village};

const TITLE: &str = r"
   ____       _     _ _        ____                 _
  / ___| ___ | |__ | (_)_ __  / ___|_ __ __ _ _ __ | |__
 | |  _ / _ \| '_ \| | | '_ \| |  _| '__/ _` | '_ \| '_ \
 | |_| | (_) | |_) | | | | | | |_| | | | (_| | |_) | | | |
  \____|\___/|_.__/|_|_|_| |_|\____|_|  \__,_| .__/|_| |_|
                                             |_|
";

/// Goblin Graph - a shifting dungeon in your terminal
#[derive(Parser, Debug)]
#[command(name = "goblin-graph")]
#[command(author, version, about = "Goblin Graph - escape the Goblin King's maze", long_about = None)]
struct Args {
    /// Player name
    #[arg(short = 'u', long = "name")]
    name: Option<String>,

    /// Seed for a reproducible run
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Number of rooms in generated dungeons
    #[arg(long = "rooms")]
    rooms: Option<usize>,

    /// Extra tunnels added on top of the spanning tree
    #[arg(long = "extra-tunnels")]
    extra_tunnels: Option<usize>,

    /// Save file location
    #[arg(long = "save")]
    save: Option<PathBuf>,

    /// Options file (OPTIONS=key:value lines)
    #[arg(short = 'c', long = "options")]
    options: Option<PathBuf>,

    /// Write the effective options to this file and exit
    #[arg(long = "dump-options")]
    dump_options: Option<PathBuf>,

    /// Start a new game even if a save exists
    #[arg(short = 'n', long = "new")]
    new: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "goblin_graph=warn,gg_core=warn,gg_save=warn".into()),
        )
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let options = load_options(&args)?;
    if let Some(path) = &args.dump_options {
        options
            .save_to_file(path)
            .with_context(|| format!("writing options to {}", path.display()))?;
        return Ok(());
    }

    let save_path = args.save.clone().unwrap_or_else(default_save_path);
    let rng = args.seed.map(GameRng::new).unwrap_or_else(GameRng::from_entropy);
    info!(seed = rng.seed(), save = %save_path.display(), "starting");

    let stdin = io::stdin();
    let mut term = Terminal::new(stdin.lock(), io::stdout(), options.hints);
    term.say(TITLE);

    let mut session = start_session(&args, options, rng, &save_path, &mut term)?;
    village(&mut session, &save_path, &mut term)
}

/// Defaults, then the options file, then command-line overrides
fn load_options(args: &Args) -> Result<GameOptions> {
    let mut options = match &args.options {
        Some(path) => GameOptions::load_from_file(path)
            .with_context(|| format!("reading options from {}", path.display()))?,
        None => GameOptions::default(),
    };
    if let Some(name) = &args.name {
        options.name = name.clone();
    }
    if let Some(rooms) = args.rooms {
        anyhow::ensure!(rooms >= 2, "a dungeon needs at least 2 rooms");
        options.rooms = rooms;
    }
    if let Some(extra) = args.extra_tunnels {
        options.extra_tunnels = extra;
    }
    Ok(options)
}

fn start_session<R: BufRead, W: Write>(
    args: &Args,
    options: GameOptions,
    rng: GameRng,
    save_path: &Path,
    term: &mut Terminal<R, W>,
) -> Result<Session> {
    let mut session = Session::new(PlayerRecord::default(), options, rng);

    if !args.new && save_exists(save_path) {
        if let Ok(header) = load_header(save_path) {
            let place = if header.in_dungeon { "in the dungeon" } else { "in the village" };
            term.say(format!(
                "A save of {} waits {place} ({} sigils).",
                header.player_name, header.sigils
            ));
        }
        term.say("Do you want to (L)oad a previous game or (N)ew game?");
        let choice = term.ask("> ").unwrap_or_default().to_lowercase();
        if choice == "l" && restore(&mut session, save_path, term) {
            term.say(format!("Welcome back, {}!", session.player.name));
            return Ok(session);
        }
        if choice == "l" {
            term.say("Starting a new journey...");
        }
    }

    term.divider();
    let name = if session.options.name.is_empty() {
        term.say("What is your name, adventurer?");
        term.ask("> ").filter(|name| !name.is_empty())
    } else {
        Some(session.options.name.clone())
    };
    let name = name.unwrap_or_else(|| "Nameless".to_string());
    session.player = PlayerRecord::from_options(name, &session.options);
    term.say(format!(
        "Welcome, {}. Your fate awaits!\n",
        session.player.name
    ));
    save(&session, save_path, term);
    Ok(session)
}

use anyhow::{Context, Result};
use bevy::prelude::*;
use clap::{Parser, Subcommand};
use memchess::core::settings_persistence::ensure_settings_file;
use memchess::core::{init_tracing, load_settings, settings_path, SessionSettings};
use memchess::game::{GameSession, SessionNotice, SessionPlugin};
use memchess::networking::SessionLink;
use shared::WireEvent;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "memchess", version, about = "Memory chess client session tools")]
struct Cli {
    /// Settings file to use instead of the per-user one
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a JSON-lines transcript of server frames through a headless session
    Replay {
        transcript: PathBuf,

        /// Socket id of the local player
        #[arg(long, default_value = "local")]
        player: String,

        /// Session ticks to run after each frame
        #[arg(long, default_value_t = 0)]
        ticks: u32,
    },
    /// Show where settings live and what is in effect
    Settings {
        /// Write the defaults if no file exists yet
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    init_tracing("info")?;
    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref());

    match cli.command {
        Command::Replay {
            transcript,
            player,
            ticks,
        } => replay(&transcript, &player, ticks, settings),
        Command::Settings { init } => show_settings(cli.settings, init, &settings),
    }
}

fn read_transcript(path: &Path) -> Result<Vec<WireEvent>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(|(n, line)| {
            serde_json::from_str::<WireEvent>(line)
                .with_context(|| format!("{}:{}: not a frame", path.display(), n + 1))
        })
        .collect()
}

fn replay(path: &Path, player: &str, ticks: u32, settings: SessionSettings) -> Result<()> {
    let frames = read_transcript(path)?;
    info!("[REPLAY] {} frames from {}", frames.len(), path.display());

    let (link, remote) = SessionLink::pair();
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SessionPlugin::new(player, settings))
        .insert_resource(link)
        .add_systems(Update, log_notices);

    for frame in frames {
        println!("<< {}", serde_json::to_string(&frame)?);
        remote.push(frame)?;
        app.update();
        for _ in 0..ticks {
            app.world_mut().resource_mut::<GameSession>().tick();
        }
        if ticks > 0 {
            app.update();
        }
        for sent in remote.drain_sent() {
            println!(">> {}", serde_json::to_string(&sent)?);
        }
    }

    let session = app.world().resource::<GameSession>();
    println!("phase: {}", session.phase());
    println!("fen:   {}", session.position().fen());
    if let Some(outcome) = session.outcome() {
        println!("result: {}", outcome.message());
    }
    println!("history ({} entries, newest first):", session.history().len());
    for entry in session.history().newest_first() {
        println!("  {}", entry.summary());
    }
    for line in session.chat().lines() {
        println!("chat <{}> {}", line.author, line.text);
    }
    Ok(())
}

fn log_notices(mut notices: MessageReader<SessionNotice>) {
    for notice in notices.read() {
        info!("[REPLAY] {:?}", notice);
    }
}

fn show_settings(path: Option<PathBuf>, init: bool, settings: &SessionSettings) -> Result<()> {
    let path = path.unwrap_or_else(settings_path);
    if init && ensure_settings_file(&path)? {
        println!("wrote defaults to {}", path.display());
    }
    println!("settings file: {}", path.display());
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

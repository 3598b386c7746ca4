// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::process;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use encore::audio::{AudioPlayer, ClipPlayer, TimerPlayer};
use encore::config::SettingsFile;
use encore::console::{self, keys::format_key, KeyMap};
use encore::library;
use encore::matching::AcceptanceMode;
use encore::session::ContestantCount;

fn print_usage() {
    println!("ENCORE - Name That Tune for the terminal");
    println!();
    println!("Usage: encore <GAME_FILE> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --mode <MODE>        Acceptance mode: strict, inclusive, loose");
    println!("  --contestants <N>    Number of contestants (1-3)");
    println!("  --settings <FILE>    Load settings from a YAML file");
    println!("  --shuffle            Shuffle the play order");
    println!("  --timer-audio        Keep time without playing sound");
    println!("  --check              Validate the game file and exit");
    println!("  --keys               Show key bindings and exit");
    println!("  --help               Show this help message");
}

#[derive(Debug, Default)]
struct Options {
    game_file: Option<String>,
    mode: Option<AcceptanceMode>,
    contestants: Option<ContestantCount>,
    settings: Option<String>,
    shuffle: bool,
    timer_audio: bool,
    check: bool,
    show_keys: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--mode" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--mode requires a value"))?;
                options.mode = Some(value.parse().map_err(|e: String| anyhow!(e))?);
            }
            "--contestants" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--contestants requires a value"))?;
                options.contestants = Some(value.parse().map_err(|e: String| anyhow!(e))?);
            }
            "--settings" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--settings requires a file path"))?;
                options.settings = Some(value.clone());
            }
            "--shuffle" => options.shuffle = true,
            "--timer-audio" => options.timer_audio = true,
            "--check" => options.check = true,
            "--keys" => options.show_keys = true,
            other if other.starts_with("--") => {
                return Err(anyhow!("Unknown option: {}", other));
            }
            _ => {
                if options.game_file.is_some() {
                    return Err(anyhow!("Unexpected argument: {}", arg));
                }
                options.game_file = Some(arg.clone());
            }
        }
    }
    Ok(options)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }
    if args.is_empty() {
        println!("ENCORE - Name That Tune for the terminal");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {}", err);
            print_usage();
            process::exit(1);
        }
    };

    let settings = match &options.settings {
        Some(path) => SettingsFile::load(path)?,
        None => SettingsFile::default(),
    };
    let mode = options.mode.unwrap_or(settings.game.mode);
    let contestants = match options.contestants {
        Some(count) => count,
        None => ContestantCount::try_from(settings.game.contestants)
            .map_err(|e| anyhow!(e))?,
    };
    let shuffle = options.shuffle || settings.game.shuffle;
    let keys = KeyMap::from_settings(&settings.keys).map_err(|e| anyhow!(e))?;

    if options.show_keys {
        for (slot, key) in keys.buzzers.iter().enumerate() {
            println!("Buzzer {}: {}", slot + 1, format_key(*key));
        }
        println!("Pass: {}", format_key(keys.pass));
        println!("Cancel: Esc");
        return Ok(());
    }

    let game_file = options
        .game_file
        .ok_or_else(|| anyhow!("No game file given; run with --help for usage"))?;
    let loaded = library::load_game(&game_file)?;

    for (title, clip) in &loaded.missing {
        eprintln!("Warning: clip missing for {:?}: {}", title, clip.display());
    }
    println!(
        "{} song{} loaded from {}{}",
        loaded.game.len(),
        if loaded.game.len() == 1 { "" } else { "s" },
        game_file,
        if loaded.missing.is_empty() {
            String::new()
        } else {
            format!(" ({} skipped)", loaded.missing.len())
        }
    );

    if options.check {
        if loaded.missing.is_empty() {
            println!("Game file OK");
            return Ok(());
        }
        eprintln!("{} song(s) have missing clips", loaded.missing.len());
        process::exit(1);
    }

    let mut game = loaded.game;
    if game.is_empty() {
        return Err(anyhow!("No playable songs in {}", game_file));
    }
    if shuffle {
        game.shuffle();
    }

    let mut player: Box<dyn AudioPlayer> = if options.timer_audio {
        Box::new(TimerPlayer::new())
    } else {
        match ClipPlayer::new() {
            Ok(player) => Box::new(player),
            Err(err) => {
                eprintln!("Audio unavailable ({}); running in timer mode", err);
                Box::new(TimerPlayer::new())
            }
        }
    };

    console::play(game, mode, contestants, keys, player.as_mut())
}

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for ENCORE
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Normalization throughput
//! - Matcher cost per guess across the acceptance modes
//! - Game-file parsing

use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use encore::library::{self, Game, Song};
use encore::matching::{matches, normalize, AcceptanceMode};

fn sample_song() -> Song {
    Song::new(
        vec!["(Sittin' On) The Dock of the Bay".to_string()],
        "Otis Redding".to_string(),
        "Soul, 1968".to_string(),
        PathBuf::from("dock.wav"),
        1234.5,
        30_000,
    )
}

/// Benchmark text normalization on titles of varying length
fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let inputs = [
        ("short", "Hey Jude!"),
        ("typical", "(Sittin' On) The Dock of the Bay"),
        (
            "long",
            "The Continuing Story of Bungalow Bill (Remastered 2009 Special Edition)",
        ),
    ];
    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| normalize(black_box(input)))
        });
    }
    group.finish();
}

/// Benchmark a graded guess under each acceptance mode
fn bench_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher");
    let song = sample_song();
    let guess = "i think that was the dock of the bay";

    for mode in AcceptanceMode::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(mode.name()),
            &mode,
            |b, &mode| b.iter(|| matches(black_box(&song), black_box(guess), mode)),
        );
    }
    group.finish();
}

/// Benchmark parsing a game file from its text form
fn bench_parse_game(c: &mut Criterion) {
    let mut game = Game::new();
    for i in 0..50 {
        game.push(Song::new(
            vec![format!("Song Number {}", i)],
            "Various Artists".to_string(),
            "No hint".to_string(),
            PathBuf::from(format!("clips/song_{}.wav", i)),
            1500.0,
            30_000,
        ));
    }
    let contents: String = game
        .songs()
        .iter()
        .map(|song| format!("{}\n", library::format_record(song)))
        .collect();

    c.bench_function("parse_game_50_songs", |b| {
        b.iter(|| library::parse_game(black_box(&contents)).unwrap())
    });
}

criterion_group!(benches, bench_normalize, bench_matcher, bench_parse_game);
criterion_main!(benches);

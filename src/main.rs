mod input;
mod ui;

use castline::core::constants::TICK_INTERVAL_MS;
use castline::{Equipment, FishingConfig, Player, SessionEvent, SessionOrchestrator};
use crossterm::event::{self, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use input::{map_key, InputState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::VecDeque;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Messages kept for the log panel.
const MAX_LOG_MESSAGES: usize = 50;

struct CliArgs {
    config: Option<PathBuf>,
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);

    init_logging()?;

    let config = match &cli.config {
        Some(path) => FishingConfig::load(path).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        None => FishingConfig::default(),
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut orchestrator =
        SessionOrchestrator::in_memory(config).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let events = orchestrator.subscribe();
    orchestrator
        .start_fishing(Player::new(1, "Angler", 10.0, Equipment::default()), &mut rng)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    info!(seed = ?cli.seed, "fishing session started");

    let mut messages: VecDeque<String> = VecDeque::new();
    push_message(&mut messages, "You cast your line into the water.".to_string());
    let mut input = InputState::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut last_tick = Instant::now();

    while !input.quit {
        terminal.draw(|frame| {
            ui::draw_ui(frame, &orchestrator, &messages, input.is_pulling());
        })?;

        // Poll for input (50ms non-blocking)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key_event) = event::read()? {
                input.process(map_key(key_event.code), &mut orchestrator, &mut rng);
            }
        }

        // Game tick every 100ms
        if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
            let dt = last_tick.elapsed().as_secs_f64();
            last_tick = Instant::now();

            input.tick(&mut orchestrator);
            if let Some(outcome) = orchestrator.tick(dt, &mut rng) {
                if let Some(rewards) = outcome.rewards {
                    push_message(
                        &mut messages,
                        format!(
                            "  +{:.2} strength, +{} XP, +{} coins",
                            rewards.strength, rewards.experience, rewards.coins
                        ),
                    );
                }
            }

            for event in events.try_iter() {
                let text = match event {
                    SessionEvent::FishBite(_) => "The float dips!".to_string(),
                    SessionEvent::FishingComplete { result, fish } => {
                        format!("{} ({}, {:.2}kg)", result.message(), fish.species(), fish.weight())
                    }
                    SessionEvent::StateChanged(_) => continue,
                };
                push_message(&mut messages, text);
            }
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    if let Ok(player) = orchestrator.stop_fishing() {
        let stats = orchestrator.stats();
        println!(
            "Landed {} of {} fish. Strength {:.2}, {} XP, {} coins.",
            stats.count(castline::FishingResult::Success),
            stats.encounters(),
            player.strength(),
            player.experience(),
            player.coins()
        );
    }
    println!("Tight lines!");

    Ok(())
}

fn push_message(messages: &mut VecDeque<String>, message: String) {
    messages.push_back(message);
    while messages.len() > MAX_LOG_MESSAGES {
        messages.pop_front();
    }
}

/// Logs go to a file so they never tear the alternate screen.
fn init_logging() -> io::Result<()> {
    let path = std::env::temp_dir().join("castline.log");
    let file = File::create(&path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "castline=info".into()))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs {
        config: None,
        seed: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    cli.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    cli.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--version" | "-v" => {
                println!("castline {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'castline --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn print_help() {
    println!("Castline - Terminal Fishing\n");
    println!("Usage: castline [OPTIONS]\n");
    println!("Options:");
    println!("  -c, --config <PATH>  Load fishing tuning from a JSON file");
    println!("  -s, --seed <N>       Seed the RNG for a reproducible session");
    println!("  -v, --version        Show version information");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Keys:");
    println!("  Space        Strike when the float dips");
    println!("  Up / Enter   Reel in (hold to keep reeling)");
    println!("  R            Release the line");
    println!("  Q / Esc      Quit");
}

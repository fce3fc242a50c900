//! Command-line front end for the Stonetrack core.
//!
//! # Responsibility
//! - Seed a fresh store, apply one command through the binder, print state.
//! - Exercise the same provider/binder path a UI shell would use.
//!
//! State is not persisted; every run starts from generated history.

use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::process::ExitCode;
use stonetrack_core::{
    init_logging, month_view, parse_log_date, provide, seeded_state, use_movement, AppConfig,
    Clock, DomainStore, MovementBinder, ProfileStats, QuestBoard, SeedConfig, SystemClock,
    SKILL_LEVEL_MAX,
};

#[derive(Parser, Debug)]
#[command(name = "stonetrack", version, about = "Movement training stones tracker")]
struct Cli {
    /// Seed for the generated history (overrides STONETRACK_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show today's stones
    Today,
    /// Toggle a stone on a date (default: today)
    Toggle {
        stone: String,
        #[arg(long, value_parser = parse_log_date)]
        date: Option<NaiveDate>,
    },
    /// Attach a note to a day that already has a log
    Note {
        #[arg(value_parser = parse_log_date)]
        date: NaiveDate,
        text: String,
    },
    /// Set quest progress (0-100; other values are stored as given)
    Progress {
        quest: String,
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Activate or deactivate a quest
    Activate { quest: String },
    /// Show profile statistics
    Stats,
    /// Show one month of training (default: current month)
    Calendar {
        /// Month as YYYY-MM
        #[arg(long, value_parser = parse_month)]
        month: Option<(i32, u32)>,
    },
    /// List quests by state
    Quests,
    /// Show skill levels grouped by category
    Skills,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("stonetrack: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, &dir.to_string_lossy())?;
    }

    let today = SystemClock.today();
    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let initial = seeded_state(today, &SeedConfig::default(), &mut rng);
    let binder = MovementBinder::new(DomainStore::new(initial));
    info!(
        "event=cli_start module=cli status=ok command={:?} seeded={}",
        cli.command,
        cli.seed.or(config.seed).is_some()
    );

    let json_output = cli.json;
    let command = cli.command.unwrap_or(Command::Today);
    let (outcome, _binder) = provide(binder, || execute(command, json_output));
    outcome
}

fn execute(command: Command, json_output: bool) -> Result<(), String> {
    match command {
        Command::Today => use_movement(|binder| print_today(binder, json_output)),
        Command::Toggle { stone, date } => use_movement(|binder| {
            if binder.stones().iter().any(|known| known.id == stone) {
                let log = binder.toggle_stone(&stone, date);
                println!(
                    "{} {} on {}",
                    stone,
                    if log.is_completed(&stone) { "completed" } else { "cleared" },
                    log.date
                );
            } else {
                return Err(format!("unknown stone `{stone}`"));
            }
            print_today(binder, json_output)
        }),
        Command::Note { date, text } => use_movement(|binder| {
            match binder.add_training_note(date, &text) {
                Some(log) => {
                    println!("note saved for {}", log.date);
                    Ok(())
                }
                None => Err(format!(
                    "no training log for {date}; toggle a stone on that day first"
                )),
            }
        }),
        Command::Progress { quest, value } => use_movement(|binder| {
            match binder.update_quest_progress(&quest, value) {
                Some(updated) => {
                    println!(
                        "{}: {}%{}",
                        updated.name,
                        updated.progress(),
                        if updated.is_completed() { " (complete)" } else { "" }
                    );
                    Ok(())
                }
                None => Err(format!("unknown quest `{quest}`")),
            }
        }),
        Command::Activate { quest } => use_movement(|binder| {
            let active = binder.toggle_active_quest(&quest);
            println!(
                "{quest} {}",
                if active { "activated" } else { "deactivated" }
            );
            Ok(())
        }),
        Command::Stats => use_movement(|binder| {
            let stats = ProfileStats::from_snapshot(binder.snapshot());
            if json_output {
                return print_json(&stats);
            }
            println!("sessions: {}", stats.total_sessions);
            println!("streak:   {} day(s)", stats.current_streak);
            if let Some(date) = stats.most_recent_session {
                println!("latest:   {date}");
            }
            println!(
                "today:    {}/{} ({}%)",
                stats.today.completed, stats.today.total, stats.today.percent
            );
            println!("top stones:");
            for stone in &stats.top_stones {
                println!("  {:<13} {:>3} ({}%)", stone.name, stone.count, stone.percent);
            }
            println!("categories:");
            for category in &stats.categories {
                println!("  {:<13} {:>3}", category.category.as_str(), category.count);
            }
            Ok(())
        }),
        Command::Calendar { month } => use_movement(|binder| {
            let (year, month) = month.unwrap_or_else(|| {
                let today = binder.today_log().date;
                (today.year(), today.month())
            });
            let snapshot = binder.snapshot();
            let view = month_view(year, month, &snapshot.training_logs, &snapshot.stones)
                .ok_or_else(|| format!("invalid month {year}-{month:02}"))?;
            if json_output {
                let days: Vec<_> = view
                    .iter()
                    .flatten()
                    .map(|day| {
                        json!({
                            "date": day.date,
                            "completed": day.completion.completed,
                            "percent": day.completion.percent,
                            "note": day.log.and_then(|log| log.note()),
                        })
                    })
                    .collect();
                return print_json(&days);
            }
            println!("{year}-{month:02}");
            println!("  S  M  T  W  T  F  S");
            for week in view.chunks(7) {
                let line: String = week
                    .iter()
                    .map(|cell| match cell {
                        Some(day) if day.completion.completed > 0 => {
                            format!("{:>2}{}", day.date.day(), day.completion.completed)
                        }
                        Some(day) => format!("{:>2} ", day.date.day()),
                        None => "   ".to_string(),
                    })
                    .collect();
                println!("{}", line.trim_end());
            }
            Ok(())
        }),
        Command::Quests => use_movement(|binder| {
            let board = QuestBoard::partition(binder.quests(), binder.current_user());
            if json_output {
                return print_json(&json!({
                    "active": board.active,
                    "other": board.other,
                    "completed": board.completed,
                }));
            }
            for (title, quests) in [
                ("active", &board.active),
                ("other", &board.other),
                ("completed", &board.completed),
            ] {
                println!("{title}:");
                for quest in quests {
                    println!("  [{:>3}%] {} ({})", quest.progress(), quest.name, quest.id);
                }
            }
            Ok(())
        }),
        Command::Skills => use_movement(|binder| {
            let grouped = binder.current_user().skills_by_category();
            if json_output {
                return print_json(&grouped);
            }
            for (category, skills) in &grouped {
                println!("{}:", category.as_str());
                for skill in skills {
                    println!(
                        "  {:<20} {}/{}  {}",
                        skill.name,
                        skill.level(),
                        SKILL_LEVEL_MAX,
                        skill.description
                    );
                }
            }
            Ok(())
        }),
    }
}

fn print_today(binder: &MovementBinder, json_output: bool) -> Result<(), String> {
    let log = binder.today_log();
    if json_output {
        return print_json(log);
    }
    println!("{}", log.date);
    for stone in binder.stones() {
        let mark = if log.is_completed(&stone.id) { "x" } else { " " };
        println!("  [{mark}] {} {}", stone.icon, stone.name);
    }
    if let Some(note) = log.note() {
        println!("  note: {note}");
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    println!("{text}");
    Ok(())
}

fn parse_month(value: &str) -> Result<(i32, u32), String> {
    let first = format!("{}-01", value.trim());
    let date = NaiveDate::parse_from_str(&first, "%Y-%m-%d")
        .map_err(|_| format!("invalid month `{value}`; expected YYYY-MM"))?;
    Ok((date.year(), date.month()))
}

//! # Seed Data Generator
//!
//! Populates the database with sample journal entries for development.
//!
//! ## Usage
//! ```bash
//! # One entry per day for the last 30 days (default)
//! cargo run -p wellnest-db --bin seed
//!
//! # Custom window
//! cargo run -p wellnest-db --bin seed -- --days 365
//!
//! # Specify database path
//! cargo run -p wellnest-db --bin seed -- --db ./data/wellnest.db
//! ```
//!
//! ## Generated Entries
//! One entry per day ending today. Moods follow a slow weekly wave so the
//! insights charts have something to draw; every fourth day carries a note.

use std::env;
use std::sync::Arc;

use chrono::{Days, Utc};
use wellnest_core::NewJournalEntry;
use wellnest_db::{DatabaseManager, DbConfig, JournalRepository, SqliteJournalRepository};

const NOTES: &[&str] = &[
    "Slept badly, long day at work",
    "Went for a run before breakfast",
    "Quiet evening, read a book",
    "Headache in the afternoon",
    "Dinner with friends",
    "Rainy, stayed inside",
    "Felt productive",
];

/// Mood pattern over a week, repeated.
const MOOD_WAVE: &[i64] = &[3, 3, 4, 5, 4, 2, 3];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut days: u64 = 30;
    let mut db_path = String::from("./wellnest_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(30);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Wellnest Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --days <N>     Number of days to fill, ending today (default: 30)");
                println!("  -d, --db <PATH>    Database file path (default: ./wellnest_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Wellnest Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!("Days:     {}", days);
    println!();

    let db = Arc::new(DatabaseManager::new(DbConfig::new(&db_path)));
    db.setup_database().await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let journal = SqliteJournalRepository::new(Arc::clone(&db));

    let existing = journal.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} entries", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating entries...");

    let today = Utc::now().date_naive();
    let start = std::time::Instant::now();
    let mut generated = 0;

    for offset in (0..days).rev() {
        let Some(day) = today.checked_sub_days(Days::new(offset)) else {
            continue;
        };
        let index = offset as usize;

        let mut entry = NewJournalEntry::new(day, MOOD_WAVE[index % MOOD_WAVE.len()]);
        if index % 4 == 0 {
            entry = entry.with_note(NOTES[index % NOTES.len()]);
        }

        if let Err(e) = journal.add_entry(entry).await {
            eprintln!("Failed to insert entry for {}: {}", day, e);
            continue;
        }
        generated += 1;
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} entries in {:?}", generated, elapsed);

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

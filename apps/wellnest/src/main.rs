//! # Wellnest Entry Point
//!
//! Headless startup: brings the container up, prints what it found, and
//! shuts down. The mobile shell links the library instead.
//!
//! ## Usage
//! ```bash
//! cargo run -p wellnest-app
//! cargo run -p wellnest-app -- --config ./wellnest.toml
//! cargo run -p wellnest-app -- --reset      # wipe and re-create the journal
//! ```

use std::env;
use std::path::PathBuf;

use wellnest_app::ServiceContainer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--reset" => reset = true,
            "--help" | "-h" => {
                println!("Usage: wellnest [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("      --reset          Delete all journal data and re-create the database");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let container = wellnest_app::run(config_path).await?;
    let db = container.database_manager();

    if reset {
        db.reset_database().await?;
        println!("✓ Database reset");
    }

    println!("Database: {}", container.config().database_path.display());
    println!("Status:   {:?}", db.status());

    match container.journal_repository().await {
        Ok(journal) => println!("Entries:  {}", journal.count().await?),
        Err(e) => println!("Entries:  unavailable ({})", e),
    }

    container.shutdown().await;
    Ok(())
}

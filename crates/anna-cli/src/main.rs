// A.N.N.A command line: an interactive chat REPL plus one-shot subcommands
// over the same engine and store the voice front ends use.

use anna_core::{AiEngine, Config, EngineResult, MemoryStore, Mood};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anna", version, about = "A.N.N.A — Türkçe kişisel asistan")]
struct Cli {
    /// Where the database and personality sidecar live
    #[arg(long, global = true, env = "ANNA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat (default)
    Chat,
    /// Ask one question and exit
    Ask {
        /// The utterance, remaining words are joined
        text: Vec<String>,
    },
    /// List saved notes
    Notes {
        /// Only notes in this category
        #[arg(long)]
        category: Option<String>,
        /// Delete the note with this id instead of listing
        #[arg(long)]
        delete: Option<i64>,
    },
    /// Show recent conversations
    History {
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Keyword search instead of the recent window
        #[arg(long)]
        search: Option<String>,
    },
    /// Usage statistics
    Stats {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Delete conversation history, all of it or only the last N days
    ClearHistory {
        #[arg(long)]
        days: Option<u32>,
    },
    /// Change the assistant's mood (professional, playful, sarcastic)
    SetMood { mood: String },
}

#[tokio::main]
async fn main() -> EngineResult<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => chat(&config).await?,
        Command::Ask { text } => {
            let mut engine = AiEngine::bootstrap(&config).await?;
            println!("{}", engine.respond(&text.join(" ")).await);
        }
        Command::Notes { category, delete } => {
            let store = MemoryStore::open(config.db_path())?;
            if let Some(id) = delete {
                if store.delete_note(id)? {
                    println!("Not silindi (ID: {id}).");
                } else {
                    println!("Böyle bir not yok (ID: {id}).");
                }
                return Ok(());
            }
            let notes = store.get_notes(category.as_deref())?;
            if notes.is_empty() {
                println!("Hiç not yok.");
            }
            for note in notes {
                println!("[{}] {} ({}): {}", note.id, note.title, note.category, note.content);
            }
        }
        Command::History { limit, search } => {
            let store = MemoryStore::open(config.db_path())?;
            let records = match search {
                Some(keyword) => store.search_conversations(&keyword)?,
                None => store.recent_conversations(limit as usize)?,
            };
            for record in records {
                println!("[{}] Sen: {}", record.timestamp, record.user_input);
                println!("        A.N.N.A: {}", record.assistant_response);
            }
        }
        Command::Stats { days } => {
            let store = MemoryStore::open(config.db_path())?;
            let stats = store.usage_stats(days)?;
            println!("Toplam konuşma: {}", stats.total_conversations);
            println!("Son {days} gün: {}", stats.recent_count);
            match stats.peak_hour {
                Some(hour) => println!("En yoğun saat: {hour:02}:00"),
                None => println!("En yoğun saat: veri yok"),
            }
        }
        Command::ClearHistory { days } => {
            let store = MemoryStore::open(config.db_path())?;
            let deleted = store.clear_history(days)?;
            println!("{deleted} konuşma silindi.");
        }
        Command::SetMood { mood } => {
            let store = MemoryStore::open(config.db_path())?;
            match Mood::parse(&mood) {
                Some(mood) => {
                    store.set_profile("mood", mood.as_str())?;
                    println!("Ruh hali {} olarak değiştirildi.", mood.as_str());
                }
                None => {
                    println!("Geçersiz ruh hali. Seçenekler: professional, playful, sarcastic")
                }
            }
        }
    }
    Ok(())
}

async fn chat(config: &Config) -> EngineResult<()> {
    let mut engine = AiEngine::bootstrap(config).await?;
    println!("{}", engine.greet());
    println!("(çıkmak için: çık)");

    let stdin = std::io::stdin();
    loop {
        print!("siz> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line.to_lowercase().as_str(), "çık" | "exit" | "quit") {
            break;
        }

        println!("A.N.N.A: {}", engine.respond(line).await);
    }

    println!("{}", engine.farewell());
    Ok(())
}

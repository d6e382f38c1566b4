use std::path::PathBuf;

use lookup::{ApiKeys, Lookup};
use tracing_subscriber::EnvFilter;

use crate::dashboard::{Dashboard, DashboardState};
use crate::output_log::OutputLog;
use crate::title_index::TitleIndex;
use crate::utilities::input;

mod dashboard;
mod output_log;
mod render;
mod title_index;
mod utilities;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let keys = ApiKeys {
        words_api: std::env::var("WORDS_API_KEY").unwrap_or_default(),
        collegiate: std::env::var("MERRIAM_WEBSTER_KEY").unwrap_or_default(),
        britannica: std::env::var("EB_API_KEY")
            .map(|key| key.trim().to_string())
            .unwrap_or_default(),
    };
    let articles_path = env_path("CHESTER_ARTICLES", "var/articles.json");
    let log_path = env_path("CHESTER_LOG", "var/chester_debug.log");

    let titles = TitleIndex::load(&articles_path);
    let log = OutputLog::new(log_path, output_log::DEFAULT_CAPACITY);
    let mut dashboard = Dashboard::new(Lookup::new(keys), titles, log);

    loop {
        let line = input(">> ")?;
        let line = line.trim();
        let mut command_parts = line.split_ascii_whitespace();
        if let Some(command) = command_parts.next() {
            match command {
                "exit" | "leave" | "quit" | "e" | "q" => {
                    break;
                }
                "define" | "find" => {
                    let word = command_parts.collect::<Vec<&str>>().join(" ");
                    if word.is_empty() {
                        println!("Nothing to look up.");
                    } else {
                        dashboard.submit_word(&word).await;
                    }
                }
                "articles" => {
                    let query = command_parts.collect::<Vec<&str>>().join(" ");
                    dashboard.search_titles(&query);
                    dashboard.print_matches();
                }
                "open" => match command_parts.next().map(str::parse::<usize>) {
                    Some(Ok(position)) if dashboard.state() != DashboardState::Idle => {
                        dashboard.select_article(position).await;
                    }
                    Some(Ok(_)) => {
                        println!("Nothing to open yet, look up a word first.");
                    }
                    _ => {
                        println!("Usage: open <number>.");
                    }
                },
                "log" => {
                    dashboard.print_log();
                }
                _ => {
                    println!("Unknown command {command}.");
                }
            }
        }
    }
    Ok(())
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

mod client;
mod config;
mod history;
mod models;
mod queries;
mod tui;

use anyhow::Result;
use clap::Parser;
use client::GithubClient;
use config::AppConfig;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use history::RecentSearches;
use queries::UserQueries;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{env, io, time::Duration};
use tui::{
    app::App,
    event::{Event, EventHandler},
    ui,
};

const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the GitHub REST API
    #[arg(long, env("GITHUB_API_URL"))]
    api_url: Option<String>,

    /// Fetch one profile, print it, and exit instead of starting the TUI
    #[arg(long)]
    user: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let config = AppConfig::load().unwrap_or_default();

    // Setup logging
    let file_appender = tracing_appender::rolling::daily("logs", "github-user-tui.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Priority: CLI flags > env vars > config.toml > default
    let api_url = args
        .api_url
        .or_else(|| env::var("GITHUB_API_URL").ok())
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let client = GithubClient::new(
        api_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let mut queries = UserQueries::new(client);

    if let Some(username) = args.user {
        return run_one_shot(&mut queries, &username).await;
    }

    let history_path = history::default_history_path();
    let recent = RecentSearches::load(&history_path);
    let mut app = App::new(queries, config, recent, history_path);

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut event_handler = EventHandler::new(Duration::from_millis(100));

    // Main Loop
    loop {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if let Some(event) = event_handler.next().await {
            match event {
                Event::Key(key) => app.handle_key(key).await,
                Event::Tick => app.tick().await,
            }
        }

        if app.should_quit {
            break;
        }
    }

    event_handler.stop();

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

async fn run_one_shot(queries: &mut UserQueries, username: &str) -> Result<()> {
    let profile = queries.fetch_profile(username).await?;

    println!("{} (@{})", profile.display_name(), profile.login);
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
        println!("{}", bio);
    }
    println!(
        "Repos: {}  Followers: {}  Following: {}",
        profile.public_repos, profile.followers, profile.following
    );
    println!("Avatar:  {}", profile.avatar_url);
    println!("Profile: {}", profile.html_url);

    Ok(())
}

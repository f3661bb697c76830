mod config;
mod game;
mod hint;
mod models;
mod utils;
mod wiki;

use std::io::Write;

use anyhow::{Context, Result};
use config::Config;
use crossterm::style::Stylize;
use game::{render, GameSession, Grid, GuessOutcome, PlacementEngine, PlayerInput};
use hint::HintGenerator;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wiki::WikiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordopedia=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded ({:?})", config.game.difficulty);

    // Create shared HTTP client for reusing connections
    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let wiki = WikiClient::new(http_client.clone(), &config.wiki);
    let hints = HintGenerator::new(http_client, config.hint.clone());

    println!("Welcome to WORD-O-PEDIA!\n");

    let links = wiki
        .fetch_links(&config.wiki.source_page)
        .await
        .with_context(|| format!("Failed to fetch links from '{}'", config.wiki.source_page))?;
    let words = wiki::select_game_words(&links, config.game.difficulty);
    tracing::info!("Selected {} words", words.len());

    let mut session = build_session(&config, &words)?;
    tracing::debug!("Hidden words: {:?}", session.index().words());

    play(&mut session, &words, &wiki, &hints).await
}

/// Generate the grid and place the selected words on it
fn build_session(config: &Config, words: &[String]) -> Result<GameSession> {
    let mut rng = rand::rng();
    let mut grid = Grid::new(config.game.difficulty.grid_size())?;
    let engine = PlacementEngine::new(
        config.game.placement_attempts,
        config.game.orientations.clone(),
    );

    tracing::debug!(
        "Placing {} words ({} attempts each, {:?})",
        words.len(),
        engine.max_attempts(),
        engine.orientations()
    );

    let report = engine.place_words(&mut grid, words, &mut rng);
    if report.index.is_empty() {
        anyhow::bail!("None of the {} selected words could be placed", words.len());
    }
    if !report.failures.is_empty() {
        tracing::warn!(
            "Placed {} of {} words",
            report.index.len(),
            words.len()
        );
    }

    tracing::debug!("Puzzle layout:\n{}", render::render_plain(&grid));

    if config.game.fill_blanks {
        tracing::debug!("Filling {} blank cells", grid.placeholder_count());
        grid.fill_placeholders(&mut rng);
    }

    Ok(GameSession::new(grid, report.index))
}

async fn play(
    session: &mut GameSession,
    titles: &[String],
    wiki: &WikiClient,
    hints: &HintGenerator,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while !session.is_complete() {
        println!("\n{}\n", render::render_grid(session.grid()));
        print!(
            "Found {}/{}. Guess a word ('hint' for a hint, 'quit' to stop): ",
            session.found_count(),
            session.total()
        );
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = match session.interpret(&line) {
            PlayerInput::Empty => continue,
            PlayerInput::Quit => break,
            PlayerInput::Hint => {
                show_hint(session, titles, wiki, hints).await;
                continue;
            }
            PlayerInput::Guess(input) => input,
        };

        match session.guess(&input)? {
            GuessOutcome::Found { word, color } => {
                println!("\nYou found {}!", word.as_str().with(color).bold())
            }
            GuessOutcome::AlreadyFound(word) => println!("\nYou already found {}.", word),
            GuessOutcome::NotInPuzzle(word) => println!("\n{} is not in the puzzle.", word),
        }
    }

    println!("\n{}\n", render::render_grid(session.grid()));
    if session.is_complete() {
        println!("Congratulations, you found all {} words!", session.total());
    } else {
        println!(
            "You found {} of {} words. Remaining: {}",
            session.found_count(),
            session.total(),
            session.remaining().join(", ")
        );
    }

    Ok(())
}

async fn show_hint(
    session: &GameSession,
    titles: &[String],
    wiki: &WikiClient,
    hints: &HintGenerator,
) {
    let Some(word) = session.next_hint_target() else {
        return;
    };
    // Page titles are case-sensitive, so look up the title as it was linked
    let title = titles
        .iter()
        .find(|title| title.to_uppercase() == word)
        .map_or(word, String::as_str);

    let summary = match wiki.fetch_summary(title).await {
        Ok(Some(summary)) => summary,
        Ok(None) => {
            println!("\nSorry, no information found for the word: {}", word);
            return;
        }
        Err(e) => {
            tracing::warn!("Failed to fetch summary for {}: {:#}", word, e);
            println!("\nAn error occurred while generating the hint: {}", e);
            return;
        }
    };

    match hints.generate(word, &summary).await {
        Ok(hint) => println!("\nHint:\n{}", hint.text),
        Err(e) => println!("\nAn error occurred while generating the hint: {}", e),
    }
}

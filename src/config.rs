use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::env;

use crate::{
    game::placement::DEFAULT_MAX_ATTEMPTS,
    models::{Difficulty, Orientation},
};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub wiki: WikiConfig,
    pub hint: HintConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiConfig {
    pub language: String,
    pub user_agent: String,
    pub source_page: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HintConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub placement_attempts: usize,
    pub orientations: Vec<Orientation>,
    pub fill_blanks: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let wiki = WikiConfig {
            language: env::var("WIKI_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
            user_agent: env::var("WIKI_USER_AGENT")
                .unwrap_or_else(|_| "word-o-pedia/v1".to_string()),
            source_page: env::var("WIKI_SOURCE_PAGE")
                .unwrap_or_else(|_| "Nelson Mandela".to_string()),
        };

        let hint = HintConfig {
            api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
        };

        let game = GameConfig {
            difficulty: env::var("DIFFICULTY")
                .unwrap_or_else(|_| "medium".to_string())
                .parse()
                .map_err(|e: String| anyhow!(e))
                .context("DIFFICULTY must be easy, medium or hard")?,
            placement_attempts: env::var("PLACEMENT_ATTEMPTS")
                .unwrap_or_else(|_| DEFAULT_MAX_ATTEMPTS.to_string())
                .parse()
                .context("PLACEMENT_ATTEMPTS must be a number")?,
            orientations: parse_orientations(
                &env::var("WORD_ORIENTATIONS")
                    .unwrap_or_else(|_| "horizontal,vertical".to_string()),
            )
            .context("WORD_ORIENTATIONS must list horizontal and/or vertical")?,
            fill_blanks: env::var("FILL_BLANKS")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .context("FILL_BLANKS must be true or false")?,
        };

        Ok(Config { wiki, hint, game })
    }
}

impl WikiConfig {
    pub fn api_url(&self) -> String {
        format!("https://{}.wikipedia.org/w/api.php", self.language)
    }
}

/// Parse a comma-separated orientation list, dropping duplicates
pub fn parse_orientations(value: &str) -> Result<Vec<Orientation>> {
    let mut orientations = Vec::new();
    for part in value.split(',').filter(|part| !part.trim().is_empty()) {
        let orientation: Orientation = part.parse().map_err(|e: String| anyhow!(e))?;
        if !orientations.contains(&orientation) {
            orientations.push(orientation);
        }
    }

    if orientations.is_empty() {
        anyhow::bail!("no orientations given");
    }
    Ok(orientations)
}

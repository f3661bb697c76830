use std::collections::HashSet;

use crossterm::style::Color;

use crate::game::{
    grid::Grid,
    placement::{PlacementError, WordIndex},
};

/// Highlight colours handed out to found words, in order
pub const HIGHLIGHT_PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

/// Replies that ask for a hint
const HINT_COMMANDS: [&str; 4] = ["hint", "h", "?", "help"];
/// Replies that end the game
const QUIT_COMMANDS: [&str; 3] = ["quit", "q", "exit"];

/// What a line typed by the player means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    Empty,
    Quit,
    Hint,
    Guess(String),
}

/// Result of checking a player's guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess is a hidden word and has now been highlighted
    Found { word: String, color: Color },
    /// The word was already found earlier in this session
    AlreadyFound(String),
    /// The guess is not one of the words on the grid
    NotInPuzzle(String),
}

/// Mutable state of one puzzle from generation until the player stops
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    index: WordIndex,
    found: HashSet<String>,
    palette_cursor: usize,
}

impl GameSession {
    pub fn new(grid: Grid, index: WordIndex) -> Self {
        Self {
            grid,
            index,
            found: HashSet::new(),
            palette_cursor: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn index(&self) -> &WordIndex {
        &self.index
    }

    /// Classify a line of input. Hidden words take precedence over commands, so a
    /// puzzle containing "HELP" or "EXIT" stays solvable.
    pub fn interpret(&self, line: &str) -> PlayerInput {
        let input = line.trim().to_lowercase();

        if input.is_empty() {
            PlayerInput::Empty
        } else if self.index.contains(&input) {
            PlayerInput::Guess(input)
        } else if QUIT_COMMANDS.contains(&input.as_str()) {
            PlayerInput::Quit
        } else if HINT_COMMANDS.contains(&input.as_str()) {
            PlayerInput::Hint
        } else {
            PlayerInput::Guess(input)
        }
    }

    /// Check a guess against the placed words and highlight it on a hit
    pub fn guess(&mut self, input: &str) -> Result<GuessOutcome, PlacementError> {
        let word = input.trim().to_uppercase();

        if !self.index.contains(&word) {
            return Ok(GuessOutcome::NotInPuzzle(word));
        }
        if self.found.contains(&word) {
            return Ok(GuessOutcome::AlreadyFound(word));
        }

        let color = HIGHLIGHT_PALETTE[self.palette_cursor];
        self.index.mark_found(&mut self.grid, &word, color)?;
        self.palette_cursor = (self.palette_cursor + 1) % HIGHLIGHT_PALETTE.len();
        self.found.insert(word.clone());

        tracing::info!("Player found {} ({}/{})", word, self.found_count(), self.total());
        Ok(GuessOutcome::Found { word, color })
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn total(&self) -> usize {
        self.index.len()
    }

    /// Words still hidden, alphabetically
    pub fn remaining(&self) -> Vec<&str> {
        self.index
            .words()
            .into_iter()
            .filter(|word| !self.found.contains(*word))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.found_count() == self.total()
    }

    /// Word the next hint should describe
    pub fn next_hint_target(&self) -> Option<&str> {
        self.remaining().into_iter().next()
    }
}

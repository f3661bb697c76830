use std::collections::HashMap;

use crossterm::style::Color;
use rand::{seq::IndexedRandom, Rng};
use thiserror::Error;

use crate::{
    game::grid::Grid,
    models::{Orientation, Position},
};

/// Attempts made for a single word before it is skipped
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("cannot place an empty word")]
    EmptyWord,

    #[error("word '{word}' has {length} letters but the grid is only {grid_size} wide")]
    WordTooLong {
        word: String,
        length: usize,
        grid_size: usize,
    },

    #[error("word '{0}' is already on the grid")]
    AlreadyPlaced(String),

    #[error("could not place '{word}' after {attempts} attempts")]
    AttemptsExhausted { word: String, attempts: usize },

    #[error("word '{0}' was never placed on the grid")]
    WordNotPlaced(String),
}

/// Where a word sits on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub orientation: Orientation,
    pub positions: Vec<Position>,
}

/// Placed words keyed by their uppercase form. Entries are never moved or removed.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    placements: HashMap<String, Placement>,
}

impl WordIndex {
    pub fn get(&self, word: &str) -> Option<&Placement> {
        self.placements.get(&word.to_uppercase())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placed words in alphabetical order
    pub fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self
            .placements()
            .map(|placement| placement.word.as_str())
            .collect();
        words.sort_unstable();
        words
    }

    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.placements.values()
    }

    fn insert(&mut self, placement: Placement) -> &Placement {
        self.placements
            .entry(placement.word.clone())
            .or_insert(placement)
    }

    /// Highlight every cell of a placed word with `color`.
    ///
    /// Any earlier highlight on those cells is replaced, so calling this twice with
    /// the same arguments leaves the grid exactly as calling it once.
    pub fn mark_found(
        &self,
        grid: &mut Grid,
        word: &str,
        color: Color,
    ) -> Result<&Placement, PlacementError> {
        let placement = self
            .get(word)
            .ok_or_else(|| PlacementError::WordNotPlaced(word.to_uppercase()))?;

        for pos in &placement.positions {
            grid.set_highlight(*pos, color);
        }

        Ok(placement)
    }
}

/// Outcome of placing a batch of words
#[derive(Debug, Default)]
pub struct PlacementReport {
    pub index: WordIndex,
    /// Words that were skipped, in input order
    pub failures: Vec<PlacementError>,
}

/// Randomised best-effort word placer.
///
/// Each attempt picks an orientation and an anchor that keeps the whole word in
/// bounds, checks every cell, and only writes when all of them are compatible. A
/// fixed attempt budget bounds the work per word.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    max_attempts: usize,
    orientations: Vec<Orientation>,
}

impl Default for PlacementEngine {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            orientations: Orientation::ALL.to_vec(),
        }
    }
}

impl PlacementEngine {
    pub fn new(max_attempts: usize, orientations: Vec<Orientation>) -> Self {
        let orientations = if orientations.is_empty() {
            Orientation::ALL.to_vec()
        } else {
            orientations
        };

        Self {
            max_attempts: max_attempts.max(1),
            orientations,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn orientations(&self) -> &[Orientation] {
        &self.orientations
    }

    /// Place every word in order, skipping the ones that cannot be placed
    pub fn place_words<S: AsRef<str>>(
        &self,
        grid: &mut Grid,
        words: &[S],
        rng: &mut impl Rng,
    ) -> PlacementReport {
        let mut report = PlacementReport::default();

        for word in words {
            match self.place_word(grid, &mut report.index, word.as_ref(), rng) {
                Ok(placement) => {
                    tracing::debug!(
                        "Placed {} {:?} at ({}, {})",
                        grid.read(&placement.positions),
                        placement.orientation,
                        placement.positions[0].row,
                        placement.positions[0].col
                    );
                }
                Err(e) => {
                    tracing::warn!("Skipping word: {}", e);
                    report.failures.push(e);
                }
            }
        }

        report
    }

    /// Place one word and record it in `index`.
    ///
    /// The grid is untouched unless the placement succeeds.
    pub fn place_word<'a>(
        &self,
        grid: &mut Grid,
        index: &'a mut WordIndex,
        word: &str,
        rng: &mut impl Rng,
    ) -> Result<&'a Placement, PlacementError> {
        let word = word.to_uppercase();
        let letters: Vec<char> = word.chars().collect();
        let length = letters.len();
        let grid_size = grid.size();

        if length == 0 {
            return Err(PlacementError::EmptyWord);
        }
        if index.contains(&word) {
            return Err(PlacementError::AlreadyPlaced(word));
        }
        if length > grid_size {
            return Err(PlacementError::WordTooLong {
                word,
                length,
                grid_size,
            });
        }

        for _ in 0..self.max_attempts {
            let Some(&orientation) = self.orientations.choose(rng) else {
                break;
            };
            let anchor = Self::random_anchor(orientation, grid_size, length, rng);
            let positions: Vec<Position> = (0..length)
                .map(|offset| orientation.step(anchor, offset))
                .collect();

            let fits = positions
                .iter()
                .zip(&letters)
                .all(|(pos, letter)| grid.cell_compatible(*pos, *letter));
            if !fits {
                continue;
            }

            for (pos, letter) in positions.iter().zip(&letters) {
                grid.set_cell(*pos, *letter);
            }

            return Ok(index.insert(Placement {
                word,
                orientation,
                positions,
            }));
        }

        Err(PlacementError::AttemptsExhausted {
            word,
            attempts: self.max_attempts,
        })
    }

    /// Anchor drawn from the cells that keep a `length`-letter run inside the grid
    fn random_anchor(
        orientation: Orientation,
        grid_size: usize,
        length: usize,
        rng: &mut impl Rng,
    ) -> Position {
        let along = rng.random_range(0..=grid_size - length);
        let across = rng.random_range(0..grid_size);

        match orientation {
            Orientation::Horizontal => Position::new(across, along),
            Orientation::Vertical => Position::new(along, across),
        }
    }
}
